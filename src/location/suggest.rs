//! Autocomplete over the two reference datasets.

use super::dataset::ReferenceData;
use super::types::{LocationEntry, Suggestion};

/// Maximum number of suggestions shown under the input box.
pub const MAX_SUGGESTIONS: usize = 10;

/// Suggestions for the current input, Nigeria matches first.
///
/// Recomputed in full on every keystroke; the datasets are small.
pub fn suggest(input: &str, data: &ReferenceData) -> Vec<Suggestion> {
    suggest_from(input, &data.nigeria, &data.global)
}

pub fn suggest_from(input: &str, nigeria: &[LocationEntry], global: &[LocationEntry]) -> Vec<Suggestion> {
    let q = input.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let local = nigeria
        .iter()
        .filter(|e| matches_nigeria(e, &q))
        .map(|e| Suggestion {
            display: match &e.state {
                Some(state) => format!("{}, {}, {}", e.name, state, e.country),
                None => format!("{}, {}", e.name, e.country),
            },
            search: format!("{}, {}", e.name, e.country),
        });

    let world = global
        .iter()
        .filter(|e| e.name.to_lowercase().starts_with(&q))
        .map(|e| {
            let label = format!("{}, {}", e.name, e.country);
            Suggestion {
                display: label.clone(),
                search: label,
            }
        });

    local.chain(world).take(MAX_SUGGESTIONS).collect()
}

// Typing the country name itself ("nigeria") lists every local entry.
fn matches_nigeria(entry: &LocationEntry, q: &str) -> bool {
    entry.name.to_lowercase().starts_with(q)
        || entry.state.as_deref().is_some_and(|s| s.to_lowercase().starts_with(q))
        || entry.country.to_lowercase() == q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nigeria() -> Vec<LocationEntry> {
        vec![
            LocationEntry::with_state("Lagos", "Lagos", "Nigeria"),
            LocationEntry::with_state("Ikeja", "Lagos", "Nigeria"),
            LocationEntry::with_state("Abuja", "Federal Capital Territory", "Nigeria"),
            LocationEntry::with_state("Kano", "Kano", "Nigeria"),
        ]
    }

    fn global() -> Vec<LocationEntry> {
        vec![
            LocationEntry::city("London", "United Kingdom"),
            LocationEntry::city("Lagos", "Portugal"),
            LocationEntry::city("Lahore", "Pakistan"),
            LocationEntry::city("Kampala", "Uganda"),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert!(suggest_from("", &nigeria(), &global()).is_empty());
        assert!(suggest_from("   \t", &nigeria(), &global()).is_empty());
    }

    #[test]
    fn test_nigeria_entry_labels() {
        let only_nigeria = vec![LocationEntry::with_state("Lagos", "Lagos", "Nigeria")];
        let out = suggest_from("lag", &only_nigeria, &[]);
        assert_eq!(
            out,
            vec![Suggestion {
                display: "Lagos, Lagos, Nigeria".into(),
                search: "Lagos, Nigeria".into(),
            }]
        );
    }

    #[test]
    fn test_state_prefix_matches() {
        // "Ikeja" matches through its state.
        let out = suggest_from("LAG", &nigeria(), &global());
        let displays: Vec<&str> = out.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(displays, vec!["Lagos, Lagos, Nigeria", "Ikeja, Lagos, Nigeria", "Lagos, Portugal"]);
        assert_eq!(out[1].search, "Ikeja, Nigeria");
    }

    #[test]
    fn test_nigeria_before_global() {
        let out = suggest_from("la", &nigeria(), &global());
        assert_eq!(out.len(), 4);
        assert!(out[..2].iter().all(|s| s.display.ends_with("Nigeria")));
        assert_eq!(out[2].display, "Lagos, Portugal");
        assert_eq!(out[2].search, "Lagos, Portugal");
        assert_eq!(out[3].display, "Lahore, Pakistan");
    }

    #[test]
    fn test_trimmed_and_case_insensitive() {
        let out = suggest_from("  KaN ", &nigeria(), &global());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].search, "Kano, Nigeria");
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert!(suggest_from("lgos", &nigeria(), &global()).is_empty());
        assert!(suggest_from("ondon", &nigeria(), &global()).is_empty());
    }

    #[test]
    fn test_country_name_lists_all_local_entries() {
        let out = suggest_from("Nigeria", &nigeria(), &global());
        assert_eq!(out.len(), nigeria().len());
    }

    #[test]
    fn test_capped_at_ten() {
        let many: Vec<LocationEntry> = (0..25)
            .map(|i| LocationEntry::city(&format!("Town{}", i), "Testland"))
            .collect();
        let out = suggest_from("town", &[], &many);
        assert_eq!(out.len(), MAX_SUGGESTIONS);
        assert_eq!(out[0].display, "Town0, Testland");
        assert_eq!(out[9].display, "Town9, Testland");
    }

    #[test]
    fn test_builtin_data_properties() {
        let data = ReferenceData::builtin().unwrap();
        for input in ["a", "b", "k", "lag", "o", "ab", "z", "nigeria"] {
            let out = suggest(input, &data);
            assert!(out.len() <= MAX_SUGGESTIONS, "{}", input);

            // Nigeria-derived entries form a prefix of the list.
            let first_global = out
                .iter()
                .position(|s| s.display.matches(", ").count() == 1)
                .unwrap_or(out.len());
            assert!(out[first_global..].iter().all(|s| s.display.matches(", ").count() == 1));
        }
    }

    #[test]
    fn test_builtin_lagos_prefers_nigeria() {
        let data = ReferenceData::builtin().unwrap();
        let out = suggest("lagos", &data);
        assert!(out[0].display.ends_with(", Lagos, Nigeria"));
        assert!(out.iter().any(|s| s.search == "Lagos, Nigeria"));
        assert_eq!(out.last().unwrap().display, "Lagos, Portugal");
    }
}
