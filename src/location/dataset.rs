//! Reference datasets: the global city list and the Nigeria locations list.
//!
//! Both are compiled into the binary and parsed once at startup. Either can
//! be replaced by a JSON file of the same shape named in the config.

use std::fs;
use std::path::Path;

use super::types::LocationEntry;
use crate::config::ConfigError;

const BUILTIN_CITIES: &str = include_str!("../../data/cities.json");
const BUILTIN_NIGERIA: &str = include_str!("../../data/nigeria_locations.json");

/// Country code the weather provider uses for Nigeria.
pub const NIGERIA_CODE: &str = "NG";
pub const NIGERIA_NAME: &str = "Nigeria";

/// Immutable lookup tables shared by the suggestion engine and the resolver.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub nigeria: Vec<LocationEntry>,
    pub global: Vec<LocationEntry>,
}

impl ReferenceData {
    pub fn new(nigeria: Vec<LocationEntry>, global: Vec<LocationEntry>) -> Self {
        Self { nigeria, global }
    }

    /// The datasets compiled into the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            nigeria: parse_entries(BUILTIN_NIGERIA, "built-in Nigeria list")?,
            global: parse_entries(BUILTIN_CITIES, "built-in city list")?,
        })
    }

    /// Built-in datasets, with either list replaced by a file when given.
    pub fn load(nigeria_path: Option<&Path>, cities_path: Option<&Path>) -> Result<Self, ConfigError> {
        let nigeria = match nigeria_path {
            Some(p) => read_entries(p)?,
            None => parse_entries(BUILTIN_NIGERIA, "built-in Nigeria list")?,
        };
        let global = match cities_path {
            Some(p) => read_entries(p)?,
            None => parse_entries(BUILTIN_CITIES, "built-in city list")?,
        };
        tracing::debug!(nigeria = nigeria.len(), global = global.len(), "reference data loaded");
        Ok(Self { nigeria, global })
    }

    /// First Nigeria entry whose name matches, ignoring case.
    pub fn nigeria_by_name(&self, name: &str) -> Option<&LocationEntry> {
        let needle = name.trim().to_lowercase();
        self.nigeria.iter().find(|e| e.name.to_lowercase() == needle)
    }

    /// First Nigeria entry whose name or state matches, ignoring case.
    pub fn nigeria_by_name_or_state(&self, term: &str) -> Option<&LocationEntry> {
        let needle = term.trim().to_lowercase();
        self.nigeria.iter().find(|e| {
            e.name.to_lowercase() == needle
                || e.state.as_deref().is_some_and(|s| s.to_lowercase() == needle)
        })
    }
}

fn parse_entries(json: &str, source: &str) -> Result<Vec<LocationEntry>, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Dataset(format!("{}: {}", source, e)))
}

fn read_entries(path: &Path) -> Result<Vec<LocationEntry>, ConfigError> {
    let data = fs::read_to_string(path)
        .map_err(|e| ConfigError::Dataset(format!("{}: {}", path.display(), e)))?;
    parse_entries(&data, &path.display().to_string())
}

/// Human label for a provider country code. Only Nigeria is mapped.
pub fn country_label(code: &str) -> &str {
    if code == NIGERIA_CODE {
        NIGERIA_NAME
    } else {
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_parses() {
        let data = ReferenceData::builtin().unwrap();
        assert!(!data.nigeria.is_empty());
        assert!(!data.global.is_empty());
        assert!(data.nigeria.iter().all(|e| e.state.is_some()));
        assert!(data.global.iter().all(|e| e.state.is_none()));
    }

    #[test]
    fn test_nigeria_by_name_case_insensitive() {
        let data = ReferenceData::builtin().unwrap();
        let e = data.nigeria_by_name("IKEJA").unwrap();
        assert_eq!(e.state.as_deref(), Some("Lagos"));
        assert_eq!(e.country, "Nigeria");
    }

    #[test]
    fn test_nigeria_by_state() {
        let data = ReferenceData::builtin().unwrap();
        assert!(data.nigeria_by_name("Rivers").is_none());
        let e = data.nigeria_by_name_or_state("rivers").unwrap();
        assert_eq!(e.state.as_deref(), Some("Rivers"));
    }

    #[test]
    fn test_country_label() {
        assert_eq!(country_label("NG"), "Nigeria");
        assert_eq!(country_label("GH"), "GH");
        assert_eq!(country_label("ng"), "ng");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cities.json");
        fs::write(&path, r#"[{"name": "Testville", "country": "Nowhere"}]"#).unwrap();

        let data = ReferenceData::load(None, Some(&path)).unwrap();
        assert_eq!(data.global, vec![LocationEntry::city("Testville", "Nowhere")]);
        assert!(!data.nigeria.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ReferenceData::load(Some(&dir.path().join("nope.json")), None);
        assert!(matches!(result, Err(ConfigError::Dataset(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(ReferenceData::load(Some(&path), None).is_err());
    }
}
