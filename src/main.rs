use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use climatic_weather::config::{Config, API_KEY_ENV};
use climatic_weather::location::{suggest, LookupRequest, QueryResolver, ReferenceData};
use climatic_weather::report::{render_text_card, WeatherCard};
use climatic_weather::server::{self, AppState};
use climatic_weather::weather::OpenWeatherClient;

/// Climatic Weather — current weather for any city or Nigerian state
///
/// Examples:
///   climatic Lagos
///   climatic "Port Harcourt" --json
///   climatic --suggest lag
///   climatic --suggest lag --pick 2
///   climatic --serve --port 8080
#[derive(Parser)]
#[command(name = "climatic", version, about, long_about = None)]
struct Cli {
    /// City or state name. Example: climatic Ikeja
    #[arg(index = 1)]
    query: Option<String>,

    /// Print autocomplete suggestions for a prefix.
    #[arg(long, short = 's')]
    suggest: Option<String>,

    /// With --suggest: look up the Nth suggestion (1-based).
    #[arg(long, requires = "suggest")]
    pick: Option<usize>,

    /// Serve the browser widget.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long)]
    host: Option<String>,

    /// Port for --serve.
    #[arg(long)]
    port: Option<u16>,

    /// Print the weather card as JSON.
    #[arg(long)]
    json: bool,

    /// IANA timezone for sunrise/sunset (e.g. Africa/Lagos).
    #[arg(long)]
    tz: Option<String>,

    /// Config file (default: ~/.climatic/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climatic=info,climatic_weather=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // ── Configuration ───────────────────────────────────────────

    let mut config = Config::load(cli.config.as_deref())
        .unwrap_or_else(|e| fail(e))
        .with_env_key(cli.api_key.clone());
    if cli.tz.is_some() {
        config.timezone = cli.tz.clone();
    }
    if let Some(ref host) = cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let data = config.reference_data().unwrap_or_else(|e| fail(e));
    let clock = config.sun_clock().unwrap_or_else(|e| fail(e));

    // ── Suggestions only ────────────────────────────────────────

    if let (Some(prefix), None) = (&cli.suggest, cli.pick) {
        print_suggestions(prefix, &data, cli.json);
        return;
    }

    // ── Everything below needs the provider ─────────────────────

    let client = OpenWeatherClient::from_config(&config).unwrap_or_else(|e| fail(e));
    let resolver = QueryResolver::new(data, client);

    if cli.serve {
        let state = Arc::new(AppState::new(resolver, clock));
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(e));
        if let Err(e) = runtime.block_on(server::start(&config.host, config.port, state)) {
            fail(format!("Cannot serve on {}:{}: {}", config.host, config.port, e));
        }
        return;
    }

    let request = match (&cli.suggest, cli.pick, &cli.query) {
        (Some(prefix), Some(n), _) => {
            let options = suggest(prefix, resolver.data());
            match n.checked_sub(1).and_then(|i| options.get(i)) {
                Some(s) => LookupRequest::Selected(s.clone()),
                None => fail(format!("No suggestion #{} for '{}' ({} available)", n, prefix, options.len())),
            }
        }
        (_, _, Some(q)) => LookupRequest::Typed(q.clone()),
        _ => {
            eprintln!("Error: No city specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  climatic Lagos");
            eprintln!("  climatic --suggest lag");
            eprintln!("  climatic --serve");
            std::process::exit(1);
        }
    };

    // ── Resolve and render ──────────────────────────────────────

    let resolved = resolver.resolve(&request).unwrap_or_else(|e| fail(e));
    let card = WeatherCard::build(&resolved, &clock);

    if cli.json {
        match serde_json::to_string_pretty(&card) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        }
    } else {
        print!("{}", render_text_card(&card));
    }
}

fn print_suggestions(prefix: &str, data: &ReferenceData, json: bool) {
    let suggestions = suggest(prefix, data);
    if json {
        match serde_json::to_string_pretty(&suggestions) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
        return;
    }
    if suggestions.is_empty() {
        eprintln!("  No suggestions for '{}'.", prefix.trim());
        return;
    }
    for (i, s) in suggestions.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, s.display);
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}
