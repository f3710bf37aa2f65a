//! CLI entrypoint for canonica
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use canonica_application::use_cases::merge_record::RecordMerger;
use canonica_application::use_cases::resolve_company::ResolveCompanyUseCase;
use canonica_application::use_cases::web_fallback::WebSearchFallback;
use canonica_domain::{DomainError, MIN_QUERY_LEN};
use canonica_infrastructure::{
    ClearbitLogoFetcher, ConfigLoader, FileConfig, FileImageStore, FixedWindowRateLimiter,
    HttpChatCompleter, InMemoryCanonicalStore, TavilySearch,
};
use canonica_presentation::{Cli, ConsoleFormatter, OutputFormat};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let query = cli.query.trim().to_string();
    validate_query(&query)?;

    // Load configuration
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    config.validate()?;

    let api_key = config
        .provider
        .api_key
        .clone()
        .or_else(|| std::env::var("CANONICA_API_KEY").ok());
    let Some(api_key) = api_key else {
        bail!("No provider API key; set provider.api_key or CANONICA_API_KEY");
    };

    let search_api_key = config
        .search
        .api_key
        .clone()
        .or_else(|| std::env::var("CANONICA_SEARCH_API_KEY").ok())
        .unwrap_or_default();
    if search_api_key.is_empty() {
        warn!("No search API key configured; web fallback tier will be unavailable");
    }

    info!("Starting resolution for '{query}'");

    // === Dependency Injection ===
    let completer = Arc::new(HttpChatCompleter::new(&config.provider.api_base, api_key));
    let search = Arc::new(TavilySearch::new(search_api_key));
    let store = Arc::new(InMemoryCanonicalStore::new());
    let rate_limiter = Arc::new(FixedWindowRateLimiter::new(
        config.limits.max_requests,
        Duration::from_secs(config.limits.window_seconds),
    ));

    let mut merger = RecordMerger::new(store);
    if config.logos.enabled && !cli.no_logos {
        merger = merger.with_logo_pipeline(
            Arc::new(ClearbitLogoFetcher::new()),
            Arc::new(FileImageStore::new(&config.logos.directory)),
        );
    }

    let web_fallback = WebSearchFallback::new(search, completer.clone());
    let use_case = ResolveCompanyUseCase::new(
        completer,
        rate_limiter,
        web_fallback,
        merger,
        config.chain.to_chain(),
    );

    let result = use_case.execute(&query).await?;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Compact => ConsoleFormatter::format_compact(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{output}");

    Ok(())
}

/// Enforce the entry-point precondition: at least [`MIN_QUERY_LEN`]
/// characters (not bytes) after trimming.
fn validate_query(query: &str) -> Result<(), DomainError> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Err(DomainError::QueryTooShort { min: MIN_QUERY_LEN });
    }
    Ok(())
}
