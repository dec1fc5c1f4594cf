use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use argh::FromArgs;
use weathernow_core::Config;
use weathernow_lookup::{ForecastClient, LocationResolver, ReqwestClient};
use weathernow_session::{Completions, SessionDriver};

mod render;
mod repl;

/// Current weather for any city.
#[derive(FromArgs, Debug)]
struct Args {
    /// path to a TOML config file (default: user config dir)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// print the result as JSON (one-shot mode only)
    #[argh(switch)]
    json: bool,

    /// city to look up; starts an interactive session when omitted
    #[argh(positional)]
    city: Vec<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn build_driver(config: &Config) -> Result<(SessionDriver, Completions)> {
    let http = Arc::new(
        ReqwestClient::new(config.api.timeout(), &config.api.user_agent)
            .context("Failed to create HTTP client")?,
    );
    let resolver = LocationResolver::new(http.clone(), &config.api.geocoding_url)
        .context("Invalid geocoding URL")?;
    let forecast = ForecastClient::new(http, &config.api.forecast_url)
        .context("Invalid forecast URL")?;

    Ok(SessionDriver::new(
        resolver,
        forecast,
        config.search.debounce(),
    ))
}

/// Submit `city` once and print the outcome.
async fn run_once(
    mut driver: SessionDriver,
    mut completions: Completions,
    city: String,
    json: bool,
) -> Result<()> {
    driver.on_query_change(city);
    driver.on_submit();
    driver.settle(&mut completions).await;

    let state = driver.state();
    if let Some(summary) = state.weather() {
        if json {
            println!("{}", serde_json::to_string_pretty(summary)?);
        } else {
            println!("{}", render::render_summary(summary));
        }
        return Ok(());
    }

    let message = state
        .error_message()
        .unwrap_or("Something went wrong. Please try again later.");
    eprintln!("{}", message);
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let config = load_config(args.config.as_ref())?;
    weathernow_core::init(&config.logging.level)?;
    let (config, _) = config.validated()?;

    tracing::info!(
        "Using geocoder {} and forecast {}",
        config.api.geocoding_url,
        config.api.forecast_url
    );

    let (driver, completions) = build_driver(&config)?;

    if args.city.is_empty() {
        repl::run(driver, completions).await
    } else {
        run_once(driver, completions, args.city.join(" "), args.json).await
    }
}
