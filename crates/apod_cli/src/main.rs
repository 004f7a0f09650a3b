use apod_core::config::{API_KEY_ENV, DEFAULT_BASE_URL, DEMO_API_KEY};
use apod_fetch::cli::{anchor_day, handle_command, FetchCommands};
use apod_fetch::logging::init_logging;
use apod_fetch::prelude::*;
use apod_web::{render_page, AppState};
use clap::Parser;
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A duration such as `300ms`, `2s` or `1m30s`. A bare number is milliseconds.
#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total = Duration::ZERO;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(format!("Invalid character in duration: {}", rest));
            }
            let number: u64 = rest[..digits]
                .parse()
                .map_err(|_| "Invalid number in duration".to_string())?;
            rest = &rest[digits..];

            let unit_len = rest.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(rest.len());
            let unit = &rest[..unit_len];
            rest = rest[unit_len..].trim_start();

            total += match unit {
                "" | "ms" => Duration::from_millis(number),
                "s" => Duration::from_secs(number),
                "m" => Duration::from_secs(number * 60),
                "h" => Duration::from_secs(number * 3600),
                _ => return Err(format!("Invalid duration unit: {}", unit)),
            };
        }

        Ok(HumanDuration(total))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Astronomy Picture of the Day for this date through the years", long_about = None)]
pub struct Cli {
    /// NASA API key (falls back to the rate-limited demo key)
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Pause after every upstream request (e.g. 300ms, 1s)
    #[arg(long, default_value = "300ms")]
    throttle: HumanDuration,
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Render the "on this day" gallery as an HTML page
    Render {
        /// Anchor day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Write the page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Serve the gallery page over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    #[command(flatten)]
    Fetch(FetchCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = ApodConfig::new(cli.api_key)
        .with_base_url(&cli.base_url)?
        .with_throttle(cli.throttle.0);
    if config.uses_demo_key() {
        warn!("⚠️ Using {}, which is heavily rate limited. Set {} to use your own key", DEMO_API_KEY, API_KEY_ENV);
    }

    let client = Arc::new(ApodClient::new(&config)?);
    info!("🛰️ Using {} at {}", client.source(), config.base_url);

    match cli.command {
        Commands::Render { date, output } => {
            let day = anchor_day(date.as_deref())?;
            let collector = GalleryCollector::new(client, &config);
            let gallery = collector.collect_for(day).await;
            let html = render_page(&gallery)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    info!("📄 Wrote {} entries to {}", gallery.entries.len(), path.display());
                }
                None => std::io::stdout().lock().write_all(html.as_bytes())?,
            }
        }
        Commands::Serve { addr } => {
            let collector = GalleryCollector::new(client, &config);
            apod_web::serve(addr, AppState::new(collector)).await?;
        }
        Commands::Fetch(command) => {
            let mut stdout = std::io::stdout().lock();
            handle_command(command, client.as_ref(), &config, &mut stdout).await?;
        }
    }

    Ok(())
}
