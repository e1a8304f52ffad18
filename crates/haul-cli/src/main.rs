use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use haul_client::ChromiumRenderer;
use haul_core::{LookupConfig, LookupRequest, LookupResponse, LookupService};

#[derive(Parser)]
#[command(name = "haul", version, about = "Find where to sell Star Citizen cargo")]
struct Cli {
    /// Results page to query
    #[arg(long, global = true, env = "HAUL_BASE_URL")]
    base_url: Option<String>,

    /// Navigation timeout in seconds
    #[arg(long, global = true, env = "HAUL_NAV_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Extra wait after navigation, in milliseconds
    #[arg(long, global = true, env = "HAUL_SETTLE_DELAY_MS")]
    settle_ms: Option<u64>,

    /// Chrome/Chromium binary to launch
    #[arg(long, global = true, env = "CHROME_BIN")]
    chrome: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the best places to sell an item
    Lookup {
        /// Commodity name, e.g. "Quartz"
        #[arg(short, long)]
        item: String,

        /// Quantity in SCU
        #[arg(short, long, default_value_t = 1.0)]
        quantity: f64,

        /// Print the full JSON response instead of the summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Run the Quartz and Titanium lookups and print both responses
    Smoke,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("haul=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = build_service(&cli)?;

    match cli.command {
        Commands::Lookup {
            item,
            quantity,
            json,
        } => cmd_lookup(&service, &item, quantity, json).await,
        Commands::Smoke => cmd_smoke(&service).await,
    }
}

fn build_service(cli: &Cli) -> Result<LookupService<ChromiumRenderer>> {
    let mut config = LookupConfig::default();
    if let Some(url) = &cli.base_url {
        config = config
            .with_base_url(url)
            .context("Invalid --base-url")?;
    }
    if let Some(secs) = cli.timeout {
        anyhow::ensure!(secs > 0, "--timeout must be at least 1 second");
        config = config.with_navigation_timeout(Duration::from_secs(secs));
    }
    if let Some(ms) = cli.settle_ms {
        config = config.with_settle_delay(Duration::from_millis(ms));
    }

    tracing::debug!(?config, "Lookup configured");

    let renderer = match &cli.chrome {
        Some(path) => ChromiumRenderer::with_executable(path),
        None => ChromiumRenderer::new(),
    }
    .with_request_timeout(config.navigation_timeout);

    Ok(LookupService::with_config(renderer, config))
}

async fn cmd_lookup(
    service: &LookupService<ChromiumRenderer>,
    item: &str,
    quantity: f64,
    json: bool,
) -> Result<ExitCode> {
    let outcome = service
        .lookup_best_seller(&LookupRequest::new(item, quantity))
        .await;
    let code = if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&LookupResponse::from(outcome))?
        );
        return Ok(code);
    }

    match outcome {
        Ok(result) => {
            println!("{}", result.message);
            println!("\nEstimated payout: {} UEC", result.total_profit);
        }
        Err(err) => {
            eprintln!("{}", err.message);
            if let Some(details) = err.details {
                eprintln!("({details})");
            }
        }
    }

    Ok(code)
}

async fn cmd_smoke(service: &LookupService<ChromiumRenderer>) -> Result<ExitCode> {
    println!("=== Testing SC Trade Tools lookup ===");

    for item in ["Quartz", "Titanium"] {
        println!("\n--- Testing with {item} ---");
        let outcome = service
            .lookup_best_seller(&LookupRequest::new(item, 1.0))
            .await;
        println!("\nResult for {item}:");
        println!(
            "{}",
            serde_json::to_string_pretty(&LookupResponse::from(outcome))?
        );
    }

    Ok(ExitCode::SUCCESS)
}
