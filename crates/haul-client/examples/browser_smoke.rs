/// Smoke-test for `ChromiumRenderer`.
///
/// Launches a headless Chromium, looks up the best buyers for Quartz on
/// SC Trade Tools, and prints the outcome as JSON.
///
/// Run with:
///   cargo run --example browser_smoke --features browser
use haul_client::ChromiumRenderer;
use haul_core::{LookupConfig, LookupRequest, LookupResponse, LookupService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = LookupConfig::from_env()?;
    let renderer = ChromiumRenderer::new().with_request_timeout(config.navigation_timeout);
    let service = LookupService::with_config(renderer, config);

    println!("Looking up Quartz…");
    let outcome = service
        .lookup_best_seller(&LookupRequest::new("Quartz", 1.0))
        .await;

    let ok = outcome.is_ok();
    println!(
        "{}",
        serde_json::to_string_pretty(&LookupResponse::from(outcome))?
    );

    anyhow::ensure!(ok, "lookup did not produce any sell locations");
    println!("OK");
    Ok(())
}
