use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use signal_trader::{Settings, Trader};
use tracing_subscriber::EnvFilter;

/// Run one trading invocation: fetch bars, compute RSI/MACD, trade on the signal
#[derive(Parser, Debug)]
#[command(name = "signal-trader", version)]
struct Args {
    /// Invocation event as JSON (no fields are required)
    #[arg(long, default_value = "{}")]
    event: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let args = Args::parse();
    let event: Value = serde_json::from_str(&args.event).context("Invalid --event JSON")?;

    let settings = Settings::load().context("Failed to load settings")?;
    tracing::info!(
        symbol = %settings.symbol,
        timeframe = settings.timeframe.as_str(),
        lookback = settings.lookback,
        quantity = %settings.quantity,
        base_url = %settings.base_url,
        "🚀 signal-trader invocation starting"
    );

    let trader = Trader::from_settings(&settings);
    let response = trader.handle(&event).await.context("Invocation failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    tracing::info!(action = %response.action, status = %response.result.status, "✅ Invocation complete");
    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signal_trader=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
