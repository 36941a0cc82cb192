use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use advisor_server::ServerConfig;
use finance_advisor::{render_summary, AdviceEngine, FinancialProfile};

#[derive(Parser, Debug)]
#[command(name = "advisor-report", about = "Print advice for a financial profile JSON file.")]
struct Args {
    /// Path to a profile JSON file ({user, goals, investments, insurance})
    #[arg(short, long)]
    input: PathBuf,

    /// Print the full report as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let txt = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let profile: FinancialProfile =
        serde_json::from_str(&txt).with_context(|| format!("parsing {}", args.input.display()))?;

    let config = ServerConfig::from_env()?;
    let predictor = config.load_predictor().await?;
    let report = AdviceEngine::new(predictor).report(profile).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_summary(&report));
    }
    Ok(())
}
