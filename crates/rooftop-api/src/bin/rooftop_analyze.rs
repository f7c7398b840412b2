//! Analyze one rooftop image from disk and print the text report.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rooftop_api::{logging, run_analysis};
use rooftop_models::SolarAssumptions;
use rooftop_vision::{OpenRouterClient, VisionConfig};

#[derive(Parser, Debug)]
#[command(name = "rooftop-analyze")]
#[command(about = "Estimate rooftop solar potential from an image")]
struct Args {
    /// JPEG or PNG image of the rooftop
    image: PathBuf,

    /// Vision model to use instead of VISION_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("rooftop-analyze: rustls crypto provider was already installed");
    }

    logging::init_cli_tracing();

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read image {}", args.image.display()))?;

    let client = OpenRouterClient::new(vision_config(&args))
        .context("failed to build vision client")?;
    let assumptions = SolarAssumptions::from_env();

    match run_analysis(&client, &assumptions, &image).await {
        Ok(outcome) => {
            println!("{}", outcome.report.render_text());
            Ok(())
        }
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                eprintln!("Raw response from model:\n{}", raw);
            }
            Err(anyhow::Error::new(e)
                .context(format!("analysis of {} failed", args.image.display())))
        }
    }
}

fn vision_config(args: &Args) -> VisionConfig {
    let config = VisionConfig::from_env();
    match &args.model {
        Some(model) => config.with_model(model.clone()),
        None => config,
    }
}
