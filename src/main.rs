use anyhow::Result;
use ipl_predictor::commentary::groq::GroqClient;
use ipl_predictor::config::Config;
use ipl_predictor::engine::Predictor;
use ipl_predictor::model::ModelArtifacts;
use ipl_predictor::pipeline::Pipeline;
use ipl_predictor::tui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn config_path() -> PathBuf {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return PathBuf::from(path);
            }
        }
    }
    PathBuf::from("config.toml")
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("ipl-predictor.log")?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ipl_predictor=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = Config::load(&config_path())?;

    // Load saved keys from .env (real env vars take precedence)
    Config::load_env_file();

    println!();
    println!("  IPL Win Predictor v0.1.0");
    println!("  ========================");
    println!();

    // Artifacts are required; nothing useful runs without them.
    let artifacts = ModelArtifacts::load(&config.model)?;
    let predictor = Arc::new(Predictor::from_artifacts(artifacts)?);
    println!("  Model loaded.");

    let api_key = Config::groq_api_key();
    if api_key.is_none() {
        println!("  GROQ_API_KEY not set; commentary requests will be rejected.");
        tracing::warn!("GROQ_API_KEY not set");
    }
    let api = Arc::new(GroqClient::new(&config.commentary, api_key)?);

    let pipeline = Pipeline::new(predictor, api);
    tracing::info!(model = %config.commentary.model, "starting TUI");

    tui::run_tui(pipeline).await?;

    tracing::debug!("shutting down");
    Ok(())
}
