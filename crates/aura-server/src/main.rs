// src/main.rs
// Aura - emotion classification gateway

use anyhow::Result;
use aura::classifier::Classifier;
use aura::config::EnvConfig;
use aura::{http, llm, web};
use clap::{Parser, Subcommand};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Emotion classification gateway over an LLM chat-completion API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Host to bind (overrides AURA_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify one piece of text and print the JSON result
    Classify {
        /// Text to classify
        text: String,
    },
}

fn build_classifier(config: &EnvConfig) -> Result<Classifier> {
    let client = llm::client_from_config(config, http::create_shared_client())?;
    Ok(Classifier::new(client)
        .with_mode(config.output_mode)
        .with_timeout(config.timeout))
}

async fn run_server(mut config: EnvConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let classifier = build_classifier(&config)?;
    info!(
        mode = %classifier.mode(),
        timeout_secs = classifier.timeout().as_secs_f64(),
        origins = ?config.cors_origins,
        "Classifier ready"
    );

    let state = web::state::AppState::new(classifier);
    let app = web::create_router(state, &config.cors_origins);

    web::serve(&config.bind_address(), app).await?;
    Ok(())
}

async fn run_classify(config: EnvConfig, text: String) -> Result<()> {
    let classifier = build_classifier(&config)?;
    let outcome = classifier.classify(&text).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv(); // Load .env from current directory

    let cli = Cli::parse();

    let log_level = match &cli.command {
        Some(Commands::Serve { .. }) | None => Level::INFO,
        Some(Commands::Classify { .. }) => Level::WARN, // Keep stdout clean for the JSON
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = EnvConfig::load();
    let validation = config.validate();
    if !validation.is_valid() {
        error!("{}", validation.report());
    } else if !validation.warnings.is_empty() {
        warn!("{}", validation.report());
    }

    match cli.command {
        None => run_server(config, None, None).await?,
        Some(Commands::Serve { host, port }) => run_server(config, host, port).await?,
        Some(Commands::Classify { text }) => run_classify(config, text).await?,
    }

    Ok(())
}
