//! services/client/src/bin/docquery.rs

use clap::Parser;
use docquery_core::SessionController;
use docquery_lib::{
    adapters::HttpDocumentService,
    cli::{load_pdf, run_once, run_repl, Args},
    config::Config,
    error::ClientError,
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let args = Args::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?.with_overrides(args.base_url.as_deref(), args.timeout)?;
    let log_level = if args.verbose { Level::DEBUG } else { config.log_level };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(base_url = %config.base_url, "Configuration loaded");

    // --- 2. Initialize the Transport Adapter & Controller ---
    let transport = Arc::new(HttpDocumentService::new(
        &config.base_url,
        config.request_timeout,
    )?);
    let mut controller = SessionController::new(transport);

    if let Some(path) = &args.file {
        controller.select_file(load_pdf(path).await?);
    }

    // --- 3. Run ---
    let mut stdout = std::io::stdout();
    if args.is_one_shot() {
        run_once(&mut controller, &args.ask, &mut stdout).await
    } else {
        let stdin = BufReader::new(tokio::io::stdin());
        run_repl(&mut controller, stdin, &mut stdout).await
    }
}
