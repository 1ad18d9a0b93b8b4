use anyhow::Result;
use clap::Parser;

use tokio::net::TcpListener;

use router::{config::Args, processor::Processor};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::warn!("No .env file loaded: {}", e);
    }

    let args = Args::parse();
    tracing::info!("args: {:?}", &args);

    let client = llm_client::Client::new(args.client_config())?;
    let proc = Processor::new(client);

    tracing::info!("Relaying chat requests to {}", args.agent_endpoint);

    let app = router::app(proc);

    tracing::info!("Starting the server on {}", &args.address);
    let listener = TcpListener::bind(&args.address).await?;

    axum::serve(listener, app).await?;
    tracing::info!("Server shutdown");

    Ok(())
}
