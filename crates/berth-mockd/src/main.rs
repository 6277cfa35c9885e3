use anyhow::Result;
use berth_mockd::{AppState, router};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "berth-mockd")]
#[command(about = "Mock platform backend for local Berth development", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = 9000)]
    port: u16,

    /// Accepted login user
    #[arg(long, default_value = "admin")]
    user: String,

    /// Accepted login password
    #[arg(long, default_value = "admin")]
    pass: String,

    /// Seed a demo workspace with sessions
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("berth_mockd=info,tower_http=info")),
        )
        .init();

    let state = if cli.seed {
        AppState::seeded(&cli.user, &cli.pass).await
    } else {
        AppState::new(&cli.user, &cli.pass)
    };

    let addr = format!("{}:{}", cli.bind, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("mock platform API listening on http://{addr}/api/v0");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
