use clap::Parser;
use std::net::SocketAddr;

use server::Config;

#[derive(Parser)]
#[command(name = "media-gateway")]
#[command(about = "Aggregation gateway for movie, TV, anime and manga upstreams", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Database file path
    #[arg(short, long, default_value = "media.db")]
    database: String,

    /// TMDB v4 read-access token
    #[arg(long, env = "TMDB_READ_ACCESS_TOKEN")]
    tmdb_token: String,

    /// Base URL of a self-hosted Consumet deployment
    #[arg(long, env = "CONSUMET_BASE_URL")]
    consumet_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let database_url = format!("sqlite:{}?mode=rwc", cli.database);

    let mut config = Config::new(database_url, cli.tmdb_token);
    config.consumet_base_url = cli.consumet_url;

    server::run_server(addr, config).await
}
