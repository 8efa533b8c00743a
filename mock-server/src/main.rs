use clap::Parser;
use tokio::net::TcpListener;

/// In-memory todo API for local development and integration tests.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Port to listen on (127.0.0.1).
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Log level filter, overridden by `RUST_LOG`.
    #[arg(long, env = "MOCK_SERVER_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run(listener).await
}
