use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(version, about = "Serve the Meta AI vs Gemini AI debate pages")]
struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,debate=debug,tower_http=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Refuse to start without the Gemini credential
    let exchange = debate::exchange_from_env()?;
    let app = server::app(exchange);

    let addr = SocketAddr::new(cli.host, cli.port);
    tracing::info!(%addr, "Listening");

    axum::Server::try_bind(&addr)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not bind {addr}"))?
        .serve(app.into_make_service())
        .await
        .into_diagnostic()?;

    Ok(())
}
