use clap::Parser;

use tinyserve::config::Config;
use tinyserve::server;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = match Config::try_parse() {
        Ok(cfg) => cfg,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    tracing::info!("Starting server");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    server::run(&cfg, shutdown).await?;
    Ok(())
}
