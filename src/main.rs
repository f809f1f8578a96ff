use anyhow::Context;
use clap::Parser;

use config::Config;
use server::Server;

mod config;
mod document_root;
mod handlers;
mod http;
mod listing;
mod mime;
mod policy;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let ctx = config.serve_context()?;

    log::info!("DOC_ROOT: {}", ctx.root.path().display());

    let address = config.address();
    let server = Server::bind(&address, ctx)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    log::info!("Server running on {}", server.local_addr()?);

    server.run().await;

    Ok(())
}
