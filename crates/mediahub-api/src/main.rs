use anyhow::Context;
use mediahub_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let (_state, router) = mediahub_api::setup::initialize_app(config.clone()).await?;

    mediahub_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
