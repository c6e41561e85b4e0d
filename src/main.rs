#[macro_use]
extern crate tracing;

#[macro_use]
extern crate eyre;

mod core;
mod games;
mod util;

use eyre::{Result, WrapErr};
use tokio::{runtime::Builder as RuntimeBuilder, signal};
use twilight_gateway::CloseFrame;

use crate::core::{events::event_loop, logging, BotConfig, Context};

fn main() {
    let runtime = RuntimeBuilder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Could not build runtime");

    if let Err(err) = dotenvy::dotenv() {
        panic!("Failed to prepare .env variables: {err}");
    }

    let _log_worker_guard = logging::init();

    if let Err(source) = runtime.block_on(async_main()) {
        error!(?source, "Critical error in main");
    }
}

async fn async_main() -> Result<()> {
    BotConfig::init().context("failed to initialize config")?;

    let (ctx, mut shard) = Context::init()
        .await
        .context("failed to create context")?;

    tokio::select! {
        _ = event_loop(ctx, &mut shard) => error!("Event loop ended"),
        res = signal::ctrl_c() => match res {
            Ok(_) => info!("Received Ctrl+C"),
            Err(err) => error!(?err, "Failed to await Ctrl+C"),
        }
    }

    if let Err(err) = shard.close(CloseFrame::NORMAL).await {
        warn!(?err, "Failed to close shard");
    }

    info!("Shutting down");

    Ok(())
}
