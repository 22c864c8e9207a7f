mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use parallax_engine::assets::{load_pair, DirSource};
use parallax_engine::device::GpuInit;
use parallax_engine::logging::{init_logging, LoggingConfig};
use parallax_engine::window::{Runtime, RuntimeConfig};

use crate::app::ParallaxApp;
use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(match args.log.as_deref() {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    let source = DirSource::new(&args.assets);
    log::info!(
        "loading {} + {} from {}",
        args.color,
        args.depth,
        source.root().display()
    );

    // Nothing is shown unless both images load.
    let images = match load_pair(&source, &args.color, &args.depth) {
        Ok(pair) => pair,
        Err(err) => {
            log::error!("failed to load '{}': {err}", err.asset_name());
            return Err(err.into());
        }
    };

    let config = RuntimeConfig {
        title: args.title,
        initial_size: LogicalSize::new(args.width, args.height),
    };

    Runtime::run(config, GpuInit::default(), ParallaxApp::new(images))
}
