use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tabletop::{config::ViewerConfig, TabletopApp};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default viewer settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the scene textures are loaded from
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = ViewerConfig::load(args.config.as_deref()).context("loading config")?;
    if let Some(assets) = args.assets {
        config.assets.texture_dir = assets;
    }

    let app = TabletopApp::new(config).context("creating the event loop")?;
    app.run().context("running the viewer")
}
