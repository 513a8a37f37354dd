use std::io;

use anyhow::Result;
use clap::Parser;
use config::{CmdLine, Config};
use script::Replay;

pub mod config;
pub mod script;

fn run(cmd_line: &CmdLine) -> Result<()> {
    let cfg = Config::load(cmd_line)?;
    tracing::debug!(steps = cfg.steps.len(), check = cfg.check, "loaded script");
    let mut replay = Replay::new(&cfg);
    replay.run(&cfg.steps, &mut io::stdout().lock())?;
    tracing::info!(
        len = replay.buffer().len(),
        capacity = replay.buffer().capacity(),
        "replay finished"
    );
    Ok(())
}

fn main() {
    let cmd_line = CmdLine::parse();
    tracing_subscriber::fmt()
        .with_max_level(cmd_line.log_level.unwrap_or(tracing::Level::ERROR))
        .init();
    if let Err(e) = run(&cmd_line) {
        tracing::error!("replay failed: {:?}", e);
        std::process::exit(1)
    }
}
