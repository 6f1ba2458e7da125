//! Replays a recorded touch script through a signature pad and writes a PNG.

mod error;
mod script;

use clap::Parser;
use error::ReplayResult;
use script::Script;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "signet-replay")]
#[command(about = "Replay a touch script through a signature pad and write a PNG")]
struct Cli {
    /// JSON touch script to play.
    script: PathBuf,
    /// Output PNG path.
    out: PathBuf,
    /// Write only the committed strokes, without background or decorations.
    #[arg(long)]
    signature_only: bool,
}

fn run(cli: &Cli) -> ReplayResult<()> {
    let playback = Script::load(&cli.script)?.play()?;
    let image = if cli.signature_only {
        playback.signature()?
    } else {
        playback.frame()?
    };

    signet_render::write_png(&image, &cli.out)?;
    log::info!("Wrote {}", cli.out.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
