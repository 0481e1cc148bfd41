use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use surgimark::Config;
use surgimark::headless;
use surgimark::replay::InputScript;
use surgimark::util::{color_to_name, parse_size};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SURGIMARK_GIT_HASH"),
    ")"
);

const DEFAULT_OUTPUT: &str = "surgimark.png";

#[derive(Parser, Debug)]
#[command(name = "surgimark")]
#[command(version = VERSION, about = "Click-driven annotation surface with a failsafe")]
struct Cli {
    /// Replay a TOML input script against a headless surface
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Where to write the final frame of a replay (PNG)
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Surface size for a replay
    #[arg(long, value_name = "WxH", default_value = "1920x1080", value_parser = parse_size)]
    size: (u32, u32),

    /// Configuration file (defaults to ~/.config/surgimark/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.replay else {
        if cli.output.is_some() {
            bail!("--output needs --replay");
        }
        print_usage();
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = InputScript::load(&script_path)?;

    let stop_flag = Arc::new(AtomicBool::new(false));
    spawn_signal_thread(stop_flag.clone())?;

    info!(
        "Starting session: ink {}, {} fps",
        color_to_name(&config.drawing.color.to_color()),
        config.scheduler.fps
    );
    let outcome = headless::run_replay(&config, &script, cli.size, stop_flag)?;

    let output = cli.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    outcome.write_png(&output)?;

    info!(
        "Session ended ({:?}) in {} after {} tick(s): {} stroke(s), {} object(s)",
        outcome.reason,
        outcome.state.label(),
        outcome.ticks,
        outcome.strokes,
        outcome.objects
    );

    if let Some(fault) = outcome.fault {
        bail!(
            "failsafe engaged during {}: {}",
            fault.operation,
            fault.cause
        );
    }

    println!("{}", output.display());
    Ok(())
}

/// Raises `stop_flag` on SIGINT/SIGTERM.
///
/// The thread lives until process exit; the iterator has nothing to clean up.
fn spawn_signal_thread(stop_flag: Arc<AtomicBool>) -> Result<()> {
    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("Failed to register signal handler")?;

    thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            for sig in signals.forever() {
                match sig {
                    SIGTERM | SIGINT => {
                        info!(
                            "Received {} - stopping session",
                            if sig == SIGTERM { "SIGTERM" } else { "SIGINT" }
                        );
                        stop_flag.store(true, Ordering::SeqCst);
                    }
                    _ => warn!("Received unexpected signal: {}", sig),
                }
            }
        })
        .context("Failed to spawn signal thread")?;
    Ok(())
}

fn print_usage() {
    println!("surgimark: Click-driven annotation surface with a failsafe");
    println!();
    println!("Usage:");
    println!("  surgimark --replay SCRIPT [--output PNG] [--size WxH]");
    println!("  surgimark --help");
    println!();
    println!("Gestures:");
    println!("  Right click          Draw (from pointer/erase), pointer (from draw/line)");
    println!("  Right double click   Straight line");
    println!("  Left click           Erase (from pointer/draw/line), pointer (from erase)");
    println!("  Left double click    Undo last stroke, or restore the last clear");
    println!("  Long press           Clear all strokes");
}
