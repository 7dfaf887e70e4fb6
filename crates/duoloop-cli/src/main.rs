//! duoloop - the two-performer live-coding desk.
//!
//! This binary is the thin input adapter around `duoloop-core`: it
//! parses arguments, wires the logger, builds the pattern engine and
//! hands the session to the TUI event loop. With `--headless` it runs
//! one full desk round-trip against the no-op engine instead, which is
//! useful for smoke-testing without a terminal or a pattern server.

mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use duoloop_core::{presenter, LiveSession, NoopEngine, OscPatternEngine, Slot};

/// duoloop - two-performer cycle-based live coding
#[derive(Parser, Debug)]
#[command(name = "duoloop")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A two-performer live-coding desk", long_about = None)]
struct Args {
    /// Pattern server address
    #[arg(long, default_value = "127.0.0.1:57320", value_name = "HOST:PORT")]
    engine: String,

    /// Tempo applied after audio start, in BPM
    #[arg(long, value_name = "BPM")]
    bpm: Option<f64>,

    /// Run one desk round-trip against the no-op engine and exit
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        return run_headless(args.bpm);
    }

    let log_rx = tui::logger::init_tui_logger();
    let engine = OscPatternEngine::new(&args.engine)
        .with_context(|| format!("failed to create OSC client for {}", args.engine))?;
    let session = LiveSession::new(engine);
    tui::run(session, args.bpm, log_rx)
}

/// Exercise the full desk lifecycle and print the presenter output.
fn run_headless(bpm: Option<f64>) -> Result<()> {
    let mut session = LiveSession::new(NoopEngine::new());

    session.start_audio()?;
    if let Some(bpm) = bpm {
        session.set_bpm(bpm)?;
    }

    for slot in Slot::ALL {
        session.evaluate_slot(slot);
        let line = presenter::slot_output(session.performer(slot));
        println!("slot {slot}: {}", line.text);
    }
    let status =
        presenter::global_status(session.phase(), session.playing_count(), session.bpm());
    println!("{}", status.text);

    session.stop_all();
    let status =
        presenter::global_status(session.phase(), session.playing_count(), session.bpm());
    println!("{}", status.text);
    Ok(())
}
