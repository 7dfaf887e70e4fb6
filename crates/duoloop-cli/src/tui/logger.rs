//! Logger that routes messages into the TUI log panel.
//!
//! While the TUI owns the terminal, log records must not hit stdout or
//! stderr; they are forwarded over a channel and drained into the log
//! panel by the event loop. Before the channel is installed, records
//! fall back to stderr.

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Mutex;

static LOG_SENDER: Mutex<Option<Sender<(Level, String)>>> = Mutex::new(None);
static LOGGER: DeskLogger = DeskLogger;

/// `log` facade backend for the desk.
pub struct DeskLogger;

impl log::Log for DeskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let sender = LOG_SENDER.lock().unwrap();
        match sender.as_ref() {
            Some(tx) => {
                let _ = tx.send((record.level(), record.args().to_string()));
            }
            None => eprintln!("[{}] {}", record.level(), record.args()),
        }
    }

    fn flush(&self) {}
}

/// Install the desk logger and return the receiving end for the log
/// panel. Level defaults to Info, overridable via `RUST_LOG`.
pub fn init_tui_logger() -> Receiver<(Level, String)> {
    let (tx, rx) = unbounded();
    *LOG_SENDER.lock().unwrap() = Some(tx);

    if log::set_logger(&LOGGER).is_ok() {
        let level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        log::set_max_level(level);
    }
    rx
}
