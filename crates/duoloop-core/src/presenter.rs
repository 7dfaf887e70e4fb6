//! Display projection.
//!
//! Pure functions turning session state into the text/class pairs the
//! front-end renders. Never authoritative: everything here can be
//! re-derived from [`LiveSession`](crate::session::LiveSession) state
//! at any time.

use crate::session::{EvalOutcome, PerformerState, SessionPhase};

/// A piece of display text with a styling class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub class: DisplayClass,
}

/// Styling class for a display line. The front-end maps these to
/// colors; the web original used them as CSS class names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayClass {
    Neutral,
    Ready,
    Running,
    Success,
    Error,
}

/// The output line shown under one editor pane.
pub fn slot_output(performer: &PerformerState) -> DisplayLine {
    match &performer.last_outcome {
        Some(EvalOutcome::Success { message }) => DisplayLine {
            text: format!("✓ {message}"),
            class: DisplayClass::Success,
        },
        Some(EvalOutcome::Failure { message }) => DisplayLine {
            text: format!("✗ Error: {message}"),
            class: DisplayClass::Error,
        },
        None => DisplayLine {
            text: String::new(),
            class: DisplayClass::Neutral,
        },
    }
}

/// The global status line for the desk header.
pub fn global_status(phase: SessionPhase, playing_count: usize, bpm: f64) -> DisplayLine {
    match (phase, playing_count) {
        (SessionPhase::Idle, _) => DisplayLine {
            text: "Audio off - start audio to play".to_string(),
            class: DisplayClass::Neutral,
        },
        (SessionPhase::Ready, 0) => DisplayLine {
            text: format!("Audio running @ {bpm:.0} BPM - ready to evaluate"),
            class: DisplayClass::Ready,
        },
        (SessionPhase::Ready, n) => DisplayLine {
            text: format!(
                "Audio running @ {bpm:.0} BPM - {n} pattern{} playing",
                if n == 1 { "" } else { "s" }
            ),
            class: DisplayClass::Running,
        },
    }
}
