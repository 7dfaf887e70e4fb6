//! duoloop core - session state and engine plumbing for the duoloop
//! two-performer live-coding desk.
//!
//! This crate provides the building blocks of the desk:
//!
//! - **Slot** - the two fixed performer identities
//! - **Engine** - the external pattern/audio service seam, its OSC
//!   pass-through client and the adapter that owns engine-side state
//! - **Session** - the performance controller and command dispatch
//! - **Presenter** - pure projection of state into display strings
//! - **Templates** - starter code and pattern snippets
//!
//! # Architecture
//!
//! All state mutations flow through [`LiveSession`] command handlers
//! (or the [`Command`] enum applied in arrival order). The session owns
//! the [`AudioEngine`] adapter, which in turn owns the only
//! [`EngineState`] instance; compilation, scheduling and synthesis live
//! entirely behind the [`PatternEngine`] seam, outside this repository.

pub mod engine;
pub mod error;
pub mod presenter;
pub mod session;
pub mod slot;
pub mod templates;

pub use engine::{
    AudioEngine, EngineState, NoopEngine, OscPatternEngine, PatternEngine, PatternHandle,
    DEFAULT_BPM,
};
pub use error::{Error, Result};
pub use presenter::{global_status, slot_output, DisplayClass, DisplayLine};
pub use session::{
    Command, EvalOutcome, LiveSession, PerformerState, SessionPhase, START_AUDIO_FIRST,
    STOPPED_NOTICE,
};
pub use slot::Slot;
