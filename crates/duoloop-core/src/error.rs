//! Error types for duoloop.

use thiserror::Error;

/// Result type alias for duoloop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the desk.
///
/// Every variant is non-fatal: the worst outcome for the user is a slot
/// left stopped with a message on display.
#[derive(Debug, Error)]
pub enum Error {
    /// The audio subsystem could not be brought up. A later StartAudio
    /// may succeed.
    #[error("audio engine setup failed: {0}")]
    EngineInit(String),

    /// An engine action was attempted before StartAudio.
    #[error("audio engine not initialized")]
    NotInitialized,

    /// The pattern text was rejected by the engine. The message is the
    /// engine's own wording, shown verbatim.
    #[error("{0}")]
    Compile(String),

    /// A parameter was out of range (e.g. a non-positive tempo).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error from the engine transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// OSC encoding/decoding error from the engine transport.
    #[error("OSC error: {0}")]
    Osc(#[from] rosc::OscError),
}
