//! Audio engine adapter.
//!
//! Wraps a [`PatternEngine`] and owns the engine-side bookkeeping: the
//! initialized flag, the shared tempo, and the active pattern handle per
//! slot. Invariant: a slot holds at most one handle at any time;
//! evaluating stops the previous handle before a new one is installed.

use std::collections::HashMap;

use log::{debug, info};

use super::{PatternEngine, PatternHandle};
use crate::error::{Error, Result};
use crate::slot::Slot;

/// Tempo in BPM before anyone touches the dial.
pub const DEFAULT_BPM: f64 = 120.0;

/// Confirmation stored on a slot after a successful evaluate.
pub const EVAL_OK_MESSAGE: &str = "Code executed successfully";

/// Engine-side bookkeeping owned by the adapter.
///
/// Constructed explicitly and held by value; there is exactly one per
/// adapter and no ambient globals.
#[derive(Clone, Debug)]
pub struct EngineState {
    /// Whether the audio side has been brought up.
    pub initialized: bool,
    /// Shared tempo in BPM.
    pub bpm: f64,
    /// Active pattern handle per slot.
    pub active: HashMap<Slot, PatternHandle>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            initialized: false,
            bpm: DEFAULT_BPM,
            active: HashMap::new(),
        }
    }
}

/// Adapter over the external pattern/audio service.
pub struct AudioEngine<E: PatternEngine> {
    engine: E,
    state: EngineState,
}

impl<E: PatternEngine> AudioEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: EngineState::new(),
        }
    }

    /// Bring up the audio side. Idempotent: after the first success,
    /// further calls return Ok without touching the engine. A failure
    /// leaves the adapter uninitialized so the user can retry.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.initialized {
            return Ok(());
        }
        self.engine.init_audio().map_err(|e| match e {
            Error::EngineInit(_) => e,
            other => Error::EngineInit(other.to_string()),
        })?;
        self.state.initialized = true;
        info!("audio engine initialized");
        Ok(())
    }

    /// Compile and play `code` on `slot`, replacing whatever the slot
    /// was playing.
    ///
    /// The previous pattern is stopped and cleared before compilation,
    /// whatever the verdict: a compile failure leaves the slot stopped,
    /// never dangling.
    pub fn evaluate(&mut self, code: &str, slot: Slot) -> Result<String> {
        self.require_initialized()?;
        if let Some(handle) = self.state.active.remove(&slot) {
            self.engine.stop(handle);
            debug!("slot {slot}: stopped pattern {}", handle.raw());
        }
        let handle = self.engine.compile_and_play(code)?;
        self.state.active.insert(slot, handle);
        info!("slot {slot}: playing pattern {}", handle.raw());
        Ok(EVAL_OK_MESSAGE.to_string())
    }

    /// Stop and clear the slot's pattern, if any.
    pub fn stop(&mut self, slot: Slot) {
        if let Some(handle) = self.state.active.remove(&slot) {
            self.engine.stop(handle);
            info!("slot {slot}: stopped");
        }
    }

    /// Stop both slots. Always succeeds; repeating it is a no-op.
    pub fn stop_all(&mut self) {
        for slot in Slot::ALL {
            self.stop(slot);
        }
    }

    /// Update the shared tempo. Rejects non-finite, non-positive and
    /// fractional values, leaving the tempo unchanged.
    pub fn set_bpm(&mut self, bpm: f64) -> Result<()> {
        self.require_initialized()?;
        if !bpm.is_finite() || bpm <= 0.0 || bpm.fract() != 0.0 {
            return Err(Error::InvalidParameter(format!(
                "tempo must be a positive whole number of BPM, got {bpm}"
            )));
        }
        self.engine.set_tempo(bpm)?;
        self.state.bpm = bpm;
        info!("tempo set to {bpm} BPM");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn bpm(&self) -> f64 {
        self.state.bpm
    }

    /// Whether the slot currently holds an active pattern.
    pub fn is_playing(&self, slot: Slot) -> bool {
        self.state.active.contains_key(&slot)
    }

    /// Read-only view of the engine-side state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    fn require_initialized(&self) -> Result<()> {
        if self.state.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

impl<E: PatternEngine> std::fmt::Debug for AudioEngine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
