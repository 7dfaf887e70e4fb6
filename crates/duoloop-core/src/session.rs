//! The performance session.
//!
//! [`LiveSession`] orchestrates user actions against the engine adapter
//! and keeps the per-performer projection the display layer reads. All
//! mutations flow through the command handlers (or [`Command`]
//! dispatch); no other component holds mutable state.
//!
//! Lifecycle per slot: Idle → Ready (after StartAudio) → Playing
//! (successful evaluate) → Stopped (failed evaluate, StopAll) → Ready.
//! The global phase only distinguishes Idle from Ready; playing is
//! per-slot.

use log::{info, warn};

use crate::engine::{AudioEngine, PatternEngine};
use crate::error::Result;
use crate::slot::Slot;
use crate::templates;

/// Guidance returned when evaluation is attempted before StartAudio.
pub const START_AUDIO_FIRST: &str = "Please start audio first";

/// Notice stored on a slot after it is stopped by the user.
pub const STOPPED_NOTICE: &str = "Stopped";

/// Outcome of evaluating a slot's source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalOutcome {
    /// The engine accepted the code; the slot is playing.
    Success { message: String },
    /// The code was rejected; the slot is stopped.
    Failure { message: String },
}

impl EvalOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        EvalOutcome::Success {
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        EvalOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, EvalOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            EvalOutcome::Success { message } | EvalOutcome::Failure { message } => message,
        }
    }
}

/// Global lifecycle of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Audio not started; evaluation is refused with guidance.
    Idle,
    /// Engine initialized; slots may evaluate and play.
    Ready,
}

/// Editable and playback state of one performer.
#[derive(Clone, Debug)]
pub struct PerformerState {
    pub slot: Slot,
    pub source_text: String,
    pub last_outcome: Option<EvalOutcome>,
    pub is_playing: bool,
}

impl PerformerState {
    fn new(slot: Slot, source_text: String) -> Self {
        Self {
            slot,
            source_text,
            last_outcome: None,
            is_playing: false,
        }
    }
}

/// A user action, as dispatched by the input layer.
///
/// The front-end converts raw input events into commands and applies
/// them in arrival order; it never mutates session state directly.
#[derive(Clone, Debug)]
pub enum Command {
    StartAudio,
    StopAll,
    StopSlot { slot: Slot },
    EvaluateSlot { slot: Slot },
    ChangeText { slot: Slot, text: String },
    SetBpm { bpm: f64 },
}

/// The performance controller for a two-performer desk.
pub struct LiveSession<E: PatternEngine> {
    engine: AudioEngine<E>,
    phase: SessionPhase,
    performers: [PerformerState; 2],
}

impl<E: PatternEngine> LiveSession<E> {
    /// Create a session with both slots seeded from the starter
    /// templates.
    pub fn new(engine: E) -> Self {
        Self {
            engine: AudioEngine::new(engine),
            phase: SessionPhase::Idle,
            performers: [
                PerformerState::new(Slot::A, templates::starter_for(Slot::A).to_string()),
                PerformerState::new(Slot::B, templates::starter_for(Slot::B).to_string()),
            ],
        }
    }

    /// Apply a command. Errors returned here are desk-level (init and
    /// tempo failures); per-slot compile verdicts land in
    /// [`PerformerState::last_outcome`] instead.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::StartAudio => self.start_audio(),
            Command::StopAll => {
                self.stop_all();
                Ok(())
            }
            Command::StopSlot { slot } => {
                self.stop_slot(slot);
                Ok(())
            }
            Command::EvaluateSlot { slot } => {
                self.evaluate_slot(slot);
                Ok(())
            }
            Command::ChangeText { slot, text } => {
                self.edit_text(slot, text);
                Ok(())
            }
            Command::SetBpm { bpm } => self.set_bpm(bpm),
        }
    }

    /// Idle → Ready. On failure the phase stays Idle and the error is
    /// surfaced; a no-op when already Ready.
    pub fn start_audio(&mut self) -> Result<()> {
        if self.phase == SessionPhase::Ready {
            return Ok(());
        }
        self.engine.initialize()?;
        self.phase = SessionPhase::Ready;
        info!("session ready");
        Ok(())
    }

    /// Evaluate the slot's current source text.
    ///
    /// Before StartAudio this returns the guidance failure without
    /// touching the adapter. Otherwise the outcome is stored on the
    /// performer and the playing flag updated: playing on success,
    /// stopped on failure.
    pub fn evaluate_slot(&mut self, slot: Slot) -> EvalOutcome {
        if self.phase == SessionPhase::Idle {
            warn!("slot {slot}: evaluate refused, audio not started");
            return EvalOutcome::failure(START_AUDIO_FIRST);
        }

        let code = self.performers[slot.index()].source_text.clone();
        let outcome = match self.engine.evaluate(&code, slot) {
            Ok(message) => EvalOutcome::success(message),
            Err(e) => EvalOutcome::failure(e.to_string()),
        };

        let performer = &mut self.performers[slot.index()];
        performer.is_playing = outcome.is_success();
        performer.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Stop both slots and record the stopped notice on each. The phase
    /// is unaffected: the engine stays ready so re-evaluation works
    /// without re-initializing.
    pub fn stop_all(&mut self) {
        self.engine.stop_all();
        for performer in &mut self.performers {
            performer.is_playing = false;
            performer.last_outcome = Some(EvalOutcome::success(STOPPED_NOTICE));
        }
    }

    /// Per-slot variant of [`stop_all`](Self::stop_all).
    pub fn stop_slot(&mut self, slot: Slot) {
        self.engine.stop(slot);
        let performer = &mut self.performers[slot.index()];
        performer.is_playing = false;
        performer.last_outcome = Some(EvalOutcome::success(STOPPED_NOTICE));
    }

    /// Replace the slot's source text and clear its outcome, so stale
    /// status never shows beside unevaluated text.
    pub fn edit_text(&mut self, slot: Slot, text: impl Into<String>) {
        let performer = &mut self.performers[slot.index()];
        performer.source_text = text.into();
        performer.last_outcome = None;
    }

    /// Update the shared tempo via the adapter.
    pub fn set_bpm(&mut self, bpm: f64) -> Result<()> {
        self.engine.set_bpm(bpm)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn bpm(&self) -> f64 {
        self.engine.bpm()
    }

    pub fn performer(&self, slot: Slot) -> &PerformerState {
        &self.performers[slot.index()]
    }

    pub fn is_playing(&self, slot: Slot) -> bool {
        self.performers[slot.index()].is_playing
    }

    /// How many slots are currently playing.
    pub fn playing_count(&self) -> usize {
        self.performers.iter().filter(|p| p.is_playing).count()
    }
}

impl<E: PatternEngine> std::fmt::Debug for LiveSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSession")
            .field("phase", &self.phase)
            .field("performers", &self.performers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PatternHandle;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collaborator double: fails init or compile on demand and counts
    /// engine-level calls.
    #[derive(Clone, Default)]
    struct FakeEngine {
        fail_init: Rc<RefCell<bool>>,
        fail_on_marker: Rc<RefCell<Option<String>>>,
        compiles: Rc<RefCell<usize>>,
        next_handle: Rc<RefCell<u64>>,
    }

    impl PatternEngine for FakeEngine {
        fn init_audio(&mut self) -> crate::Result<()> {
            if *self.fail_init.borrow() {
                return Err(Error::EngineInit("audio permission denied".into()));
            }
            Ok(())
        }

        fn compile_and_play(&mut self, code: &str) -> crate::Result<PatternHandle> {
            *self.compiles.borrow_mut() += 1;
            if let Some(marker) = self.fail_on_marker.borrow().as_deref() {
                if code.contains(marker) {
                    return Err(Error::Compile(format!("syntax error near '{marker}'")));
                }
            }
            *self.next_handle.borrow_mut() += 1;
            Ok(PatternHandle::new(*self.next_handle.borrow()))
        }

        fn stop(&mut self, _handle: PatternHandle) {}

        fn set_tempo(&mut self, _bpm: f64) -> crate::Result<()> {
            Ok(())
        }
    }

    fn ready_session() -> (LiveSession<FakeEngine>, FakeEngine) {
        let engine = FakeEngine::default();
        let mut session = LiveSession::new(engine.clone());
        session.start_audio().unwrap();
        (session, engine)
    }

    #[test]
    fn test_new_session_seeds_starter_templates() {
        let session = LiveSession::new(FakeEngine::default());
        assert_eq!(
            session.performer(Slot::A).source_text,
            templates::starter_for(Slot::A)
        );
        assert_eq!(
            session.performer(Slot::B).source_text,
            templates::starter_for(Slot::B)
        );
        assert_ne!(
            session.performer(Slot::A).source_text,
            session.performer(Slot::B).source_text
        );
    }

    #[test]
    fn test_evaluate_while_idle_never_touches_the_engine() {
        let engine = FakeEngine::default();
        let mut session = LiveSession::new(engine.clone());

        for slot in Slot::ALL {
            let outcome = session.evaluate_slot(slot);
            assert_eq!(outcome, EvalOutcome::failure(START_AUDIO_FIRST));
            assert!(!session.is_playing(slot));
        }
        assert_eq!(*engine.compiles.borrow(), 0);
    }

    #[test]
    fn test_failed_start_audio_keeps_session_idle() {
        let engine = FakeEngine::default();
        *engine.fail_init.borrow_mut() = true;
        let mut session = LiveSession::new(engine.clone());

        assert!(matches!(session.start_audio(), Err(Error::EngineInit(_))));
        assert_eq!(session.phase(), SessionPhase::Idle);

        // Still the idle guidance, not an adapter-level error.
        let outcome = session.evaluate_slot(Slot::A);
        assert_eq!(outcome, EvalOutcome::failure(START_AUDIO_FIRST));
    }

    #[test]
    fn test_start_audio_is_a_guarded_noop_when_ready() {
        let (mut session, _) = ready_session();
        session.start_audio().unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_successful_evaluate_marks_slot_playing() {
        let (mut session, _) = ready_session();
        session.edit_text(Slot::A, "note(\"c2\").slow(4)");

        let outcome = session.evaluate_slot(Slot::A);
        assert!(outcome.is_success());
        assert!(session.is_playing(Slot::A));
        assert_eq!(
            session.performer(Slot::A).last_outcome.as_ref(),
            Some(&outcome)
        );
    }

    #[test]
    fn test_compile_failure_stops_slot_and_spares_the_other() {
        let (mut session, engine) = ready_session();
        *engine.fail_on_marker.borrow_mut() = Some("note(".to_string());

        session.edit_text(Slot::B, "chord(\"c4 e4 g4\").every(4)");
        assert!(session.evaluate_slot(Slot::B).is_success());

        session.edit_text(Slot::A, "note(");
        let outcome = session.evaluate_slot(Slot::A);
        assert!(!outcome.is_success());
        assert!(outcome.message().contains("syntax error"));
        assert!(!session.is_playing(Slot::A));

        // Slot B keeps playing; phase stays Ready.
        assert!(session.is_playing(Slot::B));
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_stop_all_clears_both_slots_and_keeps_phase() {
        let (mut session, _) = ready_session();
        session.evaluate_slot(Slot::A);
        session.evaluate_slot(Slot::B);

        session.stop_all();
        session.stop_all();

        for slot in Slot::ALL {
            assert!(!session.is_playing(slot));
            assert_eq!(
                session.performer(slot).last_outcome,
                Some(EvalOutcome::success(STOPPED_NOTICE))
            );
        }
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_edit_text_always_clears_the_outcome() {
        let (mut session, engine) = ready_session();

        // Playing slot.
        session.evaluate_slot(Slot::A);
        session.edit_text(Slot::A, "something new");
        assert!(session.performer(Slot::A).last_outcome.is_none());

        // Failed slot.
        *engine.fail_on_marker.borrow_mut() = Some("bad".to_string());
        session.edit_text(Slot::B, "bad");
        session.evaluate_slot(Slot::B);
        session.edit_text(Slot::B, "fixed");
        assert!(session.performer(Slot::B).last_outcome.is_none());

        // Never-evaluated slot stays clear too.
        let fresh = LiveSession::new(FakeEngine::default());
        assert!(fresh.performer(Slot::A).last_outcome.is_none());
    }

    #[test]
    fn test_set_bpm_rejects_bad_tempo_and_keeps_previous() {
        let (mut session, _) = ready_session();
        session.set_bpm(128.0).unwrap();

        assert!(matches!(
            session.set_bpm(-5.0),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(session.bpm(), 128.0);
    }

    #[test]
    fn test_command_dispatch_covers_the_handlers() {
        let (mut session, _) = ready_session();
        session
            .apply(Command::ChangeText {
                slot: Slot::A,
                text: "note(\"c2\")".into(),
            })
            .unwrap();
        session.apply(Command::EvaluateSlot { slot: Slot::A }).unwrap();
        assert!(session.is_playing(Slot::A));

        session.apply(Command::StopSlot { slot: Slot::A }).unwrap();
        assert!(!session.is_playing(Slot::A));

        session.apply(Command::SetBpm { bpm: 90.0 }).unwrap();
        assert_eq!(session.bpm(), 90.0);

        session.apply(Command::StopAll).unwrap();
        assert_eq!(session.playing_count(), 0);
    }
}
