//! Terminal lifecycle and the desk event loop.
//!
//! One loop owns everything: it drains log records, expires the error
//! banner, redraws, and applies key events as session commands in
//! arrival order. Engine calls block the loop; that is the desk's
//! serialization guarantee: no two evaluates can ever overlap.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duoloop_core::{Command, LiveSession, PatternEngine, SessionPhase, Slot};
use log::Level;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::DeskApp;
use super::keyboard::{handle_key, EditOp, InputAction};
use super::ui;

const TICK: Duration = Duration::from_millis(50);

/// Run the desk TUI until the user quits. Patterns are stopped on the
/// way out.
pub fn run<E: PatternEngine>(
    mut session: LiveSession<E>,
    initial_bpm: Option<f64>,
    log_rx: Receiver<(Level, String)>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut session, initial_bpm, log_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<E: PatternEngine>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut LiveSession<E>,
    initial_bpm: Option<f64>,
    log_rx: Receiver<(Level, String)>,
) -> Result<()> {
    let mut app = DeskApp::new(
        &session.performer(Slot::A).source_text,
        &session.performer(Slot::B).source_text,
    );
    let mut pending_bpm = initial_bpm;

    while !app.should_quit {
        for (level, message) in log_rx.try_iter() {
            app.push_log(level, message);
        }
        app.tick();
        terminal.draw(|frame| ui::render_ui(frame, &app, session))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key(key) {
                        apply_action(&mut app, session, &mut pending_bpm, action);
                    }
                }
            }
        }
    }

    session.stop_all();
    Ok(())
}

fn apply_action<E: PatternEngine>(
    app: &mut DeskApp,
    session: &mut LiveSession<E>,
    pending_bpm: &mut Option<f64>,
    action: InputAction,
) {
    match action {
        InputAction::Quit => app.should_quit = true,
        InputAction::FocusNext => app.focus_next(),
        InputAction::StartAudio => match session.apply(Command::StartAudio) {
            Ok(()) => {
                // A --bpm argument is applied once the engine can take it.
                if let Some(bpm) = pending_bpm.take() {
                    if let Err(e) = session.apply(Command::SetBpm { bpm }) {
                        app.show_error(e.to_string());
                    }
                }
            }
            Err(e) => app.show_error(e.to_string()),
        },
        InputAction::StopAll => {
            let _ = session.apply(Command::StopAll);
        }
        InputAction::EvaluateFocused => {
            let slot = app.focused;
            let outcome = session.evaluate_slot(slot);
            // Idle guidance goes to the banner; compile verdicts live in
            // the per-slot output line.
            if session.phase() == SessionPhase::Idle {
                app.show_error(outcome.message());
            }
        }
        InputAction::NudgeBpm(delta) => {
            let bpm = session.bpm() + f64::from(delta);
            if let Err(e) = session.apply(Command::SetBpm { bpm }) {
                app.show_error(e.to_string());
            }
        }
        InputAction::Edit(op) => {
            let slot = app.focused;
            let editor = app.editor_mut(slot);
            match op {
                EditOp::Move(direction) => editor.move_cursor(direction),
                EditOp::Insert(c) => editor.insert_char(c),
                EditOp::Newline => editor.insert_newline(),
                EditOp::Backspace => editor.backspace(),
            }
            if !matches!(op, EditOp::Move(_)) {
                let text = app.editor(slot).text();
                let _ = session.apply(Command::ChangeText { slot, text });
            }
        }
    }
}
