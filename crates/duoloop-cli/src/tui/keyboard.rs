//! Key bindings for the desk.
//!
//! Every binding acts on the explicitly focused pane; nothing is
//! inferred from cursor or selection state. Evaluation is Ctrl-E
//! rather than Ctrl-Enter because terminals do not report the latter
//! reliably.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::editor::Direction;

/// An editing operation on the focused pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Newline,
    Backspace,
    Move(Direction),
}

/// What a key event asks the desk to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    FocusNext,
    StartAudio,
    StopAll,
    EvaluateFocused,
    NudgeBpm(i32),
    Edit(EditOp),
}

/// Map a key event to a desk action. Returns None for keys the desk
/// ignores.
pub fn handle_key(key: KeyEvent) -> Option<InputAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (key.code, ctrl) {
        (KeyCode::Char('c'), true) | (KeyCode::Char('q'), true) => Some(InputAction::Quit),
        (KeyCode::Char('a'), true) => Some(InputAction::StartAudio),
        (KeyCode::Char('e'), true) => Some(InputAction::EvaluateFocused),
        (KeyCode::Char('s'), true) => Some(InputAction::StopAll),
        (KeyCode::Up, true) => Some(InputAction::NudgeBpm(5)),
        (KeyCode::Down, true) => Some(InputAction::NudgeBpm(-5)),
        (KeyCode::Tab, _) => Some(InputAction::FocusNext),
        (KeyCode::Enter, _) => Some(InputAction::Edit(EditOp::Newline)),
        (KeyCode::Backspace, _) => Some(InputAction::Edit(EditOp::Backspace)),
        (KeyCode::Left, _) => Some(InputAction::Edit(EditOp::Move(Direction::Left))),
        (KeyCode::Right, _) => Some(InputAction::Edit(EditOp::Move(Direction::Right))),
        (KeyCode::Up, false) => Some(InputAction::Edit(EditOp::Move(Direction::Up))),
        (KeyCode::Down, false) => Some(InputAction::Edit(EditOp::Move(Direction::Down))),
        (KeyCode::Char(c), false) => Some(InputAction::Edit(EditOp::Insert(c))),
        _ => None,
    }
}
