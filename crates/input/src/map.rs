//! Key bindings: crossterm key events to game actions.
//!
//! | keys | action |
//! |------|--------|
//! | ← h a | move left |
//! | → l d | move right |
//! | ↓ j s | soft drop |
//! | ↑ x k w | rotate clockwise |
//! | z y | rotate counter-clockwise |
//! | space | hard drop |
//! | c | hold |
//! | esc p | pause |
//! | enter | confirm |
//! | r | restart |
//! | q, ctrl-c | quit |
//!
//! Letters match in either case.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Action bound to `key`, if any. Quit keys win over everything else.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Enter => Some(GameAction::Confirm),
        KeyCode::Char(ch) => char_action(ch.to_ascii_lowercase()),
        _ => None,
    }
}

fn char_action(ch: char) -> Option<GameAction> {
    let action = match ch {
        'h' | 'a' => GameAction::MoveLeft,
        'l' | 'd' => GameAction::MoveRight,
        'j' | 's' => GameAction::SoftDrop,
        'x' | 'k' | 'w' => GameAction::RotateCw,
        'z' | 'y' => GameAction::RotateCcw,
        ' ' => GameAction::HardDrop,
        'c' => GameAction::Hold,
        'p' => GameAction::Pause,
        'r' => GameAction::Restart,
        _ => return None,
    };
    Some(action)
}

/// `q` in either case, or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            let ch = ch.to_ascii_lowercase();
            ch == 'q' || (ch == 'c' && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}
