use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::cell::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
}

/// Maps a key press to a game command. Releases, repeats and unbound keys
/// map to nothing.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if !is_press(ev) {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Quit requests, Ctrl+C included.
pub fn is_quit(ev: &KeyEvent) -> bool {
    command_for(ev) == Some(Command::Quit)
}

pub fn is_press(ev: &KeyEvent) -> bool {
    ev.kind == KeyEventKind::Press
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
