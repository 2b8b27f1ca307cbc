/// Keyboard → game command mapping.

use crossterm::event::KeyCode;

use crate::entities::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Start from the menu, or play again from an end screen.
    Confirm,
}

/// Arrows and WASD move, Enter confirms.  Every other key maps to `None`.
pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Move(Direction::Right))
        }
        KeyCode::Enter => Some(Command::Confirm),
        _ => None,
    }
}
