use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Start,
    Restart,
    ShowLeaderboard,
    NicknameChar(char),
    NicknameBackspace,
    Submit,
    Quit,
    None,
}

/// How keys are read right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Letters are commands
    Play,
    /// Letters go into the nickname field
    NicknameEntry,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, mode: InputMode) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Handle Ctrl+C
        if ctrl && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match mode {
            InputMode::Play => Self::play_key(key.code),
            InputMode::NicknameEntry => Self::nickname_key(key.code, ctrl),
        }
    }

    fn play_key(code: KeyCode) -> KeyAction {
        match code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Tab => KeyAction::ShowLeaderboard,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn nickname_key(code: KeyCode, ctrl: bool) -> KeyAction {
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl => KeyAction::Restart,
            KeyCode::Char(_) if ctrl => KeyAction::None,
            KeyCode::Char(ch) => KeyAction::NicknameChar(ch),
            KeyCode::Backspace => KeyAction::NicknameBackspace,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Tab => KeyAction::ShowLeaderboard,
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Up), InputMode::Play),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Down), InputMode::Play),
            KeyAction::Turn(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Left), InputMode::Play),
            KeyAction::Turn(Direction::Left)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Right), InputMode::Play),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('w')), InputMode::Play),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('a')), InputMode::Play),
            KeyAction::Turn(Direction::Left)
        );
        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper, InputMode::Play),
            KeyAction::Turn(Direction::Right)
        );
    }

    #[test]
    fn test_play_controls() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Enter), InputMode::Play),
            KeyAction::Start
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('r')), InputMode::Play),
            KeyAction::Restart
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Tab), InputMode::Play),
            KeyAction::ShowLeaderboard
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Esc), InputMode::Play),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('x')), InputMode::Play),
            KeyAction::None
        );
    }

    #[test]
    fn test_nickname_entry_takes_letters() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('q')), InputMode::NicknameEntry),
            KeyAction::NicknameChar('q')
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Char('w')), InputMode::NicknameEntry),
            KeyAction::NicknameChar('w')
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Backspace), InputMode::NicknameEntry),
            KeyAction::NicknameBackspace
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Enter), InputMode::NicknameEntry),
            KeyAction::Submit
        );
        assert_eq!(
            handler.handle_key_event(key(KeyCode::Up), InputMode::NicknameEntry),
            KeyAction::None
        );
    }

    #[test]
    fn test_nickname_entry_ctrl_keys() {
        let handler = InputHandler::new();

        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(
            handler.handle_key_event(ctrl_r, InputMode::NicknameEntry),
            KeyAction::Restart
        );

        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(
            handler.handle_key_event(ctrl_x, InputMode::NicknameEntry),
            KeyAction::None
        );
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c, InputMode::Play), KeyAction::Quit);
        assert_eq!(
            handler.handle_key_event(ctrl_c, InputMode::NicknameEntry),
            KeyAction::Quit
        );
    }
}
