use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
    None,
}

impl From<&KeyEvent> for Command {
    fn from(ev: &KeyEvent) -> Self {
        // Releases and repeats show up on some platforms
        if ev.kind != KeyEventKind::Press {
            return Command::None;
        }

        if is_ctrl_c(ev) {
            return Command::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::Turn(Up),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::Turn(Left),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::Turn(Down),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::Turn(Right),
            KeyCode::Char('p') | KeyCode::Char('P') => Command::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
            _ => Command::None,
        }
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Command {
        Command::from(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(press(KeyCode::Up), Command::Turn(Up));
        assert_eq!(press(KeyCode::Down), Command::Turn(Down));
        assert_eq!(press(KeyCode::Left), Command::Turn(Left));
        assert_eq!(press(KeyCode::Right), Command::Turn(Right));
        assert_eq!(press(KeyCode::Char('w')), Command::Turn(Up));
        assert_eq!(press(KeyCode::Char('a')), Command::Turn(Left));
        assert_eq!(press(KeyCode::Char('S')), Command::Turn(Down));
        assert_eq!(press(KeyCode::Char('d')), Command::Turn(Right));
    }

    #[test]
    fn quit_and_pause_keys() {
        assert_eq!(press(KeyCode::Esc), Command::Quit);
        assert_eq!(press(KeyCode::Char('q')), Command::Quit);
        assert_eq!(press(KeyCode::Char('p')), Command::Pause);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from(&ctrl_c), Command::Quit);
    }

    #[test]
    fn other_keys_and_releases_are_ignored() {
        assert_eq!(press(KeyCode::Char('x')), Command::None);
        assert_eq!(press(KeyCode::Enter), Command::None);

        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Command::from(&release), Command::None);
    }
}
