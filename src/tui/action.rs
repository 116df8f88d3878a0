use crate::tui::state::{AppState, InputMode, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Back,
    Quit,
    Next,
    Previous,
    JumpForward(usize),
    JumpBackward(usize),
    Add,
    Rename,
    Delete,
    OpenSettings,
    EditName,
    EditPrice,
    EditTax,
    CycleCategory,
    // Input line
    InsertChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    Submit,
    Cancel,
}

impl Action {
    /// Translates a key press for the current screen and mode.
    pub fn from_key(state: &AppState, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if state.mode != InputMode::Normal {
            return match key.code {
                KeyCode::Enter => Some(Action::Submit),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Backspace => Some(Action::DeleteChar),
                KeyCode::Left => Some(Action::CursorLeft),
                KeyCode::Right => Some(Action::CursorRight),
                KeyCode::Char(c) => Some(Action::InsertChar(c)),
                _ => None,
            };
        }

        // Shared navigation
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Esc => return Some(Action::Back),
            KeyCode::Down | KeyCode::Char('j') => return Some(Action::Next),
            KeyCode::Up | KeyCode::Char('k') => return Some(Action::Previous),
            KeyCode::PageDown => return Some(Action::JumpForward(10)),
            KeyCode::PageUp => return Some(Action::JumpBackward(10)),
            KeyCode::Enter => return Some(Action::Open),
            _ => {}
        }

        match (state.screen, key.code) {
            (Screen::Home, KeyCode::Char('a')) => Some(Action::Add),
            (Screen::Home, KeyCode::Char('e')) => Some(Action::Rename),
            (Screen::Home, KeyCode::Char('d')) => Some(Action::Delete),
            (Screen::Home, KeyCode::Char('s')) => Some(Action::OpenSettings),

            (Screen::ListDetail(_), KeyCode::Char('a')) => Some(Action::Add),
            (Screen::ListDetail(_), KeyCode::Char('n')) => Some(Action::EditName),
            (Screen::ListDetail(_), KeyCode::Char('p')) => Some(Action::EditPrice),
            (Screen::ListDetail(_), KeyCode::Char('c')) => Some(Action::CycleCategory),
            (Screen::ListDetail(_), KeyCode::Char('t')) => Some(Action::EditTax),
            (Screen::ListDetail(_), KeyCode::Char('d')) => Some(Action::Delete),

            (Screen::Settings, KeyCode::Char('a')) => Some(Action::Add),
            (Screen::Settings, KeyCode::Char('e')) => Some(Action::Rename),
            (Screen::Settings, KeyCode::Char('d')) => Some(Action::Delete),
            _ => None,
        }
    }
}
