use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::InputMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    Reload,
    ToggleCompleted,
    DeleteCourse,
    OpenLink,
    CycleCategoryFilter,
    ClearFilters,
    SignOut,
    ShowHelp,
    HideHelp,
    // Add-course form actions
    StartAddCourse,
    FormChar(char),
    FormBackspace,
    FormNextField,
    FormPrevField,
    FormNextCategory,
    FormPrevCategory,
    FormSubmit,
    FormCancel,
    // Search actions
    StartSearch,
    SearchChar(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
    // Sign-in screen actions
    AuthChar(char),
    AuthBackspace,
    AuthNextField,
    AuthSwitchTab,
    AuthSubmit,
}

pub fn handle_key_event(key: KeyEvent, mode: InputMode, show_help: bool) -> Option<AppAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }

    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    match mode {
        InputMode::Auth => match key.code {
            KeyCode::Enter => Some(AppAction::AuthSubmit),
            KeyCode::Esc => Some(AppAction::Quit),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                Some(AppAction::AuthNextField)
            }
            KeyCode::Left | KeyCode::Right => Some(AppAction::AuthSwitchTab),
            KeyCode::Backspace => Some(AppAction::AuthBackspace),
            KeyCode::Char(c) => Some(AppAction::AuthChar(c)),
            _ => None,
        },

        InputMode::AddCourse => match key.code {
            KeyCode::Enter => Some(AppAction::FormSubmit),
            KeyCode::Esc => Some(AppAction::FormCancel),
            KeyCode::Tab | KeyCode::Down => Some(AppAction::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppAction::FormPrevField),
            KeyCode::Right => Some(AppAction::FormNextCategory),
            KeyCode::Left => Some(AppAction::FormPrevCategory),
            KeyCode::Backspace => Some(AppAction::FormBackspace),
            KeyCode::Char(c) => Some(AppAction::FormChar(c)),
            _ => None,
        },

        InputMode::Search => match key.code {
            KeyCode::Enter => Some(AppAction::SearchConfirm),
            KeyCode::Esc => Some(AppAction::SearchCancel),
            KeyCode::Backspace => Some(AppAction::SearchBackspace),
            KeyCode::Char(c) => Some(AppAction::SearchChar(c)),
            _ => None,
        },

        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(AppAction::Quit),

            KeyCode::Char('j') | KeyCode::Down => Some(AppAction::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppAction::MoveUp),
            KeyCode::Char('<') | KeyCode::Home => Some(AppAction::MoveToTop),
            KeyCode::Char('>') | KeyCode::End => Some(AppAction::MoveToBottom),

            KeyCode::Enter | KeyCode::Char('o') => Some(AppAction::OpenLink),
            KeyCode::Char('m') | KeyCode::Char(' ') => Some(AppAction::ToggleCompleted),
            KeyCode::Char('d') => Some(AppAction::DeleteCourse),
            KeyCode::Char('a') => Some(AppAction::StartAddCourse),
            KeyCode::Char('r') => Some(AppAction::Reload),

            KeyCode::Char('/') => Some(AppAction::StartSearch),
            KeyCode::Char('f') => Some(AppAction::CycleCategoryFilter),
            KeyCode::Char('c') => Some(AppAction::ClearFilters),

            KeyCode::Char('L') => Some(AppAction::SignOut),
            KeyCode::Char('?') => Some(AppAction::ShowHelp),

            _ => None,
        },
    }
}
