//! Event Handling - Keyboard and paste input processing

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppState, FormField, InputMode};
use super::views::ActiveView;

/// Actions the application loop has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    RunAnalysis,
    LoadFile(PathBuf),
    SaveSettings,
    None,
}

/// Handle keyboard events
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if let InputMode::Editing(field) = state.input_mode {
        return handle_editing(key, field, state);
    }

    // Global keybindings
    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Tab => {
            state.navigate(state.active_view.next());
            return Action::None;
        }
        KeyCode::BackTab => {
            state.navigate(state.active_view.prev());
            return Action::None;
        }
        KeyCode::Char(c) => {
            if let Some(view) = ActiveView::from_digit(c) {
                state.navigate(view);
                return Action::None;
            }
        }
        _ => {}
    }

    match state.active_view {
        ActiveView::Dashboard => {
            if key.code == KeyCode::Char('n') {
                state.navigate(ActiveView::Analysis);
            }
        }
        ActiveView::Analysis => return handle_analysis(key, state),
        ActiveView::Results => match key.code {
            KeyCode::Right | KeyCode::Char('l') => state.results_tab = state.results_tab.next(),
            KeyCode::Left | KeyCode::Char('h') => state.results_tab = state.results_tab.prev(),
            KeyCode::Char('n') => state.navigate(ActiveView::Analysis),
            _ => {}
        },
        ActiveView::History => match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.move_history_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => state.move_history_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => state.toggle_history_selection(),
            KeyCode::Char('c') if state.history.can_compare() => {
                state.status_message = Some("Side-by-side comparison is not available yet".into());
            }
            _ => {}
        },
        ActiveView::Settings => match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.move_settings_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => state.move_settings_cursor(1),
            KeyCode::Char(' ') | KeyCode::Enter => state.toggle_setting(),
            KeyCode::Char('s') => return Action::SaveSettings,
            _ => {}
        },
    }

    Action::None
}

fn handle_analysis(key: KeyEvent, state: &mut AppState) -> Action {
    let edit = |state: &mut AppState, field| state.input_mode = InputMode::Editing(field);

    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => edit(state, FormField::Data),
        KeyCode::Char('p') => edit(state, FormField::Period),
        KeyCode::Char('c') => edit(state, FormField::Competitors),
        KeyCode::Char('f') => {
            state.form.file_path.clear();
            edit(state, FormField::FilePath);
        }
        KeyCode::Char('x') if !state.form.loading => {
            state.form.set_input("");
            state.form.loaded_file = None;
            state.form.error = None;
        }
        KeyCode::Char('r') => return Action::RunAnalysis,
        _ => {}
    }
    Action::None
}

fn handle_editing(key: KeyEvent, field: FormField, state: &mut AppState) -> Action {
    match key.code {
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        KeyCode::Enter => match field {
            FormField::Data => state.form.push_str("\n"),
            FormField::FilePath => {
                state.input_mode = InputMode::Normal;
                let path = state.form.file_path.trim();
                if !path.is_empty() {
                    return Action::LoadFile(PathBuf::from(path));
                }
            }
            FormField::Period | FormField::Competitors => state.input_mode = InputMode::Normal,
        },
        KeyCode::Backspace => match state.form.field_mut(field) {
            Some(buffer) => {
                buffer.pop();
            }
            None => state.form.pop_char(),
        },
        KeyCode::Char(c) => insert_text(state, field, &c.to_string()),
        _ => {}
    }
    Action::None
}

/// Bracketed paste goes into the field being edited, or the data box
pub fn handle_paste(text: &str, state: &mut AppState) {
    if state.active_view != ActiveView::Analysis {
        return;
    }
    match state.input_mode {
        InputMode::Editing(field) => insert_text(state, field, text),
        InputMode::Normal => insert_text(state, FormField::Data, text),
    }
}

fn insert_text(state: &mut AppState, field: FormField, text: &str) {
    match state.form.field_mut(field) {
        // Single-line fields drop pasted line breaks
        Some(buffer) => buffer.extend(text.chars().filter(|c| *c != '\n' && *c != '\r')),
        None => state.form.push_str(text),
    }
}

/// Poll for key presses and pastes with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(Event::Key(key))),
            Event::Paste(text) => return Ok(Some(Event::Paste(text))),
            _ => {}
        }
    }
    Ok(None)
}
