use crate::app::AppState;
use crate::domain::{Filter, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Composing => handle_compose_mode(app, key),
        UiMode::Editing => handle_edit_mode(app, key),
        UiMode::Confirming => handle_confirm_mode(app, key),
    }
}

/// Bracketed paste goes to whichever field has focus
pub fn handle_paste(app: &mut AppState, text: &str) {
    app.paste(text);
}

fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        KeyCode::Char('a') | KeyCode::Char('i') => app.start_compose(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('C') => app.clear_all(),

        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Completed),
        KeyCode::Char('3') => app.set_filter(Filter::Uncompleted),
        KeyCode::Char('f') | KeyCode::Char('F') => app.cycle_filter(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_compose_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_compose(),
        KeyCode::Esc => app.cancel_compose(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_edit_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Up | KeyCode::Down => app.commit_edit(),
        KeyCode::Tab => app.toggle_selected(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer(false),
        _ => {}
    }
    Ok(false)
}
