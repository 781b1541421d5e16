use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::input::{clamp_commit_selection, copy_to_clipboard};
use super::state::{Explorer, TuiState, ViewMode, BRUSH_STEP};
use crate::stats::HourSource;

const TAB_COUNT: usize = ViewMode::TITLES.len();

/// Handle a keyboard event, mutating TUI state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut TuiState, explorer: &Explorer) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return false;
    }

    if state.search_mode {
        handle_search_input(key_event.code, state);
        clamp_to_listed(state, explorer);
        return false;
    }

    if state.brush_mode {
        handle_brush_input(key_event, state);
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.search_query.clear();
        }
        KeyCode::Char('b') => {
            state.brush_mode = true;
            state.tab_index = 0;
        }
        KeyCode::Esc => state.clear_brush(),
        KeyCode::Char('m') => {
            state.hours = match state.hours {
                HourSource::Lines => HourSource::Commits,
                HourSource::Commits => HourSource::Lines,
            };
            state.set_status(format!("Time of day from {}", state.hours));
        }
        KeyCode::Char('c') => copy_selected_url(state, explorer),
        KeyCode::Tab => state.tab_index = (state.tab_index + 1) % TAB_COUNT,
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 {
                TAB_COUNT - 1
            } else {
                state.tab_index - 1
            };
        }
        KeyCode::Left | KeyCode::Char('[') => state.step_progress(-1),
        KeyCode::Right | KeyCode::Char(']') => state.step_progress(1),
        KeyCode::Char('{') => state.step_progress(-10),
        KeyCode::Char('}') => state.step_progress(10),
        KeyCode::Home => state.set_progress(0),
        KeyCode::End => state.set_progress(100),
        KeyCode::Up | KeyCode::Char('k') => {
            state.commit_selected = state.commit_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => state.commit_selected += 1,
        KeyCode::PageUp => state.commit_selected = state.commit_selected.saturating_sub(10),
        KeyCode::PageDown => state.commit_selected += 10,
        _ => {}
    }

    clamp_to_listed(state, explorer);
    state.view_mode = ViewMode::from_index(state.tab_index);
    false
}

/// The slider and the search both shrink the list under the cursor.
fn clamp_to_listed(state: &mut TuiState, explorer: &Explorer) {
    let len = explorer.derive(state).listed.len();
    clamp_commit_selection(state, len);
}

/// Arrow keys move the brush cursor; Space/Enter anchors or completes the rectangle.
fn handle_brush_input(key_event: KeyEvent, state: &mut TuiState) {
    let step = if key_event.modifiers.contains(KeyModifiers::SHIFT) {
        BRUSH_STEP * 5.0
    } else {
        BRUSH_STEP
    };
    match key_event.code {
        KeyCode::Esc => state.clear_brush(),
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(-step, 0.0),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(step, 0.0),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(0.0, -step),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(0.0, step),
        KeyCode::Enter | KeyCode::Char(' ') => state.brush_point(),
        _ => {}
    }
}

fn handle_search_input(code: KeyCode, state: &mut TuiState) {
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_query.clear();
        }
        KeyCode::Enter => state.search_mode = false,
        KeyCode::Backspace => {
            state.search_query.pop();
        }
        KeyCode::Char(c) => state.search_query.push(c),
        _ => {}
    }
    state.commit_selected = 0;
}

fn copy_selected_url(state: &mut TuiState, explorer: &Explorer) {
    clamp_to_listed(state, explorer);
    let url = explorer
        .derive(state)
        .listed
        .get(state.commit_selected)
        .map(|c| (c.url.clone(), c.short_id()));
    if let Some((url, short)) = url {
        match copy_to_clipboard(&url) {
            Ok(()) => state.set_status(format!("Copied link for {short}")),
            Err(err) => state.set_status(format!("Clipboard error: {err}")),
        }
    }
}

/// Mouse wheel moves the slider.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState, explorer: &Explorer) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => state.step_progress(1),
        MouseEventKind::ScrollDown => state.step_progress(-1),
        _ => return,
    }
    clamp_to_listed(state, explorer);
}
