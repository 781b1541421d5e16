use super::state::TuiState;

/// Keep the commit cursor inside the current list.
pub fn clamp_commit_selection(state: &mut TuiState, len: usize) {
    if len == 0 {
        state.commit_selected = 0;
    } else if state.commit_selected >= len {
        state.commit_selected = len - 1;
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    clipboard.set_text(text.to_string()).map_err(|e| e.to_string())
}
