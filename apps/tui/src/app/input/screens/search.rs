use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

/// Edits the search term; the panes refilter on every key
pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.store.clear_search();
            app.screen = AppScreen::Browse;
        }
        KeyCode::Enter => app.screen = AppScreen::Browse,
        KeyCode::Backspace => {
            let mut term = app.store.search().term.clone();
            term.pop();
            app.store.set_search_term(term);
        }
        KeyCode::Char(c) => {
            let term = format!("{}{c}", app.store.search().term);
            app.store.set_search_term(term);
        }
        _ => return,
    }
    app.cursors = [0; 3];
}
