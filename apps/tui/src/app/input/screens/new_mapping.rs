use crate::app::state::App;
use crossterm::event::KeyCode;
use sports_mapper::engine::EngineError;

pub async fn handle_new_mapping_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Backspace => {
            app.mapping_input.pop();
        }
        KeyCode::Char(c) => app.mapping_input.push(c),
        KeyCode::Enter => {
            let name = app.mapping_input.clone();
            match app.store.add_mapping(&name).await {
                Ok(_) => {
                    app.close_modal();
                    app.follow_recent();
                }
                // a blank name keeps the prompt open
                Err(EngineError::Validation(_)) => {}
                Err(EngineError::Api(_)) => app.close_modal(),
            }
        }
        _ => {}
    }
}
