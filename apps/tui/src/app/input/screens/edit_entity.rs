use crate::app::form::{EditEntityState, FieldValue};
use crate::app::state::App;
use crossterm::event::KeyCode;
use sports_mapper::engine::Pane;
use sports_mapper::Tab;

pub async fn handle_edit_entity_input(app: &mut App, key: KeyCode) {
    let Some(edit_state) = app.edit_state.as_mut() else {
        app.close_modal();
        return;
    };

    if edit_state.editing {
        handle_edit_input(edit_state, key);
        return;
    }

    match key {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Char('s' | 'S') => save(app).await,
        KeyCode::Up => edit_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => edit_state.next_field(),
        KeyCode::Left => edit_state.cycle(false),
        KeyCode::Right | KeyCode::Char(' ') => edit_state.cycle(true),
        KeyCode::Enter => {
            if matches!(
                edit_state.current().map(|f| &f.value),
                Some(FieldValue::Text(_))
            ) {
                edit_state.editing = true;
            } else {
                edit_state.cycle(true);
            }
        }
        _ => {}
    }
}

fn handle_edit_input(edit_state: &mut EditEntityState, key: KeyCode) {
    match key {
        KeyCode::Char(c) => edit_state.push_char(c),
        KeyCode::Backspace => edit_state.pop_char(),
        KeyCode::Enter | KeyCode::Esc => edit_state.editing = false,
        _ => {}
    }
}

async fn save(app: &mut App) {
    let Some(edit_state) = app.edit_state.clone() else {
        return;
    };

    let result = match edit_state.tab {
        Tab::Leagues => {
            app.store
                .save_league(edit_state.id, edit_state.league_draft())
                .await
        }
        Tab::Teams => app.store.save_team(edit_state.id, edit_state.team_draft()).await,
        Tab::Players => {
            app.store
                .save_player(edit_state.id, edit_state.player_draft())
                .await
        }
    };

    // failures keep the form open so the values can be fixed
    if let Ok(id) = result {
        app.close_modal();
        let view = app.view();
        if let Some(index) = view.position(Pane::Items, id) {
            app.pane = Pane::Items;
            app.set_cursor(Pane::Items, index);
        }
        app.clamp_cursors();
    }
}
