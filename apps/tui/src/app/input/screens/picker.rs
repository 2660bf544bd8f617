use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, PickerKind};
use crossterm::event::KeyCode;
use sports_mapper::Tab;

pub fn handle_picker_input(app: &mut App, key: KeyCode) {
    let Some(picker) = app.picker.as_mut() else {
        app.close_modal();
        return;
    };

    match key {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Up => picker.index = wrap_decrement(picker.index, picker.options.len()),
        KeyCode::Down => picker.index = wrap_increment(picker.index, picker.options.len()),
        KeyCode::Enter => {
            let (kind, chosen) = (picker.kind, picker.selected_id());
            if let Some(id) = chosen {
                apply_choice(app, kind, id);
                app.close_modal();
            }
        }
        KeyCode::Delete => {
            let kind = picker.kind;
            clear_choice(app, kind);
            app.close_modal();
        }
        KeyCode::Backspace => {
            picker.query.pop();
            refresh_options(app);
        }
        KeyCode::Char(c) => {
            picker.query.push(c);
            refresh_options(app);
        }
        _ => {}
    }
}

fn refresh_options(app: &mut App) {
    let Some((kind, query)) = app.picker.as_ref().map(|p| (p.kind, p.query.clone())) else {
        return;
    };
    let options = match kind {
        PickerKind::League => app.store.league_options(&query),
        PickerKind::Team => app.store.team_options(&query),
    };
    match options {
        Ok(options) => {
            if let Some(picker) = app.picker.as_mut() {
                picker.index = picker.index.min(options.len().saturating_sub(1));
                picker.options = options;
            }
        }
        Err(_) => app.close_modal(),
    }
}

fn apply_choice(app: &mut App, kind: PickerKind, id: i64) {
    match (kind, app.store.tab()) {
        (PickerKind::League, Tab::Teams) => app.store.select_teams_league(id),
        (PickerKind::League, Tab::Players) => app.store.select_players_league(id),
        (PickerKind::Team, Tab::Players) => app.store.select_players_team(id),
        _ => {}
    }
    app.cursors = [0; 3];
}

fn clear_choice(app: &mut App, kind: PickerKind) {
    match (kind, app.store.tab()) {
        (PickerKind::League, Tab::Teams) => app.store.clear_teams_league(),
        (PickerKind::League, Tab::Players) => app.store.clear_players_league(),
        (PickerKind::Team, Tab::Players) => app.store.clear_players_team(),
        _ => {}
    }
    app.cursors = [0; 3];
}
