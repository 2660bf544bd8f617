use crate::app::form::EditEntityState;
use crate::app::input::helpers::{step_down, wrap_decrement, wrap_increment, PAGE_STEP};
use crate::app::state::{App, AppScreen, ConfirmAction, PickerKind, PickerState};
use crossterm::event::KeyCode;
use sports_mapper::engine::{Notification, Pane};
use sports_mapper::Tab;

pub async fn handle_browse_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                app.switch_tab(tab);
            }
        }
        KeyCode::Left => {
            app.pane = Pane::from_index(wrap_decrement(app.pane.index(), Pane::ALL.len()))
                .unwrap_or(Pane::Items);
        }
        KeyCode::Right | KeyCode::Tab => {
            app.pane = Pane::from_index(wrap_increment(app.pane.index(), Pane::ALL.len()))
                .unwrap_or(Pane::Items);
        }
        KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Home
        | KeyCode::End => move_cursor(app, key),
        KeyCode::Enter => activate(app).await,
        KeyCode::Char('/') => app.screen = AppScreen::Search,
        KeyCode::Char('f') => {
            app.store.cycle_category();
            app.clamp_cursors();
        }
        KeyCode::Char('s') => {
            app.store.cycle_sport();
            app.clamp_cursors();
        }
        KeyCode::Char('L') => open_picker(app, PickerKind::League),
        KeyCode::Char('T') => open_picker(app, PickerKind::Team),
        KeyCode::Char('a') => open_new_mapping(app),
        KeyCode::Char('x') => ask_delete_mapping(app),
        KeyCode::Char('n') => open_editor(app, None),
        KeyCode::Char('e') => {
            if app.pane == Pane::Items {
                let id = app.focused_id();
                if id.is_some() {
                    open_editor(app, id);
                }
            }
        }
        KeyCode::Char('D') => ask_delete_item(app),
        KeyCode::Char('u') if app.store.tab() == Tab::Leagues => {
            app.store.clear_league();
            app.clamp_cursors();
        }
        KeyCode::Char('c') => {
            app.store.clear_all();
            app.cursors = [0; 3];
        }
        KeyCode::Char('r') => {
            // the store has already reported the failure
            if app.store.reload().await.is_ok() {
                app.clamp_cursors();
            }
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, key: KeyCode) {
    let pane = app.pane;
    let total_rows = app.view().len(pane);
    let cursor = app.cursor(pane);

    let next = match key {
        KeyCode::Up => cursor.saturating_sub(1),
        KeyCode::Down => step_down(cursor, total_rows, 1),
        KeyCode::PageUp => cursor.saturating_sub(PAGE_STEP),
        KeyCode::PageDown => step_down(cursor, total_rows, PAGE_STEP),
        KeyCode::End => total_rows.saturating_sub(1),
        _ => 0,
    };
    app.set_cursor(pane, next);
}

/// Enter: toggle an entity, map an unmapped name, or ask before unmapping
async fn activate(app: &mut App) {
    let Some(id) = app.focused_id() else {
        return;
    };

    match app.pane {
        Pane::Items => {
            app.store.select_item(id);
            let view = app.view();
            if let Some(index) = view.position(Pane::Items, id) {
                app.set_cursor(Pane::Items, index);
            }
            app.clamp_cursors();
        }
        Pane::Unmapped => {
            if app.store.map_to_target(id).await.is_ok() {
                app.follow_recent();
            }
        }
        Pane::Mapped => {
            let name = mapping_name(app, Pane::Mapped, id);
            app.open_confirm(ConfirmAction::Unmap(id), format!("Unmap \"{name}\"?"));
        }
    }
}

fn mapping_name(app: &App, pane: Pane, id: i64) -> String {
    let view = app.view();
    let rows = match pane {
        Pane::Unmapped => &view.unmapped,
        Pane::Items | Pane::Mapped => &view.mapped,
    };
    rows.iter()
        .find(|row| row.id == id)
        .map(|row| row.name.text())
        .unwrap_or_default()
}

fn open_picker(app: &mut App, kind: PickerKind) {
    let tab = app.store.tab();
    let allowed = match kind {
        PickerKind::League => tab != Tab::Leagues,
        PickerKind::Team => tab == Tab::Players,
    };
    if !allowed {
        return;
    }

    let options = match kind {
        PickerKind::League => app.store.league_options(""),
        PickerKind::Team => app.store.team_options(""),
    };
    if let Ok(options) = options {
        let index = options.iter().position(|o| o.selected).unwrap_or(0);
        app.picker = Some(PickerState {
            kind,
            query: String::new(),
            options,
            index,
        });
        app.screen = AppScreen::Picker;
    }
}

fn open_new_mapping(app: &mut App) {
    if app.store.mapping_context().is_none() {
        let kind = app.store.tab().mapping_kind();
        app.store.notify(Notification::error(format!(
            "Please select a {} first",
            kind.as_str()
        )));
        return;
    }
    app.mapping_input.clear();
    app.screen = AppScreen::NewMapping;
}

fn ask_delete_mapping(app: &mut App) {
    if app.pane == Pane::Items {
        return;
    }
    if let Some(id) = app.focused_id() {
        let name = mapping_name(app, app.pane, id);
        app.open_confirm(
            ConfirmAction::DeleteMapping(id),
            format!("Delete mapping \"{name}\"?"),
        );
    }
}

fn open_editor(app: &mut App, id: Option<i64>) {
    if let Some(state) = EditEntityState::open(app.store.catalog(), app.store.tab(), id) {
        app.edit_state = Some(state);
        app.screen = AppScreen::EditEntity;
    }
}

fn ask_delete_item(app: &mut App) {
    if app.pane != Pane::Items {
        return;
    }
    let Some(id) = app.focused_id() else {
        return;
    };
    let view = app.view();
    let name = view
        .items
        .iter()
        .find(|row| row.id == id)
        .map(|row| row.name.text())
        .unwrap_or_default();
    let noun = app.store.tab().mapping_kind().as_str();
    app.open_confirm(
        ConfirmAction::DeleteItem(id),
        format!("Delete {noun} \"{name}\"?"),
    );
}
