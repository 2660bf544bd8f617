use crate::app::form::EditEntityState;
use sports_mapper::api::Backend;
use sports_mapper::engine::{Pane, PickerOption, TabView};
use sports_mapper::{Store, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Browse,
    Search,
    Picker,
    NewMapping,
    Confirm,
    EditEntity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    League,
    Team,
}

/// Autocomplete popup for the league and team filters
#[derive(Debug, Clone)]
pub struct PickerState {
    pub kind: PickerKind,
    pub query: String,
    pub options: Vec<PickerOption>,
    pub index: usize,
}

impl PickerState {
    pub fn selected_id(&self) -> Option<i64> {
        self.options.get(self.index).map(|o| o.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Unmap(i64),
    DeleteMapping(i64),
    DeleteItem(i64),
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub message: String,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub store: Store<Backend>,
    pub backend_label: String,
    pub screen: AppScreen,
    pub show_help: bool,
    pub pane: Pane,
    /// Cursor per pane, indexed by `Pane::index`
    pub cursors: [usize; 3],
    pub mapping_input: String,
    pub picker: Option<PickerState>,
    pub confirm: Option<ConfirmState>,
    pub edit_state: Option<EditEntityState>,
}

impl App {
    pub fn new(store: Store<Backend>, backend_label: String) -> Self {
        Self {
            running: true,
            store,
            backend_label,
            screen: AppScreen::Browse,
            show_help: false,
            pane: Pane::Items,
            cursors: [0; 3],
            mapping_input: String::new(),
            picker: None,
            confirm: None,
            edit_state: None,
        }
    }

    pub fn view(&self) -> TabView {
        self.store.view()
    }

    pub const fn cursor(&self, pane: Pane) -> usize {
        self.cursors[pane.index()]
    }

    pub fn set_cursor(&mut self, pane: Pane, index: usize) {
        self.cursors[pane.index()] = index;
    }

    /// Keeps every cursor inside its pane after the lists changed
    pub fn clamp_cursors(&mut self) {
        let view = self.view();
        for pane in Pane::ALL {
            let len = view.len(pane);
            let cursor = &mut self.cursors[pane.index()];
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    /// Id of the row under the cursor of the focused pane
    pub fn focused_id(&self) -> Option<i64> {
        self.view().row_id(self.pane, self.cursor(self.pane))
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        if self.store.tab() == tab {
            return;
        }
        self.store.enter_tab(tab);
        self.pane = Pane::Items;
        self.cursors = [0; 3];
        self.follow_selection();
    }

    /// Puts the primary cursor on the selected entity of the current tab
    pub fn follow_selection(&mut self) {
        let view = self.view();
        let selected = self.store.selection().target(self.store.tab().mapping_kind());
        if let Some(index) = selected.and_then(|id| view.position(Pane::Items, id)) {
            self.set_cursor(Pane::Items, index);
        }
        self.clamp_cursors();
    }

    /// Moves the cursor onto the mapping row changed last, wherever it landed
    pub fn follow_recent(&mut self) {
        if let Some(recent) = self.store.take_recent() {
            let view = self.view();
            for pane in [Pane::Mapped, Pane::Unmapped] {
                if let Some(index) = view.position(pane, recent.id) {
                    self.set_cursor(pane, index);
                }
            }
        }
        self.clamp_cursors();
    }

    pub fn open_confirm(&mut self, action: ConfirmAction, message: impl Into<String>) {
        self.confirm = Some(ConfirmState {
            action,
            message: message.into(),
        });
        self.screen = AppScreen::Confirm;
    }

    pub fn close_modal(&mut self) {
        self.screen = AppScreen::Browse;
        self.picker = None;
        self.confirm = None;
        self.edit_state = None;
        self.mapping_input.clear();
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::demo_app;
    use super::*;

    #[tokio::test]
    async fn switching_tab_follows_carried_selection() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        app.store.select_team(3);

        app.switch_tab(Tab::Teams);

        let view = app.view();
        assert_eq!(view.row_id(Pane::Items, app.cursor(Pane::Items)), Some(3));
        assert_eq!(app.pane, Pane::Items);
        Ok(())
    }

    #[tokio::test]
    async fn clamped_cursors_stay_inside_panes() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        app.cursors = [40, 40, 40];

        app.clamp_cursors();

        let view = app.view();
        for pane in Pane::ALL {
            assert!(app.cursor(pane) < view.len(pane).max(1));
        }
        Ok(())
    }
}
