// UI module for sports_mapper
// Draws the tab screen and whichever popup is open

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::browse::render_browse(app, f);

    match app.screen {
        AppScreen::Browse | AppScreen::Search => {}
        AppScreen::Picker => screens::picker::render_picker(app, f),
        AppScreen::NewMapping => screens::prompt::render_new_mapping(app, f),
        AppScreen::Confirm => screens::prompt::render_confirm(app, f),
        AppScreen::EditEntity => screens::edit_entity::render_edit_entity(app, f),
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}
