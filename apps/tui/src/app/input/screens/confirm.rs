use crate::app::state::{App, ConfirmAction};
use crossterm::event::KeyCode;

pub async fn handle_confirm_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
            let Some(action) = app.confirm.as_ref().map(|c| c.action) else {
                app.close_modal();
                return;
            };
            app.close_modal();
            run_action(app, action).await;
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => app.close_modal(),
        _ => {}
    }
}

async fn run_action(app: &mut App, action: ConfirmAction) {
    let done = match action {
        ConfirmAction::Unmap(id) => app.store.unmap(id).await.is_ok(),
        ConfirmAction::DeleteMapping(id) => app.store.delete_mapping(id).await.is_ok(),
        ConfirmAction::DeleteItem(id) => app.store.delete_item(id).await.is_ok(),
    };
    if done {
        app.follow_recent();
    }
}
