use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod browse;
mod confirm;
mod edit_entity;
mod help;
mod new_mapping;
mod picker;
mod search;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Browse => browse::handle_browse_input(app, key).await,
        AppScreen::Search => search::handle_search_input(app, key),
        AppScreen::Picker => picker::handle_picker_input(app, key),
        AppScreen::NewMapping => new_mapping::handle_new_mapping_input(app, key).await,
        AppScreen::Confirm => confirm::handle_confirm_input(app, key).await,
        AppScreen::EditEntity => edit_entity::handle_edit_entity_input(app, key).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::testing::demo_app;
    use sports_mapper::engine::Pane;
    use sports_mapper::Tab;

    async fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            dispatch_input(app, *key).await;
        }
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            dispatch_input(app, KeyCode::Char(c)).await;
        }
    }

    fn notification(app: &App) -> Option<String> {
        app.store.notification().map(|n| n.message.clone())
    }

    #[tokio::test]
    async fn u_clears_league_and_teams_filter() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('2')]).await;
        let league = app.store.selection().league.ok_or("league selected")?;
        assert_eq!(app.store.selection().teams_league, Some(league));

        press(&mut app, &[KeyCode::Char('u')]).await;
        assert_eq!(app.store.selection().league, Some(league));

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('u')]).await;
        assert_eq!(app.store.selection().league, None);
        assert_eq!(app.store.selection().teams_league, None);
        Ok(())
    }

    #[tokio::test]
    async fn number_keys_switch_tabs_and_q_quits() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;

        press(&mut app, &[KeyCode::Char('2')]).await;
        assert_eq!(app.store.tab(), Tab::Teams);
        press(&mut app, &[KeyCode::Char('3')]).await;
        assert_eq!(app.store.tab(), Tab::Players);

        press(&mut app, &[KeyCode::Char('q')]).await;
        assert!(!app.running);
        Ok(())
    }

    #[tokio::test]
    async fn select_then_map_unmapped_row() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Enter]).await;
        let team = app.store.selection().team.ok_or("team selected")?;

        press(&mut app, &[KeyCode::Right]).await;
        assert_eq!(app.pane, Pane::Unmapped);
        let mapping = app.focused_id().ok_or("unmapped row")?;
        press(&mut app, &[KeyCode::Enter]).await;

        let view = app.view();
        assert!(view.mapped_ids().contains(&mapping));
        assert_eq!(app.store.selection().team, Some(team));
        assert_eq!(
            notification(&app).as_deref(),
            Some("Mapping updated successfully")
        );
        Ok(())
    }

    #[tokio::test]
    async fn unmapping_asks_first() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        app.store.select_league(1);
        app.follow_selection();
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Enter]).await;
        assert_eq!(app.screen, AppScreen::Confirm);

        press(&mut app, &[KeyCode::Char('n')]).await;
        assert_eq!(app.screen, AppScreen::Browse);
        assert_eq!(app.view().mapped_ids(), vec![1]);

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('y')]).await;
        assert!(app.view().mapped_ids().is_empty());
        assert!(app.view().unmapped_ids().contains(&1));
        Ok(())
    }

    #[tokio::test]
    async fn search_edits_term_live() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Char('/')]).await;
        assert_eq!(app.screen, AppScreen::Search);

        type_text(&mut app, "nfx").await;
        press(&mut app, &[KeyCode::Backspace]).await;
        type_text(&mut app, "l").await;
        assert_eq!(app.store.search().term, "nfl");

        press(&mut app, &[KeyCode::Enter]).await;
        assert_eq!(app.screen, AppScreen::Browse);
        assert_eq!(app.store.search().term, "nfl");

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Esc]).await;
        assert!(app.store.search().term.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn league_picker_needs_sport() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('L')]).await;

        assert_eq!(app.screen, AppScreen::Browse);
        assert_eq!(
            notification(&app).as_deref(),
            Some("Please select a sport first")
        );
        Ok(())
    }

    #[tokio::test]
    async fn league_picker_sets_teams_filter() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        app.store.set_sport(Some(1));
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('L')]).await;
        assert_eq!(app.screen, AppScreen::Picker);

        type_text(&mut app, "nfc").await;
        press(&mut app, &[KeyCode::Enter]).await;

        assert_eq!(app.screen, AppScreen::Browse);
        assert_eq!(app.store.selection().teams_league, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn add_mapping_without_target_is_refused() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Char('a')]).await;

        assert_eq!(app.screen, AppScreen::Browse);
        assert_eq!(
            notification(&app).as_deref(),
            Some("Please select a league first")
        );
        Ok(())
    }

    #[tokio::test]
    async fn typed_mapping_is_added_to_target() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        app.store.select_league(5);
        press(&mut app, &[KeyCode::Char('a')]).await;
        assert_eq!(app.screen, AppScreen::NewMapping);

        type_text(&mut app, "Metro BL").await;
        press(&mut app, &[KeyCode::Enter]).await;

        assert_eq!(app.screen, AppScreen::Browse);
        let mapped = app.view().mapped;
        assert!(mapped.iter().any(|row| row.name.text() == "Metro BL"));
        assert_eq!(app.pane, Pane::Items);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_mapping_is_confirmed() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Right]).await;
        let mapping = app.focused_id().ok_or("unmapped row")?;

        press(&mut app, &[KeyCode::Char('x'), KeyCode::Char('y')]).await;

        assert!(!app.view().unmapped_ids().contains(&mapping));
        assert!(!app
            .store
            .catalog()
            .league_mappings
            .iter()
            .any(|m| m.id == mapping));
        Ok(())
    }

    #[tokio::test]
    async fn entity_form_adds_a_league() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::Char('n')]).await;
        assert_eq!(app.screen, AppScreen::EditEntity);

        press(&mut app, &[KeyCode::Enter]).await;
        type_text(&mut app, "Arena Football League").await;
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('s')]).await;

        assert_eq!(app.screen, AppScreen::Browse);
        assert!(app
            .store
            .catalog()
            .leagues
            .iter()
            .any(|l| l.fullname == "Arena Football League"));
        Ok(())
    }

    #[tokio::test]
    async fn help_swallows_keys_until_closed() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = demo_app().await?;
        press(&mut app, &[KeyCode::F(1), KeyCode::Char('q')]).await;
        assert!(app.running);
        assert!(app.show_help);

        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]).await;
        assert!(!app.running);
        Ok(())
    }
}
