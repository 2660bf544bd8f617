use crate::api::models::{LeagueDraft, PlayerDraft, TeamDraft};
use crate::api::{ApiClient, Transport};
use crate::catalog::Catalog;
use crate::domain::{MappingKind, SearchCategory, Tab};
use crate::engine::entities;
use crate::engine::error::EngineError;
use crate::engine::filter::{build_view, SearchState};
use crate::engine::notification::Notification;
use crate::engine::picker::{self, PickerOption};
use crate::engine::reconciler::{self, MappingContext};
use crate::engine::selection::Selection;
use crate::engine::view::TabView;
use chrono::Utc;
use tracing::{info, warn};

/// The mapping row touched by the last successful mapping change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentMapping {
    pub kind: MappingKind,
    pub id: i64,
}

/// Owns the cache and all view state; every change goes through `&mut self`
#[derive(Debug)]
pub struct Store<T> {
    client: ApiClient<T>,
    catalog: Catalog,
    selection: Selection,
    search: SearchState,
    tab: Tab,
    notification: Option<Notification>,
    recent: Option<RecentMapping>,
}

fn missing_target(kind: MappingKind) -> EngineError {
    EngineError::validation(format!("Please select a {} first", kind.as_str()))
}

impl<T: Transport> Store<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self {
            client,
            catalog: Catalog::default(),
            selection: Selection::default(),
            search: SearchState::default(),
            tab: Tab::Leagues,
            notification: None,
            recent: None,
        }
    }

    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Drops the notification once it has been shown long enough
    pub fn expire_notification(&mut self) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(Utc::now()))
        {
            self.notification = None;
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            warn!(message = %notification.message, "notification");
        } else {
            info!(message = %notification.message, "notification");
        }
        self.notification = Some(notification);
    }

    pub fn take_recent(&mut self) -> Option<RecentMapping> {
        self.recent.take()
    }

    /// Notifies the outcome of an operation and hands the result back
    fn report<R>(
        &mut self,
        result: Result<R, EngineError>,
        success: &str,
        failure_prefix: &str,
    ) -> Result<R, EngineError> {
        match &result {
            Ok(_) => self.notify(Notification::success(success)),
            Err(EngineError::Validation(message)) => {
                self.notify(Notification::error(message.clone()));
            }
            Err(error) => self.notify(Notification::error(format!("{failure_prefix}{error}"))),
        }
        result
    }

    /// Replaces the whole cache; on failure the previous cache stays
    pub async fn load_all(&mut self) -> Result<(), EngineError> {
        match Catalog::load(&self.client).await {
            Ok(catalog) => {
                self.catalog = catalog;
                self.selection.retain_valid(&self.catalog);
                Ok(())
            }
            Err(error) => {
                self.notify(Notification::error(format!("Error loading data: {error}")));
                Err(error.into())
            }
        }
    }

    pub async fn reload(&mut self) -> Result<(), EngineError> {
        self.load_all().await?;
        self.notify(Notification::success("Data reloaded"));
        Ok(())
    }

    pub fn view(&self) -> TabView {
        self.view_of(self.tab)
    }

    pub fn view_of(&self, tab: Tab) -> TabView {
        build_view(&self.catalog, &self.selection, &self.search, tab)
    }

    /// Switches tab, carrying selections over and clearing the search term
    pub fn enter_tab(&mut self, tab: Tab) {
        self.search.clear_term();
        match tab {
            Tab::Leagues => {}
            Tab::Teams => self.selection.carry_over_to_teams_tab(),
            Tab::Players => self.selection.carry_over_to_players_tab(),
        }
        self.tab = tab;
    }

    pub fn select_league(&mut self, id: i64) -> Option<i64> {
        self.search.clear_term();
        self.selection.select_league(&self.catalog, id)
    }

    pub fn select_team(&mut self, id: i64) -> Option<i64> {
        self.search.clear_term();
        self.selection.select_team(&self.catalog, id)
    }

    pub fn select_player(&mut self, id: i64) -> Option<i64> {
        self.search.clear_term();
        self.selection.select_player(&self.catalog, id)
    }

    /// Toggles the entity of the current tab
    pub fn select_item(&mut self, id: i64) -> Option<i64> {
        match self.tab {
            Tab::Leagues => self.select_league(id),
            Tab::Teams => self.select_team(id),
            Tab::Players => self.select_player(id),
        }
    }

    pub fn set_sport(&mut self, sport: Option<i64>) {
        self.selection.set_sport(&self.catalog, sport);
    }

    /// Steps through no sport, then each cached sport in order
    pub fn cycle_sport(&mut self) -> Option<i64> {
        let next = match self.selection.sport {
            None => self.catalog.sports.first().map(|s| s.id),
            Some(current) => self
                .catalog
                .sports
                .iter()
                .skip_while(|s| s.id != current)
                .nth(1)
                .map(|s| s.id),
        };
        self.set_sport(next);
        self.selection.sport
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.term = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear_term();
    }

    pub fn cycle_category(&mut self) -> SearchCategory {
        self.search.category = self.search.category.next();
        self.search.category
    }

    pub fn select_teams_league(&mut self, id: i64) {
        self.search.clear_term();
        self.selection.select_teams_league(&self.catalog, id);
    }

    pub fn clear_teams_league(&mut self) {
        self.search.clear_term();
        self.selection.clear_teams_league();
    }

    pub fn clear_league(&mut self) {
        self.search.clear_term();
        self.selection.clear_league();
    }

    pub fn select_players_league(&mut self, id: i64) {
        self.search.clear_term();
        self.selection.select_players_league(&self.catalog, id);
    }

    pub fn select_players_team(&mut self, id: i64) {
        self.search.clear_term();
        self.selection.select_players_team(&self.catalog, id);
    }

    pub fn clear_players_league(&mut self) {
        self.search.clear_term();
        self.selection.clear_players_league();
    }

    pub fn clear_players_team(&mut self) {
        self.search.clear_term();
        self.selection.clear_players_team();
    }

    /// Resets selections, sport and search term; the cache is kept
    pub fn clear_all(&mut self) {
        self.selection.clear_all();
        self.search.clear_term();
    }

    /// League filter options for the current tab
    pub fn league_options(&mut self, query: &str) -> Result<Vec<PickerOption>, EngineError> {
        let current = match self.tab {
            Tab::Players => self.selection.players_league,
            Tab::Leagues | Tab::Teams => self.selection.teams_league,
        };
        let result = picker::league_options(&self.catalog, self.selection.sport, query, current);
        self.report_validation(result)
    }

    /// Team filter options for the Players tab
    pub fn team_options(&mut self, query: &str) -> Result<Vec<PickerOption>, EngineError> {
        let result = picker::team_options(
            &self.catalog,
            self.selection.players_league,
            query,
            self.selection.players_team,
        );
        self.report_validation(result)
    }

    fn report_validation<R>(&mut self, result: Result<R, EngineError>) -> Result<R, EngineError> {
        if let Err(error) = &result {
            self.notify(Notification::error(error.to_string()));
        }
        result
    }

    pub fn mapping_context(&self) -> Option<MappingContext> {
        reconciler::mapping_context(&self.catalog, &self.selection, self.tab.mapping_kind())
    }

    /// Adds a mapping for the selected entity of the current tab
    pub async fn add_mapping(&mut self, name: &str) -> Result<i64, EngineError> {
        let kind = self.tab.mapping_kind();
        let result = match self.mapping_context() {
            Some(context) => {
                reconciler::add_mapping(
                    &self.client,
                    &mut self.catalog,
                    &mut self.selection,
                    context,
                    name,
                )
                .await
            }
            None => Err(missing_target(kind)),
        };
        if let Ok(id) = result {
            self.recent = Some(RecentMapping { kind, id });
        }
        self.report(result, "Mapping added successfully", "Error: ")
    }

    /// Maps an unmapped row of the current tab to the selected entity
    pub async fn map_to_target(&mut self, mapping_id: i64) -> Result<(), EngineError> {
        let kind = self.tab.mapping_kind();
        let result = match self.selection.target(kind) {
            Some(target) => {
                reconciler::map_existing(
                    &self.client,
                    &mut self.catalog,
                    &mut self.selection,
                    kind,
                    mapping_id,
                    target,
                )
                .await
            }
            None => Err(missing_target(kind)),
        };
        if result.is_ok() {
            self.recent = Some(RecentMapping {
                kind,
                id: mapping_id,
            });
        }
        self.report(
            result,
            "Mapping updated successfully",
            "Failed to update mapping: ",
        )
    }

    pub async fn unmap(&mut self, mapping_id: i64) -> Result<(), EngineError> {
        let kind = self.tab.mapping_kind();
        let result = reconciler::unmap(
            &self.client,
            &mut self.catalog,
            &mut self.selection,
            kind,
            mapping_id,
        )
        .await;
        if result.is_ok() {
            self.recent = Some(RecentMapping {
                kind,
                id: mapping_id,
            });
        }
        self.report(result, "Mapping unmapped successfully", "Error: ")
    }

    pub async fn delete_mapping(&mut self, mapping_id: i64) -> Result<(), EngineError> {
        let result = reconciler::delete_mapping(
            &self.client,
            &mut self.catalog,
            &mut self.selection,
            self.tab.mapping_kind(),
            mapping_id,
        )
        .await;
        self.report(result, "Mapping deleted", "Error: ")
    }

    /// Adds a league when `id` is `None`, otherwise updates it
    pub async fn save_league(
        &mut self,
        id: Option<i64>,
        draft: LeagueDraft,
    ) -> Result<i64, EngineError> {
        let (client, catalog, selection) = (&self.client, &mut self.catalog, &mut self.selection);
        let (result, success) = match id {
            None => (
                entities::add_league(client, catalog, selection, draft).await,
                "League added successfully",
            ),
            Some(id) => (
                entities::update_league(client, catalog, selection, id, draft)
                    .await
                    .map(|()| id),
                "League updated successfully",
            ),
        };
        self.report(result, success, "Error: ")
    }

    pub async fn save_team(&mut self, id: Option<i64>, draft: TeamDraft) -> Result<i64, EngineError> {
        let (client, catalog, selection) = (&self.client, &mut self.catalog, &mut self.selection);
        let (result, success) = match id {
            None => (
                entities::add_team(client, catalog, selection, draft).await,
                "Team added successfully",
            ),
            Some(id) => (
                entities::update_team(client, catalog, selection, id, draft)
                    .await
                    .map(|()| id),
                "Team updated successfully",
            ),
        };
        self.report(result, success, "Error: ")
    }

    pub async fn save_player(
        &mut self,
        id: Option<i64>,
        draft: PlayerDraft,
    ) -> Result<i64, EngineError> {
        let (client, catalog, selection) = (&self.client, &mut self.catalog, &mut self.selection);
        let (result, success) = match id {
            None => (
                entities::add_player(client, catalog, selection, draft).await,
                "Player added successfully",
            ),
            Some(id) => (
                entities::update_player(client, catalog, selection, id, draft)
                    .await
                    .map(|()| id),
                "Player updated successfully",
            ),
        };
        self.report(result, success, "Error: ")
    }

    /// Deletes the entity `id` of the current tab
    pub async fn delete_item(&mut self, id: i64) -> Result<(), EngineError> {
        let (client, catalog, selection) = (&self.client, &mut self.catalog, &mut self.selection);
        let (result, success) = match self.tab {
            Tab::Leagues => (
                entities::delete_league(client, catalog, selection, id).await,
                "League deleted",
            ),
            Tab::Teams => (
                entities::delete_team(client, catalog, selection, id).await,
                "Team deleted",
            ),
            Tab::Players => (
                entities::delete_player(client, catalog, selection, id).await,
                "Player deleted",
            ),
        };
        self.report(result, success, "Error: ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MemoryTransport};
    use crate::engine::notification::NotificationKind;

    async fn demo_store() -> Result<Store<MemoryTransport>, EngineError> {
        let mut store = Store::new(ApiClient::new(MemoryTransport::demo()));
        store.load_all().await?;
        Ok(store)
    }

    fn message(store: &Store<MemoryTransport>) -> Option<(&str, NotificationKind)> {
        store
            .notification()
            .map(|n| (n.message.as_str(), n.kind))
    }

    #[tokio::test]
    async fn failed_initial_load_keeps_empty_cache() {
        let transport = MemoryTransport::demo();
        transport.fail_next("Database offline");
        let mut store = Store::new(ApiClient::new(transport));

        let result = store.load_all().await;
        assert!(result.is_err());
        assert_eq!(store.catalog(), &Catalog::default());
        assert_eq!(
            message(&store),
            Some(("Error loading data: Database offline", NotificationKind::Error))
        );
    }

    #[tokio::test]
    async fn teams_tab_picks_up_selected_league() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.select_league(5);

        store.enter_tab(Tab::Teams);
        assert_eq!(store.selection().teams_league, Some(5));
        assert_eq!(store.view().filters.league.as_deref(), Some("Metro Basketball League"));
        Ok(())
    }

    #[tokio::test]
    async fn selecting_and_switching_clear_search_term() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.set_search_term("nfl");
        store.select_league(1);
        assert!(store.search().term.is_empty());

        store.set_search_term("lions");
        store.enter_tab(Tab::Teams);
        assert!(store.search().term.is_empty());
        assert_eq!(store.tab(), Tab::Teams);
        Ok(())
    }

    #[tokio::test]
    async fn clearing_league_also_clears_teams_filter() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.select_league(5);
        store.enter_tab(Tab::Teams);
        assert_eq!(store.selection().teams_league, Some(5));

        store.enter_tab(Tab::Leagues);
        store.set_search_term("metro");
        store.clear_league();

        assert_eq!(store.selection().league, None);
        assert_eq!(store.selection().teams_league, None);
        assert!(store.search().term.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn clear_all_keeps_cache() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        let catalog = store.catalog().clone();
        store.cycle_sport();
        store.select_league(1);
        store.enter_tab(Tab::Teams);
        store.select_team(1);
        store.set_search_term("det");

        store.clear_all();
        assert!(store.selection().is_empty());
        assert!(store.search().term.is_empty());
        assert_eq!(store.catalog(), &catalog);
        Ok(())
    }

    #[tokio::test]
    async fn sport_cycle_wraps_to_none() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        assert_eq!(store.cycle_sport(), Some(2));
        assert_eq!(store.cycle_sport(), Some(1));
        assert_eq!(store.cycle_sport(), None);
        Ok(())
    }

    #[tokio::test]
    async fn mapping_round_trip_notifies() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.select_league(1);

        store.unmap(1).await?;
        assert_eq!(
            message(&store),
            Some(("Mapping unmapped successfully", NotificationKind::Success))
        );
        assert!(store.view().unmapped_ids().contains(&1));

        store.map_to_target(1).await?;
        assert_eq!(
            message(&store),
            Some(("Mapping updated successfully", NotificationKind::Success))
        );
        assert_eq!(store.view().mapped_ids(), vec![1]);
        assert_eq!(
            store.take_recent(),
            Some(RecentMapping {
                kind: MappingKind::League,
                id: 1
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn mapping_without_target_is_refused() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        let sent = store.client().transport().requests().len();

        let result = store.map_to_target(2).await;
        assert_eq!(result, Err(EngineError::validation("Please select a league first")));
        assert_eq!(
            message(&store),
            Some(("Please select a league first", NotificationKind::Error))
        );
        assert_eq!(store.client().transport().requests().len(), sent);
        Ok(())
    }

    #[tokio::test]
    async fn reload_reports_success_and_keeps_cache_on_failure() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.select_league(1);

        store.reload().await?;
        assert_eq!(message(&store), Some(("Data reloaded", NotificationKind::Success)));
        assert_eq!(store.selection().league, Some(1));

        let before = store.catalog().clone();
        store.client().transport().fail_next("Database offline");
        assert!(store.reload().await.is_err());
        assert_eq!(store.catalog(), &before);
        assert_eq!(
            message(&store),
            Some(("Error loading data: Database offline", NotificationKind::Error))
        );
        Ok(())
    }

    #[tokio::test]
    async fn failed_map_uses_update_prefix() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.enter_tab(Tab::Teams);
        store.select_team(1);
        let before = store.catalog().clone();

        store.client().transport().fail_next("Duplicate mapping");
        let result = store.map_to_target(2).await;

        assert_eq!(
            result,
            Err(EngineError::Api(ApiError::Rejected("Duplicate mapping".to_string())))
        );
        assert_eq!(
            message(&store),
            Some((
                "Failed to update mapping: Duplicate mapping",
                NotificationKind::Error
            ))
        );
        assert_eq!(store.catalog(), &before);
        assert_eq!(store.selection().team, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn add_mapping_on_players_tab() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.enter_tab(Tab::Players);
        store.select_players_league(3);
        store.select_players_team(1);
        store.select_player(1);

        let id = store.add_mapping("Goff, Jared").await?;
        assert_eq!(
            message(&store),
            Some(("Mapping added successfully", NotificationKind::Success))
        );
        assert!(store.view().mapped_ids().contains(&id));

        let stored = store
            .client()
            .transport()
            .snapshot()
            .player_mappings
            .into_iter()
            .find(|m| m.id == id);
        assert_eq!(stored.and_then(|m| m.team_mapping_id), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn pickers_report_missing_filters() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.enter_tab(Tab::Teams);

        assert!(store.league_options("").is_err());
        assert_eq!(
            message(&store),
            Some(("Please select a sport first", NotificationKind::Error))
        );

        store.set_sport(Some(1));
        assert_eq!(store.league_options("").map(|o| o.len()), Ok(3));

        store.enter_tab(Tab::Players);
        assert!(store.team_options("").is_err());
        assert_eq!(
            message(&store),
            Some(("Please select a league first", NotificationKind::Error))
        );
        Ok(())
    }

    #[tokio::test]
    async fn deleting_selected_player_clears_it() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        store.enter_tab(Tab::Players);
        store.select_player(2);

        store.delete_item(2).await?;
        assert_eq!(store.selection().player, None);
        assert_eq!(
            message(&store),
            Some(("Player deleted", NotificationKind::Success))
        );
        Ok(())
    }

    #[tokio::test]
    async fn saving_league_without_id_adds_it() -> Result<(), EngineError> {
        let mut store = demo_store().await?;
        let draft = LeagueDraft {
            fullname: "Women's National Basketball Association".to_string(),
            abbr: "WNBA".to_string(),
            sport_id: Some(2),
            active: true,
            ..LeagueDraft::default()
        };

        let id = store.save_league(None, draft).await?;
        store.set_sport(Some(2));
        assert!(store.view().item_ids().contains(&id));
        Ok(())
    }
}
