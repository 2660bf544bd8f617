use crate::catalog::Catalog;
use crate::domain::MappingKind;
use serde::Serialize;
use tracing::debug;

/// What is currently selected in each tab context.
///
/// Every id either resolves to a cached row or is `None`: an id missing
/// from the cache is stored as `None` rather than reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub sport: Option<i64>,
    /// Leagues tab
    pub league: Option<i64>,
    /// Teams tab
    pub team: Option<i64>,
    /// Players tab
    pub player: Option<i64>,
    /// Teams tab league filter
    pub teams_league: Option<i64>,
    /// Players tab league filter
    pub players_league: Option<i64>,
    /// Players tab team filter
    pub players_team: Option<i64>,
}

fn toggled(current: Option<i64>, id: i64, exists: bool) -> Option<i64> {
    if !exists || current == Some(id) {
        None
    } else {
        Some(id)
    }
}

fn known(id: Option<i64>, exists: impl Fn(i64) -> bool) -> Option<i64> {
    id.filter(|&id| exists(id))
}

impl Selection {
    pub fn select_league(&mut self, catalog: &Catalog, id: i64) -> Option<i64> {
        self.league = toggled(self.league, id, catalog.league(id).is_some());
        debug!(league = ?self.league, "league selection");
        self.league
    }

    pub fn select_team(&mut self, catalog: &Catalog, id: i64) -> Option<i64> {
        self.team = toggled(self.team, id, catalog.team(id).is_some());
        debug!(team = ?self.team, "team selection");
        self.team
    }

    pub fn select_player(&mut self, catalog: &Catalog, id: i64) -> Option<i64> {
        self.player = toggled(self.player, id, catalog.player(id).is_some());
        debug!(player = ?self.player, "player selection");
        self.player
    }

    /// Sets the target of `kind` without toggling
    pub fn focus(&mut self, catalog: &Catalog, kind: MappingKind, id: i64) {
        let id = Some(id).filter(|&id| catalog.has_target(kind, id));
        match kind {
            MappingKind::League => self.league = id,
            MappingKind::Team => self.team = id,
            MappingKind::Player => self.player = id,
        }
    }

    /// The selected entity mappings of `kind` attach to
    pub const fn target(&self, kind: MappingKind) -> Option<i64> {
        match kind {
            MappingKind::League => self.league,
            MappingKind::Team => self.team,
            MappingKind::Player => self.player,
        }
    }

    /// Overwrites the Teams tab league filter with the selected league
    pub fn carry_over_to_teams_tab(&mut self) {
        if let Some(league) = self.league {
            self.teams_league = Some(league);
        }
    }

    pub fn carry_over_to_players_tab(&mut self) {
        if let Some(league) = self.teams_league {
            self.players_league = Some(league);
        }
        if let Some(team) = self.team {
            self.players_team = Some(team);
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn set_sport(&mut self, catalog: &Catalog, sport: Option<i64>) {
        self.sport = known(sport, |id| catalog.sport(id).is_some());
    }

    pub fn select_teams_league(&mut self, catalog: &Catalog, id: i64) {
        self.teams_league = known(Some(id), |id| catalog.league(id).is_some());
    }

    /// Clears the Teams tab league filter together with the Leagues tab selection
    pub fn clear_teams_league(&mut self) {
        self.teams_league = None;
        self.league = None;
    }

    /// Clears the Leagues tab selection together with the Teams tab league filter
    pub fn clear_league(&mut self) {
        self.league = None;
        self.teams_league = None;
    }

    /// A new Players tab league invalidates the team filter
    pub fn select_players_league(&mut self, catalog: &Catalog, id: i64) {
        self.players_league = known(Some(id), |id| catalog.league(id).is_some());
        self.players_team = None;
    }

    pub fn select_players_team(&mut self, catalog: &Catalog, id: i64) {
        self.players_team = known(Some(id), |id| catalog.team(id).is_some());
    }

    pub fn clear_players_league(&mut self) {
        self.players_league = None;
        self.players_team = None;
    }

    pub fn clear_players_team(&mut self) {
        self.players_team = None;
    }

    /// Drops every id that no longer resolves against `catalog`
    pub fn retain_valid(&mut self, catalog: &Catalog) {
        let before = *self;
        self.sport = known(self.sport, |id| catalog.sport(id).is_some());
        self.league = known(self.league, |id| catalog.league(id).is_some());
        self.team = known(self.team, |id| catalog.team(id).is_some());
        self.player = known(self.player, |id| catalog.player(id).is_some());
        self.teams_league = known(self.teams_league, |id| catalog.league(id).is_some());
        self.players_league = known(self.players_league, |id| catalog.league(id).is_some());
        self.players_team = known(self.players_team, |id| catalog.team(id).is_some());
        if before != *self {
            debug!(?before, after = ?self, "dropped stale selections");
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.sport.is_none()
            && self.league.is_none()
            && self.team.is_none()
            && self.player.is_none()
            && self.teams_league.is_none()
            && self.players_league.is_none()
            && self.players_team.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::demo_catalog;

    #[test]
    fn selecting_twice_clears_then_restores() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();

        assert_eq!(selection.select_league(&catalog, 5), Some(5));
        assert_eq!(selection.select_league(&catalog, 5), None);
        assert_eq!(selection.select_league(&catalog, 5), Some(5));
        assert_eq!(selection.select_league(&catalog, 4), Some(4));
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_team(&catalog, 1);

        assert_eq!(selection.select_team(&catalog, 404), None);
        assert_eq!(selection.select_player(&catalog, 404), None);
    }

    #[test]
    fn teams_tab_entry_overwrites_league_filter() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_teams_league(&catalog, 4);
        selection.select_league(&catalog, 5);

        selection.carry_over_to_teams_tab();
        assert_eq!(selection.teams_league, Some(5));
    }

    #[test]
    fn teams_tab_entry_without_league_keeps_filter() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_teams_league(&catalog, 4);

        selection.carry_over_to_teams_tab();
        assert_eq!(selection.teams_league, Some(4));
    }

    #[test]
    fn players_tab_entry_copies_league_and_team() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_teams_league(&catalog, 3);
        selection.select_team(&catalog, 1);

        selection.carry_over_to_players_tab();
        assert_eq!(selection.players_league, Some(3));
        assert_eq!(selection.players_team, Some(1));
    }

    #[test]
    fn new_players_league_resets_team_filter() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_players_league(&catalog, 3);
        selection.select_players_team(&catalog, 1);

        selection.select_players_league(&catalog, 4);
        assert_eq!(selection.players_league, Some(4));
        assert_eq!(selection.players_team, None);
    }

    #[test]
    fn focus_never_toggles() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.focus(&catalog, MappingKind::Team, 2);
        selection.focus(&catalog, MappingKind::Team, 2);
        assert_eq!(selection.team, Some(2));
        assert_eq!(selection.target(MappingKind::Team), Some(2));
    }

    #[test]
    fn retain_valid_drops_deleted_rows() {
        let mut catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.select_league(&catalog, 5);
        selection.select_teams_league(&catalog, 5);
        selection.select_team(&catalog, 2);

        catalog.leagues.retain(|l| l.id != 5);
        selection.retain_valid(&catalog);

        assert_eq!(selection.league, None);
        assert_eq!(selection.teams_league, None);
        assert_eq!(selection.team, Some(2));
    }

    #[test]
    fn clear_all_resets_everything() {
        let catalog = demo_catalog();
        let mut selection = Selection::default();
        selection.set_sport(&catalog, Some(1));
        selection.select_league(&catalog, 1);
        selection.select_player(&catalog, 1);

        selection.clear_all();
        assert!(selection.is_empty());
    }
}
