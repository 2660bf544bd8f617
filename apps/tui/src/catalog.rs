use crate::api::models::{
    League, LeagueMapping, LeagueTeam, Player, PlayerMapping, Position, Sport, Team, TeamMapping,
    TeamPlayer,
};
use crate::api::{Action, ApiClient, ApiError, Transport};
use crate::domain::MappingKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// One collection of the cache, reloaded by one `get*` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSlice {
    Sports,
    Leagues,
    Teams,
    LeagueTeams,
    Positions,
    Players,
    TeamPlayers,
    LeagueMappings,
    TeamMappings,
    PlayerMappings,
}

impl CatalogSlice {
    pub const ALL: [Self; 10] = [
        Self::Sports,
        Self::Leagues,
        Self::Teams,
        Self::LeagueTeams,
        Self::Positions,
        Self::Players,
        Self::TeamPlayers,
        Self::LeagueMappings,
        Self::TeamMappings,
        Self::PlayerMappings,
    ];

    pub const fn action(self) -> Action {
        match self {
            Self::Sports => Action::GetSports,
            Self::Leagues => Action::GetLeagues,
            Self::Teams => Action::GetTeams,
            Self::LeagueTeams => Action::GetLeagueTeams,
            Self::Positions => Action::GetPositions,
            Self::Players => Action::GetPlayers,
            Self::TeamPlayers => Action::GetTeamPlayers,
            Self::LeagueMappings => Action::GetLeagueMappings,
            Self::TeamMappings => Action::GetTeamMappings,
            Self::PlayerMappings => Action::GetPlayerMappings,
        }
    }

    /// The slice holding mappings of `kind`
    pub const fn mappings(kind: MappingKind) -> Self {
        match kind {
            MappingKind::League => Self::LeagueMappings,
            MappingKind::Team => Self::TeamMappings,
            MappingKind::Player => Self::PlayerMappings,
        }
    }
}

/// Freshly fetched rows of one slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceData {
    Sports(Vec<Sport>),
    Leagues(Vec<League>),
    Teams(Vec<Team>),
    LeagueTeams(Vec<LeagueTeam>),
    Positions(Vec<Position>),
    Players(Vec<Player>),
    TeamPlayers(Vec<TeamPlayer>),
    LeagueMappings(Vec<LeagueMapping>),
    TeamMappings(Vec<TeamMapping>),
    PlayerMappings(Vec<PlayerMapping>),
}

impl SliceData {
    /// Decodes the `data` of a listing; `null` reads as no rows
    pub fn decode(slice: CatalogSlice, data: Value) -> Result<Self, serde_json::Error> {
        let data = if data.is_null() {
            Value::Array(Vec::new())
        } else {
            data
        };
        Ok(match slice {
            CatalogSlice::Sports => Self::Sports(serde_json::from_value(data)?),
            CatalogSlice::Leagues => Self::Leagues(serde_json::from_value(data)?),
            CatalogSlice::Teams => Self::Teams(serde_json::from_value(data)?),
            CatalogSlice::LeagueTeams => Self::LeagueTeams(serde_json::from_value(data)?),
            CatalogSlice::Positions => Self::Positions(serde_json::from_value(data)?),
            CatalogSlice::Players => Self::Players(serde_json::from_value(data)?),
            CatalogSlice::TeamPlayers => Self::TeamPlayers(serde_json::from_value(data)?),
            CatalogSlice::LeagueMappings => Self::LeagueMappings(serde_json::from_value(data)?),
            CatalogSlice::TeamMappings => Self::TeamMappings(serde_json::from_value(data)?),
            CatalogSlice::PlayerMappings => Self::PlayerMappings(serde_json::from_value(data)?),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sports(rows) => rows.len(),
            Self::Leagues(rows) => rows.len(),
            Self::Teams(rows) => rows.len(),
            Self::LeagueTeams(rows) => rows.len(),
            Self::Positions(rows) => rows.len(),
            Self::Players(rows) => rows.len(),
            Self::TeamPlayers(rows) => rows.len(),
            Self::LeagueMappings(rows) => rows.len(),
            Self::TeamMappings(rows) => rows.len(),
            Self::PlayerMappings(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetches one slice without touching any cache
pub async fn fetch_slice<T: Transport>(
    client: &ApiClient<T>,
    slice: CatalogSlice,
) -> Result<SliceData, ApiError> {
    let data = client.call(slice.action(), &()).await?;
    let data = SliceData::decode(slice, data.unwrap_or_default())?;
    debug!(?slice, rows = data.len(), "fetched slice");
    Ok(data)
}

/// Row counts per collection, used by headless output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogTotals {
    pub sports: usize,
    pub leagues: usize,
    pub teams: usize,
    pub players: usize,
    pub positions: usize,
    pub league_mappings: usize,
    pub team_mappings: usize,
    pub player_mappings: usize,
    pub unmapped: usize,
}

/// Last loaded snapshot of every collection and junction table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub sports: Vec<Sport>,
    pub leagues: Vec<League>,
    pub teams: Vec<Team>,
    pub league_teams: Vec<LeagueTeam>,
    pub positions: Vec<Position>,
    pub players: Vec<Player>,
    pub team_players: Vec<TeamPlayer>,
    pub league_mappings: Vec<LeagueMapping>,
    pub team_mappings: Vec<TeamMapping>,
    pub player_mappings: Vec<PlayerMapping>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Catalog {
    /// Loads every slice concurrently; nothing is returned unless all succeed
    pub async fn load<T: Transport>(client: &ApiClient<T>) -> Result<Self, ApiError> {
        let (
            sports,
            leagues,
            teams,
            league_teams,
            positions,
            players,
            team_players,
            league_mappings,
            team_mappings,
            player_mappings,
        ) = tokio::try_join!(
            client.fetch::<Sport>(Action::GetSports),
            client.fetch::<League>(Action::GetLeagues),
            client.fetch::<Team>(Action::GetTeams),
            client.fetch::<LeagueTeam>(Action::GetLeagueTeams),
            client.fetch::<Position>(Action::GetPositions),
            client.fetch::<Player>(Action::GetPlayers),
            client.fetch::<TeamPlayer>(Action::GetTeamPlayers),
            client.fetch::<LeagueMapping>(Action::GetLeagueMappings),
            client.fetch::<TeamMapping>(Action::GetTeamMappings),
            client.fetch::<PlayerMapping>(Action::GetPlayerMappings),
        )?;

        let catalog = Self {
            sports,
            leagues,
            teams,
            league_teams,
            positions,
            players,
            team_players,
            league_mappings,
            team_mappings,
            player_mappings,
            loaded_at: Some(Utc::now()),
        };
        info!(
            leagues = catalog.leagues.len(),
            teams = catalog.teams.len(),
            players = catalog.players.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Swaps one slice for freshly fetched rows
    pub fn replace(&mut self, data: SliceData) {
        match data {
            SliceData::Sports(rows) => self.sports = rows,
            SliceData::Leagues(rows) => self.leagues = rows,
            SliceData::Teams(rows) => self.teams = rows,
            SliceData::LeagueTeams(rows) => self.league_teams = rows,
            SliceData::Positions(rows) => self.positions = rows,
            SliceData::Players(rows) => self.players = rows,
            SliceData::TeamPlayers(rows) => self.team_players = rows,
            SliceData::LeagueMappings(rows) => self.league_mappings = rows,
            SliceData::TeamMappings(rows) => self.team_mappings = rows,
            SliceData::PlayerMappings(rows) => self.player_mappings = rows,
        }
        self.loaded_at = Some(Utc::now());
    }

    /// Reloads `slices`; the cache changes only if every fetch succeeds
    pub async fn refresh<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        slices: &[CatalogSlice],
    ) -> Result<(), ApiError> {
        let mut fetched = Vec::with_capacity(slices.len());
        for &slice in slices {
            fetched.push(fetch_slice(client, slice).await?);
        }
        for data in fetched {
            self.replace(data);
        }
        Ok(())
    }

    pub fn sport(&self, id: i64) -> Option<&Sport> {
        self.sports.iter().find(|s| s.id == id)
    }

    pub fn league(&self, id: i64) -> Option<&League> {
        self.leagues.iter().find(|l| l.id == id)
    }

    pub fn team(&self, id: i64) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn player(&self, id: i64) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn position(&self, id: i64) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// Whether a target entity of `kind` with this id is cached
    pub fn has_target(&self, kind: MappingKind, id: i64) -> bool {
        match kind {
            MappingKind::League => self.league(id).is_some(),
            MappingKind::Team => self.team(id).is_some(),
            MappingKind::Player => self.player(id).is_some(),
        }
    }

    /// List label of a mapping target
    pub fn target_label(&self, kind: MappingKind, id: i64) -> Option<String> {
        match kind {
            MappingKind::League => self.league(id).map(|l| l.fullname.clone()),
            MappingKind::Team => self
                .team(id)
                .and_then(|t| t.display_name().map(str::to_string)),
            MappingKind::Player => self.player(id).map(Player::display_name),
        }
    }

    /// The league itself plus every league in its group
    ///
    /// A league without `main_league_id` heads its own group, so a parent
    /// league expands to its divisions and a division to its siblings and
    /// parent. An id missing from the cache expands to itself.
    pub fn related_league_ids(&self, league_id: i64) -> HashSet<i64> {
        let mut related = HashSet::from([league_id]);
        if let Some(group) = self.league(league_id).map(League::group_id) {
            related.extend(
                self.leagues
                    .iter()
                    .filter(|l| l.group_id() == group)
                    .map(|l| l.id),
            );
        }
        related
    }

    pub fn league_ids_for_sport(&self, sport_id: i64) -> HashSet<i64> {
        self.leagues
            .iter()
            .filter(|l| l.sport_id == Some(sport_id))
            .map(|l| l.id)
            .collect()
    }

    pub fn team_ids_in_leagues(&self, league_ids: &HashSet<i64>) -> HashSet<i64> {
        self.league_teams
            .iter()
            .filter(|lt| league_ids.contains(&lt.league_id))
            .map(|lt| lt.team_id)
            .collect()
    }

    pub fn player_ids_in_teams(&self, team_ids: &HashSet<i64>) -> HashSet<i64> {
        self.team_players
            .iter()
            .filter(|tp| team_ids.contains(&tp.team_id))
            .map(|tp| tp.player_id)
            .collect()
    }

    /// Teams that may appear in list and filter views
    pub fn listed_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| t.display_name().is_some())
    }

    pub fn totals(&self) -> CatalogTotals {
        let unmapped = self
            .league_mappings
            .iter()
            .filter(|m| m.league_id.is_none())
            .count()
            + self
                .team_mappings
                .iter()
                .filter(|m| m.team_id.is_none())
                .count()
            + self
                .player_mappings
                .iter()
                .filter(|m| m.player_id.is_none())
                .count();

        CatalogTotals {
            sports: self.sports.len(),
            leagues: self.leagues.len(),
            teams: self.listed_teams().count(),
            players: self.players.len(),
            positions: self.positions.len(),
            league_mappings: self.league_mappings.len(),
            team_mappings: self.team_mappings.len(),
            player_mappings: self.player_mappings.len(),
            unmapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryTransport;

    async fn demo_catalog() -> Result<Catalog, ApiError> {
        Catalog::load(&ApiClient::new(MemoryTransport::demo())).await
    }

    #[tokio::test]
    async fn load_fills_every_slice() -> Result<(), ApiError> {
        let client = ApiClient::new(MemoryTransport::demo());
        let catalog = Catalog::load(&client).await?;

        assert_eq!(catalog.sports.len(), 2);
        assert_eq!(catalog.leagues.len(), 5);
        assert!(catalog.loaded_at.is_some());
        assert_eq!(client.transport().requests().len(), CatalogSlice::ALL.len());
        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_fails_whole_load() {
        let transport = MemoryTransport::demo();
        transport.fail_next("Database offline");
        let result = Catalog::load(&ApiClient::new(transport)).await;
        assert_eq!(result, Err(ApiError::Rejected("Database offline".to_string())));
    }

    #[tokio::test]
    async fn related_leagues_cover_parent_and_divisions() -> Result<(), ApiError> {
        let catalog = demo_catalog().await?;

        assert_eq!(catalog.related_league_ids(1), HashSet::from([1, 2, 3]));
        assert_eq!(catalog.related_league_ids(2), HashSet::from([1, 2, 3]));
        assert_eq!(catalog.related_league_ids(4), HashSet::from([4]));
        assert_eq!(catalog.related_league_ids(99), HashSet::from([99]));
        Ok(())
    }

    #[tokio::test]
    async fn junction_walk_reaches_players() -> Result<(), ApiError> {
        let catalog = demo_catalog().await?;

        let teams = catalog.team_ids_in_leagues(&HashSet::from([3]));
        assert_eq!(teams, HashSet::from([1, 3]));
        let players = catalog.player_ids_in_teams(&teams);
        assert_eq!(players, HashSet::from([1, 3]));
        Ok(())
    }

    #[tokio::test]
    async fn replace_swaps_only_one_slice() -> Result<(), ApiError> {
        let mut catalog = demo_catalog().await?;
        let teams_before = catalog.teams.clone();

        catalog.replace(SliceData::LeagueMappings(Vec::new()));
        assert!(catalog.league_mappings.is_empty());
        assert_eq!(catalog.teams, teams_before);
        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_keeps_old_rows() -> Result<(), ApiError> {
        let client = ApiClient::new(MemoryTransport::demo());
        let mut catalog = Catalog::load(&client).await?;
        let before = catalog.clone();

        client.transport().fail_next("Database offline");
        let result = catalog
            .refresh(&client, &[CatalogSlice::Teams, CatalogSlice::TeamMappings])
            .await;
        assert!(result.is_err());
        assert_eq!(catalog, before);
        Ok(())
    }

    #[tokio::test]
    async fn totals_skip_blank_teams() -> Result<(), ApiError> {
        let catalog = demo_catalog().await?;
        let totals = catalog.totals();
        assert_eq!(totals.teams, 5);
        assert_eq!(totals.unmapped, 5);
        Ok(())
    }
}
