use crate::api::actions::Action;
use crate::api::client::{ApiEnvelope, Transport};
use crate::api::error::ApiError;
use crate::api::models::{
    compose_display_name, League, LeagueDraft, LeagueMapping, LeagueMappingTarget, LeagueTeam,
    NewLeagueMapping, NewPlayerMapping, NewTeamMapping, Player, PlayerDraft, PlayerMapping,
    PlayerMappingTarget, Position, RowId, RowUpdate, Sport, Team, TeamDraft, TeamMapping,
    TeamMappingTarget, TeamPlayer,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Mutex;
use tracing::debug;

/// Rows held by [`MemoryTransport`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
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
}

fn next_id<R>(rows: &[R], id: impl Fn(&R) -> i64) -> i64 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}

fn listing<R: Serialize>(rows: &[R]) -> Result<ApiEnvelope, serde_json::Error> {
    Ok(ApiEnvelope::ok(serde_json::to_value(rows)?))
}

fn inserted(id: i64, message: &str) -> ApiEnvelope {
    ApiEnvelope::ok_with_message(Some(json!({ "id": id })), message)
}

fn done(message: &str) -> ApiEnvelope {
    ApiEnvelope::ok_with_message(None, message)
}

fn params<P: DeserializeOwned>(body: &Value) -> Result<P, serde_json::Error> {
    P::deserialize(body)
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Tables {
    /// Answers one action the way the catalog endpoint does
    pub fn apply(&mut self, action: Action, body: &Value) -> Result<ApiEnvelope, serde_json::Error> {
        match action {
            Action::GetSports => {
                let mut rows: Vec<Sport> =
                    self.sports.iter().filter(|s| s.active).cloned().collect();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                listing(&rows)
            }
            Action::GetLeagues => {
                let mut rows: Vec<League> = self
                    .leagues
                    .iter()
                    .map(|league| League {
                        sport_name: self.sport_name(league.sport_id),
                        ..league.clone()
                    })
                    .collect();
                rows.sort_by(|a, b| a.fullname.cmp(&b.fullname));
                listing(&rows)
            }
            Action::GetTeams => {
                let mut rows = self.teams.clone();
                rows.sort_by(|a, b| a.full_name.cmp(&b.full_name));
                listing(&rows)
            }
            Action::GetLeagueTeams => listing(&self.league_teams),
            Action::GetPositions => {
                let mut rows = self.positions.clone();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                listing(&rows)
            }
            Action::GetPlayers => {
                let mut rows = self.players.clone();
                rows.sort_by(|a, b| a.display_name.cmp(&b.display_name));
                listing(&rows)
            }
            Action::GetTeamPlayers => listing(&self.team_players),
            Action::GetLeagueMappings => {
                let mut rows: Vec<LeagueMapping> = self
                    .league_mappings
                    .iter()
                    .map(|mapping| self.join_league_mapping(mapping))
                    .collect();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                listing(&rows)
            }
            Action::GetTeamMappings => {
                let mut rows: Vec<TeamMapping> = self
                    .team_mappings
                    .iter()
                    .map(|mapping| self.join_team_mapping(mapping))
                    .collect();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                listing(&rows)
            }
            Action::GetPlayerMappings => {
                let mut rows = self.player_mappings.clone();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                listing(&rows)
            }
            Action::AddLeague => {
                let draft: LeagueDraft = params(body)?;
                let id = next_id(&self.leagues, |l| l.id);
                self.leagues.push(league_from_draft(id, draft));
                Ok(inserted(id, "League added successfully"))
            }
            Action::UpdateLeague => {
                let update: RowUpdate<LeagueDraft> = params(body)?;
                if let Some(league) = self.leagues.iter_mut().find(|l| l.id == update.id) {
                    *league = league_from_draft(update.id, update.fields);
                }
                Ok(done("League updated successfully"))
            }
            Action::DeleteLeague => {
                let RowId { id } = params(body)?;
                self.leagues.retain(|l| l.id != id);
                self.league_teams.retain(|lt| lt.league_id != id);
                for mapping in &mut self.league_mappings {
                    if mapping.league_id == Some(id) {
                        mapping.league_id = None;
                    }
                }
                Ok(done("League deleted successfully"))
            }
            Action::AddTeam => {
                let draft: TeamDraft = params(body)?;
                let id = next_id(&self.teams, |t| t.id);
                self.teams.push(team_from_draft(id, draft));
                Ok(inserted(id, "Team added successfully"))
            }
            Action::UpdateTeam => {
                let update: RowUpdate<TeamDraft> = params(body)?;
                if let Some(team) = self.teams.iter_mut().find(|t| t.id == update.id) {
                    *team = team_from_draft(update.id, update.fields);
                }
                Ok(done("Team updated successfully"))
            }
            Action::DeleteTeam => {
                let RowId { id } = params(body)?;
                self.teams.retain(|t| t.id != id);
                self.league_teams.retain(|lt| lt.team_id != id);
                self.team_players.retain(|tp| tp.team_id != id);
                for mapping in &mut self.team_mappings {
                    if mapping.team_id == Some(id) {
                        mapping.team_id = None;
                    }
                }
                Ok(done("Team deleted successfully"))
            }
            Action::AddPlayer => {
                let draft: PlayerDraft = params(body)?;
                let id = next_id(&self.players, |p| p.id);
                self.players.push(player_from_draft(id, draft));
                Ok(inserted(id, "Player added successfully"))
            }
            Action::UpdatePlayer => {
                let update: RowUpdate<PlayerDraft> = params(body)?;
                if let Some(player) = self.players.iter_mut().find(|p| p.id == update.id) {
                    *player = player_from_draft(update.id, update.fields);
                }
                Ok(done("Player updated successfully"))
            }
            Action::DeletePlayer => {
                let RowId { id } = params(body)?;
                self.players.retain(|p| p.id != id);
                self.team_players.retain(|tp| tp.player_id != id);
                for mapping in &mut self.player_mappings {
                    if mapping.player_id == Some(id) {
                        mapping.player_id = None;
                    }
                }
                Ok(done("Player deleted successfully"))
            }
            Action::AddLeagueMapping => {
                let new: NewLeagueMapping = params(body)?;
                let id = next_id(&self.league_mappings, |m| m.id);
                self.league_mappings.push(LeagueMapping {
                    id,
                    name: new.name,
                    league_id: new.league_id,
                    fullname: None,
                    abbr: None,
                    sport_id: None,
                    sport_name: None,
                });
                Ok(inserted(id, "League mapping added successfully"))
            }
            Action::AddTeamMapping => {
                let new: NewTeamMapping = params(body)?;
                let id = next_id(&self.team_mappings, |m| m.id);
                self.team_mappings.push(TeamMapping {
                    id,
                    name: new.name,
                    league_mapping_id: new.league_mapping_id,
                    league_id: None,
                    team_id: new.team_id,
                    full_name: None,
                    abbr: None,
                    league_name: None,
                });
                Ok(inserted(id, "Team mapping added successfully"))
            }
            Action::AddPlayerMapping => {
                let new: NewPlayerMapping = params(body)?;
                let id = next_id(&self.player_mappings, |m| m.id);
                self.player_mappings.push(PlayerMapping {
                    id,
                    name: new.name,
                    team_mapping_id: new.team_mapping_id,
                    player_id: new.player_id,
                });
                Ok(inserted(id, "Player mapping added successfully"))
            }
            Action::UpdateLeagueMapping => {
                let target: LeagueMappingTarget = params(body)?;
                if let Some(mapping) = self.league_mappings.iter_mut().find(|m| m.id == target.id) {
                    mapping.league_id = target.league_id;
                }
                Ok(done("League mapping updated successfully"))
            }
            Action::UpdateTeamMapping => {
                let target: TeamMappingTarget = params(body)?;
                if let Some(mapping) = self.team_mappings.iter_mut().find(|m| m.id == target.id) {
                    mapping.team_id = target.team_id;
                }
                Ok(done("Team mapping updated successfully"))
            }
            Action::UpdatePlayerMapping => {
                let target: PlayerMappingTarget = params(body)?;
                if let Some(mapping) = self.player_mappings.iter_mut().find(|m| m.id == target.id) {
                    mapping.player_id = target.player_id;
                }
                Ok(done("Player mapping updated successfully"))
            }
            Action::DeleteLeagueMapping => {
                let RowId { id } = params(body)?;
                self.league_mappings.retain(|m| m.id != id);
                Ok(done("League mapping deleted successfully"))
            }
            Action::DeleteTeamMapping => {
                let RowId { id } = params(body)?;
                self.team_mappings.retain(|m| m.id != id);
                Ok(done("Team mapping deleted successfully"))
            }
            Action::DeletePlayerMapping => {
                let RowId { id } = params(body)?;
                self.player_mappings.retain(|m| m.id != id);
                Ok(done("Player mapping deleted successfully"))
            }
        }
    }

    fn sport_name(&self, sport_id: Option<i64>) -> Option<String> {
        let sport_id = sport_id?;
        self.sports
            .iter()
            .find(|s| s.id == sport_id)
            .map(|s| s.name.clone())
    }

    fn join_league_mapping(&self, mapping: &LeagueMapping) -> LeagueMapping {
        let league = mapping
            .league_id
            .and_then(|id| self.leagues.iter().find(|l| l.id == id));
        LeagueMapping {
            fullname: league.map(|l| l.fullname.clone()),
            abbr: league.and_then(|l| l.abbr.clone()),
            sport_id: league.and_then(|l| l.sport_id),
            sport_name: league.and_then(|l| self.sport_name(l.sport_id)),
            ..mapping.clone()
        }
    }

    fn join_team_mapping(&self, mapping: &TeamMapping) -> TeamMapping {
        let team = mapping
            .team_id
            .and_then(|id| self.teams.iter().find(|t| t.id == id));
        let league_mapping = mapping
            .league_mapping_id
            .and_then(|id| self.league_mappings.iter().find(|m| m.id == id));
        TeamMapping {
            full_name: team.and_then(|t| t.full_name.clone()),
            abbr: team.and_then(|t| t.abbr.clone()),
            league_name: league_mapping.map(|m| m.name.clone()),
            league_id: league_mapping.and_then(|m| m.league_id),
            ..mapping.clone()
        }
    }

    /// A small football and basketball catalog for offline use
    pub fn demo() -> Self {
        let sport = |id, name: &str, active| Sport {
            id,
            name: name.to_string(),
            active,
        };
        let league = |id, fullname: &str, abbr: &str, sport_id, main_league_id| League {
            id,
            name: Some(abbr.to_string()),
            fullname: fullname.to_string(),
            abbr: Some(abbr.to_string()),
            sport_id: Some(sport_id),
            main_league_id,
            active: true,
            sport_name: None,
        };
        let team = |id, full_name: &str, abbr: &str| Team {
            id,
            name: blank_to_none(full_name.to_string()),
            first_name: None,
            nickname: None,
            abbr: blank_to_none(abbr.to_string()),
            full_name: Some(full_name.to_string()),
            location_id: None,
        };
        let player = |id, first: &str, last: &str, position_id| Player {
            id,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            display_name: Some(compose_display_name(first, last)),
            position_id: Some(position_id),
            left_handed: false,
        };
        let league_mapping = |id, name: &str, league_id| LeagueMapping {
            id,
            name: name.to_string(),
            league_id,
            fullname: None,
            abbr: None,
            sport_id: None,
            sport_name: None,
        };
        let team_mapping = |id, name: &str, league_mapping_id, team_id| TeamMapping {
            id,
            name: name.to_string(),
            league_mapping_id,
            league_id: None,
            team_id,
            full_name: None,
            abbr: None,
            league_name: None,
        };
        let player_mapping = |id, name: &str, team_mapping_id, player_id| PlayerMapping {
            id,
            name: name.to_string(),
            team_mapping_id,
            player_id,
        };
        let league_team = |league_id, team_id| LeagueTeam { league_id, team_id };
        let team_player = |team_id, player_id| TeamPlayer { team_id, player_id };

        Self {
            sports: vec![
                sport(1, "Football", true),
                sport(2, "Basketball", true),
                sport(3, "Curling", false),
            ],
            leagues: vec![
                league(1, "National Football League", "NFL", 1, None),
                league(2, "American Football Conference", "AFC", 1, Some(1)),
                league(3, "National Football Conference", "NFC", 1, Some(1)),
                league(4, "National Basketball Association", "NBA", 2, None),
                league(5, "Metro Basketball League", "MBL", 2, None),
            ],
            teams: vec![
                team(1, "Detroit Lions", "DET"),
                team(2, "Kansas City Chiefs", "KC"),
                team(3, "Green Bay Packers", "GB"),
                team(4, "Boston Celtics", "BOS"),
                team(5, "Los Angeles Lakers", "LAL"),
                team(6, "", ""),
            ],
            league_teams: vec![
                league_team(3, 1),
                league_team(2, 2),
                league_team(3, 3),
                league_team(4, 4),
                league_team(4, 5),
                league_team(1, 6),
            ],
            positions: vec![
                Position {
                    id: 1,
                    name: "Quarterback".to_string(),
                },
                Position {
                    id: 2,
                    name: "Forward".to_string(),
                },
            ],
            players: vec![
                player(1, "Jared", "Goff", 1),
                player(2, "Patrick", "Mahomes", 1),
                player(3, "Jordan", "Love", 1),
                player(4, "Jayson", "Tatum", 2),
                player(5, "LeBron", "James", 2),
            ],
            team_players: vec![
                team_player(1, 1),
                team_player(2, 2),
                team_player(3, 3),
                team_player(4, 4),
                team_player(5, 5),
            ],
            league_mappings: vec![
                league_mapping(1, "NFL Football", Some(1)),
                league_mapping(2, "Natl Football League", None),
                league_mapping(3, "NBA Basketball", Some(4)),
                league_mapping(4, "Metro League", None),
            ],
            team_mappings: vec![
                team_mapping(1, "Lions", Some(1), Some(1)),
                team_mapping(2, "DET Lions", Some(1), None),
                team_mapping(3, "Chiefs", Some(1), Some(2)),
                team_mapping(4, "Celtics", Some(3), None),
            ],
            player_mappings: vec![
                player_mapping(1, "J. Goff", Some(1), Some(1)),
                player_mapping(2, "P Mahomes", Some(3), None),
            ],
        }
    }
}

fn league_from_draft(id: i64, draft: LeagueDraft) -> League {
    League {
        id,
        name: blank_to_none(draft.name),
        fullname: draft.fullname,
        abbr: blank_to_none(draft.abbr),
        sport_id: draft.sport_id,
        main_league_id: draft.main_league_id,
        active: draft.active,
        sport_name: None,
    }
}

fn team_from_draft(id: i64, draft: TeamDraft) -> Team {
    Team {
        id,
        name: blank_to_none(draft.name),
        first_name: blank_to_none(draft.first_name),
        nickname: blank_to_none(draft.nickname),
        abbr: blank_to_none(draft.abbr),
        full_name: Some(draft.full_name),
        location_id: draft.location_id,
    }
}

fn player_from_draft(id: i64, draft: PlayerDraft) -> Player {
    Player {
        id,
        first_name: blank_to_none(draft.first_name),
        last_name: blank_to_none(draft.last_name),
        display_name: blank_to_none(draft.display_name),
        position_id: draft.position_id,
        left_handed: draft.left_handed,
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: Tables,
    requests: Vec<Action>,
    pending_failure: Option<String>,
}

/// Serves the catalog action contract from process memory.
///
/// Backs `--demo` mode and stands in for the endpoint in tests. Nothing is
/// written anywhere; all rows are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new(tables: Tables) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tables,
                ..MemoryState::default()
            }),
        }
    }

    pub fn demo() -> Self {
        Self::new(Tables::demo())
    }

    /// Copy of the current rows
    pub fn snapshot(&self) -> Tables {
        self.state
            .lock()
            .map(|state| state.tables.clone())
            .unwrap_or_default()
    }

    /// Actions received so far, in arrival order
    pub fn requests(&self) -> Vec<Action> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    /// Makes the next request answer `success: false` with `message`
    pub fn fail_next(&self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.pending_failure = Some(message.to_string());
        }
    }
}

impl Transport for MemoryTransport {
    async fn post(&self, body: Value) -> Result<ApiEnvelope, ApiError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ApiError::Transport("in-memory catalog is unavailable".to_string()))?;

        let name = body
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let Some(action) = Action::parse(&name) else {
            return Ok(ApiEnvelope::failure(format!("Invalid action: {name}")));
        };

        state.requests.push(action);
        debug!(%action, "serving from memory");

        if let Some(message) = state.pending_failure.take() {
            return Ok(ApiEnvelope::failure(message));
        }

        Ok(state
            .tables
            .apply(action, &body)
            .unwrap_or_else(|e| ApiEnvelope::failure(e.to_string())))
    }
}
