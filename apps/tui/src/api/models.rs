use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const fn default_active() -> bool {
    true
}

/// Decodes a flag column that may arrive as a JSON bool or a 0/1 integer
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(text)) => {
            let text = text.trim();
            text == "1" || text.eq_ignore_ascii_case("true")
        }
        _ => false,
    })
}

/// Decodes an id column that may arrive as a JSON number or a numeric string
fn numeric_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id(&value).ok_or_else(|| D::Error::custom(format!("invalid id: {value}")))
}

/// Like `numeric_id`; null, a missing field and a blank string decode as `None`
fn optional_numeric_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => parse_id(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid id: {value}"))),
    }
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Represents a sport row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    pub name: String,
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub active: bool,
}

/// Represents a league row, joined with its sport name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub fullname: String,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub sport_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub main_league_id: Option<i64>,
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_name: Option<String>,
}

impl League {
    pub fn abbr(&self) -> &str {
        self.abbr.as_deref().unwrap_or_default()
    }

    /// Id of the league heading this league's group of related leagues
    pub fn group_id(&self) -> i64 {
        self.main_league_id.unwrap_or(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub location_id: Option<i64>,
}

impl Team {
    /// The list label, or `None` when the team must stay out of list views
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    pub fn abbr(&self) -> &str {
        self.abbr.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub position_id: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub left_handed: bool,
}

impl Player {
    /// Stored display name, falling back to "first last"
    pub fn display_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => compose_display_name(
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default(),
            ),
        }
    }
}

pub fn compose_display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueTeam {
    #[serde(deserialize_with = "numeric_id")]
    pub league_id: i64,
    #[serde(deserialize_with = "numeric_id")]
    pub team_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlayer {
    #[serde(deserialize_with = "numeric_id")]
    pub team_id: i64,
    #[serde(deserialize_with = "numeric_id")]
    pub player_id: i64,
}

/// An external league label; `league_id == None` means unmapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueMapping {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_numeric_id"
    )]
    pub sport_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_name: Option<String>,
}

/// An external team label; `team_id == None` means unmapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMapping {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_mapping_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league_name: Option<String>,
}

/// An external player label; `player_id == None` means unmapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMapping {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub team_mapping_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub player_id: Option<i64>,
}

/// Parameters for `addLeagueMapping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeagueMapping {
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_id: Option<i64>,
}

/// Parameters for `addTeamMapping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeamMapping {
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_mapping_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub team_id: Option<i64>,
}

/// Parameters for `addPlayerMapping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayerMapping {
    pub name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub team_mapping_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub player_id: Option<i64>,
}

/// Parameters for the `update*Mapping` actions; `None` unmaps the row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueMappingTarget {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub league_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMappingTarget {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMappingTarget {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub player_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RowId {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
}

/// Fields of a league sent by `addLeague` / `updateLeague`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueDraft {
    pub name: String,
    pub fullname: String,
    pub abbr: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub sport_id: Option<i64>,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub main_league_id: Option<i64>,
    pub active: bool,
}

impl LeagueDraft {
    pub fn from_league(league: &League) -> Self {
        Self {
            name: league.name.clone().unwrap_or_default(),
            fullname: league.fullname.clone(),
            abbr: league.abbr.clone().unwrap_or_default(),
            sport_id: league.sport_id,
            main_league_id: league.main_league_id,
            active: league.active,
        }
    }
}

/// Fields of a team sent by `addTeam` / `updateTeam`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamDraft {
    pub name: String,
    pub first_name: String,
    pub nickname: String,
    pub abbr: String,
    pub full_name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub location_id: Option<i64>,
}

impl TeamDraft {
    pub fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone().unwrap_or_default(),
            first_name: team.first_name.clone().unwrap_or_default(),
            nickname: team.nickname.clone().unwrap_or_default(),
            abbr: team.abbr.clone().unwrap_or_default(),
            full_name: team.full_name.clone().unwrap_or_default(),
            location_id: team.location_id,
        }
    }
}

/// Fields of a player sent by `addPlayer` / `updatePlayer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDraft {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    #[serde(default, deserialize_with = "optional_numeric_id")]
    pub position_id: Option<i64>,
    pub left_handed: bool,
}

impl PlayerDraft {
    pub fn from_player(player: &Player) -> Self {
        Self {
            first_name: player.first_name.clone().unwrap_or_default(),
            last_name: player.last_name.clone().unwrap_or_default(),
            display_name: player.display_name.clone().unwrap_or_default(),
            position_id: player.position_id,
            left_handed: player.left_handed,
        }
    }
}

/// Wraps a draft with the id of the row it replaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowUpdate<D> {
    #[serde(deserialize_with = "numeric_id")]
    pub id: i64,
    #[serde(flatten)]
    pub fields: D,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_decode_from_tinyint_and_bool() -> Result<(), serde_json::Error> {
        let sport: Sport = serde_json::from_value(json!({"id": 1, "name": "Football", "active": 1}))?;
        assert!(sport.active);

        let sport: Sport = serde_json::from_value(json!({"id": 2, "name": "Cricket", "active": 0}))?;
        assert!(!sport.active);

        let player: Player =
            serde_json::from_value(json!({"id": 3, "first_name": "A", "left_handed": true}))?;
        assert!(player.left_handed);

        let sport: Sport = serde_json::from_value(json!({"id": 4, "name": "Hockey"}))?;
        assert!(sport.active);
        Ok(())
    }

    #[test]
    fn null_target_decodes_as_unmapped() -> Result<(), serde_json::Error> {
        let mapping: LeagueMapping = serde_json::from_value(json!({
            "id": 7,
            "name": "Metro League",
            "league_id": null,
            "fullname": null
        }))?;
        assert_eq!(mapping.league_id, None);
        Ok(())
    }

    #[test]
    fn ids_decode_from_numeric_strings() -> Result<(), serde_json::Error> {
        let mapping: LeagueMapping =
            serde_json::from_value(json!({"id": "7", "name": "Metro", "league_id": "5"}))?;
        assert_eq!(mapping.id, 7);
        assert_eq!(mapping.league_id, Some(5));

        let link: LeagueTeam = serde_json::from_value(json!({"league_id": 1, "team_id": " 12 "}))?;
        assert_eq!(link, LeagueTeam { league_id: 1, team_id: 12 });

        let team: TeamMapping = serde_json::from_value(json!({
            "id": 3,
            "name": "Lions",
            "league_mapping_id": "",
            "team_id": null
        }))?;
        assert_eq!(team.league_mapping_id, None);
        assert_eq!(team.team_id, None);
        assert_eq!(team.league_id, None);

        let bad = serde_json::from_value::<Sport>(json!({"id": "seven", "name": "Golf"}));
        assert!(bad.is_err());
        Ok(())
    }

    #[test]
    fn player_display_name_falls_back_to_first_last() {
        let player = Player {
            id: 1,
            first_name: Some("Barry".to_string()),
            last_name: Some("Sanders".to_string()),
            display_name: Some("  ".to_string()),
            position_id: None,
            left_handed: false,
        };
        assert_eq!(player.display_name(), "Barry Sanders");
    }

    #[test]
    fn blank_team_name_has_no_display_name() {
        let team = Team {
            id: 1,
            name: None,
            first_name: None,
            nickname: None,
            abbr: None,
            full_name: Some(" \t".to_string()),
            location_id: None,
        };
        assert_eq!(team.display_name(), None);
    }

    #[test]
    fn row_update_flattens_fields() -> Result<(), serde_json::Error> {
        let update = RowUpdate {
            id: 9,
            fields: TeamDraft {
                full_name: "Detroit Lions".to_string(),
                ..TeamDraft::default()
            },
        };
        let value = serde_json::to_value(&update)?;
        assert_eq!(value["id"], 9);
        assert_eq!(value["full_name"], "Detroit Lions");
        Ok(())
    }
}
