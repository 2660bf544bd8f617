use std::fmt;

/// Every action name understood by the catalog endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetSports,
    GetLeagues,
    GetTeams,
    GetLeagueTeams,
    GetPositions,
    GetPlayers,
    GetTeamPlayers,
    GetLeagueMappings,
    GetTeamMappings,
    GetPlayerMappings,
    AddLeague,
    UpdateLeague,
    DeleteLeague,
    AddTeam,
    UpdateTeam,
    DeleteTeam,
    AddPlayer,
    UpdatePlayer,
    DeletePlayer,
    AddLeagueMapping,
    AddTeamMapping,
    AddPlayerMapping,
    UpdateLeagueMapping,
    UpdateTeamMapping,
    UpdatePlayerMapping,
    DeleteLeagueMapping,
    DeleteTeamMapping,
    DeletePlayerMapping,
}

impl Action {
    pub const ALL: [Self; 28] = [
        Self::GetSports,
        Self::GetLeagues,
        Self::GetTeams,
        Self::GetLeagueTeams,
        Self::GetPositions,
        Self::GetPlayers,
        Self::GetTeamPlayers,
        Self::GetLeagueMappings,
        Self::GetTeamMappings,
        Self::GetPlayerMappings,
        Self::AddLeague,
        Self::UpdateLeague,
        Self::DeleteLeague,
        Self::AddTeam,
        Self::UpdateTeam,
        Self::DeleteTeam,
        Self::AddPlayer,
        Self::UpdatePlayer,
        Self::DeletePlayer,
        Self::AddLeagueMapping,
        Self::AddTeamMapping,
        Self::AddPlayerMapping,
        Self::UpdateLeagueMapping,
        Self::UpdateTeamMapping,
        Self::UpdatePlayerMapping,
        Self::DeleteLeagueMapping,
        Self::DeleteTeamMapping,
        Self::DeletePlayerMapping,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetSports => "getSports",
            Self::GetLeagues => "getLeagues",
            Self::GetTeams => "getTeams",
            Self::GetLeagueTeams => "getLeagueTeams",
            Self::GetPositions => "getPositions",
            Self::GetPlayers => "getPlayers",
            Self::GetTeamPlayers => "getTeamPlayers",
            Self::GetLeagueMappings => "getLeagueMappings",
            Self::GetTeamMappings => "getTeamMappings",
            Self::GetPlayerMappings => "getPlayerMappings",
            Self::AddLeague => "addLeague",
            Self::UpdateLeague => "updateLeague",
            Self::DeleteLeague => "deleteLeague",
            Self::AddTeam => "addTeam",
            Self::UpdateTeam => "updateTeam",
            Self::DeleteTeam => "deleteTeam",
            Self::AddPlayer => "addPlayer",
            Self::UpdatePlayer => "updatePlayer",
            Self::DeletePlayer => "deletePlayer",
            Self::AddLeagueMapping => "addLeagueMapping",
            Self::AddTeamMapping => "addTeamMapping",
            Self::AddPlayerMapping => "addPlayerMapping",
            Self::UpdateLeagueMapping => "updateLeagueMapping",
            Self::UpdateTeamMapping => "updateTeamMapping",
            Self::UpdatePlayerMapping => "updatePlayerMapping",
            Self::DeleteLeagueMapping => "deleteLeagueMapping",
            Self::DeleteTeamMapping => "deleteTeamMapping",
            Self::DeletePlayerMapping => "deletePlayerMapping",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }

    /// Read actions have no side effects on the store
    pub const fn is_read(self) -> bool {
        matches!(
            self,
            Self::GetSports
                | Self::GetLeagues
                | Self::GetTeams
                | Self::GetLeagueTeams
                | Self::GetPositions
                | Self::GetPlayers
                | Self::GetTeamPlayers
                | Self::GetLeagueMappings
                | Self::GetTeamMappings
                | Self::GetPlayerMappings
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
