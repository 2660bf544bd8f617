use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Leagues,
    Teams,
    Players,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Leagues, Self::Teams, Self::Players];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leagues => "leagues",
            Self::Teams => "teams",
            Self::Players => "players",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Leagues),
            1 => Some(Self::Teams),
            2 => Some(Self::Players),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Leagues => 0,
            Self::Teams => 1,
            Self::Players => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "leagues" => Some(Self::Leagues),
            "teams" => Some(Self::Teams),
            "players" => Some(Self::Players),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Leagues => "Leagues",
            Self::Teams => "Teams",
            Self::Players => "Players",
        }
    }

    /// The kind of mapping managed on this tab
    pub const fn mapping_kind(self) -> MappingKind {
        match self {
            Self::Leagues => MappingKind::League,
            Self::Teams => MappingKind::Team,
            Self::Players => MappingKind::Player,
        }
    }
}

/// Which pane the free-text search applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    #[default]
    All,
    Items,
    Unmapped,
    Mapped,
}

impl SearchCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Items => "items",
            Self::Unmapped => "unmapped",
            Self::Mapped => "mapped",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::All),
            1 => Some(Self::Items),
            2 => Some(Self::Unmapped),
            3 => Some(Self::Mapped),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Items => 1,
            Self::Unmapped => 2,
            Self::Mapped => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "items" => Some(Self::Items),
            "unmapped" => Some(Self::Unmapped),
            "mapped" => Some(Self::Mapped),
            _ => None,
        }
    }

    /// Button label, which names the primary entity of the active tab
    pub const fn label(self, tab: Tab) -> &'static str {
        match self {
            Self::All => "All",
            Self::Items => tab.label(),
            Self::Unmapped => "Unmapped",
            Self::Mapped => "Mapped",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Items,
            Self::Items => Self::Unmapped,
            Self::Unmapped => Self::Mapped,
            Self::Mapped => Self::All,
        }
    }

    pub const fn covers_items(self) -> bool {
        matches!(self, Self::All | Self::Items)
    }

    pub const fn covers_unmapped(self) -> bool {
        matches!(self, Self::All | Self::Unmapped)
    }

    pub const fn covers_mapped(self) -> bool {
        matches!(self, Self::All | Self::Mapped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    League,
    Team,
    Player,
}

impl MappingKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::League => "league",
            Self::Team => "team",
            Self::Player => "player",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "league" => Some(Self::League),
            "team" => Some(Self::Team),
            "player" => Some(Self::Player),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::League => "League",
            Self::Team => "Team",
            Self::Player => "Player",
        }
    }
}
