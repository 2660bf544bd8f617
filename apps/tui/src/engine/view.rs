use crate::domain::{MappingKind, SearchCategory, Tab};
use crate::engine::highlight::Highlighted;
use serde::Serialize;

/// The three lists shown on every tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Items,
    Unmapped,
    Mapped,
}

impl Pane {
    pub const ALL: [Self; 3] = [Self::Items, Self::Unmapped, Self::Mapped];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Items),
            1 => Some(Self::Unmapped),
            2 => Some(Self::Mapped),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Items => 0,
            Self::Unmapped => 1,
            Self::Mapped => 2,
        }
    }

    pub const fn title(self, tab: Tab) -> &'static str {
        match self {
            Self::Items => tab.label(),
            Self::Unmapped => "Unmapped Names",
            Self::Mapped => "Mapped Names",
        }
    }
}

/// A canonical entity in the primary pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub id: i64,
    pub name: Highlighted,
    /// Abbreviation or position
    pub detail: Highlighted,
    pub active: bool,
}

/// A mapping row in the unmapped or mapped pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    pub id: i64,
    pub name: Highlighted,
    pub context: Option<String>,
}

/// The entity new mappings attach to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingTarget {
    pub kind: MappingKind,
    pub id: i64,
    pub label: String,
}

/// Labels of the filters narrowing the current tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterLabels {
    pub sport: Option<String>,
    pub league: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaneCounts {
    pub items: usize,
    pub unmapped: usize,
    pub mapped: usize,
}

/// Everything a renderer needs to draw one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub category: SearchCategory,
    pub term: Option<String>,
    pub items: Vec<ItemRow>,
    pub unmapped: Vec<MappingRow>,
    pub mapped: Vec<MappingRow>,
    pub target: Option<MappingTarget>,
    pub filters: FilterLabels,
}

impl TabView {
    pub fn counts(&self) -> PaneCounts {
        PaneCounts {
            items: self.items.len(),
            unmapped: self.unmapped.len(),
            mapped: self.mapped.len(),
        }
    }

    pub fn len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Items => self.items.len(),
            Pane::Unmapped => self.unmapped.len(),
            Pane::Mapped => self.mapped.len(),
        }
    }

    /// Id of the row at `index` in `pane`
    pub fn row_id(&self, pane: Pane, index: usize) -> Option<i64> {
        match pane {
            Pane::Items => self.items.get(index).map(|r| r.id),
            Pane::Unmapped => self.unmapped.get(index).map(|r| r.id),
            Pane::Mapped => self.mapped.get(index).map(|r| r.id),
        }
    }

    pub fn position(&self, pane: Pane, id: i64) -> Option<usize> {
        match pane {
            Pane::Items => self.items.iter().position(|r| r.id == id),
            Pane::Unmapped => self.unmapped.iter().position(|r| r.id == id),
            Pane::Mapped => self.mapped.iter().position(|r| r.id == id),
        }
    }

    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|r| r.id).collect()
    }

    pub fn unmapped_ids(&self) -> Vec<i64> {
        self.unmapped.iter().map(|r| r.id).collect()
    }

    pub fn mapped_ids(&self) -> Vec<i64> {
        self.mapped.iter().map(|r| r.id).collect()
    }
}
