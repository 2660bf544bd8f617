use crate::api::models::{LeagueMapping, Player, PlayerMapping, TeamMapping};
use crate::catalog::Catalog;
use crate::domain::{MappingKind, SearchCategory, Tab};
use crate::engine::highlight::{contains, is_blank, Highlighted};
use crate::engine::selection::Selection;
use crate::engine::view::{FilterLabels, ItemRow, MappingRow, MappingTarget, TabView};
use serde::Serialize;
use std::collections::HashSet;

/// Free-text search and the pane it applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub term: String,
    pub category: SearchCategory,
}

impl SearchState {
    /// The term, or `None` when it is blank
    pub fn active_term(&self) -> Option<&str> {
        Some(self.term.as_str()).filter(|term| !is_blank(term))
    }

    pub fn clear_term(&mut self) {
        self.term.clear();
    }
}

/// Terms gated per pane by the category filter
#[derive(Debug, Clone, Copy)]
struct PaneTerms<'a> {
    items: Option<&'a str>,
    unmapped: Option<&'a str>,
    mapped: Option<&'a str>,
}

impl<'a> PaneTerms<'a> {
    fn new(search: &'a SearchState) -> Self {
        let term = search.active_term();
        let category = search.category;
        Self {
            items: term.filter(|_| category.covers_items()),
            unmapped: term.filter(|_| category.covers_unmapped()),
            mapped: term.filter(|_| category.covers_mapped()),
        }
    }
}

fn mark(text: &str, term: Option<&str>) -> Highlighted {
    term.map_or_else(
        || Highlighted::plain(text),
        |term| Highlighted::matching(text, term),
    )
}

fn passes(term: Option<&str>, fields: &[&str]) -> bool {
    term.map_or(true, |term| fields.iter().any(|field| contains(field, term)))
}

/// Derives the visible panes of `tab`; identical inputs give identical output
pub fn build_view(
    catalog: &Catalog,
    selection: &Selection,
    search: &SearchState,
    tab: Tab,
) -> TabView {
    let (items, unmapped, mapped) = match tab {
        Tab::Leagues => leagues_panes(catalog, selection, search),
        Tab::Teams => teams_panes(catalog, selection, search),
        Tab::Players => players_panes(catalog, selection, search),
    };

    let kind = tab.mapping_kind();
    let target = selection.target(kind).and_then(|id| {
        catalog
            .target_label(kind, id)
            .map(|label| MappingTarget { kind, id, label })
    });

    TabView {
        tab,
        category: search.category,
        term: search.active_term().map(str::to_string),
        items,
        unmapped,
        mapped,
        target,
        filters: filter_labels(catalog, selection, tab),
    }
}

type Panes = (Vec<ItemRow>, Vec<MappingRow>, Vec<MappingRow>);

fn league_mapping_row(mapping: &LeagueMapping, term: Option<&str>) -> MappingRow {
    MappingRow {
        id: mapping.id,
        name: mark(&mapping.name, term),
        context: mapping.sport_name.clone(),
    }
}

fn team_mapping_row(mapping: &TeamMapping, term: Option<&str>) -> MappingRow {
    MappingRow {
        id: mapping.id,
        name: mark(&mapping.name, term),
        context: mapping.league_name.clone(),
    }
}

fn player_mapping_row(mapping: &PlayerMapping, term: Option<&str>) -> MappingRow {
    MappingRow {
        id: mapping.id,
        name: mark(&mapping.name, term),
        context: None,
    }
}

fn leagues_panes(catalog: &Catalog, selection: &Selection, search: &SearchState) -> Panes {
    let terms = PaneTerms::new(search);

    let items = catalog
        .leagues
        .iter()
        .filter(|l| selection.sport.map_or(true, |sport| l.sport_id == Some(sport)))
        .filter(|l| passes(terms.items, &[l.fullname.as_str(), l.abbr()]))
        .map(|l| ItemRow {
            id: l.id,
            name: mark(&l.fullname, terms.items),
            detail: mark(l.abbr(), terms.items),
            active: selection.league == Some(l.id),
        })
        .collect();

    let unmapped = catalog
        .league_mappings
        .iter()
        .filter(|m| m.league_id.is_none())
        .filter(|m| passes(terms.unmapped, &[m.name.as_str()]))
        .map(|m| league_mapping_row(m, terms.unmapped))
        .collect();

    let mapped = selection.league.map_or_else(Vec::new, |league| {
        catalog
            .league_mappings
            .iter()
            .filter(|m| m.league_id == Some(league))
            .filter(|m| passes(terms.mapped, &[m.name.as_str()]))
            .map(|m| league_mapping_row(m, terms.mapped))
            .collect()
    });

    (items, unmapped, mapped)
}

fn teams_panes(catalog: &Catalog, selection: &Selection, search: &SearchState) -> Panes {
    let terms = PaneTerms::new(search);

    let allowed: Option<HashSet<i64>> = if let Some(league) = selection.teams_league {
        Some(catalog.team_ids_in_leagues(&catalog.related_league_ids(league)))
    } else {
        selection
            .sport
            .map(|sport| catalog.team_ids_in_leagues(&catalog.league_ids_for_sport(sport)))
    };

    let items = catalog
        .listed_teams()
        .filter(|t| allowed.as_ref().map_or(true, |ids| ids.contains(&t.id)))
        .filter_map(|t| t.display_name().map(|name| (t, name)))
        .filter(|(t, name)| passes(terms.items, &[*name, t.abbr()]))
        .map(|(t, name)| ItemRow {
            id: t.id,
            name: mark(name, terms.items),
            detail: mark(t.abbr(), terms.items),
            active: selection.team == Some(t.id),
        })
        .collect();

    let unmapped = catalog
        .team_mappings
        .iter()
        .filter(|m| m.team_id.is_none())
        .filter(|m| passes(terms.unmapped, &[m.name.as_str()]))
        .map(|m| team_mapping_row(m, terms.unmapped))
        .collect();

    let mapped = selection.team.map_or_else(Vec::new, |team| {
        catalog
            .team_mappings
            .iter()
            .filter(|m| m.team_id == Some(team))
            .filter(|m| passes(terms.mapped, &[m.name.as_str()]))
            .map(|m| team_mapping_row(m, terms.mapped))
            .collect()
    });

    (items, unmapped, mapped)
}

fn player_matches(player: &Player, term: Option<&str>) -> bool {
    passes(
        term,
        &[
            player.display_name().as_str(),
            player.first_name.as_deref().unwrap_or_default(),
            player.last_name.as_deref().unwrap_or_default(),
        ],
    )
}

fn players_panes(catalog: &Catalog, selection: &Selection, search: &SearchState) -> Panes {
    let terms = PaneTerms::new(search);
    // the primary list is narrowed by any search term, whatever the category
    let term = search.active_term();

    let allowed: Option<HashSet<i64>> = if let Some(team) = selection.players_team {
        Some(catalog.player_ids_in_teams(&HashSet::from([team])))
    } else {
        selection.players_league.map(|league| {
            catalog.player_ids_in_teams(&catalog.team_ids_in_leagues(&HashSet::from([league])))
        })
    };

    let items = catalog
        .players
        .iter()
        .filter(|p| allowed.as_ref().map_or(true, |ids| ids.contains(&p.id)))
        .filter(|p| player_matches(p, term))
        .map(|p| {
            let position = p
                .position_id
                .and_then(|id| catalog.position(id))
                .map(|position| position.name.as_str())
                .unwrap_or_default();
            ItemRow {
                id: p.id,
                name: mark(&p.display_name(), terms.items),
                detail: Highlighted::plain(position),
                active: selection.player == Some(p.id),
            }
        })
        .collect();

    let mapped = selection.player.map_or_else(Vec::new, |player| {
        catalog
            .player_mappings
            .iter()
            .filter(|m| m.player_id == Some(player))
            .map(|m| player_mapping_row(m, terms.mapped))
            .collect()
    });

    (items, Vec::new(), mapped)
}

fn filter_labels(catalog: &Catalog, selection: &Selection, tab: Tab) -> FilterLabels {
    let sport = selection
        .sport
        .and_then(|id| catalog.sport(id))
        .map(|s| s.name.clone());
    let league_label = |id: Option<i64>| {
        id.and_then(|id| catalog.target_label(MappingKind::League, id))
    };

    match tab {
        Tab::Leagues => FilterLabels {
            sport,
            league: league_label(selection.league),
            team: None,
        },
        Tab::Teams => FilterLabels {
            sport,
            league: league_label(selection.teams_league),
            team: None,
        },
        Tab::Players => FilterLabels {
            sport,
            league: league_label(selection.players_league),
            team: selection
                .players_team
                .and_then(|id| catalog.target_label(MappingKind::Team, id)),
        },
    }
}
