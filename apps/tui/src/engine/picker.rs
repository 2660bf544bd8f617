use crate::catalog::Catalog;
use crate::engine::error::EngineError;
use crate::engine::highlight::{contains, is_blank, Highlighted};
use serde::Serialize;
use std::collections::HashSet;

/// One entry of an autocomplete list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub id: i64,
    pub label: Highlighted,
    pub detail: String,
    pub selected: bool,
}

fn matches(query: &str, fields: &[&str]) -> bool {
    is_blank(query) || fields.iter().any(|field| contains(field, query.trim()))
}

fn label(text: &str, query: &str) -> Highlighted {
    Highlighted::matching(text, query.trim())
}

/// Leagues of `sport` for the Teams and Players tab league filters
pub fn league_options(
    catalog: &Catalog,
    sport: Option<i64>,
    query: &str,
    current: Option<i64>,
) -> Result<Vec<PickerOption>, EngineError> {
    let sport = sport.ok_or_else(|| EngineError::validation("Please select a sport first"))?;

    Ok(catalog
        .leagues
        .iter()
        .filter(|l| l.sport_id == Some(sport))
        .filter(|l| matches(query, &[l.fullname.as_str(), l.abbr()]))
        .map(|l| PickerOption {
            id: l.id,
            label: label(&l.fullname, query),
            detail: l.abbr().to_string(),
            selected: current == Some(l.id),
        })
        .collect())
}

/// Teams linked to the Players tab league
pub fn team_options(
    catalog: &Catalog,
    players_league: Option<i64>,
    query: &str,
    current: Option<i64>,
) -> Result<Vec<PickerOption>, EngineError> {
    let league =
        players_league.ok_or_else(|| EngineError::validation("Please select a league first"))?;
    let linked = catalog.team_ids_in_leagues(&HashSet::from([league]));

    Ok(catalog
        .listed_teams()
        .filter(|t| linked.contains(&t.id))
        .filter_map(|t| t.display_name().map(|name| (t, name)))
        .filter(|(t, name)| matches(query, &[*name, t.abbr()]))
        .map(|(t, name)| PickerOption {
            id: t.id,
            label: label(name, query),
            detail: t.abbr().to_string(),
            selected: current == Some(t.id),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::demo_catalog;

    fn ids(options: &[PickerOption]) -> Vec<i64> {
        options.iter().map(|o| o.id).collect()
    }

    #[test]
    fn league_picker_needs_a_sport() {
        let catalog = demo_catalog();
        let result = league_options(&catalog, None, "", None);
        assert_eq!(
            result,
            Err(EngineError::Validation("Please select a sport first".to_string()))
        );
    }

    #[test]
    fn league_picker_matches_name_or_abbreviation() -> Result<(), EngineError> {
        let catalog = demo_catalog();

        let all = league_options(&catalog, Some(1), "", Some(3))?;
        assert_eq!(ids(&all), vec![2, 3, 1]);
        assert!(all.iter().any(|o| o.id == 3 && o.selected));

        let by_abbr = league_options(&catalog, Some(1), "nfc", None)?;
        assert_eq!(ids(&by_abbr), vec![3]);

        let by_name = league_options(&catalog, Some(2), "metro", None)?;
        assert_eq!(ids(&by_name), vec![5]);
        assert!(by_name[0].label.has_match());
        Ok(())
    }

    #[test]
    fn team_picker_needs_a_league() {
        let catalog = demo_catalog();
        let result = team_options(&catalog, None, "", None);
        assert_eq!(
            result,
            Err(EngineError::Validation("Please select a league first".to_string()))
        );
    }

    #[test]
    fn team_picker_lists_linked_named_teams() -> Result<(), EngineError> {
        let catalog = demo_catalog();

        assert_eq!(ids(&team_options(&catalog, Some(3), "", None)?), vec![1, 3]);
        assert_eq!(ids(&team_options(&catalog, Some(3), "gb", None)?), vec![3]);
        assert!(team_options(&catalog, Some(1), "", None)?.is_empty());
        Ok(())
    }
}
