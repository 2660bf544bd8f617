use crate::api::models::{
    LeagueMappingTarget, NewLeagueMapping, NewPlayerMapping, NewTeamMapping, PlayerMappingTarget,
    RowId, TeamMappingTarget,
};
use crate::api::{Action, ApiClient, Transport};
use crate::catalog::{Catalog, CatalogSlice};
use crate::domain::MappingKind;
use crate::engine::error::EngineError;
use crate::engine::selection::Selection;
use serde::Serialize;
use tracing::info;

/// Where a new mapping attaches: its target entity and optional parent mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingContext {
    pub kind: MappingKind,
    pub target_id: i64,
    /// League mapping for team mappings, team mapping for player mappings
    pub parent_context_id: Option<i64>,
}

/// Builds the context of a new mapping from the current selection
pub fn mapping_context(
    catalog: &Catalog,
    selection: &Selection,
    kind: MappingKind,
) -> Option<MappingContext> {
    let target_id = selection.target(kind)?;
    let parent_context_id = match kind {
        MappingKind::League => None,
        MappingKind::Team => selection.teams_league.and_then(|league| {
            catalog
                .league_mappings
                .iter()
                .find(|m| m.league_id == Some(league))
                .map(|m| m.id)
        }),
        MappingKind::Player => selection.players_team.and_then(|team| {
            catalog
                .team_mappings
                .iter()
                .find(|m| m.team_id == Some(team))
                .map(|m| m.id)
        }),
    };

    Some(MappingContext {
        kind,
        target_id,
        parent_context_id,
    })
}

const fn update_action(kind: MappingKind) -> Action {
    match kind {
        MappingKind::League => Action::UpdateLeagueMapping,
        MappingKind::Team => Action::UpdateTeamMapping,
        MappingKind::Player => Action::UpdatePlayerMapping,
    }
}

const fn delete_action(kind: MappingKind) -> Action {
    match kind {
        MappingKind::League => Action::DeleteLeagueMapping,
        MappingKind::Team => Action::DeleteTeamMapping,
        MappingKind::Player => Action::DeletePlayerMapping,
    }
}

async fn set_target<T: Transport>(
    client: &ApiClient<T>,
    kind: MappingKind,
    id: i64,
    target: Option<i64>,
) -> Result<(), EngineError> {
    let action = update_action(kind);
    match kind {
        MappingKind::League => {
            client
                .execute(action, &LeagueMappingTarget { id, league_id: target })
                .await?;
        }
        MappingKind::Team => {
            client
                .execute(action, &TeamMappingTarget { id, team_id: target })
                .await?;
        }
        MappingKind::Player => {
            client
                .execute(action, &PlayerMappingTarget { id, player_id: target })
                .await?;
        }
    }
    Ok(())
}

async fn reload<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    kind: MappingKind,
) -> Result<(), EngineError> {
    catalog
        .refresh(client, &[CatalogSlice::mappings(kind)])
        .await?;
    selection.retain_valid(catalog);
    Ok(())
}

/// Creates a mapping already pointing at the context's target
pub async fn add_mapping<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    context: MappingContext,
    name: &str,
) -> Result<i64, EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::validation("Please enter a mapped name"));
    }

    let action = match context.kind {
        MappingKind::League => Action::AddLeagueMapping,
        MappingKind::Team => Action::AddTeamMapping,
        MappingKind::Player => Action::AddPlayerMapping,
    };
    let id = match context.kind {
        MappingKind::League => {
            client
                .insert(
                    action,
                    &NewLeagueMapping {
                        name: name.to_string(),
                        league_id: Some(context.target_id),
                    },
                )
                .await?
        }
        MappingKind::Team => {
            client
                .insert(
                    action,
                    &NewTeamMapping {
                        name: name.to_string(),
                        league_mapping_id: context.parent_context_id,
                        team_id: Some(context.target_id),
                    },
                )
                .await?
        }
        MappingKind::Player => {
            client
                .insert(
                    action,
                    &NewPlayerMapping {
                        name: name.to_string(),
                        team_mapping_id: context.parent_context_id,
                        player_id: Some(context.target_id),
                    },
                )
                .await?
        }
    };

    info!(kind = context.kind.as_str(), id, target = context.target_id, "mapping added");
    reload(client, catalog, selection, context.kind).await?;
    Ok(id)
}

/// Points an existing mapping at `target_id` and selects that target
pub async fn map_existing<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    kind: MappingKind,
    mapping_id: i64,
    target_id: i64,
) -> Result<(), EngineError> {
    set_target(client, kind, mapping_id, Some(target_id)).await?;
    info!(kind = kind.as_str(), mapping_id, target_id, "mapping mapped");
    reload(client, catalog, selection, kind).await?;
    selection.focus(catalog, kind, target_id);
    Ok(())
}

/// Clears a mapping's target, keeping the row
pub async fn unmap<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    kind: MappingKind,
    mapping_id: i64,
) -> Result<(), EngineError> {
    set_target(client, kind, mapping_id, None).await?;
    info!(kind = kind.as_str(), mapping_id, "mapping unmapped");
    reload(client, catalog, selection, kind).await
}

/// Removes a mapping row; the selection stays as it was
pub async fn delete_mapping<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    kind: MappingKind,
    mapping_id: i64,
) -> Result<(), EngineError> {
    client
        .execute(delete_action(kind), &RowId { id: mapping_id })
        .await?;
    info!(kind = kind.as_str(), mapping_id, "mapping deleted");
    reload(client, catalog, selection, kind).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MemoryTransport};
    use crate::domain::Tab;
    use crate::engine::filter::{build_view, SearchState};

    type Fixture = (ApiClient<MemoryTransport>, Catalog, Selection);

    async fn fixture() -> Result<Fixture, ApiError> {
        let client = ApiClient::new(MemoryTransport::demo());
        let catalog = Catalog::load(&client).await?;
        Ok((client, catalog, Selection::default()))
    }

    fn mapped_ids(catalog: &Catalog, selection: &Selection, tab: Tab) -> Vec<i64> {
        build_view(catalog, selection, &SearchState::default(), tab).mapped_ids()
    }

    fn unmapped_ids(catalog: &Catalog, selection: &Selection, tab: Tab) -> Vec<i64> {
        build_view(catalog, selection, &SearchState::default(), tab).unmapped_ids()
    }

    #[tokio::test]
    async fn added_league_mapping_points_at_target() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        selection.select_league(&catalog, 5);
        let context = mapping_context(&catalog, &selection, MappingKind::League)
            .ok_or("league context")?;

        let id = add_mapping(&client, &mut catalog, &mut selection, context, "Metro League").await?;

        let added: Vec<_> = catalog
            .league_mappings
            .iter()
            .filter(|m| m.league_id == Some(5) && m.name == "Metro League")
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, id);
        assert!(mapped_ids(&catalog, &selection, Tab::Leagues).contains(&id));
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_any_request() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        let sent = client.transport().requests().len();
        let context = MappingContext {
            kind: MappingKind::Team,
            target_id: 1,
            parent_context_id: None,
        };

        let result = add_mapping(&client, &mut catalog, &mut selection, context, "   ").await;
        assert_eq!(
            result,
            Err(EngineError::Validation("Please enter a mapped name".to_string()))
        );
        assert_eq!(client.transport().requests().len(), sent);
        Ok(())
    }

    #[tokio::test]
    async fn team_context_uses_league_mapping_of_filter() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        selection.select_teams_league(&catalog, 1);
        selection.select_team(&catalog, 3);

        let context = mapping_context(&catalog, &selection, MappingKind::Team)
            .ok_or("team context")?;
        assert_eq!(context.target_id, 3);
        assert_eq!(context.parent_context_id, Some(1));

        let id = add_mapping(&client, &mut catalog, &mut selection, context, "Packers").await?;
        let row = client
            .transport()
            .snapshot()
            .team_mappings
            .into_iter()
            .find(|m| m.id == id)
            .ok_or("stored row")?;
        assert_eq!(row.league_mapping_id, Some(1));
        assert_eq!(row.team_id, Some(3));
        Ok(())
    }

    #[test]
    fn no_target_means_no_context() {
        let catalog = Catalog::default();
        let selection = Selection::default();
        assert_eq!(mapping_context(&catalog, &selection, MappingKind::Player), None);
    }

    #[tokio::test]
    async fn map_existing_moves_row_and_selects_target() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        assert!(unmapped_ids(&catalog, &selection, Tab::Teams).contains(&2));

        map_existing(&client, &mut catalog, &mut selection, MappingKind::Team, 2, 1).await?;

        assert_eq!(selection.team, Some(1));
        assert!(!unmapped_ids(&catalog, &selection, Tab::Teams).contains(&2));
        assert!(mapped_ids(&catalog, &selection, Tab::Teams).contains(&2));
        Ok(())
    }

    #[tokio::test]
    async fn unmap_then_map_restores_row() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        selection.select_league(&catalog, 1);
        assert_eq!(mapped_ids(&catalog, &selection, Tab::Leagues), vec![1]);

        unmap(&client, &mut catalog, &mut selection, MappingKind::League, 1).await?;
        assert!(mapped_ids(&catalog, &selection, Tab::Leagues).is_empty());
        assert!(unmapped_ids(&catalog, &selection, Tab::Leagues).contains(&1));
        assert_eq!(selection.league, Some(1));

        map_existing(&client, &mut catalog, &mut selection, MappingKind::League, 1, 1).await?;
        assert_eq!(mapped_ids(&catalog, &selection, Tab::Leagues), vec![1]);
        Ok(())
    }

    #[tokio::test]
    async fn delete_keeps_selection() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        selection.select_player(&catalog, 1);

        delete_mapping(&client, &mut catalog, &mut selection, MappingKind::Player, 1).await?;

        assert_eq!(selection.player, Some(1));
        assert!(mapped_ids(&catalog, &selection, Tab::Players).is_empty());
        assert!(catalog.player_mappings.iter().all(|m| m.id != 1));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_call_leaves_state_alone() -> Result<(), Box<dyn std::error::Error>> {
        let (client, mut catalog, mut selection) = fixture().await?;
        selection.select_league(&catalog, 1);
        let catalog_before = catalog.clone();
        let selection_before = selection;

        client.transport().fail_next("Mapping is locked");
        let result = unmap(&client, &mut catalog, &mut selection, MappingKind::League, 1).await;

        assert_eq!(
            result,
            Err(EngineError::Api(ApiError::Rejected("Mapping is locked".to_string())))
        );
        assert_eq!(catalog, catalog_before);
        assert_eq!(selection, selection_before);
        Ok(())
    }
}
