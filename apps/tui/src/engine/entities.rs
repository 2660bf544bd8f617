use crate::api::models::{compose_display_name, LeagueDraft, PlayerDraft, RowId, RowUpdate, TeamDraft};
use crate::api::{Action, ApiClient, Transport};
use crate::catalog::{Catalog, CatalogSlice};
use crate::engine::error::EngineError;
use crate::engine::selection::Selection;
use tracing::info;

const LEAGUE_SLICES: [CatalogSlice; 2] = [CatalogSlice::Leagues, CatalogSlice::LeagueMappings];
const LEAGUE_DELETE_SLICES: [CatalogSlice; 4] = [
    CatalogSlice::Leagues,
    CatalogSlice::LeagueTeams,
    CatalogSlice::LeagueMappings,
    CatalogSlice::TeamMappings,
];
const TEAM_SLICES: [CatalogSlice; 2] = [CatalogSlice::Teams, CatalogSlice::TeamMappings];
const TEAM_DELETE_SLICES: [CatalogSlice; 4] = [
    CatalogSlice::Teams,
    CatalogSlice::LeagueTeams,
    CatalogSlice::TeamPlayers,
    CatalogSlice::TeamMappings,
];
const PLAYER_SLICES: [CatalogSlice; 1] = [CatalogSlice::Players];
const PLAYER_DELETE_SLICES: [CatalogSlice; 3] = [
    CatalogSlice::Players,
    CatalogSlice::TeamPlayers,
    CatalogSlice::PlayerMappings,
];

fn check_league(draft: &LeagueDraft) -> Result<(), EngineError> {
    if draft.fullname.trim().is_empty() {
        return Err(EngineError::validation("League name is required"));
    }
    Ok(())
}

fn check_team(draft: &TeamDraft) -> Result<(), EngineError> {
    if draft.full_name.trim().is_empty() {
        return Err(EngineError::validation("Team name is required"));
    }
    Ok(())
}

/// Validates a player and fills in a missing display name
fn prepare_player(mut draft: PlayerDraft) -> Result<PlayerDraft, EngineError> {
    if draft.first_name.trim().is_empty() && draft.last_name.trim().is_empty() {
        return Err(EngineError::validation("Player name is required"));
    }
    if draft.display_name.trim().is_empty() {
        draft.display_name = compose_display_name(&draft.first_name, &draft.last_name);
    }
    Ok(draft)
}

async fn reload<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    slices: &[CatalogSlice],
) -> Result<(), EngineError> {
    catalog.refresh(client, slices).await?;
    selection.retain_valid(catalog);
    Ok(())
}

pub async fn add_league<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    draft: LeagueDraft,
) -> Result<i64, EngineError> {
    check_league(&draft)?;
    let id = client.insert(Action::AddLeague, &draft).await?;
    info!(id, fullname = %draft.fullname, "league added");
    reload(client, catalog, selection, &LEAGUE_SLICES).await?;
    Ok(id)
}

pub async fn update_league<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
    draft: LeagueDraft,
) -> Result<(), EngineError> {
    check_league(&draft)?;
    client
        .execute(Action::UpdateLeague, &RowUpdate { id, fields: draft })
        .await?;
    info!(id, "league updated");
    reload(client, catalog, selection, &LEAGUE_SLICES).await
}

pub async fn delete_league<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
) -> Result<(), EngineError> {
    client.execute(Action::DeleteLeague, &RowId { id }).await?;
    info!(id, "league deleted");
    reload(client, catalog, selection, &LEAGUE_DELETE_SLICES).await
}

pub async fn add_team<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    draft: TeamDraft,
) -> Result<i64, EngineError> {
    check_team(&draft)?;
    let id = client.insert(Action::AddTeam, &draft).await?;
    info!(id, full_name = %draft.full_name, "team added");
    reload(client, catalog, selection, &TEAM_SLICES).await?;
    Ok(id)
}

pub async fn update_team<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
    draft: TeamDraft,
) -> Result<(), EngineError> {
    check_team(&draft)?;
    client
        .execute(Action::UpdateTeam, &RowUpdate { id, fields: draft })
        .await?;
    info!(id, "team updated");
    reload(client, catalog, selection, &TEAM_SLICES).await
}

pub async fn delete_team<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
) -> Result<(), EngineError> {
    client.execute(Action::DeleteTeam, &RowId { id }).await?;
    info!(id, "team deleted");
    reload(client, catalog, selection, &TEAM_DELETE_SLICES).await
}

pub async fn add_player<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    draft: PlayerDraft,
) -> Result<i64, EngineError> {
    let draft = prepare_player(draft)?;
    let id = client.insert(Action::AddPlayer, &draft).await?;
    info!(id, display_name = %draft.display_name, "player added");
    reload(client, catalog, selection, &PLAYER_SLICES).await?;
    Ok(id)
}

pub async fn update_player<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
    draft: PlayerDraft,
) -> Result<(), EngineError> {
    let draft = prepare_player(draft)?;
    client
        .execute(Action::UpdatePlayer, &RowUpdate { id, fields: draft })
        .await?;
    info!(id, "player updated");
    reload(client, catalog, selection, &PLAYER_SLICES).await
}

pub async fn delete_player<T: Transport>(
    client: &ApiClient<T>,
    catalog: &mut Catalog,
    selection: &mut Selection,
    id: i64,
) -> Result<(), EngineError> {
    client.execute(Action::DeletePlayer, &RowId { id }).await?;
    info!(id, "player deleted");
    reload(client, catalog, selection, &PLAYER_DELETE_SLICES).await
}
