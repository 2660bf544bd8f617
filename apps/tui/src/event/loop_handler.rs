use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sports_mapper::catalog::CatalogTotals;
use sports_mapper::engine::PaneCounts;
use sports_mapper::Tab;
use std::io::Stdout;
use tracing::{debug, warn};

use crate::app::{handle_input, App};
use crate::ui;

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.store
        .load_all()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error loading data: {e}"))?;

    let stats = build_headless_stats(app);
    if json {
        render_headless_json(&stats)?;
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nSports Mapper Stats");
    println!("===================");
    println!("Source: {}", stats.source);
    if let Some(loaded_at) = &stats.loaded_at {
        println!("Loaded at: {loaded_at}");
    }

    println!("\nCatalog:");
    println!("- sports: {}", stats.totals.sports);
    println!("- leagues: {}", stats.totals.leagues);
    println!("- teams: {}", stats.totals.teams);
    println!("- players: {}", stats.totals.players);
    println!("- positions: {}", stats.totals.positions);

    println!("\nMappings:");
    println!("- league: {}", stats.totals.league_mappings);
    println!("- team: {}", stats.totals.team_mappings);
    println!("- player: {}", stats.totals.player_mappings);
    println!("- unmapped: {}", stats.totals.unmapped);

    println!("\nPanes by Tab:");
    for tab in &stats.tabs {
        println!(
            "- {}: {} items | {} unmapped | {} mapped",
            tab.tab, tab.counts.items, tab.counts.unmapped, tab.counts.mapped
        );
    }
}

fn render_headless_json(stats: &HeadlessStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("{json}");
    Ok(())
}

fn build_headless_stats(app: &App) -> HeadlessStats {
    let catalog = app.store.catalog();
    let tabs = Tab::ALL
        .into_iter()
        .map(|tab| HeadlessTab {
            tab: tab.as_str().to_string(),
            counts: app.store.view_of(tab).counts(),
        })
        .collect();

    HeadlessStats {
        source: app.backend_label.clone(),
        loaded_at: catalog.loaded_at.map(|at| at.to_rfc3339()),
        totals: catalog.totals(),
        tabs,
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    source: String,
    loaded_at: Option<String>,
    totals: CatalogTotals,
    tabs: Vec<HeadlessTab>,
}

#[derive(serde::Serialize)]
struct HeadlessTab {
    tab: String,
    counts: PaneCounts,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    if app.store.load_all().await.is_err() {
        warn!("starting with an empty catalog");
    }
    app.clamp_cursors();

    loop {
        app.store.expire_notification();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::testing::demo_app;

    #[tokio::test]
    async fn headless_stats_cover_every_tab() -> Result<()> {
        let app = demo_app().await?;

        let stats = build_headless_stats(&app);

        assert_eq!(stats.source, "demo");
        assert!(stats.loaded_at.is_some());
        assert_eq!(stats.totals.leagues, 5);
        let tabs: Vec<_> = stats.tabs.iter().map(|t| t.tab.as_str()).collect();
        assert_eq!(tabs, vec!["leagues", "teams", "players"]);
        assert_eq!(stats.tabs[0].counts.items, 5);

        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["tabs"][1]["counts"]["items"], serde_json::json!(5));
        Ok(())
    }
}
