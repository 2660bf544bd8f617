mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use sports_mapper::api::{ApiClient, Backend, HttpTransport, MemoryTransport};
use sports_mapper::config::{init_app_config, AppConfig};
use sports_mapper::Store;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Stdout belongs to the UI unless we only print stats
    let headless = args.headless || args.json || !is_terminal();
    init_tracing(&config, headless)?;

    let backend = if args.demo {
        Backend::Memory(MemoryTransport::demo())
    } else {
        Backend::Http(HttpTransport::new(config.api_url.clone())?)
    };
    let backend_label = backend.describe();
    info!(backend = %backend_label, headless, "starting sports mapper");

    let mut app = App::new(Store::new(ApiClient::new(backend)), backend_label);

    if headless {
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

fn init_tracing(config: &AppConfig, headless: bool) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if headless {
        builder.with_writer(std::io::stderr).init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }

    Ok(())
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
