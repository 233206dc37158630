use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use careconnect::infrastructure::{
    AppConfig, CareConnectClient, CliArgs, KeyringSessionStorage, NominatimClient, StorageManager,
};
use careconnect::presentation::{App, Route};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

struct Startup {
    app: App,
    cli_token: Option<String>,
    route: Route,
    mouse: bool,
}

fn create_app() -> Result<Startup> {
    dotenvy::dotenv().ok();

    let mut args = CliArgs::parse();
    let route = args.route.take().map(|path| Route::parse(&path)).unwrap_or_default();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(
        version = careconnect::VERSION,
        base_url = %config.base_url,
        "Starting CareConnect CMS"
    );

    let api = Arc::new(CareConnectClient::with_base_url(config.base_url.as_str())?);
    let geocoder = Arc::new(NominatimClient::new(
        config.geocoder.base_url.as_str(),
        config.geocoder.contact_email.clone(),
    )?);
    let session_storage = Arc::new(KeyringSessionStorage::new());

    let app = App::new(
        api.clone(),
        api.clone(),
        api,
        geocoder,
        session_storage,
        &config,
    );

    Ok(Startup {
        app,
        cli_token: config.token.clone(),
        route,
        mouse: config.mouse,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let Startup {
        app,
        cli_token,
        route,
        mouse,
    } = create_app()?;

    let mut terminal = ratatui::init();
    if mouse {
        execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal, cli_token, route).await;

    if mouse {
        execute!(stdout(), DisableMouseCapture)?;
    }
    ratatui::restore();

    result
}
