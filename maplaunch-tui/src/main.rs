//! Terminal UI for maplaunch that lists installed map apps and opens markers or directions in them.

mod app;
mod config;
mod input;
mod ui;

use std::{env, io, path::Path, path::PathBuf, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context as _, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use maplaunch_core::{
    catalogue::ProviderCatalogue, error::LaunchError, ports::PlatformLauncher,
    service::MapLauncherService,
};
use maplaunch_platform_android as android;
use maplaunch_platform_ios as ios;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{CONFIG_ENV, Config, LoggingConfig, PlatformConfig, PlatformKind};
use crate::input::Action;

fn main() -> Result<()> {
    let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = Config::load(explicit.as_deref()).context("Failed to load configuration")?;

    let _guard: WorkerGuard = init_logging(&config.logging).context("Failed to open log file")?;
    info!(platform = ?config.platform.kind, "Starting maplaunch");

    // Platform + service setup
    let launcher = platform_launcher(&config.platform);
    let catalogue = Arc::new(ProviderCatalogue::standard());
    let service = Arc::new(MapLauncherService::new(catalogue, launcher));

    // App state
    let app = App::new(service, &config.request);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Send logs to the configured file; the terminal belongs to the UI.
fn init_logging(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(log_appender(logging)?);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn log_appender(logging: &LoggingConfig) -> Result<RollingFileAppender> {
    let directory = logging
        .file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = logging
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .with_context(|| format!("Cannot write to {}", logging.file.display()))?;
    Ok(appender)
}

fn platform_launcher(platform: &PlatformConfig) -> Arc<dyn PlatformLauncher> {
    match platform.kind {
        PlatformKind::Android => android::launcher(platform.adb.clone(), platform.serial.clone()),
        PlatformKind::IosSimulator => ios::launcher(platform.xcrun.clone(), platform.device.clone()),
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::Refresh => {
                    app.error_message = None;
                    app.refresh_providers();
                }
                Action::ShowMarker => {
                    let Some(provider) = app.selected.clone() else {
                        app.error_message = Some("Choose a map app first".into());
                        continue;
                    };

                    let params = match app.marker_params(&provider) {
                        Ok(params) => params,
                        Err(msg) => {
                            app.error_message = Some(msg);
                            continue;
                        }
                    };

                    match app.service.show_marker(params) {
                        Ok(()) => {
                            app.error_message = None;
                            app.record_launch(&provider, "marker");
                        }
                        Err(err) => app.error_message = Some(describe(&err)),
                    }
                }
                Action::ShowDirections => {
                    let Some(provider) = app.selected.clone() else {
                        app.error_message = Some("Choose a map app first".into());
                        continue;
                    };

                    let params = match app.directions_params(&provider) {
                        Ok(params) => params,
                        Err(msg) => {
                            app.error_message = Some(msg);
                            continue;
                        }
                    };

                    match app.service.show_directions(params) {
                        Ok(()) => {
                            app.error_message = None;
                            app.record_launch(&provider, "directions");
                        }
                        Err(err) => app.error_message = Some(describe(&err)),
                    }
                }
            }
        }
    }

    Ok(())
}

fn describe(err: &LaunchError) -> String {
    format!("{}: {err}", err.code())
}
