mod audio;
mod auth;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use controller::AppController;
use model::{AppModel, Selectors};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Arc::new(config::load_settings());

    // Dropping the guard flushes the non-blocking writer
    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Spotify Triage Starting ===");
    tracing::debug!(
        window_size = settings.session.window_size,
        sort_mode = ?settings.session.sort_mode,
        device_name = %settings.player.device_name,
        "Settings loaded"
    );

    let app_model: AppModel = AppModel::new(Selectors {
        sort_mode: settings.session.sort_mode,
        ..Default::default()
    });
    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), settings.clone());

    // Try the cached session in the background; the gate shows "Signing in"
    // meanwhile and falls back to the sign-in screen.
    let controller_for_restore = controller.clone();
    tokio::spawn(async move {
        controller_for_restore.restore_session().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Spotify Triage shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let (auth_state, ui_state, session_view, device_status, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_auth_state().await,
                model_guard.get_ui_state().await,
                model_guard.get_session_view().await,
                model_guard.get_device_status().await,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &auth_state, &ui_state, &session_view, &device_status);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
