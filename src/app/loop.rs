use crate::app::{
    action::Action,
    command::Command,
    input::{map_event_to_action, track_click},
    persistence, reducer,
    state::AppState,
    ui,
};
use crate::domain::clipboard::ClipboardSink;
use crate::infrastructure::catalog_loader;

use anyhow::Result;
use crossterm::event::{self, Event};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    clipboard: Box<dyn ClipboardSink>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, clipboard, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    mut clipboard: Box<dyn ClipboardSink>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Data directory watcher
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let _watcher = app_state
        .data_dir
        .as_deref()
        .and_then(|dir| watch_data_dir(dir, notify_tx));

    let action_tx_clone = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;
        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(DEBOUNCE) => {
                        let _ = action_tx_clone.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    // Initial Load
    if let Some(dir) = app_state.data_dir.clone() {
        app_state.is_reloading = true;
        handle_command(Command::LoadCatalogs(dir), clipboard.as_mut(), action_tx.clone());
    }

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                let action = map_event_to_action(event.clone(), &app_state, terminal.size()?);
                track_click(&mut app_state, &event);
                action
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            let command = reducer::update(&mut app_state, action);
            if app_state.should_quit {
                info!("quitting");
                break;
            }
            if let Some(cmd) = command {
                handle_command(cmd, clipboard.as_mut(), action_tx.clone());
            }
        }
    }

    Ok(())
}

fn watch_data_dir(dir: &Path, notify_tx: mpsc::Sender<()>) -> Option<RecommendedWatcher> {
    if !dir.is_dir() {
        return None;
    }
    let mut watcher = match notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok_and(|e| !e.kind.is_access()) {
            let _ = notify_tx.try_send(());
        }
    }) {
        Ok(watcher) => watcher,
        Err(e) => {
            warn!(error = %e, "file watching unavailable, use r to reload");
            return None;
        }
    };
    if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
        warn!(error = %e, dir = %dir.display(), "cannot watch data directory");
        return None;
    }
    debug!(dir = %dir.display(), "watching data directory");
    Some(watcher)
}

/// Runs a side effect. Results come back on `tx` as actions.
pub(crate) fn handle_command(
    command: Command,
    clipboard: &mut dyn ClipboardSink,
    tx: mpsc::Sender<Action>,
) {
    match command {
        Command::LoadCatalogs(dir) => {
            tokio::spawn(async move {
                let result =
                    tokio::task::spawn_blocking(move || catalog_loader::load_all(&dir)).await;
                let action = match result {
                    Ok(report) => Action::CatalogsLoaded(Box::new(report)),
                    Err(e) => Action::ErrorOccurred(format!("Catalog load failed: {e}")),
                };
                let _ = tx.send(action).await;
            });
        }
        Command::CopyToClipboard(text) => {
            // The handle lives on this thread, so the copy itself is synchronous.
            let result = match clipboard.copy(&text) {
                Ok(()) => Ok(text),
                Err(e) => {
                    warn!(error = %e, "copy failed");
                    Err(e.to_string())
                }
            };
            tokio::spawn(async move {
                let _ = tx.send(Action::CopyCompleted(result)).await;
            });
        }
        Command::SaveFavorites {
            path,
            favorites,
            message,
        } => {
            tokio::spawn(async move {
                let result = tokio::task::spawn_blocking(move || {
                    persistence::save_favorites(&path, &favorites)
                })
                .await;
                let action = match result {
                    Ok(Ok(())) => Action::FavoritesSaved(Ok(message)),
                    Ok(Err(e)) => {
                        error!(error = %e, "failed to save favorites");
                        Action::FavoritesSaved(Err(e.to_string()))
                    }
                    Err(e) => Action::FavoritesSaved(Err(e.to_string())),
                };
                let _ = tx.send(action).await;
            });
        }
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
