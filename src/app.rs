// Application orchestration: the central event loop between the TUI
// and the backend API.
//
// Owns the chat session (the one component with a concurrency
// invariant: at most one in-flight send) and fans remote calls out to
// spawned tasks that report back over the `ApiEvent` channel. Pushes
// state snapshots to the TUI over the `UiUpdate` channel. Nothing here
// blocks and no remote failure escapes as an error: every failure is
// converted into UI state per component policy.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::chat::{ApiStatus, ChatSession};
use crate::config::Settings;
use crate::hosting::HostSubmission;
use crate::protocol::{ApiEvent, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The orchestrator's state.
pub struct AppState {
    pub settings: Settings,
    pub chat: ChatSession,
    /// API client shared with spawned request tasks.
    pub api: Arc<ApiClient>,
    /// Sender for API events; request tasks use a clone to report
    /// completions back into the event loop.
    pub api_tx: mpsc::Sender<ApiEvent>,
}

impl AppState {
    pub fn new(settings: Settings, api: ApiClient, api_tx: mpsc::Sender<ApiEvent>) -> Self {
        AppState {
            settings,
            chat: ChatSession::new(),
            api: Arc::new(api),
            api_tx,
        }
    }

    /// Fire the startup probes: one health check and one listings
    /// fetch. Both run once, independently; they write disjoint state
    /// and may resolve in any order.
    pub fn spawn_startup_probes(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.health().await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::HealthChecked(result)).await;
        });

        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.properties().await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::PropertiesFetched(result)).await;
        });
    }

    /// Try to start a chat send. Returns `true` when a request task was
    /// spawned (the session accepted the text), `false` when the
    /// session rejected it (blank input or a send already in flight).
    pub fn submit_chat(&mut self, text: &str) -> bool {
        let Some(history) = self.chat.begin_send(text) else {
            debug!("chat send rejected (blank or already in flight)");
            return false;
        };

        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        let max_length = self.settings.chat.max_length;
        tokio::spawn(async move {
            let result = api
                .chat(&history, max_length)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::ChatResolved(result)).await;
        });
        true
    }

    /// Spawn a listing submission task.
    pub fn submit_listing(&self, submission: HostSubmission) {
        info!(
            property = %submission.property_name,
            location = %submission.location,
            "submitting new listing"
        );
        let api = Arc::clone(&self.api);
        let tx = self.api_tx.clone();
        tokio::spawn(async move {
            let result = api.host(&submission).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiEvent::HostResolved(result)).await;
        });
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator event loop.
///
/// Listens on two channels with `tokio::select!`: API task completions
/// and user commands from the TUI. Exits when the TUI sends `Quit` or
/// either channel closes.
pub async fn run(
    mut api_rx: mpsc::Receiver<ApiEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("application event loop started");

    state.spawn_startup_probes();

    loop {
        tokio::select! {
            api_event = api_rx.recv() => {
                match api_event {
                    Some(event) => handle_api_event(&mut state, event, &ui_tx).await,
                    None => {
                        info!("API event channel closed, shutting down");
                        break;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => handle_user_command(&mut state, cmd, &ui_tx).await,
                    None => {
                        info!("command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SubmitChat(text) => {
            if state.submit_chat(&text) {
                push_transcript(state, ui_tx).await;
            }
        }
        UserCommand::SubmitListing(submission) => {
            state.submit_listing(submission);
        }
        UserCommand::Quit => unreachable!("Quit is handled by the event loop"),
    }
}

async fn handle_api_event(
    state: &mut AppState,
    event: ApiEvent,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        ApiEvent::HealthChecked(result) => {
            let status = match result {
                Ok(loaded) => ApiStatus::from_probe(Ok(loaded)),
                Err(e) => {
                    warn!("health probe failed: {e}");
                    ApiStatus::from_probe(Err(()))
                }
            };
            state.chat.api_status = status;
            info!("backend status: {}", status.label());
            let _ = ui_tx.send(UiUpdate::ApiStatus(status)).await;
        }

        ApiEvent::ChatResolved(result) => {
            match result {
                Ok(reply) => state.chat.complete_send(reply),
                Err(e) => {
                    // Swallowed per policy: the transcript shows the
                    // fixed apology and the session continues.
                    warn!("chat request failed: {e}");
                    state.chat.fail_send();
                }
            }
            push_transcript(state, ui_tx).await;
        }

        ApiEvent::PropertiesFetched(result) => {
            let properties = match result {
                Ok(properties) => {
                    info!("loaded {} properties", properties.len());
                    properties
                }
                Err(e) => {
                    // No retry, no surfaced error: the list stays empty
                    // and the view leaves its loading phase.
                    warn!("properties fetch failed: {e}");
                    Vec::new()
                }
            };
            let _ = ui_tx.send(UiUpdate::ListingsLoaded(properties)).await;
        }

        ApiEvent::HostResolved(result) => {
            let success = match result {
                Ok(()) => {
                    info!("listing submission accepted");
                    true
                }
                Err(e) => {
                    warn!("listing submission failed: {e}");
                    false
                }
            };
            let _ = ui_tx.send(UiUpdate::HostOutcome { success }).await;
        }
    }
}

async fn push_transcript(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::ChatTranscript {
            messages: state.chat.messages().to_vec(),
            sending: state.chat.is_sending(),
        })
        .await;
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
