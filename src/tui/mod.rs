// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The app orchestrator pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.
//
// Editing state (chat input, location filter, host form) lives here, not
// in the orchestrator: the orchestrator only sees completed submissions.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::chat::{ApiStatus, ChatMessage, WELCOME_MESSAGE};
use crate::hosting::{Field, HostForm};
use crate::listings::ListingsState;
use crate::protocol::{UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The three surfaces, cycled with Tab/BackTab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Chat,
    Listings,
    Host,
}

impl TabId {
    pub fn next(self) -> Self {
        match self {
            TabId::Chat => TabId::Listings,
            TabId::Listings => TabId::Host,
            TabId::Host => TabId::Chat,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TabId::Chat => TabId::Host,
            TabId::Listings => TabId::Chat,
            TabId::Host => TabId::Listings,
        }
    }
}

// ---------------------------------------------------------------------------
// Host notices
// ---------------------------------------------------------------------------

/// Outcome banner shown above the host form after a submission resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNotice {
    Success,
    Failure,
}

impl HostNotice {
    pub fn message(&self) -> &'static str {
        match self {
            HostNotice::Success => {
                "Congratulations! Your property has been listed successfully."
            }
            HostNotice::Failure => "Failed to add property. Please try again.",
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the screen.
pub struct ViewState {
    /// Which tab is active.
    pub active_tab: TabId,
    /// Chat transcript mirror (the orchestrator owns the session).
    pub transcript: Vec<ChatMessage>,
    /// Whether a chat send is in flight.
    pub sending: bool,
    /// Backend health status.
    pub api_status: ApiStatus,
    /// Chat input buffer.
    pub chat_input: String,
    /// Selected quick prompt index, if any.
    pub quick_prompt: Option<usize>,
    /// Listings mirror: records, phase, and filter text.
    pub listings: ListingsState,
    /// Whether the location filter input is active.
    pub filter_mode: bool,
    /// The host form being edited.
    pub host_form: HostForm,
    /// Index into `Field::ALL` of the focused form field.
    pub host_focus: usize,
    /// Raw edit buffer for the focused field.
    pub host_edit: String,
    /// Submission outcome banner, cleared on the next edit.
    pub host_notice: Option<HostNotice>,
    /// Whether a host submission is in flight.
    pub host_submitting: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        let host_form = HostForm::default();
        let host_edit = host_form.display(Field::ALL[0]);
        ViewState {
            active_tab: TabId::Chat,
            transcript: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            sending: false,
            api_status: ApiStatus::Checking,
            chat_input: String::new(),
            quick_prompt: None,
            listings: ListingsState::new(),
            filter_mode: false,
            host_form,
            host_focus: 0,
            host_edit,
            host_notice: None,
            host_submitting: false,
        }
    }
}

impl ViewState {
    /// Whether the chat input accepts typing right now.
    pub fn chat_input_enabled(&self) -> bool {
        !self.sending && self.api_status != ApiStatus::Error
    }

    /// Quick prompts are offered only while the transcript holds just
    /// the welcome message.
    pub fn show_quick_prompts(&self) -> bool {
        self.transcript.len() == 1
    }

    /// The form field currently focused for editing.
    pub fn focused_field(&self) -> Field {
        Field::ALL[self.host_focus]
    }

    /// Move form focus and reload the edit buffer from the form.
    pub fn set_host_focus(&mut self, index: usize) {
        self.host_focus = index.min(Field::ALL.len() - 1);
        self.host_edit = self.host_form.display(self.focused_field());
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::ApiStatus(status) => {
            state.api_status = status;
        }
        UiUpdate::ChatTranscript { messages, sending } => {
            state.transcript = messages;
            state.sending = sending;
        }
        UiUpdate::ListingsLoaded(properties) => {
            state.listings.set_loaded(properties);
        }
        UiUpdate::HostOutcome { success } => {
            state.host_submitting = false;
            if success {
                // Form resets to its defaults; the banner confirms.
                state.host_form.reset();
                state.set_host_focus(0);
                state.host_notice = Some(HostNotice::Success);
            } else {
                // Input is left intact for retry.
                state.host_notice = Some(HostNotice::Failure);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the active tab.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        TabId::Chat => widgets::chat::render(frame, layout.main_panel, state),
        TabId::Listings => widgets::listings::render(frame, layout.main_panel, state),
        TabId::Host => widgets::host_form::render(frame, layout.main_panel, state),
    }
    widgets::input_bar::render(frame, layout.input_bar, state);
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Set panic hook to restore terminal on crash.
    //    We capture the original hook and chain ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create ViewState
    let mut view_state = ViewState::default();

    // 4. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 5. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) => {
                        // Input error -- break out
                        break;
                    }
                    None => {
                        // Stream ended
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 7. Restore terminal
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
