// Channel message types shared between the TUI and the app
// orchestrator.
//
// Three message flows: `UserCommand` (TUI -> orchestrator), `ApiEvent`
// (spawned request tasks -> orchestrator), `UiUpdate` (orchestrator ->
// TUI render loop).

use crate::chat::{ApiStatus, ChatMessage};
use crate::hosting::HostSubmission;
use crate::listings::PropertyRecord;

/// Commands the TUI sends to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Submit the typed chat input. Blank text and sends while one is
    /// already in flight are rejected by the session, not here.
    SubmitChat(String),
    /// Submit the host form payload (already defensively coerced).
    SubmitListing(HostSubmission),
    Quit,
}

/// Completions of spawned API request tasks. Failures arrive as
/// pre-rendered strings because the orchestrator only logs them; the
/// user-facing handling is fixed per component.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    HealthChecked(Result<bool, String>),
    ChatResolved(Result<String, String>),
    PropertiesFetched(Result<Vec<PropertyRecord>, String>),
    HostResolved(Result<(), String>),
}

/// State pushes from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Result of the startup health probe (or `Checking` before it).
    ApiStatus(ApiStatus),
    /// Full transcript snapshot plus whether a send is in flight.
    ChatTranscript {
        messages: Vec<ChatMessage>,
        sending: bool,
    },
    /// The one startup listings fetch resolved; a failed fetch arrives
    /// as an empty collection.
    ListingsLoaded(Vec<PropertyRecord>),
    /// A listing submission resolved.
    HostOutcome { success: bool },
}
