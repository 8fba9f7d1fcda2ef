// Chat session state machine.
//
// Owns the in-memory conversation history and the two pieces of status
// the chat surface needs: whether a send is in flight, and whether the
// backend reports its model as loaded. All remote I/O happens in the
// app orchestrator; this module only decides what a send attempt does
// to the session.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The synthetic assistant message every session starts with.
pub const WELCOME_MESSAGE: &str = "Welcome to Nexaur Ai. I'm your AI advisor for \
building halal wealth through fractional real estate. Ask me to find properties, \
analyze rental yields, or explain our Shariah-compliant process.";

/// Fixed user-facing reply appended when a chat request fails for any
/// reason (network error, non-2xx, timeout). Failures are swallowed
/// into the transcript, never thrown to the caller.
pub const APOLOGY_MESSAGE: &str = "I apologize, but I encountered an error. \
Please try again or check if the backend server is running.";

/// Suggested questions shown while the transcript holds only the
/// welcome message.
pub const QUICK_PROMPTS: &[&str] = &[
    "What are current real estate investment trends?",
    "How should I diversify my portfolio?",
    "What are the best markets for property investment?",
];

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Serialized as `{ "role": ..., "content": ... }`
/// on the `/chat` wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status types
// ---------------------------------------------------------------------------

/// Result of the startup health probe against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// Probe not yet resolved.
    Checking,
    /// Backend reachable and model loaded.
    Ready,
    /// Backend reachable but still loading its model.
    Loading,
    /// Probe failed; chat input is disabled until restart.
    Error,
}

impl ApiStatus {
    /// Map the `/health` outcome onto the tri-state status.
    pub fn from_probe(result: Result<bool, ()>) -> Self {
        match result {
            Ok(true) => ApiStatus::Ready,
            Ok(false) => ApiStatus::Loading,
            Err(()) => ApiStatus::Error,
        }
    }

    /// Status line label, mirroring the backend's own wording.
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Checking => "Checking...",
            ApiStatus::Ready => "Connected",
            ApiStatus::Loading => "Loading Model...",
            ApiStatus::Error => "Disconnected",
        }
    }
}

/// Send phase: at most one request may be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
}

// ---------------------------------------------------------------------------
// ChatSession
// ---------------------------------------------------------------------------

/// The in-memory conversation for one run of the app.
///
/// Invariant: `messages` always starts with the welcome message and is
/// append-only — entries are never reordered or deleted.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: SendPhase,
    pub api_status: ApiStatus,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        ChatSession {
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
            phase: SendPhase::Idle,
            api_status: ApiStatus::Checking,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.phase == SendPhase::Sending
    }

    /// Whether the input control accepts typing right now. The probe
    /// failing permanently disables input; a send in flight disables it
    /// temporarily.
    pub fn input_enabled(&self) -> bool {
        !self.is_sending() && self.api_status != ApiStatus::Error
    }

    /// Quick prompts are offered only while the transcript holds just
    /// the welcome message.
    pub fn show_quick_prompts(&self) -> bool {
        self.messages.len() == 1
    }

    /// Try to start a send.
    ///
    /// Rejected (returns `None`, session unchanged) when `text` is
    /// blank or whitespace-only, or when a send is already in flight.
    /// On acceptance the user message is appended, the session enters
    /// `Sending`, and the full updated history is returned for the
    /// caller to post.
    pub fn begin_send(&mut self, text: &str) -> Option<Vec<ChatMessage>> {
        if text.trim().is_empty() || self.is_sending() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.phase = SendPhase::Sending;
        Some(self.messages.clone())
    }

    /// A send resolved successfully: append the assistant reply and
    /// return to idle.
    pub fn complete_send(&mut self, reply: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(reply));
        self.phase = SendPhase::Idle;
    }

    /// A send failed: append the fixed apology and return to idle.
    pub fn fail_send(&mut self) {
        self.messages.push(ChatMessage::assistant(APOLOGY_MESSAGE));
        self.phase = SendPhase::Idle;
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
