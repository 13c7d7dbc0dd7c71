//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::render::RenderedMessage;
use crate::session::{MenuState, Session};
use crate::state_machine::ContentPlan;

// ============================================================
// Action server protocol
// ============================================================

/// Request from the chat framework asking us to run a custom action
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
}

#[derive(Debug, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
    #[serde(default)]
    pub events: Vec<TrackerEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Entity {
    pub entity: String,
    /// Usually a string; classifiers sometimes send numbers
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct TrackerEvent {
    pub event: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Action result: slot updates plus messages to send
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<RenderedMessage>,
}

/// `{"event": "slot", "name": ..., "value": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotEvent {
    pub event: String,
    pub name: String,
    pub value: Value,
}

impl SlotEvent {
    pub fn set(name: &str, value: Option<&str>) -> Self {
        Self {
            event: "slot".to_string(),
            name: name.to_string(),
            value: value.map_or(Value::Null, |v| Value::String(v.to_string())),
        }
    }
}

// ============================================================
// Direct turn API
// ============================================================

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub state: MenuState,
    pub session: Session,
    pub plan: ContentPlan,
    pub messages: Vec<RenderedMessage>,
}

// ============================================================
// Debug and status
// ============================================================

#[derive(Debug, Serialize)]
pub struct DebugEcho {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub vocabulary_version: String,
    pub carriers: usize,
    pub aliases: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
