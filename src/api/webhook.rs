//! Action server bridge
//!
//! The chat framework owns the slots, so a webhook call carries the whole
//! session. We hydrate a [`Session`] from the tracker, run the engine, and
//! answer with `slot` events for whatever changed.

use serde_json::Value;

use super::types::{ActionRequest, SlotEvent, Tracker};
use crate::session::{MenuState, Session};
use crate::state_machine::InboundTurn;

pub const ACTION_SESSION_START: &str = "action_session_start";
pub const ACTION_CHOOSE_OPTION: &str = "action_elegir_opcion";
pub const ACTION_FALLBACK: &str = "action_default_fallback";

pub const SLOT_STATE: &str = "estado_menu";
pub const SLOT_CARRIER: &str = "compania";
pub const SLOT_PHONE: &str = "numero_telefono";
pub const SLOT_NIP: &str = "nip_usuario";
pub const SLOT_IMEI: &str = "imei_usuario";
pub const SLOT_NAME: &str = "nombre_usuario";
pub const SLOT_EMAIL: &str = "correo_usuario";

const OPTION_ENTITY: &str = "numero_opcion";

/// Supported custom actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SessionStart,
    ChooseOption,
    Fallback,
}

impl Action {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            ACTION_SESSION_START => Some(Action::SessionStart),
            ACTION_CHOOSE_OPTION => Some(Action::ChooseOption),
            ACTION_FALLBACK => Some(Action::Fallback),
            _ => None,
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn slot(tracker: &Tracker, name: &str) -> Option<String> {
    tracker.slots.get(name).and_then(value_text)
}

/// Rebuild the session from tracker slots
pub fn session_from_tracker(tracker: &Tracker) -> Session {
    Session {
        state: MenuState::from_slot(slot(tracker, SLOT_STATE).as_deref()),
        carrier: slot(tracker, SLOT_CARRIER),
        phone_number: slot(tracker, SLOT_PHONE),
        nip: slot(tracker, SLOT_NIP),
        imei: slot(tracker, SLOT_IMEI),
        full_name: slot(tracker, SLOT_NAME),
        email: slot(tracker, SLOT_EMAIL),
        session_started: true,
    }
}

/// Build the inbound turn from the latest message and user history
pub fn turn_from_request(request: &ActionRequest) -> InboundTurn {
    let latest = &request.tracker.latest_message;
    let text = latest.text.clone().unwrap_or_default();

    let selected_option = latest
        .entities
        .iter()
        .find(|e| e.entity == OPTION_ENTITY)
        .and_then(|e| value_text(&e.value));

    let intent_tag = latest.intent.as_ref().and_then(|i| i.name.clone());

    let mut history: Vec<String> = request
        .tracker
        .events
        .iter()
        .filter(|e| e.event == "user")
        .filter_map(|e| e.text.clone())
        .collect();
    // The latest message is also the last user event
    if history.last() == latest.text.as_ref() {
        history.pop();
    }

    InboundTurn {
        text,
        selected_option,
        intent_tag,
        recent_history: history,
    }
}

/// Slot events turning `before` into `after`.
///
/// `estado_menu` is always set so the framework's view cannot drift from ours.
pub fn slot_events(before: &Session, after: &Session) -> Vec<SlotEvent> {
    let mut events = vec![SlotEvent::set(SLOT_STATE, Some(after.state.as_str()))];

    let pairs = [
        (SLOT_CARRIER, &before.carrier, &after.carrier),
        (SLOT_PHONE, &before.phone_number, &after.phone_number),
        (SLOT_NIP, &before.nip, &after.nip),
        (SLOT_IMEI, &before.imei, &after.imei),
        (SLOT_NAME, &before.full_name, &after.full_name),
        (SLOT_EMAIL, &before.email, &after.email),
    ];
    for (name, old, new) in pairs {
        if old != new {
            events.push(SlotEvent::set(name, new.as_deref()));
        }
    }
    events
}
