//! Per-conversation session state
//!
//! A `Session` is an explicit value: the engine receives it, returns a new one,
//! and the host decides where it lives between turns.

mod store;

pub use store::{InMemorySessionStore, SessionStore, StoreError};

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Menu State
// ============================================================================

/// Position of a conversation in the menu tree.
///
/// Deserialization accepts the legacy slot values still written by older
/// chat domains (`menu_principal`, `submenu_paquetes`, ...). Any other value
/// lands in [`MenuState::Unrecognized`], which the engine never produces and
/// always resets to the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    #[serde(alias = "menu_principal")]
    MainMenu,
    #[serde(alias = "submenu_paquetes")]
    PackagesSubmenu,
    #[serde(alias = "submenu_portabilidad")]
    PortabilitySubmenu,
    #[serde(alias = "submenu_nip")]
    NipSubmenu,
    #[serde(alias = "capturar_nip")]
    CaptureNip,
    #[serde(alias = "validar_imei")]
    ValidateImei,
    #[serde(alias = "registro_nombre")]
    RegisterName,
    #[serde(alias = "registro_correo")]
    RegisterEmail,
    #[serde(alias = "registro_numero")]
    RegisterNumero,
    #[serde(alias = "menu_esim_valido")]
    EsimValidMenu,
    #[serde(alias = "submenu_soporte")]
    SupportSubmenu,
    #[serde(alias = "submenu_avanzar_nip")]
    AdvanceNipSubmenu,
    /// A stored value outside the enumerated set
    #[serde(other)]
    Unrecognized,
}

/// States that expect a numeric menu option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionState {
    MainMenu,
    PackagesSubmenu,
    PortabilitySubmenu,
    NipSubmenu,
    EsimValidMenu,
    SupportSubmenu,
    AdvanceNipSubmenu,
}

/// States whose input is data to validate rather than a menu index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    CaptureNip,
    ValidateImei,
    RegisterName,
    RegisterEmail,
    RegisterNumero,
}

/// How the engine must interpret input in a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Selection(SelectionState),
    Capture(CaptureState),
    Unrecognized,
}

impl MenuState {
    /// Every state the engine can produce
    #[cfg(test)]
    pub const ALL: [MenuState; 12] = [
        MenuState::MainMenu,
        MenuState::PackagesSubmenu,
        MenuState::PortabilitySubmenu,
        MenuState::NipSubmenu,
        MenuState::CaptureNip,
        MenuState::ValidateImei,
        MenuState::RegisterName,
        MenuState::RegisterEmail,
        MenuState::RegisterNumero,
        MenuState::EsimValidMenu,
        MenuState::SupportSubmenu,
        MenuState::AdvanceNipSubmenu,
    ];

    pub fn classify(self) -> StateClass {
        match self {
            MenuState::MainMenu => StateClass::Selection(SelectionState::MainMenu),
            MenuState::PackagesSubmenu => StateClass::Selection(SelectionState::PackagesSubmenu),
            MenuState::PortabilitySubmenu => {
                StateClass::Selection(SelectionState::PortabilitySubmenu)
            }
            MenuState::NipSubmenu => StateClass::Selection(SelectionState::NipSubmenu),
            MenuState::EsimValidMenu => StateClass::Selection(SelectionState::EsimValidMenu),
            MenuState::SupportSubmenu => StateClass::Selection(SelectionState::SupportSubmenu),
            MenuState::AdvanceNipSubmenu => {
                StateClass::Selection(SelectionState::AdvanceNipSubmenu)
            }
            MenuState::CaptureNip => StateClass::Capture(CaptureState::CaptureNip),
            MenuState::ValidateImei => StateClass::Capture(CaptureState::ValidateImei),
            MenuState::RegisterName => StateClass::Capture(CaptureState::RegisterName),
            MenuState::RegisterEmail => StateClass::Capture(CaptureState::RegisterEmail),
            MenuState::RegisterNumero => StateClass::Capture(CaptureState::RegisterNumero),
            MenuState::Unrecognized => StateClass::Unrecognized,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MenuState::MainMenu => "main_menu",
            MenuState::PackagesSubmenu => "packages_submenu",
            MenuState::PortabilitySubmenu => "portability_submenu",
            MenuState::NipSubmenu => "nip_submenu",
            MenuState::CaptureNip => "capture_nip",
            MenuState::ValidateImei => "validate_imei",
            MenuState::RegisterName => "register_name",
            MenuState::RegisterEmail => "register_email",
            MenuState::RegisterNumero => "register_numero",
            MenuState::EsimValidMenu => "esim_valid_menu",
            MenuState::SupportSubmenu => "support_submenu",
            MenuState::AdvanceNipSubmenu => "advance_nip_submenu",
            MenuState::Unrecognized => "unrecognized",
        }
    }

    /// Parse a stored slot value; unknown or missing values are `Unrecognized`
    pub fn from_slot(value: Option<&str>) -> Self {
        value
            .and_then(|v| serde_json::from_value(serde_json::Value::String(v.trim().to_string())).ok())
            .unwrap_or(MenuState::Unrecognized)
    }
}

impl From<SelectionState> for MenuState {
    fn from(state: SelectionState) -> Self {
        match state {
            SelectionState::MainMenu => MenuState::MainMenu,
            SelectionState::PackagesSubmenu => MenuState::PackagesSubmenu,
            SelectionState::PortabilitySubmenu => MenuState::PortabilitySubmenu,
            SelectionState::NipSubmenu => MenuState::NipSubmenu,
            SelectionState::EsimValidMenu => MenuState::EsimValidMenu,
            SelectionState::SupportSubmenu => MenuState::SupportSubmenu,
            SelectionState::AdvanceNipSubmenu => MenuState::AdvanceNipSubmenu,
        }
    }
}

impl From<CaptureState> for MenuState {
    fn from(state: CaptureState) -> Self {
        match state {
            CaptureState::CaptureNip => MenuState::CaptureNip,
            CaptureState::ValidateImei => MenuState::ValidateImei,
            CaptureState::RegisterName => MenuState::RegisterName,
            CaptureState::RegisterEmail => MenuState::RegisterEmail,
            CaptureState::RegisterNumero => MenuState::RegisterNumero,
        }
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Session
// ============================================================================

/// Slot values for one conversation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub state: MenuState,
    /// Canonical carrier display name detected at session start
    #[serde(default)]
    pub carrier: Option<String>,
    /// 10-digit number to port
    #[serde(default)]
    pub phone_number: Option<String>,
    /// 4-digit portability code
    #[serde(default)]
    pub nip: Option<String>,
    /// 15-digit device identifier
    #[serde(default)]
    pub imei: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Stored as typed, no format check
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub session_started: bool,
}

impl Session {
    /// Fresh session positioned at the main menu
    pub fn started() -> Self {
        Self {
            session_started: true,
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: MenuState) -> Self {
        self.state = state;
        self
    }
}
