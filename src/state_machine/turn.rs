//! Classified inbound turns

use serde::{Deserialize, Serialize};

/// Intent names the upstream classifier uses for goodbyes
const FAREWELL_INTENTS: &[&str] = &["despedida", "farewell", "goodbye"];

/// One user turn, already classified upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundTurn {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub selected_option: Option<String>,
    #[serde(default)]
    pub intent_tag: Option<String>,
    /// Earlier user texts, oldest first
    #[serde(default)]
    pub recent_history: Vec<String>,
}

#[cfg(test)]
impl InboundTurn {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A turn whose text is also the selected menu option
    pub fn from_option(option: impl Into<String>) -> Self {
        let option = option.into();
        Self {
            text: option.clone(),
            selected_option: Some(option),
            ..Self::default()
        }
    }

    pub fn with_intent(mut self, intent: impl Into<String>) -> Self {
        self.intent_tag = Some(intent.into());
        self
    }

    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.recent_history = history;
        self
    }
}

/// Read-only view of an inbound turn
pub trait InboundTurnReader {
    fn text(&self) -> &str;
    fn selected_option(&self) -> Option<&str>;
    fn intent_tag(&self) -> Option<&str>;
    /// Earlier user texts, oldest first
    fn recent_history(&self) -> &[String];

    fn is_farewell(&self) -> bool {
        self.intent_tag().is_some_and(|tag| {
            let tag = tag.trim();
            FAREWELL_INTENTS.iter().any(|f| f.eq_ignore_ascii_case(tag))
        })
    }

    fn menu_option(&self) -> Option<MenuOption> {
        self.selected_option().map(MenuOption::parse)
    }
}

impl InboundTurnReader for InboundTurn {
    fn text(&self) -> &str {
        &self.text
    }

    fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    fn intent_tag(&self) -> Option<&str> {
        self.intent_tag.as_deref()
    }

    fn recent_history(&self) -> &[String] {
        &self.recent_history
    }
}

/// A menu index as the engine understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    Back,
    One,
    Two,
    Three,
    Four,
    /// Present but not an index any menu offers
    Invalid,
}

impl MenuOption {
    #[cfg(test)]
    pub const ALL: [MenuOption; 6] = [
        MenuOption::Back,
        MenuOption::One,
        MenuOption::Two,
        MenuOption::Three,
        MenuOption::Four,
        MenuOption::Invalid,
    ];

    /// Accepts "1", " 1 " and keycap forms like "1️⃣"
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(*c, '\u{FE0F}' | '\u{20E3}') && !c.is_whitespace())
            .collect();
        match cleaned.as_str() {
            "0" => MenuOption::Back,
            "1" => MenuOption::One,
            "2" => MenuOption::Two,
            "3" => MenuOption::Three,
            "4" => MenuOption::Four,
            _ => MenuOption::Invalid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MenuOption::Back => "0",
            MenuOption::One => "1",
            MenuOption::Two => "2",
            MenuOption::Three => "3",
            MenuOption::Four => "4",
            MenuOption::Invalid => "invalid",
        }
    }
}
