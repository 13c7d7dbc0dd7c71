//! Carrier detection from upstream free text
//!
//! The messaging bridge announces where a user comes from in a handful of
//! shapes: `COMPANIA_DETECTADA Telcel`, `OPERATOR AT&T NUMERO 6141234567`, a
//! bare carrier name, or a sentence like "mi compañía es Bait". Rules run in a
//! fixed order and the first hit wins:
//!
//! 1. `COMPANIA_DETECTADA <name>`
//! 2. `OPERATOR <name> [NUMERO <digits>]`
//! 3. multi-word vocabulary aliases, longest first
//! 4. single-token vocabulary aliases, in text order
//! 5. natural-language phrases ("la compañía es", "operador:")
//!
//! Finding nothing is normal; callers fall back to the generic greeting.

pub mod vocabulary;

pub use vocabulary::{Vocabulary, VocabularyError};

use regex::Regex;

const TAG_DETECTED: &str = r"(?i)\bCOMPA(?:N|Ñ)IA_DETECTADA\b[\s:]*(?P<name>[^\r\n]+)";
// Upper case only; the bridge never lowercases it and prose uses "operator" freely
const TAG_OPERATOR: &str = r"\bOPERATOR\b[\s:]+(?P<name>[^\r\n]+)";
const NUMERO_MARKER: &str = r"(?i)\bN(?:U|Ú)MERO\b";
const NUMERO_PHONE: &str = r"(?i)\bN(?:U|Ú)MERO\b[\s:]*(?P<digits>[0-9]{10,})";
const NATURAL_PHRASE: &str = r"(?i)(?:compa(?:ñ|n)(?:i|í)a(?:\s+actual)?\s+es|operador(?:\s+actual)?\s*(?::|es))\s*(?P<name>[\p{L}&]+(?:[ \t]+[\p{L}&]+){0,2})";

const PHONE_DIGITS: usize = 10;

/// Longest alias worth looking up after a tag
const MAX_TAG_WORDS: usize = 3;
/// Unknown tag names longer than this are trailing prose; keep the first word
const MAX_UNKNOWN_TAG_WORDS: usize = 2;

/// Carrier and phone found in one piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub carrier: Option<String>,
    pub phone: Option<String>,
}

/// Which rule produced a carrier match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    DetectedTag,
    OperatorTag,
    MultiWord,
    SingleToken,
    NaturalLanguage,
}

/// Compiled extraction pipeline over one vocabulary
#[derive(Debug, Clone)]
pub struct CarrierExtractor {
    vocabulary: Vocabulary,
    detected_tag: Regex,
    operator_tag: Regex,
    numero_marker: Regex,
    numero_phone: Regex,
    natural_phrase: Regex,
    multi_word: Vec<(Regex, String)>,
}

impl CarrierExtractor {
    pub fn new(vocabulary: Vocabulary) -> Result<Self, VocabularyError> {
        let multi_word = vocabulary
            .multi_word_aliases()
            .into_iter()
            .map(|(alias, name)| {
                let words: Vec<String> = alias.split_whitespace().map(regex::escape).collect();
                let pattern = format!(r"(?i)\b{}\b", words.join(r"\s+"));
                Regex::new(&pattern).map(|re| (re, name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            detected_tag: Regex::new(TAG_DETECTED)?,
            operator_tag: Regex::new(TAG_OPERATOR)?,
            numero_marker: Regex::new(NUMERO_MARKER)?,
            numero_phone: Regex::new(NUMERO_PHONE)?,
            natural_phrase: Regex::new(NATURAL_PHRASE)?,
            multi_word,
            vocabulary,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Canonical carrier name found in `text`, trying every rule
    pub fn extract_carrier(&self, text: &str) -> Option<String> {
        self.extract_carrier_with_rule(text).map(|(name, _)| name)
    }

    /// Canonical carrier name from a structured tag only (rules 1 and 2)
    pub fn extract_tagged_carrier(&self, text: &str) -> Option<String> {
        self.tagged(text).map(|(name, _)| name)
    }

    pub fn extract_carrier_with_rule(&self, text: &str) -> Option<(String, MatchRule)> {
        self.tagged(text)
            .or_else(|| self.multi_word(text).map(|n| (n, MatchRule::MultiWord)))
            .or_else(|| self.single_token(text).map(|n| (n, MatchRule::SingleToken)))
            .or_else(|| self.natural_language(text).map(|n| (n, MatchRule::NaturalLanguage)))
    }

    /// Phone number after a `NUMERO` marker, else any standalone 10-digit run
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        if let Some(caps) = self.numero_phone.captures(text) {
            let digits = &caps["digits"];
            // Longer runs carry a country prefix; keep the national number
            let start = digits.len() - PHONE_DIGITS;
            return digits.get(start..).map(str::to_string);
        }

        text.split(|c: char| !c.is_ascii_digit())
            .find(|run| run.len() == PHONE_DIGITS)
            .map(str::to_string)
    }

    /// Carrier (all rules) and phone from the same text
    pub fn extract_detection(&self, text: &str) -> Detection {
        Detection {
            carrier: self.extract_carrier(text),
            phone: self.extract_phone(text),
        }
    }

    fn tagged(&self, text: &str) -> Option<(String, MatchRule)> {
        let from_tag = |re: &Regex, rule: MatchRule| {
            re.captures(text)
                .and_then(|caps| self.tag_name(&caps["name"]))
                .map(|name| (name, rule))
        };
        from_tag(&self.detected_tag, MatchRule::DetectedTag)
            .or_else(|| from_tag(&self.operator_tag, MatchRule::OperatorTag))
    }

    /// Name portion of a tag: up to `NUMERO` or the first sentence break,
    /// resolved against the vocabulary
    fn tag_name(&self, raw: &str) -> Option<String> {
        let name = match self.numero_marker.find(raw) {
            Some(m) => raw.get(..m.start()).unwrap_or(raw),
            None => raw,
        };
        let name = name
            .split(|c: char| matches!(c, '.' | ',' | ';' | '!' | '?'))
            .next()
            .unwrap_or_default();
        let words: Vec<&str> = name
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| matches!(c, '"' | '\'' | ':' | '(' | ')')))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return None;
        }

        let candidates = words.get(..MAX_TAG_WORDS).unwrap_or(&words[..]);
        if let Some(known) = self.longest_known_prefix(candidates) {
            return Some(known);
        }
        let kept = if words.len() > MAX_UNKNOWN_TAG_WORDS {
            &words[..1]
        } else {
            &words[..]
        };
        Some(title_case(&kept.join(" ")))
    }

    fn multi_word(&self, text: &str) -> Option<String> {
        self.multi_word
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, name)| name.clone())
    }

    fn single_token(&self, text: &str) -> Option<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '&'))
            .filter(|token| !token.is_empty())
            .find_map(|token| self.vocabulary.canonical(token))
            .map(str::to_string)
    }

    fn natural_language(&self, text: &str) -> Option<String> {
        let caps = self.natural_phrase.captures(text)?;
        let words: Vec<&str> = caps["name"].split_whitespace().collect();
        let first = words.first()?;
        Some(
            self.longest_known_prefix(&words)
                .unwrap_or_else(|| title_case(first)),
        )
    }

    fn longest_known_prefix(&self, words: &[&str]) -> Option<String> {
        (1..=words.len())
            .rev()
            .find_map(|n| self.vocabulary.canonical(&words[..n].join(" ")))
            .map(str::to_string)
    }
}

/// Best-effort display form for names missing from the vocabulary
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
