//! Session start
//!
//! The messaging bridge often opens a conversation with a tagged line such as
//! `OPERATOR AT&T NUMERO 6344817289`. When a carrier is found the greeting is
//! personalized; otherwise the generic one is used. Either way the session
//! starts from scratch at the main menu.

use super::plan::{ContentItem, ImageId, TemplateId};
use super::table;
use super::transition::{Outcome, TransitionResult};
use super::turn::InboundTurnReader;
use crate::carrier::{CarrierExtractor, Detection};
use crate::session::Session;

/// Where the carrier came from, for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    InitiatingText,
    /// Index into `recent_history`
    History(usize),
    None,
}

/// Find carrier and phone for a new session.
///
/// The initiating text is tried with every extractor rule. History is only
/// trusted for structured tags, newest entry first.
pub fn detect<R: InboundTurnReader + ?Sized>(
    extractor: &CarrierExtractor,
    turn: &R,
) -> (Detection, DetectionSource) {
    let initial = extractor.extract_detection(turn.text());
    if initial.carrier.is_some() {
        return (initial, DetectionSource::InitiatingText);
    }

    let history = turn.recent_history();
    for (index, entry) in history.iter().enumerate().rev() {
        if let Some(carrier) = extractor.extract_tagged_carrier(entry) {
            let detection = Detection {
                carrier: Some(carrier),
                phone: extractor.extract_phone(entry),
            };
            return (detection, DetectionSource::History(index));
        }
    }

    (initial, DetectionSource::None)
}

/// Begin a conversation: reset slots, greet, show the main menu
pub fn start_session<R: InboundTurnReader + ?Sized>(
    extractor: &CarrierExtractor,
    turn: &R,
) -> TransitionResult {
    let (detection, source) = detect(extractor, turn);
    tracing::debug!(?source, carrier = ?detection.carrier, "Session start detection");

    let mut session = Session::started();
    session.phone_number = detection.phone;

    let greeting = match detection.carrier.as_deref() {
        Some(carrier) => ContentItem::text(TemplateId::GreetingPersonalized).with("carrier", carrier),
        None => ContentItem::text(TemplateId::GreetingGeneric),
    };
    session.carrier = detection.carrier;

    let mut result = TransitionResult::new(session, Outcome::Started)
        .with_item(ContentItem::image(ImageId::Welcome))
        .with_item(greeting);
    for item in table::main_menu_plan() {
        result = result.with_item(item);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::Vocabulary;
    use crate::session::MenuState;
    use crate::state_machine::turn::InboundTurn;

    fn extractor() -> CarrierExtractor {
        CarrierExtractor::new(Vocabulary::bundled().unwrap()).unwrap()
    }

    #[test]
    fn test_operator_tag_personalizes() {
        let result = start_session(
            &extractor(),
            &InboundTurn::from_text("OPERATOR AT&T NUMERO 6344817289"),
        );
        assert_eq!(result.session.state, MenuState::MainMenu);
        assert!(result.session.session_started);
        assert_eq!(result.session.carrier.as_deref(), Some("AT&T"));
        assert_eq!(result.session.phone_number.as_deref(), Some("6344817289"));

        let items = result.plan.items();
        assert_eq!(items[0].image_id(), Some(ImageId::Welcome));
        assert_eq!(items[1].template_id(), Some(TemplateId::GreetingPersonalized));
        assert_eq!(items[1].substitutions["carrier"], "AT&T");
        assert_eq!(items[2].template_id(), Some(TemplateId::MainMenu));
    }

    #[test]
    fn test_bare_carrier_name() {
        let result = start_session(&extractor(), &InboundTurn::from_text("Spot Uno"));
        assert_eq!(result.session.carrier.as_deref(), Some("Spot Uno"));
        assert!(result.plan.contains_template(TemplateId::GreetingPersonalized));
    }

    #[test]
    fn test_generic_greeting_without_carrier() {
        let result = start_session(&extractor(), &InboundTurn::from_text("hola"));
        assert_eq!(result.session.carrier, None);
        assert!(result.plan.contains_template(TemplateId::GreetingGeneric));
        assert!(result.plan.contains_image(ImageId::Welcome));
    }

    #[test]
    fn test_history_newest_tag_wins() {
        let turn = InboundTurn::from_text("hola").with_history(vec![
            "COMPANIA_DETECTADA Telcel".to_string(),
            "me gusta bait".to_string(),
            "COMPANIA_DETECTADA Movistar".to_string(),
            "buenas".to_string(),
        ]);
        let (detection, source) = detect(&extractor(), &turn);
        assert_eq!(detection.carrier.as_deref(), Some("Movistar"));
        assert_eq!(source, DetectionSource::History(2));
    }

    #[test]
    fn test_history_ignores_untagged_mentions() {
        let turn = InboundTurn::from_text("hola").with_history(vec!["uso telcel".to_string()]);
        let result = start_session(&extractor(), &turn);
        assert_eq!(result.session.carrier, None);
        assert!(result.plan.contains_template(TemplateId::GreetingGeneric));
    }

    #[test]
    fn test_start_resets_previous_slots() {
        let result = start_session(&extractor(), &InboundTurn::from_text("hola"));
        assert_eq!(result.session, Session::started());
    }
}
