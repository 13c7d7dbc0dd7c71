//! Pure turn transition
//!
//! Given the same session and turn, `transition` always returns the same
//! session and plan. It performs no I/O and never fails: malformed input
//! becomes an error re-prompt that leaves the user somewhere they can retry.

use super::plan::{ContentItem, ContentPlan, ImageId, OutboundContentSink, TemplateId};
use super::table;
use super::turn::InboundTurnReader;
use crate::session::{CaptureState, MenuState, Session, StateClass};
use crate::validate::{
    accept_email, first_name, validate_fixed_digit_code, validate_name, DigitCode, NameCheck,
    IMEI_LENGTH, NIP_LENGTH, PHONE_LENGTH,
};

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub session: Session,
    pub plan: ContentPlan,
    pub outcome: Outcome,
}

/// Why the engine produced this result, for logs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// New session with a greeting
    Started,
    /// Normal menu navigation or accepted data
    Advanced,
    /// Input rejected, user asked again
    Rejected,
    /// Goodbye, nothing changed
    Farewell,
    /// Selection state without an option: back to the main menu
    MissingOption,
    /// Stored state was not one the engine knows
    CorruptedState,
}

impl TransitionResult {
    pub(crate) fn new(session: Session, outcome: Outcome) -> Self {
        Self {
            session,
            plan: ContentPlan::new(),
            outcome,
        }
    }

    pub(crate) fn with_item(mut self, item: ContentItem) -> Self {
        self.plan.push(item);
        self
    }

    fn with_plan(mut self, plan: ContentPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Hand the plan to `sink` in order, keeping the session and outcome
    pub fn emit(self, sink: &mut dyn OutboundContentSink) -> (Session, Outcome) {
        for item in self.plan {
            sink.push(item);
        }
        (self.session, self.outcome)
    }
}

/// Main menu reached through recovery (missing option or corrupted state)
fn reset_to_main_menu(session: &Session, outcome: Outcome) -> TransitionResult {
    let session = session.clone().with_state(MenuState::MainMenu);
    TransitionResult::new(session, outcome).with_plan(table::main_menu_plan())
}

/// Process one turn against the current session
pub fn transition<R: InboundTurnReader + ?Sized>(session: &Session, turn: &R) -> TransitionResult {
    let selection = match session.state.classify() {
        StateClass::Unrecognized => {
            return reset_to_main_menu(session, Outcome::CorruptedState);
        }
        // Free text is data here, so a farewell intent is ignored
        StateClass::Capture(capture) => return capture_input(session, capture, turn.text()),
        StateClass::Selection(selection) => selection,
    };

    if turn.is_farewell() {
        return TransitionResult::new(session.clone(), Outcome::Farewell)
            .with_item(ContentItem::text(TemplateId::Farewell));
    }

    let Some(option) = turn.menu_option() else {
        return reset_to_main_menu(session, Outcome::MissingOption);
    };

    let route = table::route(selection, option);
    let outcome = if route.rejected {
        Outcome::Rejected
    } else {
        Outcome::Advanced
    };
    TransitionResult::new(session.clone().with_state(route.next), outcome).with_plan(route.plan())
}

/// Reply for a turn the upstream classifier could not place
pub fn fallback(session: &Session) -> TransitionResult {
    TransitionResult::new(session.clone(), Outcome::Rejected)
        .with_item(ContentItem::text(TemplateId::Fallback))
}

fn capture_input(session: &Session, state: CaptureState, text: &str) -> TransitionResult {
    match state {
        CaptureState::CaptureNip => capture_nip(session, text),
        CaptureState::ValidateImei => validate_imei(session, text),
        CaptureState::RegisterName => register_name(session, text),
        CaptureState::RegisterEmail => register_email(session, text),
        CaptureState::RegisterNumero => register_numero(session, text),
    }
}

fn rejected(session: &Session, item: ContentItem) -> TransitionResult {
    TransitionResult::new(session.clone(), Outcome::Rejected).with_item(item)
}

fn wrong_length(template: TemplateId, digits: String, actual: usize) -> ContentItem {
    ContentItem::text(template)
        .with("digits", digits)
        .with("count", actual.to_string())
}

fn capture_nip(session: &Session, text: &str) -> TransitionResult {
    match validate_fixed_digit_code(text, NIP_LENGTH) {
        DigitCode::Valid(nip) => {
            let mut next = session.clone().with_state(MenuState::ValidateImei);
            next.nip = Some(nip.clone());
            TransitionResult::new(next, Outcome::Advanced)
                .with_item(ContentItem::text(TemplateId::NipAccepted).with("nip", nip))
                .with_item(ContentItem::image(ImageId::HowToGetImei))
        }
        DigitCode::WrongLength { digits, actual } => rejected(
            session,
            wrong_length(TemplateId::NipWrongLength, digits, actual),
        ),
        DigitCode::NoDigits => rejected(session, ContentItem::text(TemplateId::NipNoDigits)),
    }
}

fn validate_imei(session: &Session, text: &str) -> TransitionResult {
    match validate_fixed_digit_code(text, IMEI_LENGTH) {
        DigitCode::Valid(imei) => {
            let mut next = session.clone().with_state(MenuState::EsimValidMenu);
            next.imei = Some(imei);
            let summary = ContentItem::text(TemplateId::ImeiSummary)
                .with_opt("carrier", next.carrier.as_deref())
                .with_opt("phone", next.phone_number.as_deref())
                .with_opt("nip", next.nip.as_deref())
                .with_opt("imei", next.imei.as_deref());
            TransitionResult::new(next, Outcome::Advanced).with_item(summary)
        }
        DigitCode::WrongLength { digits, actual } => rejected(
            session,
            wrong_length(TemplateId::ImeiWrongLength, digits, actual),
        ),
        DigitCode::NoDigits => rejected(session, ContentItem::text(TemplateId::ImeiNoDigits)),
    }
}

fn register_name(session: &Session, text: &str) -> TransitionResult {
    let name = match validate_name(text) {
        NameCheck::Valid(name) => name,
        NameCheck::Empty => return rejected(session, ContentItem::text(TemplateId::NameEmpty)),
        NameCheck::NumericOnly => {
            return rejected(session, ContentItem::text(TemplateId::NameNumericOnly));
        }
        NameCheck::NoLetters => {
            return rejected(session, ContentItem::text(TemplateId::NameNoLetters));
        }
    };

    let greeting = ContentItem::text(TemplateId::EmailRequest).with("first_name", first_name(&name));
    let mut next = session.clone().with_state(MenuState::RegisterEmail);
    next.full_name = Some(name);
    TransitionResult::new(next, Outcome::Advanced).with_item(greeting)
}

fn register_email(session: &Session, text: &str) -> TransitionResult {
    let mut next = session.clone().with_state(MenuState::RegisterNumero);
    next.email = Some(accept_email(text));
    TransitionResult::new(next, Outcome::Advanced)
        .with_item(ContentItem::text(TemplateId::NumberRequest))
}

fn register_numero(session: &Session, text: &str) -> TransitionResult {
    if text.trim() == "0" {
        let next = session.clone().with_state(MenuState::MainMenu);
        return TransitionResult::new(next, Outcome::Advanced).with_plan(table::main_menu_plan());
    }

    match validate_fixed_digit_code(text, PHONE_LENGTH) {
        DigitCode::Valid(phone) => {
            let mut next = session.clone().with_state(MenuState::MainMenu);
            next.phone_number = Some(phone);
            let summary = ContentItem::text(TemplateId::RegistrationComplete)
                .with_opt("full_name", next.full_name.as_deref())
                .with_opt("email", next.email.as_deref())
                .with_opt("phone", next.phone_number.as_deref())
                .with_opt("carrier", next.carrier.as_deref())
                .with_opt("nip", next.nip.as_deref())
                .with_opt("imei", next.imei.as_deref());
            TransitionResult::new(next, Outcome::Advanced).with_item(summary)
        }
        DigitCode::WrongLength { digits, actual } => rejected(
            session,
            wrong_length(TemplateId::NumberWrongLength, digits, actual),
        ),
        DigitCode::NoDigits => rejected(session, ContentItem::text(TemplateId::NumberNoDigits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::turn::InboundTurn;

    fn at(state: MenuState) -> Session {
        Session::started().with_state(state)
    }

    #[test]
    fn test_main_menu_portability() {
        let result = transition(&at(MenuState::MainMenu), &InboundTurn::from_option("1"));
        assert_eq!(result.session.state, MenuState::PortabilitySubmenu);
        assert!(result.plan.contains_image(ImageId::Portability3Steps));
        assert!(result.plan.contains_template(TemplateId::PortabilityMenu));
    }

    #[test]
    fn test_main_menu_invalid_has_error_prefix() {
        let result = transition(&at(MenuState::MainMenu), &InboundTurn::from_option("9"));
        assert_eq!(result.session.state, MenuState::MainMenu);
        assert_eq!(result.outcome, Outcome::Rejected);
        let templates: Vec<_> = result.plan.templates().collect();
        assert_eq!(
            templates,
            vec![TemplateId::InvalidMainOption, TemplateId::MainMenu]
        );
    }

    #[test]
    fn test_capture_nip_accepts_spaced_digits() {
        let result = transition(
            &at(MenuState::CaptureNip),
            &InboundTurn::from_text("Mi NIP es 98 76"),
        );
        assert_eq!(result.session.state, MenuState::ValidateImei);
        assert_eq!(result.session.nip.as_deref(), Some("9876"));
        assert_eq!(result.plan.items()[0].substitutions["nip"], "9876");
    }

    #[test]
    fn test_capture_nip_wrong_length_stays() {
        let session = at(MenuState::CaptureNip);
        let result = transition(&session, &InboundTurn::from_text("123"));
        assert_eq!(result.session, session);
        assert_eq!(result.outcome, Outcome::Rejected);
        let item = &result.plan.items()[0];
        assert_eq!(item.template_id(), Some(TemplateId::NipWrongLength));
        assert_eq!(item.substitutions["count"], "3");
    }

    #[test]
    fn test_capture_nip_no_digits() {
        let session = at(MenuState::CaptureNip);
        let result = transition(&session, &InboundTurn::from_text("no sé"));
        assert_eq!(result.session, session);
        assert!(result.plan.contains_template(TemplateId::NipNoDigits));
    }

    #[test]
    fn test_imei_wrong_length_stays() {
        let session = at(MenuState::ValidateImei);
        let result = transition(&session, &InboundTurn::from_text("12345"));
        assert_eq!(result.session.state, MenuState::ValidateImei);
        assert!(result.plan.contains_template(TemplateId::ImeiWrongLength));
    }

    #[test]
    fn test_imei_valid_summarizes_slots() {
        let mut session = at(MenuState::ValidateImei);
        session.carrier = Some("Telcel".to_string());
        session.nip = Some("4321".to_string());

        let result = transition(&session, &InboundTurn::from_text("352099001761481"));
        assert_eq!(result.session.state, MenuState::EsimValidMenu);
        assert_eq!(result.session.imei.as_deref(), Some("352099001761481"));

        let summary = &result.plan.items()[0];
        assert_eq!(summary.template_id(), Some(TemplateId::ImeiSummary));
        assert_eq!(summary.substitutions["carrier"], "Telcel");
        assert_eq!(summary.substitutions["nip"], "4321");
        assert!(!summary.substitutions.contains_key("phone"));
    }

    #[test]
    fn test_name_rejections() {
        let session = at(MenuState::RegisterName);
        for (text, template) in [
            ("  ", TemplateId::NameEmpty),
            ("12345", TemplateId::NameNumericOnly),
            ("-- --", TemplateId::NameNoLetters),
        ] {
            let result = transition(&session, &InboundTurn::from_text(text));
            assert_eq!(result.session, session, "{text:?}");
            assert!(result.plan.contains_template(template), "{text:?}");
        }
    }

    #[test]
    fn test_registration_flow() {
        let session = at(MenuState::RegisterName);
        let named = transition(&session, &InboundTurn::from_text(" Ana López "));
        assert_eq!(named.session.state, MenuState::RegisterEmail);
        assert_eq!(named.session.full_name.as_deref(), Some("Ana López"));
        assert_eq!(named.plan.items()[0].substitutions["first_name"], "Ana");

        let emailed = transition(&named.session, &InboundTurn::from_text(" ana(at)correo "));
        assert_eq!(emailed.session.state, MenuState::RegisterNumero);
        assert_eq!(emailed.session.email.as_deref(), Some("ana(at)correo"));

        let done = transition(&emailed.session, &InboundTurn::from_text("614 123 4567"));
        assert_eq!(done.session.state, MenuState::MainMenu);
        assert_eq!(done.session.phone_number.as_deref(), Some("6141234567"));
        assert!(done.plan.contains_template(TemplateId::RegistrationComplete));
    }

    #[test]
    fn test_register_numero_escape_and_errors() {
        let session = at(MenuState::RegisterNumero);

        let escaped = transition(&session, &InboundTurn::from_text(" 0 "));
        assert_eq!(escaped.session.state, MenuState::MainMenu);

        let short = transition(&session, &InboundTurn::from_text("61412"));
        assert_eq!(short.session.state, MenuState::RegisterNumero);
        assert!(short.plan.contains_template(TemplateId::NumberWrongLength));

        let none = transition(&session, &InboundTurn::from_text("no tengo"));
        assert_eq!(none.session.state, MenuState::RegisterNumero);
        assert!(none.plan.contains_template(TemplateId::NumberNoDigits));
    }

    #[test]
    fn test_farewell_in_selection_state() {
        let session = at(MenuState::PortabilitySubmenu);
        let turn = InboundTurn::from_text("adiós").with_intent("despedida");
        let result = transition(&session, &turn);
        assert_eq!(result.session, session);
        assert_eq!(result.outcome, Outcome::Farewell);
        assert!(result.plan.contains_template(TemplateId::Farewell));
    }

    #[test]
    fn test_farewell_ignored_in_capture_state() {
        let session = at(MenuState::RegisterEmail);
        let turn = InboundTurn::from_text("adios@correo.mx").with_intent("despedida");
        let result = transition(&session, &turn);
        assert_eq!(result.session.state, MenuState::RegisterNumero);
        assert_eq!(result.session.email.as_deref(), Some("adios@correo.mx"));
    }

    #[test]
    fn test_missing_option_resets() {
        let result = transition(
            &at(MenuState::NipSubmenu),
            &InboundTurn::from_text("quiero mi nip"),
        );
        assert_eq!(result.session.state, MenuState::MainMenu);
        assert_eq!(result.outcome, Outcome::MissingOption);
        assert!(result.plan.contains_template(TemplateId::MainMenu));
        assert!(!result.plan.contains_template(TemplateId::InvalidMainOption));
    }

    #[test]
    fn test_corrupted_state_resets_even_with_option() {
        let result = transition(
            &at(MenuState::Unrecognized),
            &InboundTurn::from_option("1"),
        );
        assert_eq!(result.session.state, MenuState::MainMenu);
        assert_eq!(result.outcome, Outcome::CorruptedState);
    }

    #[test]
    fn test_support_repeats_until_back() {
        let session = at(MenuState::SupportSubmenu);
        let again = transition(&session, &InboundTurn::from_option("7"));
        assert_eq!(again.session.state, MenuState::SupportSubmenu);
        assert!(again.plan.contains_template(TemplateId::Support));

        let back = transition(&session, &InboundTurn::from_option("0"));
        assert_eq!(back.session.state, MenuState::MainMenu);
    }

    #[test]
    fn test_fallback_keeps_session() {
        let session = at(MenuState::NipSubmenu);
        let result = fallback(&session);
        assert_eq!(result.session, session);
        assert!(result.plan.contains_template(TemplateId::Fallback));
    }
}
