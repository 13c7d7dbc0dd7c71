//! Property-based tests for the dialogue engine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::plan::{ImageId, TemplateId};
use super::table::route;
use super::transition::*;
use super::turn::{InboundTurn, MenuOption};
use super::*;
use crate::carrier::{CarrierExtractor, Vocabulary};
use crate::session::{MenuState, SelectionState, Session, StateClass};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_extractor() -> CarrierExtractor {
    CarrierExtractor::new(Vocabulary::bundled().unwrap()).unwrap()
}

fn is_selection(state: MenuState) -> bool {
    matches!(state.classify(), StateClass::Selection(_))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = MenuState> {
    prop_oneof![
        proptest::sample::select(MenuState::ALL.to_vec()),
        Just(MenuState::Unrecognized),
    ]
}

fn arb_selection_state() -> impl Strategy<Value = SelectionState> {
    proptest::sample::select(MenuState::ALL.to_vec()).prop_filter_map(
        "selection states only",
        |s| match s.classify() {
            StateClass::Selection(sel) => Some(sel),
            _ => None,
        },
    )
}

fn arb_slot() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 ]{1,15}")
}

fn arb_session() -> impl Strategy<Value = Session> {
    (
        arb_state(),
        arb_slot(),
        arb_slot(),
        arb_slot(),
        arb_slot(),
        arb_slot(),
        arb_slot(),
    )
        .prop_map(|(state, carrier, phone_number, nip, imei, full_name, email)| Session {
            state,
            carrier,
            phone_number,
            nip,
            imei,
            full_name,
            email,
            session_started: true,
        })
}

fn arb_option() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        "[0-4]".prop_map(String::from),
        "[0-9]{1,3}",
        "[a-z ]{0,6}",
        Just("1\u{FE0F}\u{20E3}".to_string()),
    ])
}

fn arb_intent() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("despedida".to_string()),
        Just("elegir_opcion".to_string()),
        Just("saludo".to_string()),
    ])
}

fn arb_turn() -> impl Strategy<Value = InboundTurn> {
    ("[a-zA-Z0-9 @.]{0,30}", arb_option(), arb_intent()).prop_map(
        |(text, selected_option, intent_tag)| InboundTurn {
            text,
            selected_option,
            intent_tag,
            recent_history: vec![],
        },
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig { max_global_rejects: 10_000, ..ProptestConfig::with_cases(1000) })]

    // Invariant 1: Same session and turn always give the same result
    #[test]
    fn prop_transition_is_deterministic(session in arb_session(), turn in arb_turn()) {
        let first = transition(&session, &turn);
        let second = transition(&session, &turn);
        prop_assert_eq!(first, second);
    }

    // Invariant 2: The engine never produces a state outside the enumerated set
    #[test]
    fn prop_next_state_is_valid(session in arb_session(), turns in proptest::collection::vec(arb_turn(), 1..15)) {
        let mut session = session;
        for turn in &turns {
            let result = transition(&session, turn);
            prop_assert_ne!(result.session.state, MenuState::Unrecognized);
            prop_assert!(!result.plan.is_empty(), "Empty plan for {:?}", turn);
            session = result.session;
        }
    }

    // Invariant 3: Invalid options leave the session untouched, repeatably
    #[test]
    fn prop_invalid_option_is_idempotent(state in arb_selection_state(), raw in "[5-9]|[0-9]{2,3}|[a-z]{1,4}") {
        let session = Session::started().with_state(MenuState::from(state));
        let turn = InboundTurn::from_option(raw);

        let once = transition(&session, &turn);
        let twice = transition(&once.session, &turn);
        prop_assert_eq!(&once.session, &session);
        prop_assert_eq!(once.session, twice.session);
        prop_assert_eq!(once.plan, twice.plan);
    }

    // Invariant 4: Farewell never mutates a session outside free-text states
    #[test]
    fn prop_farewell_leaves_session_unchanged(session in arb_session(), option in arb_option()) {
        prop_assume!(is_selection(session.state));
        let turn = InboundTurn {
            text: "adiós".to_string(),
            selected_option: option,
            intent_tag: Some("despedida".to_string()),
            recent_history: vec![],
        };
        let result = transition(&session, &turn);
        prop_assert_eq!(result.session, session);
        prop_assert_eq!(result.outcome, Outcome::Farewell);
        prop_assert_eq!(result.plan.templates().collect::<Vec<_>>(), vec![TemplateId::Farewell]);
    }

    // Invariant 5: "0" returns every selection state to the main menu
    #[test]
    fn prop_back_reaches_main_menu(state in arb_selection_state()) {
        let session = Session::started().with_state(MenuState::from(state));
        let result = transition(&session, &InboundTurn::from_option("0"));
        prop_assert_eq!(result.session.state, MenuState::MainMenu);
    }

    // Invariant 6: Wrong digit counts keep the capture state and slots
    #[test]
    fn prop_wrong_length_keeps_capture_state(
        state in proptest::sample::select(vec![
            MenuState::CaptureNip,
            MenuState::ValidateImei,
            MenuState::RegisterNumero,
        ]),
        digits in "[1-9][0-9]{0,19}",
    ) {
        let expected = match state {
            MenuState::CaptureNip => 4,
            MenuState::ValidateImei => 15,
            _ => 10,
        };
        prop_assume!(digits.len() != expected);

        let session = Session::started().with_state(state);
        let result = transition(&session, &InboundTurn::from_text(format!("x{digits}y")));
        prop_assert_eq!(result.session, session);
        prop_assert_eq!(result.outcome, Outcome::Rejected);

        let count = digits.len().to_string();
        let item = &result.plan.items()[0];
        prop_assert_eq!(item.substitutions.get("digits"), Some(&digits));
        prop_assert_eq!(item.substitutions.get("count"), Some(&count));
    }

    // Invariant 7: Corrupted state always resets, whatever the turn
    #[test]
    fn prop_corrupted_state_resets(turn in arb_turn()) {
        let session = Session::started().with_state(MenuState::Unrecognized);
        let result = transition(&session, &turn);
        prop_assert_eq!(result.session.state, MenuState::MainMenu);
        prop_assert_eq!(result.outcome, Outcome::CorruptedState);
    }

    // Invariant 8: The route table agrees with the engine for every option
    #[test]
    fn prop_engine_follows_table(state in arb_selection_state(), option in proptest::sample::select(MenuOption::ALL.to_vec())) {
        prop_assume!(option != MenuOption::Invalid);
        let session = Session::started().with_state(MenuState::from(state));
        let result = transition(&session, &InboundTurn::from_option(option.as_str()));
        let expected = route(state, option);
        prop_assert_eq!(result.session.state, expected.next);
        prop_assert_eq!(result.plan, expected.plan());
    }
}

// ============================================================================
// Sequence Tests - Multi-Step Scenarios
// ============================================================================

/// Session start without a detection tag
#[test]
fn test_start_without_detection() {
    let result = greeting::start_session(&test_extractor(), &InboundTurn::from_text("hola"));
    assert_eq!(result.session.state, MenuState::MainMenu);
    assert!(result.session.session_started);
    assert_eq!(result.session.carrier, None);
    assert!(result.plan.contains_template(TemplateId::GreetingGeneric));
    assert!(!result.plan.contains_template(TemplateId::GreetingPersonalized));
}

/// Main menu option 1 opens portability with its image
#[test]
fn test_main_menu_to_portability() {
    let result = transition(&Session::started(), &InboundTurn::from_option("1"));
    assert_eq!(result.session.state, MenuState::PortabilitySubmenu);
    assert!(result.plan.contains_image(ImageId::Portability3Steps));
    assert!(result.plan.templates().count() >= 1);
}

/// NIP capture strips separators
#[test]
fn test_nip_capture_with_spaces() {
    let session = Session::started().with_state(MenuState::CaptureNip);
    let result = transition(&session, &InboundTurn::from_text("Mi NIP es 98 76"));
    assert_eq!(result.session.state, MenuState::ValidateImei);
    assert_eq!(result.session.nip.as_deref(), Some("9876"));
}

/// Short IMEI is rejected in place
#[test]
fn test_short_imei_rejected() {
    let session = Session::started().with_state(MenuState::ValidateImei);
    let result = transition(&session, &InboundTurn::from_text("12345"));
    assert_eq!(result.session.state, MenuState::ValidateImei);
    assert!(result.plan.contains_template(TemplateId::ImeiWrongLength));
}

/// Farewell from every selection-driven state
#[test]
fn test_farewell_everywhere() {
    for state in MenuState::ALL.into_iter().filter(|s| is_selection(*s)) {
        let session = Session::started().with_state(state);
        let turn = InboundTurn::from_text("bye").with_intent("goodbye");
        let result = transition(&session, &turn);
        assert_eq!(result.session, session, "{state}");
        assert!(result.plan.contains_template(TemplateId::Farewell));
    }
}

/// Full portability journey from the tagged greeting to registration
#[test]
fn test_full_portability_journey() {
    let extractor = test_extractor();
    let start = greeting::start_session(
        &extractor,
        &InboundTurn::from_text("OPERATOR AT&T NUMERO 6344817289"),
    );
    let mut session = start.session;
    assert_eq!(session.carrier.as_deref(), Some("AT&T"));

    let steps: [(InboundTurn, MenuState); 9] = [
        (InboundTurn::from_option("1"), MenuState::PortabilitySubmenu),
        (InboundTurn::from_option("1"), MenuState::NipSubmenu),
        (InboundTurn::from_option("1"), MenuState::CaptureNip),
        (InboundTurn::from_text("1234"), MenuState::ValidateImei),
        (InboundTurn::from_text("35 209900 176148 1"), MenuState::EsimValidMenu),
        (InboundTurn::from_option("1"), MenuState::RegisterName),
        (InboundTurn::from_text("Ana María López"), MenuState::RegisterEmail),
        (InboundTurn::from_text("ana@example.com"), MenuState::RegisterNumero),
        (InboundTurn::from_text("614-123-4567"), MenuState::MainMenu),
    ];

    for (turn, expected) in steps {
        let result = transition(&session, &turn);
        assert_eq!(result.session.state, expected, "after {:?}", turn.text);
        session = result.session;
    }

    assert_eq!(session.nip.as_deref(), Some("1234"));
    assert_eq!(session.imei.as_deref(), Some("352099001761481"));
    assert_eq!(session.full_name.as_deref(), Some("Ana María López"));
    assert_eq!(session.email.as_deref(), Some("ana@example.com"));
    assert_eq!(session.phone_number.as_deref(), Some("6141234567"));
    assert_eq!(session.carrier.as_deref(), Some("AT&T"));
}

// ============================================================================
// Unit Tests for Edge Cases
// ============================================================================

#[test]
fn test_main_menu_option_four_is_error() {
    let result = transition(&Session::started(), &InboundTurn::from_option("4"));
    assert_eq!(result.session.state, MenuState::MainMenu);
    assert_eq!(result.outcome, Outcome::Rejected);
}

#[test]
fn test_keycap_option_accepted() {
    let result = transition(&Session::started(), &InboundTurn::from_option("2\u{FE0F}\u{20E3}"));
    assert_eq!(result.session.state, MenuState::PackagesSubmenu);
}

#[test]
fn test_zero_in_capture_nip_is_not_escape() {
    let session = Session::started().with_state(MenuState::CaptureNip);
    let result = transition(&session, &InboundTurn::from_option("0"));
    assert_eq!(result.session.state, MenuState::CaptureNip);
    assert!(result.plan.contains_template(TemplateId::NipWrongLength));
}
