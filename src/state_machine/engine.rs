//! Engine facade used by the runtime and the HTTP layer

use std::sync::Arc;

use super::greeting::start_session;
use super::plan::OutboundContentSink;
use super::transition::{fallback, transition, Outcome, TransitionResult};
use super::turn::InboundTurnReader;
use crate::carrier::CarrierExtractor;
use crate::session::Session;

/// Menu dialogue engine. Cheap to clone; holds only the compiled extractor.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    extractor: Arc<CarrierExtractor>,
}

impl DialogueEngine {
    pub fn new(extractor: Arc<CarrierExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &CarrierExtractor {
        &self.extractor
    }

    /// Start a new session from the initiating turn
    pub fn start(&self, turn: &dyn InboundTurnReader) -> TransitionResult {
        let result = start_session(&self.extractor, turn);
        tracing::info!(
            carrier = ?result.session.carrier,
            personalized = result.session.carrier.is_some(),
            "Session started"
        );
        result
    }

    /// Run one turn against an existing session
    pub fn process_turn(&self, session: &Session, turn: &dyn InboundTurnReader) -> TransitionResult {
        let result = transition(session, turn);
        tracing::debug!(
            state = %session.state,
            next_state = %result.session.state,
            option = ?turn.selected_option(),
            outcome = ?result.outcome,
            "Turn processed"
        );
        result
    }

    /// Sink-based variant: pushes the plan into `sink` and returns the new session
    pub fn process(
        &self,
        session: &Session,
        turn: &dyn InboundTurnReader,
        sink: &mut dyn OutboundContentSink,
    ) -> (Session, Outcome) {
        self.process_turn(session, turn).emit(sink)
    }

    pub fn fallback(&self, session: &Session) -> TransitionResult {
        fallback(session)
    }
}
