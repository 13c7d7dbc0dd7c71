//! Menu dialogue engine
//!
//! Pure transitions over an explicit [`Session`](crate::session::Session):
//! each turn takes the current session and a classified turn and returns the
//! next session plus a content plan. Nothing here performs I/O.

mod engine;
pub mod greeting;
pub mod plan;
pub mod table;
pub(crate) mod transition;
pub mod turn;

#[cfg(test)]
mod proptests;

pub use engine::DialogueEngine;
pub use plan::{ContentItem, ContentPlan, ContentSource, ImageId, TemplateId};
pub use transition::{Outcome, TransitionResult};
pub use turn::InboundTurn;
