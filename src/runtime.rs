//! Runtime for executing dialogue turns
//!
//! Loads the session for a conversation, runs one engine step, saves the
//! result. Turns for the same conversation are serialized; distinct
//! conversations run concurrently.
//!
//! The lock table only holds conversations with a turn in flight. An entry is
//! dropped when its last holder releases it, so the table does not grow with
//! the number of conversations seen.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::session::{MenuState, Session, SessionStore, StoreError};
use crate::state_machine::{ContentPlan, DialogueEngine, InboundTurn, Outcome, TransitionResult};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What one turn produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub session: Session,
    pub plan: ContentPlan,
    #[serde(skip)]
    pub outcome: Outcome,
}

impl From<TransitionResult> for TurnOutcome {
    fn from(result: TransitionResult) -> Self {
        Self {
            session: result.session,
            plan: result.plan,
            outcome: result.outcome,
        }
    }
}

/// How a turn should be dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnKind {
    Normal,
    Restart,
    Fallback,
}

type ConversationLock = Arc<Mutex<()>>;

pub struct DialogueRuntime<S: SessionStore> {
    engine: DialogueEngine,
    store: S,
    locks: RwLock<HashMap<String, ConversationLock>>,
}

impl<S: SessionStore> DialogueRuntime<S> {
    pub fn new(engine: DialogueEngine, store: S) -> Self {
        Self {
            engine,
            store,
            locks: RwLock::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process a turn. The first turn of an unknown conversation starts a session.
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        turn: &InboundTurn,
    ) -> Result<TurnOutcome, RuntimeError> {
        self.run(conversation_id, turn, TurnKind::Normal).await
    }

    /// Start over regardless of any stored session
    pub async fn restart(
        &self,
        conversation_id: &str,
        turn: &InboundTurn,
    ) -> Result<TurnOutcome, RuntimeError> {
        self.run(conversation_id, turn, TurnKind::Restart).await
    }

    /// Reply to a turn the classifier could not place
    pub async fn handle_fallback(
        &self,
        conversation_id: &str,
        turn: &InboundTurn,
    ) -> Result<TurnOutcome, RuntimeError> {
        self.run(conversation_id, turn, TurnKind::Fallback).await
    }

    /// Drop a conversation's stored session
    pub async fn forget(&self, conversation_id: &str) -> Result<(), RuntimeError> {
        let lock = self.lock_for(conversation_id).await;
        let removed = {
            let _guard = lock.lock().await;
            self.store.remove(conversation_id).await
        };
        self.release(conversation_id, lock).await;
        removed?;
        Ok(())
    }

    async fn lock_for(&self, conversation_id: &str) -> ConversationLock {
        if let Some(lock) = self.locks.read().await.get(conversation_id) {
            return lock.clone();
        }
        self.locks
            .write()
            .await
            .entry(conversation_id.to_string())
            .or_default()
            .clone()
    }

    /// Give back a lock from `lock_for`, pruning the entry if nobody else holds it.
    ///
    /// Clones are only handed out under the table lock, so the count seen here
    /// is exact: the table's copy plus ours means no task is waiting.
    async fn release(&self, conversation_id: &str, lock: ConversationLock) {
        let mut locks = self.locks.write().await;
        let ours = locks
            .get(conversation_id)
            .is_some_and(|entry| Arc::ptr_eq(entry, &lock));
        if ours && Arc::strong_count(&lock) == 2 {
            locks.remove(conversation_id);
        }
    }

    async fn load(&self, conversation_id: &str) -> Result<Option<Session>, RuntimeError> {
        match self.store.load(conversation_id).await {
            Ok(session) => Ok(session),
            Err(StoreError::Corrupt { message, .. }) => {
                tracing::warn!(conversation_id, %message, "Unreadable session, resetting");
                Ok(Some(Session::started().with_state(MenuState::Unrecognized)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn run(
        &self,
        conversation_id: &str,
        turn: &InboundTurn,
        kind: TurnKind,
    ) -> Result<TurnOutcome, RuntimeError> {
        let lock = self.lock_for(conversation_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.step(conversation_id, turn, kind).await
        };
        self.release(conversation_id, lock).await;
        result
    }

    async fn step(
        &self,
        conversation_id: &str,
        turn: &InboundTurn,
        kind: TurnKind,
    ) -> Result<TurnOutcome, RuntimeError> {
        let stored = match kind {
            TurnKind::Restart => None,
            TurnKind::Normal | TurnKind::Fallback => self.load(conversation_id).await?,
        };

        let result = match (stored, kind) {
            (Some(session), TurnKind::Fallback) => self.engine.fallback(&session),
            (Some(session), _) if session.session_started => {
                self.engine.process_turn(&session, turn)
            }
            _ => self.engine.start(turn),
        };

        self.store.save(conversation_id, &result.session).await?;
        tracing::info!(
            conversation_id,
            state = %result.session.state,
            outcome = ?result.outcome,
            messages = result.plan.items().len(),
            "Turn complete"
        );
        Ok(result.into())
    }

    #[cfg(test)]
    async fn tracked_locks(&self) -> usize {
        self.locks.read().await.len()
    }
}
