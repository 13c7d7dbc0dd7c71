//! HTTP API for the Spotty dialogue controller

mod handlers;
mod types;
pub mod webhook;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::render::Renderer;
use crate::runtime::DialogueRuntime;
use crate::session::SessionStore;
use std::sync::Arc;

pub type SharedRuntime = DialogueRuntime<Arc<dyn SessionStore>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<SharedRuntime>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(runtime: SharedRuntime, renderer: Renderer) -> Self {
        Self {
            runtime: Arc::new(runtime),
            renderer: Arc::new(renderer),
        }
    }
}
