//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the palace store, the LLM provider registry and the pixel layout
//! used by the geometry routes. All fields are cheap to clone.

use std::sync::Arc;

use palace::Layout;

use crate::llm::LlmRegistry;
use crate::services::persistence::PalaceStore;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PalaceStore>,
    /// Providers with credentials. Empty if no API keys are set.
    pub llm: LlmRegistry,
    pub layout: Layout,
}

impl AppState {
    #[must_use]
    pub fn new(store: PalaceStore, llm: LlmRegistry) -> Self {
        Self { store: Arc::new(store), llm, layout: Layout::default() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
