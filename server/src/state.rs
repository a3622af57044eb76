//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the identity backend behind a trait object so tests can swap in a
//! scripted one.

use std::sync::Arc;

use crate::backend::IdentityBackend;
use crate::services::registration::OrphanPolicy;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn IdentityBackend>,
    pub orphan_policy: OrphanPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn IdentityBackend>, orphan_policy: OrphanPolicy) -> Self {
        Self { backend, orphan_policy }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
