use std::sync::Arc;

use crate::transparency::TransparencyService;

/// Shared application state injected into all route handlers via Axum
/// extractors. Constructed once in `main`; nothing in it is mutable after
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TransparencyService>,
}
