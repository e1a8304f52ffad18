use haul_core::{LookupService, Renderer};

/// Shared application state, available to all route handlers via `State<Arc<AppState<R>>>`.
pub struct AppState<R: Renderer> {
    pub service: LookupService<R>,
}

impl<R: Renderer> AppState<R> {
    pub fn new(service: LookupService<R>) -> Self {
        Self { service }
    }
}
