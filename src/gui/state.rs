use crate::core::api::Backend;

/// What every screen shares once the backend is connected.
#[derive(Debug)]
pub struct AppState {
    backend: Backend,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// A handle to move into a background task.
    pub fn api(&self) -> Backend {
        self.backend.clone()
    }
}
