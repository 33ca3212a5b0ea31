//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::user::AuthService;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
        }
    }
}
