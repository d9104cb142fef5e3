pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::artifacts::ServingContext;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ServingContext>,
}

impl AppState {
    pub fn new(context: ServingContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}
