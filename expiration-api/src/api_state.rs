use std::sync::Arc;

use axum::extract::FromRef;
use common::expirations::ExpirationStore;

#[derive(Clone, FromRef)]
pub struct ExpirationApiState {
    pub store: Arc<dyn ExpirationStore>,
}

impl ExpirationApiState {
    pub fn new(store: Arc<dyn ExpirationStore>) -> Self {
        Self { store }
    }
}
