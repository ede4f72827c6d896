use std::sync::Arc;

use crate::auth::{CredentialHasher, TokenCodec};
use crate::database::UserStore;

/// Shared, read-only per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub hasher: Arc<CredentialHasher>,
    pub store: Arc<dyn UserStore>,
    pub audit_logging: bool,
}

impl AppState {
    pub fn new(codec: TokenCodec, hasher: CredentialHasher, store: Arc<dyn UserStore>) -> Self {
        Self {
            codec: Arc::new(codec),
            hasher: Arc::new(hasher),
            store,
            audit_logging: false,
        }
    }

    pub fn with_audit_logging(mut self, enabled: bool) -> Self {
        self.audit_logging = enabled;
        self
    }
}
