//! Application state shared across handlers.

use pixloft_core::Config;
use pixloft_store::StoreClient;

/// State shared by every handler. The store client carries its own
/// connection pool, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: StoreClient,
}

impl AppState {
    pub fn new(config: Config, store: StoreClient) -> Self {
        Self { config, store }
    }
}
