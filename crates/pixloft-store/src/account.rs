//! Account endpoint.

use pixloft_core::models::Account;

use crate::{StoreClient, StoreResult};

impl StoreClient {
    /// The currently authenticated account. Anonymous callers get a
    /// `PermissionDenied` error from the store.
    pub async fn get_account(&self) -> StoreResult<Account> {
        self.get_json("/account", &[]).await
    }
}
