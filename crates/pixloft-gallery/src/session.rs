//! Account session tracking.
//!
//! The session starts in `Loading` until one `initialize` call has asked
//! the store who the current account is. A rejected credential check means
//! the caller is anonymous, not that something went wrong; transport
//! failures also land in `Anonymous` so dependent features degrade instead
//! of blocking forever on an unknown state.

use pixloft_core::models::Account;
use pixloft_store::{StoreClient, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready(Account),
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn account(&self) -> Option<&Account> {
        match &self.state {
            SessionState::Ready(account) => Some(account),
            _ => None,
        }
    }

    /// Id of the signed-in account, if any.
    pub fn owner_id(&self) -> Option<&str> {
        self.account().map(|account| account.id.as_str())
    }

    /// Resolve the current account once.
    #[tracing::instrument(skip(self, store))]
    pub async fn initialize(&mut self, store: &StoreClient) -> &SessionState {
        match store.get_account().await {
            Ok(account) => {
                tracing::debug!(account_id = %account.id, "session ready");
                self.state = SessionState::Ready(account);
            }
            Err(StoreError::PermissionDenied(_)) => {
                tracing::debug!("no active session, continuing anonymously");
                self.state = SessionState::Anonymous;
            }
            Err(err) => {
                tracing::warn!(error = %err, "account lookup failed, continuing anonymously");
                self.state = SessionState::Anonymous;
            }
        }
        &self.state
    }

    /// Forget the current account.
    pub fn teardown(&mut self) {
        self.state = SessionState::Anonymous;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new();
        assert!(session.is_loading());
        assert!(session.owner_id().is_none());
    }

    #[test]
    fn test_teardown_goes_anonymous() {
        let mut session = Session::new();
        session.teardown();
        assert_eq!(*session.state(), SessionState::Anonymous);
    }
}
