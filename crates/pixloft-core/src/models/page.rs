use serde::{Deserialize, Serialize};

/// Transient cursor driving the next page fetch. Never persisted.
///
/// The offset only ever advances in units of `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub owner_id: String,
    pub limit: usize,
    pub offset: usize,
}

impl PageCursor {
    pub fn first(owner_id: impl Into<String>, limit: usize) -> Self {
        Self {
            owner_id: owner_id.into(),
            limit,
            offset: 0,
        }
    }

    pub fn advance(&mut self) {
        self.offset += self.limit;
    }
}
