//! Store identifiers.

use std::fmt;

/// Length of client-minted ids, matching the store's own id format.
const GENERATED_ID_LEN: usize = 20;

/// An id to use when creating a file or document.
///
/// `unique()` is the store's sentinel asking it to mint the id server-side;
/// `generate()` mints a store-style id client-side (used for slugs and other
/// attributes that need a concrete value before the create call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreId(String);

impl StoreId {
    /// Sentinel: the store assigns the id on create.
    pub fn unique() -> Self {
        Self("unique()".to_string())
    }

    /// Client-minted 20-char lowercase hex id.
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..GENERATED_ID_LEN].to_string())
    }

    pub fn custom(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
