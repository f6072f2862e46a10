use serde::{Deserialize, Serialize};

/// The authenticated user as the store's account endpoint reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_parses_store_shape() {
        let account: Account = serde_json::from_str(
            r#"{"$id":"u42","name":"Ada","email":"ada@example.com","status":true}"#,
        )
        .unwrap();
        assert_eq!(account.id, "u42");
        assert_eq!(account.name, "Ada");
        assert_eq!(account.email, "ada@example.com");
    }
}
