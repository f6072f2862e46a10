use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A text post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub slug: String,
}

/// Input for creating a post. Timestamp and slug are filled in by the flow.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Partial update; only the provided fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Wire payload of a post document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub slug: String,
}

impl PostRecord {
    pub fn into_post(self, document_id: String) -> Post {
        Post {
            id: document_id,
            title: self.title,
            content: self.content,
            owner_id: self.user_id,
            created_at: self.created_at,
            slug: self.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_record_wire_names() {
        let record = PostRecord {
            title: "Hello".to_string(),
            content: "world".to_string(),
            user_id: "u1".to_string(),
            created_at: "2024-03-01T10:00:00Z".parse().unwrap(),
            slug: "abc123".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["createdAt"], "2024-03-01T10:00:00Z");
        assert_eq!(json["slug"], "abc123");
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = PostPatch {
            title: Some("New title".to_string()),
            content: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "New title");
        assert!(json.get("content").is_none());
    }
}
