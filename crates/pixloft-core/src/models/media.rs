use serde::{Deserialize, Serialize};

/// One uploaded image as the gallery sees it.
///
/// `id` is the opaque file id assigned by the store on upload; metadata
/// documents reference it through their `fileId` attribute, so it is the
/// dedup key everywhere. The share URL is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub owner_id: String,
    pub display_name: String,
}

impl MediaItem {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Share link pointing at the image proxy, not at the store.
    pub fn url(&self, public_base_url: &str) -> String {
        format!(
            "{}/image/{}",
            public_base_url.trim_end_matches('/'),
            self.id
        )
    }
}

/// Wire payload of a media metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
}

impl MediaRecord {
    /// Map a metadata document back to the gallery item it describes.
    /// The item is keyed by the file id, not the document id.
    pub fn into_item(self) -> MediaItem {
        MediaItem {
            id: self.file_id,
            owner_id: self.user_id,
            display_name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_record_wire_names() {
        let record = MediaRecord {
            file_id: "f1".to_string(),
            user_id: "u1".to_string(),
            name: "sunset".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileId"], "f1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["name"], "sunset");
    }

    #[test]
    fn test_record_maps_to_item_keyed_by_file_id() {
        let record: MediaRecord =
            serde_json::from_str(r#"{"fileId":"f9","userId":"u1","name":"dog"}"#).unwrap();
        let item = record.into_item();
        assert_eq!(item.id, "f9");
        assert_eq!(item.owner_id, "u1");
        assert_eq!(item.display_name, "dog");
    }

    #[test]
    fn test_share_url_targets_proxy() {
        let item = MediaItem::new("f9", "u1", "dog");
        assert_eq!(item.url("http://localhost:5000"), "http://localhost:5000/image/f9");
        assert_eq!(item.url("https://pix.example.com/"), "https://pix.example.com/image/f9");
    }
}
