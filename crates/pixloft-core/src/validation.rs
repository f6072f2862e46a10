//! Client-side validation for uploads and post input.
//!
//! Every check here runs before any network call is made; a validation
//! failure means the store is never contacted for that action.

/// Default upload ceiling (5 MiB).
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Display names are truncated to this many characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// Validation errors surfaced directly to the user.
///
/// Display strings are the exact user-facing messages; the struct fields
/// carry the offending values for logs and tests.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please upload an image file")]
    NotAnImage { content_type: String },

    #[error("File size should be less than 5MB")]
    FileTooLarge { size: usize, max: usize },

    #[error("Please select a file to upload")]
    EmptyFile,

    #[error("Please enter a name for the image")]
    EmptyDisplayName,

    #[error("Please enter a title for the post")]
    EmptyTitle,

    #[error("Please enter some content for the post")]
    EmptyContent,
}

/// Upload candidate validator
///
/// Checks MIME type, size, and display name without touching the file
/// contents or the store.
#[derive(Clone, Debug)]
pub struct UploadValidator {
    max_size_bytes: usize,
}

impl UploadValidator {
    pub fn new(max_size_bytes: usize) -> Self {
        Self { max_size_bytes }
    }

    /// The MIME type must belong to the image family (`image/*`).
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        if !content_type.to_lowercase().starts_with("image/") {
            return Err(ValidationError::NotAnImage {
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        if size > self.max_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_size_bytes,
            });
        }
        Ok(())
    }

    /// Resolve the display name: an explicit name wins, otherwise it is
    /// derived from the filename. Either way the result is truncated and must
    /// not be empty.
    pub fn resolve_display_name(
        &self,
        provided: Option<&str>,
        filename: &str,
    ) -> Result<String, ValidationError> {
        let name = match provided {
            Some(name) => truncate_display_name(name.trim()),
            None => derive_display_name(filename),
        };
        if name.is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        Ok(name)
    }

    /// Run all checks for one candidate. Returns the display name to persist.
    pub fn validate(
        &self,
        filename: &str,
        content_type: &str,
        size: usize,
        name: Option<&str>,
    ) -> Result<String, ValidationError> {
        self.validate_content_type(content_type)?;
        self.validate_size(size)?;
        self.resolve_display_name(name, filename)
    }
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(MAX_IMAGE_SIZE_BYTES)
    }
}

/// Filename stem (text before the first dot), truncated.
pub fn derive_display_name(filename: &str) -> String {
    let stem = filename.split('.').next().unwrap_or("").trim();
    truncate_display_name(stem)
}

/// Truncate to the display-name ceiling on a character boundary.
pub fn truncate_display_name(name: &str) -> String {
    name.chars().take(MAX_DISPLAY_NAME_CHARS).collect()
}

/// Posts need a non-empty title and non-empty content.
pub fn validate_post_input(title: &str, content: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UploadValidator {
        UploadValidator::default()
    }

    #[test]
    fn test_accepts_image_content_types() {
        assert!(validator().validate_content_type("image/jpeg").is_ok());
        assert!(validator().validate_content_type("image/png").is_ok());
        assert!(validator().validate_content_type("IMAGE/WEBP").is_ok());
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        let err = validator()
            .validate_content_type("text/plain")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAnImage {
                content_type: "text/plain".to_string()
            }
        );
        assert_eq!(err.to_string(), "Please upload an image file");
    }

    #[test]
    fn test_rejects_oversized_file_before_upload() {
        let six_mib = 6 * 1024 * 1024;
        let err = validator().validate_size(six_mib).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size: six_mib,
                max: MAX_IMAGE_SIZE_BYTES,
            }
        );
        assert_eq!(err.to_string(), "File size should be less than 5MB");
    }

    #[test]
    fn test_accepts_file_at_exact_limit() {
        assert!(validator().validate_size(MAX_IMAGE_SIZE_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert_eq!(
            validator().validate_size(0).unwrap_err(),
            ValidationError::EmptyFile
        );
    }

    #[test]
    fn test_derives_name_from_filename_stem() {
        assert_eq!(derive_display_name("sunset.jpg"), "sunset");
        assert_eq!(derive_display_name("archive.tar.gz"), "archive");
        assert_eq!(derive_display_name("no_extension"), "no_extension");
    }

    #[test]
    fn test_truncates_long_names_to_fifty_chars() {
        let long = "a".repeat(80);
        assert_eq!(truncate_display_name(&long).chars().count(), 50);

        let derived = derive_display_name(&format!("{}.png", long));
        assert_eq!(derived.chars().count(), 50);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let name: String = "é".repeat(60);
        let truncated = truncate_display_name(&name);
        assert_eq!(truncated.chars().count(), 50);
    }

    #[test]
    fn test_empty_display_name_rejected() {
        let err = validator()
            .resolve_display_name(Some("   "), "photo.png")
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyDisplayName);

        let err = validator().resolve_display_name(None, ".png").unwrap_err();
        assert_eq!(err, ValidationError::EmptyDisplayName);
    }

    #[test]
    fn test_validate_returns_resolved_name() {
        let name = validator()
            .validate("holiday.photo.jpeg", "image/jpeg", 1024, None)
            .unwrap();
        assert_eq!(name, "holiday");

        let name = validator()
            .validate("holiday.jpeg", "image/jpeg", 1024, Some("Beach day"))
            .unwrap();
        assert_eq!(name, "Beach day");
    }

    #[test]
    fn test_validation_order_type_before_size() {
        // A wrong type is reported even when the size is also wrong.
        let err = validator()
            .validate("notes.txt", "text/plain", 0, None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotAnImage { .. }));
    }

    #[test]
    fn test_post_input_validation() {
        assert!(validate_post_input("Hello", "world").is_ok());
        assert_eq!(
            validate_post_input("  ", "world").unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            validate_post_input("Hello", "").unwrap_err(),
            ValidationError::EmptyContent
        );
    }
}
