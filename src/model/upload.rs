//! Selected files and the multipart parts built from them.

use crate::constants::{RECONSTRUCTED_FILENAME, UPLOAD_FIELD};
use crate::error::LookupError;
use crate::model::DataUrl;

/// A file the user picked or dropped onto an upload area.
///
/// Only metadata is kept; the bytes are read again at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original filename
    pub name: String,
    /// Media type declared by the browser (may be empty)
    pub media_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// Whether a preview should be decoded for this file.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Get the extension after the last `.`, lowercased.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Check a filename against an allow-list of lowercase extensions.
pub fn is_allowed_extension<S: AsRef<str>>(filename: &str, allowed: &[S]) -> bool {
    extension_of(filename)
        .map(|ext| allowed.iter().any(|a| a.as_ref() == ext))
        .unwrap_or(false)
}

/// Validate the widget's selection before confirmation.
pub fn validate_selection<'a, S: AsRef<str>>(
    selected: Option<&'a SelectedFile>,
    allowed: &[S],
) -> Result<&'a SelectedFile, LookupError> {
    let file = selected.ok_or(LookupError::NoFileSelected)?;
    if !is_allowed_extension(&file.name, allowed) {
        return Err(LookupError::unsupported_extension(&file.name));
    }
    Ok(file)
}

/// One multipart `image` part as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Form field name
    pub field: &'static str,
    /// Filename reported in the part's disposition
    pub filename: String,
    /// Part content type
    pub media_type: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Rebuild an upload from the stored data URL, as the results page does.
    pub fn from_stored(data_url: DataUrl) -> Self {
        Self {
            field: UPLOAD_FIELD,
            filename: RECONSTRUCTED_FILENAME.to_string(),
            media_type: data_url.media_type,
            bytes: data_url.bytes,
        }
    }

    /// Upload carrying the user's original filename and declared type.
    pub fn from_original(file: &SelectedFile, bytes: Vec<u8>) -> Self {
        Self {
            field: UPLOAD_FIELD,
            filename: file.name.clone(),
            media_type: file.media_type.clone(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ALLOWED_EXTENSIONS;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("d"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_extension("a.JPG", ALLOWED_EXTENSIONS));
        assert!(is_allowed_extension("b.jfif", ALLOWED_EXTENSIONS));
        assert!(is_allowed_extension("photo.WebP", ALLOWED_EXTENSIONS));
        assert!(!is_allowed_extension("c.gif", ALLOWED_EXTENSIONS));
        assert!(!is_allowed_extension("d", ALLOWED_EXTENSIONS));
        assert!(!is_allowed_extension("png", ALLOWED_EXTENSIONS));
    }

    #[test]
    fn test_validate_selection() {
        assert_eq!(
            validate_selection(None, ALLOWED_EXTENSIONS),
            Err(LookupError::NoFileSelected)
        );

        let gif = SelectedFile::new("c.gif", "image/gif");
        assert_eq!(
            validate_selection(Some(&gif), ALLOWED_EXTENSIONS),
            Err(LookupError::unsupported_extension("c.gif"))
        );

        let jpg = SelectedFile::new("a.JPG", "image/jpeg");
        assert_eq!(validate_selection(Some(&jpg), ALLOWED_EXTENSIONS), Ok(&jpg));
    }

    #[test]
    fn test_upload_from_stored() {
        let upload = ImageUpload::from_stored(DataUrl::new("image/png", vec![7, 7]));
        assert_eq!(upload.field, "image");
        assert_eq!(upload.filename, "upload.jpg");
        assert_eq!(upload.media_type, "image/png");
        assert_eq!(upload.bytes, vec![7, 7]);
    }

    #[test]
    fn test_upload_from_original() {
        let file = SelectedFile::new("deck.webp", "image/webp");
        let upload = ImageUpload::from_original(&file, vec![1]);
        assert_eq!(upload.filename, "deck.webp");
        assert_eq!(upload.media_type, "image/webp");
    }
}
