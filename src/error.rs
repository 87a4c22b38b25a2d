//! Error types for the lookup workflow.

use thiserror::Error;

use crate::locale::Locale;

/// Errors that can occur while uploading, storing, or rendering a lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Confirmation was requested before any file was selected
    #[error("No file selected")]
    NoFileSelected,

    /// Selected file's extension is not on the allow-list
    #[error("Unsupported file extension in '{filename}'")]
    UnsupportedExtension {
        /// Name of the rejected file
        filename: String,
    },

    /// Stored string is not a usable data URL
    #[error("Invalid data URL: {message}")]
    InvalidDataUrl {
        /// What was wrong with it
        message: String,
    },

    /// Backend answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    Http {
        /// Endpoint path that was called
        endpoint: String,
        /// Status code returned
        status: u16,
    },

    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Session or local storage was unavailable or refused the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Backend reported a recognition error in its JSON body
    #[error("Backend error: {0}")]
    Backend(String),

    /// Browser API call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

impl LookupError {
    /// Create an invalid data URL error with a message.
    pub fn invalid_data_url(message: impl Into<String>) -> Self {
        Self::InvalidDataUrl {
            message: message.into(),
        }
    }

    /// Create an unsupported extension error.
    pub fn unsupported_extension(filename: impl Into<String>) -> Self {
        Self::UnsupportedExtension {
            filename: filename.into(),
        }
    }

    /// The text shown to the user for this error.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::NoFileSelected => locale.no_file_message().to_string(),
            Self::UnsupportedExtension { .. } => locale.bad_extension_message().to_string(),
            Self::Backend(message) => message.clone(),
            Self::Http { .. } | Self::Network(_) | Self::Decode(_) => {
                locale.upload_failed_message().to_string()
            }
            Self::InvalidDataUrl { .. } | Self::Storage(_) | Self::Dom(_) => {
                locale.unexpected_error_message().to_string()
            }
        }
    }
}
