//! Data models for the lookup client.

mod category;
mod data_url;
mod mode;
mod upload;

pub use category::{CardCategory, CategoryFilter, categorize};
pub use data_url::DataUrl;
pub use mode::UploadMode;
pub use upload::{ImageUpload, SelectedFile, extension_of, is_allowed_extension, validate_selection};
