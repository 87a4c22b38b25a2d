//! `data:` URL parsing.
//!
//! The pending image travels between pages as a data URL string because that
//! is what `FileReader::readAsDataURL` yields and what session storage holds.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;

use crate::error::LookupError;

/// Media type assumed when the URL declares none.
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared media type without parameters, e.g. `image/png`
    pub media_type: String,
    /// Decoded payload
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Parse `data:<media-type>[;params][;base64],<payload>`.
    pub fn parse(url: &str) -> Result<Self, LookupError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| LookupError::invalid_data_url("missing 'data:' scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| LookupError::invalid_data_url("missing ',' separator"))?;

        let mut params = header.split(';');
        let media_type = match params.next().map(str::trim) {
            Some(mt) if !mt.is_empty() => mt.to_ascii_lowercase(),
            _ => DEFAULT_MEDIA_TYPE.to_string(),
        };
        let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        let bytes = if is_base64 {
            STANDARD
                .decode(payload.trim())
                .map_err(|e| LookupError::invalid_data_url(format!("bad base64 payload: {}", e)))?
        } else {
            percent_decode_str(payload).collect()
        };

        Ok(Self::new(media_type, bytes))
    }
}
