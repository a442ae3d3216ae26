//! Transport encoding: base64 over the UTF-8 bytes of the SVG markup.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::error;

use super::cell::CellContent;
use super::render::render_cell;

/// Error from decoding a transported image.
#[derive(Debug)]
pub enum EncodingError {
    /// Not valid standard base64.
    Base64(base64::DecodeError),
    /// Decoded bytes are not UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl std::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingError::Base64(e) => write!(f, "Base64 decode error: {}", e),
            EncodingError::Utf8(e) => write!(f, "Decoded markup is not UTF-8: {}", e),
        }
    }
}

impl std::error::Error for EncodingError {}

impl From<base64::DecodeError> for EncodingError {
    fn from(e: base64::DecodeError) -> Self {
        EncodingError::Base64(e)
    }
}

impl From<std::string::FromUtf8Error> for EncodingError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        EncodingError::Utf8(e)
    }
}

/// Base64-encode markup for transport.
pub fn encode(markup: &str) -> String {
    STANDARD.encode(markup.as_bytes())
}

/// Inverse of [`encode`].
pub fn decode(encoded: &str) -> Result<String, EncodingError> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

/// Render and encode one cell. Logs and returns an empty string on failure
/// so one bad image never aborts a whole item.
pub fn render_encoded(cell: &CellContent, cell_size: u32) -> String {
    match render_cell(cell, cell_size) {
        Ok(markup) => encode(&markup),
        Err(e) => {
            error!("Failed to render cell: {}", e);
            String::new()
        }
    }
}
