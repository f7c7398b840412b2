//! Image encoding for API requests.
//!
//! Any byte sequence is accepted; no format or size validation happens here.

use base64::{engine::general_purpose::STANDARD, Engine};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Base64-encoded image ready for embedding in a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: &'static str,
    pub base64: String,
}

impl EncodedImage {
    /// `data:` URI for an `image_url` content part.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

/// Encode raw image bytes.
pub fn encode_image(bytes: &[u8]) -> EncodedImage {
    EncodedImage {
        mime: sniff_mime(bytes),
        base64: STANDARD.encode(bytes),
    }
}

/// MIME type from magic bytes. Anything that is not PNG is sent as JPEG.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(PNG_SIGNATURE) {
        "image/png"
    } else {
        "image/jpeg"
    }
}
