//! Opaque captured-image artifacts
//!
//! ID photos and signature rasters move through the intake form as opaque
//! encoded values. The core never looks at pixels; it tracks presence,
//! re-encodes for transport, and derives a stable content reference used in
//! submission payloads.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// An encoded image produced by a capture surface (camera snapshot or
/// signature raster).
#[derive(Clone, PartialEq, Eq)]
pub struct Artifact {
    mime: String,
    bytes: Vec<u8>,
}

impl Artifact {
    /// Wrap already-encoded image bytes with their MIME label.
    pub fn from_bytes(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Artifact {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL, the form capture surfaces
    /// hand over.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| Error::DataError("Not a data URL".into()))?;
        let (head, payload) = rest
            .split_once(',')
            .ok_or_else(|| Error::DataError("Data URL has no payload".into()))?;
        let mime = head
            .strip_suffix(";base64")
            .ok_or_else(|| Error::DataError("Data URL is not base64-encoded".into()))?;
        let bytes = BASE64
            .decode(payload)
            .map_err(|e| Error::DataError(format!("Bad base64 payload: {}", e)))?;
        Ok(Artifact {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Stable content reference: the SHA-256 digest of the encoded bytes,
    /// hex-encoded. Submission payloads carry this instead of the image.
    pub fn reference(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }

    /// Re-encode as a `data:` URL for transport or preview.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Artifact({}, {} bytes)", self.mime, self.bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_round_trip() {
        let a = Artifact::from_bytes("image/png", vec![1, 2, 3, 4]);
        let url = a.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        let b = Artifact::from_data_url(&url).expect("Failed to parse data URL");
        assert_eq!(a, b);
    }

    #[test]
    fn reference_tracks_content() {
        let a = Artifact::from_bytes("image/jpeg", vec![1, 2, 3]);
        let b = Artifact::from_bytes("image/jpeg", vec![1, 2, 3]);
        let c = Artifact::from_bytes("image/jpeg", vec![9, 9, 9]);
        assert_eq!(a.reference(), b.reference());
        assert_ne!(a.reference(), c.reference());
        assert_eq!(a.reference().len(), 64);
    }

    #[test]
    fn rejects_malformed_data_urls() {
        assert!(Artifact::from_data_url("http://example.com/a.png").is_err());
        assert!(Artifact::from_data_url("data:image/png;base64").is_err());
        assert!(Artifact::from_data_url("data:image/png,plain").is_err());
        assert!(Artifact::from_data_url("data:image/png;base64,!!!").is_err());
    }
}
