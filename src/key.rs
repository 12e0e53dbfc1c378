use crate::CardError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use percent_encoding::percent_decode_str;
use std::fmt;

/// Reversible, filesystem-safe encoding of a source URL. The key is the
/// storage address of the generated artifact, so it must never contain path
/// separators, and distinct URLs must never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a raw URL string: any percent-escaping left over
    /// from transport is undone first, then the decoded string is base64
    /// encoded with the URL-safe alphabet.
    ///
    /// Pure and independent of process state; the same URL always yields the
    /// same key.
    pub fn encode(url: &str) -> Self {
        let decoded = percent_decode_str(url).decode_utf8_lossy();
        CacheKey(URL_SAFE_NO_PAD.encode(decoded.as_bytes()))
    }

    /// Exact inverse of [`CacheKey::encode`]: recover the original URL from a
    /// key. Keys arrive here from untrusted request paths, so malformed
    /// base64 and non-UTF-8 payloads both fail with `DecodeError` instead of
    /// producing a garbage URL.
    pub fn decode(key: &str) -> Result<String, CardError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(key)
            .map_err(|e| CardError::DecodeError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CardError::DecodeError(e.to_string()))
    }

    pub fn from_encoded(key: &str) -> Result<Self, CardError> {
        // Validate by round-tripping; a key we cannot decode is not a key.
        Self::decode(key)?;
        Ok(CacheKey(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
