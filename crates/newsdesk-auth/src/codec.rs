//! URL-safe text encoding for token segments.
//!
//! Standard base64 with `+` -> `-`, `/` -> `_` and no `=` padding, so a token
//! can be stored as a cookie value without escaping.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

pub use base64::DecodeError;

/// Encode arbitrary bytes.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode text produced by [`encode`].
///
/// Rejects characters outside the URL-safe alphabet, `=` padding, impossible
/// lengths and non-canonical trailing bits.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_NO_PAD.decode(text)
}
