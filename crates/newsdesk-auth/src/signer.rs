//! Session token signing and verification.
//!
//! Tokens are `payload.signature` where `payload` is the codec-encoded JSON
//! claims and `signature` is the codec-encoded HMAC-SHA256 of the payload
//! *text* (not the raw JSON).

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::claims::{Claims, now_secs};
use crate::codec;
use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Minimum length of the signing secret, in characters.
pub const MIN_SECRET_CHARS: usize = 32;

/// Why a token was rejected. Never leaves this module: every variant
/// collapses to the same `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Shape,
    Encoding,
    Signature,
    Payload,
    Expired,
}

/// Signs and verifies admin session tokens with a key derived from the
/// server secret.
///
/// The secret is injected at construction; there is no global lookup.
/// Only the keyed HMAC state is kept, never the secret text itself.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSigner")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl SessionSigner {
    /// Build a signer from the server secret.
    ///
    /// Fails with [`AuthError::Configuration`] when the secret is empty or
    /// shorter than [`MIN_SECRET_CHARS`] characters.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Configuration("ADMIN_SECRET is not set".into()));
        }
        let chars = secret.chars().count();
        if chars < MIN_SECRET_CHARS {
            return Err(AuthError::Configuration(format!(
                "ADMIN_SECRET must be at least {MIN_SECRET_CHARS} characters (got {chars})"
            )));
        }
        let mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
            .map_err(|e| AuthError::Configuration(format!("Invalid signing key: {e}")))?;
        Ok(Self { mac })
    }

    /// Like [`SessionSigner::new`], treating an absent secret as a
    /// configuration error.
    pub fn from_optional(secret: Option<&str>) -> Result<Self, AuthError> {
        Self::new(secret.unwrap_or_default())
    }

    fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }

    /// Sign `claims` into a token.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let payload = codec::encode(serde_json::to_vec(claims)?);
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = codec::encode(mac.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    /// Issue a fresh token valid from now for [`crate::SESSION_TTL_SECS`].
    pub fn issue(&self) -> Result<String, AuthError> {
        self.issue_at(now_secs())
    }

    pub fn issue_at(&self, now: i64) -> Result<String, AuthError> {
        self.sign(&Claims::starting_at(now)?)
    }

    /// Verify signature and expiry against the wall clock.
    ///
    /// Returns `false` for any malformed, forged or expired token; never
    /// panics or errors.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, now_secs())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> bool {
        self.claims_at(token, now).is_some()
    }

    /// The verified claims of `token` at time `now`, if it is valid.
    pub fn claims_at(&self, token: &str, now: i64) -> Option<Claims> {
        self.open(token, now).ok()
    }

    fn open(&self, token: &str, now: i64) -> Result<Claims, Rejection> {
        let (payload, signature) = token.split_once('.').ok_or(Rejection::Shape)?;
        if payload.is_empty() || signature.is_empty() || signature.contains('.') {
            return Err(Rejection::Shape);
        }

        let signature = codec::decode(signature).map_err(|_| Rejection::Encoding)?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        // Constant-time comparison inside the MAC implementation.
        mac.verify_slice(&signature)
            .map_err(|_| Rejection::Signature)?;

        let json = codec::decode(payload).map_err(|_| Rejection::Encoding)?;
        let claims: Claims = serde_json::from_slice(&json).map_err(|_| Rejection::Payload)?;

        if claims.is_expired_at(now) {
            return Err(Rejection::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::claims::SESSION_TTL_SECS;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";
    const NOW: i64 = 1_700_000_000;

    fn signer() -> SessionSigner {
        SessionSigner::new(SECRET).unwrap()
    }

    /// Replace the char at `idx` with a different URL-safe base64 char.
    fn flip_char(token: &str, idx: usize) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    /// Sign an arbitrary JSON payload, bypassing `Claims` validation.
    fn sign_raw(signer: &SessionSigner, json: &str) -> String {
        let payload = codec::encode(json);
        let mut mac = signer.mac();
        mac.update(payload.as_bytes());
        format!("{payload}.{}", codec::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn issued_token_verifies() {
        let signer = signer();
        let token = signer.issue_at(NOW).unwrap();

        assert_eq!(token.matches('.').count(), 1);
        assert!(signer.verify_at(&token, NOW));
        let claims = signer.claims_at(&token, NOW).unwrap();
        assert_eq!(claims.issued_at(), NOW);
        assert_eq!(claims.expires_at(), NOW + SESSION_TTL_SECS);
    }

    #[test]
    fn verify_uses_wall_clock() {
        let signer = signer();
        let token = signer.issue().unwrap();
        assert!(signer.verify(&token));
    }

    #[test]
    fn signing_is_deterministic() {
        let claims = Claims::starting_at(NOW).unwrap();
        assert_eq!(signer().sign(&claims).unwrap(), signer().sign(&claims).unwrap());
    }

    #[test]
    fn payload_segment_is_encoded_json() {
        let token = signer().issue_at(NOW).unwrap();
        let (payload, _) = token.split_once('.').unwrap();
        let json = String::from_utf8(codec::decode(payload).unwrap()).unwrap();
        assert_eq!(json, format!(r#"{{"iat":{NOW},"exp":{}}}"#, NOW + SESSION_TTL_SECS));
    }

    #[test]
    fn any_signature_char_flip_is_rejected() {
        let signer = signer();
        let token = signer.issue_at(NOW).unwrap();
        let dot = token.find('.').unwrap();
        for idx in dot + 1..token.len() {
            let tampered = flip_char(&token, idx);
            assert!(!signer.verify_at(&tampered, NOW), "flip at {idx} accepted");
        }
    }

    #[test]
    fn any_payload_char_flip_is_rejected() {
        let signer = signer();
        let token = signer.issue_at(NOW).unwrap();
        let dot = token.find('.').unwrap();
        for idx in 0..dot {
            let tampered = flip_char(&token, idx);
            assert!(!signer.verify_at(&tampered, NOW), "flip at {idx} accepted");
        }
    }

    #[test]
    fn expiry_boundary() {
        let signer = signer();
        let expired = signer.sign(&Claims::new(NOW - 100, NOW - 1).unwrap()).unwrap();
        let live = signer.sign(&Claims::new(NOW - 100, NOW + 1).unwrap()).unwrap();
        let at_edge = signer.sign(&Claims::new(NOW - 100, NOW).unwrap()).unwrap();

        assert!(!signer.verify_at(&expired, NOW));
        assert!(signer.verify_at(&live, NOW));
        assert!(!signer.verify_at(&at_edge, NOW), "valid only while now < exp");
    }

    #[test]
    fn token_from_nine_hours_ago_is_expired() {
        let signer = signer();
        let token = signer.issue_at(NOW - 9 * 60 * 60).unwrap();
        assert!(!signer.verify_at(&token, NOW));
    }

    #[test]
    fn malformed_tokens_are_rejected_not_panicking() {
        let signer = signer();
        let token = signer.issue_at(NOW).unwrap();
        let (payload, signature) = token.split_once('.').unwrap();

        let cases = [
            String::new(),
            "no-dots-at-all".to_string(),
            ".".to_string(),
            format!("{payload}."),
            format!(".{signature}"),
            format!("{payload}.{signature}.extra"),
            format!("{payload}..{signature}"),
            format!("{payload}.{signature}="),
            format!("{payload}.$$$$"),
            format!("{payload}!.{signature}"),
            "a.b".to_string(),
            "\u{1F600}.\u{1F600}".to_string(),
        ];
        for case in &cases {
            assert!(!signer.verify_at(case, NOW), "{case:?} accepted");
        }
    }

    #[test]
    fn correctly_signed_garbage_payload_is_rejected() {
        let signer = signer();
        for json in [
            "not json",
            r#"{"iat":1}"#,
            r#"{"iat":"now","exp":"later"}"#,
            r#"{"iat":5,"exp":4}"#,
        ] {
            let token = sign_raw(&signer, json);
            assert!(!signer.verify_at(&token, 0), "{json} accepted");
        }

        let valid = sign_raw(&signer, &format!(r#"{{"iat":{NOW},"exp":{}}}"#, NOW + 60));
        assert!(signer.verify_at(&valid, NOW));
    }

    #[test]
    fn rejection_reasons_are_distinguished_internally() {
        let signer = signer();
        let token = signer.issue_at(NOW).unwrap();

        assert_eq!(signer.open("abc", NOW), Err(Rejection::Shape));
        assert_eq!(signer.open("abc.$", NOW), Err(Rejection::Encoding));
        assert_eq!(signer.open(&flip_char(&token, 0), NOW), Err(Rejection::Signature));
        assert_eq!(
            signer.open(&token, NOW + SESSION_TTL_SECS),
            Err(Rejection::Expired)
        );
        assert_eq!(
            signer.open(&sign_raw(&signer, "[]"), NOW),
            Err(Rejection::Payload)
        );
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = SessionSigner::new("ffffffffffffffffffffffffffffffff").unwrap();
        let token = other.issue_at(NOW).unwrap();
        assert!(!signer().verify_at(&token, NOW));
    }

    #[test]
    fn short_or_missing_secret_is_a_configuration_error() {
        let short = SessionSigner::new("too-short");
        assert!(matches!(short, Err(AuthError::Configuration(ref msg)) if msg.contains("32")));

        let one_short = "x".repeat(MIN_SECRET_CHARS - 1);
        assert!(SessionSigner::new(&one_short).is_err());
        assert!(SessionSigner::new(&"x".repeat(MIN_SECRET_CHARS)).is_ok());

        assert!(matches!(
            SessionSigner::from_optional(None),
            Err(AuthError::Configuration(_))
        ));
        assert!(SessionSigner::new("").is_err());
    }

    #[test]
    fn secret_length_counts_characters_not_bytes() {
        // 16 two-byte chars: 32 bytes, but only 16 characters.
        let secret = "é".repeat(16);
        assert!(SessionSigner::new(&secret).is_err());
    }

    #[test]
    fn mac_state_is_reused_across_calls() {
        let signer = signer();
        let clone = signer.clone();
        let first = signer.issue_at(NOW).unwrap();
        let second = signer.issue_at(NOW).unwrap();
        assert_eq!(first, second);
        assert!(clone.verify_at(&first, NOW));
    }

    #[test]
    fn long_secret_is_accepted() {
        let signer = SessionSigner::new(&"k".repeat(200)).unwrap();
        let token = signer.issue_at(NOW).unwrap();
        assert!(signer.verify_at(&token, NOW));
        assert!(!self::signer().verify_at(&token, NOW));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains("redacted"));
    }
}
