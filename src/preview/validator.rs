//! Preview token validation

use std::fmt;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::token::{signature, PreviewToken};

/// Why a preview token was refused
///
/// Callers should not show this to the visitor; every variant maps to the
/// same "not found" response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreviewDenied {
    #[error("no preview token supplied")]
    MissingToken,
    #[error("preview signing secret is not configured")]
    NoSecret,
    #[error("preview token is malformed")]
    Malformed,
    #[error("preview token has expired")]
    Expired,
    #[error("preview token signature does not match")]
    BadSignature,
}

/// Source of the current time in Unix epoch milliseconds
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

/// Verifies signed, time-limited preview tokens for unpublished posts
///
/// Stateless: a token stays valid, and can be replayed, until it expires.
pub struct PreviewValidator<C = SystemClock> {
    secret: Option<Vec<u8>>,
    clock: C,
}

impl PreviewValidator<SystemClock> {
    /// Create a validator. An absent or empty secret refuses every token.
    pub fn new(secret: Option<String>) -> Self {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> PreviewValidator<C> {
    pub fn with_clock(secret: Option<String>, clock: C) -> Self {
        let secret = secret.filter(|s| !s.is_empty()).map(String::into_bytes);
        Self { secret, clock }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check a token for `slug`, reporting why it was refused
    pub fn verify(&self, slug: &str, token: Option<&str>) -> Result<(), PreviewDenied> {
        let token = token.ok_or(PreviewDenied::MissingToken)?;
        let secret = self.secret.as_deref().ok_or(PreviewDenied::NoSecret)?;
        let token = PreviewToken::parse(token).ok_or(PreviewDenied::Malformed)?;

        if self.clock.now_millis() > token.expiry {
            return Err(PreviewDenied::Expired);
        }

        let expected =
            signature(secret, slug, token.expiry_text).ok_or(PreviewDenied::NoSecret)?;
        if bool::from(expected.as_bytes().ct_eq(token.signature.as_bytes())) {
            Ok(())
        } else {
            Err(PreviewDenied::BadSignature)
        }
    }

    /// Whether `token` grants preview access to `slug`. Fails closed.
    pub fn validate(&self, slug: &str, token: Option<&str>) -> bool {
        match self.verify(slug, token) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!("Preview of {:?} denied: {}", slug, reason);
                false
            }
        }
    }
}

impl<C> fmt::Debug for PreviewValidator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewValidator")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "s3cret";
    const FAR_FUTURE: &str = "9999999999999";
    const NOW: u64 = 1_750_000_000_000;

    fn token_for(slug: &str, expiry: &str) -> String {
        let sig = signature(SECRET.as_bytes(), slug, expiry).unwrap();
        format!("{sig}.{expiry}")
    }

    fn validator() -> PreviewValidator<FixedClock> {
        PreviewValidator::with_clock(Some(SECRET.to_string()), FixedClock(NOW))
    }

    #[test]
    fn test_valid_token() {
        let token = token_for("my-post", FAR_FUTURE);
        assert!(validator().validate("my-post", Some(token.as_str())));
        assert!(PreviewValidator::new(Some(SECRET.to_string())).validate("my-post", Some(token.as_str())));
    }

    #[test]
    fn test_known_token_for_my_post() {
        let token =
            "81cfc3aa79ef5ee6123e72d64bd3a2351d7a08ea675edfff4fb81e02c2c0c7f6.9999999999999";
        assert!(validator().validate("my-post", Some(token)));
        assert!(!validator().validate("my-post-2", Some(token)));
    }

    #[test]
    fn test_expired_token() {
        let token = token_for("my-post", "1");
        assert_eq!(
            validator().verify("my-post", Some(token.as_str())),
            Err(PreviewDenied::Expired)
        );
        assert!(!PreviewValidator::new(Some(SECRET.to_string())).validate("my-post", Some(token.as_str())));
    }

    #[test]
    fn test_expiry_boundary() {
        let at_now = token_for("my-post", &NOW.to_string());
        assert!(validator().validate("my-post", Some(at_now.as_str())));

        let just_past = token_for("my-post", &(NOW - 1).to_string());
        assert!(!validator().validate("my-post", Some(just_past.as_str())));
    }

    #[test]
    fn test_flipped_signature_character() {
        let token = token_for("my-post", FAR_FUTURE);
        let first = token.chars().next().unwrap();
        let flipped = if first == '0' { '1' } else { '0' };
        let tampered = format!("{flipped}{}", &token[1..]);
        assert_eq!(
            validator().verify("my-post", Some(tampered.as_str())),
            Err(PreviewDenied::BadSignature)
        );
    }

    #[test]
    fn test_uppercase_signature_rejected() {
        let token = token_for("my-post", FAR_FUTURE).to_uppercase();
        assert!(!validator().validate("my-post", Some(token.as_str())));
    }

    #[test]
    fn test_token_bound_to_slug() {
        let token = token_for("my-post", FAR_FUTURE);
        assert!(!validator().validate("my-post-2", Some(token.as_str())));
        assert!(!validator().validate("my", Some(token.as_str())));
    }

    #[test]
    fn test_extended_expiry_rejected() {
        let token = token_for("my-post", "1");
        let forged = token.replace(".1", &format!(".{FAR_FUTURE}"));
        assert!(!validator().validate("my-post", Some(forged.as_str())));
    }

    #[test]
    fn test_missing_and_malformed_tokens() {
        let v = validator();
        assert_eq!(v.verify("my-post", None), Err(PreviewDenied::MissingToken));
        let extra_part = format!("{}.x", token_for("my-post", FAR_FUTURE));
        for bad in ["", "abc", "abc.def", "a.b.c", extra_part.as_str()] {
            assert!(!v.validate("my-post", Some(bad)), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_unconfigured_secret_always_fails() {
        let token = token_for("my-post", FAR_FUTURE);
        for secret in [None, Some(String::new())] {
            let v = PreviewValidator::with_clock(secret, FixedClock(NOW));
            assert!(!v.is_configured());
            assert_eq!(v.verify("my-post", Some(token.as_str())), Err(PreviewDenied::NoSecret));
            assert!(!v.validate("my-post", Some("")));
            assert!(!v.validate("my-post", Some(format!(".{FAR_FUTURE}").as_str())));
        }

        // a token signed with the empty key must not pass either
        let empty_key_sig = signature(b"", "my-post", FAR_FUTURE).unwrap();
        let v = PreviewValidator::with_clock(Some(String::new()), FixedClock(NOW));
        assert!(!v.validate("my-post", Some(format!("{empty_key_sig}.{FAR_FUTURE}").as_str())));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let printed = format!("{:?}", validator());
        assert!(!printed.contains(SECRET));
        assert!(printed.contains("redacted"));
    }
}
