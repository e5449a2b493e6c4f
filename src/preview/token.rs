//! Preview token format: `<hex-signature>.<epoch-millis-expiry>`

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A preview token split into its two components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewToken<'a> {
    pub signature: &'a str,
    /// Expiry exactly as written in the token; the signature covers this text
    pub expiry_text: &'a str,
    /// Expiry as Unix epoch milliseconds
    pub expiry: u64,
}

impl<'a> PreviewToken<'a> {
    /// Split a token into signature and expiry
    ///
    /// Returns `None` unless there are exactly two non-empty components and
    /// the expiry is a plain base-10 integer.
    pub fn parse(token: &'a str) -> Option<Self> {
        let mut parts = token.split('.');
        let (Some(signature), Some(expiry_text), None) = (parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        if signature.is_empty() || expiry_text.is_empty() {
            return None;
        }
        if !expiry_text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let expiry = expiry_text.parse().ok()?;
        Some(Self {
            signature,
            expiry_text,
            expiry,
        })
    }
}

/// Lowercase hex HMAC-SHA256 of `slug + "." + expiry` under `secret`
pub(crate) fn signature(secret: &[u8], slug: &str, expiry: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(slug.as_bytes());
    mac.update(b".");
    mac.update(expiry.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
