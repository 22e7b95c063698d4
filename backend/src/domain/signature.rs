//! Opal request signatures.
//!
//! Every inbound request carries a hex HMAC-SHA256 signature computed over
//! `v0:{timestamp}:{body}` with the shared signing secret. Verification is a
//! pure function of the secret, the timestamp header, the raw body bytes and
//! the declared signature.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::{Error, Secret};

/// Header carrying the hex-encoded request signature.
pub const SIGNATURE_HEADER: &str = "X-Opal-Signature";
/// Header carrying the timestamp that is folded into the signature.
pub const TIMESTAMP_HEADER: &str = "X-Opal-Request-Timestamp";

const VERSION_PREFIX: &[u8] = b"v0:";
const EMPTY_BODY: &[u8] = b"{}";

type HmacSha256 = Hmac<Sha256>;

/// Raised when the HMAC implementation refuses the signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("signing key rejected by HMAC-SHA256")]
pub struct SigningKeyError;

/// The authentication-relevant parts of an inbound request.
#[derive(Debug, Clone, Copy)]
pub struct SignedRequest<'a> {
    /// Value of the timestamp header, used verbatim.
    pub timestamp: &'a str,
    /// Raw body bytes as received.
    pub body: &'a [u8],
    /// Value of the signature header.
    pub signature: &'a str,
}

/// Body bytes that enter the signature base string.
///
/// Empty and whitespace-only bodies are signed as the literal `{}`; every
/// other body is signed exactly as received.
pub fn signed_body(body: &[u8]) -> &[u8] {
    if body.iter().all(u8::is_ascii_whitespace) {
        EMPTY_BODY
    } else {
        body
    }
}

/// Assemble `v0:{timestamp}:{body}`.
pub fn signature_base(timestamp: &str, body: &[u8]) -> Vec<u8> {
    let body = signed_body(body);
    let mut base = Vec::with_capacity(VERSION_PREFIX.len() + timestamp.len() + 1 + body.len());
    base.extend_from_slice(VERSION_PREFIX);
    base.extend_from_slice(timestamp.as_bytes());
    base.push(b':');
    base.extend_from_slice(body);
    base
}

/// Compute the lowercase hex signature for a request.
///
/// # Errors
/// Returns [`SigningKeyError`] if the HMAC key is rejected.
///
/// # Examples
/// ```
/// use authentik_connector::domain::Secret;
/// use authentik_connector::domain::signature::sign;
///
/// let signature = sign(&Secret::new("shh"), "1700000000", b"").expect("sign");
/// assert_eq!(signature.len(), 64);
/// ```
pub fn sign(secret: &Secret, timestamp: &str, body: &[u8]) -> Result<String, SigningKeyError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.expose().as_bytes()).map_err(|_| SigningKeyError)?;
    mac.update(&signature_base(timestamp, body));
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Whether the declared signature matches the one computed for the request.
///
/// The comparison is exact and constant-time: no trimming or case folding is
/// applied to the declared value.
pub fn verify(secret: &Secret, request: &SignedRequest<'_>) -> bool {
    match sign(secret, request.timestamp, request.body) {
        Ok(expected) => expected
            .as_bytes()
            .ct_eq(request.signature.as_bytes())
            .into(),
        Err(_) => false,
    }
}

/// Signature headers of a request, both present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeaders<'a> {
    /// Declared hex signature.
    pub signature: &'a str,
    /// Timestamp folded into the signature base.
    pub timestamp: &'a str,
}

impl<'a> SignatureHeaders<'a> {
    /// Require both headers before any body is read.
    ///
    /// Empty header values count as missing.
    ///
    /// # Errors
    /// Returns an [`Error`] of kind `Authentication` naming the first missing
    /// header, signature before timestamp.
    pub fn require(signature: Option<&'a str>, timestamp: Option<&'a str>) -> Result<Self, Error> {
        let signature = signature
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::unauthorized(format!("{SIGNATURE_HEADER} header is missing")))?;
        let timestamp = timestamp
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::unauthorized(format!("{TIMESTAMP_HEADER} header is missing")))?;
        Ok(Self {
            signature,
            timestamp,
        })
    }

    /// Check the declared signature against `body`.
    ///
    /// # Errors
    /// Returns `"Invalid signature"` with kind `Authentication` on mismatch.
    pub fn verify_body(&self, secret: &Secret, body: &[u8]) -> Result<(), Error> {
        let request = SignedRequest {
            timestamp: self.timestamp,
            body,
            signature: self.signature,
        };
        if verify(secret, &request) {
            Ok(())
        } else {
            Err(Error::unauthorized("Invalid signature"))
        }
    }
}

/// Gate a request on its signature headers and body.
///
/// # Errors
/// Returns an [`Error`] of kind `Authentication` naming the missing header,
/// or `"Invalid signature"` on a digest mismatch.
pub fn authenticate(
    secret: &Secret,
    signature: Option<&str>,
    timestamp: Option<&str>,
    body: &[u8],
) -> Result<(), Error> {
    SignatureHeaders::require(signature, timestamp)?.verify_body(secret, body)
}
