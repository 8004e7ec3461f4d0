//! HMAC request signing
//!
//! Every outbound request carries three headers derived from the caller
//! identity, the shared secret, and the exact body bytes about to be sent:
//! a Unix timestamp, the caller string verbatim, and a lowercase-hex
//! HMAC-SHA256 signature over `"<timestamp>.<body>"`.
//!
//! [`HmacSigner::verify`] is the symmetric check, used for self-tests and
//! debugging rather than on the hot path.

use chrono::Utc;
use hmac::{Hmac, Mac};
use orchex_domain::constants::{HEADER_CALLER, HEADER_SIGNATURE, HEADER_TIMESTAMP};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Authentication headers for a single request.
///
/// Derived per request and never stored; the timestamp is read from the
/// wall clock at signing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Unix time in seconds at the moment of signing.
    pub timestamp: i64,
    /// Caller identity, carried verbatim.
    pub caller: String,
    /// 64 lowercase hex characters (SHA-256 digest length).
    pub signature: String,
}

impl SignedHeaders {
    /// Attach the three headers to an outbound request.
    #[must_use]
    pub fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(HEADER_TIMESTAMP, self.timestamp.to_string())
            .header(HEADER_CALLER, &self.caller)
            .header(HEADER_SIGNATURE, &self.signature)
    }
}

/// HMAC-SHA256 signer shared by every client operation.
pub struct HmacSigner;

impl HmacSigner {
    /// Sign `body` on behalf of `caller_id`, reading the clock now.
    #[must_use]
    pub fn sign(caller_id: &str, secret: &str, body: &str) -> SignedHeaders {
        let timestamp = Utc::now().timestamp();
        SignedHeaders {
            timestamp,
            caller: caller_id.to_owned(),
            signature: Self::digest(secret, timestamp, body),
        }
    }

    /// Check a signature produced by [`HmacSigner::sign`].
    ///
    /// True only if the header timestamp is within `skew_secs` of the
    /// current clock and the recomputed signature matches exactly.
    #[must_use]
    pub fn verify(secret: &str, body: &str, headers: &SignedHeaders, skew_secs: u64) -> bool {
        let now = Utc::now().timestamp();
        if headers.timestamp.abs_diff(now) > skew_secs {
            return false;
        }
        Self::digest(secret, headers.timestamp, body) == headers.signature
    }

    fn digest(secret: &str, timestamp: i64, body: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
