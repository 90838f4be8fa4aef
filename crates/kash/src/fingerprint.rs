//! Cache key fingerprinting.
//!
//! A fingerprint is the SHA-256 digest of the gob stream a fresh encoder
//! writes for the key. The hasher is the encoder's writer, so the digest
//! covers the type definitions as well as the value.

use std::fmt;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cache_key::CacheKey;
use crate::error::EncodeError;
use crate::gob::Encoder;

/// Length of a fingerprint in bytes before hex encoding.
pub const FINGERPRINT_BYTES: usize = 32;

/// SHA-256 digest identifying a [`CacheKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Construct a [`Fingerprint`] from a 32-byte array.
    ///
    /// # Example
    ///
    /// ```
    /// # use kash::Fingerprint;
    /// let fingerprint = Fingerprint::from_bytes([0xab; 32]);
    /// assert_eq!(fingerprint.as_bytes()[0], 0xab);
    /// ```
    #[must_use]
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Access the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.0
    }

    /// Encode the digest as a 64-character lowercase hexadecimal string.
    ///
    /// # Example
    ///
    /// ```
    /// # use kash::Fingerprint;
    /// let fingerprint = Fingerprint::from_bytes([0u8; 32]);
    /// assert_eq!(fingerprint.to_hex(), "0".repeat(64));
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the fingerprint of a cache key.
///
/// # Errors
///
/// Returns [`EncodeError`] if the key cannot be gob-encoded. The fixed key
/// shape makes this unreachable in practice.
///
/// # Examples
///
/// ```
/// use kash::{CacheKey, fingerprint};
///
/// let key = CacheKey::for_kubelogin(
///     "https://issuer.example.com",
///     "my-client",
///     vec!["openid".to_owned(), "profile".to_owned()],
/// );
/// let digest = fingerprint(&key).expect("key encodes");
///
/// assert_eq!(digest.to_hex().len(), 64);
/// assert_eq!(digest, fingerprint(&key).expect("key encodes again"));
/// ```
pub fn fingerprint(key: &CacheKey) -> Result<Fingerprint, EncodeError> {
    let mut encoder = Encoder::new(Sha256::new());
    encoder.encode(key)?;
    let digest: [u8; FINGERPRINT_BYTES] = encoder.into_inner().finalize().into();
    let result = Fingerprint::from_bytes(digest);
    debug!(fingerprint = %result, "computed cache key fingerprint");
    Ok(result)
}
