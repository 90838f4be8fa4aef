//! Deterministic fingerprints for OIDC token cache keys.
//!
//! A token cache keyed by OIDC provider settings needs a short, stable name
//! for each key. This crate computes it the way kubelogin does: the key is
//! gob-encoded (the Go `encoding/gob` stream format) and the stream is hashed
//! with SHA-256, so the fingerprints line up with caches written by Go tools.
//!
//! # Overview
//!
//! - [`gob`] encodes booleans, integers, strings, slices and structs in the
//!   gob stream format.
//! - [`CacheKey`] re-declares the key shape with its original field order.
//! - [`fingerprint`] hashes the encoded key into a [`Fingerprint`].
//! - [`KubeloginSettings`] assembles the key from `OIDC_*` variables.
//! - [`cli`] backs the `kash` binary.
//!
//! # Example
//!
//! ```
//! use kash::{CacheKey, fingerprint};
//!
//! let key = CacheKey::for_kubelogin(
//!     "https://issuer.example.com",
//!     "my-client",
//!     vec!["openid".to_owned(), "profile".to_owned()],
//! );
//! let digest = fingerprint(&key).expect("key encodes");
//!
//! assert_eq!(
//!     digest.to_hex(),
//!     "f25479124414a43f6c6b157fcc320b175796914cec22b4ae2a7c9f0c430eeb73"
//! );
//! ```

mod cache_key;
pub mod cli;
mod config;
mod error;
mod fingerprint;
pub mod gob;
#[cfg(test)]
mod test_support;

pub use cache_key::{CacheKey, Provider, TlsClientConfig};
pub use config::{CLIENT_ID_ENV, ISSUER_ENV, KubeloginSettings, SCOPES_ENV};
pub use error::EncodeError;
pub use fingerprint::{FINGERPRINT_BYTES, Fingerprint, fingerprint};
