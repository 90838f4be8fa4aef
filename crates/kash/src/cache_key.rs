//! Token cache key records.
//!
//! The shapes below re-declare the key a kubelogin-style token cache is
//! indexed by. Type names, field names and field order are part of the
//! fingerprint, so they follow the original Go declarations exactly:
//! `Key { Provider, TLSClientConfig, Username }`.

use crate::gob::{ByteString, Field, GobEncode, GobType, StructType, Value};

/// OIDC provider settings that identify a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Base URL of the OIDC issuer, as raw bytes.
    pub issuer_url: ByteString,
    /// OAuth2 client identifier, as raw bytes.
    pub client_id: ByteString,
    /// OAuth2 client secret; kept empty by the kubelogin command.
    pub client_secret: String,
    /// Additional scopes, in the order given.
    pub extra_scopes: Vec<ByteString>,
    /// Whether the access token is used in place of the ID token.
    pub use_access_token: bool,
}

impl GobEncode for Provider {
    fn gob_type() -> GobType {
        GobType::Struct(StructType::new(
            "Provider",
            vec![
                Field::new("IssuerURL", GobType::String),
                Field::new("ClientID", GobType::String),
                Field::new("ClientSecret", GobType::String),
                Field::new("ExtraScopes", Vec::<ByteString>::gob_type()),
                Field::new("UseAccessToken", GobType::Bool),
            ],
        ))
    }

    fn gob_value(&self) -> Value {
        Value::Struct(vec![
            self.issuer_url.gob_value(),
            self.client_id.gob_value(),
            self.client_secret.gob_value(),
            self.extra_scopes.gob_value(),
            self.use_access_token.gob_value(),
        ])
    }
}

/// TLS client settings. The kubelogin command leaves every field at its
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsClientConfig {
    /// Paths of CA certificate files.
    pub ca_cert_filename: Vec<String>,
    /// Inline CA certificate data.
    pub ca_cert_data: Vec<String>,
    /// Whether server certificate verification is skipped.
    pub skip_tls_verify: bool,
    /// TLS renegotiation support level, as the Go enum's integer value.
    pub renegotiation: i64,
}

impl GobEncode for TlsClientConfig {
    fn gob_type() -> GobType {
        GobType::Struct(StructType::new(
            "Config",
            vec![
                Field::new("CACertFilename", Vec::<String>::gob_type()),
                Field::new("CACertData", Vec::<String>::gob_type()),
                Field::new("SkipTLSVerify", GobType::Bool),
                Field::new("Renegotiation", GobType::Int),
            ],
        ))
    }

    fn gob_value(&self) -> Value {
        Value::Struct(vec![
            self.ca_cert_filename.gob_value(),
            self.ca_cert_data.gob_value(),
            self.skip_tls_verify.gob_value(),
            self.renegotiation.gob_value(),
        ])
    }
}

/// Key a cached token is stored under.
///
/// # Examples
///
/// ```
/// use kash::CacheKey;
///
/// let key = CacheKey::for_kubelogin(
///     "https://issuer.example.com",
///     "my-client",
///     vec!["openid".to_owned()],
/// );
///
/// assert!(key.provider.use_access_token);
/// assert!(key.provider.client_secret.is_empty());
/// assert!(key.username.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Provider settings.
    pub provider: Provider,
    /// TLS client settings.
    pub tls_client_config: TlsClientConfig,
    /// Username for password grants; empty otherwise.
    pub username: String,
}

impl CacheKey {
    /// Build the key the kubelogin command fingerprints: empty client secret
    /// and username, default TLS settings, access token enabled.
    #[must_use]
    pub fn for_kubelogin<S>(
        issuer_url: impl Into<ByteString>,
        client_id: impl Into<ByteString>,
        extra_scopes: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<ByteString>,
    {
        Self {
            provider: Provider {
                issuer_url: issuer_url.into(),
                client_id: client_id.into(),
                client_secret: String::new(),
                extra_scopes: extra_scopes.into_iter().map(Into::into).collect(),
                use_access_token: true,
            },
            tls_client_config: TlsClientConfig::default(),
            username: String::new(),
        }
    }
}

impl GobEncode for CacheKey {
    fn gob_type() -> GobType {
        GobType::Struct(StructType::new(
            "Key",
            vec![
                Field::new("Provider", Provider::gob_type()),
                Field::new("TLSClientConfig", TlsClientConfig::gob_type()),
                Field::new("Username", GobType::String),
            ],
        ))
    }

    fn gob_value(&self) -> Value {
        Value::Struct(vec![
            self.provider.gob_value(),
            self.tls_client_config.gob_value(),
            self.username.gob_value(),
        ])
    }
}
