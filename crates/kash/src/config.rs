//! Kubelogin settings read from the environment.
//!
//! Environment access goes through [`mockable::Env`] so the assembly can be
//! exercised with explicit values instead of the process environment. Values
//! are read raw: a variable that is not valid Unicode keeps its bytes.

use std::env::VarError;

use mockable::Env;
use tracing::debug;

use crate::cache_key::CacheKey;
use crate::gob::ByteString;

/// Variable holding the OIDC issuer URL.
pub const ISSUER_ENV: &str = "OIDC_ISS";
/// Variable holding the OAuth2 client ID (the `azp` claim).
pub const CLIENT_ID_ENV: &str = "OIDC_AZP";
/// Variable holding comma-separated extra scopes.
pub const SCOPES_ENV: &str = "OIDC_SCP";

const SCOPE_SEPARATOR: u8 = b',';

/// Inputs of the kubelogin cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubeloginSettings {
    /// OIDC issuer URL.
    pub issuer_url: ByteString,
    /// OAuth2 client ID.
    pub client_id: ByteString,
    /// Extra scopes in the order given.
    pub extra_scopes: Vec<ByteString>,
}

impl KubeloginSettings {
    /// Read the settings from `env`.
    ///
    /// Unset variables read as empty strings. Scopes are split on every comma
    /// with empty segments kept, so an empty or unset scope variable yields
    /// one empty scope rather than none.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::env::VarError;
    ///
    /// use kash::KubeloginSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_raw().returning(|name| match name {
    ///     "OIDC_ISS" => Ok("https://issuer.example.com".to_owned()),
    ///     "OIDC_SCP" => Ok("openid,profile".to_owned()),
    ///     _ => Err(VarError::NotPresent),
    /// });
    ///
    /// let settings = KubeloginSettings::from_env(&env);
    /// assert_eq!(settings.client_id, "");
    /// assert_eq!(settings.extra_scopes, vec!["openid", "profile"]);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Self {
        let issuer_url = read_var(env, ISSUER_ENV);
        let client_id = read_var(env, CLIENT_ID_ENV);
        let extra_scopes = read_var(env, SCOPES_ENV).split(SCOPE_SEPARATOR);
        debug!(
            issuer_url = %issuer_url,
            client_id = %client_id,
            scope_count = extra_scopes.len(),
            "read kubelogin settings"
        );
        Self {
            issuer_url,
            client_id,
            extra_scopes,
        }
    }

    /// Build the cache key these settings identify.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_kubelogin(
            self.issuer_url.clone(),
            self.client_id.clone(),
            self.extra_scopes.iter().cloned(),
        )
    }
}

fn read_var<E: Env>(env: &E, name: &str) -> ByteString {
    match env.raw(name) {
        Ok(value) => value.into(),
        Err(VarError::NotPresent) => ByteString::new(),
        Err(VarError::NotUnicode(value)) => {
            debug!(variable = name, "variable is not valid Unicode, using its raw bytes");
            value.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use env_lock::lock_env;
    use mockable::DefaultEnv;
    use rstest::rstest;

    use crate::test_support::mock_env;

    #[rstest]
    fn unset_variables_default_to_empty() {
        let settings = KubeloginSettings::from_env(&mock_env(&[]));

        assert_eq!(settings.issuer_url, "");
        assert_eq!(settings.client_id, "");
        assert_eq!(settings.extra_scopes, vec![""]);
    }

    #[rstest]
    #[case("", vec![""])]
    #[case("openid", vec!["openid"])]
    #[case("openid,profile", vec!["openid", "profile"])]
    #[case("a,,b", vec!["a", "", "b"])]
    #[case("openid,", vec!["openid", ""])]
    #[case(",", vec!["", ""])]
    #[case(" openid , profile", vec![" openid ", " profile"])]
    fn scopes_split_on_every_comma(#[case] raw: &str, #[case] expected: Vec<&str>) {
        let settings = KubeloginSettings::from_env(&mock_env(&[(SCOPES_ENV, raw)]));

        assert_eq!(settings.extra_scopes, expected);
    }

    #[rstest]
    fn explicit_empty_scopes_match_unset_scopes() {
        let unset = KubeloginSettings::from_env(&mock_env(&[]));
        let empty = KubeloginSettings::from_env(&mock_env(&[(SCOPES_ENV, "")]));

        assert_eq!(unset, empty);
        assert_eq!(unset.cache_key(), empty.cache_key());
    }

    #[rstest]
    fn cache_key_carries_the_settings() {
        let settings = KubeloginSettings::from_env(&mock_env(&[
            (ISSUER_ENV, "https://issuer.example.com"),
            (CLIENT_ID_ENV, "my-client"),
            (SCOPES_ENV, "openid,profile"),
        ]));

        let key = settings.cache_key();
        assert_eq!(key.provider.issuer_url, "https://issuer.example.com");
        assert_eq!(key.provider.client_id, "my-client");
        assert_eq!(key.provider.extra_scopes, vec!["openid", "profile"]);
        assert!(key.provider.use_access_token);
    }

    #[cfg(unix)]
    #[rstest]
    fn values_that_are_not_unicode_keep_their_bytes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        use crate::test_support::mock_env_os;

        let settings = KubeloginSettings::from_env(&mock_env_os([
            (ISSUER_ENV, OsString::from_vec(vec![b'h', 0xff])),
            (CLIENT_ID_ENV, OsString::from_vec(vec![0xfe])),
            (SCOPES_ENV, OsString::from_vec(vec![b'a', 0xff, b',', b'b'])),
        ]));

        assert_eq!(settings.issuer_url.as_bytes(), &[b'h', 0xff]);
        assert_eq!(settings.client_id.as_bytes(), &[0xfe]);
        assert_eq!(
            settings.extra_scopes,
            vec![ByteString::from(vec![b'a', 0xff]), ByteString::from("b")]
        );

        let unset = KubeloginSettings::from_env(&mock_env(&[]));
        assert_ne!(settings.cache_key(), unset.cache_key());
    }

    #[rstest]
    fn process_environment_is_read_through_default_env() {
        let _guard = lock_env([
            (ISSUER_ENV, Some("https://issuer.example.com")),
            (CLIENT_ID_ENV, Some("my-client")),
            (SCOPES_ENV, None::<&str>),
        ]);

        let settings = KubeloginSettings::from_env(&DefaultEnv::new());
        assert_eq!(settings.issuer_url, "https://issuer.example.com");
        assert_eq!(settings.client_id, "my-client");
        assert_eq!(settings.extra_scopes, vec![""]);
    }
}
