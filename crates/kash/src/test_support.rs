//! Fixtures shared by the unit tests.

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;

use mockable::MockEnv;

/// A `MockEnv` serving `vars`. Variables not listed are unset.
pub(crate) fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    mock_env_os(vars.iter().map(|(name, value)| (*name, OsString::from(*value))))
}

/// Like [`mock_env`], for values that need not be valid Unicode.
pub(crate) fn mock_env_os<'a>(vars: impl IntoIterator<Item = (&'a str, OsString)>) -> MockEnv {
    let values: HashMap<String, OsString> = vars
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect();
    let mut env = MockEnv::new();
    env.expect_raw()
        .times(0..)
        .returning(move |key| match values.get(key) {
            Some(value) => value.clone().into_string().map_err(VarError::NotUnicode),
            None => Err(VarError::NotPresent),
        });
    env
}
