use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;

/// Read access to environment variables.
///
/// Settings resolution only reads through this trait, so tests can supply a map instead of
/// touching the process environment.
pub trait EnvSource {
    /// Raw value of `key`.
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Value of `key` as text. A value that is not valid Unicode is returned untouched in `Err`.
    fn var(&self, key: &str) -> Result<Option<String>, OsString> {
        self.var_os(key).map(OsString::into_string).transpose()
    }

    /// Truthiness of a flag variable: set and non-empty.
    fn flag(&self, key: &str) -> bool {
        self.var_os(key).is_some_and(|value| !value.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

impl EnvSource for [(&str, &str)] {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| OsString::from(*v))
    }
}

impl<const N: usize> EnvSource for [(&str, &str); N] {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.as_slice().var_os(key)
    }
}
