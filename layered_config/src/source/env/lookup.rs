//! Access to an environment-variable namespace.

use std::collections::HashMap;
use std::env::VarError;
use std::fmt;

/// Read access to environment variables.
pub trait EnvLookup: fmt::Debug {
    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::NotPresent`] when unset and
    /// [`VarError::NotUnicode`] when the value is not valid unicode.
    fn var(&self, name: &str) -> Result<String, VarError>;
}

/// The real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

/// An in-memory environment, useful for embedding and tests.
///
/// # Examples
///
/// ```
/// use layered_config::{EnvLookup, MapEnv};
/// let env = MapEnv::new().with("MY_APP_PORT", "8080");
/// assert_eq!(env.var("MY_APP_PORT").ok().as_deref(), Some("8080"));
/// assert!(env.var("MY_APP_HOST").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// An empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, consuming and returning the environment.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Removes a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        self.vars.get(name).cloned().ok_or(VarError::NotPresent)
    }
}
