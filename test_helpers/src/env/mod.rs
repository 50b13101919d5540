//! Exclusive access to one environment-variable prefix for a test.
//!
//! [`isolate`] takes a global lock, removes every `PREFIX_*` variable, sets
//! the requested ones, and returns an [`EnvScope`]. Dropping the scope puts
//! every touched variable back, newest first, and then releases the lock.
//! The lock is re-entrant, so a test may nest scopes on one thread; inner
//! scopes must drop first.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! {
//!     let mut scope = env::isolate("DOC_APP", [("PORT", "8080")]);
//!     scope.set("HOST", "localhost");
//!     assert_eq!(std::env::var("DOC_APP_PORT").as_deref(), Ok("8080"));
//!     assert_eq!(std::env::var("DOC_APP_HOST").as_deref(), Ok("localhost"));
//! }
//! assert!(std::env::var("DOC_APP_PORT").is_err());
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// A variable's value before the scope first touched it.
struct Saved {
    key: String,
    original: Option<OsString>,
}

/// Holds the environment lock and the prior state of every variable it
/// changed.
#[must_use = "dropping restores the environment and releases the lock"]
pub struct EnvScope {
    prefix: String,
    saved: Vec<Saved>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    fn key(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.prefix)
    }

    fn save(&mut self, key: &str) {
        self.saved.push(Saved {
            key: key.to_owned(),
            original: env::var_os(key),
        });
    }

    /// The prefix this scope owns.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sets `PREFIX_<suffix>` until the scope drops.
    pub fn set(&mut self, suffix: &str, value: impl AsRef<OsStr>) {
        let key = self.key(suffix);
        self.save(&key);
        // SAFETY: `ENV_MUTEX` is held for the scope's lifetime.
        unsafe { env::set_var(&key, value) };
    }

    /// Removes `PREFIX_<suffix>` until the scope drops.
    pub fn remove(&mut self, suffix: &str) {
        let key = self.key(suffix);
        self.save(&key);
        // SAFETY: `ENV_MUTEX` is held for the scope's lifetime.
        unsafe { env::remove_var(&key) };
    }

    fn clear_prefix(&mut self) {
        let head = format!("{}_", self.prefix);
        let names: Vec<String> = env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .filter(|name| name.starts_with(&head))
            .collect();
        for name in names {
            self.save(&name);
            // SAFETY: `ENV_MUTEX` is held for the scope's lifetime.
            unsafe { env::remove_var(&name) };
        }
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("prefix", &self.prefix)
            .field("touched", &self.saved.len())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(Saved { key, original }) = self.saved.pop() {
            match original {
                // SAFETY: the lock field is dropped only after this body runs.
                Some(value) => unsafe { env::set_var(&key, value) },
                // SAFETY: as above.
                None => unsafe { env::remove_var(&key) },
            }
        }
    }
}

/// Clears every `PREFIX_*` variable, then sets `PREFIX_<suffix>` for each
/// pair, holding the lock until the scope drops.
pub fn isolate<I, S, V>(prefix: &str, vars: I) -> EnvScope
where
    I: IntoIterator<Item = (S, V)>,
    S: AsRef<str>,
    V: AsRef<OsStr>,
{
    let mut scope = EnvScope {
        prefix: prefix.to_owned(),
        saved: Vec::new(),
        _lock: ENV_MUTEX.lock(),
    };
    scope.clear_prefix();
    for (suffix, value) in vars {
        scope.set(suffix.as_ref(), value);
    }
    scope
}

#[cfg(test)]
mod tests;
