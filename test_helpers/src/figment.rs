//! Helpers for running parser tests inside a `figment::Jail`.
//!
//! A jail gives a test its own working directory and restores any
//! environment variables it sets, which suits tests that combine YAML files
//! on disk with `PREFIX_*` variables from the real process environment.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside the jail and returns its absolute path.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the jail directory is
/// not valid UTF-8.
pub fn write_yaml(jail: &mut figment::Jail, name: &str, contents: &str) -> figment::error::Result<Utf8PathBuf> {
    jail.create_file(name, contents)?;
    Utf8PathBuf::from_path_buf(jail.directory().join(name))
        .map_err(|path| figment_error(format!("non UTF-8 jail path: {}", path.display())))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers often own the error and passing by value avoids extra clones"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
