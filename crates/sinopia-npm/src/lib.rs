//! Read and write npm's persistent configuration.
//!
//! npm owns its config files (`.npmrc`), so instead of editing them directly
//! this crate goes through `npm config get` and `npm config set`. The
//! [`NpmConfig`] trait is the seam callers depend on, which lets them swap
//! the real CLI for an in-memory store.

use std::ffi::{OsStr, OsString};
use std::process::{Command, Output, Stdio};

pub use error::NpmError;
use error::Result;

mod error;

/// Key/value access to npm's configuration.
pub trait NpmConfig {
    /// Returns the value of `key` exactly as npm printed it, trailing
    /// newline included.
    fn get(&self, key: &str) -> Result<String>;

    /// Persists `value` under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: NpmConfig + ?Sized> NpmConfig for &T {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// [`NpmConfig`] backed by the `npm` executable.
#[derive(Debug, Clone)]
pub struct NpmCli {
    bin: OsString,
}

impl NpmCli {
    /// Uses `bin` as the npm executable. Bare names are looked up on `$PATH`
    /// so that shims like `npm.cmd` are found on Windows.
    pub fn new(bin: impl AsRef<OsStr>) -> Self {
        let bin = bin.as_ref();
        let bin = match which::which(bin) {
            Ok(path) => path.into_os_string(),
            Err(e) => {
                tracing::debug!("Could not resolve {} on $PATH: {e}", bin.to_string_lossy());
                bin.to_owned()
            }
        };
        Self { bin }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let command = self.describe(args);
        tracing::debug!("Running `{command}`");
        let out = Command::new(&self.bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| NpmError::SpawnError(command.clone(), e))?;
        if out.status.success() {
            Ok(out)
        } else {
            Err(NpmError::CommandFailed {
                command,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_owned(),
            })
        }
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut command = self.bin.to_string_lossy().into_owned();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}

impl NpmConfig for NpmCli {
    fn get(&self, key: &str) -> Result<String> {
        let args = ["config", "get", key];
        let out = self.run(&args)?;
        String::from_utf8(out.stdout).map_err(|e| NpmError::Utf8Error(self.describe(&args), e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "set", key, value])?;
        tracing::trace!("npm config: {key} updated");
        Ok(())
    }
}
