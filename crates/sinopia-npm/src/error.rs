use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum NpmError {
    /// The npm executable could not be started at all. Usually this means
    /// npm is not installed or not on `$PATH`.
    #[error("Failed to spawn `{0}`.")]
    #[diagnostic(
        code(sinopia_npm::spawn_error),
        help("Make sure npm is installed and on your $PATH, or point to it with `--npm`.")
    )]
    SpawnError(String, #[source] std::io::Error),

    /// npm ran but exited unsuccessfully.
    #[error("`{command}` exited with code {}: {stderr}", .status.code().unwrap_or(-1))]
    #[diagnostic(code(sinopia_npm::command_failed))]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// npm printed something that wasn't valid UTF-8.
    #[error("Output of `{0}` was not valid UTF-8.")]
    #[diagnostic(code(sinopia_npm::utf8_error))]
    Utf8Error(String, #[source] std::string::FromUtf8Error),
}

pub(crate) type Result<T> = std::result::Result<T, NpmError>;
