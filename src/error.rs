use miette::Diagnostic;
use sinopia_client::SinopiaClientError;
use sinopia_config::SinopiaConfigError;
use sinopia_npm::NpmError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SinopiaAuthError {
    /// Reading or writing npm's configuration failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    NpmError(#[from] NpmError),

    /// Talking to the registry failed, or its URL was unusable.
    #[error(transparent)]
    #[diagnostic(transparent)]
    ClientError(#[from] SinopiaClientError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigError(#[from] SinopiaConfigError),

    #[error("Failed to write output.")]
    #[diagnostic(code(sinopia_auth::io_error))]
    IoError(#[from] std::io::Error),
}
