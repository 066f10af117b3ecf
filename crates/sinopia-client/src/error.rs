use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SinopiaClientError {
    /// The registry could not be parsed as a URL.
    #[error("Invalid registry URL `{0}`.")]
    #[diagnostic(
        code(sinopia_client::url_parse_error),
        help("Set a full registry URL with `npm config set registry <url>`.")
    )]
    UrlParseError(String, #[source] url::ParseError),

    /// The registry URL parsed, but has no host to scope credentials to.
    #[error("Registry URL `{0}` has no host.")]
    #[diagnostic(code(sinopia_client::missing_host))]
    MissingHost(String),

    /// The request never got a response.
    #[error("Request to {0} failed.")]
    #[diagnostic(code(sinopia_client::request_error))]
    RequestError(String, #[source] reqwest::Error),

    /// The HTTP client itself could not be built.
    #[error("Failed to build HTTP client.")]
    #[diagnostic(code(sinopia_client::build_error))]
    BuildError(#[source] reqwest::Error),
}
