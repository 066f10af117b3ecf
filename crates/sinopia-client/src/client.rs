use reqwest::{Client, ClientBuilder};

use crate::SinopiaClientError;

/// HTTP client for a sinopia registry.
#[derive(Clone, Debug)]
pub struct SinopiaClient {
    pub(crate) client: Client,
    pub(crate) strict_ssl: bool,
}

impl SinopiaClient {
    /// Builds a client. With `strict_ssl` off, invalid and self-signed
    /// certificates are accepted, on the registry and on anything it
    /// redirects to.
    pub fn new(strict_ssl: bool) -> Result<Self, SinopiaClientError> {
        Ok(Self {
            client: ClientBuilder::new()
                .user_agent("sinopia-auth")
                .danger_accept_invalid_certs(!strict_ssl)
                .build()
                .map_err(SinopiaClientError::BuildError)?,
            strict_ssl,
        })
    }
}
