use std::io::Write;
use std::process::ExitCode;

use sinopia_client::{scope_key, Authorize};
use sinopia_npm::NpmConfig;

use crate::error::SinopiaAuthError;

/// Host of the public npm registry. We refuse to write credentials for it.
pub const DEFAULT_REGISTRY_HOST: &str = "registry.npmjs.org";

/// Token written to npm's config. The authorize response is never read, so
/// there is no real token to store yet.
// TODO: replace with the token from the authorize response once the
// registry plugin documents its response body.
pub const PLACEHOLDER_TOKEN: &str = "asdasdas";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// npm still points at the public registry. Nothing was changed.
    DefaultRegistry,
    /// Credentials were written under `scope`.
    Configured { scope: String },
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::DefaultRegistry => ExitCode::from(1),
            Outcome::Configured { .. } => ExitCode::SUCCESS,
        }
    }
}

/// Points npm's credentials for the configured registry at a sinopia
/// server.
pub struct Configurator<N, A, W> {
    npm: N,
    client: A,
    out: W,
}

impl<N, A, W> Configurator<N, A, W>
where
    N: NpmConfig,
    A: Authorize,
    W: Write,
{
    pub fn new(npm: N, client: A, out: W) -> Self {
        Self { npm, client, out }
    }

    /// Reads npm's registry, requests its authorize endpoint, and stores an
    /// auth token plus `always-auth` under the registry's scope key.
    ///
    /// Every step must succeed before the next runs. The two config writes
    /// aren't atomic: if the second fails, the first stays written.
    pub async fn run(&mut self) -> Result<Outcome, SinopiaAuthError> {
        // Kept as npm printed it, newline and all.
        let registry = self.npm.get("registry")?;
        tracing::debug!("npm registry: {registry:?}");

        if registry.contains(DEFAULT_REGISTRY_HOST) {
            writeln!(
                self.out,
                "You are using default npm registry. Please update your registry."
            )?;
            writeln!(self.out, "Command: npm config set registry <url>")?;
            return Ok(Outcome::DefaultRegistry);
        }

        writeln!(self.out, "Your sinopia registry is {registry}")?;

        self.client.authorize(&registry).await?;

        let scope = scope_key(&registry)?;
        tracing::warn!("Writing a placeholder auth token for {scope}.");
        self.npm
            .set(&format!("{scope}:_authToken"), PLACEHOLDER_TOKEN)?;
        self.npm.set(&format!("{scope}:always-auth"), "true")?;
        tracing::info!("Configured npm credentials for {scope}");

        Ok(Outcome::Configured { scope })
    }
}
