//! Configure npm to authenticate against a private sinopia registry.
//!
//! Reads the registry npm is currently using, requests its OAuth authorize
//! endpoint, and stores an auth token and `always-auth = true` in npm's
//! config, scoped to that registry.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches as _, Parser};
use directories::ProjectDirs;
use miette::{IntoDiagnostic, Result};
use sinopia_client::SinopiaClient;
use sinopia_config::{layer_value, SinopiaConfig, SinopiaConfigLayer, SinopiaConfigOptions};
use sinopia_npm::NpmCli;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

pub use configure::{Configurator, Outcome, DEFAULT_REGISTRY_HOST, PLACEHOLDER_TOKEN};
pub use error::SinopiaAuthError;

mod configure;
mod error;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct SinopiaAuth {
    /// File to read configuration values from.
    #[arg(long)]
    config: Option<PathBuf>,

    /// npm executable used to read and write npm's configuration.
    #[arg(long, default_value = "npm")]
    npm: String,

    /// Verify the registry's TLS certificate when requesting its authorize
    /// endpoint.
    #[arg(long)]
    strict_ssl: bool,

    /// Log output level/directive. Supports plain loglevels (off, error,
    /// warn, info, debug, trace) as well as more advanced directives in the
    /// format `target[span{field=value}]=level`.
    #[arg(long, default_value = "warn")]
    loglevel: String,

    /// Disable all output
    #[arg(long, short)]
    quiet: bool,
}

impl SinopiaAuth {
    fn setup_logging(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(
                EnvFilter::builder()
                    .with_default_directive(if self.quiet {
                        LevelFilter::OFF.into()
                    } else {
                        self.loglevel.parse().into_diagnostic()?
                    })
                    .from_env_lossy(),
            )
            .init();
        Ok(())
    }

    pub async fn load() -> Result<ExitCode> {
        let start = std::time::Instant::now();
        let matches = SinopiaAuth::command().get_matches();
        let mut auth = SinopiaAuth::from_arg_matches(&matches).into_diagnostic()?;
        let cfg = SinopiaConfigOptions::new()
            .global_config_file(auth.config.clone().or_else(|| {
                ProjectDirs::from("", "", "sinopia-auth")
                    .map(|d| d.config_dir().to_owned().join("sinopia-auth.toml"))
            }))
            .load()?;
        auth.layer_config(&matches, &cfg)?;
        auth.setup_logging()?;
        let outcome = auth.execute().await?;
        tracing::info!("Ran in {}s", start.elapsed().as_millis() as f32 / 1000.0);
        Ok(outcome.exit_code())
    }

    async fn execute(self) -> Result<Outcome> {
        tracing::debug!("Running with: {self:#?}");
        let npm = NpmCli::new(&self.npm);
        let client = SinopiaClient::new(self.strict_ssl)?;
        let out: Box<dyn Write> = if self.quiet {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        };
        Ok(Configurator::new(npm, client, out).run().await?)
    }
}

impl SinopiaConfigLayer for SinopiaAuth {
    fn layer_config(&mut self, args: &ArgMatches, conf: &SinopiaConfig) -> Result<()> {
        layer_value(args, conf, "npm", &mut self.npm)?;
        layer_value(args, conf, "strict_ssl", &mut self.strict_ssl)?;
        layer_value(args, conf, "loglevel", &mut self.loglevel)?;
        layer_value(args, conf, "quiet", &mut self.quiet)?;
        Ok(())
    }
}
