use std::path::PathBuf;
use std::str::FromStr;

pub use clap::ArgMatches;
use clap::parser::ValueSource;
pub use config::Config as SinopiaConfig;
use config::{ConfigError, Environment, File};
use miette::{Diagnostic, Result};
use thiserror::Error;

/// Fills in command fields that weren't given on the command line from
/// loaded configuration.
pub trait SinopiaConfigLayer {
    fn layer_config(&mut self, _matches: &ArgMatches, _config: &SinopiaConfig) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SinopiaConfigError {
    #[error(transparent)]
    #[diagnostic(code(sinopia_config::config_error))]
    ConfigError(#[from] ConfigError),

    #[error("Invalid value for `{key}`: {reason}")]
    #[diagnostic(code(sinopia_config::invalid_value))]
    InvalidValue { key: String, reason: String },
}

/// Overwrites `field` with the configured value for `key`, unless the user
/// passed `key` explicitly on the command line.
pub fn layer_value<T: FromStr>(
    matches: &ArgMatches,
    config: &SinopiaConfig,
    key: &str,
    field: &mut T,
) -> Result<(), SinopiaConfigError> {
    if matches!(matches.value_source(key), Some(ValueSource::CommandLine)) {
        return Ok(());
    }
    let value = match config.get_string(key) {
        Ok(value) => value,
        Err(ConfigError::NotFound(_)) => return Ok(()),
        Err(e) => {
            return Err(SinopiaConfigError::InvalidValue {
                key: key.into(),
                reason: e.to_string(),
            })
        }
    };
    *field = value
        .parse()
        .map_err(|_| SinopiaConfigError::InvalidValue {
            key: key.into(),
            reason: format!("{value:?} could not be parsed"),
        })?;
    Ok(())
}

pub struct SinopiaConfigOptions {
    global: bool,
    env: bool,
    global_config_file: Option<PathBuf>,
}

impl Default for SinopiaConfigOptions {
    fn default() -> Self {
        SinopiaConfigOptions {
            global: true,
            env: true,
            global_config_file: None,
        }
    }
}

impl SinopiaConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    pub fn env(mut self, env: bool) -> Self {
        self.env = env;
        self
    }

    pub fn global_config_file(mut self, file: Option<PathBuf>) -> Self {
        self.global_config_file = file;
        self
    }

    pub fn load(self) -> Result<SinopiaConfig, SinopiaConfigError> {
        let mut builder = SinopiaConfig::builder();
        if self.global {
            if let Some(config_file) = self.global_config_file {
                builder = builder.add_source(File::from(config_file).required(false));
            }
        }
        if self.env {
            builder = builder.add_source(Environment::with_prefix("sinopia_auth"));
        }
        Ok(builder.build()?)
    }
}
