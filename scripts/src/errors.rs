//! Definitions of errors that can occur during the execution of the wiring scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use reconciler::errors::ConfigError;

/// Errors that can occur during the execution of the wiring scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// A registry or catalog configuration error
    Config(ConfigError),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl Error for ScriptError {}

impl From<ConfigError> for ScriptError {
    fn from(err: ConfigError) -> Self {
        ScriptError::Config(err)
    }
}
