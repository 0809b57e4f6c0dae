// SPDX-License-Identifier: MPL-2.0
//! Error types for the playback engine and its configuration layer.

use std::fmt;

/// Errors surfaced by the engine and the configuration module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The engine was opened with an empty media list. The engine refuses
    /// to arm any timers in this case and stays closed.
    EmptySequence,
    /// I/O failure while reading or writing the configuration file.
    Io(String),
    /// Malformed configuration data.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptySequence => write!(f, "Media sequence is empty"),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
