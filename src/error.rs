//! Error types shared by the search core and the command-line front end.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    /// The OS random source could not supply key material.
    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),

    /// A supplied private key is not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The result file could not be created or written.
    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("producer {0} panicked")]
    ProducerPanicked(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
