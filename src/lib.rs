//! # vanity_search
//!
//! Parallel brute-force search for Ethereum vanity addresses.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation and address derivation
//! - `matcher`: Literal prefix/suffix patterns
//! - `search`: Producer threads, the bounded candidate pool and the matcher
//! - `verify`: Address lookup for an existing private key
//! - `output`: Result rendering
//! - `config`: Command line and search settings

pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod output;
pub mod search;
pub mod verify;

pub use config::{Command, Config, SearchSettings};
pub use crypto::{Address, KeyGenerator, Keypair, Secp256k1Generator};
pub use error::{Error, Result};
pub use matcher::{Pattern, PatternPosition};
pub use search::{Driver, SearchOutcome, StopSignal};
