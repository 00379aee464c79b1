//! Command-line configuration and the immutable search settings built from it.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::crypto::ADDRESS_HEX_LEN;
use crate::matcher::{Pattern, PatternPosition};

/// Default capacity of the candidate pool.
pub const DEFAULT_POOL_CAPACITY: usize = 1_000;

/// Default number of candidates between progress lines.
pub const DEFAULT_PROGRESS_EVERY: u64 = 10_000;

/// What the binary should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Search for a matching keypair
    #[default]
    Generate,
    /// Print the address of an existing private key
    Verify,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generate" => Ok(Command::Generate),
            "verify" => Ok(Command::Verify),
            _ => Err(format!("Unknown command: {} (valid: generate, verify)", s)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Generate => write!(f, "generate"),
            Command::Verify => write!(f, "verify"),
        }
    }
}

/// Ethereum vanity address search
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Command to run: generate or verify
    #[arg(long, default_value = "generate")]
    pub cmd: Command,

    /// Number of producer threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub num_workers: Option<usize>,

    /// Literal to search for (hex characters, matched case-sensitively against the EIP-55 form)
    #[arg(short = 'p', long, default_value = "")]
    pub desired_pattern: String,

    /// Where the pattern must appear: prefix or suffix
    #[arg(short = 't', long, default_value = "prefix")]
    pub pattern_position: PatternPosition,

    /// File to write the result to (prints to stdout when omitted)
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Print a banner, periodic progress and final statistics
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Candidates between progress lines in verbose mode
    #[arg(long, default_value = "10000")]
    pub progress_every: u64,

    /// Capacity of the candidate pool shared by producers and the matcher
    #[arg(long, default_value = "1000")]
    pub pool_capacity: usize,

    /// Private key for verify (prompted without echo when omitted)
    #[arg(long)]
    pub priv_hex: Option<String>,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.num_workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pattern = &self.desired_pattern;

        if !pattern.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidPattern(
                "Pattern must contain only hex characters (0-9, a-f, A-F)".into(),
            ));
        }

        if pattern.len() > ADDRESS_HEX_LEN {
            return Err(ConfigError::InvalidPattern(format!(
                "Pattern cannot be longer than {} characters (full address)",
                ADDRESS_HEX_LEN
            )));
        }

        if self.num_workers == Some(0) {
            return Err(ConfigError::InvalidSetting(
                "num-workers must be at least 1".into(),
            ));
        }

        if self.pool_capacity == 0 {
            return Err(ConfigError::InvalidSetting(
                "pool-capacity must be at least 1".into(),
            ));
        }

        if self.progress_every == 0 {
            return Err(ConfigError::InvalidSetting(
                "progress-every must be at least 1".into(),
            ));
        }

        Ok(())
    }

    pub fn pattern(&self) -> Pattern {
        Pattern::new(self.desired_pattern.clone(), self.pattern_position)
    }

    /// Freezes the search-related options into [`SearchSettings`].
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            workers: self.worker_count(),
            pattern: self.pattern(),
            capacity: self.pool_capacity,
            progress_every: self.verbose.then_some(self.progress_every),
        }
    }
}

/// Immutable parameters of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Number of producer threads
    pub workers: usize,
    /// Target pattern
    pub pattern: Pattern,
    /// Candidate pool capacity
    pub capacity: usize,
    /// Report progress every N candidates, if set
    pub progress_every: Option<u64>,
}

impl SearchSettings {
    /// Settings with the default pool capacity and progress reporting off.
    pub fn new(pattern: Pattern, workers: usize) -> Self {
        Self {
            workers,
            pattern,
            capacity: DEFAULT_POOL_CAPACITY,
            progress_every: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("vanity_search").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.cmd, Command::Generate);
        assert_eq!(config.desired_pattern, "");
        assert_eq!(config.pattern_position, PatternPosition::Prefix);
        assert_eq!(config.pool_capacity, DEFAULT_POOL_CAPACITY);
        assert_eq!(config.progress_every, DEFAULT_PROGRESS_EVERY);
        assert!(config.out.is_none());
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_full_command_line() {
        let config = parse(&[
            "--cmd",
            "generate",
            "--num-workers",
            "8",
            "--desired-pattern",
            "dEAd",
            "--pattern-position",
            "suffix",
            "-o",
            "out.txt",
            "--verbose",
        ]);
        assert!(config.validate().is_ok());

        let settings = config.search_settings();
        assert_eq!(settings.workers, 8);
        assert_eq!(settings.pattern, Pattern::new("dEAd", PatternPosition::Suffix));
        assert_eq!(settings.progress_every, Some(DEFAULT_PROGRESS_EVERY));
        assert_eq!(config.out, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_verify_command() {
        let config = parse(&["--cmd", "verify", "--priv-hex", "01"]);
        assert_eq!(config.cmd, Command::Verify);
        assert_eq!(config.priv_hex.as_deref(), Some("01"));
    }

    #[test]
    fn test_progress_disabled_without_verbose() {
        assert_eq!(parse(&[]).search_settings().progress_every, None);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(parse(&["-p", "xyz"]).validate().is_err());
        assert!(parse(&["-p", &"a".repeat(41)]).validate().is_err());
    }

    #[test]
    fn test_invalid_settings() {
        assert!(parse(&["-w", "0"]).validate().is_err());
        assert!(parse(&["--pool-capacity", "0"]).validate().is_err());
        assert!(parse(&["--progress-every", "0"]).validate().is_err());
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let args = ["vanity_search", "--cmd", "mine"];
        assert!(Config::try_parse_from(args).is_err());
    }
}
