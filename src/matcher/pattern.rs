//! Literal prefix/suffix patterns.

use std::fmt;
use std::str::FromStr;

use crate::crypto::Address;

/// Where the literal must appear in the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternPosition {
    /// At the start, right after the `0x` marker
    #[default]
    Prefix,
    /// At the end
    Suffix,
}

impl FromStr for PatternPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prefix" | "start" | "begin" => Ok(PatternPosition::Prefix),
            "suffix" | "end" => Ok(PatternPosition::Suffix),
            _ => Err(format!("Unknown pattern position: {}", s)),
        }
    }
}

impl fmt::Display for PatternPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternPosition::Prefix => write!(f, "prefix"),
            PatternPosition::Suffix => write!(f, "suffix"),
        }
    }
}

/// A vanity pattern, fixed for the whole run.
///
/// Matching is case-sensitive against the EIP-55 rendering of the address,
/// so `"dEAD"` and `"dead"` are different targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    literal: String,
    position: PatternPosition,
}

impl Pattern {
    pub fn new(literal: impl Into<String>, position: PatternPosition) -> Self {
        Self {
            literal: literal.into(),
            position,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn position(&self) -> PatternPosition {
        self.position
    }

    /// Tests an address string, ignoring a leading `0x` marker.
    ///
    /// An empty literal matches every address.
    #[inline]
    pub fn matches(&self, address: &str) -> bool {
        let body = address.strip_prefix("0x").unwrap_or(address);
        match self.position {
            PatternPosition::Prefix => body.starts_with(&self.literal),
            PatternPosition::Suffix => body.ends_with(&self.literal),
        }
    }

    pub fn matches_address(&self, address: &Address) -> bool {
        self.matches(&address.to_checksum())
    }

    /// Expected number of candidates before a hit.
    ///
    /// A digit has 16 equally likely values. A letter also has to land on
    /// the right EIP-55 case, which halves its odds again.
    pub fn estimated_difficulty(&self) -> u64 {
        self.literal.chars().fold(1u64, |acc, c| {
            let odds = if c.is_ascii_digit() { 16 } else { 32 };
            acc.saturating_mul(odds)
        })
    }

    pub fn difficulty_description(&self) -> String {
        match self.estimated_difficulty() {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self.literal, self.position)
    }
}
