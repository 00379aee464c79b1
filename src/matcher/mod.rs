//! Pattern matching for Ethereum addresses.
//!
//! Only literal matches are supported:
//! - Prefix: the literal follows the `0x` marker
//! - Suffix: the literal ends the address

mod pattern;

pub use pattern::{Pattern, PatternPosition};
