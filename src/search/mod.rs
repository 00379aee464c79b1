//! The producer/consumer search loop.
//!
//! - `signal`: one-shot stop signal shared by every unit of a run
//! - `candidates`: bounded candidate pool between producers and the matcher
//! - `producer`: generator threads
//! - `matcher`: the single consumer testing candidates against the pattern
//! - `driver`: starts producers, runs the matcher, joins everything

mod candidates;
mod driver;
mod matcher;
mod producer;
mod signal;

pub use candidates::{Candidate, CandidatePool, POLL_INTERVAL};
pub use driver::{Driver, SearchOutcome};
pub use matcher::Matcher;
pub use producer::{Producer, ProducerStats};
pub use signal::StopSignal;
