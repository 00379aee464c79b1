//! The single consumer that tests candidates against the pattern.

use crate::matcher::Pattern;

use super::{Candidate, CandidatePool, StopSignal};

/// Drains the candidate pool until a candidate matches or the run stops.
pub struct Matcher {
    pattern: Pattern,
    progress_every: Option<u64>,
    checked: u64,
}

impl Matcher {
    /// `progress_every` enables a progress report every N non-matching
    /// candidates, starting with the first one.
    pub fn new(pattern: Pattern, progress_every: Option<u64>) -> Self {
        Self {
            pattern,
            progress_every: progress_every.filter(|&n| n > 0),
            checked: 0,
        }
    }

    /// Runs on the calling thread.
    ///
    /// On a match the stop signal is fired and the candidate returned.
    /// Returns `None` if the signal fires first. `report` receives the
    /// step number and the latest address when progress is enabled.
    pub fn run(
        &mut self,
        pool: &CandidatePool,
        stop: &StopSignal,
        report: &mut dyn FnMut(u64, &str),
    ) -> Option<Candidate> {
        while let Some(candidate) = pool.take(stop) {
            let step = self.checked;
            self.checked += 1;

            if self.pattern.matches(candidate.address()) {
                stop.fire();
                return Some(candidate);
            }

            if let Some(every) = self.progress_every {
                if step % every == 0 {
                    report(step, candidate.address());
                }
            }
        }
        None
    }

    /// Number of candidates taken from the pool so far.
    pub fn checked(&self) -> u64 {
        self.checked
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}
