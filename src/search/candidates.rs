//! Bounded pool of candidates between producers and the matcher.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};

use crate::crypto::Keypair;

use super::StopSignal;

/// How long a blocked `publish` or `take` waits before re-checking the
/// stop signal. Shutdown latency of a blocked unit is bounded by this.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A generated keypair on its way to the matcher.
///
/// The producer renders the checksummed address so the matcher only
/// does string comparison.
#[derive(Debug)]
pub struct Candidate {
    keypair: Keypair,
    address: String,
}

impl Candidate {
    pub fn new(keypair: Keypair) -> Self {
        let address = keypair.address().to_checksum();
        Self { keypair, address }
    }

    /// EIP-55 address with the `0x` marker.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn into_keypair(self) -> Keypair {
        self.keypair
    }
}

/// Multi-producer, single-consumer bounded queue of candidates.
///
/// Both ends block on the queue and give up once the stop signal fires.
#[derive(Clone)]
pub struct CandidatePool {
    tx: Sender<Candidate>,
    rx: Receiver<Candidate>,
}

impl CandidatePool {
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Publishes a candidate, waiting while the pool is full.
    ///
    /// Returns `false` without publishing once `stop` has fired.
    #[must_use]
    pub fn publish(&self, candidate: Candidate, stop: &StopSignal) -> bool {
        let mut pending = candidate;
        loop {
            if stop.is_fired() {
                return false;
            }
            match self.tx.send_timeout(pending, POLL_INTERVAL) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(c)) => pending = c,
                Err(SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }

    /// Takes the next candidate, waiting while the pool is empty.
    ///
    /// Returns `None` once `stop` has fired.
    pub fn take(&self, stop: &StopSignal) -> Option<Candidate> {
        loop {
            if stop.is_fired() {
                return None;
            }
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(candidate) => return Some(candidate),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.tx.capacity()
    }
}
