//! Producer threads: generate keypairs and publish them as candidates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::crypto::KeyGenerator;
use crate::error::Result;

use super::{Candidate, CandidatePool, StopSignal};

/// Keys generated per producer before the shared counter is updated.
const STATS_BATCH: u64 = 256;

/// Counters shared by all producers of one run.
#[derive(Debug, Default)]
pub struct ProducerStats {
    keys_generated: AtomicU64,
}

impl ProducerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total keys generated.
    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }

    fn record(&self, keys: u64) {
        self.keys_generated.fetch_add(keys, Ordering::Relaxed);
    }
}

/// One generate-and-publish worker.
pub struct Producer<G> {
    id: usize,
    generator: G,
    pool: CandidatePool,
    stop: StopSignal,
    stats: Arc<ProducerStats>,
}

impl<G: KeyGenerator> Producer<G> {
    pub fn new(
        id: usize,
        generator: G,
        pool: CandidatePool,
        stop: StopSignal,
        stats: Arc<ProducerStats>,
    ) -> Self {
        Self {
            id,
            generator,
            pool,
            stop,
            stats,
        }
    }

    /// Runs until the stop signal fires.
    ///
    /// The signal is polled once per generated key and while waiting on a
    /// full pool. A generator failure fires the signal itself so the rest
    /// of the run winds down, then is returned.
    pub fn run(mut self) -> Result<()> {
        log::debug!("producer {} started", self.id);
        let mut unrecorded = 0;

        let outcome = loop {
            if self.stop.is_fired() {
                break Ok(());
            }

            let keypair = match self.generator.generate() {
                Ok(keypair) => keypair,
                Err(e) => {
                    log::warn!("producer {} failed: {}", self.id, e);
                    self.stop.fire();
                    break Err(e);
                }
            };

            unrecorded += 1;
            if unrecorded == STATS_BATCH {
                self.stats.record(unrecorded);
                unrecorded = 0;
            }

            if !self.pool.publish(Candidate::new(keypair), &self.stop) {
                break Ok(());
            }
        };

        self.stats.record(unrecorded);
        log::debug!("producer {} stopped", self.id);
        outcome
    }

    /// Returns the producer ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::crypto::{Keypair, Secp256k1Generator};
    use crate::error::Error;

    struct BrokenGenerator;

    impl KeyGenerator for BrokenGenerator {
        fn generate(&mut self) -> Result<Keypair> {
            Err(Error::Entropy(rand::Error::new("entropy unavailable")))
        }
    }

    #[test]
    fn test_fills_pool_until_stopped() {
        let pool = CandidatePool::bounded(8);
        let stop = StopSignal::new();
        let stats = Arc::new(ProducerStats::new());
        let producer = Producer::new(
            3,
            Secp256k1Generator::new(),
            pool.clone(),
            stop.clone(),
            stats.clone(),
        );
        assert_eq!(producer.id(), 3);

        let handle = thread::spawn(move || producer.run());
        while pool.len() < 8 {
            thread::sleep(Duration::from_millis(1));
        }
        stop.fire();

        assert!(handle.join().unwrap().is_ok());
        assert_eq!(pool.len(), 8);
        let keys = stats.total_keys();
        assert!((8..=9).contains(&keys), "unexpected key count {}", keys);
    }

    #[test]
    fn test_exits_immediately_when_already_stopped() {
        let pool = CandidatePool::bounded(8);
        let stop = StopSignal::new();
        stop.fire();
        let stats = Arc::new(ProducerStats::new());
        let producer = Producer::new(0, Secp256k1Generator::new(), pool.clone(), stop, stats.clone());

        assert!(producer.run().is_ok());
        assert!(pool.is_empty());
        assert_eq!(stats.total_keys(), 0);
    }

    #[test]
    fn test_generator_failure_fires_stop() {
        let pool = CandidatePool::bounded(8);
        let stop = StopSignal::new();
        let producer = Producer::new(
            0,
            BrokenGenerator,
            pool,
            stop.clone(),
            Arc::new(ProducerStats::new()),
        );

        assert!(matches!(producer.run(), Err(Error::Entropy(_))));
        assert!(stop.is_fired());
    }
}
