//! Wires producers and the matcher together for one search run.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::SearchSettings;
use crate::crypto::{KeyGenerator, Keypair};
use crate::error::{Error, Result};

use super::{CandidatePool, Matcher, Producer, ProducerStats, StopSignal};

type ProgressFn = Box<dyn FnMut(u64, &str) + Send>;

/// Result of a completed run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The matching keypair, or `None` if the run was stopped from outside
    pub found: Option<Keypair>,
    /// Candidates tested by the matcher
    pub checked: u64,
    /// Keys generated across all producers
    pub keys_generated: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// Returns the generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed.as_secs_f64();
        if elapsed > 0.0 {
            self.keys_generated as f64 / elapsed
        } else {
            0.0
        }
    }
}

/// Runs N producers and one matcher until a match or an external stop.
pub struct Driver<G> {
    settings: SearchSettings,
    generator: G,
    stop: StopSignal,
    progress: Option<ProgressFn>,
}

impl<G> Driver<G>
where
    G: KeyGenerator + Clone + 'static,
{
    /// Each producer gets its own clone of `generator`.
    pub fn new(settings: SearchSettings, generator: G) -> Self {
        Self {
            settings,
            generator,
            stop: StopSignal::new(),
            progress: None,
        }
    }

    /// Installs the progress callback used when the settings enable
    /// progress reporting.
    pub fn with_progress(mut self, report: impl FnMut(u64, &str) + Send + 'static) -> Self {
        self.progress = Some(Box::new(report));
        self
    }

    /// Handle for cancelling the run from another thread or a signal handler.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Runs the search on the calling thread.
    ///
    /// Every producer has been joined by the time this returns. A producer
    /// failure aborts the run and is returned even if a match was found.
    pub fn run(self) -> Result<SearchOutcome> {
        let Driver {
            settings,
            generator,
            stop,
            mut progress,
        } = self;

        let start = Instant::now();
        let pool = CandidatePool::bounded(settings.capacity);
        let stats = Arc::new(ProducerStats::new());

        log::debug!(
            "starting {} producers, pool capacity {}, pattern {}",
            settings.workers,
            settings.capacity,
            settings.pattern
        );
        let producers = ProducerSet::spawn(settings.workers, &generator, &pool, &stop, &stats)?;

        let mut matcher = Matcher::new(settings.pattern, settings.progress_every);
        let found = matcher.run(&pool, &stop, &mut |step, address| {
            if let Some(report) = progress.as_mut() {
                report(step, address);
            }
        });

        stop.fire();
        producers.join()?;

        let outcome = SearchOutcome {
            found: found.map(|c| c.into_keypair()),
            checked: matcher.checked(),
            keys_generated: stats.total_keys(),
            elapsed: start.elapsed(),
        };
        match &outcome.found {
            Some(keypair) => log::info!(
                "match {} after {} candidates",
                keypair.address(),
                outcome.checked
            ),
            None => log::info!("stopped without a match after {} candidates", outcome.checked),
        }
        Ok(outcome)
    }
}

/// Running producer threads. Dropping the set stops and joins them.
struct ProducerSet {
    handles: Vec<JoinHandle<Result<()>>>,
    stop: StopSignal,
}

impl ProducerSet {
    fn spawn<G>(
        count: usize,
        generator: &G,
        pool: &CandidatePool,
        stop: &StopSignal,
        stats: &Arc<ProducerStats>,
    ) -> Result<Self>
    where
        G: KeyGenerator + Clone + 'static,
    {
        let mut set = Self {
            handles: Vec::with_capacity(count),
            stop: stop.clone(),
        };

        for id in 0..count {
            let producer = Producer::new(
                id,
                generator.clone(),
                pool.clone(),
                stop.clone(),
                stats.clone(),
            );
            // On failure `set` is dropped, which stops the ones already running.
            let handle = thread::Builder::new()
                .name(format!("vanity-producer-{}", id))
                .spawn(move || producer.run())?;
            set.handles.push(handle);
        }

        Ok(set)
    }

    /// Stops and joins every producer, returning the first failure.
    fn join(mut self) -> Result<()> {
        self.stop.fire();
        let mut first_error = None;
        for (id, handle) in self.handles.drain(..).enumerate() {
            let outcome = handle
                .join()
                .unwrap_or_else(|_| Err(Error::ProducerPanicked(id)));
            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for ProducerSet {
    fn drop(&mut self) {
        self.stop.fire();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::mpsc;

    use super::*;
    use crate::crypto::Secp256k1Generator;
    use crate::matcher::{Pattern, PatternPosition};

    /// Hands out secret keys 1, 2, 3, ... across all clones.
    #[derive(Clone, Default)]
    struct SequentialGenerator {
        next: Arc<AtomicU64>,
    }

    impl KeyGenerator for SequentialGenerator {
        fn generate(&mut self) -> Result<Keypair> {
            let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
            let mut secret = [0u8; 32];
            secret[24..].copy_from_slice(&n.to_be_bytes());
            Keypair::from_secret_key(secret)
        }
    }

    #[derive(Clone)]
    struct BrokenGenerator;

    impl KeyGenerator for BrokenGenerator {
        fn generate(&mut self) -> Result<Keypair> {
            Err(Error::Entropy(rand::Error::new("entropy unavailable")))
        }
    }

    fn settings(literal: &str, position: PatternPosition, workers: usize) -> SearchSettings {
        SearchSettings::new(Pattern::new(literal, position), workers)
    }

    fn assert_valid_match(outcome: &SearchOutcome, pattern: &Pattern) {
        let keypair = outcome.found.as_ref().expect("no match found");
        assert!(pattern.matches_address(keypair.address()));

        let rederived = Keypair::from_secret_key(*keypair.private_key_bytes()).unwrap();
        assert_eq!(rederived.address(), keypair.address());
    }

    #[test]
    fn test_empty_pattern_matches_immediately() {
        let settings = settings("", PatternPosition::Prefix, 2);
        let outcome = Driver::new(settings, SequentialGenerator::default())
            .run()
            .unwrap();
        assert!(outcome.found.is_some());
        assert_eq!(outcome.checked, 1);
    }

    #[test]
    fn test_single_and_many_workers_find_valid_match() {
        for workers in [1, 8] {
            let settings = settings("00", PatternPosition::Suffix, workers);
            let pattern = settings.pattern.clone();
            let outcome = Driver::new(settings, Secp256k1Generator::new()).run().unwrap();

            assert_valid_match(&outcome, &pattern);
            assert!(outcome.keys_generated >= outcome.checked);
        }
    }

    #[test]
    fn test_case_sensitive_prefix() {
        let settings = settings("A", PatternPosition::Prefix, 4);
        let pattern = settings.pattern.clone();
        let outcome = Driver::new(settings, SequentialGenerator::default()).run().unwrap();

        assert_valid_match(&outcome, &pattern);
        let address = outcome.found.unwrap().address().to_checksum();
        assert!(address.starts_with("0xA"));
    }

    #[test]
    fn test_progress_reported_when_enabled() {
        let mut settings = settings("zz", PatternPosition::Prefix, 2);
        settings.progress_every = Some(100);

        let (tx, rx) = mpsc::channel();
        let driver = Driver::new(settings, SequentialGenerator::default())
            .with_progress(move |step, _| {
                let _ = tx.send(step);
            });
        let stop = driver.stop_signal();

        let handle = thread::spawn(move || driver.run());
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), 0);
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), 100);
        stop.fire();

        let outcome = handle.join().unwrap().unwrap();
        assert!(outcome.found.is_none());
    }

    #[test]
    fn test_external_stop_terminates_unmatchable_search() {
        // Tiny pool and many producers so most producers sit blocked on publish.
        let mut settings = settings("zz", PatternPosition::Prefix, 8);
        settings.capacity = 1;

        let driver = Driver::new(settings, SequentialGenerator::default());
        let stop = driver.stop_signal();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(driver.run());
        });

        thread::sleep(Duration::from_millis(200));
        stop.fire();

        let outcome = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("search did not shut down")
            .unwrap();
        assert!(outcome.found.is_none());
        assert!(outcome.checked > 0);
    }

    #[test]
    fn test_stop_before_run_returns_empty_result() {
        let settings = settings("", PatternPosition::Prefix, 4);
        let driver = Driver::new(settings, SequentialGenerator::default());
        driver.stop_signal().fire();

        let outcome = driver.run().unwrap();
        assert!(outcome.found.is_none());
        assert_eq!(outcome.checked, 0);
    }

    #[test]
    fn test_generator_failure_aborts_run() {
        let settings = settings("", PatternPosition::Prefix, 3);
        let result = Driver::new(settings, BrokenGenerator).run();
        assert!(matches!(result, Err(Error::Entropy(_))));
    }
}
