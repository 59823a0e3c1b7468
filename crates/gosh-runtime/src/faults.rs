//! Internal-fault circuit breaker.
//!
//! An internal fault is the engine hitting a path it never should: applying
//! a non-callable value, or evaluating a symbol the analyzer ought to have
//! rejected. The tally is owned by the driver and threaded into evaluation
//! explicitly; when too many faults land inside the recent window the driver
//! stops evaluating new input until the window drains, so a known-broken
//! path is not invoked over and over.

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(30);
const THRESHOLD: usize = 3;

/// A windowed tally of recent internal engine faults.
#[derive(Debug)]
pub struct Faults {
    window: Duration,
    threshold: usize,
    recent: Vec<Instant>,
}

impl Default for Faults {
    fn default() -> Self {
        Self::with_window(WINDOW, THRESHOLD)
    }
}

impl Faults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: Duration, threshold: usize) -> Self {
        Self {
            window,
            threshold,
            recent: Vec::new(),
        }
    }

    /// Record one internal fault.
    pub fn note(&mut self) {
        self.prune();
        self.recent.push(Instant::now());
    }

    /// Whether evaluation should proceed.
    pub fn quiet(&mut self) -> bool {
        self.prune();
        self.recent.len() < self.threshold
    }

    fn prune(&mut self) {
        let window = self.window;
        self.recent.retain(|t| t.elapsed() <= window);
    }
}
