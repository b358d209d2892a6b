//! Progress reporting and cooperative cancellation for long scans.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Receives progress updates from a running scan.
///
/// Called only from the thread that invoked the scan, even when refinement
/// runs in parallel. Observers cannot influence results.
pub trait ScanObserver {
    /// `fraction_done` is in `[0, 1]` and never decreases within a scan.
    fn on_progress(&mut self, fraction_done: f64, hits_so_far: usize);
}

impl<F: FnMut(f64, usize)> ScanObserver for F {
    fn on_progress(&mut self, fraction_done: f64, hits_so_far: usize) {
        self(fraction_done, hits_so_far)
    }
}

/// Shared cancellation flag with an optional deadline.
///
/// Clones share the flag: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that reports cancelled once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Some(deadline),
        }
    }

    /// Token that reports cancelled `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn past_deadline_is_cancelled() {
        let token = CancelToken::with_deadline(Instant::now());
        assert!(token.is_cancelled());
        let token = CancelToken::with_timeout(Duration::from_secs(3600));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn closures_observe() {
        let mut seen = Vec::new();
        {
            let mut obs = |f: f64, n: usize| seen.push((f, n));
            obs.on_progress(0.5, 2);
        }
        assert_eq!(seen, vec![(0.5, 2)]);
    }
}
