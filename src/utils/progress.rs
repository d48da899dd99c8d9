use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

/// Number of progress reports emitted over a full stage
const REPORT_STEPS: usize = 10;

/// Work-item counter shared by the workers of one pipeline stage.
///
/// Only used for logging; results never depend on it.
#[derive(Debug)]
pub struct Progress {
    stage: &'static str,
    total: usize,
    step: usize,
    done: AtomicUsize,
}

impl Progress {
    #[must_use]
    pub fn new(stage: &'static str, total: usize) -> Self {
        Self {
            stage,
            total,
            step: (total / REPORT_STEPS).max(1),
            done: AtomicUsize::new(0),
        }
    }

    /// Record one finished work item
    pub fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.step == 0 || done == self.total {
            debug!("{}: {done}/{} done", self.stage, self.total);
        }
    }

    #[must_use]
    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}
