//! Bounded parallel fan-out with first-error cancellation

use log::{debug, warn};
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::config::FrameConfig;
use crate::core::cancel::CancellationToken;
use crate::core::error::{Error, Result};

/// Runs closures on a bounded rayon pool.
///
/// Every task receives a child of the caller's token. The first task to fail
/// cancels that child, so tasks still running observe cancellation at their
/// own row checkpoints. The group returns once every task has exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskGroup {
    max_workers: usize,
}

impl TaskGroup {
    /// `max_workers == 0` uses one worker per CPU.
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self::new(config.parallel.max_workers)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run `tasks` and return their results in task order.
    ///
    /// On failure the first error is returned and no results are.
    pub fn run<T, F>(&self, parent: &CancellationToken, tasks: Vec<F>) -> Result<Vec<T>>
    where
        T: Send,
        F: FnOnce(&CancellationToken) -> Result<T> + Send,
    {
        let total = tasks.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| Error::Parallel(e.to_string()))?;
        debug!("running {} tasks on {} workers", total, pool.current_num_threads());

        let token = parent.child();
        let first_error: Mutex<Option<Error>> = Mutex::new(None);
        let outcomes: Vec<Option<T>> = pool.install(|| {
            tasks
                .into_par_iter()
                .map(|task| {
                    if token.is_cancelled() {
                        return None;
                    }
                    match task(&token) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            let mut first = first_error.lock();
                            if first.is_none() {
                                *first = Some(err);
                                token.cancel();
                            }
                            None
                        }
                    }
                })
                .collect()
        });

        if let Some(err) = first_error.into_inner() {
            warn!("task group failed: {}", err);
            return Err(err);
        }

        let done: Vec<T> = outcomes.into_iter().flatten().collect();
        if done.len() < total {
            // tasks were skipped because the caller's token fired
            token.check()?;
            return Err(Error::Cancelled);
        }
        Ok(done)
    }
}
