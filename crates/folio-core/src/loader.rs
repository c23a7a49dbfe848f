//! Deadline bookkeeping for the one asynchronous asset load.
//!
//! The web side starts the fetch, aborts it at the deadline, and funnels the
//! outcome through [`LoadGate::settle`]. The gate is the single authority on
//! whether a result is still wanted, so a response that arrives after the
//! deadline is dropped even if the abort lost the race.

use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed,
    TimedOut,
}

#[derive(Clone, Debug)]
pub struct LoadGate {
    timeout: f64,
    deadline: f64,
    status: LoadStatus,
}

impl LoadGate {
    /// `started_at` and `timeout` are seconds on the caller's clock.
    pub fn new(started_at: f64, timeout: f64) -> Self {
        Self {
            timeout,
            deadline: started_at + timeout.max(0.0),
            status: LoadStatus::Pending,
        }
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == LoadStatus::Pending
    }

    /// Flip a pending load to timed out once `now` reaches the deadline.
    ///
    /// Returns the timeout error exactly once, on the transition.
    pub fn check_deadline(&mut self, now: f64) -> Option<AssetError> {
        if self.status == LoadStatus::Pending && now >= self.deadline {
            self.status = LoadStatus::TimedOut;
            return Some(AssetError::Timeout(self.timeout));
        }
        None
    }

    pub fn poll(&mut self, now: f64) -> LoadStatus {
        self.check_deadline(now);
        self.status
    }

    /// Accept or reject the outcome of the load.
    ///
    /// Only the first outcome that arrives before the deadline is passed
    /// through. An outcome that is the first to notice the deadline returns
    /// the timeout error, so the timeout is still reported exactly once;
    /// everything after that becomes [`AssetError::Late`].
    pub fn settle<T>(&mut self, now: f64, outcome: Result<T, AssetError>) -> Result<T, AssetError> {
        if let Some(timeout) = self.check_deadline(now) {
            return Err(timeout);
        }
        if self.status != LoadStatus::Pending {
            return Err(AssetError::Late);
        }
        match outcome {
            Ok(value) => {
                self.status = LoadStatus::Ready;
                Ok(value)
            }
            Err(e) => {
                self.status = LoadStatus::Failed;
                Err(e)
            }
        }
    }
}
