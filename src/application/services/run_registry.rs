use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Clone)]
struct ActiveRun {
    run_id: Uuid,
    cancel: CancellationToken,
}

/// Tracks in-flight runs so a recipient is never blasted by two runs at once.
#[derive(Default)]
pub struct ActiveRuns {
    runs: Arc<Mutex<HashMap<String, ActiveRun>>>,
}

impl ActiveRuns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `recipient` for a new run. Returns `None` while another run holds it.
    pub fn try_acquire(&self, recipient: &str, cancel: CancellationToken) -> Option<RunGuard> {
        let key = normalize_recipient(recipient);
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        if runs.contains_key(&key) {
            return None;
        }

        let run_id = Uuid::new_v4();
        runs.insert(key.clone(), ActiveRun { run_id, cancel });

        Some(RunGuard {
            runs: self.runs.clone(),
            key,
            run_id,
        })
    }

    /// Trips the cancellation token of the run targeting `recipient`.
    pub fn cancel(&self, recipient: &str) -> Option<Uuid> {
        let runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        runs.get(&normalize_recipient(recipient)).map(|run| {
            run.cancel.cancel();
            run.run_id
        })
    }

    pub fn is_active(&self, recipient: &str) -> bool {
        let runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        runs.contains_key(&normalize_recipient(recipient))
    }

    pub fn len(&self) -> usize {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases the recipient when dropped.
pub struct RunGuard {
    runs: Arc<Mutex<HashMap<String, ActiveRun>>>,
    key: String,
    run_id: Uuid,
}

impl RunGuard {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        if runs.get(&self.key).is_some_and(|run| run.run_id == self.run_id) {
            runs.remove(&self.key);
        }
    }
}

fn normalize_recipient(recipient: &str) -> String {
    recipient
        .chars()
        .filter(|c| !c.is_whitespace())
        .skip_while(|c| *c == '+')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_on_same_recipient_is_refused() {
        let runs = ActiveRuns::new();
        let _guard = runs
            .try_acquire("+14155552671", CancellationToken::new())
            .unwrap();

        assert!(runs.try_acquire("14155552671", CancellationToken::new()).is_none());
        assert!(runs.try_acquire("+1 415 555 2671", CancellationToken::new()).is_none());
        assert!(runs.try_acquire("+14155552672", CancellationToken::new()).is_some());
    }

    #[test]
    fn dropping_guard_releases_recipient() {
        let runs = ActiveRuns::new();
        let guard = runs
            .try_acquire("+14155552671", CancellationToken::new())
            .unwrap();
        assert!(runs.is_active("+14155552671"));

        drop(guard);

        assert!(!runs.is_active("+14155552671"));
        assert!(runs.is_empty());
    }

    #[test]
    fn cancel_trips_the_registered_token() {
        let runs = ActiveRuns::new();
        let token = CancellationToken::new();
        let guard = runs.try_acquire("+14155552671", token.clone()).unwrap();

        assert_eq!(runs.cancel("14155552671"), Some(guard.run_id()));
        assert!(token.is_cancelled());
        assert_eq!(runs.cancel("+19995550000"), None);
    }
}
