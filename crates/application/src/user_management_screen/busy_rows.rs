use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use gestorq_core::{AppError, AppResult};
use gestorq_domain::UserId;

/// Rows with a mutation in flight.
#[derive(Debug, Default)]
pub(super) struct BusyRows {
    rows: Mutex<HashSet<UserId>>,
}

impl BusyRows {
    /// Marks `user_id` busy until the returned guard is dropped.
    pub(super) fn acquire(self: &Arc<Self>, user_id: UserId) -> AppResult<BusyRowGuard> {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        if !rows.insert(user_id) {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' already has a role change in progress"
            )));
        }

        Ok(BusyRowGuard {
            rows: Arc::clone(self),
            user_id,
        })
    }

    pub(super) fn contains(&self, user_id: UserId) -> bool {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&user_id)
    }

    pub(super) fn snapshot(&self) -> Vec<UserId> {
        let mut rows: Vec<UserId> = self
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect();
        rows.sort();
        rows
    }
}

/// Clears the busy flag on drop, on success and failure alike.
#[derive(Debug)]
pub(super) struct BusyRowGuard {
    rows: Arc<BusyRows>,
    user_id: UserId,
}

impl Drop for BusyRowGuard {
    fn drop(&mut self) {
        self.rows
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}
