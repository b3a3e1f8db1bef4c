//! Exclusivity boundary around the single target state.

use std::sync::Mutex;
use std::time::Instant;

use shared::state::TargetState;
use thiserror::Error;

use crate::command::PartialCommand;
use crate::reconcile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("no valid fields")]
    NoValidFields,
}

/// Owns the one mutable [`TargetState`].
///
/// Concurrent `apply` calls serialize; no caller ever observes a partially
/// written state. The critical section covers only the field-count-bounded
/// reconcile and the swap, never anything external.
pub struct StateStore {
    target: Mutex<TargetState>,
}

impl StateStore {
    pub fn new(initial: TargetState) -> Self {
        Self {
            target: Mutex::new(initial),
        }
    }

    /// Reconciles `cmd` into the target state and returns the new snapshot.
    ///
    /// The emptiness check runs against the command as parsed, before any
    /// mode-forcing side effects could make it look non-empty.
    pub fn apply(&self, cmd: &PartialCommand, now: Instant) -> Result<TargetState, ApplyError> {
        if cmd.is_empty() {
            return Err(ApplyError::NoValidFields);
        }
        let mut target = self.target.lock().expect("target state lock poisoned");
        let next = reconcile::reconcile(&target, cmd, now);
        *target = next.clone();
        Ok(next)
    }

    /// Independent copy of the current target, unaffected by later mutation.
    pub fn snapshot(&self) -> TargetState {
        self.target.lock().expect("target state lock poisoned").clone()
    }
}
