use std::collections::BTreeMap;

use common::expirations::KeyId;

pub enum EnforcementState {
    /// The key has not expired yet
    Active,
    /// The key has expired and its data limit is now set
    Blocked,
    /// The key has expired but this was a dry run so the proxy was not called
    WouldBlock,
    /// The key has expired but setting its data limit failed. It will be retried on the next run.
    Failed(common::Error),
}

/// What happened to every key in the table during one run
#[derive(Default)]
pub struct EnforcementReport {
    pub states: BTreeMap<KeyId, EnforcementState>,
}

impl EnforcementReport {
    fn count(&self, f: impl Fn(&EnforcementState) -> bool) -> usize {
        self.states.values().filter(|state| f(state)).count()
    }

    pub fn active(&self) -> usize {
        self.count(|state| matches!(state, EnforcementState::Active))
    }

    pub fn blocked(&self) -> usize {
        self.count(|state| matches!(state, EnforcementState::Blocked))
    }

    pub fn would_block(&self) -> usize {
        self.count(|state| matches!(state, EnforcementState::WouldBlock))
    }

    pub fn failed(&self) -> usize {
        self.count(|state| matches!(state, EnforcementState::Failed(_)))
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "{} keys checked: {} blocked, {} would be blocked, {} failed, {} not expired",
            self.states.len(),
            self.blocked(),
            self.would_block(),
            self.failed(),
            self.active(),
        );

        for (key_id, state) in &self.states {
            if let EnforcementState::Failed(e) = state {
                tracing::warn!("☠️ Key {} has expired but is still not blocked: {}", key_id, e);
            }
        }
    }
}
