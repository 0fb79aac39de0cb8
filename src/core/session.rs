//! In-memory per-user conversation state
//!
//! Nothing here survives a restart: a pending claim or a half-composed
//! mailing is simply forgotten, and the person starts over.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use crate::broadcast::Draft;

/// Codes captured by `/start <code>` that await the claimant's phone number.
#[derive(Debug, Default)]
pub struct ClaimSessions {
    pending: DashMap<i64, String>,
}

impl ClaimSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `code` for `claimant`, replacing any earlier pending code.
    pub fn begin(&self, claimant: i64, code: String) {
        self.pending.insert(claimant, code);
    }

    pub fn pending_code(&self, claimant: i64) -> Option<String> {
        self.pending.get(&claimant).map(|entry| entry.value().clone())
    }

    /// Drops the pending code and returns it.
    pub fn finish(&self, claimant: i64) -> Option<String> {
        self.pending.remove(&claimant).map(|(_, code)| code)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Where an administrator is in the `/mail` flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MailingState {
    #[default]
    Idle,
    /// The next message from the admin becomes the draft
    Composing,
    /// Draft captured, waiting for the confirm or cancel button
    ConfirmPending { draft: Draft },
}

/// Mailing state per administrator. Idle admins have no entry.
#[derive(Debug, Default)]
pub struct MailingSessions {
    states: DashMap<i64, MailingState>,
}

impl MailingSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, admin: i64) -> MailingState {
        self.states
            .get(&admin)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn is_composing(&self, admin: i64) -> bool {
        matches!(self.states.get(&admin).as_deref(), Some(MailingState::Composing))
    }

    /// Enters `Composing` from any state; an unconfirmed draft is discarded.
    pub fn start_composing(&self, admin: i64) {
        self.states.insert(admin, MailingState::Composing);
    }

    /// Stores the draft and moves to `ConfirmPending`.
    ///
    /// Returns false (and changes nothing) unless the admin is composing.
    pub fn submit_draft(&self, admin: i64, draft: Draft) -> bool {
        match self.states.get_mut(&admin) {
            Some(mut state) if *state == MailingState::Composing => {
                *state = MailingState::ConfirmPending { draft };
                true
            }
            _ => false,
        }
    }

    /// Takes the confirmed draft and returns the admin to `Idle`.
    ///
    /// `None` when there is nothing to confirm, e.g. a stale button press.
    pub fn take_confirmed(&self, admin: i64) -> Option<Draft> {
        self.states
            .remove_if(&admin, |_, state| matches!(state, MailingState::ConfirmPending { .. }))
            .and_then(|(_, state)| match state {
                MailingState::ConfirmPending { draft } => Some(draft),
                _ => None,
            })
    }

    /// Drops the draft awaiting confirmation and returns to `Idle`.
    ///
    /// False, with no change, unless a draft is awaiting confirmation.
    pub fn cancel(&self, admin: i64) -> bool {
        self.states
            .remove_if(&admin, |_, state| matches!(state, MailingState::ConfirmPending { .. }))
            .is_some()
    }
}

/// Lets one mailing run at a time, whoever of the staff confirmed it.
#[derive(Debug, Clone, Default)]
pub struct MailingGate {
    running: Arc<AtomicBool>,
}

impl MailingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate for a mailing pass; `None` while another pass runs.
    pub fn try_start(&self) -> Option<MailingPass> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| MailingPass { running: Arc::clone(&self.running) })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// A running mailing pass. The gate reopens when this is dropped.
#[derive(Debug)]
pub struct MailingPass {
    running: Arc<AtomicBool>,
}

impl Drop for MailingPass {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
