//! Presentation state for the current upload
//!
//! The core is a pure function from bytes to a day sheet. Whatever is being
//! shown lives here instead, and only the most recently started upload may
//! change it.

use crate::error::DecodeFailure;
use crate::types::DaySheet;
use tracing::warn;

/// What the viewer currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loaded(DaySheet),
    Failed(DecodeFailure),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loaded(_) => "loaded",
            ViewState::Failed(_) => "failed",
        }
    }
}

/// Handed out when an upload starts; needed to commit its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// What happened to a committed decode result
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The new sheet replaced whatever was shown
    Loaded,
    /// The decode failed; a previously loaded sheet stays on screen
    Failed(DecodeFailure),
    /// A newer upload (or a reset) started first; the result was dropped
    Superseded,
}

#[derive(Debug, Default)]
pub struct Session {
    state: ViewState,
    latest: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The loaded sheet, if any
    pub fn sheet(&self) -> Option<&DaySheet> {
        match &self.state {
            ViewState::Loaded(sheet) => Some(sheet),
            _ => None,
        }
    }

    /// Start an upload. Any upload started earlier can no longer commit.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.latest += 1;
        UploadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Apply a decode result if its upload is still the latest one
    pub fn commit(
        &mut self,
        ticket: UploadTicket,
        result: Result<DaySheet, DecodeFailure>,
    ) -> CommitOutcome {
        if !self.is_current(ticket) {
            warn!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding result of superseded upload"
            );
            return CommitOutcome::Superseded;
        }

        match result {
            Ok(sheet) => {
                self.state = ViewState::Loaded(sheet);
                CommitOutcome::Loaded
            }
            Err(failure) => {
                warn!(kind = failure.kind(), "upload failed: {}", failure);
                if !matches!(self.state, ViewState::Loaded(_)) {
                    self.state = ViewState::Failed(failure.clone());
                }
                CommitOutcome::Failed(failure)
            }
        }
    }

    /// Clear back to idle and drop any upload still in flight
    pub fn reset(&mut self) {
        self.latest += 1;
        self.state = ViewState::Idle;
    }
}
