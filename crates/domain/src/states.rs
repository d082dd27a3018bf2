//! Session state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use stepdoc_shared::{ErrorCode, ErrorEnvelope};

/// Lifecycle of one walkthrough session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the root directory.
    AwaitingRoot,
    /// Root was not an existing directory.
    RootRejected,
    /// Root exists and is a directory.
    Validated,
    /// Traversal finished.
    Walked,
    /// Traversal found nothing to document.
    Empty,
    /// Matched files were listed; waiting for the operator's answer.
    AwaitingConfirmation,
    /// Operator declined.
    Cancelled,
    /// Writing the output document.
    Assembling,
    /// Output document written.
    Done,
}

/// Allowed `(from, to)` transitions.
pub const SESSION_TRANSITIONS: &[(SessionState, SessionState)] = &[
    (SessionState::AwaitingRoot, SessionState::Validated),
    (SessionState::AwaitingRoot, SessionState::RootRejected),
    (SessionState::Validated, SessionState::Walked),
    (SessionState::Walked, SessionState::Empty),
    (SessionState::Walked, SessionState::AwaitingConfirmation),
    (SessionState::AwaitingConfirmation, SessionState::Cancelled),
    (SessionState::AwaitingConfirmation, SessionState::Assembling),
    (SessionState::Assembling, SessionState::Done),
];

impl SessionState {
    /// Stable snake_case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingRoot => "awaiting_root",
            Self::RootRejected => "root_rejected",
            Self::Validated => "validated",
            Self::Walked => "walked",
            Self::Empty => "empty",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::Cancelled => "cancelled",
            Self::Assembling => "assembling",
            Self::Done => "done",
        }
    }

    /// Returns true when `next` may follow `self`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        SESSION_TRANSITIONS.contains(&(self, next))
    }

    /// Returns true when no further transition exists.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !SESSION_TRANSITIONS.iter().any(|(from, _)| *from == self)
    }

    /// Move to `next`, rejecting transitions outside the table.
    pub fn advance(self, next: Self) -> Result<Self, SessionTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(SessionTransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Attempted transition that the table does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTransitionError {
    /// State the session was in.
    pub from: SessionState,
    /// Requested state.
    pub to: SessionState,
}

impl fmt::Display for SessionTransitionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "invalid session transition from {} to {}",
            self.from, self.to
        )
    }
}

impl std::error::Error for SessionTransitionError {}

impl From<SessionTransitionError> for ErrorEnvelope {
    fn from(error: SessionTransitionError) -> Self {
        Self::invariant(
            ErrorCode::new("domain", "invalid_session_transition"),
            error.to_string(),
        )
        .with_metadata("from", error.from.as_str())
        .with_metadata("to", error.to.as_str())
    }
}
