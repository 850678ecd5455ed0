use std::fmt;
use std::time::Duration;

use arena_core::{DispatchTicket, TaskStatus};

/// Failure of a single engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InvokeError {
    pub kind: FailureKind,
    pub message: String,
}

impl InvokeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The document had no bytes; nothing was sent.
    EmptyDocument,
    /// Engine unreachable or the connection dropped.
    Network,
    Timeout,
    /// The engine answered with a non-success status.
    Application { status: u16 },
    /// The engine answered 2xx with a body that is not a parse result.
    InvalidResponse,
}

impl FailureKind {
    pub fn is_transport(&self) -> bool {
        matches!(self, FailureKind::Network | FailureKind::Timeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::EmptyDocument => write!(f, "empty document"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Application { status } => write!(f, "engine error (http {status})"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    Dispatched {
        ticket: DispatchTicket,
    },
    Settled {
        ticket: DispatchTicket,
        status: TaskStatus,
        elapsed: Duration,
    },
    /// A settlement arrived for a document that has since been replaced.
    Discarded {
        ticket: DispatchTicket,
    },
    RunFinished(RunReport),
}

/// Totals for one call to `Orchestrator::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub discarded: usize,
    pub elapsed: Duration,
}

impl RunReport {
    /// True when the run was rejected before dispatching anything.
    pub fn is_noop(&self) -> bool {
        self.dispatched == 0
    }

    pub fn all_succeeded(&self) -> bool {
        self.dispatched > 0 && self.succeeded == self.dispatched
    }
}
