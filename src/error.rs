//! Error types for format negotiation.

use crate::format::FormatCode;
use crate::set::{SetId, SlotId};
use thiserror::Error;

/// Result type alias using [`NegotiationError`].
pub type Result<T> = std::result::Result<T, NegotiationError>;

/// Error during format negotiation.
#[derive(Debug, Error)]
pub enum NegotiationError {
    /// Two candidate sets have no format in common.
    ///
    /// Both input sets are left untouched; the caller still owns every
    /// reference it held before the merge attempt.
    #[error("no common format:\n  left candidates:  {left:?}\n  right candidates: {right:?}")]
    NoCommonFormat {
        /// Candidates of the first set at the time of the failed merge.
        left: Vec<FormatCode>,
        /// Candidates of the second set at the time of the failed merge.
        right: Vec<FormatCode>,
    },

    /// Growing a candidate list or owner registry failed.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] std::collections::TryReserveError),

    /// A configuration token does not parse into a valid domain value.
    #[error("invalid {kind} '{text}'")]
    InvalidArgument {
        /// Which kind of value was expected (e.g. "sample rate").
        kind: &'static str,
        /// The offending token.
        text: String,
    },

    /// The referenced candidate set does not exist (already merged away or
    /// destroyed).
    #[error("format set not found: {0}")]
    SetNotFound(SetId),

    /// The referenced owner slot does not exist.
    #[error("owner slot not found: {0}")]
    SlotNotFound(SlotId),

    /// Attaching to a slot that already holds a reference.
    #[error("owner slot {0} already holds a reference")]
    SlotOccupied(SlotId),

    /// Destroying a slot that is still attached to a set.
    #[error("owner slot {0} is still attached to a format set")]
    SlotInUse(SlotId),
}

impl NegotiationError {
    /// Create an "invalid argument" error for a configuration token.
    pub fn invalid_argument(kind: &'static str, text: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            text: text.into(),
        }
    }
}
