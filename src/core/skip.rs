//! Non-fatal reasons a frame did not advance the sequencer.
//!
//! None of these are errors in the usual sense: each one means "nothing to do
//! this frame, try again on the next tick".  They are surfaced as values so
//! the caller can log them and show the latest one in the debug overlay.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The position provider has not finished initializing.
    #[error("position provider not ready")]
    ProviderUnavailable,
    /// The provider is ready but has no object with this name.
    #[error("object {name:?} not found in scene")]
    ObjectNotFound { name: String },
    /// The nearest waypoint is implausibly far from the last accepted one.
    #[error("jump rejected: candidate {candidate} is {delta} away from {last}")]
    JumpRejected {
        candidate: usize,
        last: usize,
        delta: usize,
    },
}
