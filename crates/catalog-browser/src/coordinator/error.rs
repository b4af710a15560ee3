//! Error types for the coordinator handle.

/// Failures talking to the coordinator actor.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CoordinatorError {
    #[error("Coordinator closed")]
    ActorClosed,
    #[error("Coordinator dropped response channel")]
    ActorDropped,
}
