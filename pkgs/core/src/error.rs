use thiserror::Error;

/// Errors raised across the orchestration layer.
///
/// Per the error-handling policy: [`PanoramyxError::TransportFailure`] is
/// fatal (the process is expected to abort after logging it); every other
/// variant is a recoverable condition that is surfaced to the caller as a
/// typed `Result`.
#[derive(Debug, Error)]
pub enum PanoramyxError {
    /// An operation that the target component does not implement (e.g.
    /// `RemoteConstraint::scope()`, or any method on the decomposition
    /// preprocessor other than the ones it needs for scope collection).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A transport-level failure. Transport errors are fatal: the policy in
    /// §7 of the specification is that the whole program aborts rather than
    /// retrying, since there is no sound way to recover mid-protocol.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// A blocking queue (e.g. `availableSolvers`) was cleared while a
    /// consumer was blocked on it; the consumer should exit cleanly.
    #[error("queue closed")]
    QueueClosed,

    /// `loadInstance` was given a path with an unrecognized extension.
    #[error("unknown instance format for path: {0}")]
    UnknownInstanceFormat(String),

    /// `ANY_TAG`/`ANY_SOURCE` was requested on a transport variant that does
    /// not support wildcard receives (the thread transport).
    #[error("wildcard receive is not supported by this transport")]
    WildcardUnsupported,

    /// A cube was rejected by the consistency checker before being emitted.
    /// Not necessarily surfaced to callers — cube generators drop these
    /// silently per §7 item 7 — but kept as a typed value so generators can
    /// log the rejection uniformly.
    #[error("inconsistent cube")]
    InconsistentCube,
}

pub type Result<T> = std::result::Result<T, PanoramyxError>;
