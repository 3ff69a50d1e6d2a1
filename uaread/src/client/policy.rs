use crate::error::ReadError;
use crate::session::{ReadResult, SessionError, SessionState};
use crate::status::StatusCode;
use crate::variant::Variant;

/// How a single read attempt concluded. Evaluated exactly once per attempt.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Attempt {
    /// the server answered with a good status
    Complete(Variant),
    /// recoverable condition, wait and read again
    Retry(RetryReason),
    /// give up and surface the error
    Fatal(ReadError),
}

/// Recoverable condition observed during an attempt. Never surfaced to
/// callers, only logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RetryReason {
    /// the stream failed while the session remained usable
    Io(std::io::ErrorKind),
    /// the session or secure channel was invalidated and will be rebuilt
    /// by the transport stack on the next call
    Recoverable(StatusCode),
}

impl std::fmt::Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RetryReason::Io(kind) => write!(f, "I/O error: {kind}"),
            RetryReason::Recoverable(status) => write!(f, "recoverable status: {status}"),
        }
    }
}

/// Map the outcome of one session read onto the closed set of loop
/// transitions. The session state only matters for transport failures:
/// end-of-stream is worth retrying unless the user closed the connection.
pub(crate) fn classify(
    outcome: Result<ReadResult, SessionError>,
    state: SessionState,
) -> Attempt {
    match outcome {
        Ok(result) if result.status.is_good() => Attempt::Complete(result.value),
        Ok(result) if result.status.is_session_recoverable() => {
            Attempt::Retry(RetryReason::Recoverable(result.status))
        }
        Ok(result) => Attempt::Fatal(ReadError::Status(result.status)),
        Err(SessionError::Fault(status)) if status.is_session_recoverable() => {
            Attempt::Retry(RetryReason::Recoverable(status))
        }
        Err(SessionError::Fault(status)) => Attempt::Fatal(ReadError::Status(status)),
        Err(SessionError::Io(kind)) if state != SessionState::Closed => {
            Attempt::Retry(RetryReason::Io(kind))
        }
        Err(SessionError::Io(kind)) => Attempt::Fatal(ReadError::Io(kind)),
    }
}
