use crate::node::InvalidNodeId;
use crate::status::StatusCode;

/// Terminal outcome of a failed read
///
/// Recoverable session faults never appear here: they are consumed by the
/// retry loop. Callers that need to tell cancellation apart from a permanent
/// failure match on the variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadError {
    /// the node id string could not be parsed; returned without issuing a read
    InvalidNodeId(InvalidNodeId),
    /// the server answered with a status that cannot be retried
    Status(StatusCode),
    /// the transport failed and the session was closed
    Io(std::io::ErrorKind),
    /// the caller's token was cancelled before the read reached a terminal outcome
    Cancelled,
}

impl std::error::Error for ReadError {}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ReadError::InvalidNodeId(err) => write!(f, "invalid node id: {err}"),
            ReadError::Status(status) => write!(f, "read failed with status: {status}"),
            ReadError::Io(kind) => write!(f, "I/O error: {kind}"),
            ReadError::Cancelled => f.write_str("read was cancelled by the caller"),
        }
    }
}

impl From<InvalidNodeId> for ReadError {
    fn from(err: InvalidNodeId) -> Self {
        ReadError::InvalidNodeId(err)
    }
}

/// Error returned by the read-variable use case
///
/// Adds use-case context to the underlying [`ReadError`] without changing
/// its kind; the cause stays inspectable through the public field and
/// through [`std::error::Error::source`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadVariableError {
    /// the underlying read failure
    pub source: ReadError,
}

impl std::error::Error for ReadVariableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl std::fmt::Display for ReadVariableError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "failed to read variable: {}", self.source)
    }
}

impl From<ReadError> for ReadVariableError {
    fn from(source: ReadError) -> Self {
        Self { source }
    }
}
