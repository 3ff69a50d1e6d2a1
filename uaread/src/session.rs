use std::time::Duration;

use async_trait::async_trait;

use crate::node::NodeId;
use crate::status::StatusCode;
use crate::variant::Variant;

/// Connection state of a [`Session`] as reported by the transport stack
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// the session is being established
    Connecting,
    /// the session is usable
    Open,
    /// the session was closed by the client
    Closed,
}

/// Single-value read request passed to a [`Session`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    /// node to read the value attribute of
    pub node: NodeId,
    /// oldest cached value the server may answer with
    pub max_age: Duration,
}

impl ReadRequest {
    /// Create a request for a node with the default max-age of two seconds
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            max_age: Duration::from_secs(2),
        }
    }
}

/// Outcome of a read carried back by a [`Session`]
#[derive(Clone, Debug, PartialEq)]
pub struct ReadResult {
    /// operation-level status reported by the server
    pub status: StatusCode,
    /// decoded value attribute
    pub value: Variant,
}

impl ReadResult {
    /// Construct a result from its fields
    pub fn new(status: StatusCode, value: Variant) -> Self {
        Self { status, value }
    }

    /// Construct a successful result carrying a value
    pub fn good(value: Variant) -> Self {
        Self::new(StatusCode::Good, value)
    }
}

/// Transport or service level failure reported by a [`Session`] instead of
/// a result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// the underlying stream failed
    Io(std::io::ErrorKind),
    /// the service call failed with a status code
    Fault(StatusCode),
}

impl std::error::Error for SessionError {}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SessionError::Io(kind) => write!(f, "I/O error: {kind}"),
            SessionError::Fault(status) => write!(f, "service fault: {status}"),
        }
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err.kind())
    }
}

/// Capability provided by an external transport stack
///
/// Implementations are expected to silently re-establish the session and
/// secure channel when the server invalidates them; the reader only observes
/// [`Session::state`] to decide whether a transport failure is worth
/// retrying. `connect` and `close` belong to the code that owns the session
/// lifecycle and are never called by the reader.
#[async_trait]
pub trait Session: Send {
    /// Read the value attribute of a single node
    async fn read(&mut self, request: &ReadRequest) -> Result<ReadResult, SessionError>;

    /// Current connection state
    fn state(&self) -> SessionState;

    /// Establish the connection to the server
    async fn connect(&mut self) -> Result<(), SessionError>;

    /// Close the connection to the server
    async fn close(&mut self) -> Result<(), SessionError>;
}
