use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::client::policy::{classify, Attempt};
use crate::client::retry::RetryStrategy;
use crate::error::ReadError;
use crate::node::NodeId;
use crate::session::{ReadRequest, Session};
use crate::variant::Variant;

/// Capability of reading one variable to completion
///
/// Satisfied by [`ResilientReader`] and by test doubles, so orchestration
/// layers can be exercised without any retry machinery underneath.
#[async_trait]
pub trait Reader {
    /// Read the value of the node identified by `node_id`, driving the
    /// operation until it succeeds, fails permanently, or `token` is
    /// cancelled
    async fn read(
        &mut self,
        token: &CancellationToken,
        node_id: &str,
    ) -> Result<Variant, ReadError>;
}

/// [`Reader`] that retries recoverable session faults until the read
/// succeeds, fails permanently, or the caller's token is cancelled
///
/// Recoverable conditions are end-of-stream while the session is not
/// closed and the session/secure-channel invalidation statuses; the
/// transport stack re-establishes the session on the next call. The pause
/// between attempts comes from the injected [`RetryStrategy`] and is always
/// interruptible by the token, so a cancelled caller never waits out a
/// backoff interval.
///
/// ```
/// use std::time::Duration;
///
/// use tokio_util::sync::CancellationToken;
/// use uaread::client::{fixed_retry_strategy, Reader, ResilientReader};
/// use uaread::sim::sim;
/// use uaread::{Session, Variant};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (mut session, mut handle) = sim();
/// session.connect().await.unwrap();
/// handle.value(42);
///
/// let mut reader =
///     ResilientReader::new(session, fixed_retry_strategy(Duration::from_millis(100)));
/// let value = reader
///     .read(&CancellationToken::new(), "ns=2;i=1234")
///     .await
///     .unwrap();
/// assert_eq!(value, Variant::Int32(42));
/// # }
/// ```
pub struct ResilientReader<S> {
    session: S,
    retry: Box<dyn RetryStrategy>,
}

impl<S: Session> ResilientReader<S> {
    /// Create a reader over an established session
    pub fn new(session: S, retry: Box<dyn RetryStrategy>) -> Self {
        Self { session, retry }
    }

    /// Hand the session back to the code that owns its lifecycle
    pub fn into_session(self) -> S {
        self.session
    }
}

#[async_trait]
impl<S: Session> Reader for ResilientReader<S> {
    async fn read(
        &mut self,
        token: &CancellationToken,
        node_id: &str,
    ) -> Result<Variant, ReadError> {
        let node: NodeId = node_id.parse()?;

        if token.is_cancelled() {
            return Err(ReadError::Cancelled);
        }

        self.retry.reset();
        let request = ReadRequest::new(node);

        loop {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ReadError::Cancelled),
                outcome = self.session.read(&request) => outcome,
            };

            match classify(outcome, self.session.state()) {
                Attempt::Complete(value) => return Ok(value),
                Attempt::Fatal(err) => return Err(err),
                Attempt::Retry(reason) => {
                    let delay = self.retry.next_delay();
                    tracing::warn!("read attempt failed ({}), retrying in {:?}", reason, delay);
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => return Err(ReadError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }
}
