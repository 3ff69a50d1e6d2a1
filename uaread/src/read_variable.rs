use tokio_util::sync::CancellationToken;

use crate::client::Reader;
use crate::error::ReadVariableError;
use crate::variant::Variant;

/// Immutable request value object carried across the use-case boundary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadVariableRequest {
    node_id: String,
}

impl ReadVariableRequest {
    /// Create a request for a single node id
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }

    /// Node id string this request targets
    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

/// Immutable response value object produced on a successful read
#[derive(Clone, Debug, PartialEq)]
pub struct ReadVariableResponse {
    value: Variant,
}

impl ReadVariableResponse {
    /// Decoded value of the variable
    pub fn value(&self) -> &Variant {
        &self.value
    }

    /// Consume the response, returning the decoded value
    pub fn into_value(self) -> Variant {
        self.value
    }
}

/// Orchestrates a single variable read through an injected [`Reader`]
///
/// This layer holds no retry logic: retries are entirely the reader's
/// responsibility, which is what allows testing the orchestration with a
/// zero-retry stub. Failures are re-wrapped with use-case context and the
/// original cause stays reachable through
/// [`source`](std::error::Error::source).
pub struct ReadVariableUseCase<R> {
    reader: R,
}

impl<R: Reader> ReadVariableUseCase<R> {
    /// Create the use case around a reader capability
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Execute the read described by `request`
    pub async fn execute(
        &mut self,
        token: &CancellationToken,
        request: &ReadVariableRequest,
    ) -> Result<ReadVariableResponse, ReadVariableError> {
        let value = self.reader.read(token, request.node_id()).await?;
        Ok(ReadVariableResponse { value })
    }

    /// Tear down the use case, returning the injected reader
    pub fn into_reader(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ReadError;
    use crate::status::StatusCode;

    #[derive(Default)]
    struct StubReader {
        value: Option<Variant>,
        err: Option<ReadError>,
        node_ids: Vec<String>,
    }

    #[async_trait]
    impl Reader for StubReader {
        async fn read(
            &mut self,
            _token: &CancellationToken,
            node_id: &str,
        ) -> Result<Variant, ReadError> {
            self.node_ids.push(node_id.to_string());
            match (&self.value, self.err) {
                (_, Some(err)) => Err(err),
                (Some(value), None) => Ok(value.clone()),
                (None, None) => panic!("stub value not set"),
            }
        }
    }

    #[tokio::test]
    async fn reads_a_variable_through_the_injected_reader() {
        let mut use_case = ReadVariableUseCase::new(StubReader {
            value: Some(Variant::Int32(42)),
            ..Default::default()
        });

        let request = ReadVariableRequest::new("ns=2;i=1234");
        let response = use_case
            .execute(&CancellationToken::new(), &request)
            .await
            .unwrap();

        assert_eq!(response.value(), &Variant::Int32(42));

        let stub = use_case.into_reader();
        assert_eq!(stub.node_ids, vec!["ns=2;i=1234".to_string()]);
    }

    #[tokio::test]
    async fn wraps_reader_errors_with_use_case_context() {
        let mut use_case = ReadVariableUseCase::new(StubReader {
            err: Some(ReadError::Status(StatusCode::BadNodeIdUnknown)),
            ..Default::default()
        });

        let request = ReadVariableRequest::new("ns=2;i=1234");
        let err = use_case
            .execute(&CancellationToken::new(), &request)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to read variable: read failed with status: BadNodeIdUnknown"
        );
        // the original cause must stay structurally inspectable
        assert_eq!(err.source, ReadError::Status(StatusCode::BadNodeIdUnknown));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.downcast_ref::<ReadError>(),
            Some(&ReadError::Status(StatusCode::BadNodeIdUnknown))
        );
    }
}
