use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use uaread::client::{fixed_retry_strategy, ResilientReader};
use uaread::sim::{sim, Event};
use uaread::{
    NodeId, ReadError, ReadVariableRequest, ReadVariableUseCase, Session, StatusCode, Variant,
};

#[tokio::test(start_paused = true)]
async fn use_case_survives_session_invalidation() {
    let (mut session, mut handle) = sim();
    session.connect().await.unwrap();

    // the server tears down the session twice before answering
    handle.fault(StatusCode::BadSessionIdInvalid);
    handle.fault(StatusCode::BadSessionNotActivated);
    handle.value(42);

    let reader = ResilientReader::new(session, fixed_retry_strategy(Duration::from_secs(1)));
    let mut use_case = ReadVariableUseCase::new(reader);

    let request = ReadVariableRequest::new("ns=2;i=1234");
    let start = Instant::now();
    let response = use_case
        .execute(&CancellationToken::new(), &request)
        .await
        .unwrap();

    assert_eq!(response.value(), &Variant::Int32(42));
    assert_eq!(start.elapsed(), Duration::from_secs(2));

    for _ in 0..3 {
        assert_eq!(
            handle.next_event().await,
            Event::Read(NodeId::numeric(2, 1234))
        );
    }
    assert!(handle.try_next_event().is_none());
}

#[tokio::test]
async fn use_case_surfaces_permanent_failures_with_context() {
    let (mut session, mut handle) = sim();
    session.connect().await.unwrap();
    handle.fault(StatusCode::BadNodeIdUnknown);

    let reader = ResilientReader::new(session, fixed_retry_strategy(Duration::from_secs(1)));
    let mut use_case = ReadVariableUseCase::new(reader);

    let request = ReadVariableRequest::new("ns=2;i=9999");
    let err = use_case
        .execute(&CancellationToken::new(), &request)
        .await
        .unwrap_err();

    assert_eq!(err.source, ReadError::Status(StatusCode::BadNodeIdUnknown));
    assert_eq!(
        err.to_string(),
        "failed to read variable: read failed with status: BadNodeIdUnknown"
    );
    assert!(handle.try_next_event().is_some());
    assert!(handle.try_next_event().is_none());
}

#[tokio::test(start_paused = true)]
async fn use_case_returns_cancelled_when_the_deadline_expires_mid_backoff() {
    let (mut session, mut handle) = sim();
    session.connect().await.unwrap();

    // one recoverable fault, then a value the reader must never reach
    handle.fault(StatusCode::BadSecureChannelIdInvalid);
    handle.value(42);

    let reader = ResilientReader::new(session, fixed_retry_strategy(Duration::from_secs(1)));
    let mut use_case = ReadVariableUseCase::new(reader);

    let token = CancellationToken::new();
    let deadline = token.clone();
    let request = ReadVariableRequest::new("i=85");

    let (result, _) = tokio::join!(use_case.execute(&token, &request), async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        deadline.cancel();
    });

    let err = result.unwrap_err();
    assert_eq!(err.source, ReadError::Cancelled);

    // exactly one attempt was made before the deadline hit
    assert_eq!(handle.next_event().await, Event::Read(NodeId::numeric(0, 85)));
    assert!(handle.try_next_event().is_none());
}
