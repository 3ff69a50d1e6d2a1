//! Scripted [`Session`] used by tests and demo programs
//!
//! The session replays a queue of outcomes pushed through [`SimHandle`] and
//! reports every observed read back to the script owner. A read issued
//! against an exhausted script stays pending until another outcome is
//! queued.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::node::NodeId;
use crate::session::{ReadRequest, ReadResult, Session, SessionError, SessionState};
use crate::status::StatusCode;
use crate::variant::Variant;

/// Create a connected pair of [`SimSession`] and [`SimHandle`]
///
/// The session starts out in the [`SessionState::Connecting`] state until
/// the surrounding code calls [`Session::connect`].
pub fn sim() -> (SimSession, SimHandle) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let state = Arc::new(Mutex::new(SessionState::Connecting));
    let session = SimSession {
        rx: action_rx,
        events: event_tx,
        state: state.clone(),
    };
    let handle = SimHandle {
        tx: action_tx,
        rx: event_rx,
        state,
    };
    (session, handle)
}

// the next scripted outcome
enum Action {
    Result(ReadResult),
    Fault(StatusCode),
    IoError(std::io::ErrorKind),
}

/// Session activity observed by the script owner
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// a read was issued for this node
    Read(NodeId),
}

/// [`Session`] implementation that replays scripted outcomes
pub struct SimSession {
    rx: mpsc::UnboundedReceiver<Action>,
    events: mpsc::UnboundedSender<Event>,
    state: Arc<Mutex<SessionState>>,
}

/// Drives a [`SimSession`]: queues outcomes, flips the reported state, and
/// observes the reads the session received
pub struct SimHandle {
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    state: Arc<Mutex<SessionState>>,
}

impl SimHandle {
    /// Queue a good result carrying this value
    pub fn value(&mut self, value: impl Into<Variant>) {
        self.send(Action::Result(ReadResult::good(value.into())))
    }

    /// Queue a result with an operation-level status and a null value
    pub fn status(&mut self, status: StatusCode) {
        self.send(Action::Result(ReadResult::new(status, Variant::Null)))
    }

    /// Queue a service-level fault
    pub fn fault(&mut self, status: StatusCode) {
        self.send(Action::Fault(status))
    }

    /// Queue a transport failure
    pub fn io_error(&mut self, kind: std::io::ErrorKind) {
        self.send(Action::IoError(kind))
    }

    /// Change the state the session reports from now on
    pub fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap() = state;
    }

    /// Wait for the next observed event
    pub async fn next_event(&mut self) -> Event {
        self.rx.recv().await.expect("session was dropped")
    }

    /// Return the next observed event if one is already queued
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    fn send(&mut self, action: Action) {
        self.tx.send(action).expect("session was dropped")
    }
}

#[async_trait]
impl Session for SimSession {
    async fn read(&mut self, request: &ReadRequest) -> Result<ReadResult, SessionError> {
        self.events.send(Event::Read(request.node.clone())).ok();
        match self.rx.recv().await {
            Some(Action::Result(result)) => Ok(result),
            Some(Action::Fault(status)) => Err(SessionError::Fault(status)),
            Some(Action::IoError(kind)) => Err(SessionError::Io(kind)),
            // script owner went away: behave like a torn down transport
            None => Err(SessionError::Io(std::io::ErrorKind::UnexpectedEof)),
        }
    }

    fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    async fn connect(&mut self) -> Result<(), SessionError> {
        *self.state.lock().unwrap() = SessionState::Open;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        *self.state.lock().unwrap() = SessionState::Closed;
        Ok(())
    }
}
