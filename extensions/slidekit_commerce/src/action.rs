//! Async action adapter
//!
//! Runs a fallible future on a tokio runtime and reports its lifecycle as
//! [`ActionState`] values on the interaction thread:
//!
//! - `Pending` is emitted synchronously inside [`AsyncActionAdapter::invoke`]
//! - exactly one terminal state follows, delivered by [`AsyncActionAdapter::poll`]
//! - nothing is delivered after [`AsyncActionAdapter::teardown`]
//!
//! Work runs on the runtime's worker threads; results come back over an
//! unbounded channel, so callbacks only ever run on the thread that polls.

use std::any::Any;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Why an action did not produce a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError<E> {
    /// The action returned an error
    #[error("action failed: {0}")]
    Action(E),
    /// The task was aborted before finishing
    #[error("action cancelled")]
    Cancelled,
    /// The task panicked
    #[error("action panicked: {0}")]
    Panicked(String),
}

/// Lifecycle of one invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ActionState<T, E> {
    Pending,
    Success(T),
    Failure(ActionError<E>),
}

impl<T, E> ActionState<T, E> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionState::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionState::Failure(_))
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

/// Identifies one `invoke` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationId(pub u64);

struct Delivery<T, E> {
    id: InvocationId,
    state: ActionState<T, E>,
}

type StateCallback<T, E> = Box<dyn FnMut(InvocationId, &ActionState<T, E>) + Send>;

pub struct AsyncActionAdapter<T, E> {
    handle: Handle,
    tx: mpsc::UnboundedSender<Delivery<T, E>>,
    rx: mpsc::UnboundedReceiver<Delivery<T, E>>,
    in_flight: Vec<(InvocationId, AbortHandle)>,
    callback: Option<StateCallback<T, E>>,
    next_id: u64,
    torn_down: bool,
}

impl<T, E> AsyncActionAdapter<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Adapter spawning onto `handle`
    pub fn new(handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            tx,
            rx,
            in_flight: Vec::new(),
            callback: None,
            next_id: 0,
            torn_down: false,
        }
    }

    /// Adapter for the runtime the caller is running inside.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn from_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Receive every state, Pending included
    pub fn on_state_changed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(InvocationId, &ActionState<T, E>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn set_on_state_changed<F>(&mut self, callback: F)
    where
        F: FnMut(InvocationId, &ActionState<T, E>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Start `action`. Pending is reported before this returns.
    ///
    /// After teardown the action is dropped unstarted and nothing is reported.
    pub fn invoke<F>(&mut self, action: F) -> InvocationId
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let id = InvocationId(self.next_id);
        self.next_id += 1;
        if self.torn_down {
            tracing::warn!(id = id.0, "invoke after teardown ignored");
            return id;
        }

        self.emit(id, &ActionState::Pending);

        let task = self.handle.spawn(action);
        self.in_flight.push((id, task.abort_handle()));

        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let state = match task.await {
                Ok(Ok(value)) => ActionState::Success(value),
                Ok(Err(err)) => ActionState::Failure(ActionError::Action(err)),
                Err(err) if err.is_cancelled() => ActionState::Failure(ActionError::Cancelled),
                Err(err) => {
                    ActionState::Failure(ActionError::Panicked(panic_message(err.into_panic())))
                }
            };
            if tx.send(Delivery { id, state }).is_err() {
                tracing::trace!(id = id.0, "result discarded: adapter gone");
            }
        });

        tracing::debug!(id = id.0, "action invoked");
        id
    }

    /// Deliver finished results in completion order. Call from the interaction thread.
    pub fn poll(&mut self) -> Vec<ActionState<T, E>> {
        let mut delivered = Vec::new();
        if self.torn_down {
            return delivered;
        }
        while let Ok(delivery) = self.rx.try_recv() {
            delivered.push(self.deliver(delivery));
        }
        delivered
    }

    /// Block until at least one result arrives or `timeout` passes, then
    /// deliver everything available.
    ///
    /// Must not be called from inside the runtime.
    pub fn wait_for_delivery(&mut self, timeout: Duration) -> Vec<ActionState<T, E>> {
        if self.torn_down || self.in_flight.is_empty() {
            return self.poll();
        }
        let rx = &mut self.rx;
        let first = self
            .handle
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await });
        let mut delivered = Vec::new();
        match first {
            Ok(Some(delivery)) => delivered.push(self.deliver(delivery)),
            Ok(None) => {}
            Err(_) => tracing::debug!(?timeout, "no action finished before timeout"),
        }
        delivered.extend(self.poll());
        delivered
    }

    /// Number of invocations without a delivered terminal state
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Abort all in-flight work and stop delivering. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        for (id, abort) in self.in_flight.drain(..) {
            tracing::debug!(id = id.0, "aborting action");
            abort.abort();
        }
        self.rx.close();
        self.callback = None;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn deliver(&mut self, delivery: Delivery<T, E>) -> ActionState<T, E> {
        let Delivery { id, state } = delivery;
        self.in_flight.retain(|(pending, _)| *pending != id);
        tracing::debug!(
            id = id.0,
            success = state.is_success(),
            "action finished"
        );
        self.emit(id, &state);
        state
    }

    fn emit(&mut self, id: InvocationId, state: &ActionState<T, E>) {
        if let Some(callback) = self.callback.as_mut() {
            callback(id, state);
        }
    }
}

impl<T, E> Drop for AsyncActionAdapter<T, E> {
    fn drop(&mut self) {
        for (_, abort) in self.in_flight.drain(..) {
            abort.abort();
        }
        self.rx.close();
    }
}

impl<T, E> std::fmt::Debug for AsyncActionAdapter<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncActionAdapter")
            .field("in_flight", &self.in_flight.len())
            .field("next_id", &self.next_id)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "unknown panic".to_string(),
        },
    }
}
