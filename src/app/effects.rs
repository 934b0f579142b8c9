use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, warn};

use crate::app::Message;
use crate::app::model::Request;
use crate::client::{Operation, RecordApi, RemoteCallFailure};

static NEXT_REQUEST_SEQ: AtomicU64 = AtomicU64::new(1);

impl Request {
    pub const fn operation(&self) -> Operation {
        match self {
            Self::List => Operation::List,
            Self::Create(_) => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete(_) => Operation::Delete,
        }
    }

    /// The result message this request produces when it fails before
    /// reaching the remote collection.
    fn failed(self, failure: RemoteCallFailure) -> Message {
        match self {
            Self::List => Message::Listed(Err(failure)),
            Self::Create(_) => Message::Created(Err(failure)),
            Self::Update { id, .. } => Message::Updated {
                id,
                result: Err(failure),
            },
            Self::Delete(id) => Message::Deleted {
                id,
                result: Err(failure),
            },
        }
    }
}

/// Run `request` against `api` on the current thread and wrap the outcome.
pub fn perform(api: &dyn RecordApi, request: Request) -> Message {
    match request {
        Request::List => Message::Listed(api.list()),
        Request::Create(draft) => Message::Created(api.create(&draft.to_payload())),
        Request::Update { id, draft } => {
            let result = api.update(&id, &draft.to_payload());
            Message::Updated { id, result }
        }
        Request::Delete(id) => {
            let result = api.delete(&id);
            Message::Deleted { id, result }
        }
    }
}

/// Run `request` on a worker thread and send the result message to `tx`.
///
/// Requests are independent: nothing orders, merges or cancels them, and
/// results are delivered in completion order.
pub fn spawn_request(api: Arc<dyn RecordApi>, request: Request, tx: Sender<Message>) {
    let seq = NEXT_REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
    let operation = request.operation();
    debug!(seq, %operation, "dispatching request");

    let worker_request = request.clone();
    let worker_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(format!("request-{operation}-{seq}"))
        .spawn(move || {
            let msg = perform(api.as_ref(), worker_request);
            if let Some(err) = response_error(&msg) {
                warn!(seq, %operation, %err, "request failed");
            } else {
                debug!(seq, %operation, "request completed");
            }
            // The receiver is gone only when the UI has shut down.
            let _ = worker_tx.send(msg);
        });

    if let Err(err) = spawned {
        warn!(seq, %operation, %err, "could not start request worker");
        let failure = RemoteCallFailure::new(operation, format!("could not start request: {err}"));
        let _ = tx.send(request.failed(failure));
    }
}

fn response_error(msg: &Message) -> Option<&RemoteCallFailure> {
    match msg {
        Message::Listed(Err(err))
        | Message::Created(Err(err))
        | Message::Updated { result: Err(err), .. }
        | Message::Deleted { result: Err(err), .. } => Some(err),
        _ => None,
    }
}
