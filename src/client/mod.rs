//! Remote record collection client.
//!
//! [`RecordApi`] is the seam between the view and the network. The
//! production implementation, [`HttpRecordApi`], talks JSON over HTTP with
//! a blocking `reqwest` client; every call runs on its own worker thread
//! (see `app::effects`), so blocking here never stalls the UI.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};

use crate::record::{Record, RecordId, RecordPayload};

/// Default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/data";

/// The four remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// A failed remote call.
///
/// Transport errors, non-success statuses and undecodable bodies all end up
/// here with the underlying error rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct RemoteCallFailure {
    pub operation: Operation,
    pub message: String,
}

impl RemoteCallFailure {
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Operations against the remote record collection.
pub trait RecordApi: Send + Sync {
    /// `GET {base}`
    ///
    /// # Errors
    /// Returns a [`RemoteCallFailure`] on any transport, status or decode error.
    fn list(&self) -> Result<Vec<Record>, RemoteCallFailure>;

    /// `POST {base}`
    ///
    /// # Errors
    /// Returns a [`RemoteCallFailure`] on any transport, status or decode error.
    fn create(&self, payload: &RecordPayload) -> Result<Record, RemoteCallFailure>;

    /// `PUT {base}/{id}`
    ///
    /// # Errors
    /// Returns a [`RemoteCallFailure`] on any transport, status or decode error.
    fn update(&self, id: &RecordId, payload: &RecordPayload) -> Result<Record, RemoteCallFailure>;

    /// `DELETE {base}/{id}`; the response body is ignored.
    ///
    /// # Errors
    /// Returns a [`RemoteCallFailure`] on any transport or status error.
    fn delete(&self, id: &RecordId) -> Result<(), RemoteCallFailure>;
}

/// [`RecordApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: Client,
    base: String,
}

impl HttpRecordApi {
    /// Build a client for `base`. `None` disables the request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// `{base}/{id}` with a single separating slash.
    pub fn item_url(&self, id: &RecordId) -> String {
        item_url(&self.base, id)
    }
}

pub fn item_url(base: &str, id: &RecordId) -> String {
    format!("{}/{id}", base.trim_end_matches('/'))
}

fn send(operation: Operation, request: RequestBuilder) -> Result<Response, RemoteCallFailure> {
    request
        .send()
        .and_then(Response::error_for_status)
        .map_err(|err| RemoteCallFailure::new(operation, err.to_string()))
}

impl RecordApi for HttpRecordApi {
    fn list(&self) -> Result<Vec<Record>, RemoteCallFailure> {
        send(Operation::List, self.client.get(&self.base))?
            .json()
            .map_err(|err| RemoteCallFailure::new(Operation::List, err.to_string()))
    }

    fn create(&self, payload: &RecordPayload) -> Result<Record, RemoteCallFailure> {
        send(Operation::Create, self.client.post(&self.base).json(payload))?
            .json()
            .map_err(|err| RemoteCallFailure::new(Operation::Create, err.to_string()))
    }

    fn update(&self, id: &RecordId, payload: &RecordPayload) -> Result<Record, RemoteCallFailure> {
        send(
            Operation::Update,
            self.client.put(self.item_url(id)).json(payload),
        )?
        .json()
        .map_err(|err| RemoteCallFailure::new(Operation::Update, err.to_string()))
    }

    fn delete(&self, id: &RecordId) -> Result<(), RemoteCallFailure> {
        send(Operation::Delete, self.client.delete(self.item_url(id))).map(drop)
    }
}
