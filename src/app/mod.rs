//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete view state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Remote calls never happen inside `update`. It queues [`Request`]s on
//! the model; the event loop hands them to worker threads and feeds the
//! results back in as messages.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use effects::{perform, spawn_request};
pub use input::{handle_event, handle_key};
pub use model::{EditMode, Field, Focus, Model, Request, ResetPolicy, ToastLevel};
pub use update::{Message, update};

use std::sync::Arc;
use std::time::Duration;

use crate::client::RecordApi;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    endpoint: String,
    reset_policy: ResetPolicy,
    timeout: Option<Duration>,
    api: Option<Arc<dyn RecordApi>>,
}

impl App {
    /// Create a new application for the collection at `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reset_policy: ResetPolicy::default(),
            timeout: None,
            api: None,
        }
    }

    /// Choose when the form is cleared after submit.
    #[must_use]
    pub const fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Set a per-request timeout. `None` waits indefinitely.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use `api` instead of an HTTP client built from the endpoint.
    #[must_use]
    pub fn with_api(mut self, api: Arc<dyn RecordApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// The initial model: empty list, create mode, first list queued.
    pub fn initial_model(&self) -> Model {
        let model = Model::new(self.endpoint.clone()).with_reset_policy(self.reset_policy);
        update(model, Message::Refresh)
    }
}

#[cfg(test)]
mod tests;
