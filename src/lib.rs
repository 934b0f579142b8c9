// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. record::RecordId)
    clippy::module_name_repetitions
)]

//! # Recordbook
//!
//! A terminal client for a remote collection of person records.
//!
//! Recordbook talks to a JSON REST endpoint and offers:
//! - A form for creating and editing records
//! - A table of every record with edit and delete actions
//! - Blocking error alerts for failed remote calls
//! - Saved defaults for the endpoint and form behavior
//!
//! ## Architecture
//!
//! Recordbook uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events, actions and remote call results
//! - **Update**: Pure state transitions that queue remote calls
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`client`]: HTTP access to the record collection
//! - [`record`]: Record, draft and wire types
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flags and config file locations

pub mod app;
pub mod client;
pub mod config;
pub mod record;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, EditMode, Message, Model, update};
    pub use crate::client::{HttpRecordApi, RecordApi, RemoteCallFailure};
    pub use crate::record::{Draft, Gender, Record, RecordId};
}
