use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::client::RemoteCallFailure;
use crate::record::{Draft, Record, RecordId};

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Creating,
    Editing(RecordId),
}

impl EditMode {
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub const fn target(&self) -> Option<&RecordId> {
        match self {
            Self::Creating => None,
            Self::Editing(id) => Some(id),
        }
    }
}

/// When the form is cleared after a submit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Only once the server confirms the create or update.
    #[default]
    OnSuccess,
    /// Also right after the request is sent, before any response.
    Immediate,
}

/// Editable form inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    Gender,
    Married,
    Address,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::Gender,
        Self::Married,
        Self::Address,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Gender => "Gender",
            Self::Married => "Is Married?",
            Self::Address => "Address",
        }
    }

    /// Fields that take typed text.
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Email | Self::Password | Self::Address
        )
    }
}

/// Which widget receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    SubmitButton,
    CancelButton,
    Table,
}

impl Default for Focus {
    fn default() -> Self {
        Self::Field(Field::Name)
    }
}

/// A remote call queued by `update`, waiting to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(Draft),
    Update { id: RecordId, draft: Draft },
    Delete(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete view state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default)]
pub struct Model {
    /// Cached copy of the remote collection
    pub records: Vec<Record>,
    /// True while a list request is outstanding
    pub loading: bool,
    /// Create or edit target
    pub edit_mode: EditMode,
    /// Current form values
    pub draft: Draft,
    /// Widget receiving key input
    pub focus: Focus,
    /// Highlighted table row
    pub selected_row: Option<usize>,
    /// Endpoint shown in the status bar
    pub endpoint: String,
    /// When the form is cleared after submit
    pub reset_policy: ResetPolicy,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Requests dispatched but not yet answered
    pub in_flight: usize,
    /// Blocking error notifications, oldest first
    alerts: VecDeque<String>,
    toast: Option<Toast>,
    /// Requests queued by `update` and not yet handed to a worker
    outbox: Vec<Request>,
}

impl Model {
    /// Create a model for `endpoint` with an empty list.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Record at `row`, if any.
    pub fn record_at(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Hand queued requests to the caller, leaving the queue empty.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Requests queued since the last [`Model::take_requests`].
    pub fn pending_requests(&self) -> &[Request] {
        &self.outbox
    }

    pub(super) fn queue(&mut self, request: Request) {
        self.in_flight += 1;
        self.outbox.push(request);
    }

    /// Clear the edit target and every form field.
    pub(super) fn reset_form(&mut self) {
        self.edit_mode = EditMode::Creating;
        self.draft = Draft::default();
        if self.focus == Focus::CancelButton {
            self.focus = Focus::SubmitButton;
        }
    }

    /// Keep the row selection inside the current list.
    pub(super) fn clamp_selection(&mut self) {
        self.selected_row = match (self.selected_row, self.records.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(row), len) => Some(row.min(len - 1)),
        };
    }

    pub(super) fn raise_alert(&mut self, failure: &RemoteCallFailure) {
        self.alerts.push_back(failure.to_string());
    }

    /// The alert currently blocking input, if any.
    pub fn active_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    pub(super) fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Focus targets in tab order for the current mode.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = Field::ALL.iter().copied().map(Focus::Field).collect();
        order.push(Focus::SubmitButton);
        if self.edit_mode.is_editing() {
            order.push(Focus::CancelButton);
        }
        order.push(Focus::Table);
        order
    }

    pub fn submit_label(&self) -> &'static str {
        if self.edit_mode.is_editing() {
            "Update"
        } else {
            "Submit"
        }
    }

    /// Mutable access to the text behind a text field.
    pub(super) fn text_field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.draft.name),
            Field::Email => Some(&mut self.draft.email),
            Field::Password => Some(&mut self.draft.password),
            Field::Address => Some(&mut self.draft.address),
            Field::Gender | Field::Married => None,
        }
    }
}
