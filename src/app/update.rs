use tracing::debug;

use crate::app::Model;
use crate::app::model::{EditMode, Field, Focus, Request, ResetPolicy, ToastLevel};
use crate::client::RemoteCallFailure;
use crate::record::{Draft, Gender, Record, RecordId};

/// All possible events and actions in the application.
///
/// These represent user input, remote call results and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Form
    /// Move focus to the next widget
    FocusNext,
    /// Move focus to the previous widget
    FocusPrev,
    /// Focus a specific widget
    Focus(Focus),
    /// Type a character into the focused text field
    InputChar(char),
    /// Delete the last character of the focused text field
    Backspace,
    /// Insert a line break (address only)
    Newline,
    /// Pick a gender radio option
    SetGender(Gender),
    /// Flip between the gender options
    ToggleGender,
    /// Flip the marital checkbox
    ToggleMarried,
    /// Submit the form: update when editing, create otherwise
    Submit,
    /// Send the draft as a replacement for the edit target
    Update,
    /// Leave edit mode and clear the form
    Cancel,

    // Table
    /// Select the next row
    SelectNext,
    /// Select the previous row
    SelectPrev,
    /// Load the record at a row into the form for editing
    BeginEdit(usize),
    /// Delete the record at a row
    Delete(usize),
    /// Reload the whole collection
    Refresh,

    // Remote call results
    /// List finished
    Listed(Result<Vec<Record>, RemoteCallFailure>),
    /// Create finished
    Created(Result<Record, RemoteCallFailure>),
    /// Update of `id` finished
    Updated {
        id: RecordId,
        result: Result<Record, RemoteCallFailure>,
    },
    /// Delete of `id` finished
    Deleted {
        id: RecordId,
        result: Result<(), RemoteCallFailure>,
    },

    // Overlays
    /// Close the front-most alert
    DismissAlert,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Application
    /// Quit the application
    Quit,
}

impl Message {
    /// Whether this message carries a remote call result.
    pub const fn is_response(&self) -> bool {
        matches!(
            self,
            Self::Listed(_) | Self::Created(_) | Self::Updated { .. } | Self::Deleted { .. }
        )
    }
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here. Remote calls are not made; they are
/// queued on the model and dispatched by the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    if msg.is_response() {
        model.in_flight = model.in_flight.saturating_sub(1);
    }

    match msg {
        Message::FocusNext => move_focus(&mut model, true),
        Message::FocusPrev => move_focus(&mut model, false),
        Message::Focus(focus) => {
            if model.focus_order().contains(&focus) {
                set_focus(&mut model, focus);
            }
        }
        Message::InputChar(c) => {
            if let Focus::Field(field) = model.focus
                && let Some(text) = model.text_field_mut(field)
            {
                text.push(c);
            }
        }
        Message::Backspace => {
            if let Focus::Field(field) = model.focus
                && let Some(text) = model.text_field_mut(field)
            {
                text.pop();
            }
        }
        Message::Newline => {
            if model.focus == Focus::Field(Field::Address) {
                model.draft.address.push('\n');
            }
        }
        Message::SetGender(gender) => model.draft.gender = gender,
        Message::ToggleGender => model.draft.gender = model.draft.gender.toggled(),
        Message::ToggleMarried => model.draft.is_married = !model.draft.is_married,
        Message::Submit => {
            if model.edit_mode.is_editing() {
                submit_update(&mut model);
            } else {
                submit_create(&mut model);
            }
            if model.reset_policy == ResetPolicy::Immediate {
                model.reset_form();
            }
        }
        Message::Update => submit_update(&mut model),
        Message::Cancel => model.reset_form(),

        Message::SelectNext => {
            if !model.records.is_empty() {
                let last = model.records.len() - 1;
                model.selected_row = Some(model.selected_row.map_or(0, |row| (row + 1).min(last)));
            }
        }
        Message::SelectPrev => {
            if !model.records.is_empty() {
                model.selected_row = Some(model.selected_row.map_or(0, |row| row.saturating_sub(1)));
            }
        }
        Message::BeginEdit(row) => {
            if let Some(record) = model.record_at(row).cloned() {
                model.edit_mode = EditMode::Editing(record.id.clone());
                model.draft = Draft::from(&record);
                model.selected_row = Some(row);
                model.focus = Focus::Field(Field::Name);
            } else {
                model.show_toast(ToastLevel::Warning, "No record selected");
            }
        }
        Message::Delete(row) => {
            if let Some(id) = model.record_at(row).map(|record| record.id.clone()) {
                model.queue(Request::Delete(id));
            } else {
                model.show_toast(ToastLevel::Warning, "No record selected");
            }
        }
        Message::Refresh => start_list(&mut model),

        Message::Listed(result) => {
            model.loading = false;
            match result {
                Ok(records) => {
                    debug!(count = records.len(), "record list replaced");
                    model.records = records;
                    model.clamp_selection();
                }
                Err(err) => model.raise_alert(&err),
            }
        }
        Message::Created(result) => match result {
            Ok(record) => {
                debug!(id = %record.id, "record created");
                start_list(&mut model);
                model.reset_form();
                model.show_toast(ToastLevel::Info, "Record created");
            }
            Err(err) => model.raise_alert(&err),
        },
        Message::Updated { id, result } => match result {
            Ok(record) => {
                for entry in &mut model.records {
                    if entry.id == id {
                        *entry = record.clone();
                    }
                }
                model.reset_form();
                model.show_toast(ToastLevel::Info, "Record updated");
            }
            Err(err) => model.raise_alert(&err),
        },
        Message::Deleted { id, result } => match result {
            Ok(()) => {
                debug!(%id, "record deleted");
                start_list(&mut model);
                model.show_toast(ToastLevel::Info, "Record deleted");
            }
            Err(err) => model.raise_alert(&err),
        },

        Message::DismissAlert => model.dismiss_alert(),
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
    }

    model
}

fn start_list(model: &mut Model) {
    model.loading = true;
    model.queue(Request::List);
}

fn submit_create(model: &mut Model) {
    let draft = model.draft.clone();
    model.queue(Request::Create(draft));
}

fn submit_update(model: &mut Model) {
    let Some(id) = model.edit_mode.target().cloned() else {
        return;
    };
    let draft = model.draft.clone();
    model.queue(Request::Update { id, draft });
}

fn set_focus(model: &mut Model, focus: Focus) {
    model.focus = focus;
    if focus == Focus::Table {
        model.clamp_selection();
    }
}

fn move_focus(model: &mut Model, forward: bool) {
    let order = model.focus_order();
    let len = order.len();
    let current = order
        .iter()
        .position(|focus| *focus == model.focus)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    };
    set_focus(model, order[next]);
}

/// Convenience for callers that need the `Model` back from `update` in place.
pub(super) fn apply(model: &mut Model, msg: Message) {
    *model = update(std::mem::take(model), msg);
}
