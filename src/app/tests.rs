use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;

use crate::client::{Operation, RecordApi, RemoteCallFailure};
use crate::record::{Draft, Gender, Record, RecordId, RecordPayload};

use super::{
    App, EditMode, Field, Focus, Message, Model, Request, ResetPolicy, handle_key, perform, update,
};

/// In-memory stand-in for the remote collection.
///
/// Like a real server it normalizes what it stores (trims names, lowercases
/// emails), so tests can tell server responses apart from local drafts.
#[derive(Default)]
struct FakeCollection {
    records: Mutex<Vec<Record>>,
    next_id: Mutex<i64>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<Operation>>,
}

impl FakeCollection {
    fn with_records(records: Vec<Record>) -> Self {
        let next = records
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(next + 1),
            ..Self::default()
        }
    }

    fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn snapshot(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, operation: Operation) -> Result<(), RemoteCallFailure> {
        self.calls.lock().unwrap().push(operation);
        if *self.failing.lock().unwrap() {
            Err(RemoteCallFailure::new(
                operation,
                "HTTP status server error (500 Internal Server Error)",
            ))
        } else {
            Ok(())
        }
    }

    fn stored(id: RecordId, payload: &RecordPayload) -> Record {
        Record {
            id,
            name: payload.name.trim().to_string(),
            email: payload.email.to_lowercase(),
            password: payload.password.clone(),
            gender: payload.gender,
            is_married: payload.marital,
            address: payload.address.clone(),
        }
    }
}

impl RecordApi for FakeCollection {
    fn list(&self) -> Result<Vec<Record>, RemoteCallFailure> {
        self.check(Operation::List)?;
        Ok(self.snapshot())
    }

    fn create(&self, payload: &RecordPayload) -> Result<Record, RemoteCallFailure> {
        self.check(Operation::Create)?;
        let mut next = self.next_id.lock().unwrap();
        let record = Self::stored(RecordId::Number(*next), payload);
        *next += 1;
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &RecordId, payload: &RecordPayload) -> Result<Record, RemoteCallFailure> {
        self.check(Operation::Update)?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RemoteCallFailure::new(Operation::Update, "404 Not Found"))?;
        *slot = Self::stored(id.clone(), payload);
        Ok(slot.clone())
    }

    fn delete(&self, id: &RecordId) -> Result<(), RemoteCallFailure> {
        self.check(Operation::Delete)?;
        self.records.lock().unwrap().retain(|r| &r.id != id);
        Ok(())
    }
}

fn person(id: i64, name: &str) -> Record {
    Record {
        id: RecordId::Number(id),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        password: format!("{name}-pw"),
        gender: Gender::Female,
        is_married: false,
        address: format!("{id} Elm St"),
    }
}

fn seeded() -> FakeCollection {
    FakeCollection::with_records(vec![person(3, "Ada"), person(5, "Grace"), person(8, "Hedy")])
}

/// Dispatch queued requests one at a time, in order, until none remain.
fn drive(mut model: Model, api: &dyn RecordApi) -> Model {
    loop {
        let requests = model.take_requests();
        if requests.is_empty() {
            return model;
        }
        for request in requests {
            let msg = perform(api, request);
            model = update(model, msg);
        }
    }
}

fn loaded(api: &FakeCollection) -> Model {
    drive(App::new("http://test/data").initial_model(), api)
}

fn row_of(model: &Model, id: i64) -> usize {
    model
        .records
        .iter()
        .position(|r| r.id == RecordId::Number(id))
        .unwrap()
}

fn type_text(mut model: Model, field: Field, text: &str) -> Model {
    model = update(model, Message::Focus(Focus::Field(field)));
    for c in text.chars() {
        model = update(model, Message::InputChar(c));
    }
    model
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_initial_model_queues_list_and_shows_loading() {
    let model = App::new("http://test/data").initial_model();
    assert!(model.loading);
    assert_eq!(model.pending_requests(), &[Request::List]);
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
}

#[test]
fn test_injected_api_answers_initial_list() {
    let api: Arc<dyn RecordApi> = Arc::new(seeded());
    let app = App::new("http://test/data").with_api(Arc::clone(&api));
    let model = drive(app.initial_model(), api.as_ref());
    assert_eq!(model.records.len(), 3);
}

#[test]
fn test_list_replaces_records_and_clears_loading() {
    let api = seeded();
    let model = loaded(&api);
    assert!(!model.loading);
    assert_eq!(model.records, api.snapshot());
    assert_eq!(model.selected_row, Some(0));
    assert_eq!(model.in_flight, 0);
}

#[test]
fn test_list_is_idempotent_for_unchanged_collection() {
    let api = seeded();
    let first = loaded(&api);
    let before = first.records.clone();
    let second = drive(update(first, Message::Refresh), &api);
    let third = drive(update(second, Message::Refresh), &api);
    assert_eq!(third.records, before);
}

#[test]
fn test_list_failure_clears_loading_and_keeps_previous_list() {
    let api = seeded();
    let model = loaded(&api);
    let before = model.records.clone();

    api.set_failing(true);
    let model = update(model, Message::Refresh);
    assert!(model.loading);
    let model = drive(model, &api);

    assert!(!model.loading);
    assert_eq!(model.records, before);
    assert!(model.active_alert().unwrap().starts_with("list failed"));
}

#[test]
fn test_create_round_trip_adds_server_assigned_record() {
    let api = seeded();
    let model = loaded(&api);

    let model = type_text(model, Field::Name, "A");
    let model = type_text(model, Field::Email, "a@x.com");
    let model = type_text(model, Field::Password, "p");
    let model = update(model, Message::SetGender(Gender::Male));
    let model = type_text(model, Field::Address, "addr");
    assert!(!model.draft.is_married);

    let model = update(model, Message::Submit);
    assert!(matches!(model.pending_requests(), [Request::Create(_)]));
    let model = drive(model, &api);

    let created = model
        .records
        .iter()
        .find(|r| r.name == "A")
        .expect("created record is listed after refresh");
    assert_eq!(created.id, RecordId::Number(9));
    assert_eq!(created.email, "a@x.com");
    assert_eq!(created.password, "p");
    assert_eq!(created.gender, Gender::Male);
    assert!(!created.is_married);
    assert_eq!(created.address, "addr");

    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
    assert_eq!(
        api.calls(),
        vec![Operation::List, Operation::Create, Operation::List]
    );
}

#[test]
fn test_begin_edit_copies_every_field_into_draft() {
    let api = seeded();
    let model = loaded(&api);
    let row = row_of(&model, 5);
    let model = update(model, Message::BeginEdit(row));

    assert_eq!(model.edit_mode, EditMode::Editing(RecordId::Number(5)));
    assert_eq!(model.draft, Draft::from(&person(5, "Grace")));
    assert_eq!(model.draft.password, "Grace-pw");
    assert_eq!(model.submit_label(), "Update");
    assert!(model.pending_requests().is_empty());
}

#[test]
fn test_update_replaces_entry_with_server_response() {
    let api = seeded();
    let model = loaded(&api);
    let row = row_of(&model, 5);
    let model = update(model, Message::BeginEdit(row));

    // Server trims names and lowercases emails, so the local draft differs
    // from what comes back.
    let model = type_text(model, Field::Name, "  ");
    let mut model = update(model, Message::Focus(Focus::Field(Field::Email)));
    model.draft.email = "GRACE@NAVY.MIL".to_string();
    let draft_sent = model.draft.clone();

    let model = update(model, Message::Submit);
    assert_eq!(
        model.pending_requests(),
        &[Request::Update {
            id: RecordId::Number(5),
            draft: draft_sent,
        }]
    );
    let model = drive(model, &api);

    let entry = &model.records[row];
    assert_eq!(entry.id, RecordId::Number(5));
    assert_eq!(entry.name, "Grace");
    assert_eq!(entry.email, "grace@navy.mil");
    assert_eq!(entry, &api.snapshot()[row]);
    assert_eq!(model.records[row_of(&model, 3)], person(3, "Ada"));
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
    // Update patches the list locally; no refresh follows.
    assert_eq!(api.calls(), vec![Operation::List, Operation::Update]);
}

#[test]
fn test_delete_removes_record_after_resync() {
    let api = seeded();
    let model = loaded(&api);
    let row = row_of(&model, 5);
    let model = update(model, Message::Delete(row));
    assert_eq!(
        model.pending_requests(),
        &[Request::Delete(RecordId::Number(5))]
    );
    let model = drive(model, &api);

    assert!(model.records.iter().all(|r| r.id != RecordId::Number(5)));
    assert_eq!(model.records.len(), 2);
    assert_eq!(
        api.calls(),
        vec![Operation::List, Operation::Delete, Operation::List]
    );
}

#[test]
fn test_cancel_resets_without_remote_call() {
    let api = seeded();
    let model = loaded(&api);
    let before = api.snapshot();
    let row = row_of(&model, 5);
    let model = update(model, Message::BeginEdit(row));
    let model = update(model, Message::Cancel);

    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
    assert!(model.pending_requests().is_empty());
    let model = drive(model, &api);
    assert_eq!(api.snapshot(), before);
    assert_eq!(api.calls(), vec![Operation::List]);
    assert_eq!(model.records, before);
}

#[test]
fn test_failed_create_leaves_list_and_form_untouched() {
    let api = seeded();
    let model = loaded(&api);
    let before = model.records.clone();
    let model = type_text(model, Field::Name, "Lin");
    let draft = model.draft.clone();

    api.set_failing(true);
    let model = drive(update(model, Message::Submit), &api);

    assert_eq!(model.records, before);
    assert_eq!(model.draft, draft);
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.active_alert().unwrap().starts_with("create failed"));
}

#[test]
fn test_failed_update_leaves_list_and_form_untouched() {
    let api = seeded();
    let model = loaded(&api);
    let before = model.records.clone();
    let row = row_of(&model, 8);
    let model = type_text(update(model, Message::BeginEdit(row)), Field::Name, "!");
    let draft = model.draft.clone();

    api.set_failing(true);
    let model = drive(update(model, Message::Submit), &api);

    assert_eq!(model.records, before);
    assert_eq!(model.draft, draft);
    assert_eq!(model.edit_mode, EditMode::Editing(RecordId::Number(8)));
    assert!(model.active_alert().unwrap().starts_with("update failed"));
}

#[test]
fn test_failed_delete_leaves_list_untouched() {
    let api = seeded();
    let model = loaded(&api);
    let before = model.records.clone();

    api.set_failing(true);
    let model = drive(update(model, Message::Delete(0)), &api);

    assert_eq!(model.records, before);
    assert_eq!(model.alert_count(), 1);
    assert_eq!(api.calls(), vec![Operation::List, Operation::Delete]);
}

#[test]
fn test_update_without_edit_target_is_noop() {
    let api = seeded();
    let model = type_text(loaded(&api), Field::Name, "draft");
    let draft = model.draft.clone();
    let records = model.records.clone();

    let model = update(model, Message::Update);
    assert!(model.pending_requests().is_empty());
    assert_eq!(model.in_flight, 0);
    assert_eq!(model.draft, draft);
    assert_eq!(model.records, records);
    assert_eq!(model.edit_mode, EditMode::Creating);
}

#[test]
fn test_immediate_policy_resets_before_response() {
    let api = seeded();
    let model = drive(
        App::new("http://test/data")
            .with_reset_policy(ResetPolicy::Immediate)
            .initial_model(),
        &api,
    );
    let row = row_of(&model, 3);
    let model = type_text(update(model, Message::BeginEdit(row)), Field::Name, "!");

    let model = update(model, Message::Submit);
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
    match model.pending_requests() {
        [Request::Update { id, draft }] => {
            assert_eq!(id, &RecordId::Number(3));
            assert_eq!(draft.name, "Ada!");
        }
        other => panic!("unexpected requests: {other:?}"),
    }
}

#[test]
fn test_immediate_policy_clears_form_even_when_create_fails() {
    let api = seeded();
    let model = Model::new("x").with_reset_policy(ResetPolicy::Immediate);
    let model = drive(update(model, Message::Refresh), &api);
    let model = type_text(model, Field::Name, "lost");

    api.set_failing(true);
    let model = drive(update(model, Message::Submit), &api);
    assert!(model.draft.is_blank());
    assert_eq!(model.alert_count(), 1);
}

#[test]
fn test_late_update_response_still_applies_after_cancel() {
    let api = seeded();
    let model = loaded(&api);
    let row = row_of(&model, 3);
    let model = update(model, Message::BeginEdit(row));
    let mut model = update(model, Message::Submit);
    let requests = model.take_requests();

    // User moves on before the response lands.
    model = update(model, Message::Cancel);
    let row = row_of(&model, 8);
    model = update(model, Message::BeginEdit(row));

    for request in requests {
        model = update(model, perform(&api, request));
    }
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.draft.is_blank());
}

#[test]
fn test_list_responses_apply_in_arrival_order() {
    let model = update(Model::new("x"), Message::Refresh);
    let model = update(model, Message::Refresh);
    assert_eq!(model.in_flight, 2);

    let newer = vec![person(1, "New")];
    let older = vec![person(1, "Old")];
    let model = update(model, Message::Listed(Ok(newer)));
    let model = update(model, Message::Listed(Ok(older.clone())));
    assert_eq!(model.records, older);
    assert_eq!(model.in_flight, 0);
    assert!(!model.loading);
}

#[test]
fn test_begin_edit_on_missing_row_warns() {
    let model = update(Model::new("x"), Message::BeginEdit(4));
    assert_eq!(model.edit_mode, EditMode::Creating);
    assert!(model.active_toast().is_some());
    let model = update(model, Message::Delete(4));
    assert!(model.pending_requests().is_empty());
}

#[test]
fn test_alerts_queue_and_dismiss_in_order() {
    let model = update(
        Model::new("x"),
        Message::Created(Err(RemoteCallFailure::new(Operation::Create, "one"))),
    );
    let model = update(
        model,
        Message::Deleted {
            id: RecordId::Number(1),
            result: Err(RemoteCallFailure::new(Operation::Delete, "two")),
        },
    );
    assert_eq!(model.active_alert(), Some("create failed: one"));
    let model = update(model, Message::DismissAlert);
    assert_eq!(model.active_alert(), Some("delete failed: two"));
    let model = update(model, Message::DismissAlert);
    assert_eq!(model.active_alert(), None);
}

#[test]
fn test_focus_cycle_includes_cancel_only_when_editing() {
    let api = seeded();
    let model = loaded(&api);
    assert!(!model.focus_order().contains(&Focus::CancelButton));

    let model = update(model, Message::BeginEdit(0));
    let model = update(model, Message::Focus(Focus::SubmitButton));
    let model = update(model, Message::FocusNext);
    assert_eq!(model.focus, Focus::CancelButton);

    let model = update(model, Message::Cancel);
    assert_eq!(model.focus, Focus::SubmitButton);
    let model = update(model, Message::FocusNext);
    assert_eq!(model.focus, Focus::Table);
    let model = update(model, Message::FocusNext);
    assert_eq!(model.focus, Focus::Field(Field::Name));
    let model = update(model, Message::FocusPrev);
    assert_eq!(model.focus, Focus::Table);
}

#[test]
fn test_text_input_only_reaches_text_fields() {
    let model = update(Model::new("x"), Message::Focus(Focus::Field(Field::Gender)));
    let model = update(model, Message::InputChar('z'));
    assert!(model.draft.is_blank());

    let model = type_text(model, Field::Address, "a");
    let model = update(model, Message::Newline);
    let model = update(model, Message::InputChar('b'));
    let model = update(model, Message::Backspace);
    assert_eq!(model.draft.address, "a\n");

    let model = type_text(model, Field::Name, "x");
    let model = update(model, Message::Newline);
    assert_eq!(model.draft.name, "x");
}

#[test]
fn test_table_selection_stays_in_bounds() {
    let api = seeded();
    let model = loaded(&api);
    let model = update(model, Message::SelectPrev);
    assert_eq!(model.selected_row, Some(0));
    let model = [Message::SelectNext, Message::SelectNext, Message::SelectNext]
        .into_iter()
        .fold(model, update);
    assert_eq!(model.selected_row, Some(2));

    let model = drive(update(model, Message::Delete(2)), &api);
    assert_eq!(model.selected_row, Some(1));
}

#[test]
fn test_keys_map_to_messages() {
    let api = seeded();
    let model = loaded(&api);
    assert_eq!(handle_key(key(KeyCode::Enter), &model), Some(Message::Submit));
    assert_eq!(handle_key(key(KeyCode::Char('a')), &model), Some(Message::InputChar('a')));
    assert_eq!(handle_key(key(KeyCode::Tab), &model), Some(Message::FocusNext));
    assert_eq!(handle_key(key(KeyCode::Esc), &model), None);
    assert_eq!(
        handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), &model),
        Some(Message::Submit)
    );

    let model = update(model, Message::Focus(Focus::Field(Field::Address)));
    assert_eq!(handle_key(key(KeyCode::Enter), &model), Some(Message::Newline));

    let model = update(model, Message::Focus(Focus::Table));
    assert_eq!(handle_key(key(KeyCode::Char('d')), &model), Some(Message::Delete(0)));
    assert_eq!(handle_key(key(KeyCode::Char('e')), &model), Some(Message::BeginEdit(0)));
    assert_eq!(handle_key(key(KeyCode::Char('r')), &model), Some(Message::Refresh));
    assert_eq!(handle_key(key(KeyCode::Char('q')), &model), Some(Message::Quit));

    let model = update(model, Message::BeginEdit(0));
    assert_eq!(handle_key(key(KeyCode::Esc), &model), Some(Message::Cancel));
}

#[test]
fn test_row_actions_ignored_while_list_is_loading() {
    let api = seeded();
    let model = update(loaded(&api), Message::Focus(Focus::Table));
    let model = update(model, Message::Refresh);
    assert!(model.loading);
    assert_eq!(model.selected_row, Some(0));

    assert_eq!(handle_key(key(KeyCode::Char('e')), &model), None);
    assert_eq!(handle_key(key(KeyCode::Enter), &model), None);
    assert_eq!(handle_key(key(KeyCode::Char('d')), &model), None);
    assert_eq!(handle_key(key(KeyCode::Delete), &model), None);
    assert_eq!(handle_key(key(KeyCode::Char('r')), &model), Some(Message::Refresh));

    let model = drive(model, &api);
    assert_eq!(handle_key(key(KeyCode::Char('d')), &model), Some(Message::Delete(0)));
}

#[test]
fn test_alert_blocks_other_keys() {
    let model = update(
        Model::new("x"),
        Message::Listed(Err(RemoteCallFailure::new(Operation::List, "refused"))),
    );
    assert_eq!(handle_key(key(KeyCode::Char('a')), &model), None);
    assert_eq!(handle_key(key(KeyCode::Tab), &model), None);
    assert_eq!(handle_key(key(KeyCode::Enter), &model), Some(Message::DismissAlert));
    assert_eq!(
        handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &model),
        Some(Message::Quit)
    );
}

fn form_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        Just(Message::FocusNext),
        Just(Message::FocusPrev),
        any::<char>().prop_map(Message::InputChar),
        Just(Message::Backspace),
        Just(Message::Newline),
        Just(Message::ToggleGender),
        Just(Message::ToggleMarried),
        Just(Message::SelectNext),
        Just(Message::SelectPrev),
        (0usize..5).prop_map(Message::BeginEdit),
        Just(Message::Cancel),
        Just(Message::Update),
    ]
}

fn model_with_rows() -> Model {
    update(
        Model::new("x"),
        Message::Listed(Ok(vec![person(3, "Ada"), person(5, "Grace")])),
    )
}

proptest! {
    #[test]
    fn prop_form_editing_never_contacts_server_without_target(
        msgs in prop::collection::vec(form_message(), 0..60)
    ) {
        let mut model = model_with_rows();
        for msg in msgs {
            let editing = model.edit_mode.is_editing();
            let is_update = msg == Message::Update;
            model = update(model, msg);
            if is_update && editing {
                prop_assert_eq!(model.take_requests().len(), 1);
                model.in_flight = 0;
            }
            prop_assert!(model.pending_requests().is_empty());
        }
    }

    #[test]
    fn prop_begin_edit_then_cancel_always_blanks_form(
        msgs in prop::collection::vec(form_message(), 0..30),
        row in 0usize..2,
    ) {
        let mut model = model_with_rows();
        for msg in msgs {
            model = update(model, msg);
        }
        model = update(model, Message::BeginEdit(row));
        prop_assert!(model.edit_mode.is_editing());
        model = update(model, Message::Cancel);
        prop_assert_eq!(&model.edit_mode, &EditMode::Creating);
        prop_assert!(model.draft.is_blank());
    }
}
