use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::model::{Field, Focus};
use crate::app::{Message, Model};
use crate::record::Gender;

/// Translate a terminal event into a message, given the current model.
pub fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        _ => None,
    }
}

pub fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    // Alerts block everything else until dismissed.
    if model.active_alert().is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Message::DismissAlert),
            _ => None,
        };
    }

    if model.help_visible {
        return Some(Message::HideHelp);
    }

    if key.code == KeyCode::F(1) {
        return Some(Message::ToggleHelp);
    }
    if ctrl && key.code == KeyCode::Char('s') {
        return Some(Message::Submit);
    }
    match key.code {
        KeyCode::Tab => return Some(Message::FocusNext),
        KeyCode::BackTab => return Some(Message::FocusPrev),
        KeyCode::Esc if model.edit_mode.is_editing() => return Some(Message::Cancel),
        _ => {}
    }

    match model.focus {
        Focus::Field(field) => handle_field_key(key, field),
        Focus::SubmitButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Submit),
            _ => None,
        },
        Focus::CancelButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Cancel),
            _ => None,
        },
        Focus::Table => handle_table_key(key, model),
    }
}

fn handle_field_key(key: KeyEvent, field: Field) -> Option<Message> {
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match field {
        Field::Gender => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => Some(Message::ToggleGender),
            KeyCode::Char('m') => Some(Message::SetGender(Gender::Male)),
            KeyCode::Char('f') => Some(Message::SetGender(Gender::Female)),
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Down => Some(Message::FocusNext),
            KeyCode::Up => Some(Message::FocusPrev),
            _ => None,
        },
        Field::Married => match key.code {
            KeyCode::Char(' ') => Some(Message::ToggleMarried),
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Down => Some(Message::FocusNext),
            KeyCode::Up => Some(Message::FocusPrev),
            _ => None,
        },
        Field::Address => match key.code {
            KeyCode::Enter => Some(Message::Newline),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Char(c) if plain => Some(Message::InputChar(c)),
            _ => None,
        },
        Field::Name | Field::Email | Field::Password => match key.code {
            KeyCode::Enter => Some(Message::Submit),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Down => Some(Message::FocusNext),
            KeyCode::Up => Some(Message::FocusPrev),
            KeyCode::Char(c) if plain => Some(Message::InputChar(c)),
            _ => None,
        },
    }
}

fn handle_table_key(key: KeyEvent, model: &Model) -> Option<Message> {
    // Rows are hidden behind the placeholder while a list is loading.
    let visible_row = model.selected_row.filter(|_| !model.loading);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Message::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::SelectPrev),
        KeyCode::Char('e') | KeyCode::Enter => visible_row.map(Message::BeginEdit),
        KeyCode::Char('d') | KeyCode::Delete => visible_row.map(Message::Delete),
        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}
