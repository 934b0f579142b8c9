use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{EditMode, Field, Focus, Model};
use crate::record::Gender;

use super::{ADDRESS_MAX_ROWS, ADDRESS_MIN_ROWS, LABEL_WIDTH, style};

const PASSWORD_MASK: char = '•';

/// Rows the address textarea needs for the current draft.
pub fn address_rows(model: &Model) -> u16 {
    let lines = u16::try_from(model.draft.address.split('\n').count()).unwrap_or(u16::MAX);
    lines.clamp(ADDRESS_MIN_ROWS, ADDRESS_MAX_ROWS)
}

/// The longest suffix of `text` that fits in `width` columns.
pub fn tail_fit(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

pub fn render_form(model: &Model, frame: &mut Frame, area: Rect) {
    let title = match &model.edit_mode {
        EditMode::Creating => " New record ".to_string(),
        EditMode::Editing(id) => format!(" Editing record {id} "),
    };
    let focused = model.focus != Focus::Table;
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style::border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(address_rows(model)),
        Constraint::Length(1),
    ])
    .split(inner);

    let value_width = usize::from(inner.width.saturating_sub(LABEL_WIDTH));

    for (field, row) in Field::ALL.iter().copied().zip(rows.iter()) {
        let has_focus = model.focus == Focus::Field(field);
        let lines = field_lines(model, field, has_focus, value_width);
        frame.render_widget(Paragraph::new(lines), *row);

        if has_focus && field.is_text() {
            place_cursor(model, frame, field, *row, value_width);
        }
    }

    render_buttons(model, frame, rows[6]);
}

fn label(field: Field, focused: bool) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", field.label(), width = usize::from(LABEL_WIDTH)),
        style::label_style(focused),
    )
}

fn field_lines(model: &Model, field: Field, focused: bool, width: usize) -> Vec<Line<'static>> {
    let draft = &model.draft;
    let value = style::value_style(focused);
    match field {
        Field::Name => vec![text_line(field, focused, &draft.name, width)],
        Field::Email => vec![text_line(field, focused, &draft.email, width)],
        Field::Password => {
            let masked: String = draft.password.chars().map(|_| PASSWORD_MASK).collect();
            vec![text_line(field, focused, &masked, width)]
        }
        Field::Gender => {
            let radio = |option: Gender, text: &str| {
                let mark = if draft.gender == option { "(•)" } else { "( )" };
                format!("{mark} {text}")
            };
            vec![Line::from(vec![
                label(field, focused),
                Span::styled(radio(Gender::Male, "Male"), value),
                Span::raw("  "),
                Span::styled(radio(Gender::Female, "Female"), value),
            ])]
        }
        Field::Married => {
            let mark = if draft.is_married { "[x]" } else { "[ ]" };
            vec![Line::from(vec![
                label(field, focused),
                Span::styled(mark.to_string(), value),
            ])]
        }
        Field::Address => {
            let rows = usize::from(address_rows(model));
            let lines: Vec<&str> = draft.address.split('\n').collect();
            let skip = lines.len().saturating_sub(rows);
            lines
                .iter()
                .skip(skip)
                .enumerate()
                .map(|(idx, line)| {
                    let head = if idx == 0 {
                        label(field, focused)
                    } else {
                        Span::raw(" ".repeat(usize::from(LABEL_WIDTH)))
                    };
                    Line::from(vec![
                        head,
                        Span::styled(tail_fit(line, width.saturating_sub(1)).to_string(), value),
                    ])
                })
                .collect()
        }
    }
}

fn text_line(field: Field, focused: bool, text: &str, width: usize) -> Line<'static> {
    // Leave one column for the cursor.
    let shown = tail_fit(text, width.saturating_sub(1));
    Line::from(vec![
        label(field, focused),
        Span::styled(shown.to_string(), style::value_style(focused)),
    ])
}

fn place_cursor(model: &Model, frame: &mut Frame, field: Field, row: Rect, width: usize) {
    let (text, line_offset) = match field {
        Field::Name => (model.draft.name.clone(), 0),
        Field::Email => (model.draft.email.clone(), 0),
        Field::Password => (
            model.draft.password.chars().map(|_| PASSWORD_MASK).collect(),
            0,
        ),
        Field::Address => {
            let lines: Vec<&str> = model.draft.address.split('\n').collect();
            let shown = lines.len().min(usize::from(address_rows(model)));
            let last = lines.last().copied().unwrap_or_default().to_string();
            (last, u16::try_from(shown.saturating_sub(1)).unwrap_or(0))
        }
        Field::Gender | Field::Married => return,
    };
    let shown = tail_fit(&text, width.saturating_sub(1));
    let col = u16::try_from(shown.width()).unwrap_or(u16::MAX);
    frame.set_cursor_position(Position::new(
        row.x.saturating_add(LABEL_WIDTH).saturating_add(col),
        row.y.saturating_add(line_offset),
    ));
}

fn render_buttons(model: &Model, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::raw(" ".repeat(usize::from(LABEL_WIDTH))),
        Span::styled(
            format!("[ {} ]", model.submit_label()),
            style::button_style(model.focus == Focus::SubmitButton),
        ),
    ];
    if model.edit_mode.is_editing() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[ Cancel ]",
            style::button_style(model.focus == Focus::CancelButton),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
