use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::app::{Focus, Model};
use crate::record::Record;

use super::{form, overlays, status, style};

const TITLE: &str = "Simple CRUD App";

/// Outer height of the form block for the current draft.
pub fn form_height(model: &Model) -> u16 {
    // borders + five single-line inputs + address + buttons
    2 + 5 + form::address_rows(model) + 1
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let [title_area, form_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(form_height(model)),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
        title_area,
    );
    form::render_form(model, frame, form_area);
    render_records(model, frame, table_area);

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, footer_area);
    } else {
        status::render_status_bar(model, frame, footer_area);
    }

    if let Some(message) = model.active_alert() {
        overlays::render_alert_overlay(message, model.alert_count(), frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_records(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" Records ({}) ", model.records.len()))
        .borders(Borders::ALL)
        .border_style(style::border_style(model.focus == Focus::Table));

    if model.loading {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new("Loading...").centered(), middle);
        return;
    }

    let header = Row::new(
        [
            "Name",
            "Email",
            "Gender",
            "Marital Status",
            "Address",
            "Actions",
        ]
        .map(Cell::from),
    )
    .style(style::table_header_style());

    let rows: Vec<Row> = model.records.iter().map(record_row).collect();
    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Fill(3),
        Constraint::Length(11),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(style::selected_row_style());

    let mut state = TableState::default();
    if model.focus == Focus::Table {
        state.select(model.selected_row);
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn record_row(record: &Record) -> Row<'static> {
    let marital = if record.is_married { "✓" } else { "X" };
    Row::new(vec![
        Cell::from(record.name.clone()),
        Cell::from(record.email.clone()),
        Cell::from(record.gender.to_string()),
        Cell::from(marital),
        Cell::from(record.address.replace('\n', " ")),
        Cell::from(Line::from(vec![
            Span::styled("Edit", style::edit_action_style()),
            Span::raw(" "),
            Span::styled("Delete", style::delete_action_style()),
        ])),
    ])
}
