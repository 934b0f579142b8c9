use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{EditMode, Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = match &model.edit_mode {
        EditMode::Creating => "create".to_string(),
        EditMode::Editing(id) => format!("editing {id}"),
    };
    let pending = if model.in_flight > 0 {
        format!("  {} pending", model.in_flight)
    } else {
        String::new()
    };

    let status = format!(
        " {}  [{}]  {} records{}  Tab:focus  ?:help",
        model.endpoint,
        mode,
        model.records.len(),
        pending
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
