use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::Model;

use super::style;

/// Blocking error notification. Further alerts wait behind this one.
pub fn render_alert_overlay(message: &str, queued: usize, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(16).clamp(20, 72);
    let popup_height = 9.min(area.height);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let mut lines = vec![
        Line::raw(message.to_string()),
        Line::raw(""),
    ];
    let hint = if queued > 1 {
        format!("Enter dismisses ({} more)", queued - 1)
    } else {
        "Enter dismisses".to_string()
    };
    lines.push(Line::styled(hint, style::dim_style()));

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Red).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Form", section_style));
    lines.push(Line::raw("  Tab / Shift-Tab     Next / previous input"));
    lines.push(Line::raw("  Enter               Submit (newline in Address)"));
    lines.push(Line::raw("  Ctrl-s              Submit from anywhere"));
    lines.push(Line::raw("  Left/Right, m / f   Choose gender"));
    lines.push(Line::raw("  Space               Toggle Is Married?"));
    lines.push(Line::raw("  Esc                 Cancel editing"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Records", section_style));
    lines.push(Line::raw("  j/k or Up/Down      Select row"));
    lines.push(Line::raw("  e / Enter           Edit selected record"));
    lines.push(Line::raw("  d / Delete          Delete selected record"));
    lines.push(Line::raw("  r                   Reload list"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  q / Ctrl-c          Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Endpoint", section_style));
    lines.push(Line::raw(format!("  {}", model.endpoint)));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Any key closes", style::dim_style()));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
