//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

/// Form label, highlighted while its input has focus.
pub fn label_style(focused: bool) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    if focused { base.fg(Color::Yellow) } else { base }
}

/// Input value text.
pub fn value_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::White).bg(Color::Indexed(236))
    } else {
        Style::default()
    }
}

/// Submit/Cancel buttons; the focused one is drawn inverted.
pub fn button_style(focused: bool) -> Style {
    let base = Style::default().fg(Color::White).bg(Color::Blue);
    if focused {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base
    }
}

/// Block border, yellow while the block holds focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn table_header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_row_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn delete_action_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn edit_action_style() -> Style {
    Style::default().fg(Color::Blue)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}
