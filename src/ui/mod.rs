//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`render`]: the form, the record table and the footer bars
//! - [`style`]: Theming and colors
//! - overlays for blocking alerts and help

pub mod style;

mod form;
mod overlays;
mod render;
mod status;

pub use render::{form_height, render};

/// Rows the address textarea shows before it stops growing.
pub const ADDRESS_MAX_ROWS: u16 = 4;
/// Rows the address textarea always reserves.
pub const ADDRESS_MIN_ROWS: u16 = 2;
/// Width of the label column in the form.
pub const LABEL_WIDTH: u16 = 13;
