//! Host-facing interfaces.
//!
//! The overlay host owns the render loop and the drawing context. It calls
//! into the addon through [`Addon`] and hands it a [`Ui`] to draw with each
//! frame; the addon never sees the host's concrete types.

use crate::config;
use crate::format::price_cells;
use crate::rows::{Row, RowValue};

// ---------------------------------------------------------------------------
// Ui
// ---------------------------------------------------------------------------

/// One table row as drawn: a label followed by its value cells.
///
/// Price rows carry `[gold, silver, copper]`; unit rows a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

impl From<&Row> for TableRow {
    fn from(row: &Row) -> Self {
        let cells = match &row.value {
            RowValue::Price(price) => price_cells(price),
            RowValue::Unit(value) => vec![value.to_string()],
        };
        Self {
            label: row.label.clone(),
            cells,
        }
    }
}

/// Immediate-mode drawing surface provided by the host.
pub trait Ui {
    /// Content width of the current window, in pixels.
    fn window_width(&self) -> f32;

    /// Draw a button; returns `true` on the frame it is clicked.
    fn button(&mut self, label: &str) -> bool;

    fn text(&mut self, text: &str);

    /// Draw a table with a header column titled `header` and G/S/C columns.
    fn table(&mut self, id: &str, header: &str, rows: &[TableRow]);

    /// Place the next element on the same line as the previous one.
    fn same_line(&mut self);
}

// ---------------------------------------------------------------------------
// Addon
// ---------------------------------------------------------------------------

/// Lifecycle callbacks invoked by the host.
pub trait Addon {
    fn on_load(&mut self);

    fn on_unload(&mut self);

    /// Called once per frame.
    fn on_render(&mut self, ui: &mut dyn Ui);

    /// Called when the host draws the addon's options page.
    fn on_options_render(&mut self, ui: &mut dyn Ui);
}

/// How many tables fit side by side in a window of the given width.
pub fn columns_for_width(width: f32) -> usize {
    if width > config::VERY_LARGE_WINDOW_PX {
        3
    } else if width > config::LARGE_WINDOW_PX {
        2
    } else {
        1
    }
}
