//! Table Renderer
//!
//! Turns a rectangular table into `thead`/`tbody` nodes. Column names get
//! underscores replaced by spaces; rows keep their input order. No sorting,
//! filtering or pagination.

use super::node::{Element, Node};
use crate::dataset::{CellValue, DataTable};

/// Render column names and rows as a table tree
pub fn render_table<S: AsRef<str>>(columns: &[S], rows: &[Vec<CellValue>]) -> Node {
    let header_row = Element::new("tr")
        .class("table-head__row")
        .children(
            columns
                .iter()
                .map(|name| Element::new("th").child(header_label(name.as_ref()))),
        );

    let body_rows = rows.iter().map(|row| {
        Element::new("tr")
            .class("table-body__row")
            .children(row.iter().map(|cell| Element::new("td").child(cell.to_string())))
    });

    Element::new("table")
        .child(Element::new("thead").class("table-head").child(header_row))
        .child(Element::new("tbody").class("table-body").children(body_rows))
        .into()
}

/// Render a [`DataTable`]
pub fn render_data_table(table: &DataTable) -> Node {
    render_table(table.columns.as_slice(), table.rows.as_slice())
}

fn header_label(column: &str) -> String {
    column.replace('_', " ")
}
