//! # Summary Report
//!
//! Renders a priced order for the person (or script) that asked for it.
//!
//! Text output reuses the table format of the order fixtures, so a report can
//! be pasted straight back into a scenario:
//!
//! ```text
//! | originalAmount | discount | totalAmount |
//! | 20             | 5        | 15          |
//!
//! | productName | quantity |
//! | Lipstick    | 3        |
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use till_core::{Order, OrderSummary};

use crate::config::OutputFormat;
use crate::error::CliResult;

/// JSON shape of a report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReport<'a> {
    pub order_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub summary: OrderSummary,
    pub received: Vec<ReceivedLine<'a>>,
}

/// What the customer walks away with for one line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedLine<'a> {
    pub product_name: &'a str,
    pub quantity: i64,
    pub free_units: i64,
}

impl<'a> From<&'a Order> for OrderReport<'a> {
    fn from(order: &'a Order) -> Self {
        OrderReport {
            order_id: order.id(),
            created_at: order.created_at(),
            summary: order.summary(),
            received: order
                .lines()
                .iter()
                .map(|line| ReceivedLine {
                    product_name: line.product().name(),
                    quantity: line.effective_quantity(),
                    free_units: line.free_units(),
                })
                .collect(),
        }
    }
}

/// Renders `order` in the requested format.
pub fn render(order: &Order, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_text(order)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&OrderReport::from(order))?),
    }
}

fn render_text(order: &Order) -> String {
    let summary = order.summary();
    let mut out = format_table(
        &["originalAmount", "discount", "totalAmount"],
        &[vec![
            summary.original_amount.to_string(),
            summary.discount.to_string(),
            summary.total_amount.to_string(),
        ]],
    );

    if !order.is_empty() {
        let received: Vec<Vec<String>> = order
            .lines()
            .iter()
            .map(|line| {
                vec![
                    line.product().name().to_string(),
                    line.effective_quantity().to_string(),
                ]
            })
            .collect();
        out.push('\n');
        out.push_str(&format_table(&["productName", "quantity"], &received));
    }

    out
}

/// Lays out a pipe table with every column padded to its widest cell.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!(" {:<width$} ", cell, width = *width))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut out = format_row(headers.to_vec());
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    out
}
