//! # Order Tables
//!
//! Builds orders from pipe-delimited tables, the format acceptance scenarios
//! are written in:
//!
//! ```text
//! | productName | quantity | unitPrice | category  |
//! | Lipstick    | 2        | 10        | cosmetics |
//! | Widget      | 1        | 100       |           |
//! ```
//!
//! ## Rules
//! - The first non-blank, non-comment line is the header row
//! - `productName`, `quantity` and `unitPrice` columns are required
//! - `category` is optional; a blank cell means "no category"
//! - Lines starting with `#` are comments
//! - Every row must have as many cells as the header
//! - A row is rejected if its subtotal, or the order subtotal so far, overflows

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use till_core::validation::{validate_product_name, validate_quantity, validate_unit_price};
use till_core::{Money, Order, Product};

use crate::error::{CliError, CliResult};

pub const PRODUCT_NAME: &str = "productName";
pub const QUANTITY: &str = "quantity";
pub const UNIT_PRICE: &str = "unitPrice";
pub const CATEGORY: &str = "category";

// =============================================================================
// Data Table
// =============================================================================

/// A parsed table: one header row and any number of data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    header_line: usize,
    headers: Vec<String>,
    rows: Vec<DataRow>,
}

/// One data row, remembering where it came from for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    line: usize,
    cells: Vec<String>,
}

impl DataRow {
    /// 1-based line number in the source text.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    fn table_error(&self, reason: impl ToString) -> CliError {
        CliError::Table {
            line: self.line,
            reason: reason.to_string(),
        }
    }
}

impl DataTable {
    /// Parses a table from text.
    pub fn parse(text: &str) -> CliResult<Self> {
        let mut header: Option<(usize, Vec<String>)> = None;
        let mut rows = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let cells = split_row(trimmed).ok_or_else(|| CliError::Table {
                line,
                reason: "expected a row delimited by '|'".to_string(),
            })?;

            match header.as_ref().map(|(_, headers)| headers.len()) {
                None => header = Some((line, cells)),
                Some(expected) if cells.len() != expected => {
                    return Err(CliError::Table {
                        line,
                        reason: format!("expected {} cells, found {}", expected, cells.len()),
                    });
                }
                Some(_) => rows.push(DataRow { line, cells }),
            }
        }

        let (header_line, headers) = header.ok_or_else(|| CliError::Table {
            line: 1,
            reason: "missing header row".to_string(),
        })?;

        Ok(DataTable {
            header_line,
            headers,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Position of the column named `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn require_column(&self, name: &str) -> CliResult<usize> {
        self.column(name).ok_or_else(|| CliError::Table {
            line: self.header_line,
            reason: format!("missing column '{}'", name),
        })
    }

    /// Rows as header → cell maps, in table order.
    pub fn to_maps(&self) -> Vec<HashMap<&str, &str>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .map(String::as_str)
                    .zip(row.cells.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }
}

/// Splits `| a | b |` into `["a", "b"]`.
fn split_row(line: &str) -> Option<Vec<String>> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').map(|cell| cell.trim().to_string()).collect())
}

// =============================================================================
// Order Construction
// =============================================================================

/// Builds an order from a table with the columns described in the module docs.
///
/// ## Example
/// ```rust
/// use till_cli::table::parse_order;
///
/// let order = parse_order(
///     "| productName | quantity | unitPrice | category  |\n\
///      | Lipstick    | 2        | 10        | cosmetics |",
/// )
/// .unwrap();
///
/// assert_eq!(order.final_quantity("Lipstick"), Some(2));
/// assert_eq!(order.subtotal().units(), 20);
/// ```
pub fn parse_order(text: &str) -> CliResult<Order> {
    let table = DataTable::parse(text)?;
    let name_col = table.require_column(PRODUCT_NAME)?;
    let quantity_col = table.require_column(QUANTITY)?;
    let price_col = table.require_column(UNIT_PRICE)?;
    let category_col = table.column(CATEGORY);

    let mut order = Order::new();
    let mut subtotal = Money::zero();
    for row in table.rows() {
        let cells = row.cells();

        let name = cells[name_col].as_str();
        validate_product_name(name).map_err(|e| row.table_error(e))?;

        let quantity = parse_integer(row, QUANTITY, &cells[quantity_col])?;
        validate_quantity(quantity).map_err(|e| row.table_error(e))?;

        let unit_price = Money::from_units(parse_integer(row, UNIT_PRICE, &cells[price_col])?);
        validate_unit_price(unit_price).map_err(|e| row.table_error(e))?;

        // The engine prices with unchecked arithmetic.
        let line_total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| row.table_error("line subtotal overflows"))?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| row.table_error("order subtotal overflows"))?;

        let product = match category_col.map(|col| cells[col].as_str()) {
            Some(category) if !category.is_empty() => {
                Product::with_category(name, unit_price, category)
            }
            _ => Product::new(name, unit_price),
        };

        debug!(line = row.line(), product = %name, quantity, "Parsed order line");
        order.add_item(product, quantity);
    }

    Ok(order)
}

/// Reads and parses an order table from disk.
pub fn read_order(path: &Path) -> CliResult<Order> {
    let contents = std::fs::read_to_string(path)?;
    let order = parse_order(&contents)?;
    info!(
        ?path,
        order_id = %order.id(),
        created_at = %order.created_at(),
        lines = order.line_count(),
        "Loaded order"
    );
    Ok(order)
}

fn parse_integer(row: &DataRow, field: &str, cell: &str) -> CliResult<i64> {
    cell.parse::<i64>().map_err(|e| {
        row.table_error(format!("{} has invalid format: {} ('{}')", field, e, cell))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "| productName | quantity | unitPrice | category |";

    #[test]
    fn test_split_row() {
        assert_eq!(
            split_row("| a | b |"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(split_row("| a |  |"), Some(vec!["a".to_string(), String::new()]));
        assert_eq!(split_row("a | b"), None);
    }

    #[test]
    fn test_parse_table_skips_blank_and_comment_lines() {
        let table = DataTable::parse("\n# fixture\n| x | y |\n\n| 1 | 2 |\n").unwrap();
        assert_eq!(table.headers(), ["x", "y"]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].line(), 5);
        assert_eq!(table.to_maps()[0]["y"], "2");
    }

    #[test]
    fn test_parse_table_rejects_ragged_rows() {
        let err = DataTable::parse("| x | y |\n| 1 |").unwrap_err();
        assert_eq!(err.to_string(), "Order table line 2: expected 2 cells, found 1");
    }

    #[test]
    fn test_parse_table_requires_header() {
        assert!(matches!(
            DataTable::parse("\n# nothing here\n"),
            Err(CliError::Table { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_order_with_and_without_category() {
        let text = format!(
            "{}\n| Lipstick | 2 | 10 | cosmetics |\n| Widget | 1 | 100 | |",
            HEADER
        );
        let order = parse_order(&text).unwrap();

        assert_eq!(order.line_count(), 2);
        let lipstick = order.line_by_product_name("Lipstick").unwrap();
        assert_eq!(lipstick.product().category(), Some("cosmetics"));
        assert_eq!(lipstick.requested_quantity(), 2);

        let widget = order.line_by_product_name("Widget").unwrap();
        assert_eq!(widget.product().category(), None);
        assert_eq!(widget.product().unit_price().units(), 100);
    }

    #[test]
    fn test_category_column_is_optional() {
        let order = parse_order("| unitPrice | productName | quantity |\n| 60 | Widget | 2 |")
            .unwrap();
        assert_eq!(order.subtotal().units(), 120);
        assert_eq!(order.lines()[0].product().category(), None);
    }

    #[test]
    fn test_header_only_is_an_empty_order() {
        let order = parse_order(HEADER).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse_order("| productName | quantity |\n| Widget | 1 |")
            .unwrap_err();
        assert_eq!(err.to_string(), "Order table line 1: missing column 'unitPrice'");
    }

    #[test]
    fn test_invalid_rows_name_their_line() {
        let bad_quantity = format!("{}\n| Widget | 0 | 10 | |", HEADER);
        assert_eq!(
            parse_order(&bad_quantity).unwrap_err().to_string(),
            "Order table line 2: quantity must be positive"
        );

        let bad_price = format!("{}\n\n| Widget | 1 | -5 | |", HEADER);
        assert_eq!(
            parse_order(&bad_price).unwrap_err().to_string(),
            "Order table line 3: unitPrice must not be negative"
        );

        let blank_name = format!("{}\n|  | 1 | 5 | |", HEADER);
        assert!(matches!(
            parse_order(&blank_name),
            Err(CliError::Table { line: 2, .. })
        ));

        let not_a_number = format!("{}\n| Widget | two | 5 | |", HEADER);
        let message = parse_order(&not_a_number).unwrap_err().to_string();
        assert!(message.starts_with("Order table line 2: quantity has invalid format"));
    }

    #[test]
    fn test_line_subtotal_overflow_is_rejected() {
        let text = format!("{}\n| Widget | 4611686018427387904 | 2 | |", HEADER);
        assert_eq!(
            parse_order(&text).unwrap_err().to_string(),
            "Order table line 2: line subtotal overflows"
        );
    }

    #[test]
    fn test_order_subtotal_overflow_is_rejected() {
        let text = format!(
            "{}\n| Widget | 1 | {} | |\n| Gadget | 1 | 1 | |",
            HEADER,
            i64::MAX
        );
        assert!(matches!(
            parse_order(&text),
            Err(CliError::Table { line: 3, .. })
        ));
    }

    #[test]
    fn test_largest_subtotal_still_parses() {
        let text = format!("{}\n| Widget | 1 | {} | |", HEADER, i64::MAX);
        let order = parse_order(&text).unwrap();
        assert_eq!(order.subtotal().units(), i64::MAX);
    }

    #[test]
    fn test_duplicate_products_stay_separate_lines() {
        let text = format!("{}\n| Widget | 1 | 10 | |\n| Widget | 4 | 10 | |", HEADER);
        let order = parse_order(&text).unwrap();
        assert_eq!(order.line_count(), 2);
        assert_eq!(order.final_quantity("Widget"), Some(1));
    }
}
