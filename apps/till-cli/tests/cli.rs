//! End-to-end runs of the `till` binary against scratch order and config files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const LIPSTICK_ORDER: &str = "\
| productName | quantity | unitPrice | category  |
| Lipstick    | 2        | 10        | cosmetics |
| Widget      | 1        | 100       |           |
";

const BOGO_AND_THRESHOLD: &str = r#"
[[promotions.quantity]]
target_category = "cosmetics"

[[promotions.threshold]]
threshold = 100
discount = 10
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

fn till(order: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_till"))
        .arg("--order")
        .arg(order)
        .args(args)
        .env_remove("TILL_OUTPUT_FORMAT")
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn quantity_of_prints_the_final_quantity() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let config = ws.file("till.toml", BOGO_AND_THRESHOLD);
    let config = config.to_str().unwrap();

    let output = till(&order, &["--config", config, "--quantity-of", "Lipstick"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "3\n");

    let output = till(&order, &["--config", config, "--quantity-of", "Widget"]);
    assert_eq!(stdout(&output), "1\n");
}

#[test]
fn quantity_of_an_absent_product_fails() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let config = ws.file("till.toml", BOGO_AND_THRESHOLD);
    let config = config.to_str().unwrap();

    let output = till(&order, &["--config", config, "--quantity-of", "Yo-yo"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Product not found: Yo-yo"));
}

#[test]
fn text_report_uses_the_given_config() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let config = ws.file("till.toml", BOGO_AND_THRESHOLD);

    let output = till(&order, &["--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "| originalAmount | discount | totalAmount |\n\
         | 120            | 10       | 110         |\n\
         \n\
         | productName | quantity |\n\
         | Lipstick    | 3        |\n\
         | Widget      | 1        |\n"
    );
}

#[test]
fn json_report() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let config = ws.file("till.toml", BOGO_AND_THRESHOLD);
    let config = config.to_str().unwrap();

    let output = till(&order, &["--config", config, "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["summary"]["originalAmount"], 120);
    assert_eq!(report["summary"]["discount"], 10);
    assert_eq!(report["summary"]["totalAmount"], 110);
    assert_eq!(report["received"][0]["productName"], "Lipstick");
    assert_eq!(report["received"][0]["quantity"], 3);
    assert!(report["createdAt"].is_string());
}

#[test]
fn format_flag_overrides_the_config_file() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let config = ws.file(
        "till.toml",
        &format!("[output]\nformat = \"json\"\n{}", BOGO_AND_THRESHOLD),
    );
    let config = config.to_str().unwrap();

    let from_file = stdout(&till(&order, &["--config", config]));
    assert!(from_file.trim_start().starts_with('{'));

    let overridden = till(&order, &["--config", config, "--format", "text"]);
    assert!(stdout(&overridden).starts_with("| originalAmount"));
}

#[test]
fn missing_config_file_fails() {
    let ws = Workspace::new();
    let order = ws.file("order.table", LIPSTICK_ORDER);
    let missing = ws.dir.path().join("absent.toml");

    let output = till(&order, &["--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("error: "));
}

#[test]
fn invalid_order_row_names_its_line() {
    let ws = Workspace::new();
    let order = ws.file(
        "order.table",
        "| productName | quantity | unitPrice |\n| Widget | 4611686018427387904 | 2 |\n",
    );
    let config = ws.file("till.toml", "");

    let output = till(&order, &["--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Order table line 2: line subtotal overflows"));
}
