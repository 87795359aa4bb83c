use std::path::Path;

use avro_docs::cli::CommandLineInterface;
use avro_docs::{document_schema, DocsError, OutputFormat, SchemaParseError};
use clap::Parser;

const ORDER_SCHEMA: &str = r#"{
    "type": "record",
    "name": "Order",
    "fields": [
        {"name": "customer", "type": {
            "type": "record", "name": "Customer",
            "fields": [{"name": "email", "type": "string", "doc": "Contact address"}]
        }},
        {"name": "items", "type": {"type": "array", "items": {
            "type": "record", "name": "LineItem",
            "fields": [
                {"name": "product", "type": {
                    "type": "record", "name": "Product",
                    "fields": [{"name": "sku", "type": "string"}]
                }},
                {"name": "quantity", "type": "int"}
            ]
        }}}
    ]
}"#;

fn cli(args: &[&str]) -> CommandLineInterface {
    CommandLineInterface::try_parse_from(std::iter::once("avro-docs").chain(args.iter().copied())).unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn write_schema(dir: &Path, name: &str, src: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn order_schema_documents_three_records_in_discovery_order() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path(), "order.avsc", ORDER_SCHEMA);
    let prefix = dir.path().join("docs/order");

    let summary = cli(&["-q", "-s", arg(&schema), "-o", arg(&prefix)])
        .run()
        .unwrap()
        .unwrap();

    assert_eq!(summary.records, ["Customer", "LineItem", "Product"]);
    assert_eq!(summary.output, dir.path().join("docs/order.html"));

    let html = std::fs::read_to_string(&summary.output).unwrap();
    let positions: Vec<usize> = ["<h3>Customer</h3>", "<h3>LineItem</h3>", "<h3>Product</h3>"]
        .iter()
        .map(|heading| html.find(heading).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(html.matches("<table>").count(), 3);
    assert_eq!(html.matches("<th>Field Name</th>").count(), 3);
    assert!(html.contains("<td>Contact address</td>"));
    assert!(!html.contains("<h3>Order</h3>"));
    assert_eq!(html.matches("<td>None provided.</td>").count(), 3);
}

#[test]
fn markdown_output_uses_md_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path(), "order.avsc", ORDER_SCHEMA);
    let prefix = dir.path().join("order");

    let summary = cli(&[
        "--quiet", "--format", "markdown",
        "--schema", arg(&schema), "--output", arg(&prefix),
    ])
    .run()
    .unwrap()
    .unwrap();

    assert_eq!(summary.output, dir.path().join("order.md"));
    let md = std::fs::read_to_string(&summary.output).unwrap();
    assert!(md.starts_with("### Customer\n"));
    assert!(md.contains("| product | Product | None provided. |"));
}

#[test]
fn cyclic_schema_terminates() {
    let src = r#"{
        "type": "record", "name": "Employee", "namespace": "org",
        "fields": [
            {"name": "manager", "type": ["null", "Employee"]},
            {"name": "team", "type": {"type": "record", "name": "Team", "fields": [
                {"name": "lead", "type": "Employee"},
                {"name": "members", "type": {"type": "map", "values": "Employee"}}
            ]}}
        ]
    }"#;
    let html = document_schema(src, OutputFormat::Html).unwrap();
    assert_eq!(html.matches("<h3>org.Employee</h3>").count(), 1);
    assert_eq!(html.matches("<h3>org.Team</h3>").count(), 1);
    assert!(html.find("<h3>org.Employee</h3>").unwrap() < html.find("<h3>org.Team</h3>").unwrap());
    assert!(html.contains("<td>union&lt;null, org.Employee&gt;</td>"));
}

#[test]
fn malformed_schema_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write_schema(dir.path(), "broken.avsc", r#"{"type": "record", "name": "A", "fields": [{"name": "x", "type": "Nope"}]}"#);
    let prefix = dir.path().join("broken");

    let err = cli(&["-q", "-s", arg(&schema), "-o", arg(&prefix)])
        .run()
        .unwrap_err();
    assert!(matches!(err, DocsError::Parse { source: SchemaParseError::UnknownType(_), .. }));
    assert!(!dir.path().join("broken.html").exists());
}

#[test]
fn non_record_root_is_reported() {
    let err = document_schema(r#"{"type": "array", "items": "string"}"#, OutputFormat::Html).unwrap_err();
    assert_eq!(err.to_string(), "root schema must be a record, found `array<string>`");
}
