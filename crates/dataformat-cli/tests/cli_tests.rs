use std::io::Write;

use clap::Parser;
use dataformat_cli::{run, Cli, Command, ResultKind};
use tempfile::NamedTempFile;

const ORDER_XML: &str = r#"<order xmlns:p="urn:payment" id="o-1"><item sku="a">2</item><item sku="b">3</item><p:card>visa</p:card></order>"#;

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args)?;
    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_parse_xpath_arguments() {
    let cli = Cli::try_parse_from([
        "dataformat", "-v", "xpath", "doc.xml", "//p:card", "--ns", "p=urn:payment", "--as",
        "elements",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Command::Xpath {
            expression,
            namespaces,
            kind,
            ..
        } => {
            assert_eq!(expression, "//p:card");
            assert_eq!(namespaces, vec![("p".to_string(), "urn:payment".to_string())]);
            assert_eq!(kind, ResultKind::Elements);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_reject_malformed_binding() {
    assert!(Cli::try_parse_from(["dataformat", "xpath", "doc.xml", "/", "--ns", "p"]).is_err());
}

#[test]
fn test_formats() {
    let output = run_args(&["dataformat", "formats"]).unwrap();
    assert_eq!(output, "application/xml\n");
}

#[test]
fn test_detect() {
    let file = file_with(ORDER_XML);
    let path = file.path().to_str().unwrap();

    let output = run_args(&["dataformat", "detect", path]).unwrap();
    assert_eq!(output.trim(), "application/xml");

    let plain = file_with("just words");
    assert!(run_args(&["dataformat", "detect", plain.path().to_str().unwrap()]).is_err());
}

#[test]
fn test_format_compact_and_pretty() {
    let file = file_with("<a><b/></a>");
    let path = file.path().to_str().unwrap();

    let pretty = run_args(&["dataformat", "format", path]).unwrap();
    assert!(pretty.trim_end().contains('\n'));
    assert!(pretty.contains("<b/>"));

    let compact = run_args(&["dataformat", "format", path, "--compact"]).unwrap();
    assert_eq!(compact, "<a><b/></a>\n");
}

#[test]
fn test_format_with_config() {
    let file = file_with("<a><b/></a>");
    let config = file_with("[xml]\npretty_print = false\n");

    let output = run_args(&[
        "dataformat",
        "--config",
        config.path().to_str().unwrap(),
        "format",
        file.path().to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(output, "<a><b/></a>\n");
}

#[test]
fn test_xpath_results() {
    let file = file_with(ORDER_XML);
    let path = file.path().to_str().unwrap();

    let sum = run_args(&["dataformat", "xpath", path, "sum(//item)", "--as", "number"]).unwrap();
    assert_eq!(sum.trim(), "5");

    let skus = run_args(&["dataformat", "xpath", path, "//item/@sku", "--as", "attributes"])
        .unwrap();
    assert_eq!(skus, "sku=a\nsku=b\n");

    let card = run_args(&[
        "dataformat", "xpath", path, "//pay:card", "--ns", "pay=urn:payment",
    ])
    .unwrap();
    assert_eq!(card.trim(), "visa");
}

#[test]
fn test_xpath_error_has_context() {
    let file = file_with(ORDER_XML);
    let err = run_args(&[
        "dataformat",
        "xpath",
        file.path().to_str().unwrap(),
        "//missing",
        "--as",
        "element",
    ])
    .unwrap_err();
    assert!(format!("{:#}", err).contains("failed to evaluate '//missing'"));
}

#[test]
fn test_missing_file() {
    let err = run_args(&["dataformat", "detect", "/nonexistent/input.xml"]).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_suite() {
    let output = run_args(&["dataformat", "suite", "--filter", "can_query_count"]).unwrap();
    assert!(output.contains("xml-dom-xpath on native"));
    assert!(output.contains("xml-dom-xpath on registry"));
    assert!(output.contains("engine comparison"));

    let json = run_args(&[
        "dataformat",
        "suite",
        "--engine",
        "native",
        "--filter",
        "can_query_count",
        "--json",
    ])
    .unwrap();
    let reports: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["summary"]["passed"], 1);
}

#[test]
fn test_suite_unknown_engine() {
    assert!(run_args(&["dataformat", "suite", "--engine", "rhino"]).is_err());
}
