//! Tests for the built-in data format registry

use std::io::Write;

use dataformat_traits::{DataFormat, Error};
use dataformats::{DataFormats, DataFormatsConfig};

#[test]
fn test_defaults_register_xml() {
    let formats = DataFormats::with_defaults().unwrap();
    assert_eq!(formats.names(), vec![DataFormats::XML_DATAFORMAT_NAME]);
    assert_eq!(
        formats.get("application/xml").unwrap().name(),
        "application/xml"
    );
}

#[test]
fn test_xml_is_shared_within_a_registry() {
    let formats = DataFormats::with_defaults().unwrap();
    let first = formats.xml().unwrap();
    let second = formats.xml().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_detect_xml_input() {
    let formats = DataFormats::with_defaults().unwrap();
    let format = formats.detect("  <root/>").unwrap();
    assert_eq!(format.name(), DataFormats::XML_DATAFORMAT_NAME);
    assert!(matches!(
        formats.detect("[1, 2, 3]"),
        Err(Error::UnrecognizableInput)
    ));
}

#[test]
fn test_config_from_toml() {
    let config = DataFormatsConfig::from_toml_str(
        r#"
[xml]
pretty_print = false
read_limit = 16
"#,
    )
    .unwrap();

    let xml = config.xml.as_ref().unwrap();
    assert!(!xml.pretty_print);
    assert!(!xml.allow_doctype);
    assert_eq!(xml.read_limit, 16);

    let formats = DataFormats::load(&config).unwrap();
    let format = formats.xml().unwrap();
    assert!(!format.config().pretty_print);
    assert_eq!(format.config().read_limit, 16);
}

#[test]
fn test_empty_config_keeps_defaults() {
    let config = DataFormatsConfig::from_toml_str("").unwrap();
    assert_eq!(config, DataFormatsConfig::default());

    let formats = DataFormats::load(&config).unwrap();
    assert!(formats.xml().unwrap().config().pretty_print);
}

#[test]
fn test_unknown_config_section_is_rejected() {
    let result = DataFormatsConfig::from_toml_str("[yaml]\nindent = 2\n");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[xml]\nallow_doctype = true").unwrap();

    let config = DataFormatsConfig::from_file(file.path()).unwrap();
    assert!(config.xml.unwrap().allow_doctype);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DataFormatsConfig::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_global_is_loaded_once() {
    let first = DataFormats::global().unwrap();
    let second = DataFormats::global().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(first.registry().contains(DataFormats::XML_DATAFORMAT_NAME));
}
