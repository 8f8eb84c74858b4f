//! Tests for the DOM XML data format provider

use dataformat_traits::{DataFormat, DataFormatProvider, XML_DATAFORMAT_NAME};
use xml_dom_dataformat::{DomXmlDataFormat, DomXmlDataFormatProvider};

#[test]
fn test_provider_name_is_xml_constant() {
    let provider = DomXmlDataFormatProvider;
    assert_eq!(provider.data_format_name(), XML_DATAFORMAT_NAME);
    assert_eq!(provider.data_format_name(), "application/xml");
    // stable across calls
    assert_eq!(provider.data_format_name(), provider.data_format_name());
}

#[test]
fn test_create_instance_returns_new_instances() {
    let provider = DomXmlDataFormatProvider;
    let first = provider.create_instance();
    let second = provider.create_instance();

    let first_ptr = &*first as *const dyn DataFormat as *const ();
    let second_ptr = &*second as *const dyn DataFormat as *const ();
    assert_ne!(first_ptr, second_ptr);
}

#[test]
fn test_instance_reports_provider_name() {
    let provider = DomXmlDataFormatProvider;
    for _ in 0..3 {
        let format = provider.create_instance();
        assert_eq!(format.name(), provider.data_format_name());
    }
}

#[test]
fn test_instance_is_dom_xml_format_with_defaults() {
    let format = DomXmlDataFormatProvider.create_instance();
    let format = format
        .downcast_ref::<DomXmlDataFormat>()
        .expect("provider creates a DomXmlDataFormat");
    assert!(format.config().pretty_print);
    assert!(!format.config().allow_doctype);
}

#[test]
fn test_instances_are_independent() {
    let provider = DomXmlDataFormatProvider;
    let mut first = provider.create_instance();
    let second = provider.create_instance();

    first
        .downcast_mut::<DomXmlDataFormat>()
        .unwrap()
        .config_mut()
        .pretty_print = false;

    assert!(second
        .downcast_ref::<DomXmlDataFormat>()
        .unwrap()
        .config()
        .pretty_print);
}
