//! Basic tests for the DOM XML data format

use dataformat_traits::{
    DataFormat, DataFormatReader, DataFormatWriter, Error, MutableXmlTree, NodeType, XmlTree,
    XML_DATAFORMAT_NAME,
};
use xml_dom_dataformat::{DomXmlConfig, DomXmlDataFormat, XmlDocument};

const ORDER_XML: &str = r#"<order xmlns="urn:shop" id="o-1" status="open"><item sku="a">Apple</item><item sku="b">Pear</item></order>"#;

fn format() -> DomXmlDataFormat {
    DomXmlDataFormat::new(XML_DATAFORMAT_NAME)
}

#[test]
fn test_parse_and_navigate() {
    let document = format().read_str(ORDER_XML).unwrap();
    let root = document.root().unwrap();

    assert_eq!(root.local_name(), "order");
    assert_eq!(root.namespace().as_deref(), Some("urn:shop"));
    assert!(root.has_namespace("urn:shop"));
    assert_eq!(root.attr("id").as_deref(), Some("o-1"));
    assert_eq!(root.attr("missing"), None);

    let items = root.child_elements();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text(), "Apple");
    assert_eq!(items[1].attr("sku").as_deref(), Some("b"));
    assert_eq!(items[1].parent().unwrap().local_name(), "order");
    assert_eq!(root.children_named("item").len(), 2);
    assert!(root.parent().is_none());
}

#[test]
fn test_attribute_views() {
    let document = format().read_str(ORDER_XML).unwrap();
    let root = document.root().unwrap();

    let status = root.attribute("status").unwrap();
    assert_eq!(status.local_name(), "status");
    assert_eq!(status.namespace(), None);
    assert_eq!(status.value().unwrap(), "open");
    assert_eq!(status.owner().local_name(), "order");

    assert_eq!(root.attributes().len(), 2);
    assert!(matches!(root.attribute("nope"), Err(Error::NodeAccess(_))));
}

#[test]
fn test_text_content_spans_descendants() {
    let document = XmlDocument::parse("<p>Hello <b>bold</b> world</p>").unwrap();
    assert_eq!(document.root().unwrap().text(), "Hello bold world");
}

#[test]
fn test_node_types() {
    let document = XmlDocument::parse("<root><!--note--><a/>text</root>").unwrap();
    let root = document.document_element().unwrap();
    let types: Vec<NodeType> = document
        .children(root)
        .into_iter()
        .map(|child| document.node_type(child))
        .collect();

    assert_eq!(document.node_type(document.document_node()), NodeType::Document);
    assert_eq!(
        types,
        vec![NodeType::Comment, NodeType::Element, NodeType::Text]
    );
    assert!(document.element(document.children(root)[0]).is_err());
}

#[test]
fn test_malformed_input_is_parse_error() {
    let result = format().read_str("<root><unclosed></root>");
    assert!(matches!(result, Err(Error::XmlParse(_))));
}

#[test]
fn test_doctype_rejected_by_default() {
    let xml = r#"<?xml version="1.0"?><!DOCTYPE root [<!ENTITY x "y">]><root>&x;</root>"#;
    let result = format().read_str(xml);
    assert!(matches!(result, Err(Error::DoctypeNotAllowed(_))));
}

#[test]
fn test_doctype_after_comment_rejected_by_default() {
    let xml = "<!-- header -->\n<?style x?>\n<!DOCTYPE root>\n<root/>";
    assert!(matches!(
        format().read_str(xml),
        Err(Error::DoctypeNotAllowed(_))
    ));
}

#[test]
fn test_doctype_text_in_content_is_accepted() {
    let format = format();
    for xml in [
        "<root><![CDATA[<!DOCTYPE x>]]></root>",
        "<root><!-- <!DOCTYPE x> --></root>",
        r#"<root note="&lt;!DOCTYPE x&gt;"/>"#,
        "<root>&lt;!DOCTYPE x&gt;</root>",
    ] {
        let document = format.read_str(xml).unwrap();
        assert_eq!(document.root().unwrap().local_name(), "root");
    }
}

#[test]
fn test_allowed_doctype_is_dropped() {
    let format = DomXmlDataFormat::with_config(
        XML_DATAFORMAT_NAME,
        DomXmlConfig {
            allow_doctype: true,
            ..DomXmlConfig::default()
        },
    );

    let document = format.read_str("<!DOCTYPE root><root/>").unwrap();
    assert_eq!(document.root().unwrap().local_name(), "root");

    let xml = r#"<?xml version="1.0"?>
<!-- prolog -->
<!DOCTYPE root [
  <!ELEMENT root (#PCDATA)>
  <!ATTLIST root kind CDATA "a>b">
]>
<root kind="plain">text</root>"#;
    let document = format.read_str(xml).unwrap();
    let root = document.root().unwrap();
    assert_eq!(root.text(), "text");
    assert_eq!(root.attr("kind").as_deref(), Some("plain"));
    assert!(!document.to_xml().unwrap().contains("DOCTYPE"));
}

#[test]
fn test_can_read_sniffs_leading_angle_bracket() {
    let format = format();
    assert!(format.can_read("<root/>"));
    assert!(format.can_read("  \n\t<root/>"));
    assert!(!format.can_read("{\"json\": true}"));
    assert!(!format.can_read(""));
}

#[test]
fn test_can_read_respects_read_limit() {
    let format = format();
    let padded = format!("{}<root/>", " ".repeat(300));
    assert!(!format.can_read(&padded));
    assert!(format.reader().can_read(&padded, 400));
}

#[test]
fn test_writer_compact_and_pretty() {
    let document = XmlDocument::parse("<root><a>1</a><b/></root>").unwrap();

    let compact = DomXmlDataFormat::with_config(
        XML_DATAFORMAT_NAME,
        DomXmlConfig {
            pretty_print: false,
            ..DomXmlConfig::default()
        },
    );
    let compact_xml = compact.write_to_string(&document).unwrap();
    assert_eq!(compact_xml, "<root><a>1</a><b/></root>");

    let pretty_xml = format().write_to_string(&document).unwrap();
    assert!(pretty_xml.contains('\n'));
    assert!(pretty_xml.contains("<a>1</a>"));
}

#[test]
fn test_write_to_writer() {
    let document = XmlDocument::parse("<root/>").unwrap();
    let format = format();
    let mut buffer = Vec::new();
    format
        .writer()
        .write_to_writer(&mut buffer, &document)
        .unwrap();
    assert!(String::from_utf8(buffer).unwrap().contains("<root/>"));
}

#[test]
fn test_mutation() {
    let mut document = format().read_str(ORDER_XML).unwrap();
    let root = document.document_element().unwrap();

    let note = document.append_element(root, "note").unwrap();
    document.set_text(note, "deliver fast").unwrap();
    document.set_attribute(note, "lang", "en").unwrap();
    document.set_attribute(root, "status", "closed").unwrap();
    assert!(document.remove_attribute(root, "id").unwrap());
    assert!(!document.remove_attribute(root, "id").unwrap());

    let root_view = document.root().unwrap();
    assert_eq!(root_view.attr("status").as_deref(), Some("closed"));
    assert_eq!(root_view.attr("id"), None);

    let note_view = document.element(note).unwrap();
    assert_eq!(note_view.local_name(), "note");
    assert_eq!(note_view.namespace().as_deref(), Some("urn:shop"));
    assert_eq!(note_view.text(), "deliver fast");
    assert_eq!(note_view.attr("lang").as_deref(), Some("en"));

    let first_item = document.child_elements(root)[0];
    document.remove(first_item).unwrap();
    assert_eq!(document.root().unwrap().children_named("item").len(), 1);
}

#[test]
fn test_root_cannot_be_removed() {
    let mut document = XmlDocument::parse("<root/>").unwrap();
    let root = document.document_element().unwrap();
    assert!(document.remove(root).is_err());
    let doc_node = document.document_node();
    assert!(document.remove(doc_node).is_err());
}

#[test]
fn test_mutation_requires_element() {
    let mut document = XmlDocument::parse("<root>text</root>").unwrap();
    let root = document.document_element().unwrap();
    let text = document.children(root)[0];
    assert!(document.set_attribute(text, "a", "b").is_err());
    assert!(document.append_element(text, "x").is_err());
}
