//! XPath query tests for the DOM XML data format

use dataformat_traits::{Error, MutableXmlTree, NamespaceContext, XPathEngine, XmlTree};
use xml_dom_dataformat::{XeeXPathEngine, XmlDocument};

const LIBRARY_XML: &str = r#"<library xmlns:m="urn:meta">
  <book id="b1" year="1999"><title>Alpha</title><m:tag>classic</m:tag></book>
  <book id="b2" year="2010"><title>Beta</title></book>
</library>"#;

#[test]
fn test_element_from_document() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let book = document.xpath("/library/book[2]").element().unwrap();
    assert_eq!(book.attr("id").as_deref(), Some("b2"));
}

#[test]
fn test_relative_query_from_element() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let second = document.xpath("/library/book[@id='b2']").element().unwrap();

    assert_eq!(second.xpath("title").string().unwrap(), "Beta");
    assert_eq!(second.xpath("@year").number().unwrap(), 2010.0);
    assert_eq!(second.xpath("count(../book)").number().unwrap(), 2.0);
    // absolute paths still resolve against the document
    assert_eq!(second.xpath("/library/book[1]/title").string().unwrap(), "Alpha");
}

#[test]
fn test_attribute_maps_back_to_owner() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let attribute = document.xpath("//book[title='Alpha']/@year").attribute().unwrap();

    assert_eq!(attribute.local_name(), "year");
    assert_eq!(attribute.value().unwrap(), "1999");
    assert_eq!(attribute.owner().attr("id").as_deref(), Some("b1"));
}

#[test]
fn test_namespaced_query() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let tag = document
        .xpath("//x:tag")
        .ns("x", "urn:meta")
        .element()
        .unwrap();

    assert_eq!(tag.text(), "classic");
    assert_eq!(tag.namespace().as_deref(), Some("urn:meta"));
    assert_eq!(tag.parent().unwrap().attr("id").as_deref(), Some("b1"));
}

#[test]
fn test_unbound_prefix_fails_to_compile() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let result = document.xpath("//x:tag").element();
    assert!(matches!(result, Err(Error::XPathCompile(_))));
}

#[test]
fn test_query_sees_mutations() {
    let mut document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let root = document.document_element().unwrap();
    let book = document.append_element(root, "book").unwrap();
    document.set_attribute(book, "id", "b3").unwrap();

    assert_eq!(document.xpath("count(/library/book)").number().unwrap(), 3.0);
    let found = document.xpath("/library/book[last()]").element().unwrap();
    assert_eq!(found.node(), book);
}

#[test]
fn test_engine_reports_items() {
    let document = XmlDocument::parse(LIBRARY_XML).unwrap();
    let engine = XeeXPathEngine::new();
    let items = engine
        .evaluate(
            &document,
            document.document_node(),
            "/library/book/@id",
            &NamespaceContext::new(),
        )
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(engine.xpath_version(), "3.1");
    assert!(engine.supports_feature("XPATH-3.1"));
}

#[test]
fn test_element_context_keeps_sequence_order() {
    let document = XmlDocument::parse("<r><a/><b/></r>").unwrap();
    let root = document.root().unwrap();

    let names = |elements: Vec<xml_dom_dataformat::XmlElement<'_>>| {
        elements.iter().map(|e| e.local_name()).collect::<Vec<_>>()
    };
    assert_eq!(names(root.xpath("(b, a)").element_list().unwrap()), ["b", "a"]);
    assert_eq!(
        names(document.xpath("(/r/b, /r/a)").element_list().unwrap()),
        ["b", "a"]
    );
    assert_eq!(root.xpath("(a, a)").element_list().unwrap().len(), 2);
}

#[test]
fn test_boolean_of_sequence() {
    let document = XmlDocument::parse("<r><a/><b/></r>").unwrap();

    assert!(document.xpath("/r/a, /r/b").boolean().unwrap());
    assert!(matches!(
        document.xpath("1, 2").boolean(),
        Err(Error::XPathEval(_))
    ));
}
