//! The shared XPath test suite

/// Name reported for this suite
pub const SUITE_NAME: &str = "xml-dom-xpath";

/// Document every case runs against
pub const XPATH_FIXTURE: &str = r#"<customers xmlns:c="http://example.org/contact" region="north">
  <customer id="anna" level="gold">
    <name>Anna</name>
    <c:email>anna@example.org</c:email>
    <orders>3</orders>
  </customer>
  <customer id="bert" level="silver">
    <name>Bert</name>
    <c:email>bert@example.org</c:email>
    <orders>5</orders>
  </customer>
  <note/>
</customers>"#;

const CONTACT_NS: &str = "http://example.org/contact";

/// Terminal operation a case runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Element,
    ElementList,
    Attribute,
    AttributeList,
    String,
    Number,
    Boolean,
}

/// Class of error a failing case must produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoMatch,
    ResultType,
    Compile,
    Eval,
}

/// Expected outcome of a case.
///
/// Elements are described as `name` or `name#id` when they carry an `id`
/// attribute; attributes by their values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Elements(&'static [&'static str]),
    Attributes(&'static [&'static str]),
    Text(&'static str),
    Number(f64),
    NotANumber,
    Boolean(bool),
    Error(ErrorKind),
}

/// One row of the suite
#[derive(Debug, Clone, Copy)]
pub struct XPathCase {
    pub id: &'static str,
    /// Expression selecting the context element; the document when absent
    pub context: Option<&'static str>,
    pub expression: &'static str,
    pub namespaces: &'static [(&'static str, &'static str)],
    pub query: QueryKind,
    pub expected: Expected,
}

const fn case(
    id: &'static str,
    expression: &'static str,
    query: QueryKind,
    expected: Expected,
) -> XPathCase {
    XPathCase {
        id,
        context: None,
        expression,
        namespaces: &[],
        query,
        expected,
    }
}

const fn with_ns(
    mut case: XPathCase,
    namespaces: &'static [(&'static str, &'static str)],
) -> XPathCase {
    case.namespaces = namespaces;
    case
}

const fn in_context(mut case: XPathCase, context: &'static str) -> XPathCase {
    case.context = Some(context);
    case
}

static CASES: &[XPathCase] = &[
    case(
        "can_query_element",
        "/customers/customer",
        QueryKind::Element,
        Expected::Elements(&["customer#anna"]),
    ),
    case(
        "can_query_element_list",
        "/customers/customer",
        QueryKind::ElementList,
        Expected::Elements(&["customer#anna", "customer#bert"]),
    ),
    case(
        "can_query_nested_element",
        "/customers/customer[@id='bert']/name",
        QueryKind::Element,
        Expected::Elements(&["name"]),
    ),
    case(
        "can_query_attribute",
        "/customers/customer[2]/@level",
        QueryKind::Attribute,
        Expected::Attributes(&["silver"]),
    ),
    case(
        "can_query_attribute_list",
        "//customer/@id",
        QueryKind::AttributeList,
        Expected::Attributes(&["anna", "bert"]),
    ),
    case(
        "can_query_string",
        "/customers/customer[1]/name",
        QueryKind::String,
        Expected::Text("Anna"),
    ),
    case(
        "can_query_attribute_string",
        "/customers/@region",
        QueryKind::String,
        Expected::Text("north"),
    ),
    case(
        "can_query_string_of_nothing",
        "/customers/missing",
        QueryKind::String,
        Expected::Text(""),
    ),
    case(
        "can_query_number",
        "/customers/customer[2]/orders",
        QueryKind::Number,
        Expected::Number(5.0),
    ),
    case(
        "can_query_sum",
        "sum(//orders)",
        QueryKind::Number,
        Expected::Number(8.0),
    ),
    case(
        "can_query_count",
        "count(//customer)",
        QueryKind::Number,
        Expected::Number(2.0),
    ),
    case(
        "can_query_non_numeric_number",
        "/customers/customer[1]/name",
        QueryKind::Number,
        Expected::NotANumber,
    ),
    case(
        "can_query_boolean_true",
        "/customers/customer",
        QueryKind::Boolean,
        Expected::Boolean(true),
    ),
    case(
        "can_query_boolean_false",
        "/customers/unknown",
        QueryKind::Boolean,
        Expected::Boolean(false),
    ),
    case(
        "can_query_comparison",
        "/customers/customer[1]/orders < 4",
        QueryKind::Boolean,
        Expected::Boolean(true),
    ),
    with_ns(
        case(
            "can_query_with_namespace",
            "//c:email",
            QueryKind::ElementList,
            Expected::Elements(&["email", "email"]),
        ),
        &[("c", CONTACT_NS)],
    ),
    with_ns(
        case(
            "can_query_namespaced_string",
            "/customers/customer[2]/c:email",
            QueryKind::String,
            Expected::Text("bert@example.org"),
        ),
        &[("c", CONTACT_NS)],
    ),
    with_ns(
        case(
            "can_query_with_own_prefix",
            "count(//contact:email)",
            QueryKind::Number,
            Expected::Number(2.0),
        ),
        &[("contact", CONTACT_NS)],
    ),
    in_context(
        case(
            "can_query_relative_to_element",
            "name",
            QueryKind::String,
            Expected::Text("Bert"),
        ),
        "/customers/customer[@id='bert']",
    ),
    in_context(
        case(
            "can_query_parent_of_element",
            "..",
            QueryKind::Element,
            Expected::Elements(&["customer#bert"]),
        ),
        "//customer[2]/name",
    ),
    in_context(
        case(
            "can_query_absolute_from_element",
            "/customers/customer[1]/@id",
            QueryKind::Attribute,
            Expected::Attributes(&["anna"]),
        ),
        "/customers/customer[2]",
    ),
    in_context(
        case(
            "can_query_sequence_order_from_element",
            "(orders, name)",
            QueryKind::ElementList,
            Expected::Elements(&["orders", "name"]),
        ),
        "/customers/customer[1]",
    ),
    case(
        "cannot_query_missing_element",
        "/customers/nobody",
        QueryKind::Element,
        Expected::Error(ErrorKind::NoMatch),
    ),
    case(
        "cannot_query_missing_element_list",
        "/customers/nobody",
        QueryKind::ElementList,
        Expected::Error(ErrorKind::NoMatch),
    ),
    case(
        "cannot_query_missing_attribute",
        "/customers/@nobody",
        QueryKind::Attribute,
        Expected::Error(ErrorKind::NoMatch),
    ),
    case(
        "cannot_query_document_as_element",
        "/",
        QueryKind::Element,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_query_attribute_as_element",
        "/customers/@region",
        QueryKind::Element,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_query_element_as_attribute",
        "/customers/customer",
        QueryKind::Attribute,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_query_element_list_as_attribute_list",
        "/customers/customer",
        QueryKind::AttributeList,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_query_text_as_element",
        "/customers/customer[1]/name/text()",
        QueryKind::Element,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_query_string_as_element",
        "string(/customers/@region)",
        QueryKind::Element,
        Expected::Error(ErrorKind::ResultType),
    ),
    case(
        "cannot_use_unbound_prefix",
        "//c:email",
        QueryKind::Element,
        Expected::Error(ErrorKind::Compile),
    ),
    case(
        "cannot_query_invalid_expression",
        "/customers/customer[",
        QueryKind::Element,
        Expected::Error(ErrorKind::Compile),
    ),
    case(
        "cannot_query_failing_expression",
        "error()",
        QueryKind::String,
        Expected::Error(ErrorKind::Eval),
    ),
];

/// Every case of the suite, in execution order
pub fn xpath_cases() -> &'static [XPathCase] {
    CASES
}
