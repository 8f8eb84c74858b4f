//! XPath queries over [`XmlDocument`], evaluated by xee

use dataformat_traits::{
    error::{Error, Result},
    tree::{NodeType, XmlTree},
    xpath::{NamespaceContext, XPathEngine, XPathItem},
};
use xee_xpath::{Documents, Queries, Query};
use xot::Node;

use crate::tree::{XmlAttribute, XmlDocument, XmlElement};

/// xee XPath 3.1 engine.
///
/// xee keeps documents in its own store, so the document is serialized and
/// loaded there. Result nodes are mapped back by their child positions,
/// which match because both sides parse the same text.
#[derive(Debug, Clone, Copy, Default)]
pub struct XeeXPathEngine;

impl XeeXPathEngine {
    /// Create a new xee engine
    pub fn new() -> Self {
        Self
    }
}

impl XPathEngine for XeeXPathEngine {
    type Tree = XmlDocument;

    fn evaluate(
        &self,
        tree: &XmlDocument,
        context: Node,
        expression: &str,
        namespaces: &NamespaceContext,
    ) -> Result<Vec<XPathItem<Node>>> {
        let expanded = expand_prefixes(expression, namespaces)?;
        let positions = child_positions(tree, context)?;
        tracing::debug!(expression = %expanded, context = ?positions, "evaluating XPath");

        let xml = tree.serialize(tree.document_node())?;
        let mut documents = Documents::new();
        let handle = documents
            .add_string_without_uri(&xml)
            .map_err(|e| Error::xpath_eval(format!("{:?}", e)))?;

        let queries = Queries::default();
        let query = queries
            .sequence(&expanded)
            .map_err(|e| Error::xpath_compile(format!("{:?}", e)))?;
        let sequence = if positions.is_empty() {
            query.execute(&mut documents, handle)
        } else {
            let store = documents.xot();
            let mut node = documents
                .document_node(handle)
                .ok_or_else(|| Error::xpath_eval("loaded document is missing"))?;
            for &position in &positions {
                node = store
                    .children(node)
                    .nth(position)
                    .ok_or_else(|| Error::xpath_eval("context node is missing"))?;
            }
            query.execute(&mut documents, &xee_xpath::Item::Node(node))
        }
        .map_err(|e| Error::xpath_eval(format!("{:?}", e)))?;

        let store = documents.xot();
        let mut items = Vec::new();
        for item in sequence.iter() {
            match item {
                xee_xpath::Item::Atomic(atomic) => items.push(convert_atomic(&atomic)),
                xee_xpath::Item::Node(node) => {
                    let mut current = node;
                    let mut attribute = None;
                    if let Some(parent) = store.parent(current) {
                        // attributes have a parent but are not among its children
                        if !store.children(parent).any(|child| child == current) {
                            let name = store.node_name(current).ok_or_else(|| {
                                Error::xpath_eval("namespace nodes cannot be returned")
                            })?;
                            let uri = store.uri_str(name);
                            attribute = Some((
                                store.local_name_str(name).to_string(),
                                (!uri.is_empty()).then(|| uri.to_string()),
                            ));
                            current = parent;
                        }
                    }

                    let mut positions = Vec::new();
                    while let Some(parent) = store.parent(current) {
                        let position = store
                            .children(parent)
                            .position(|child| child == current)
                            .ok_or_else(|| Error::xpath_eval("result node is detached"))?;
                        positions.push(position);
                        current = parent;
                    }
                    positions.reverse();
                    let target = tree.resolve_path(&positions)?;

                    items.push(match attribute {
                        Some((local_name, namespace)) => XPathItem::Attribute {
                            owner: target,
                            local_name,
                            namespace,
                        },
                        None => XPathItem::Node(target),
                    });
                }
                _ => return Err(Error::xpath_eval("function items cannot be returned")),
            }
        }
        Ok(items)
    }

    fn xpath_version(&self) -> &'static str {
        "3.1"
    }

    fn supported_features(&self) -> Vec<String> {
        vec![
            "xpath-3.1".to_string(),
            "higher-order-functions".to_string(),
            "namespace-bindings".to_string(),
        ]
    }
}

fn convert_atomic(atomic: &xee_xpath::Atomic) -> XPathItem<Node> {
    use xee_xpath::Atomic;
    match atomic {
        Atomic::Boolean(b) => XPathItem::Boolean(*b),
        Atomic::Double(d) => XPathItem::Number(d.into_inner()),
        Atomic::Float(f) => XPathItem::Number(f.into_inner() as f64),
        Atomic::Integer(_, i) => number_or_string(i.to_string()),
        Atomic::Decimal(d) => number_or_string(d.to_string()),
        Atomic::String(_, s) => XPathItem::String(s.to_string()),
        Atomic::Untyped(s) => XPathItem::String(s.to_string()),
        other => XPathItem::String(format!("{:?}", other)),
    }
}

fn number_or_string(text: String) -> XPathItem<Node> {
    match text.parse::<f64>() {
        Ok(number) => XPathItem::Number(number),
        Err(_) => XPathItem::String(text),
    }
}

/// Zero-based child positions leading from the document node to `node`
fn child_positions(tree: &XmlDocument, node: Node) -> Result<Vec<usize>> {
    let mut positions = Vec::new();
    let mut current = node;
    while let Some(parent) = tree.parent(current) {
        let position = tree
            .children(parent)
            .iter()
            .position(|child| *child == current)
            .ok_or_else(|| Error::node_access("context node is not a child of its parent"))?;
        positions.push(position);
        current = parent;
    }
    if current != tree.document_node() {
        return Err(Error::node_access("context node is detached from the document"));
    }
    positions.reverse();
    Ok(positions)
}

/// Rewrite `prefix:local` names whose prefix is bound in `namespaces` into
/// the `Q{uri}local` form. String literals, `Q{...}` names, variables and
/// axis separators are left alone; unbound prefixes are kept so the
/// compiler reports them.
pub fn expand_prefixes(expression: &str, namespaces: &NamespaceContext) -> Result<String> {
    if namespaces.is_empty() {
        return Ok(expression.to_string());
    }

    let chars: Vec<char> = expression.chars().collect();
    let mut output = String::with_capacity(expression.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '"' || c == '\'' {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != c {
                i += 1;
            }
            i = (i + 1).min(chars.len());
            output.extend(&chars[start..i]);
            continue;
        }

        if c == 'Q' && chars.get(i + 1) == Some(&'{') {
            let start = i;
            while i < chars.len() && chars[i] != '}' {
                i += 1;
            }
            i = (i + 1).min(chars.len());
            output.extend(&chars[start..i]);
            continue;
        }

        if c == '$' {
            let start = i;
            i += 1;
            while i < chars.len() && (is_name_char(chars[i]) || chars[i] == ':') {
                i += 1;
            }
            output.extend(&chars[start..i]);
            continue;
        }

        if is_name_start(c) {
            let start = i;
            while i < chars.len() && is_name_char(chars[i]) {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            let is_prefix = chars.get(i) == Some(&':')
                && chars
                    .get(i + 1)
                    .is_some_and(|next| is_name_start(*next) || *next == '*');
            match namespaces.resolve(&name) {
                Some(uri) if is_prefix => {
                    if uri.contains('}') {
                        return Err(Error::xpath_compile(format!(
                            "namespace URI '{}' bound to '{}' contains '}}'",
                            uri, name
                        )));
                    }
                    output.push_str("Q{");
                    output.push_str(uri);
                    output.push('}');
                    i += 1;
                }
                _ => output.push_str(&name),
            }
            continue;
        }

        output.push(c);
        i += 1;
    }

    Ok(output)
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// An XPath expression bound to a document and context node.
///
/// Prefixes are bound with [`ns`](Self::ns) before one of the terminal
/// operations runs the query.
#[derive(Debug, Clone)]
pub struct XPathQuery<'a> {
    document: &'a XmlDocument,
    context: Node,
    expression: String,
    namespaces: NamespaceContext,
    engine: XeeXPathEngine,
}

impl<'a> XPathQuery<'a> {
    pub(crate) fn new(document: &'a XmlDocument, context: Node, expression: &str) -> Self {
        Self {
            document,
            context,
            expression: expression.to_string(),
            namespaces: NamespaceContext::new(),
            engine: XeeXPathEngine::new(),
        }
    }

    /// Bind `prefix` to `uri` for this query
    pub fn ns(mut self, prefix: &str, uri: &str) -> Self {
        self.namespaces.bind(prefix, uri);
        self
    }

    /// Bind every prefix in `namespaces` for this query
    pub fn ns_map(mut self, namespaces: &NamespaceContext) -> Self {
        for (prefix, uri) in namespaces.iter() {
            self.namespaces.bind(prefix, uri);
        }
        self
    }

    fn run(&self, expression: &str) -> Result<Vec<XPathItem<Node>>> {
        self.engine
            .evaluate(self.document, self.context, expression, &self.namespaces)
    }

    fn first(&self, expression: &str) -> Result<Option<XPathItem<Node>>> {
        Ok(self.run(expression)?.into_iter().next())
    }

    fn to_element(&self, item: XPathItem<Node>) -> Result<XmlElement<'a>> {
        match item {
            XPathItem::Node(node) if self.document.node_type(node) == NodeType::Element => {
                Ok(XmlElement::new(self.document, node))
            }
            _ => Err(Error::xpath_result_type(&self.expression, "an element")),
        }
    }

    fn to_attribute(&self, item: XPathItem<Node>) -> Result<XmlAttribute<'a>> {
        match item {
            XPathItem::Attribute {
                owner,
                local_name,
                namespace,
            } => Ok(XmlAttribute::new(self.document, owner, local_name, namespace)),
            _ => Err(Error::xpath_result_type(&self.expression, "an attribute")),
        }
    }

    /// The first selected item, which must be an element
    pub fn element(&self) -> Result<XmlElement<'a>> {
        let item = self
            .first(&self.expression)?
            .ok_or_else(|| Error::xpath_no_match(&self.expression))?;
        self.to_element(item)
    }

    /// All selected items, which must be elements
    pub fn element_list(&self) -> Result<Vec<XmlElement<'a>>> {
        let items = self.run(&self.expression)?;
        if items.is_empty() {
            return Err(Error::xpath_no_match(&self.expression));
        }
        items.into_iter().map(|item| self.to_element(item)).collect()
    }

    /// The first selected item, which must be an attribute
    pub fn attribute(&self) -> Result<XmlAttribute<'a>> {
        let item = self
            .first(&self.expression)?
            .ok_or_else(|| Error::xpath_no_match(&self.expression))?;
        self.to_attribute(item)
    }

    /// All selected items, which must be attributes
    pub fn attribute_list(&self) -> Result<Vec<XmlAttribute<'a>>> {
        let items = self.run(&self.expression)?;
        if items.is_empty() {
            return Err(Error::xpath_no_match(&self.expression));
        }
        items.into_iter().map(|item| self.to_attribute(item)).collect()
    }

    /// String value of the first selected item; empty if nothing is selected
    pub fn string(&self) -> Result<String> {
        match self.first(&format!("string(({})[1])", self.expression))? {
            Some(XPathItem::String(value)) => Ok(value),
            None => Ok(String::new()),
            Some(_) => Err(Error::xpath_result_type(&self.expression, "a string")),
        }
    }

    /// Numeric value of the first selected item; NaN if nothing is selected
    pub fn number(&self) -> Result<f64> {
        match self.first(&format!("number(({})[1])", self.expression))? {
            Some(XPathItem::Number(value)) => Ok(value),
            None => Ok(f64::NAN),
            Some(_) => Err(Error::xpath_result_type(&self.expression, "a number")),
        }
    }

    /// Effective boolean value of the selection
    pub fn boolean(&self) -> Result<bool> {
        match self.first(&format!("boolean(({}))", self.expression))? {
            Some(XPathItem::Boolean(value)) => Ok(value),
            _ => Err(Error::xpath_result_type(&self.expression, "a boolean")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> NamespaceContext {
        [("a", "http://example.org/a"), ("b", "urn:b")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_expand_bound_prefix() {
        let expanded = expand_prefixes("/root/a:leaf/@id", &context()).unwrap();
        assert_eq!(expanded, "/root/Q{http://example.org/a}leaf/@id");
    }

    #[test]
    fn test_expand_wildcard_and_function() {
        let expanded = expand_prefixes("count(b:*) + b:f(1)", &context()).unwrap();
        assert_eq!(expanded, "count(Q{urn:b}*) + Q{urn:b}f(1)");
    }

    #[test]
    fn test_expand_keeps_axes_literals_and_unbound() {
        let expanded =
            expand_prefixes("child::a:x[. = 'a:y'][$a:v]/c:z", &context()).unwrap();
        assert_eq!(expanded, "child::Q{http://example.org/a}x[. = 'a:y'][$a:v]/c:z");
    }

    #[test]
    fn test_expand_ignores_name_suffix() {
        let expanded = expand_prefixes("/xa:leaf", &context()).unwrap();
        assert_eq!(expanded, "/xa:leaf");
    }

    #[test]
    fn test_expand_without_bindings_is_identity() {
        let expanded = expand_prefixes("/a:b", &NamespaceContext::new()).unwrap();
        assert_eq!(expanded, "/a:b");
    }

    #[test]
    fn test_expand_rejects_brace_in_uri() {
        let mut namespaces = NamespaceContext::new();
        namespaces.bind("a", "urn:{x}");
        assert!(matches!(
            expand_prefixes("/a:b", &namespaces),
            Err(Error::XPathCompile(_))
        ));
    }
}
