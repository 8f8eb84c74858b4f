//! XML document backed by xot, with element and attribute views

use std::fmt;

use dataformat_traits::{
    error::{Error, Result},
    tree::{MutableXmlTree, NodeType, XmlTree},
};
use xot::output::{xml::Parameters, Indentation};
use xot::{Node, Xot};

use crate::xpath::XPathQuery;

/// A parsed XML document.
///
/// The document owns its xot arena; nodes are handles into it. Read access
/// goes through [`XmlElement`] and [`XmlAttribute`] views, writes go
/// through the [`MutableXmlTree`] methods.
pub struct XmlDocument {
    xot: Xot,
    document: Node,
}

impl XmlDocument {
    /// Parse a document from a string
    pub fn parse(xml: &str) -> Result<Self> {
        let mut xot = Xot::new();
        let document = xot
            .parse(xml)
            .map_err(|e| Error::XmlParse(e.to_string()))?;
        tracing::debug!(bytes = xml.len(), "parsed XML document");
        Ok(Self { xot, document })
    }

    /// The root element
    pub fn root(&self) -> Result<XmlElement<'_>> {
        let node = self.document_element()?;
        Ok(XmlElement::new(self, node))
    }

    /// View `node` as an element
    pub fn element(&self, node: Node) -> Result<XmlElement<'_>> {
        if self.node_type(node) != NodeType::Element {
            return Err(Error::node_access(format!("{:?} is not an element", node)));
        }
        Ok(XmlElement::new(self, node))
    }

    /// Start an XPath query with the document node as context
    pub fn xpath(&self, expression: &str) -> XPathQuery<'_> {
        XPathQuery::new(self, self.document, expression)
    }

    /// Serialize the whole document
    pub fn to_xml(&self) -> Result<String> {
        self.serialize(self.document)
    }

    /// Serialize the whole document with indentation
    pub fn to_pretty_xml(&self) -> Result<String> {
        let parameters = Parameters {
            indentation: Some(Indentation::default()),
            ..Default::default()
        };
        self.xot
            .serialize_xml_string(parameters, self.document)
            .map_err(|e| Error::XmlWrite(e.to_string()))
    }

    /// Follow child positions (zero-based) down from the document node
    pub(crate) fn resolve_path(&self, positions: &[usize]) -> Result<Node> {
        positions.iter().try_fold(self.document, |node, &position| {
            self.xot.children(node).nth(position).ok_or_else(|| {
                Error::node_access(format!("no child at position {} of {:?}", position, node))
            })
        })
    }

    fn element_name(&self, node: Node) -> Option<xot::NameId> {
        self.xot.element(node).map(|element| element.name())
    }

    fn find_attribute(&self, element: Node, local_name: &str) -> Option<xot::NameId> {
        self.xot
            .attributes(element)
            .iter()
            .map(|(name, _)| name.clone())
            .find(|name| {
                self.xot.local_name_str(*name) == local_name && self.xot.uri_str(*name).is_empty()
            })
    }

    fn check_element(&self, node: Node) -> Result<()> {
        match self.node_type(node) {
            NodeType::Element => Ok(()),
            other => Err(Error::node_access(format!("expected an element, found {:?}", other))),
        }
    }
}

impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl XmlTree for XmlDocument {
    type Node = Node;

    fn document_node(&self) -> Node {
        self.document
    }

    fn document_element(&self) -> Result<Node> {
        self.xot
            .children(self.document)
            .find(|child| self.xot.is_element(*child))
            .ok_or_else(|| Error::node_access("Document has no root element"))
    }

    fn parent(&self, node: Node) -> Option<Node> {
        self.xot.parent(node)
    }

    fn children(&self, node: Node) -> Vec<Node> {
        self.xot.children(node).collect()
    }

    fn attributes(&self, node: Node) -> Vec<(String, Option<String>, String)> {
        if !self.xot.is_element(node) {
            return Vec::new();
        }
        self.xot
            .attributes(node)
            .iter()
            .map(|(name, value)| {
                let name = name.clone();
                let uri = self.xot.uri_str(name);
                (
                    self.xot.local_name_str(name).to_string(),
                    (!uri.is_empty()).then(|| uri.to_string()),
                    value.to_string(),
                )
            })
            .collect()
    }

    fn node_local_name(&self, node: Node) -> Option<String> {
        self.element_name(node)
            .map(|name| self.xot.local_name_str(name).to_string())
    }

    fn node_namespace_uri(&self, node: Node) -> Option<String> {
        self.element_name(node)
            .map(|name| self.xot.uri_str(name))
            .filter(|uri| !uri.is_empty())
            .map(str::to_string)
    }

    fn text_content(&self, node: Node) -> String {
        self.xot
            .descendants(node)
            .filter_map(|descendant| self.xot.text_str(descendant))
            .collect()
    }

    fn node_type(&self, node: Node) -> NodeType {
        match self.xot.value_type(node) {
            xot::ValueType::Document => NodeType::Document,
            xot::ValueType::Element => NodeType::Element,
            xot::ValueType::Text => NodeType::Text,
            xot::ValueType::Comment => NodeType::Comment,
            xot::ValueType::ProcessingInstruction => NodeType::ProcessingInstruction,
            xot::ValueType::Attribute => NodeType::Attribute,
            xot::ValueType::Namespace => NodeType::Namespace,
        }
    }

    fn serialize(&self, node: Node) -> Result<String> {
        self.xot
            .to_string(node)
            .map_err(|e| Error::XmlWrite(e.to_string()))
    }
}

impl MutableXmlTree for XmlDocument {
    fn append_element(&mut self, parent: Node, local_name: &str) -> Result<Node> {
        self.check_element(parent)?;
        let uri = self
            .element_name(parent)
            .map(|name| self.xot.uri_str(name).to_string())
            .unwrap_or_default();
        let name = if uri.is_empty() {
            self.xot.add_name(local_name)
        } else {
            let namespace = self.xot.add_namespace(&uri);
            self.xot.add_name_ns(local_name, namespace)
        };
        let child = self.xot.new_element(name);
        self.xot
            .append(parent, child)
            .map_err(|e| Error::node_access(e.to_string()))?;
        Ok(child)
    }

    fn set_text(&mut self, node: Node, text: &str) -> Result<()> {
        self.check_element(node)?;
        let children: Vec<Node> = self.xot.children(node).collect();
        for child in children {
            self.xot
                .remove(child)
                .map_err(|e| Error::node_access(e.to_string()))?;
        }
        if !text.is_empty() {
            let text_node = self.xot.new_text(text);
            self.xot
                .append(node, text_node)
                .map_err(|e| Error::node_access(e.to_string()))?;
        }
        Ok(())
    }

    fn set_attribute(&mut self, element: Node, local_name: &str, value: &str) -> Result<()> {
        self.check_element(element)?;
        let name = self.xot.add_name(local_name);
        self.xot
            .attributes_mut(element)
            .insert(name, value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, element: Node, local_name: &str) -> Result<bool> {
        self.check_element(element)?;
        match self.find_attribute(element, local_name) {
            Some(name) => {
                self.xot.attributes_mut(element).remove(name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, node: Node) -> Result<()> {
        if node == self.document {
            return Err(Error::node_access("the document node cannot be removed"));
        }
        if Some(node) == self.document_element().ok() {
            return Err(Error::node_access("the root element cannot be removed"));
        }
        self.xot
            .remove(node)
            .map_err(|e| Error::node_access(e.to_string()))
    }
}

/// Read-only view of an element inside an [`XmlDocument`]
#[derive(Clone, Copy)]
pub struct XmlElement<'a> {
    document: &'a XmlDocument,
    node: Node,
}

impl<'a> XmlElement<'a> {
    pub(crate) fn new(document: &'a XmlDocument, node: Node) -> Self {
        Self { document, node }
    }

    /// The underlying node handle, for use with [`MutableXmlTree`]
    pub fn node(&self) -> Node {
        self.node
    }

    /// The owning document
    pub fn document(&self) -> &'a XmlDocument {
        self.document
    }

    /// Local name of the element
    pub fn local_name(&self) -> String {
        self.document.node_local_name(self.node).unwrap_or_default()
    }

    /// Namespace URI of the element, if it has one
    pub fn namespace(&self) -> Option<String> {
        self.document.node_namespace_uri(self.node)
    }

    /// Whether the element is in namespace `uri`
    pub fn has_namespace(&self, uri: &str) -> bool {
        self.namespace().as_deref() == Some(uri)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text(&self) -> String {
        self.document.text_content(self.node)
    }

    /// Value of the attribute `local_name` (no namespace), if present
    pub fn attr(&self, local_name: &str) -> Option<String> {
        self.document.attribute_value(self.node, local_name)
    }

    /// The attribute `local_name` (no namespace)
    pub fn attribute(&self, local_name: &str) -> Result<XmlAttribute<'a>> {
        self.attributes()
            .into_iter()
            .find(|attribute| {
                attribute.local_name() == local_name && attribute.namespace().is_none()
            })
            .ok_or_else(|| {
                Error::node_access(format!(
                    "element '{}' has no attribute '{}'",
                    self.local_name(),
                    local_name
                ))
            })
    }

    /// All attributes of the element
    pub fn attributes(&self) -> Vec<XmlAttribute<'a>> {
        self.document
            .attributes(self.node)
            .into_iter()
            .map(|(local_name, namespace, _)| XmlAttribute {
                document: self.document,
                owner: self.node,
                local_name,
                namespace,
            })
            .collect()
    }

    /// Child elements in document order
    pub fn child_elements(&self) -> Vec<XmlElement<'a>> {
        self.document
            .child_elements(self.node)
            .into_iter()
            .map(|node| XmlElement::new(self.document, node))
            .collect()
    }

    /// Child elements with the given local name
    pub fn children_named(&self, local_name: &str) -> Vec<XmlElement<'a>> {
        self.child_elements()
            .into_iter()
            .filter(|child| child.local_name() == local_name)
            .collect()
    }

    /// Parent element, if the parent is not the document node
    pub fn parent(&self) -> Option<XmlElement<'a>> {
        self.document
            .parent(self.node)
            .filter(|parent| self.document.node_type(*parent) == NodeType::Element)
            .map(|parent| XmlElement::new(self.document, parent))
    }

    /// Start an XPath query with this element as context
    pub fn xpath(&self, expression: &str) -> XPathQuery<'a> {
        XPathQuery::new(self.document, self.node, expression)
    }

    /// Serialize this element and its subtree
    pub fn to_xml(&self) -> Result<String> {
        self.document.serialize(self.node)
    }
}

impl fmt::Debug for XmlElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlElement")
            .field("local_name", &self.local_name())
            .field("namespace", &self.namespace())
            .finish()
    }
}

/// Read-only view of an attribute, identified by owner element and name
#[derive(Clone)]
pub struct XmlAttribute<'a> {
    document: &'a XmlDocument,
    owner: Node,
    local_name: String,
    namespace: Option<String>,
}

impl<'a> XmlAttribute<'a> {
    pub(crate) fn new(
        document: &'a XmlDocument,
        owner: Node,
        local_name: String,
        namespace: Option<String>,
    ) -> Self {
        Self {
            document,
            owner,
            local_name,
            namespace,
        }
    }

    /// Local name of the attribute
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Namespace URI of the attribute, if it has one
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Current value of the attribute
    pub fn value(&self) -> Result<String> {
        self.document
            .attributes(self.owner)
            .into_iter()
            .find(|(name, namespace, _)| *name == self.local_name && *namespace == self.namespace)
            .map(|(_, _, value)| value)
            .ok_or_else(|| {
                Error::node_access(format!("attribute '{}' no longer exists", self.local_name))
            })
    }

    /// The element carrying this attribute
    pub fn owner(&self) -> XmlElement<'a> {
        XmlElement::new(self.document, self.owner)
    }
}

impl fmt::Debug for XmlAttribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlAttribute")
            .field("local_name", &self.local_name)
            .field("namespace", &self.namespace)
            .finish()
    }
}
