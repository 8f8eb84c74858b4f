//! XML tree abstraction trait

use crate::error::Result;
use std::fmt::Debug;

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node
    Element,
    /// Attribute node
    Attribute,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Processing instruction node
    ProcessingInstruction,
    /// Namespace node
    Namespace,
}

/// Read access to an XML document tree.
///
/// Nodes are lightweight handles into a tree owned by the implementor.
pub trait XmlTree {
    /// Type representing a node handle in this tree
    type Node: Copy + PartialEq + Debug;

    /// The document node
    fn document_node(&self) -> Self::Node;

    /// The document element (root element)
    fn document_element(&self) -> Result<Self::Node>;

    /// Get the parent of a node, if it has one
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Get all children of a node
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Get the element children of a node
    fn child_elements(&self, node: Self::Node) -> Vec<Self::Node> {
        self.children(node)
            .into_iter()
            .filter(|child| self.node_type(*child) == NodeType::Element)
            .collect()
    }

    /// Get all attributes of an element node as (local name, namespace, value)
    fn attributes(&self, node: Self::Node) -> Vec<(String, Option<String>, String)>;

    /// Get an attribute value by local name, ignoring namespaced attributes
    fn attribute_value(&self, node: Self::Node, local_name: &str) -> Option<String> {
        self.attributes(node)
            .into_iter()
            .find(|(name, namespace, _)| name == local_name && namespace.is_none())
            .map(|(_, _, value)| value)
    }

    /// Get the local name of a node (without namespace prefix)
    fn node_local_name(&self, node: Self::Node) -> Option<String>;

    /// Get the namespace URI of a node
    fn node_namespace_uri(&self, node: Self::Node) -> Option<String>;

    /// Concatenated text of the node and its descendants
    fn text_content(&self, node: Self::Node) -> String;

    /// Get the type of a node
    fn node_type(&self, node: Self::Node) -> NodeType;

    /// Serialize a node to an XML string
    fn serialize(&self, node: Self::Node) -> Result<String>;
}

/// Write access to an XML document tree
pub trait MutableXmlTree: XmlTree {
    /// Create an element in the parent's namespace and append it
    fn append_element(&mut self, parent: Self::Node, local_name: &str) -> Result<Self::Node>;

    /// Replace all children of a node with one text node
    fn set_text(&mut self, node: Self::Node, text: &str) -> Result<()>;

    /// Set an attribute (no namespace) on an element
    fn set_attribute(&mut self, element: Self::Node, local_name: &str, value: &str) -> Result<()>;

    /// Remove an attribute (no namespace), returning whether it existed
    fn remove_attribute(&mut self, element: Self::Node, local_name: &str) -> Result<bool>;

    /// Detach and drop a node with its subtree
    fn remove(&mut self, node: Self::Node) -> Result<()>;
}
