//! XPath engine abstraction trait

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tree::XmlTree;

/// Prefix to namespace URI bindings used by XPath name tests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceContext {
    bindings: BTreeMap<String, String>,
}

impl NamespaceContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `uri`, replacing any earlier binding
    pub fn bind(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.bindings.insert(prefix.into(), uri.into());
    }

    /// Look up the URI bound to `prefix`
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Iterate over (prefix, uri) pairs in prefix order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Whether no prefixes are bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<P: Into<String>, U: Into<String>> FromIterator<(P, U)> for NamespaceContext {
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (prefix, uri) in iter {
            context.bind(prefix, uri);
        }
        context
    }
}

/// One item of an XPath result sequence
#[derive(Debug, Clone, PartialEq)]
pub enum XPathItem<N> {
    /// A document, element, text, comment or processing instruction node
    Node(N),
    /// An attribute, identified by its owner element and name
    Attribute {
        owner: N,
        local_name: String,
        namespace: Option<String>,
    },
    /// A string value
    String(String),
    /// A numeric value
    Number(f64),
    /// A boolean value
    Boolean(bool),
}

/// Trait for XPath query engines.
///
/// The engine evaluates an expression against a tree it does not own and
/// reports results as handles into that tree.
pub trait XPathEngine {
    /// The XML tree implementation this engine works with
    type Tree: XmlTree;

    /// Evaluate `expression` with `context` as the context node
    fn evaluate(
        &self,
        tree: &Self::Tree,
        context: <Self::Tree as XmlTree>::Node,
        expression: &str,
        namespaces: &NamespaceContext,
    ) -> Result<Vec<XPathItem<<Self::Tree as XmlTree>::Node>>>;

    /// Get the XPath version supported by this engine
    fn xpath_version(&self) -> &'static str;

    /// Get the list of feature strings supported by this engine
    fn supported_features(&self) -> Vec<String>;

    /// Check if a specific feature is supported
    fn supports_feature(&self, feature: &str) -> bool {
        self.supported_features()
            .iter()
            .any(|f| f.eq_ignore_ascii_case(feature))
    }
}
