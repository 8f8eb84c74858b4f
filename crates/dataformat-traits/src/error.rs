//! Error types for data format operations

/// Result type for data format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all data format operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// XML parsing failed
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Serializing a document failed
    #[error("XML serialization error: {0}")]
    XmlWrite(String),

    /// The input declares a document type while doctype processing is disabled
    #[error("DOCTYPE declarations are not allowed: {0}")]
    DoctypeNotAllowed(String),

    /// XPath compilation failed
    #[error("XPath compilation error: {0}")]
    XPathCompile(String),

    /// XPath evaluation failed
    #[error("XPath evaluation error: {0}")]
    XPathEval(String),

    /// XPath expression selected nothing
    #[error("Unable to find XPath expression '{0}'")]
    XPathNoMatch(String),

    /// XPath expression selected something of the wrong kind
    #[error("XPath expression '{expression}' does not select {expected}")]
    XPathResultType {
        expression: String,
        expected: &'static str,
    },

    /// No data format is registered under this name
    #[error("Data format not found: {0}")]
    DataFormatNotFound(String),

    /// Two providers supplied the same name
    #[error("Data format already registered: {0}")]
    DuplicateDataFormat(String),

    /// No registered data format accepts the input
    #[error("No data format can read the given input")]
    UnrecognizableInput,

    /// Configuration could not be loaded or applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// Node access error
    #[error("Node access error: {0}")]
    NodeAccess(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new XPath compilation error
    pub fn xpath_compile<S: Into<String>>(msg: S) -> Self {
        Error::XPathCompile(msg.into())
    }

    /// Create a new XPath evaluation error
    pub fn xpath_eval<S: Into<String>>(msg: S) -> Self {
        Error::XPathEval(msg.into())
    }

    /// Create a new "nothing selected" error
    pub fn xpath_no_match<S: Into<String>>(expression: S) -> Self {
        Error::XPathNoMatch(expression.into())
    }

    /// Create a new result kind mismatch error
    pub fn xpath_result_type<S: Into<String>>(expression: S, expected: &'static str) -> Self {
        Error::XPathResultType {
            expression: expression.into(),
            expected,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new node access error
    pub fn node_access<S: Into<String>>(msg: S) -> Self {
        Error::NodeAccess(msg.into())
    }
}
