//! The DOM XML data format with its reader and writer

use std::any::Any;
use std::io::Write;
use std::ops::Range;
use std::sync::Arc;

use dataformat_traits::{
    error::{Error, Result},
    format::{DataFormat, DataFormatReader, DataFormatWriter},
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DomXmlConfig;
use crate::tree::XmlDocument;

static XML_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\s*<").expect("valid regex"));
static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A<!DOCTYPE\b").expect("valid regex"));

/// XML data format backed by a DOM
#[derive(Debug, Clone)]
pub struct DomXmlDataFormat {
    name: String,
    config: DomXmlConfig,
}

impl DomXmlDataFormat {
    /// Create a format with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, DomXmlConfig::default())
    }

    /// Create a format with the given configuration
    pub fn with_config(name: impl Into<String>, config: DomXmlConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn config(&self) -> &DomXmlConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DomXmlConfig {
        &mut self.config
    }

    pub fn reader(&self) -> DomXmlDataFormatReader<'_> {
        DomXmlDataFormatReader {
            config: &self.config,
        }
    }

    pub fn writer(&self) -> DomXmlDataFormatWriter<'_> {
        DomXmlDataFormatWriter {
            config: &self.config,
        }
    }

    /// Parse `input` into a document
    pub fn read_str(&self, input: &str) -> Result<XmlDocument> {
        self.reader().read_input(input)
    }

    /// Serialize `document` according to this format's configuration
    pub fn write_to_string(&self, document: &XmlDocument) -> Result<String> {
        self.writer().write_to_string(document)
    }
}

impl DataFormat for DomXmlDataFormat {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_read(&self, input: &str) -> bool {
        self.reader().can_read(input, self.config.read_limit)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Reads XML text into an [`XmlDocument`]
#[derive(Debug, Clone, Copy)]
pub struct DomXmlDataFormatReader<'a> {
    config: &'a DomXmlConfig,
}

impl DataFormatReader for DomXmlDataFormatReader<'_> {
    type Output = XmlDocument;

    fn can_read(&self, input: &str, read_limit: usize) -> bool {
        let end = input
            .char_indices()
            .nth(read_limit)
            .map_or(input.len(), |(index, _)| index);
        XML_START.is_match(&input[..end])
    }

    fn read_input(&self, input: &str) -> Result<XmlDocument> {
        match doctype_span(input) {
            Some(_) if !self.config.allow_doctype => {
                tracing::warn!("rejected XML input with a DOCTYPE declaration");
                Err(Error::DoctypeNotAllowed(
                    "enable allow_doctype to read documents with a document type".to_string(),
                ))
            }
            Some(span) => {
                tracing::debug!("dropping DOCTYPE declaration before parsing");
                let mut text = String::with_capacity(input.len());
                text.push_str(&input[..span.start]);
                text.push_str(&input[span.end..]);
                XmlDocument::parse(&text)
            }
            None => XmlDocument::parse(input),
        }
    }
}

/// Byte range of the DOCTYPE declaration, looked for only in the prolog
/// (XML declaration, processing instructions, comments and whitespace
/// before the root element)
fn doctype_span(input: &str) -> Option<Range<usize>> {
    let mut i = if input.starts_with('\u{feff}') { 3 } else { 0 };
    loop {
        i += input[i..]
            .bytes()
            .take_while(u8::is_ascii_whitespace)
            .count();
        let rest = &input[i..];
        if rest.starts_with("<?") {
            i += rest.find("?>")? + 2;
        } else if rest.starts_with("<!--") {
            i += rest.find("-->")? + 3;
        } else if DOCTYPE.is_match(rest) {
            return Some(i..i + declaration_len(rest));
        } else {
            return None;
        }
    }
}

/// Length of the declaration starting `text`, including an internal subset;
/// the whole text when it is never closed
fn declaration_len(text: &str) -> usize {
    let mut depth = 0usize;
    let mut quote = None;
    for (index, byte) in text.bytes().enumerate() {
        match (quote, byte) {
            (Some(open), _) if byte == open => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'[') => depth += 1,
            (None, b']') => depth = depth.saturating_sub(1),
            (None, b'>') if depth == 0 => return index + 1,
            _ => {}
        }
    }
    text.len()
}

/// Writes an [`XmlDocument`] as XML text
#[derive(Debug, Clone, Copy)]
pub struct DomXmlDataFormatWriter<'a> {
    config: &'a DomXmlConfig,
}

impl DataFormatWriter for DomXmlDataFormatWriter<'_> {
    type Input = XmlDocument;

    fn write_to_writer(&self, writer: &mut dyn Write, input: &XmlDocument) -> Result<()> {
        let xml = if self.config.pretty_print {
            input.to_pretty_xml()?
        } else {
            input.to_xml()?
        };
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}
