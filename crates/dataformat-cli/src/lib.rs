//! Command line interface over the built-in data formats

pub mod logger;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use dataformat_traits::NamespaceContext;
use dataformats::{DataFormats, DataFormatsConfig};
use xml_dom_dataformat::XmlDocument;
use xpath_test_harness::{compare_reports, run_filtered_suite, ENGINE_NAMES};

#[derive(Debug, Parser)]
#[command(name = "dataformat", version, about = "Read, write and query documents")]
pub struct Cli {
    /// TOML configuration for the data formats
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the registered data formats
    Formats,

    /// Print the name of the format that recognizes a file
    Detect { file: PathBuf },

    /// Re-serialize an XML file
    Format {
        file: PathBuf,

        /// Write without indentation regardless of configuration
        #[arg(long)]
        compact: bool,
    },

    /// Evaluate an XPath expression against an XML file
    Xpath {
        file: PathBuf,
        expression: String,

        /// Namespace binding as prefix=uri
        #[arg(long = "ns", value_parser = parse_binding)]
        namespaces: Vec<(String, String)>,

        /// Kind of result to produce
        #[arg(long = "as", value_enum, default_value_t = ResultKind::String)]
        kind: ResultKind,
    },

    /// Run the shared XPath suite under script engines
    Suite {
        /// Engine to run; all engines when omitted
        #[arg(long = "engine")]
        engines: Vec<String>,

        /// Only run cases whose id contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultKind {
    String,
    Number,
    Boolean,
    Element,
    Elements,
    Attribute,
    Attributes,
}

fn parse_binding(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((prefix, uri)) if !prefix.is_empty() && !uri.is_empty() => {
            Ok((prefix.to_string(), uri.to_string()))
        }
        _ => Err(format!("expected prefix=uri, got '{}'", text)),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DataFormatsConfig> {
    match path {
        Some(path) => DataFormatsConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(DataFormatsConfig::default()),
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Execute `cli`, writing command output to `out`
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Formats => {
            let formats = DataFormats::load(&config)?;
            for name in formats.names() {
                writeln!(out, "{}", name)?;
            }
        }
        Command::Detect { file } => {
            let formats = DataFormats::load(&config)?;
            let input = read_file(file)?;
            let format = formats
                .detect(&input)
                .with_context(|| format!("cannot detect the format of {}", file.display()))?;
            writeln!(out, "{}", format.name())?;
        }
        Command::Format { file, compact } => {
            let xml = DataFormats::load(&config)?.xml()?;
            let document = xml
                .read_str(&read_file(file)?)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            let text = if *compact {
                document.to_xml()?
            } else {
                xml.write_to_string(&document)?
            };
            writeln!(out, "{}", text)?;
        }
        Command::Xpath {
            file,
            expression,
            namespaces,
            kind,
        } => {
            let xml = DataFormats::load(&config)?.xml()?;
            let document = xml
                .read_str(&read_file(file)?)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            let namespaces: NamespaceContext = namespaces.iter().cloned().collect();
            evaluate(&document, expression, &namespaces, *kind, out)
                .with_context(|| format!("failed to evaluate '{}'", expression))?;
        }
        Command::Suite {
            engines,
            filter,
            json,
        } => {
            if cli.config.is_some() {
                DataFormats::init_global(&config)?;
            }
            run_suites(engines, filter.as_deref(), *json, out)?;
        }
    }
    Ok(())
}

fn evaluate(
    document: &XmlDocument,
    expression: &str,
    namespaces: &NamespaceContext,
    kind: ResultKind,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let query = document.xpath(expression).ns_map(namespaces);
    match kind {
        ResultKind::String => writeln!(out, "{}", query.string()?)?,
        ResultKind::Number => writeln!(out, "{}", query.number()?)?,
        ResultKind::Boolean => writeln!(out, "{}", query.boolean()?)?,
        ResultKind::Element => writeln!(out, "{}", query.element()?.to_xml()?)?,
        ResultKind::Elements => {
            for element in query.element_list()? {
                writeln!(out, "{}", element.to_xml()?)?;
            }
        }
        ResultKind::Attribute => {
            let attribute = query.attribute()?;
            writeln!(out, "{}={}", attribute.local_name(), attribute.value()?)?;
        }
        ResultKind::Attributes => {
            for attribute in query.attribute_list()? {
                writeln!(out, "{}={}", attribute.local_name(), attribute.value()?)?;
            }
        }
    }
    Ok(())
}

fn run_suites(
    engines: &[String],
    filter: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let names: Vec<&str> = if engines.is_empty() {
        ENGINE_NAMES.to_vec()
    } else {
        engines.iter().map(String::as_str).collect()
    };

    let reports = names
        .iter()
        .map(|name| run_filtered_suite(name, filter))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
    } else {
        for report in &reports {
            writeln!(out, "{}", report.to_markdown())?;
        }
        if reports.len() > 1 {
            writeln!(out, "{}", compare_reports(&reports).to_markdown())?;
        }
    }

    let failed: usize = reports
        .iter()
        .map(|r| r.summary.failed + r.summary.errors)
        .sum();
    if failed > 0 {
        bail!("{} XPath cases failed", failed);
    }
    Ok(())
}
