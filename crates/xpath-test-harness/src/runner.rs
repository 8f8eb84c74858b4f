//! Runs the shared suite under an engine

use std::time::{Duration, Instant};

use dataformat_traits::{error::Error, NamespaceContext};
use xml_dom_dataformat::{XmlDocument, XmlElement};

use crate::cases::{xpath_cases, ErrorKind, Expected, QueryKind, XPathCase, XPATH_FIXTURE};
use crate::engine::ScriptEngine;

/// Result of running a single case
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Case identifier
    pub test_id: String,
    /// Outcome of the case
    pub outcome: TestOutcome,
    /// Expected result, rendered
    pub expected: Option<String>,
    /// Actual result, rendered
    pub actual: Option<String>,
    /// Duration of case execution
    pub duration: Duration,
}

/// Outcome of a case
#[derive(Debug, Clone)]
pub enum TestOutcome {
    /// Case passed
    Pass,
    /// Case produced a different value or error than expected
    Fail(String),
    /// Case errored where a value was expected
    Error(String),
    /// Case was excluded by a filter
    Skipped,
}

impl TestOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestOutcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, TestOutcome::Fail(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TestOutcome::Error(_))
    }
}

/// What a query produced
#[derive(Debug, Clone, PartialEq)]
enum Observed {
    Elements(Vec<String>),
    Attributes(Vec<String>),
    Text(String),
    Number(f64),
    Boolean(bool),
}

fn describe(element: &XmlElement<'_>) -> String {
    match element.attr("id") {
        Some(id) => format!("{}#{}", element.local_name(), id),
        None => element.local_name(),
    }
}

fn execute(document: &XmlDocument, case: &XPathCase) -> dataformat_traits::Result<Observed> {
    let namespaces: NamespaceContext = case.namespaces.iter().copied().collect();
    let query = match case.context {
        Some(context) => document
            .xpath(context)
            .ns_map(&namespaces)
            .element()?
            .xpath(case.expression),
        None => document.xpath(case.expression),
    }
    .ns_map(&namespaces);

    Ok(match case.query {
        QueryKind::Element => Observed::Elements(vec![describe(&query.element()?)]),
        QueryKind::ElementList => {
            Observed::Elements(query.element_list()?.iter().map(describe).collect())
        }
        QueryKind::Attribute => Observed::Attributes(vec![query.attribute()?.value()?]),
        QueryKind::AttributeList => Observed::Attributes(
            query
                .attribute_list()?
                .iter()
                .map(|attribute| attribute.value())
                .collect::<dataformat_traits::Result<_>>()?,
        ),
        QueryKind::String => Observed::Text(query.string()?),
        QueryKind::Number => Observed::Number(query.number()?),
        QueryKind::Boolean => Observed::Boolean(query.boolean()?),
    })
}

fn error_kind(error: &Error) -> Option<ErrorKind> {
    match error {
        Error::XPathNoMatch(_) => Some(ErrorKind::NoMatch),
        Error::XPathResultType { .. } => Some(ErrorKind::ResultType),
        Error::XPathCompile(_) => Some(ErrorKind::Compile),
        Error::XPathEval(_) => Some(ErrorKind::Eval),
        _ => None,
    }
}

fn matches_expected(expected: &Expected, observed: &Observed) -> bool {
    match (expected, observed) {
        (Expected::Elements(names), Observed::Elements(actual)) => names.iter().eq(actual.iter()),
        (Expected::Attributes(values), Observed::Attributes(actual)) => {
            values.iter().eq(actual.iter())
        }
        (Expected::Text(text), Observed::Text(actual)) => text == actual,
        (Expected::Number(number), Observed::Number(actual)) => {
            (number - actual).abs() < f64::EPSILON
        }
        (Expected::NotANumber, Observed::Number(actual)) => actual.is_nan(),
        (Expected::Boolean(value), Observed::Boolean(actual)) => value == actual,
        _ => false,
    }
}

/// Run one case under `engine`
pub fn run_case(engine: &dyn ScriptEngine, case: &XPathCase) -> TestResult {
    let start = Instant::now();
    let expected = Some(format!("{:?}", case.expected));

    let result = engine
        .load(XPATH_FIXTURE)
        .and_then(|document| execute(&document, case));

    let (outcome, actual) = match (&case.expected, result) {
        (Expected::Error(kind), Err(error)) => {
            let actual = Some(error.to_string());
            if error_kind(&error) == Some(*kind) {
                (TestOutcome::Pass, actual)
            } else {
                (
                    TestOutcome::Fail(format!("expected {:?} error, got: {}", kind, error)),
                    actual,
                )
            }
        }
        (Expected::Error(kind), Ok(observed)) => (
            TestOutcome::Fail(format!("expected {:?} error, got {:?}", kind, observed)),
            Some(format!("{:?}", observed)),
        ),
        (_, Err(error)) => (TestOutcome::Error(error.to_string()), None),
        (expected, Ok(observed)) => {
            let actual = Some(format!("{:?}", observed));
            if matches_expected(expected, &observed) {
                (TestOutcome::Pass, actual)
            } else {
                (
                    TestOutcome::Fail(format!("expected {:?}, got {:?}", expected, observed)),
                    actual,
                )
            }
        }
    };

    tracing::debug!(engine = engine.name(), case = case.id, ?outcome, "ran XPath case");
    TestResult {
        test_id: case.id.to_string(),
        outcome,
        expected,
        actual,
        duration: start.elapsed(),
    }
}

/// Run every case under `engine`; cases whose id does not contain
/// `filter` are reported as skipped
pub fn run_suite(engine: &dyn ScriptEngine, filter: Option<&str>) -> Vec<TestResult> {
    xpath_cases()
        .iter()
        .map(|case| match filter {
            Some(pattern) if !case.id.contains(pattern) => TestResult {
                test_id: case.id.to_string(),
                outcome: TestOutcome::Skipped,
                expected: None,
                actual: None,
                duration: Duration::ZERO,
            },
            _ => run_case(engine, case),
        })
        .collect()
}
