//! xpath-test-harness: one XPath suite, many script engines
//!
//! The suite in [`cases`] is written once. A test file binds it to an
//! engine with [`script_engine_test!`]:
//!
//! ```rust,ignore
//! use xpath_test_harness::script_engine_test;
//!
//! script_engine_test!(xml_dom_xpath_native, "native");
//! ```

pub mod cases;
pub mod engine;
pub mod reporter;
pub mod runner;

use dataformat_traits::error::Result;

pub use cases::{xpath_cases, XPathCase, SUITE_NAME, XPATH_FIXTURE};
pub use engine::{engine_by_name, NativeEngine, RegistryEngine, ScriptEngine, ENGINE_NAMES};
pub use reporter::{compare_reports, ComparisonReport, SuiteReport, SuiteSummary};
pub use runner::{run_case, run_suite, TestOutcome, TestResult};

/// Run the whole suite under the engine bound to `engine`
pub fn run_bound_suite(engine: &str) -> Result<SuiteReport> {
    run_filtered_suite(engine, None)
}

/// Run the cases whose id contains `filter` under `engine`
pub fn run_filtered_suite(engine: &str, filter: Option<&str>) -> Result<SuiteReport> {
    let engine = engine_by_name(engine)?;
    let results = run_suite(engine.as_ref(), filter);
    let report = SuiteReport::new(engine.name(), SUITE_NAME, &results);
    tracing::info!(
        engine = engine.name(),
        passed = report.summary.passed,
        total = report.summary.total,
        "XPath suite finished"
    );
    Ok(report)
}

/// Bind the shared XPath suite to a script engine as a `#[test]`.
///
/// Every case must run and pass; the markdown report is printed on failure.
#[macro_export]
macro_rules! script_engine_test {
    ($test:ident, $engine:literal) => {
        #[test]
        fn $test() {
            let report = $crate::run_bound_suite($engine).unwrap();
            assert_eq!(report.engine, $engine);
            assert_eq!(report.summary.total, $crate::xpath_cases().len());
            assert_eq!(report.summary.skipped, 0);
            assert!(
                report.summary.passed == report.summary.total,
                "{}",
                report.to_markdown()
            );
        }
    };
}
