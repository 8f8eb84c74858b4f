//! Suite reports, per engine and across engines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runner::{TestOutcome, TestResult};

/// Counts over one suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub pass_rate: f64,
}

impl SuiteSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.outcome.is_pass()).count();
        let failed = results.iter().filter(|r| r.outcome.is_fail()).count();
        let errors = results.iter().filter(|r| r.outcome.is_error()).count();
        let skipped = results
            .iter()
            .filter(|r| matches!(r.outcome, TestOutcome::Skipped))
            .count();

        let ran = total - skipped;
        let pass_rate = if ran > 0 {
            (passed as f64 / ran as f64) * 100.0
        } else {
            0.0
        };

        Self {
            total,
            passed,
            failed,
            errors,
            skipped,
            pass_rate,
        }
    }

    /// Every case that ran passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// One case in a serialized report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub test_id: String,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_us: u64,
}

impl From<&TestResult> for CaseReport {
    fn from(r: &TestResult) -> Self {
        let (outcome, message) = match &r.outcome {
            TestOutcome::Pass => ("pass", None),
            TestOutcome::Fail(msg) => ("fail", Some(msg.clone())),
            TestOutcome::Error(msg) => ("error", Some(msg.clone())),
            TestOutcome::Skipped => ("skipped", None),
        };

        Self {
            test_id: r.test_id.clone(),
            outcome: outcome.to_string(),
            message,
            duration_us: r.duration.as_micros() as u64,
        }
    }
}

/// The suite run under one engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub engine: String,
    pub suite: String,
    pub timestamp: DateTime<Utc>,
    pub summary: SuiteSummary,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn new(engine: &str, suite: &str, results: &[TestResult]) -> Self {
        Self {
            engine: engine.to_string(),
            suite: suite.to_string(),
            timestamp: Utc::now(),
            summary: SuiteSummary::from_results(results),
            cases: results.iter().map(CaseReport::from).collect(),
        }
    }

    /// Cases that failed or errored
    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases
            .iter()
            .filter(|c| c.outcome == "fail" || c.outcome == "error")
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {} on {}\n\n", self.suite, self.engine));
        md.push_str(&format!(
            "**Date:** {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("| Metric | Count |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", self.summary.total));
        md.push_str(&format!("| Passed | {} |\n", self.summary.passed));
        md.push_str(&format!("| Failed | {} |\n", self.summary.failed));
        md.push_str(&format!("| Errors | {} |\n", self.summary.errors));
        md.push_str(&format!("| Skipped | {} |\n", self.summary.skipped));
        md.push_str(&format!(
            "| **Pass Rate** | **{:.2}%** |\n\n",
            self.summary.pass_rate
        ));

        let failures: Vec<_> = self.failures().collect();
        if failures.is_empty() {
            md.push_str("No failed cases.\n");
        } else {
            md.push_str("## Failed Cases\n\n");
            md.push_str("| Case | Outcome | Message |\n");
            md.push_str("|------|---------|---------|\n");
            for c in failures {
                md.push_str(&format!(
                    "| {} | {} | {} |\n",
                    c.test_id,
                    c.outcome,
                    c.message.as_deref().unwrap_or("-").replace('|', "\\|")
                ));
            }
        }

        md
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One engine's line in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSummary {
    pub name: String,
    pub passed: usize,
    pub total: usize,
    pub pass_rate: f64,
}

/// The same suite run under several engines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub suite: String,
    pub timestamp: DateTime<Utc>,
    pub engines: Vec<EngineSummary>,
    /// Cases whose outcome differs between engines
    pub divergent: Vec<String>,
}

impl ComparisonReport {
    pub fn to_markdown(&self) -> String {
        let mut md = format!("# {} engine comparison\n\n", self.suite);
        md.push_str("| Engine | Passed | Total | Pass Rate |\n");
        md.push_str("|--------|--------|-------|-----------|\n");
        for e in &self.engines {
            md.push_str(&format!(
                "| {} | {} | {} | {:.2}% |\n",
                e.name, e.passed, e.total, e.pass_rate
            ));
        }
        if !self.divergent.is_empty() {
            md.push_str("\nDivergent cases:\n\n");
            for id in &self.divergent {
                md.push_str(&format!("- {}\n", id));
            }
        }
        md
    }
}

/// Compare reports of the same suite from several engines
pub fn compare_reports(reports: &[SuiteReport]) -> ComparisonReport {
    let suite = reports.first().map(|r| r.suite.clone()).unwrap_or_default();

    let engines = reports
        .iter()
        .map(|r| EngineSummary {
            name: r.engine.clone(),
            passed: r.summary.passed,
            total: r.summary.total,
            pass_rate: r.summary.pass_rate,
        })
        .collect();

    let mut divergent = Vec::new();
    if let Some((first, rest)) = reports.split_first() {
        for case in &first.cases {
            let differs = rest.iter().any(|other| {
                other
                    .cases
                    .iter()
                    .find(|c| c.test_id == case.test_id)
                    .map_or(true, |c| c.outcome != case.outcome)
            });
            if differs {
                divergent.push(case.test_id.clone());
            }
        }
    }

    ComparisonReport {
        suite,
        timestamp: Utc::now(),
        engines,
        divergent,
    }
}
