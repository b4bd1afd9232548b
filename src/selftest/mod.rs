// nmimgr/src/selftest/mod.rs

//! # Self Tests
//!
//! A small runner the embedding kernel can call at boot to check the
//! parser, the classifier and the registration manager on the target
//! itself, where the unit tests cannot run. Results go through the crate's
//! log macros.

pub mod classifier_test;
pub mod doubles;
pub mod registration_test;

#[cfg(test)]
pub(crate) mod capture;

use crate::{nmi_err, nmi_notice, nmi_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl TestResult {
    /// `Pass` when `ok` holds, `Fail` otherwise.
    pub fn check(ok: bool) -> Self {
        if ok {
            TestResult::Pass
        } else {
            TestResult::Fail
        }
    }
}

pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
    pub description: &'static str,
}

pub struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
}

impl TestRunner {
    pub const fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        }
    }

    pub fn run_test(&mut self, test: &TestCase) {
        self.total += 1;
        nmi_notice!("Running test: {} - {}", test.name, test.description);

        match (test.func)() {
            TestResult::Pass => {
                self.passed += 1;
                nmi_notice!("  [PASS] {}", test.name);
            }
            TestResult::Fail => {
                self.failed += 1;
                nmi_err!("  [FAIL] {}", test.name);
            }
            TestResult::Skip => {
                self.skipped += 1;
                nmi_warn!("  [SKIP] {}", test.name);
            }
        }
    }

    pub fn run_suite(&mut self, suite_name: &str, tests: &[TestCase]) {
        nmi_notice!("=== {} Test Suite ===", suite_name);
        for test in tests {
            self.run_test(test);
        }
        nmi_notice!("=== {} Test Suite Complete ===", suite_name);
    }

    pub fn print_summary(&self) {
        nmi_notice!(
            "Self tests: {} total, {} passed, {} failed, {} skipped",
            self.total, self.passed, self.failed, self.skipped
        );
        if self.failed > 0 {
            nmi_err!("{} self tests failed", self.failed);
        }
    }

    /// No failure and at least one test run. Skips do not count as failures.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total > 0
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs every suite and reports whether all of them passed.
pub fn run_all_tests() -> bool {
    let mut runner = TestRunner::new();

    parser_test::run_parser_tests(&mut runner);
    classifier_test::run_classifier_tests(&mut runner);
    registration_test::run_registration_tests(&mut runner);

    runner.print_summary();
    runner.all_passed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_tests_pass_on_the_host() {
        assert!(run_all_tests());
    }

    #[test]
    fn runner_counts_outcomes() {
        fn pass() -> TestResult {
            TestResult::Pass
        }
        fn fail() -> TestResult {
            TestResult::Fail
        }
        fn skip() -> TestResult {
            TestResult::Skip
        }
        let cases = [
            TestCase { name: "pass", func: pass, description: "passes" },
            TestCase { name: "fail", func: fail, description: "fails" },
            TestCase { name: "skip", func: skip, description: "skips" },
        ];

        let mut runner = TestRunner::new();
        assert!(!runner.all_passed());
        runner.run_suite("Outcomes", &cases[..1]);
        runner.run_test(&cases[2]);
        assert!(runner.all_passed());
        assert_eq!(runner.skipped(), 1);
        runner.run_test(&cases[1]);
        assert!(!runner.all_passed());
        assert_eq!(runner.failed(), 1);
    }
}
