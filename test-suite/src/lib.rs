//! Golden tests for the FLISP generator.
//!
//! Every directory under `cases/` holding an `input.flisp` is one case. The
//! input is parsed and generated with the default configuration, then
//! compared against either:
//! - `expected/<file>`: every generated file, byte for byte, or
//! - `error.txt`: the message of the error the input must fail with.

use std::path::{Path, PathBuf};

pub mod runner;

pub use runner::TestRunner;

/// File name of a case's input meta file.
pub const INPUT_FILE: &str = "input.flisp";
/// Directory holding a case's expected output files.
pub const EXPECTED_DIR: &str = "expected";
/// File holding a case's expected error message.
pub const ERROR_FILE: &str = "error.txt";

/// The `cases` directory shipped with this crate.
pub fn cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("cases")
}

/// The result of running all test cases
#[derive(Debug)]
pub struct TestResults {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<TestFailure>,
}

impl TestResults {
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    pub fn add_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn add_failure(&mut self, failure: TestFailure) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

impl Default for TestResults {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct TestFailure {
    pub test_name: String,
    pub error: String,
}

impl TestFailure {
    pub fn new(test_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            error: error.into(),
        }
    }
}
