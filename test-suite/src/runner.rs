use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use flisp_gen::{GenConfig, NewlineStyle, OutputFile, generate};
use flisp_parser::parse_meta;
use similar::{ChangeTag, TextDiff};

use crate::{ERROR_FILE, EXPECTED_DIR, INPUT_FILE, TestFailure, TestResults};

pub struct TestRunner {
    cases_dir: PathBuf,
    filter: Option<String>,
}

impl TestRunner {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
            filter: None,
        }
    }

    /// Only run cases whose name contains `filter`.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Discover and run all test cases
    pub fn run_all(&self) -> Result<TestResults> {
        let mut results = TestResults::new();

        for case_dir in self.discover_cases()? {
            let name = self.case_name(&case_dir);
            match self.run_case(&case_dir) {
                Ok(()) => results.add_pass(),
                Err(e) => results.add_failure(TestFailure::new(name, format!("{e:#}"))),
            }
        }

        Ok(results)
    }

    /// Case name relative to the cases directory, e.g. `errors/unclosed`.
    pub fn case_name(&self, case_dir: &Path) -> String {
        case_dir
            .strip_prefix(&self.cases_dir)
            .unwrap_or(case_dir)
            .display()
            .to_string()
    }

    /// Discover all directories holding an input file, sorted by path
    pub fn discover_cases(&self) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        self.walk_directory(&self.cases_dir, &mut dirs)?;
        dirs.sort();
        if let Some(filter) = &self.filter {
            dirs.retain(|dir| self.case_name(dir).contains(filter.as_str()));
        }
        Ok(dirs)
    }

    fn walk_directory(&self, dir: &Path, dirs: &mut Vec<PathBuf>) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }
        if dir.join(INPUT_FILE).is_file() {
            dirs.push(dir.to_path_buf());
            return Ok(());
        }

        for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {dir:?}"))? {
            let path = entry?.path();
            if path.is_dir() {
                self.walk_directory(&path, dirs)?;
            }
        }

        Ok(())
    }

    /// Run a single test case
    fn run_case(&self, case_dir: &Path) -> Result<()> {
        let input_path = case_dir.join(INPUT_FILE);
        let input = fs::read_to_string(&input_path)
            .with_context(|| format!("Failed to read test file: {input_path:?}"))?;
        let error_path = case_dir.join(ERROR_FILE);

        // Parse and layout errors both end a case early
        let outcome = parse_meta(&input).map_err(|e| e.to_string()).and_then(|spec| {
            generate(&spec, &GenConfig::default()).map_err(|e| e.to_string())
        });

        if error_path.is_file() {
            let expected = fs::read_to_string(&error_path)
                .with_context(|| format!("Failed to read {error_path:?}"))?;
            return match outcome {
                Ok(_) => bail!("Expected an error, but the input generated"),
                Err(message) => compare_text("error", expected.trim_end(), message.trim_end()),
            };
        }

        let files = outcome
            .map_err(anyhow::Error::msg)
            .context("Failed to generate input")?
            .into_files();
        self.compare_files(&case_dir.join(EXPECTED_DIR), &files)
    }

    fn compare_files(&self, expected_dir: &Path, files: &[OutputFile]) -> Result<()> {
        let mut expected_names = Vec::new();
        for entry in fs::read_dir(expected_dir)
            .with_context(|| format!("Failed to read {expected_dir:?}"))?
        {
            let entry = entry?;
            if entry.path().is_file() {
                expected_names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        expected_names.sort();

        let mut actual_names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        actual_names.sort();
        if expected_names != actual_names {
            bail!("File set mismatch.\nExpected: {expected_names:?}\nActual: {actual_names:?}");
        }

        for file in files {
            let path = expected_dir.join(&file.name);
            let expected = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {path:?}"))?;
            compare_text(&file.name, &expected, &file.contents(NewlineStyle::Lf))?;
        }
        Ok(())
    }
}

fn compare_text(name: &str, expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    let mut report = format!("{name} mismatch.\n");
    let diff = TextDiff::from_lines(expected, actual);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        report.push_str(sign);
        report.push_str(change.as_str().unwrap_or_default());
        if change.missing_newline() {
            report.push_str("\n\\ No newline at end of file\n");
        }
    }
    bail!(report)
}
