//! Custom test runner for the FLISP golden cases.
//!
//! This binary runs all test cases and reports results in a friendly format:
//! - PASS basic
//! - FAIL errors/unclosed

use clap::Parser;
use test_suite::{TestRunner, cases_dir};

#[derive(Parser)]
#[command(name = "test-suite", about = "FLISP golden test runner")]
struct Args {
    /// Filter tests by name pattern (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Show only the first line of each failure
    #[arg(short, long)]
    short: bool,
}

/// ANSI color codes
mod colors {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

fn main() {
    let args = Args::parse();
    let exit_code = run(&args);
    std::process::exit(exit_code);
}

fn run(args: &Args) -> i32 {
    println!(
        "\n{}{}FLISP Test Suite{}",
        colors::BOLD,
        colors::CYAN,
        colors::RESET
    );
    println!("{}{}", colors::DIM, "=".repeat(50));
    println!("{}\n", colors::RESET);

    let runner = TestRunner::new(cases_dir()).with_filter(args.filter.clone());
    let cases = match runner.discover_cases() {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!(
                "{}{}Error:{} Failed to collect test cases: {:#}",
                colors::BOLD,
                colors::RED,
                colors::RESET,
                e
            );
            return 1;
        }
    };

    if cases.is_empty() {
        println!(
            "{}{}Warning:{} No test cases found{}",
            colors::BOLD,
            colors::YELLOW,
            colors::RESET,
            if args.filter.is_some() {
                " matching filter"
            } else {
                ""
            }
        );
        return 0;
    }

    let results = match runner.run_all() {
        Ok(results) => results,
        Err(e) => {
            eprintln!(
                "{}{}Error:{} {:#}",
                colors::BOLD,
                colors::RED,
                colors::RESET,
                e
            );
            return 1;
        }
    };

    for case in &cases {
        let name = runner.case_name(case);
        let failed = results.failures.iter().any(|f| f.test_name == name);
        let (status, color) = if failed {
            ("FAIL", colors::RED)
        } else {
            ("PASS", colors::GREEN)
        };
        println!("  {}{}{}{} {}", colors::BOLD, color, status, colors::RESET, name);
    }

    println!("\n{}{}Summary{}", colors::BOLD, colors::CYAN, colors::RESET);
    println!("{}{}", colors::DIM, "-".repeat(50));
    println!("{}", colors::RESET);
    println!(
        "  Cases: {} passed, {} failed, {} total",
        results.passed, results.failed, results.total
    );

    if !results.failures.is_empty() {
        println!("\n{}{}Failures{}", colors::BOLD, colors::RED, colors::RESET);
        println!("{}{}", colors::DIM, "-".repeat(50));
        println!("{}", colors::RESET);

        for failure in &results.failures {
            println!(
                "\n  {}{}{}{}",
                colors::BOLD,
                colors::RED,
                failure.test_name,
                colors::RESET
            );
            let text = if args.short {
                failure.error.lines().next().unwrap_or_default()
            } else {
                failure.error.as_str()
            };
            // Indent all lines
            for line in text.lines() {
                println!("    {}", line);
            }
        }
    }

    println!();
    if results.is_success() {
        println!(
            "{}{}All tests passed!{}",
            colors::BOLD,
            colors::GREEN,
            colors::RESET
        );
        0
    } else {
        println!(
            "{}{}{} test(s) failed.{}",
            colors::BOLD,
            colors::RED,
            results.failed,
            colors::RESET
        );
        1
    }
}
