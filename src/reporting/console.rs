//! # Console Reporting Module / 控制台报告模块
//!
//! Live progress lines and the end-of-run summary. Pure output; all
//! decisions are the engine's.
//!
//! 实时进度行与运行结束摘要。纯输出；所有判定都由引擎完成。

use colored::*;

use crate::core::models::{CaseOutcome, RunResult};
use crate::infra::t;

const BANNER: &str = "===========================================================";

/// Prints the separator and test name before a case is executed.
pub fn print_case_banner(name: &str) {
    println!("{BANNER}");
    println!("{}", name.cyan());
}

/// Prints the PASS/FAIL line after a case has been evaluated. Hardware
/// skips show their note next to the label.
pub fn print_case_outcome(outcome: &CaseOutcome) {
    let line = match outcome.note() {
        Some(note) => format!("{} | {}", outcome.label(), note),
        None => outcome.label().to_string(),
    };
    if outcome.is_pass() {
        println!("{}", line.green());
    } else {
        println!("{}", line.red());
    }
}

/// Prints the final summary: totals, the failed test names, and where the
/// full log was written.
///
/// 打印最终摘要：总数、失败的测试名称，以及完整日志的写入位置。
///
/// # Output Format / 输出格式
/// ```text
/// --- Diagnostics Summary ---
/// Tests considered: 5
/// Passed: 4
/// Failed: 1
/// Failed tests: provider-verbs
/// Full log written to: /tmp/fabric_runner_09_41_06_08_2026.log
/// ```
pub fn print_summary(result: &RunResult, locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());
    println!("{}", t!("report.total", locale = locale, count = result.total));
    println!(
        "{}",
        t!("report.passed", locale = locale, count = result.passed).green()
    );
    println!(
        "{}",
        t!("report.failed", locale = locale, count = result.failed).red()
    );
    if !result.failed_tests.is_empty() {
        println!(
            "{}",
            t!(
                "report.failed_tests",
                locale = locale,
                names = result.failed_tests.join(", ")
            )
            .red()
        );
    }
    println!(
        "{}",
        t!(
            "report.log_path",
            locale = locale,
            path = result.log_path.display()
        )
    );
}
