//! # Test Engine Module / 测试执行引擎模块
//!
//! The sequential run loop. Each case goes through four mutually exclusive
//! branches: the hardware-specific skip, the companion-server setup, the
//! match evaluation, and the bookkeeping that feeds the run result and the
//! log. Tests run one at a time, in table order; the only extra process is
//! the per-case companion server.
//!
//! 顺序执行的运行循环。每个用例经过四个互斥的分支：硬件相关跳过、
//! 伴随服务器准备、匹配判定，以及写入运行结果和日志的记账。
//! 测试按表格顺序逐个运行；唯一的额外进程是每用例的伴随服务器。

use anyhow::Result;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::core::config::{MatchMode, TestCase};
use crate::core::models::{CaseOutcome, RunResult, RunStatus};
use crate::infra::command::{self, ServerGuard};
use crate::infra::logfile::RunLog;
use crate::reporting::console;

/// Per-run knobs supplied by the caller. The host name is injected rather
/// than probed here so the hardware-skip branch is testable.
/// 调用方提供的运行参数。主机名由外部注入而非在此探测，
/// 以便硬件跳过分支可测试。
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Stop the run right after the first failing case.
    /// 在第一个失败用例之后立即停止运行。
    pub fail_fast: bool,
    /// The current host's name, matched against the "vm" pattern.
    /// 当前主机名，用于匹配 "vm" 模式。
    pub host_name: String,
}

/// Mutable state for one run: the log sink and the counters. Constructed at
/// run start, threaded through the loop, finalized into a [`RunResult`].
/// 单次运行的可变状态：日志接收器与计数器。运行开始时构造，
/// 贯穿循环传递，最终定稿为 [`RunResult`]。
struct RunContext {
    log: RunLog,
    passed: usize,
    failed: usize,
    failed_tests: Vec<String>,
}

impl RunContext {
    fn new(log: RunLog) -> Self {
        Self {
            log,
            passed: 0,
            failed: 0,
            failed_tests: Vec::new(),
        }
    }

    /// Counts the outcome and appends its log entry. Every executed case is
    /// recorded, never silently dropped.
    fn record(&mut self, case: &TestCase, outcome: &CaseOutcome) -> Result<()> {
        if outcome.is_pass() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failed_tests.push(case.name.clone());
        }
        self.log.append(
            outcome.label(),
            outcome.note(),
            &case.name,
            &case.command,
            outcome.output(),
        )
    }

    fn finish(self, total: usize, status: RunStatus) -> RunResult {
        RunResult {
            total,
            passed: self.passed,
            failed: self.failed,
            failed_tests: self.failed_tests,
            log_path: self.log.path().to_path_buf(),
            status,
        }
    }
}

/// Runs every case in order and produces the final [`RunResult`].
///
/// The returned status distinguishes a completed run from one stopped early
/// by fail-fast or by an interrupt; stopping is an ordinary return value,
/// not an error. The only `Err` here is a failure to write the log.
///
/// 按顺序运行每个用例并产出最终的 [`RunResult`]。
/// 返回的状态区分正常完成与因 fail-fast 或中断而提前停止的运行；
/// 提前停止是普通返回值而非错误。此处唯一的 `Err` 是日志写入失败。
pub async fn run_cases(
    cases: &[TestCase],
    opts: &RunOptions,
    log: RunLog,
    stop: &CancellationToken,
) -> Result<RunResult> {
    let mut ctx = RunContext::new(log);
    let mut status = RunStatus::Completed;

    for case in cases {
        // The in-flight command is never interrupted; the token is only
        // checked between cases.
        // 进行中的命令不会被打断；令牌只在用例之间检查。
        if stop.is_cancelled() {
            status = RunStatus::Interrupted;
            break;
        }

        console::print_case_banner(&case.name);
        let outcome = run_case(case, opts).await;
        console::print_case_outcome(&outcome);
        ctx.record(case, &outcome)?;

        if opts.fail_fast && !outcome.is_pass() {
            status = RunStatus::Stopped {
                case: case.name.clone(),
            };
            break;
        }
    }

    Ok(ctx.finish(cases.len(), status))
}

/// Evaluates a single case. Per-case problems (a command that cannot start,
/// a server that cannot spawn) become a FAIL outcome, never an error.
async fn run_case(case: &TestCase, opts: &RunOptions) -> CaseOutcome {
    if case.hw_specific && opts.host_name.to_ascii_lowercase().contains("vm") {
        // Known-absent hardware on virtual machines. No command runs, and
        // nothing is logged as output.
        // 虚拟机上已知缺失的硬件。不运行命令，也不记录任何输出。
        let note = case
            .skip_message
            .clone()
            .unwrap_or_else(|| "hardware not expected on this host".to_string());
        return CaseOutcome::Skipped { note };
    }

    let server = match &case.server_command {
        Some(spec) if case.needs_server => match ServerGuard::start(spec) {
            Ok(guard) => Some(guard),
            Err(e) => return CaseOutcome::Failed {
                output: format!("{e:#}"),
            },
        },
        _ => None,
    };

    let outcome = execute_and_match(case).await;

    // Unconditional teardown, even when the comparison failed.
    // 无条件清理，即使比较结果为失败。
    if let Some(guard) = server {
        guard.stop().await;
    }

    outcome
}

async fn execute_and_match(case: &TestCase) -> CaseOutcome {
    let cmd = match command::shell(&case.command) {
        Ok(cmd) => cmd,
        Err(e) => {
            return CaseOutcome::Failed {
                output: format!("{e:#}"),
            };
        }
    };

    let (status, output) = command::spawn_and_capture(cmd).await;
    if let Err(e) = status {
        return CaseOutcome::Failed {
            output: format!("failed to execute command: {e}"),
        };
    }

    let trimmed = output.trim();
    if output_matches(&case.expected, case.match_mode, trimmed) {
        CaseOutcome::Passed {
            output: trimmed.to_string(),
        }
    } else {
        CaseOutcome::Failed {
            output: trimmed.to_string(),
        }
    }
}

/// The comparison itself. Exact mode trims both sides and requires
/// equality; pattern mode searches anywhere in the output, compiling the
/// expected value as a regex and degrading to a plain substring search when
/// it is not one.
pub fn output_matches(expected: &str, mode: MatchMode, output: &str) -> bool {
    match mode {
        MatchMode::Exact => output == expected.trim(),
        MatchMode::Pattern => match Regex::new(expected) {
            Ok(re) => re.is_match(output),
            Err(_) => output.contains(expected),
        },
    }
}
