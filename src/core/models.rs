//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! per-test outcomes, the run status, and the final run result.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 每个测试的结果、运行状态以及最终的运行结果。

use std::path::PathBuf;

/// The outcome of a single test case.
/// 单个测试用例的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The command ran and its output matched the expected value.
    /// 命令已运行且输出与期望值匹配。
    Passed {
        /// The trimmed, combined output of the command / 命令裁剪后的合并输出
        output: String,
    },
    /// The hardware-specific branch passed the case without executing it.
    /// 硬件相关分支未执行命令即判定通过。
    Skipped {
        /// The configured skip message / 配置的跳过消息
        note: String,
    },
    /// The command ran and its output did not match, or it could not be
    /// started at all.
    /// 命令已运行但输出不匹配，或命令根本无法启动。
    Failed {
        /// The trimmed output, or the spawn error text / 裁剪后的输出或启动错误文本
        output: String,
    },
}

impl CaseOutcome {
    /// A skipped case counts as a pass; only `Failed` counts against the run.
    pub fn is_pass(&self) -> bool {
        !matches!(self, CaseOutcome::Failed { .. })
    }

    /// The stable label written to the log file and the console.
    pub fn label(&self) -> &'static str {
        if self.is_pass() { "PASS" } else { "FAIL" }
    }

    /// The skip note, if the case was passed without execution.
    pub fn note(&self) -> Option<&str> {
        match self {
            CaseOutcome::Skipped { note } => Some(note),
            _ => None,
        }
    }

    /// The captured command output. `None` for skipped cases, which never
    /// executed anything.
    pub fn output(&self) -> Option<&str> {
        match self {
            CaseOutcome::Passed { output } | CaseOutcome::Failed { output } => Some(output),
            CaseOutcome::Skipped { .. } => None,
        }
    }
}

/// How the run loop ended.
/// 运行循环的结束方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every case in the table was executed.
    /// 表格中的每个用例都已执行。
    Completed,
    /// Fail-fast was set and the named case failed; later cases never ran.
    /// 设置了 fail-fast 且指定用例失败；之后的用例未运行。
    Stopped {
        /// The name of the failing case / 失败用例的名称
        case: String,
    },
    /// An interrupt was observed between cases.
    /// 在用例之间观察到中断信号。
    Interrupted,
}

/// The final result of a run. Mutated incrementally by the engine's
/// `RunContext` and finalized when the loop ends.
/// 单次运行的最终结果。由引擎的 `RunContext` 增量更新，循环结束时定稿。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// The number of cases in the (possibly filtered) table.
    /// （可能经过筛选的）表格中的用例数量。
    pub total: usize,
    /// Cases that passed, including hardware skips / 通过的用例数，含硬件跳过
    pub passed: usize,
    /// Cases that failed / 失败的用例数
    pub failed: usize,
    /// Names of the failed cases, in execution order / 失败用例的名称，按执行顺序
    pub failed_tests: Vec<String>,
    /// Where the full log was written / 完整日志的写入位置
    pub log_path: PathBuf,
    /// How the run ended / 运行的结束方式
    pub status: RunStatus,
}

impl RunResult {
    /// The number of cases actually executed. Always `passed + failed`;
    /// cases skipped by an early stop are counted in neither.
    pub fn executed(&self) -> usize {
        self.passed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, RunStatus::Completed)
    }
}
