//! # Run Log Module / 运行日志模块
//!
//! The append-only log artifact. One file per run, named with the run-start
//! timestamp, written immediately after each test with no buffering.
//!
//! 仅追加的日志产物。每次运行一个文件，以运行开始时间戳命名，
//! 每个测试结束后立即写入，不做缓冲。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SEP_HEAVY: &str = "===============================================";
const SEP_LIGHT: &str = "------------------------------------------------";

/// The run's log sink. Opened once at run start, appended to throughout,
/// and closed implicitly at process exit.
/// 运行的日志接收器。运行开始时打开一次，全程追加写入，进程退出时隐式关闭。
pub struct RunLog {
    file: File,
    path: PathBuf,
}

impl RunLog {
    /// Creates the log file in `dir`, named with the current local time.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let name = format!("fabric_runner_{}.log", Local::now().format("%H_%M_%d_%m_%Y"));
        let path = dir.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file: {}", path.display()))?;
        Ok(Self { file, path })
    }

    /// Creates the log file at the fixed temporary-directory location.
    pub fn in_temp_dir() -> Result<Self> {
        Self::create_in(&std::env::temp_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one block for an executed (or skipped) test. Skipped tests
    /// pass `None` for `output`: no command ran, so no output is logged.
    ///
    /// 为一个已执行（或已跳过）的测试追加一个日志块。
    /// 跳过的测试传入 `None` 作为 `output`：命令未运行，因此不记录输出。
    pub fn append(
        &mut self,
        label: &str,
        note: Option<&str>,
        name: &str,
        command: &str,
        output: Option<&str>,
    ) -> Result<()> {
        let mut block = match note {
            Some(note) => format!("{label} | {note} | {name}\n"),
            None => format!("{label} | {name}\n"),
        };
        block.push_str(SEP_HEAVY);
        block.push_str("\n\n");
        block.push_str(command);
        block.push('\n');
        block.push_str(SEP_LIGHT);
        block.push('\n');
        if let Some(output) = output {
            block.push('\n');
            block.push_str(output);
            block.push('\n');
            block.push_str(SEP_LIGHT);
            block.push('\n');
        }

        self.file
            .write_all(block.as_bytes())
            .and_then(|_| self.file.flush())
            .with_context(|| format!("failed to write log file: {}", self.path.display()))
    }
}
