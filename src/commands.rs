//! # Commands Module / 命令模块
//!
//! The CLI subcommands: `run` executes the diagnostics, `init` creates the
//! configuration (and optionally a starter table).
//!
//! CLI 子命令：`run` 执行诊断，`init` 创建配置（以及可选的初始表格）。

pub mod init;
pub mod run;
