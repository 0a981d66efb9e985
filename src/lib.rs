//! # Fabric Runner Library / Fabric Runner 库
//!
//! This library provides the core functionality for the fabric-runner tool,
//! a table-driven diagnostics runner for libfabric's command-line utilities.
//! Test cases are loaded from a spreadsheet or CSV table, executed one at a
//! time through a shell, compared against their expected output, and logged
//! to a per-run artifact.
//!
//! 此库为 fabric-runner 工具提供核心功能，
//! 这是一个基于表格驱动的 libfabric 命令行工具诊断运行器。
//! 测试用例从电子表格或 CSV 表格加载，逐个通过 shell 执行，
//! 与期望输出比较，并记录到每次运行的日志产物中。
//!
//! ## Modules / 模块
//!
//! - `core` - Test-case model, table loader, and the sequential engine
//! - `infra` - Infrastructure services: command execution, the run log, host probe
//! - `reporting` - Console progress and summary output
//! - `cli` - Command-line interface
//! - `commands` - The `run` and `init` subcommands
//!
//! - `core` - 测试用例模型、表格加载器和顺序引擎
//! - `infra` - 基础设施服务：命令执行、运行日志、主机探测
//! - `reporting` - 控制台进度与摘要输出
//! - `cli` - 命令行接口
//! - `commands` - `run` 与 `init` 子命令

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use self::core::config;
pub use self::core::engine;
pub use self::core::loader;
pub use self::core::models;
pub use rust_i18n::t;

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
