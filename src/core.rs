//! # Core Module / 核心模块
//!
//! This module contains the core functionality of fabric-runner,
//! including the typed test-case model, the table loader, and the
//! sequential test engine.
//!
//! 此模块包含 fabric-runner 的核心功能，
//! 包括类型化的测试用例模型、表格加载器和顺序测试引擎。

pub mod config;
pub mod engine;
pub mod loader;
pub mod models;

// Re-exports
pub use self::config::{RunConfig, TestCase};
pub use self::engine::run_cases;
pub use self::models::RunResult;
