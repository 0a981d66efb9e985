//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for fabric-runner:
//! shell command execution, the run log artifact, the hostname probe,
//! and i18n support.
//!
//! 此模块为 fabric-runner 提供基础设施服务：
//! shell 命令执行、运行日志产物、主机名探测和国际化支持。

pub mod command;
pub mod host;
pub mod logfile;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
