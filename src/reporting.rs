//! # Reporting Module / 报告模块
//!
//! Console progress and summary output for test runs.
//!
//! 测试运行的控制台进度与摘要输出。

pub mod console;

// Re-export common reporting functions
pub use self::console::{print_case_banner, print_case_outcome, print_summary};
