//! # Runner Initialization Module / 运行器初始化模块
//!
//! This module creates a `FabricRunner.toml` through an interactive wizard:
//! table path, target server address, and the fail-fast setting. It can also
//! write a starter CSV table containing the standard libfabric checks, so a
//! fresh host can be probed without authoring a spreadsheet first.
//!
//! 此模块通过交互式向导创建 `FabricRunner.toml`：表格路径、目标服务器地址
//! 和 fail-fast 设置。它还可以生成包含标准 libfabric 检查项的初始 CSV 表格，
//! 让新主机无需先编写电子表格即可进行探测。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::{
    DEFAULT_SERVER_ADDR, DEFAULT_TABLE, MatchMode, RunnerConfig, TestCase,
};
use crate::core::loader::ADDR_SENTINEL;
use crate::t;

/// Runs the wizard (or, non-interactively, writes the defaults) and creates
/// `FabricRunner.toml` in the current directory.
///
/// 运行向导（或在非交互模式下写入默认值），并在当前目录创建
/// `FabricRunner.toml`。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("FabricRunner.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init.welcome", locale = language).cyan().bold());
        println!("{}", t!("init.description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(
                t!(
                    "init.overwrite_prompt",
                    locale = language,
                    path = config_path.display()
                )
                .to_string(),
            )
            .default(false)
            .interact()
            .context(t!("init.confirm_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init.aborted", locale = language));
            return Ok(());
        }
    }

    if non_interactive {
        let config = RunnerConfig {
            table: Some(PathBuf::from(DEFAULT_TABLE)),
            server_addr: Some(DEFAULT_SERVER_ADDR.to_string()),
            tests: Vec::new(),
            fail_fast: false,
            language: Some(language.to_string()),
        };
        return write_config(config_path, &config, language);
    }

    // Interactive part starts here
    let table: String = Input::with_theme(&theme)
        .with_prompt(t!("init.table_prompt", locale = language).to_string())
        .default(DEFAULT_TABLE.to_string())
        .interact_text()?;

    let server_addr: String = Input::with_theme(&theme)
        .with_prompt(t!("init.server_prompt", locale = language).to_string())
        .default(DEFAULT_SERVER_ADDR.to_string())
        .interact_text()?;

    let fail_fast = Confirm::with_theme(&theme)
        .with_prompt(t!("init.fail_fast_prompt", locale = language).to_string())
        .default(false)
        .interact()
        .context(t!("init.confirm_failed", locale = language).to_string())?;

    let write_starter = Confirm::with_theme(&theme)
        .with_prompt(t!("init.starter_prompt", locale = language).to_string())
        .default(true)
        .interact()
        .context(t!("init.confirm_failed", locale = language).to_string())?;

    if write_starter {
        let starter_path = starter_table_path(&table);
        write_starter_table(&starter_path)?;
        println!(
            "{} {}",
            "✔".green(),
            t!(
                "init.starter_written",
                locale = language,
                path = starter_path.display()
            )
        );
        if starter_path != PathBuf::from(&table) {
            println!(
                "{}",
                t!(
                    "init.starter_hint",
                    locale = language,
                    path = starter_path.display()
                )
            );
        }
    }

    let config = RunnerConfig {
        table: Some(PathBuf::from(table)),
        server_addr: Some(server_addr),
        tests: Vec::new(),
        fail_fast,
        language: Some(language.to_string()),
    };
    write_config(config_path, &config, language)
}

/// The starter table lands at the configured path when that path is already
/// a CSV, otherwise next to it as `libfabric.csv`.
fn starter_table_path(configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        path
    } else {
        PathBuf::from("libfabric.csv")
    }
}

/// The standard libfabric diagnostics: the library itself, the three common
/// providers, and the pingpong round-trip against the target server.
/// 标准 libfabric 诊断项：库本身、三个常见 provider，
/// 以及针对目标服务器的 pingpong 往返。
fn starter_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "verify-libfabric-present".to_string(),
            command: "fi_info --version".to_string(),
            expected: "libfabric".to_string(),
            match_mode: MatchMode::Pattern,
            hw_specific: false,
            needs_server: false,
            server_command: None,
            skip_message: None,
        },
        TestCase {
            name: "provider-tcp".to_string(),
            command: "fi_info -p tcp".to_string(),
            expected: "provider: tcp".to_string(),
            match_mode: MatchMode::Pattern,
            hw_specific: false,
            needs_server: false,
            server_command: None,
            skip_message: None,
        },
        TestCase {
            name: "provider-sockets".to_string(),
            command: "fi_info -p sockets".to_string(),
            expected: "provider: sockets".to_string(),
            match_mode: MatchMode::Pattern,
            hw_specific: false,
            needs_server: false,
            server_command: None,
            skip_message: None,
        },
        TestCase {
            name: "provider-verbs".to_string(),
            command: "fi_info -p verbs".to_string(),
            expected: "provider: verbs".to_string(),
            match_mode: MatchMode::Pattern,
            hw_specific: true,
            needs_server: false,
            server_command: None,
            skip_message: Some("verbs provider is not available on virtual machines".to_string()),
        },
        TestCase {
            name: "pingpong".to_string(),
            command: format!("fi_pingpong -e msg -p tcp {ADDR_SENTINEL}"),
            expected: "bytes".to_string(),
            match_mode: MatchMode::Pattern,
            hw_specific: false,
            needs_server: true,
            server_command: Some("fi_pingpong -e msg -p tcp".to_string()),
            skip_message: None,
        },
    ]
}

fn write_starter_table(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create starter table: {}", path.display()))?;
    for case in starter_cases() {
        writer
            .serialize(case)
            .with_context(|| format!("failed to write starter table: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write starter table: {}", path.display()))?;
    Ok(())
}

fn write_config(path: &Path, config: &RunnerConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init.serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string).with_context(|| {
        t!("init.write_failed", locale = language, path = path.display()).to_string()
    })?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!(
            "init.success_created",
            locale = language,
            path = path.display()
        )
        .bold()
    );
    println!("{}", t!("init.usage_hint", locale = language));

    Ok(())
}
