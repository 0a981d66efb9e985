// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::{commands, t};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    let requested = args
        .iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1).cloned())
        // Fallback to system language detection
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());

    // Match the full locale first (e.g. "zh-CN"), then just the language
    // code (e.g. "en" from "en-US"), finally fall back to "en".
    let available = rust_i18n::available_locales!();
    if available.contains(&requested.as_str()) {
        requested
    } else {
        requested
            .split('-')
            .next()
            .filter(|code| available.contains(code))
            .unwrap_or("en")
            .to_string()
    }
}

fn build_cli(locale: &str) -> Command {
    Command::new("fabric-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("table")
                        .short('t')
                        .long("table")
                        .help(t!("arg_table", locale = locale).to_string())
                        .value_name("TABLE")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("server-addr")
                        .short('s')
                        .long("server-addr")
                        .help(t!("arg_server_addr", locale = locale).to_string())
                        .value_name("ADDRESS")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("test")
                        .short('T')
                        .long("test")
                        .help(t!("arg_test", locale = locale).to_string())
                        .value_name("NAME")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help(t!("arg_fail_fast", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help(t!("arg_config", locale = locale).to_string())
                        .value_name("CONFIG")
                        .default_value("FabricRunner.toml")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let table = run_matches.get_one::<PathBuf>("table").cloned();
            let server_addr = run_matches.get_one::<String>("server-addr").cloned();
            let tests = run_matches
                .get_many::<String>("test")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let fail_fast = run_matches.get_flag("fail-fast");
            let config = run_matches
                .get_one::<PathBuf>("config")
                .unwrap() // Has default
                .clone();

            commands::run::execute(table, server_addr, tests, fail_fast, config).await?;
        }
        Some(("init", init_matches)) => {
            let non_interactive = init_matches.get_flag("non-interactive");
            commands::init::run_init_wizard(&language, non_interactive)?;
        }
        _ => {
            // No subcommand given; clap has already printed the help text.
        }
    }
    Ok(())
}
