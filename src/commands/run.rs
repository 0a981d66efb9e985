// src/commands/run.rs

use anyhow::Result;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{RunConfig, RunnerConfig},
        engine::{self, RunOptions},
        loader,
        models::RunStatus,
    },
    infra::{host, logfile::RunLog},
    reporting::print_summary,
    t,
};

pub async fn execute(
    table: Option<PathBuf>,
    server_addr: Option<String>,
    tests: Vec<String>,
    fail_fast: bool,
    config: PathBuf,
) -> Result<()> {
    let file_config = RunnerConfig::load(&config)?;
    let run_config = RunConfig::resolve(table, server_addr, tests, fail_fast, file_config);

    // A language set in the config file wins over the detected one.
    if let Some(language) = &run_config.language {
        rust_i18n::set_locale(language);
    }
    let current_locale = rust_i18n::locale().to_string();
    let locale = current_locale.as_str();

    println!(
        "{}",
        t!(
            "run.loading_table",
            locale = locale,
            path = run_config.table.display()
        )
    );
    println!(
        "{}",
        t!(
            "run.target_server",
            locale = locale,
            addr = run_config.server_addr
        )
    );

    let cases = loader::load_cases(&run_config.table, &run_config.server_addr, &run_config.tests)?;
    if cases.is_empty() {
        println!("{}", t!("run.no_cases", locale = locale));
        return Ok(());
    }
    println!(
        "{}",
        t!("run.cases_loaded", locale = locale, count = cases.len())
    );
    println!(
        "{}",
        t!("run.host", locale = locale, host = host::host_name())
    );

    let stop = setup_signal_handler(locale);
    let log = RunLog::in_temp_dir()?;
    let opts = RunOptions {
        fail_fast: run_config.fail_fast,
        host_name: host::host_name().to_string(),
    };

    let result = engine::run_cases(&cases, &opts, log, &stop).await?;
    print_summary(&result, locale);

    match result.status {
        // A completed run is a success even when some diagnostics failed;
        // the summary and the log carry the verdicts.
        RunStatus::Completed => Ok(()),
        RunStatus::Stopped { case } => {
            anyhow::bail!(
                "{}",
                t!("run.stopped_on_failure", locale = locale, name = case)
            )
        }
        RunStatus::Interrupted => anyhow::bail!("{}", t!("run.interrupted", locale = locale)),
    }
}

fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("run.shutdown_signal", locale = &locale));
            token_clone.cancel();
        }
    });

    token
}
