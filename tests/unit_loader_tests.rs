//! # Loader Unit Tests / 加载器单元测试
//!
//! Unit tests for the table loader: header mapping, sentinel substitution,
//! name filtering, and load-time validation.
//!
//! 表格加载器的单元测试：表头映射、哨兵替换、名称过滤和加载时验证。

mod common;

use common::write_table;
use fabric_runner::core::config::MatchMode;
use fabric_runner::core::loader::{ADDR_SENTINEL, load_cases};
use std::path::Path;
use tempfile::tempdir;

fn no_filter() -> Vec<String> {
    Vec::new()
}

#[test]
fn loads_all_fields_of_a_row() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "full.csv",
        &["pingpong,fi_pingpong -p tcp host,bytes,pattern,true,true,fi_pingpong -p tcp,hw note"],
    );

    let cases = load_cases(&table, "10.0.0.7", &no_filter()).unwrap();
    assert_eq!(cases.len(), 1);

    let case = &cases[0];
    assert_eq!(case.name, "pingpong");
    assert_eq!(case.command, "fi_pingpong -p tcp host");
    assert_eq!(case.expected, "bytes");
    assert_eq!(case.match_mode, MatchMode::Pattern);
    assert!(case.hw_specific);
    assert!(case.needs_server);
    assert_eq!(case.server_command.as_deref(), Some("fi_pingpong -p tcp"));
    assert_eq!(case.skip_message.as_deref(), Some("hw note"));
}

#[test]
fn sentinel_is_replaced_in_every_cell() {
    let dir = tempdir().unwrap();
    let row = format!(
        "pingpong,fi_pingpong {ADDR_SENTINEL},{ADDR_SENTINEL} reachable,pattern,,true,fi_pingpong -s {ADDR_SENTINEL},"
    );
    let table = write_table(&dir, "sentinel.csv", &[&row]);

    let cases = load_cases(&table, "10.0.0.7", &no_filter()).unwrap();

    assert_eq!(cases[0].command, "fi_pingpong 10.0.0.7");
    assert_eq!(cases[0].expected, "10.0.0.7 reachable");
    assert_eq!(
        cases[0].server_command.as_deref(),
        Some("fi_pingpong -s 10.0.0.7")
    );
}

#[test]
fn header_only_table_yields_no_cases() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "empty.csv", &[]);

    let cases = load_cases(&table, "10.0.0.7", &no_filter()).unwrap();
    assert!(cases.is_empty());
}

#[test]
fn missing_table_is_a_load_error() {
    let err = load_cases(Path::new("/no/such/table.csv"), "10.0.0.7", &no_filter()).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn missing_required_column_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "name,command\nt,true\n").unwrap();

    let err = load_cases(&path, "10.0.0.7", &no_filter()).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("expected"), "unexpected error: {chain}");
}

#[test]
fn missing_command_is_rejected_with_row_number() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "rowless.csv", &["lonely,,x,,,,,"]);

    let err = load_cases(&table, "10.0.0.7", &no_filter()).unwrap_err();
    assert!(format!("{err:#}").contains("row 2"));
}

#[test]
fn bad_flag_value_is_rejected() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "badflag.csv", &["t,true,x,,maybe,,,"]);

    assert!(load_cases(&table, "10.0.0.7", &no_filter()).is_err());
}

#[test]
fn unknown_match_mode_is_rejected() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "badmode.csv", &["t,true,x,fuzzy,,,,"]);

    let err = load_cases(&table, "10.0.0.7", &no_filter()).unwrap_err();
    assert!(format!("{err:#}").contains("match mode"));
}

#[test]
fn server_flag_without_command_is_rejected() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "noserver.csv", &["t,true,x,,,yes,,"]);

    let err = load_cases(&table, "10.0.0.7", &no_filter()).unwrap_err();
    assert!(format!("{err:#}").contains("server_command"));
}

#[test]
fn blank_rows_are_ignored() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "blank.csv",
        &[",,,,,,,", "t,echo hi,hi,exact,,,,"],
    );

    let cases = load_cases(&table, "10.0.0.7", &no_filter()).unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].name, "t");
}

#[test]
fn quoted_cells_may_contain_commas() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "quoted.csv",
        &["list,\"echo a, b, c\",\"a, b\",pattern,,,,"],
    );

    let cases = load_cases(&table, "10.0.0.7", &no_filter()).unwrap();
    assert_eq!(cases[0].command, "echo a, b, c");
    assert_eq!(cases[0].expected, "a, b");
}

#[test]
fn filter_keeps_table_order_and_deduplicates_requests() {
    let dir = tempdir().unwrap();
    let table = write_table(
        &dir,
        "filter.csv",
        &[
            "a,true,x,,,,,",
            "b,true,x,,,,,",
            "c,true,x,,,,,",
        ],
    );

    let requested = vec!["b".to_string(), "a".to_string(), "a".to_string()];
    let cases = load_cases(&table, "10.0.0.7", &requested).unwrap();

    let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn filter_with_no_match_yields_empty() {
    let dir = tempdir().unwrap();
    let table = write_table(&dir, "nomatch.csv", &["a,true,x,,,,,"]);

    let cases = load_cases(&table, "10.0.0.7", &["zzz".to_string()]).unwrap();
    assert!(cases.is_empty());
}
