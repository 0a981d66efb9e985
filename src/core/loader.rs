//! # Table Loader Module / 表格加载模块
//!
//! This module reads the test table (xlsx via calamine, csv via the csv
//! crate), substitutes the server-address sentinel into every cell, filters
//! to the requested test names, and validates each row into a typed
//! [`TestCase`]. Validation failures abort before any test runs.
//!
//! 此模块读取测试表格（xlsx 通过 calamine，csv 通过 csv crate），
//! 将服务器地址哨兵值替换进每个单元格，按请求的测试名称过滤，
//! 并将每一行验证为类型化的 [`TestCase`]。验证失败会在任何测试运行前中止。

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::core::config::{MatchMode, TestCase};

/// The sentinel address in table cells that is replaced by the configured
/// target server address, so one table template serves any environment.
/// 表格单元格中的哨兵地址，会被替换为配置的目标服务器地址，
/// 使同一份表格模板适用于任何环境。
pub const ADDR_SENTINEL: &str = "xx.xxx.xxx.xx";

/// Loads the test table and produces the ordered list of cases to run.
///
/// `requested` names filter the table; an empty list means "all". Matches are
/// emitted in source-table order and each case appears at most once, even if
/// its name was requested more than once.
pub fn load_cases(path: &Path, server_addr: &str, requested: &[String]) -> Result<Vec<TestCase>> {
    let rows = read_rows(path)?;
    let cases = build_cases(rows, server_addr)
        .with_context(|| format!("malformed test table: {}", path.display()))?;
    Ok(filter_cases(cases, requested))
}

/// Reads the raw cell grid, dispatching on the file extension.
fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        bail!("test table not found: {}", path.display());
    }
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_rows_csv(path)
    } else {
        read_rows_sheet(path)
    }
}

fn read_rows_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open test table: {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read test table: {}", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn read_rows_sheet(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open test table: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("test table has no sheets: {}", path.display()))?
        .with_context(|| format!("failed to read test table: {}", path.display()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        // Spreadsheets store flag columns like `1` as floats.
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Column indices resolved from the header row. Header names are matched
/// case-insensitively; `name`, `command` and `expected` are required.
struct Columns {
    name: usize,
    command: usize,
    expected: usize,
    match_mode: Option<usize>,
    hw_specific: Option<usize>,
    needs_server: Option<usize>,
    server_command: Option<usize>,
    skip_message: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let find = |field: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(field))
        };
        let require = |field: &str| {
            find(field).ok_or_else(|| anyhow!("test table header is missing column {field:?}"))
        };

        Ok(Self {
            name: require("name")?,
            command: require("command")?,
            expected: require("expected")?,
            match_mode: find("match_mode"),
            hw_specific: find("hw_specific"),
            needs_server: find("needs_server"),
            server_command: find("server_command"),
            skip_message: find("skip_message"),
        })
    }
}

/// Builds typed cases from the raw grid. The first row is the header; every
/// later row becomes one case. The address sentinel is replaced in every
/// cell before anything else looks at the value.
fn build_cases(rows: Vec<Vec<String>>, server_addr: &str) -> Result<Vec<TestCase>> {
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        // No header at all: treat like a table with no data rows.
        return Ok(Vec::new());
    };
    let columns = Columns::from_header(&header)?;

    let mut cases = Vec::new();
    for (index, row) in rows.enumerate() {
        // Header is row 1, so the first data row is row 2.
        let row_number = index + 2;
        let cell = |col: usize| {
            row.get(col)
                .map(|value| value.replace(ADDR_SENTINEL, server_addr))
                .unwrap_or_default()
        };
        let optional_cell = |col: Option<usize>| col.map(|index| cell(index)).unwrap_or_default();

        let name = cell(columns.name).trim().to_string();
        let command = cell(columns.command).trim().to_string();
        let expected = cell(columns.expected);

        if name.is_empty() && command.is_empty() && expected.trim().is_empty() {
            continue;
        }
        if name.is_empty() {
            bail!("row {row_number}: missing test name");
        }
        if command.is_empty() {
            bail!("row {row_number}: missing command for test {name:?}");
        }

        let match_mode = optional_cell(columns.match_mode)
            .parse::<MatchMode>()
            .with_context(|| format!("row {row_number}: invalid match mode for test {name:?}"))?;
        let hw_specific = parse_flag(&optional_cell(columns.hw_specific))
            .with_context(|| format!("row {row_number}: invalid hw_specific flag for test {name:?}"))?;
        let needs_server = parse_flag(&optional_cell(columns.needs_server))
            .with_context(|| format!("row {row_number}: invalid needs_server flag for test {name:?}"))?;
        let server_command = non_empty(optional_cell(columns.server_command));
        let skip_message = non_empty(optional_cell(columns.skip_message));

        if needs_server && server_command.is_none() {
            bail!("row {row_number}: test {name:?} needs a server but has no server_command");
        }

        cases.push(TestCase {
            name,
            command,
            expected,
            match_mode,
            hw_specific,
            needs_server,
            server_command,
            skip_message,
        });
    }
    Ok(cases)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "no" | "false" => Ok(false),
        "1" | "yes" | "true" => Ok(true),
        other => Err(anyhow!("expected a boolean flag, got {other:?}")),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Retains only the requested cases, in source-table order. Requesting the
/// same name twice still yields the case once.
fn filter_cases(cases: Vec<TestCase>, requested: &[String]) -> Vec<TestCase> {
    if requested.is_empty() {
        return cases;
    }
    cases
        .into_iter()
        .filter(|case| requested.iter().any(|name| name == &case.name))
        .collect()
}
