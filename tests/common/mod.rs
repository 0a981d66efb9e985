// Shared test helpers for integration tests
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const TABLE_HEADER: &str =
    "name,command,expected,match_mode,hw_specific,needs_server,server_command,skip_message";

/// Writes a CSV test table into `dir` and returns its path.
pub fn write_table(dir: &TempDir, file_name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(TABLE_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');

    let path = dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write test table");
    path
}

/// A table where every case passes: one exact match and one pattern match.
pub fn passing_table(dir: &TempDir) -> PathBuf {
    write_table(
        dir,
        "passing.csv",
        &[
            "echo-exact,echo hello,hello,exact,,,,",
            "echo-pattern,\"echo providers: tcp, sockets\",tcp,pattern,,,,",
        ],
    )
}

/// A table with one deliberate failure between two passing cases.
pub fn mixed_table(dir: &TempDir) -> PathBuf {
    write_table(
        dir,
        "mixed.csv",
        &[
            "case-a,echo alpha,alpha,exact,,,,",
            "case-b,echo beta,WRONG,exact,,,,",
            "case-c,echo gamma,gamma,exact,,,,",
        ],
    )
}
