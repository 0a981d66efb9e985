//! # Command Execution Module / 命令执行模块
//!
//! Shell command construction, output capture, and the companion-server
//! process guard. Every test command runs through `sh -c` with the combined
//! stdout and stderr captured as text.
//!
//! Shell 命令构造、输出捕获以及伴随服务器进程守卫。
//! 每个测试命令都通过 `sh -c` 运行，合并捕获 stdout 和 stderr 的文本。

use anyhow::{Context, Result};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

/// Builds a `sh -c` command for a shell specification string, after
/// expanding `~` and environment variables in it.
///
/// 为 shell 命令字符串构造 `sh -c` 命令，并预先展开其中的 `~` 和环境变量。
pub fn shell(spec: &str) -> Result<Command> {
    let expanded = shellexpand::full(spec)
        .with_context(|| format!("failed to expand command: {spec}"))?;
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(expanded.as_ref()).kill_on_drop(true);
    Ok(cmd)
}

/// Spawns a command and captures its stdout and stderr.
/// Both streams are drained while the process runs and returned as one
/// string, stdout first.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令并捕获其 stdout 和 stderr。
/// 两个输出流在进程运行期间被读取，并合并为一个字符串返回，stdout 在前。
pub async fn spawn_and_capture(
    mut cmd: Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, report the error with no output.
            // 如果派生失败，返回错误且没有输出。
            return (Err(e), String::new());
        }
    };

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out_buf = String::new();
    let mut err_buf = String::new();

    // Drain both pipes while waiting, so a chatty command cannot dead-lock
    // on a full pipe buffer.
    // 在等待的同时读空两个管道，避免输出较多的命令因管道缓冲区写满而死锁。
    let (status, _, _) = tokio::join!(
        child.wait(),
        async {
            if let Some(stream) = stdout.as_mut() {
                let _ = stream.read_to_string(&mut out_buf).await;
            }
        },
        async {
            if let Some(stream) = stderr.as_mut() {
                let _ = stream.read_to_string(&mut err_buf).await;
            }
        },
    );

    out_buf.push_str(&err_buf);
    (status, out_buf)
}

/// Owns a companion-server child process for the duration of exactly one
/// test case. The server is started before the main command and must be
/// torn down unconditionally afterwards; `kill_on_drop` is the backstop if
/// [`ServerGuard::stop`] is never reached.
///
/// 在单个测试用例期间持有伴随服务器子进程。服务器在主命令之前启动，
/// 之后必须无条件终止；若未能调用 [`ServerGuard::stop`]，
/// 则由 `kill_on_drop` 兜底。
pub struct ServerGuard {
    child: Child,
}

impl ServerGuard {
    /// Starts the companion server in the background with its output
    /// discarded.
    pub fn start(spec: &str) -> Result<Self> {
        let mut cmd = shell(spec)?;
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        let child = cmd
            .spawn()
            .with_context(|| format!("failed to start companion server: {spec}"))?;
        Ok(Self { child })
    }

    /// Kills and reaps the server. Termination errors are swallowed; a
    /// server that already exited is not a test failure.
    pub async fn stop(mut self) {
        let _ = self.child.start_kill();
        let _ = self.child.wait().await;
    }
}
