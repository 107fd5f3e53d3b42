use std::{
    io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};

use anyhow::Context as _;
use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    process::Command,
};

use super::{
    driver::{self, Payload, Report},
    result::ExecutionResult,
};
use crate::config::SandboxConfig;

/// Runs a code string and reports what happened as data.
///
/// Implementations never return an error for anything the submitted code does:
/// exceptions, non-zero exits and timeouts all come back inside the result.
#[async_trait]
pub trait Execute: Send + Sync {
    async fn execute(&self, code: &str, timeout: Duration) -> ExecutionResult;

    /// Like [`Execute::execute`], but `input()` pops lines from `input`
    /// (newline separated) and raises `EOFError` once they run out.
    async fn execute_with_input(&self, code: &str, input: &str, timeout: Duration)
        -> ExecutionResult;
}

/// Runs every submission in its own short-lived `python3` child process.
///
/// Output is captured through the child's pipes, so concurrent calls share
/// nothing. A child that outlives its timeout is killed.
#[derive(Debug, Clone)]
pub struct Sandbox {
    python: PathBuf,
    stdout_capture_max_bytes: usize,
    stderr_capture_max_bytes: usize,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub const DEFAULT_PYTHON: &str = "python3";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_CAPTURE_MAX_BYTES: usize = 1024 * 1024;

    pub fn new() -> Self {
        Self {
            python: Self::DEFAULT_PYTHON.into(),
            stdout_capture_max_bytes: Self::DEFAULT_CAPTURE_MAX_BYTES,
            stderr_capture_max_bytes: Self::DEFAULT_CAPTURE_MAX_BYTES,
        }
    }

    pub fn from_config(cfg: &SandboxConfig) -> Self {
        Self::new()
            .python(cfg.python.to_owned())
            .stdout_capture_max_bytes(cfg.stdout_capture_max_bytes)
            .stderr_capture_max_bytes(cfg.stderr_capture_max_bytes)
    }

    pub fn python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = python.into();
        self
    }

    pub fn stdout_capture_max_bytes(mut self, n: usize) -> Self {
        self.stdout_capture_max_bytes = n;
        self
    }

    pub fn stderr_capture_max_bytes(mut self, n: usize) -> Self {
        self.stderr_capture_max_bytes = n;
        self
    }

    pub fn get_python(&self) -> &Path {
        &self.python
    }

    async fn run(&self, code: &str, input: Option<&[String]>, timeout: Duration) -> ExecutionResult {
        let payload = Payload {
            code,
            input,
            // Leave room for the rest of the report line.
            stderr_limit: self.stderr_capture_max_bytes / 2,
        };
        match self.try_run(&payload, timeout).await {
            Ok(res) => res,
            Err(e) => {
                log::error!("Sandbox failure: {:#}", e);
                ExecutionResult::runtime_fault(
                    String::new(),
                    "SandboxError",
                    format!("{:#}", e),
                    "",
                    Duration::ZERO,
                )
            }
        }
    }

    async fn try_run(&self, payload: &Payload<'_>, timeout: Duration) -> anyhow::Result<ExecutionResult> {
        let payload = serde_json::to_vec(payload).context("Failed to encode sandbox payload")?;

        log::debug!(
            "Spawning '{}' (timeout={:?}, code={} bytes)",
            self.python.to_string_lossy(),
            timeout,
            payload.len()
        );

        let mut proc = Command::new(&self.python)
            .args(["-I", "-u", "-c", driver::BOOTSTRAP, driver::source()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", self.python.to_string_lossy()))?;
        let mut stdin = proc.stdin.take().context("Failed to open stdin")?;
        let mut stdout = proc.stdout.take().context("Failed to open stdout")?;
        let mut stderr = proc.stderr.take().context("Failed to open stderr")?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let (res, start_at) = {
            let fut_stdin = async move {
                let res = stdin.write_all(&payload).await;
                drop(stdin); // closes the pipe so the driver sees EOF
                match res {
                    // The child died before reading its payload; its exit status tells the rest.
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                }
            };
            let fut_stdout = capture(&mut stdout, &mut stdout_buf, self.stdout_capture_max_bytes);
            let fut_stderr =
                capture_tail(&mut stderr, &mut stderr_buf, self.stderr_capture_max_bytes);
            let fut_exit_status = proc.wait();

            let start_at = tokio::time::Instant::now();

            let res = tokio::time::timeout(timeout, async {
                tokio::try_join!(fut_stdin, fut_stdout, fut_stderr, fut_exit_status)
                    .context("Failed to communicate with subprocess")
            })
            .await;
            (res, start_at)
        };

        let wall_time = tokio::time::Instant::now().duration_since(start_at);

        match res {
            Err(_) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill timed-out process: {:#}", e));
                log::debug!("Killed sandbox child after {:?}", timeout);
                Ok(ExecutionResult::timeout(lossy(stdout_buf), timeout))
            }

            Ok(Err(e)) => Err(e),

            Ok(Ok((_, _, _, exit_status))) => {
                Ok(Self::interpret(exit_status, stdout_buf, &stderr_buf, wall_time))
            }
        }
    }

    fn interpret(
        exit_status: ExitStatus,
        stdout_buf: Vec<u8>,
        stderr_buf: &[u8],
        wall_time: Duration,
    ) -> ExecutionResult {
        let output = lossy(stdout_buf);
        let stderr = String::from_utf8_lossy(stderr_buf);

        if let Some(report) = Report::parse_from_stderr(&stderr) {
            if !report.stderr.is_empty() {
                log::debug!("Submission wrote to stderr: {:?}", report.stderr);
            }
            return report.into_result(output);
        }

        log::debug!("No driver report; raw stderr: {:?}", stderr);
        let message = match exit_status.code() {
            Some(code) => format!("interpreter exited with status {}", code),
            None => "interpreter was terminated by a signal".to_owned(),
        };
        let report = stderr.trim().lines().last().unwrap_or_default();
        ExecutionResult::runtime_fault(output, "ProcessExit", message, report, wall_time)
    }
}

#[async_trait]
impl Execute for Sandbox {
    async fn execute(&self, code: &str, timeout: Duration) -> ExecutionResult {
        self.run(code, None, timeout).await
    }

    async fn execute_with_input(
        &self,
        code: &str,
        input: &str,
        timeout: Duration,
    ) -> ExecutionResult {
        let lines = driver::split_input_lines(input);
        self.run(code, Some(&lines), timeout).await
    }
}

/// Copies up to `max_bytes` of `reader` into `buf`, then drains the rest so the
/// child never blocks on a full pipe.
async fn capture<R>(reader: &mut R, buf: &mut Vec<u8>, max_bytes: usize) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut head = reader.take(max_bytes as u64);
    tokio::io::copy(&mut head, buf).await?;
    tokio::io::copy(head.get_mut(), &mut tokio::io::sink()).await?;
    Ok(())
}

/// Keeps the last `max_bytes` of `reader`. The driver's report is the final
/// line, so it survives however much the submission writes to fd 2 first.
async fn capture_tail<R>(reader: &mut R, buf: &mut Vec<u8>, max_bytes: usize) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        // Drop the head in batches so a chatty child costs amortized O(1) per byte.
        if buf.len() > max_bytes.saturating_mul(2) {
            buf.drain(..buf.len() - max_bytes);
        }
    }
    if buf.len() > max_bytes {
        buf.drain(..buf.len() - max_bytes);
    }
    Ok(())
}

fn lossy(buf: Vec<u8>) -> String {
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
