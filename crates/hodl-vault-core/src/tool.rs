//! Seam for external text-in/text-out tools.
//!
//! The compiler and the address-derivation script are capability-bounded
//! external programs whose only error channel is exit status plus captured
//! output. Modeling them behind [`ExternalTool`] keeps the pipeline
//! independent of how each stage is actually executed, so a stage can be
//! swapped for an in-process library or an RPC call without touching the
//! orchestrator, and tests can substitute doubles.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::Result;

/// An external program invoked with one text input, producing one text output.
#[async_trait]
pub trait ExternalTool: Send + Sync {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Run the tool on `input` and return its cleaned output.
    async fn invoke(&self, input: &str) -> Result<String>;
}

/// Captured result of a finished process.
#[derive(Debug)]
pub(crate) struct ToolOutput {
    pub success: bool,
    /// Combined stdout + stderr. External tools mix diagnostics across both
    /// streams, and there is no structured channel to separate them.
    pub combined: String,
}

/// Spawn `cmd` and wait for it with a bounded timeout.
///
/// Returns `Ok(None)` on timeout (the child is killed when the future is
/// dropped), `Ok(Some(_))` with captured output otherwise. Spawn failures
/// (for example a missing binary) surface as the `Err` variant so callers
/// can map `ErrorKind::NotFound` to their own missing-tool error.
pub(crate) async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> std::io::Result<Option<ToolOutput>> {
    cmd.stdin(Stdio::null());

    match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => Ok(None),
        Ok(Err(e)) => Err(e),
        Ok(Ok(output)) => {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !combined.is_empty() {
                    combined.push('\n');
                }
                combined.push_str(stderr.trim_end());
            }
            Ok(Some(ToolOutput {
                success: output.status.success(),
                combined,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_of_successful_command() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");
        let out = run_with_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap()
            .unwrap();
        assert!(out.success);
        assert_eq!(out.combined.trim(), "hello");
    }

    #[tokio::test]
    async fn reports_failure_status() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo diagnostics >&2; exit 1"]);
        let out = run_with_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap()
            .unwrap();
        assert!(!out.success);
        assert!(out.combined.contains("diagnostics"));
    }

    #[tokio::test]
    async fn times_out_on_hanging_command() {
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let out = run_with_timeout(cmd, Duration::from_millis(50)).await.unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let cmd = Command::new("this_tool_does_not_exist_xyz");
        let err = run_with_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
