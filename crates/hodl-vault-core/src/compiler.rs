//! Compilation stage: stage rendered source and run the Simfony compiler.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::tool::{run_with_timeout, ExternalTool};

const SIMFONY_INSTALL: &str = "https://github.com/BlockstreamResearch/simfony";

/// Normalize compiler output into the bare hex program.
///
/// Trims, strips one leading `Program:` banner if present, and trims again.
/// Cleaning already-clean output is a no-op; a hex payload never starts
/// with the banner text.
pub fn clean_program_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("Program:").unwrap_or(trimmed);
    stripped.trim().to_string()
}

/// Runs `simc` (or a configured substitute) on staged contract source.
///
/// Every invocation stages its source under a unique temp path, so
/// concurrent generations cannot observe each other's source. The staged
/// file is removed when the invocation completes.
pub struct SimfonyCompiler {
    binary: String,
    staging_dir: PathBuf,
    timeout: Duration,
}

impl SimfonyCompiler {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            binary: config.compiler.clone(),
            staging_dir: config.staging_dir.clone(),
            timeout: Duration::from_secs(config.tool_timeout_secs),
        }
    }

    /// Verify the compiler binary is on the PATH.
    pub fn check_prerequisites(&self) -> Result<()> {
        which::which(&self.binary).map_err(|_| VaultError::MissingTool {
            name: self.binary.clone(),
            install: SIMFONY_INSTALL.into(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl ExternalTool for SimfonyCompiler {
    fn name(&self) -> &'static str {
        "compiler"
    }

    async fn invoke(&self, source: &str) -> Result<String> {
        std::fs::create_dir_all(&self.staging_dir).map_err(|e| VaultError::Staging {
            path: self.staging_dir.clone(),
            source: e,
        })?;

        let staged = tempfile::Builder::new()
            .prefix("hodl_vault_")
            .suffix(".simf")
            .tempfile_in(&self.staging_dir)
            .map_err(|e| VaultError::Staging {
                path: self.staging_dir.clone(),
                source: e,
            })?;
        std::fs::write(staged.path(), source).map_err(|e| VaultError::Staging {
            path: staged.path().to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %staged.path().display(), "compiling contract source");

        let mut cmd = Command::new(&self.binary);
        cmd.arg(staged.path());

        match run_with_timeout(cmd, self.timeout).await {
            Ok(Some(out)) if out.success => {
                let program = clean_program_output(&out.combined);
                if program.is_empty() {
                    return Err(VaultError::Compilation(
                        "compiler produced no program output".into(),
                    ));
                }
                tracing::debug!(len = program.len(), "compiled program");
                Ok(program)
            }
            Ok(Some(out)) => Err(VaultError::Compilation(out.combined)),
            Ok(None) => Err(VaultError::Compilation(format!(
                "compiler timed out after {}s",
                self.timeout.as_secs()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::MissingTool {
                name: self.binary.clone(),
                install: SIMFONY_INSTALL.into(),
            }),
            Err(e) => Err(VaultError::Compilation(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;

    #[test]
    fn cleaning_strips_banner_and_whitespace() {
        assert_eq!(clean_program_output("Program:\n  abc123\n"), "abc123");
        assert_eq!(clean_program_output("  abc123  "), "abc123");
        assert_eq!(clean_program_output("Program: abc123"), "abc123");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean_program_output("Program:\n  abc123\n");
        let twice = clean_program_output(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn cleaning_strips_only_one_banner() {
        // A literal second "Program:" is part of the payload, not a banner.
        assert_eq!(
            clean_program_output("Program: Program: abc"),
            "Program: abc"
        );
    }

    fn test_compiler(binary: &str, staging: &std::path::Path) -> SimfonyCompiler {
        let mut config = VaultConfig::default();
        config.compiler = binary.into();
        config.staging_dir = staging.to_path_buf();
        SimfonyCompiler::new(&config)
    }

    #[tokio::test]
    async fn missing_compiler_maps_to_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = test_compiler("this_compiler_does_not_exist_xyz", dir.path());
        let err = compiler.invoke("fn main() {}").await.unwrap_err();
        assert!(matches!(err, VaultError::MissingTool { .. }));
    }

    #[tokio::test]
    async fn successful_compile_returns_cleaned_output() {
        let dir = tempfile::tempdir().unwrap();
        // `cat` stands in for a compiler that echoes the staged source.
        let compiler = test_compiler("cat", dir.path());
        let program = compiler.invoke("Program:\n  deadbeef\n").await.unwrap();
        assert_eq!(program, "deadbeef");
    }

    #[tokio::test]
    async fn failing_compile_carries_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        // `false` exits non-zero with no output.
        let compiler = test_compiler("false", dir.path());
        let err = compiler.invoke("fn main() {}").await.unwrap_err();
        assert!(matches!(err, VaultError::Compilation(_)));
    }

    #[tokio::test]
    async fn staged_file_is_removed_after_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = test_compiler("cat", dir.path());
        compiler.invoke("payload").await.unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }
}
