//! Address derivation stage: run the external derivation script.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::tool::{run_with_timeout, ExternalTool};

/// Check that raw script output is usable as an address.
///
/// The script is the authority on address encoding, so no bech32-style
/// validation happens here. What is enforced: after trimming, the output
/// must be a single non-empty token. Empty output and multi-line chatter
/// are derivation failures, not addresses.
fn validate_address(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VaultError::AddressDerivation(
            "derivation script produced no output".into(),
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(VaultError::AddressDerivation(format!(
            "unexpected derivation output: {trimmed}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Runs the configured derivation script as `<script> <program-hex>`.
pub struct AddressScript {
    script: PathBuf,
    timeout: Duration,
}

impl AddressScript {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            script: config.address_script.clone(),
            timeout: Duration::from_secs(config.tool_timeout_secs),
        }
    }

    /// Verify the derivation script exists at its configured path.
    pub fn check_prerequisites(&self) -> Result<()> {
        if !self.script.exists() {
            return Err(VaultError::MissingTool {
                name: self.script.display().to_string(),
                install: "point address_script at your derivation script".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ExternalTool for AddressScript {
    fn name(&self) -> &'static str {
        "address-derivation"
    }

    async fn invoke(&self, program_hex: &str) -> Result<String> {
        tracing::debug!(script = %self.script.display(), "deriving deposit address");

        let mut cmd = Command::new(&self.script);
        cmd.arg(program_hex);

        match run_with_timeout(cmd, self.timeout).await {
            Ok(Some(out)) if out.success => validate_address(&out.combined),
            Ok(Some(out)) => Err(VaultError::AddressDerivation(out.combined)),
            Ok(None) => Err(VaultError::AddressDerivation(format!(
                "derivation script timed out after {}s",
                self.timeout.as_secs()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::MissingTool {
                name: self.script.display().to_string(),
                install: "point address_script at your derivation script".into(),
            }),
            Err(e) => Err(VaultError::AddressDerivation(e.to_string())),
        }
    }
}
