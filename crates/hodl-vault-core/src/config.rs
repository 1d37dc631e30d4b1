//! Service configuration: tool locations, staging, faucet endpoint.
//!
//! Loaded from `hodl-vault.config.json`. Every field has a default matching
//! the conventional deployment (compiler `simc` on the PATH, derivation
//! script under `./scripts/`, the Liquid testnet faucet), so a missing
//! config file is not an error for callers that use [`VaultConfig::load_or_default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// Conventional config file name.
pub const CONFIG_FILE: &str = "hodl-vault.config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Compiler binary, invoked as `<compiler> <staged-source-path>`.
    pub compiler: String,
    /// Derivation script, invoked as `<script> <program-hex>`; its stdout
    /// is the deposit address.
    pub address_script: PathBuf,
    /// Directory where rendered source is staged before compilation. Each
    /// invocation gets its own file inside this directory.
    pub staging_dir: PathBuf,
    /// Bound on each external process, in seconds.
    pub tool_timeout_secs: u64,
    pub faucet: FaucetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaucetConfig {
    pub base_url: String,
    /// Asset selector passed as the `action` query parameter.
    pub asset: String,
    /// Bound on the whole HTTP round trip, in seconds.
    pub timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            compiler: "simc".into(),
            address_script: PathBuf::from("./scripts/get_addr.sh"),
            staging_dir: std::env::temp_dir(),
            tool_timeout_secs: 30,
            faucet: FaucetConfig::default(),
        }
    }
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://liquidtestnet.com/faucet".into(),
            asset: "lbtc".into(),
            timeout_secs: 15,
        }
    }
}

impl VaultConfig {
    /// Load config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VaultError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| VaultError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load config from `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| VaultError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = VaultConfig::default();
        config.compiler = "simc-dev".into();
        config.faucet.asset = "usdt".into();
        config.save(&path).unwrap();

        let loaded = VaultConfig::load(&path).unwrap();
        assert_eq!(loaded.compiler, "simc-dev");
        assert_eq!(loaded.faucet.asset, "usdt");
        assert_eq!(loaded.tool_timeout_secs, 30);
    }

    #[test]
    fn load_nonexistent_fails() {
        let result = VaultConfig::load(Path::new("/tmp/nonexistent_hodl_vault_config"));
        assert!(matches!(result, Err(VaultError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_or_default_falls_back() {
        let config =
            VaultConfig::load_or_default(Path::new("/tmp/nonexistent_hodl_vault_config")).unwrap();
        assert_eq!(config.compiler, "simc");
        assert_eq!(config.faucet.base_url, "https://liquidtestnet.com/faucet");
        assert_eq!(config.faucet.asset, "lbtc");
    }

    #[test]
    fn partial_config_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "compiler": "simc-local" }"#).unwrap();

        let loaded = VaultConfig::load(&path).unwrap();
        assert_eq!(loaded.compiler, "simc-local");
        assert_eq!(loaded.faucet.asset, "lbtc");
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            VaultConfig::load(&path),
            Err(VaultError::ConfigParse { .. })
        ));
    }
}
