//! Unified error types for the hodl-vault toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during hodl-vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    // --- Configuration ---

    /// The configuration file (`hodl-vault.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Parameters ---

    /// A request parameter is malformed or outside the representable range.
    /// The compiled contract encodes height and price as `u32`, so anything
    /// negative, non-finite, or above `u32::MAX` is rejected up front.
    #[error("invalid {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String,
    },

    // --- Prerequisites ---

    /// A required external tool (the compiler or the derivation script) is
    /// not installed or not at its configured path.
    #[error("required tool '{name}' not found (install: {install})")]
    MissingTool { name: String, install: String },

    // --- Pipeline ---

    /// Writing the rendered contract source to the staging location failed.
    #[error("failed to stage contract source at {path}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external compiler exited non-zero. Carries the raw combined
    /// output; compiler diagnostics are the only error detail available.
    #[error("contract compilation failed: {0}")]
    Compilation(String),

    /// The derivation script exited non-zero or produced unusable output.
    #[error("address derivation failed: {0}")]
    AddressDerivation(String),

    /// Handlebars template rendering failed (missing variable in strict mode).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Faucet ---

    /// The faucet could not be reached, or the connection died mid-response.
    #[error("faucet service is unavailable")]
    FaucetUnavailable(#[source] reqwest::Error),

    /// The faucet answered with a non-200 status. Carries the upstream
    /// status and raw body for diagnosis.
    #[error("faucet returned HTTP {status}")]
    FaucetStatus { status: u16, body: String },

    /// The faucet answered 200 but its HTML did not contain a txid. The
    /// usual cause is a faucet-side condition (address already funded)
    /// reported only as prose, so the raw body is carried along.
    #[error("no transaction id found in faucet response")]
    TxidNotFound { body: String },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, VaultError>`.
pub type Result<T> = std::result::Result<T, VaultError>;
