//! Compile-time embedded templates.
//!
//! Each constant loads a template file from the workspace `templates/`
//! directory via [`include_str!`]. The paths are relative to this source
//! file (`crates/hodl-vault-core/src/templates/embedded.rs`).
//!
//! Do NOT rename or move template files without updating the `include_str!`
//! path here, and do not change template variables without checking what
//! the renderer passes in.

/// The parameterized HODL vault contract source (Simfony).
pub const HODL_VAULT_CONTRACT: &str =
    include_str!("../../../../templates/contracts/hodl_vault.simf.tmpl");

/// Witness-file skeleton matching the contract's `witness::` names.
pub const WITNESS_SKELETON: &str =
    include_str!("../../../../templates/witness/witness.json.tmpl");
