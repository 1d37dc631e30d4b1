//! Sequential generation pipeline: render, compile, derive.

use serde::{Deserialize, Serialize};

use crate::address::AddressScript;
use crate::compiler::SimfonyCompiler;
use crate::config::VaultConfig;
use crate::error::Result;
use crate::params::ContractParameters;
use crate::templates;
use crate::tool::ExternalTool;

/// Everything a successful generation produces. Request-scoped; nothing is
/// persisted beyond handing this back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifacts {
    #[serde(flatten)]
    pub parameters: ContractParameters,
    /// Hex-encoded compiled program.
    pub program_hex: String,
    /// Deposit address derived from the program.
    pub address: String,
}

/// Orchestrates the three generation stages.
///
/// Strict sequential composition: a stage failure short-circuits the rest
/// and is returned unchanged, so a compilation failure never spawns the
/// derivation script.
pub struct VaultPipeline {
    compiler: Box<dyn ExternalTool>,
    deriver: Box<dyn ExternalTool>,
}

impl VaultPipeline {
    pub fn new(compiler: Box<dyn ExternalTool>, deriver: Box<dyn ExternalTool>) -> Self {
        Self { compiler, deriver }
    }

    /// Build a pipeline with the standard compiler and derivation script.
    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(
            Box::new(SimfonyCompiler::new(config)),
            Box::new(AddressScript::new(config)),
        )
    }

    /// Run the full pipeline for one set of parameters.
    pub async fn generate(&self, params: &ContractParameters) -> Result<ContractArtifacts> {
        let source = templates::render_contract(params)?;
        tracing::debug!(
            min_block_height = params.min_block_height,
            target_price = params.target_price,
            "rendered contract source"
        );

        let program_hex = self.compiler.invoke(&source).await?;
        let address = self.deriver.invoke(&program_hex).await?;
        tracing::info!(%address, "derived deposit address");

        Ok(ContractArtifacts {
            parameters: params.clone(),
            program_hex,
            address,
        })
    }
}
