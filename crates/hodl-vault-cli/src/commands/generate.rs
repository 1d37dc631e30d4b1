use std::path::Path;

use anyhow::Result;

use hodl_vault_core::address::AddressScript;
use hodl_vault_core::compiler::SimfonyCompiler;
use hodl_vault_core::config::VaultConfig;
use hodl_vault_core::faucet::FaucetClient;
use hodl_vault_core::params::ContractParameters;
use hodl_vault_core::pipeline::VaultPipeline;
use hodl_vault_core::templates;

use crate::output;

/// Generate a vault contract and derive its deposit address.
///
/// Renders the contract for the given parameters, compiles it, derives the
/// deposit address, and optionally chains a faucet funding request. With
/// `--out-dir` the witness skeleton is written next to the results so the
/// spender has a file to fill in once the oracle signs.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    config_path: &Path,
    block_height: i64,
    price: f64,
    name: Option<String>,
    description: Option<String>,
    fund: bool,
    out_dir: Option<&Path>,
    json: bool,
) -> Result<()> {
    if !json {
        output::print_header("hodl-vault generate");
    }

    let config = VaultConfig::load_or_default(config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded configuration");
    let params = ContractParameters::new(block_height, price)?.with_metadata(name, description);

    // Fail on missing tools before rendering anything.
    let compiler = SimfonyCompiler::new(&config);
    compiler.check_prerequisites()?;
    let deriver = AddressScript::new(&config);
    deriver.check_prerequisites()?;

    let total_steps = if fund { 2 } else { 1 };
    if !json {
        output::print_step(1, total_steps, "Compiling contract and deriving address...");
    }

    let pipeline = VaultPipeline::new(Box::new(compiler), Box::new(deriver));
    let artifacts = pipeline.generate(&params).await?;

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)?;
        let witness = templates::render_witness(&params)?;
        std::fs::write(dir.join("witness.json"), witness)?;
    }

    let txid = if fund {
        if !json {
            output::print_step(2, total_steps, "Requesting test funds from the faucet...");
        }
        let faucet = FaucetClient::new(&config.faucet)?;
        Some(faucet.request_funds(&artifacts.address).await?.txid)
    } else {
        None
    };

    if json {
        let mut payload = serde_json::to_value(&artifacts)?;
        if let Some(txid) = &txid {
            payload["txid"] = serde_json::Value::String(txid.clone());
        }
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    output::print_success("Contract generated");
    output::print_key_value(
        "Block height",
        &artifacts.parameters.min_block_height.to_string(),
    );
    output::print_key_value("Price", &artifacts.parameters.target_price.to_string());
    output::print_key_value("Program", &artifacts.program_hex);
    output::print_key_value("Address", &artifacts.address);
    if let Some(name) = &artifacts.parameters.name {
        output::print_key_value("Name", name);
    }
    if let Some(txid) = &txid {
        output::print_success("Faucet funding requested");
        output::print_key_value("Txid", txid);
    }
    if let Some(dir) = out_dir {
        output::print_key_value("Witness", &dir.join("witness.json").display().to_string());
    }

    Ok(())
}
