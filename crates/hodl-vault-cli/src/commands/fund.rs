use std::path::Path;

use anyhow::Result;

use hodl_vault_core::config::VaultConfig;
use hodl_vault_core::error::VaultError;
use hodl_vault_core::faucet::FaucetClient;

use crate::output;

/// Request test funds for an existing deposit address.
pub async fn run(config_path: &Path, address: &str, json: bool) -> Result<()> {
    if !json {
        output::print_header("hodl-vault fund");
        output::print_key_value("Address", address);
        output::print_step(1, 1, "Requesting test funds from the faucet...");
    }

    let config = VaultConfig::load_or_default(config_path)?;
    let faucet = FaucetClient::new(&config.faucet)?;

    let result = match faucet.request_funds(address).await {
        Ok(result) => result,
        Err(VaultError::TxidNotFound { body }) => {
            // The faucet reports conditions like "already funded" only as
            // prose inside a 200 page; surface the page for diagnosis.
            if !json {
                output::print_error("Faucet answered without a transaction id:");
                println!("{body}");
            }
            anyhow::bail!("no transaction id found in faucet response");
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::print_success("Faucet funding requested");
    output::print_key_value("Txid", &result.txid);

    Ok(())
}
