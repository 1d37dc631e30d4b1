//! Validated contract parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// Parameters for a generated HODL vault contract.
///
/// Both numeric fields occupy `u32` slots in the compiled contract, so the
/// constructor rejects anything not representable as one before any side
/// effect (no file is staged, no process is spawned). Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractParameters {
    /// Minimum block height before the vault can be spent.
    pub min_block_height: u32,
    /// Minimum oracle price required to spend.
    pub target_price: u32,
    /// Optional user-facing label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContractParameters {
    /// Validate raw caller input into parameters.
    ///
    /// `price` arrives as a JSON number and is truncated toward zero, the
    /// same coercion the contract's integer slot implies. The fractional
    /// part is discarded, never rounded up.
    pub fn new(block_height: i64, price: f64) -> Result<Self> {
        if block_height < 0 {
            return Err(VaultError::InvalidParameter {
                field: "block_height",
                reason: format!("must be non-negative, got {block_height}"),
            });
        }
        if block_height > u32::MAX as i64 {
            return Err(VaultError::InvalidParameter {
                field: "block_height",
                reason: format!("must fit in a u32, got {block_height}"),
            });
        }

        if !price.is_finite() {
            return Err(VaultError::InvalidParameter {
                field: "price",
                reason: format!("must be a finite number, got {price}"),
            });
        }
        if price < 0.0 {
            return Err(VaultError::InvalidParameter {
                field: "price",
                reason: format!("must be non-negative, got {price}"),
            });
        }
        let truncated = price.trunc();
        if truncated > u32::MAX as f64 {
            return Err(VaultError::InvalidParameter {
                field: "price",
                reason: format!("must fit in a u32, got {price}"),
            });
        }

        Ok(Self {
            min_block_height: block_height as u32,
            target_price: truncated as u32,
            name: None,
            description: None,
        })
    }

    /// Attach the optional label fields.
    pub fn with_metadata(mut self, name: Option<String>, description: Option<String>) -> Self {
        self.name = name;
        self.description = description;
        self
    }
}
