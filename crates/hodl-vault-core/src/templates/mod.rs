//! Template system for contract and witness generation.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`]
//! in the [`embedded`] module, then rendered at runtime with
//! [Handlebars](https://handlebarsjs.com/) via the [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{min_height}}` — minimum block height slot of the vault contract
//! - `{{target_price}}` — minimum oracle price slot
//!
//! Everything else in the contract template is constant, including the
//! hard-coded oracle public key. Rendering is a pure function of the two
//! numeric parameters: the same inputs always yield byte-identical source.

pub mod embedded;
pub mod renderer;

use serde_json::json;

use crate::error::Result;
use crate::params::ContractParameters;
use renderer::TemplateRenderer;

/// Render the vault contract source for the given parameters.
pub fn render_contract(params: &ContractParameters) -> Result<String> {
    let renderer = TemplateRenderer::new();
    let data = json!({
        "min_height": params.min_block_height,
        "target_price": params.target_price,
    });
    renderer.render(embedded::HODL_VAULT_CONTRACT, &data)
}

/// Render the witness-file skeleton matching the contract's witness names.
///
/// The oracle signature slot is left as a placeholder; it can only be
/// filled once the oracle has signed `(height, price)`.
pub fn render_witness(params: &ContractParameters) -> Result<String> {
    let renderer = TemplateRenderer::new();
    let data = json!({
        "min_height": params.min_block_height,
        "target_price": params.target_price,
    });
    renderer.render(embedded::WITNESS_SKELETON, &data)
}
