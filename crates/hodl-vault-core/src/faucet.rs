//! Liquid testnet faucet client.
//!
//! The faucet has no structured API: a successful funding request is a 200
//! page whose HTML contains `with transaction <64 hex chars>.</p>`. This
//! module isolates that scrape behind [`FaucetClient`] so the extraction
//! strategy can be replaced without affecting callers if the faucet ever
//! exposes real data.
//!
//! A single attempt is made per call; every failure mode maps to a distinct
//! error and is returned immediately. No retry, no backoff.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::FaucetConfig;
use crate::error::{Result, VaultError};

static TXID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"with transaction ([a-f0-9]{64})\.</p>").unwrap());

/// Outcome of a successful funding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingResult {
    /// 64-character lowercase-hex transaction id.
    pub txid: String,
}

/// HTTP client for one faucet endpoint.
pub struct FaucetClient {
    http: reqwest::Client,
    base_url: String,
    asset: String,
}

impl FaucetClient {
    pub fn new(config: &FaucetConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VaultError::Other(anyhow::Error::new(e)))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            asset: config.asset.clone(),
        })
    }

    /// Request test funds for `address`.
    ///
    /// `GET <base_url>?address=<addr>&action=<asset>`, classified as:
    /// transport failure, non-200 status, 200 without a txid in the HTML,
    /// or success with the extracted txid.
    pub async fn request_funds(&self, address: &str) -> Result<FundingResult> {
        tracing::debug!(%address, asset = %self.asset, "requesting faucet funds");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("address", address), ("action", self.asset.as_str())])
            .send()
            .await
            .map_err(VaultError::FaucetUnavailable)?;

        let status = response.status().as_u16();
        // Body-read failures on an established connection are still
        // transport failures; only a received status can become FaucetStatus.
        let body = response
            .text()
            .await
            .map_err(VaultError::FaucetUnavailable)?;

        classify_response(status, body)
    }
}

/// Pure classification of a received faucet response.
fn classify_response(status: u16, body: String) -> Result<FundingResult> {
    if status != 200 {
        return Err(VaultError::FaucetStatus { status, body });
    }
    match extract_txid(&body) {
        Some(txid) => {
            tracing::info!(%txid, "faucet funded address");
            Ok(FundingResult { txid })
        }
        None => Err(VaultError::TxidNotFound { body }),
    }
}

/// Extract the first txid capture from the faucet HTML, if present.
pub fn extract_txid(body: &str) -> Option<String> {
    TXID_RE.captures(body).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "ab12cd34ef56ab12cd34ef56ab12cd34ef56ab12cd34ef56ab12cd34ef56ab12";

    fn success_body(txid: &str) -> String {
        format!("<html><p>Sent 0.001 tL-BTC with transaction {txid}.</p></html>")
    }

    #[test]
    fn extracts_exact_txid() {
        assert_eq!(extract_txid(&success_body(TXID)).unwrap(), TXID);
    }

    #[test]
    fn ignores_txid_of_wrong_length() {
        let short = &TXID[..63];
        assert!(extract_txid(&success_body(short)).is_none());
    }

    #[test]
    fn ignores_uppercase_hex() {
        let upper = TXID.to_uppercase();
        assert!(extract_txid(&success_body(&upper)).is_none());
    }

    #[test]
    fn requires_surrounding_pattern() {
        // A bare txid without the sentence structure is not a match.
        assert!(extract_txid(TXID).is_none());
    }

    #[test]
    fn classify_success() {
        let result = classify_response(200, success_body(TXID)).unwrap();
        assert_eq!(result.txid, TXID);
    }

    #[test]
    fn classify_non_200_preserves_status_and_body() {
        let err = classify_response(503, "over capacity".into()).unwrap_err();
        match err {
            VaultError::FaucetStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "over capacity");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classify_200_without_pattern_carries_body() {
        // The faucet reports "already funded" as a plain 200 page.
        let err =
            classify_response(200, "<p>This address was already funded.</p>".into()).unwrap_err();
        match err {
            VaultError::TxidNotFound { body } => assert!(body.contains("already funded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
