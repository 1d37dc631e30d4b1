//! Core library for the hodl-vault toolkit.
//!
//! Implements the contract generation pipeline — template rendering,
//! Simplicity compilation via `simc`, deposit-address derivation — and the
//! Liquid testnet faucet client that scrapes the funding txid out of the
//! faucet's HTML response.
//!
//! This crate owns validation, stage sequencing, and failure classification.
//! It does not own transport: the HTTP/CLI surfaces live in their own crates
//! and hand this one already-parsed parameters.

pub mod address;
pub mod compiler;
pub mod config;
pub mod error;
pub mod faucet;
pub mod params;
pub mod pipeline;
pub mod templates;
pub mod tool;
