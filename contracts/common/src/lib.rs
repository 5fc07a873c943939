//! Shared types and helpers for the stake-lb contract suite.
//!
//! This crate provides:
//! - [`TokenId`] and [`RegistryClient`], the position-token types and the
//!   cross-contract interface the staking engine uses to move positions.
//! - Checked fixed-point arithmetic used by the reward accounting.
//! - Storage TTL constants and bump helpers shared by every contract.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod math;
pub mod position;
pub mod ttl;

pub use position::*;
