//! Vocalization boundary: provider contract, session cache and staleness.
//!
//! # Responsibility
//! - Define the consumed `VocalizationProvider` contract.
//! - Cache first candidates per session through an injected `VocalizationCache`.
//! - Drop stale results with per-bar revisions (last edit wins).
//!
//! # Invariants
//! - Provider failures never reach clustering or authoring; raw text is used.
//! - A result is applied only if its ticket is still the bar's latest revision.

pub mod cache;
pub mod provider;
pub mod tracker;
