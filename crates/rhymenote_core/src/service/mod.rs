//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate phonetics, clustering and scheme editing into caller-level APIs.
//! - Keep FFI/CLI layers free of state-machine details.

pub mod rhyme_engine;
pub mod verse_service;
