//! Automatic rhyme detection.
//!
//! # Responsibility
//! - Cluster signature-tagged words into rhyme groups across lines.
//!
//! # Invariants
//! - Output is deterministic for identical input (first-seen ordering).
//! - Groups with fewer than two members are never returned.

pub mod cluster;
