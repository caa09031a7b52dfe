//! Manual rhyme-scheme authoring over a verse.
//!
//! # Responsibility
//! - Apply taps as atomic read-modify-write steps on a `Verse`.
//! - Compute per-hit color shades, per-syllable colors and scheme stats.
//!
//! # Invariants
//! - After every tap, hits of one scheme on one bar neither overlap nor touch.
//! - A scheme left without hits is removed in the same step.
//!
//! # See also
//! - `crate::service::verse_service` for the stateful facade.

pub mod coloring;
pub mod palette;
pub mod shades;
pub mod stats;
pub mod tap;
