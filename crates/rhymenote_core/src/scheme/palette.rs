//! Base colors assigned to newly created schemes.

/// Fixed palette; the `n`-th new scheme takes entry `n % len`.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#bfef45",
];

/// Picks the base color for a new scheme given the current scheme count.
///
/// Falls back to `DEFAULT_PALETTE` when `palette` is empty.
pub fn color_for_index(palette: &[String], scheme_count: usize) -> String {
    if palette.is_empty() {
        return DEFAULT_PALETTE[scheme_count % DEFAULT_PALETTE.len()].to_string();
    }
    palette[scheme_count % palette.len()].clone()
}
