//! Per-syllable colors for rendering a bar.

use crate::model::phonetics::BarId;
use crate::model::verse::Verse;
use crate::scheme::shades::scheme_shade_at;

/// Color of every global syllable of `bar_id`, `None` where unmarked.
///
/// Each covered syllable takes the shade at its position within its hit.
/// Unknown bars yield an empty list.
pub fn bar_syllable_colors(verse: &Verse, bar_id: BarId) -> Vec<Option<String>> {
    let Some(bar) = verse.bar(bar_id) else {
        return Vec::new();
    };

    let mut colors = vec![None; bar.syllable_count()];
    for scheme in &verse.schemes {
        for hit in scheme.hits_on(bar_id) {
            let count = hit.syllable_count();
            // Hits may reach past the bar after a text change; only resolvable slots are shaded.
            for (index, slot) in colors
                .iter_mut()
                .enumerate()
                .skip(hit.start_syllable)
                .take(count)
            {
                *slot = Some(scheme_shade_at(
                    &scheme.color,
                    count,
                    index - hit.start_syllable,
                ));
            }
        }
    }
    colors
}
