use rhymenote_core::scheme::shades::Rgb;
use rhymenote_core::{
    analyze_word, bar_syllable_colors, compute_scheme_stats, get_scheme_shades, Bar, EngineConfig,
    Hit, Scheme, Verse, VerseService, Vowel,
};

fn lightness(hex: &str) -> f32 {
    Rgb::parse_hex(hex).unwrap().to_hsl().l
}

#[test]
fn single_shade_is_base_color() {
    assert_eq!(get_scheme_shades("#3366cc", 1), vec!["#3366cc"]);
    assert_eq!(get_scheme_shades("#ABCDEF", 1), vec!["#ABCDEF"]);
}

#[test]
fn shades_darken_monotonically_with_fixed_hue() {
    let base = Rgb::parse_hex("#3366cc").unwrap().to_hsl();
    let shades = get_scheme_shades("#3366cc", 5);
    assert_eq!(shades.len(), 5);

    for pair in shades.windows(2) {
        assert!(lightness(&pair[0]) >= lightness(&pair[1]), "{pair:?}");
    }
    assert!(lightness(&shades[0]) > lightness(&shades[4]));

    for shade in &shades {
        let hsl = Rgb::parse_hex(shade).unwrap().to_hsl();
        assert!((hsl.h - base.h).abs() < 2.0, "hue drift in {shade}");
        assert!((hsl.s - base.s).abs() < 2.0, "saturation drift in {shade}");
    }
}

#[test]
fn shade_endpoints_follow_lightness_bounds() {
    // base lightness 50: endpoints 70 and 35
    let shades = get_scheme_shades("#3366cc", 3);
    assert!((lightness(&shades[0]) - 70.0).abs() < 1.0);
    assert!((lightness(&shades[2]) - 35.0).abs() < 1.0);

    // very light base is capped at 85 on the light side
    let pale = get_scheme_shades("#f0f0f0", 2);
    assert!((lightness(&pale[0]) - 85.0).abs() < 1.0);
}

fn bar_with_syllables(count: usize) -> Bar {
    let mut bar = Bar::new("x");
    bar.words = vec![analyze_word("x", &"\u{05D1}\u{05B7}".repeat(count))];
    bar
}

#[test]
fn stats_aggregate_across_bars() {
    let mut verse = Verse::new();
    let first = verse.add_bar(bar_with_syllables(6));
    let second = verse.add_bar(bar_with_syllables(6));
    let mut scheme = Scheme::new("#3366cc", Hit::span(first, 0, 3));
    scheme.hits.push(Hit::span(second, 1, 3));

    let stats = compute_scheme_stats(&scheme, &verse);
    assert_eq!(stats.bar_count, 2);
    assert_eq!(stats.total_syllables, 7);
    assert_eq!(stats.vowel_pattern, vec![Vowel::A; 7]);
}

#[test]
fn stats_skip_unresolved_syllables() {
    let mut verse = Verse::new();
    let bar = verse.add_bar(bar_with_syllables(2));
    let scheme = Scheme::new("#3366cc", Hit::span(bar, 1, 4));

    let stats = compute_scheme_stats(&scheme, &verse);
    assert_eq!(stats.total_syllables, 4);
    assert_eq!(stats.vowel_pattern, vec![Vowel::A]);
}

#[test]
fn syllable_colors_follow_hit_shades() {
    let mut verse = Verse::new();
    let bar = verse.add_bar(bar_with_syllables(5));
    let mut service = VerseService::from_verse(verse, &EngineConfig::default()).unwrap();
    for index in 1..=3 {
        service.tap(bar, index);
    }

    let scheme = &service.verse().schemes[0];
    let shades = get_scheme_shades(&scheme.color, 3);
    let colors = bar_syllable_colors(service.verse(), bar);
    assert_eq!(
        colors,
        vec![
            None,
            Some(shades[0].clone()),
            Some(shades[1].clone()),
            Some(shades[2].clone()),
            None,
        ]
    );
    assert_eq!(service.syllable_colors(bar).unwrap(), colors);
}
