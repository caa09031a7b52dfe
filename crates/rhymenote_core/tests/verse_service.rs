use rhymenote_core::{
    analyze_word, Bar, BarId, ConfigError, EngineConfig, Hit, NoopVocalizationCache,
    PassthroughProvider, RhymeEngine, RhymeType, Verse, VerseService, VerseServiceError,
    VerseValidationError,
};

fn bar_with_syllables(count: usize) -> Bar {
    let mut bar = Bar::new("x");
    bar.words = vec![analyze_word("x", &"\u{05D1}\u{05B7}".repeat(count))];
    bar
}

fn service_with_two_schemes() -> (VerseService, BarId, BarId) {
    let mut verse = Verse::new();
    let first = verse.add_bar(bar_with_syllables(6));
    let second = verse.add_bar(bar_with_syllables(6));
    let mut service = VerseService::from_verse(verse, &EngineConfig::default()).unwrap();
    service.tap(first, 0);
    service.tap(second, 2);
    service.select_scheme(None).unwrap();
    service.tap(first, 4);
    (service, first, second)
}

#[test]
fn rename_trims_and_rejects_blank_names() {
    let (mut service, _, _) = service_with_two_schemes();
    let id = service.verse().schemes[0].id;

    service.rename_scheme(id, Some("  hook ".to_string())).unwrap();
    assert_eq!(service.verse().schemes[0].name.as_deref(), Some("hook"));

    let err = service.rename_scheme(id, Some("   ".to_string())).unwrap_err();
    assert_eq!(err, VerseServiceError::InvalidSchemeName);

    service.rename_scheme(id, None).unwrap();
    assert!(service.verse().schemes[0].name.is_none());
}

#[test]
fn recolor_validates_hex() {
    let (mut service, _, _) = service_with_two_schemes();
    let id = service.verse().schemes[1].id;

    service.recolor_scheme(id, "#ABCDEF").unwrap();
    assert_eq!(service.verse().schemes[1].color, "#abcdef");

    let err = service.recolor_scheme(id, "blue").unwrap_err();
    assert!(matches!(err, VerseServiceError::InvalidColor(_)));
}

#[test]
fn reorder_moves_scheme_and_checks_bounds() {
    let (mut service, _, _) = service_with_two_schemes();
    let ids: Vec<_> = service.verse().schemes.iter().map(|s| s.id).collect();

    service.reorder_scheme(1, 0).unwrap();
    let reordered: Vec<_> = service.verse().schemes.iter().map(|s| s.id).collect();
    assert_eq!(reordered, vec![ids[1], ids[0]]);

    let err = service.reorder_scheme(0, 2).unwrap_err();
    assert_eq!(
        err,
        VerseServiceError::ReorderOutOfRange {
            from: 0,
            to: 2,
            len: 2
        }
    );
}

#[test]
fn delete_active_scheme_activates_preceding() {
    let (mut service, _, _) = service_with_two_schemes();
    let first = service.verse().schemes[0].id;
    let second = service.verse().schemes[1].id;
    assert_eq!(service.active_scheme(), Some(second));

    service.delete_scheme(second).unwrap();
    assert_eq!(service.active_scheme(), Some(first));

    service.delete_scheme(first).unwrap();
    assert_eq!(service.active_scheme(), None);
    assert!(service.verse().schemes.is_empty());

    let err = service.delete_scheme(first).unwrap_err();
    assert_eq!(err, VerseServiceError::SchemeNotFound(first));
}

#[test]
fn removing_bar_drops_its_hits_and_empty_schemes() {
    let (mut service, first, second) = service_with_two_schemes();
    service.remove_bar(first).unwrap();

    let verse = service.verse();
    assert_eq!(verse.bars.len(), 1);
    assert_eq!(verse.schemes.len(), 1);
    assert!(verse.schemes[0].hits.iter().all(|hit| hit.bar_id == second));
    assert_eq!(service.active_scheme(), None);

    let err = service.remove_bar(first).unwrap_err();
    assert_eq!(err, VerseServiceError::BarNotFound(first));
}

#[test]
fn stats_and_colors_report_unknown_ids() {
    let (service, first, _) = service_with_two_schemes();
    let id = service.verse().schemes[0].id;

    let stats = service.scheme_stats(id).unwrap();
    assert_eq!(stats.total_syllables, 2);
    assert_eq!(stats.bar_count, 2);

    assert!(service.scheme_stats(BarId::new_v4()).is_err());
    assert!(service.syllable_colors(BarId::new_v4()).is_err());
    assert_eq!(service.syllable_colors(first).unwrap().len(), 6);
}

#[test]
fn verse_serializes_as_plain_data() {
    let (service, _, _) = service_with_two_schemes();
    let json = serde_json::to_value(service.verse()).unwrap();

    assert!(json["bars"].is_array());
    let hit = &json["schemes"][0]["hits"][0];
    assert_eq!(hit["start_syllable"], 0);
    assert_eq!(hit["end_syllable"], 0);
    assert_eq!(json["bars"][0]["words"][0]["syllables"][0]["vowel"], "A");

    let decoded: Verse = serde_json::from_value(json).unwrap();
    assert_eq!(&decoded, service.verse());
}

#[test]
fn detect_rhymes_runs_over_all_bars() {
    let (service, first, second) = service_with_two_schemes();
    let groups = service.detect_rhymes();

    let multi = groups
        .iter()
        .find(|group| group.kind == RhymeType::Multi)
        .expect("multi group");
    let lines: Vec<_> = multi.members.iter().map(|m| m.line_id).collect();
    assert_eq!(lines, vec![first, second]);
}

fn snapshot_with_hits(hits: &str) -> (String, BarId) {
    let bar = bar_with_syllables(8);
    let bar_id = bar.id;
    let bar_json = serde_json::to_string(&bar).unwrap();
    let hits = hits.replace("BAR", &bar_id.to_string());
    let json = format!(
        r##"{{"bars":[{bar_json}],"schemes":[{{"id":"{}","color":"#e6194b","name":null,"hits":{hits}}}]}}"##,
        BarId::new_v4()
    );
    (json, bar_id)
}

fn load(json: &str) -> Result<VerseService, VerseServiceError> {
    let verse: Verse = serde_json::from_str(json).unwrap();
    VerseService::from_verse(verse, &EngineConfig::default())
}

#[test]
fn reversed_hit_in_snapshot_is_rejected() {
    let (json, _) =
        snapshot_with_hits(r#"[{"bar_id":"BAR","start_syllable":5,"end_syllable":2}]"#);
    let err = load(&json).err().expect("reversed hit must be rejected");
    assert!(matches!(
        err,
        VerseServiceError::InvalidVerse(VerseValidationError::ReversedHit {
            start: 5,
            end: 2,
            ..
        })
    ));
}

#[test]
fn empty_scheme_in_snapshot_is_dropped() {
    let (json, _) = snapshot_with_hits("[]");
    let service = load(&json).unwrap();
    assert!(service.verse().schemes.is_empty());
}

#[test]
fn overlapping_and_touching_hits_in_snapshot_are_merged() {
    let (json, bar) = snapshot_with_hits(
        r#"[{"bar_id":"BAR","start_syllable":0,"end_syllable":2},
            {"bar_id":"BAR","start_syllable":5,"end_syllable":6},
            {"bar_id":"BAR","start_syllable":1,"end_syllable":3},
            {"bar_id":"BAR","start_syllable":4,"end_syllable":4}]"#,
    );
    let service = load(&json).unwrap();
    let scheme = &service.verse().schemes[0];
    assert_eq!(scheme.hits, vec![Hit::span(bar, 0, 6)]);

    let stats = service.scheme_stats(scheme.id).unwrap();
    assert_eq!(stats.total_syllables, 7);
}

#[test]
fn hits_on_unknown_bars_are_dropped_on_load() {
    let (json, bar) = snapshot_with_hits(&format!(
        r#"[{{"bar_id":"{}","start_syllable":0,"end_syllable":0}},
            {{"bar_id":"BAR","start_syllable":3,"end_syllable":3}}]"#,
        BarId::new_v4()
    ));
    let service = load(&json).unwrap();
    assert_eq!(service.verse().schemes[0].hits, vec![Hit::single(bar, 3)]);
}

#[test]
fn out_of_range_hit_renders_without_panicking() {
    let (json, bar) = snapshot_with_hits(&format!(
        r#"[{{"bar_id":"BAR","start_syllable":6,"end_syllable":{}}}]"#,
        usize::MAX
    ));
    let service = load(&json).unwrap();
    let scheme_id = service.verse().schemes[0].id;

    let colors = service.syllable_colors(bar).unwrap();
    assert_eq!(colors.len(), 8);
    assert!(colors[..6].iter().all(Option::is_none));
    assert!(colors[6..].iter().all(Option::is_some));

    let stats = service.scheme_stats(scheme_id).unwrap();
    assert_eq!(stats.vowel_pattern.len(), 2);
}

#[test]
fn invalid_config_is_rejected_by_constructors() {
    let config = EngineConfig {
        palette: vec!["#zzzzzz".to_string()],
        ..EngineConfig::default()
    };
    assert!(matches!(
        VerseService::new(&config),
        Err(VerseServiceError::InvalidConfig(ConfigError::InvalidPaletteColor(_)))
    ));
    assert!(matches!(
        RhymeEngine::new(PassthroughProvider, NoopVocalizationCache, config),
        Err(ConfigError::InvalidPaletteColor(_))
    ));
}

#[test]
fn reconfigure_applies_palette_to_new_schemes_only() {
    let (mut service, first, _) = service_with_two_schemes();
    let old_color = service.verse().schemes[0].color.clone();

    let bad = EngineConfig {
        log_level: "loud".to_string(),
        ..EngineConfig::default()
    };
    assert!(service.reconfigure(&bad).is_err());
    assert_eq!(service.config(), &EngineConfig::default());

    let custom = EngineConfig {
        palette: vec!["#123456".to_string()],
        ..EngineConfig::default()
    };
    service.reconfigure(&custom).unwrap();
    service.select_scheme(None).unwrap();
    service.tap(first, 2);

    assert_eq!(service.verse().schemes[0].color, old_color);
    assert_eq!(service.verse().schemes[2].color, "#123456");
}
