// Page options parsing and tuning validation.

use hero_core::*;

#[test]
fn options_parse_from_camel_case_json() {
    let opts = HeroOptions::from_json(
        r#"{
            "keywords": ["対話", "データ"],
            "containerHeight": "80vh",
            "wordFontWeight": "300",
            "follow": { "mode": "afterScroll", "thresholdPx": 200 },
            "seed": 7
        }"#,
    )
    .unwrap();
    assert_eq!(opts.keywords, vec!["対話", "データ"]);
    assert_eq!(opts.container_height, "80vh");
    assert_eq!(opts.word_font_weight, "300");
    assert_eq!(opts.follow, FollowPolicy::AfterScroll { threshold_px: 200.0 });
    assert_eq!(opts.seed, Some(7));
}

#[test]
fn missing_fields_take_defaults() {
    let opts = HeroOptions::from_json("{}").unwrap();
    assert!(opts.keywords.is_empty());
    assert_eq!(opts.container_height, "calc(95vh)");
    assert_eq!(opts.word_font_weight, "100");
    assert_eq!(opts.follow, FollowPolicy::Always);
    assert_eq!(opts.seed, None);

    let opts = HeroOptions::from_json(r#"{"follow":{"mode":"always"}}"#).unwrap();
    assert_eq!(opts.follow, FollowPolicy::Always);
}

#[test]
fn blank_keywords_are_dropped() {
    let opts = HeroOptions::from_json(r#"{"keywords": ["a", "", "   ", "b"]}"#).unwrap();
    assert_eq!(opts.keywords, vec!["a", "b"]);
    let opts = HeroOptions::with_keywords(["", "x"]);
    assert_eq!(opts.keywords, vec!["x"]);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        HeroOptions::from_json("{ keywords: "),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        HeroOptions::from_json(r#"{"keywords": "not a list"}"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn validation_rejects_bad_tuning() {
    let zero_spawn = HeroConfig {
        spawn_count_min: 0,
        ..HeroConfig::default()
    };
    assert!(matches!(
        zero_spawn.validate(),
        Err(ConfigError::InvalidValue {
            name: "spawn_count_min",
            ..
        })
    ));

    let bad_lerp = HeroConfig {
        follow_lerp: 1.5,
        ..HeroConfig::default()
    };
    assert!(bad_lerp.validate().is_err());

    let negative_gap = HeroConfig {
        min_trigger_gap_sec: -1.0,
        ..HeroConfig::default()
    };
    assert!(negative_gap.validate().is_err());

    let err = HeroConfig {
        auto_blast_min_sec: 5.0,
        auto_blast_max_sec: 1.0,
        ..HeroConfig::default()
    }
    .validate()
    .unwrap_err();
    assert!(err.to_string().contains("auto_blast_delay"));
}

#[test]
fn config_defaults_match_device_tiers() {
    let cfg = HeroConfig::default();
    assert_eq!(cfg.lens_diameter_vmin(DeviceClass::Desktop), 50.0);
    assert_eq!(cfg.lens_diameter_vmin(DeviceClass::Mobile), 65.0);
    assert_eq!(cfg.lens_border_px(DeviceClass::Desktop), 20.0);
    assert_eq!(cfg.lens_border_px(DeviceClass::Mobile), 12.0);
    assert_eq!(cfg.default_offset(DeviceClass::Mobile), [0.0, -60.0]);
}
