use super::*;

#[test]
fn defaults_match_documented_delays() {
    let o = CaptureOpts::default();
    assert_eq!(o.tile_delay, Duration::from_millis(100));
    assert_eq!(o.scale_settle_delay, Duration::from_millis(250));
    assert_eq!(o.min_tick, Duration::from_millis(10));
    assert!(o.restore_on_cancel);
    assert_eq!(o.background, Rgba8::TRANSPARENT);
    assert_eq!(o.max_pixels, DEFAULT_MAX_PIXELS);
}

#[test]
fn empty_config_resolves_to_defaults() {
    let cfg: CaptureConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.to_opts().unwrap(), CaptureOpts::default());
    assert_eq!(cfg.output_dir(), PathBuf::from(DEFAULT_OUTPUT_DIR));
}

#[test]
fn config_overrides_apply() {
    let cfg: CaptureConfig = serde_json::from_str(
        r#"{
            "tile_delay_secs": 0.5,
            "restore_on_cancel": false,
            "background": [1, 2, 3, 255],
            "output_dir": "shots"
        }"#,
    )
    .unwrap();
    let o = cfg.to_opts().unwrap();
    assert_eq!(o.tile_delay, Duration::from_millis(500));
    assert_eq!(o.scale_settle_delay, Duration::from_millis(250));
    assert!(!o.restore_on_cancel);
    assert_eq!(o.background, Rgba8::new(1, 2, 3, 255));
    assert_eq!(cfg.output_dir(), PathBuf::from("shots"));
}

#[test]
fn negative_delay_is_a_config_error() {
    let cfg = CaptureConfig {
        tile_delay_secs: Some(-0.1),
        ..CaptureConfig::default()
    };
    let err = cfg.to_opts().unwrap_err();
    assert!(matches!(err, TilecapError::Config(_)));
    assert!(err.to_string().contains("tile_delay_secs"));
}

#[test]
fn max_pixels_override_and_zero_rejection() {
    let cfg: CaptureConfig = serde_json::from_str(r#"{ "max_pixels": 4096 }"#).unwrap();
    assert_eq!(cfg.to_opts().unwrap().max_pixels, 4096);

    let cfg = CaptureConfig {
        max_pixels: Some(0),
        ..CaptureConfig::default()
    };
    assert!(matches!(cfg.to_opts(), Err(TilecapError::Config(_))));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<CaptureConfig>(r#"{ "tile_dealy_secs": 1 }"#).is_err());
}

#[test]
fn load_reports_parse_errors_as_config_errors() {
    let dir = PathBuf::from("target").join("unit_opts");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        CaptureConfig::load(&path),
        Err(TilecapError::Config(_))
    ));
    assert!(matches!(
        CaptureConfig::load(&dir.join("missing.json")),
        Err(TilecapError::Other(_))
    ));
}
