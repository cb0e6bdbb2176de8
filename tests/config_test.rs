use anyhow::Result;
use calcium_align::{AlignError, AnalysisConfig, ColorMap};
use std::io::Write;

#[test]
fn test_default_palette() {
    let config = AnalysisConfig::default();

    assert_eq!(config.colors.get("Sucrose"), Some("magenta"));
    assert_eq!(config.colors.get("Doing Nothing"), Some("gray"));
    assert_eq!(config.eating.offset, 34.0);
    assert!(config.is_trial_event("MSG"));
    assert!(!config.is_trial_event("Rinse"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() -> Result<()> {
    let config = AnalysisConfig::from_json_str(
        r#"{
            "colors": { "Vanilla": "beige" },
            "bout_gap": 0.25,
            "eating": { "offset": 12.5 }
        }"#,
    )?;

    assert_eq!(config.colors.len(), 1);
    assert_eq!(config.colors.color_for("Vanilla")?, "beige");
    assert_eq!(config.bout_gap, 0.25);
    assert_eq!(config.trial_gap, 1.0);
    assert_eq!(config.eating.offset, 12.5);
    assert_eq!(config.eating.baseline_marker, "Interval");
    assert_eq!(config.lick_event, "Lick");
    Ok(())
}

#[test]
fn test_invalid_gap_rejected() {
    let err = AnalysisConfig::from_json_str(r#"{ "trial_gap": -1.0 }"#).unwrap_err();

    let inner = err.downcast_ref::<AlignError>();
    assert!(matches!(inner, Some(AlignError::InvalidConfig(_))), "{err:?}");
}

#[test]
fn test_config_file_round_trip() -> Result<()> {
    let mut config = AnalysisConfig::default();
    config.colors.insert("Vanilla", "beige");
    config.spontaneous_gap = 12.0;

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(config.to_json_string()?.as_bytes())?;
    file.flush()?;

    let loaded = AnalysisConfig::from_json_file(file.path())?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let err = AnalysisConfig::from_json_file("/nonexistent/calcium-align.json").unwrap_err();

    assert!(err.to_string().contains("/nonexistent/calcium-align.json"));
}

#[test]
fn test_color_map_lookup() {
    let colors: ColorMap = [("A", "red")].into_iter().collect();

    assert_eq!(colors.color_for("A"), Ok("red"));
    assert_eq!(
        colors.color_for("B"),
        Err(AlignError::MissingColor("B".to_string()))
    );
    assert!(ColorMap::empty().is_empty());
    assert!(!ColorMap::default().is_empty());
}
