mod common;

use anyhow::Result;
use calcium_align::{AlignError, AnalysisConfig, EatingData, EatingMarker, SignalTable};
use common::{table_from_fn, uniform_axis};

/// 0-100 s at 2 Hz; C0 constant negative, C1 rising, C2 falling
fn eating_table() -> SignalTable {
    table_from_fn(uniform_axis(201, 0.5), &["C0", "C1", "C2"], |i, c| match c {
        0 => -1.0,
        1 => i as f64,
        _ => 1000.0 - i as f64,
    })
}

/// Video-time markers, deliberately out of order
fn markers() -> Vec<EatingMarker> {
    vec![
        EatingMarker::new("Grooming", 10.0, 12.0),
        EatingMarker::new("Approach", 3.0, 4.0),
        EatingMarker::new("Interval", 0.0, 2.0),
        EatingMarker::new("Sniffing", 13.0, 14.0),
        EatingMarker::new("Eating", 5.0, 8.0),
        EatingMarker::new("Entry", 4.0, 5.0),
    ]
}

#[test]
fn test_markers_sorted_offset_and_filtered() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let eating = EatingData::new(&table, markers(), &config)?;

    let names: Vec<&str> = eating.markers().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Interval", "Approach", "Entry", "Eating", "Grooming"]);

    let interval = &eating.markers()[0];
    assert_eq!((interval.start, interval.stop), (34.0, 36.0));
    assert_eq!((interval.start_index, interval.stop_index), (68, 72));
    Ok(())
}

#[test]
fn test_marker_signals_relabel_baseline() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let eating = EatingData::new(&table, markers(), &config)?;

    let signals = eating.signals()?;

    // 68..=72, 74..=84 (three touching markers), 88..=92
    assert_eq!(signals.len(), 21);
    assert_eq!(
        signals.distinct_labels(),
        vec!["Doing Nothing", "Approach", "Entry", "Eating", "Grooming"]
    );
    let at_76 = signals.indices().iter().position(|&i| i == 76).expect("row 76");
    assert_eq!(signals.labels()[at_76], "Approach");

    let grooming = eating.signals_for(&["Grooming"])?;
    assert_eq!(grooming.len(), 5);
    assert!(grooming.colors().iter().all(|c| c == "purple"));
    Ok(())
}

#[test]
fn test_baseline_window() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let eating = EatingData::new(&table, markers(), &config)?;

    let baseline = eating.baseline()?;

    assert_eq!(baseline.label(), "Doing Nothing");
    assert_eq!(baseline.color(), "gray");
    assert_eq!(baseline.indices(), 68..=72);
    Ok(())
}

#[test]
fn test_missing_baseline_is_an_error() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let eating = EatingData::new(&table, vec![EatingMarker::new("Eating", 1.0, 2.0)], &config)?;

    assert_eq!(
        eating.baseline().unwrap_err(),
        AlignError::UnknownEvent("Interval".to_string())
    );
    Ok(())
}

#[test]
fn test_approach_sequences() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let eating = EatingData::new(&table, markers(), &config)?;

    let sequences = eating.approach_sequences()?;

    assert_eq!(sequences.len(), 1);
    let seq = &sequences[0];
    assert_eq!(seq.ordinal, 2);
    assert_eq!(seq.approach.start, 37.0);
    assert_eq!(seq.entry.start, 38.0);
    assert_eq!(seq.eating.stop, 42.0);
    assert_eq!(seq.signal.indices(), 74..=84);

    let heatmap = seq.heatmap_signal()?;
    assert_eq!(heatmap.channels(), ["C2", "C1", "C0"]);
    assert!(heatmap.data().iter().all(|&v| v >= 0.0));
    Ok(())
}

#[test]
fn test_broken_sequence_is_skipped() -> Result<()> {
    let table = eating_table();
    let config = AnalysisConfig::default();
    let markers = vec![
        EatingMarker::new("Approach", 1.0, 2.0),
        EatingMarker::new("Grooming", 2.0, 3.0),
        EatingMarker::new("Entry", 3.0, 4.0),
        EatingMarker::new("Eating", 4.0, 5.0),
    ];
    let eating = EatingData::new(&table, markers, &config)?;

    assert!(eating.approach_sequences()?.is_empty());
    Ok(())
}

#[test]
fn test_custom_offset() -> Result<()> {
    let table = eating_table();
    let mut config = AnalysisConfig::default();
    config.eating.offset = 0.0;
    let eating = EatingData::new(&table, vec![EatingMarker::new("Eating", 5.0, 8.0)], &config)?;

    assert_eq!(eating.markers()[0].start_index, 10);
    assert_eq!(eating.markers()[0].stop_index, 16);
    Ok(())
}
