//! Window Segmenter Implementation

use crate::config::SegmentConfig;
use crate::error::SegmentError;
use crate::vote::majority_vote;
use crate::window::{Window, WindowMetadata};
use ndarray::Array2;
use sensor_table::{CellValue, ColumnData, SensorTable};
use tracing::{debug, info, warn};

/// Distance between consecutive window starts.
///
/// `max(1, round(window_size * (1 - overlap_ratio)))`, rounding half away
/// from zero.
pub fn step_size(window_size: usize, overlap_ratio: f64) -> usize {
    let step = (window_size as f64 * (1.0 - overlap_ratio)).round();
    (step as usize).max(1)
}

/// Number of windows a source of `rows` samples yields
pub fn window_count(rows: usize, config: &SegmentConfig) -> usize {
    if config.window_size == 0 || rows < config.window_size {
        return 0;
    }
    let step = step_size(config.window_size, config.overlap_ratio);
    (rows - config.window_size) / step + 1
}

/// Segmenter bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct WindowSegmenter {
    config: SegmentConfig,
}

impl WindowSegmenter {
    /// Create a new segmenter
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Segment a table into windows
    pub fn segment<S: AsRef<str>>(
        &self,
        table: &SensorTable,
        channel_names: &[S],
    ) -> Result<Vec<Window>, SegmentError> {
        segment(table, channel_names, &self.config)
    }
}

/// Slice `table` into windows over `channel_names`.
///
/// All configuration errors are reported before any window is built. A
/// window size larger than the table yields an empty list.
pub fn segment<S: AsRef<str>>(
    table: &SensorTable,
    channel_names: &[S],
    config: &SegmentConfig,
) -> Result<Vec<Window>, SegmentError> {
    config.validate()?;

    if channel_names.is_empty() {
        return Err(SegmentError::NoChannels);
    }

    let mut channels: Vec<&[f64]> = Vec::with_capacity(channel_names.len());
    for name in channel_names {
        let name = name.as_ref();
        let column = table
            .column(name)
            .ok_or_else(|| SegmentError::MissingChannel(name.to_string()))?;
        let values = column
            .data
            .as_numeric()
            .ok_or_else(|| SegmentError::NonNumericChannel(name.to_string()))?;
        channels.push(values);
    }

    let time_column = lookup(table, config.time_column.as_deref(), SegmentError::MissingTimeColumn)?;
    let label_column = lookup(table, config.label_column.as_deref(), SegmentError::MissingLabelColumn)?;

    let rows = table.len();
    let window_size = config.window_size;
    let step = step_size(window_size, config.overlap_ratio);

    if rows < window_size {
        warn!(
            "Source has {} samples, fewer than window size {}; no windows produced",
            rows, window_size
        );
        return Ok(Vec::new());
    }

    let names: Vec<String> = channel_names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut windows = Vec::with_capacity(window_count(rows, config));
    let mut start = 0;

    while start + window_size <= rows {
        let end = start + window_size;

        if end - start < config.min_window_samples {
            debug!(
                "Skipping window at {} with {} samples (< {})",
                start,
                end - start,
                config.min_window_samples
            );
            start += step;
            continue;
        }

        let samples = Array2::from_shape_fn((window_size, channels.len()), |(row, ch)| {
            channels[ch][start + row]
        });

        let (numeric_label, class_label) = match label_column {
            Some(labels) => match majority_vote(&labels.cells(start, end)) {
                Some(CellValue::Text(class)) => (0, Some(class)),
                Some(CellValue::Number(value)) => (value.round() as i64, None),
                None => (0, None),
            },
            None => (0, None),
        };

        let (start_time, end_time) = match time_column {
            Some(times) => (times.cell(start), times.cell(end - 1)),
            None => (None, None),
        };

        windows.push(Window {
            window_id: windows.len(),
            start_index: start,
            end_index: end,
            samples,
            numeric_label,
            class_label,
            metadata: WindowMetadata {
                sampling_rate: config.sampling_rate,
                channel_names: names.clone(),
                start_time,
                end_time,
            },
        });

        start += step;
    }

    info!(
        "Segmented {} samples into {} windows (size={}, step={})",
        rows,
        windows.len(),
        window_size,
        step
    );

    Ok(windows)
}

fn lookup<'a>(
    table: &'a SensorTable,
    name: Option<&str>,
    missing: fn(String) -> SegmentError,
) -> Result<Option<&'a ColumnData>, SegmentError> {
    match name {
        Some(name) => table
            .column(name)
            .map(|c| Some(&c.data))
            .ok_or_else(|| missing(name.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sensor_table::Column;

    fn ramp_table(rows: usize, channels: &[&str]) -> SensorTable {
        let columns = channels
            .iter()
            .enumerate()
            .map(|(c, name)| {
                Column::numeric(*name, (0..rows).map(|i| (i * 10 + c) as f64).collect())
            })
            .collect();
        SensorTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_step_size() {
        assert_eq!(step_size(100, 0.0), 100);
        assert_eq!(step_size(100, 0.5), 50);
        assert_eq!(step_size(100, 0.75), 25);
        assert_eq!(step_size(5, 0.5), 3);
        assert_eq!(step_size(1, 0.9), 1);
    }

    #[test]
    fn test_no_overlap_boundary() {
        let table = ramp_table(1000, &["x"]);
        let windows = segment(&table, &["x"], &SegmentConfig::new(100, 0.0)).unwrap();

        // start + W <= N admits start = 900
        assert_eq!(windows.len(), 10);
        let starts: Vec<usize> = windows.iter().map(|w| w.start_index).collect();
        assert_eq!(starts, (0..=900).step_by(100).collect::<Vec<_>>());
    }

    #[test]
    fn test_three_channel_half_overlap() {
        let table = ramp_table(1000, &["ax", "ay", "az"]);
        let windows = segment(&table, &["ax", "ay", "az"], &SegmentConfig::new(100, 0.5)).unwrap();

        assert_eq!(windows.len(), 19);
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.window_id, i);
            assert_eq!(w.start_index, i * 50);
            assert_eq!(w.end_index - w.start_index, 100);
            assert_eq!(w.samples.dim(), (100, 3));
        }
        assert_eq!(windows.last().unwrap().start_index, 900);
    }

    #[test]
    fn test_samples_are_copied_in_channel_order() {
        let table = ramp_table(20, &["a", "b"]);
        let windows = segment(&table, &["b", "a"], &SegmentConfig::new(10, 0.0)).unwrap();

        let w = &windows[1];
        assert_eq!(w.samples[[0, 0]], 101.0);
        assert_eq!(w.samples[[0, 1]], 100.0);
        assert_eq!(w.channel("a").unwrap()[9], 190.0);
        assert_eq!(w.metadata.channel_names, vec!["b", "a"]);
    }

    #[test]
    fn test_window_larger_than_source() {
        let table = ramp_table(50, &["x"]);
        let windows = segment(&table, &["x"], &SegmentConfig::new(100, 0.0)).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn test_missing_channel_is_error() {
        let table = ramp_table(200, &["x"]);
        let err = segment(&table, &["x", "y"], &SegmentConfig::new(100, 0.0)).unwrap_err();
        assert_eq!(err, SegmentError::MissingChannel("y".into()));
    }

    #[test]
    fn test_text_channel_is_error() {
        let table = SensorTable::from_columns(vec![Column::text(
            "note",
            vec!["a".into(); 10],
        )])
        .unwrap();
        let err = segment(&table, &["note"], &SegmentConfig::new(5, 0.0)).unwrap_err();
        assert_eq!(err, SegmentError::NonNumericChannel("note".into()));
    }

    #[test]
    fn test_missing_label_column_is_error() {
        let table = ramp_table(200, &["x"]);
        let config = SegmentConfig::new(100, 0.0).with_label_column("label");
        assert_eq!(
            segment(&table, &["x"], &config).unwrap_err(),
            SegmentError::MissingLabelColumn("label".into())
        );
    }

    #[test]
    fn test_numeric_majority_label() {
        let mut labels = vec![0.0; 10];
        labels[2..9].fill(1.0);
        let table = SensorTable::from_columns(vec![
            Column::numeric("x", vec![0.0; 10]),
            Column::numeric("anomaly", labels),
        ])
        .unwrap();
        let config = SegmentConfig {
            min_window_samples: 1,
            ..SegmentConfig::new(10, 0.0).with_label_column("anomaly")
        };

        let windows = segment(&table, &["x"], &config).unwrap();
        assert_eq!(windows[0].numeric_label, 1);
        assert_eq!(windows[0].class_label, None);
    }

    #[test]
    fn test_text_majority_label() {
        let labels = ["walk", "run", "run", "walk", "run", "idle"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = SensorTable::from_columns(vec![
            Column::numeric("x", vec![0.0; 6]),
            Column::text("activity", labels),
        ])
        .unwrap();
        let config = SegmentConfig {
            min_window_samples: 1,
            ..SegmentConfig::new(6, 0.0).with_label_column("activity")
        };

        let windows = segment(&table, &["x"], &config).unwrap();
        assert_eq!(windows[0].class_label.as_deref(), Some("run"));
        assert_eq!(windows[0].numeric_label, 0);
    }

    #[test]
    fn test_time_bounds_in_metadata() {
        let table = SensorTable::from_columns(vec![
            Column::numeric("x", vec![0.0; 8]),
            Column::numeric("t", (0..8).map(|i| i as f64 / 100.0).collect()),
        ])
        .unwrap();
        let config = SegmentConfig {
            min_window_samples: 1,
            ..SegmentConfig::new(4, 0.5).with_time_column("t")
        };

        let windows = segment(&table, &["x"], &config).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[1].metadata.start_time, Some(CellValue::Number(0.02)));
        assert_eq!(windows[1].metadata.end_time, Some(CellValue::Number(0.05)));
    }

    #[test]
    fn test_min_window_samples_guard() {
        let table = ramp_table(40, &["x"]);
        let config = SegmentConfig {
            min_window_samples: 20,
            ..SegmentConfig::new(10, 0.0)
        };
        assert!(segment(&table, &["x"], &config).unwrap().is_empty());
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let table = ramp_table(500, &["a", "b"]);
        let segmenter = WindowSegmenter::new(SegmentConfig::new(64, 0.25));
        let first = segmenter.segment(&table, &["a", "b"]).unwrap();
        let second = segmenter.segment(&table, &["a", "b"]).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_count_matches_formula(
            rows in 0usize..600,
            window_size in 1usize..120,
            overlap in 0.0f64..0.95,
        ) {
            let table = ramp_table(rows, &["x"]);
            let config = SegmentConfig {
                min_window_samples: 0,
                ..SegmentConfig::new(window_size, overlap)
            };
            let windows = segment(&table, &["x"], &config).unwrap();

            prop_assert_eq!(windows.len(), window_count(rows, &config));
            for w in &windows {
                prop_assert!(w.end_index <= rows);
                prop_assert_eq!(w.end_index - w.start_index, window_size);
                prop_assert_eq!(w.samples.nrows(), window_size);
            }
        }

        #[test]
        fn prop_label_exclusive(labels in proptest::collection::vec(0u8..3, 30)) {
            let text: Vec<String> = labels.iter().map(|l| format!("c{}", l)).collect();
            let table = SensorTable::from_columns(vec![
                Column::numeric("x", vec![0.0; 30]),
                Column::text("cls", text),
            ]).unwrap();
            let config = SegmentConfig {
                min_window_samples: 1,
                ..SegmentConfig::new(10, 0.5).with_label_column("cls")
            };

            for w in segment(&table, &["x"], &config).unwrap() {
                prop_assert!(w.class_label.is_some());
                prop_assert_eq!(w.numeric_label, 0);
            }
        }
    }
}
