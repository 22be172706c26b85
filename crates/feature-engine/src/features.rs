//! Host-Side Feature Vector Assembly

use crate::identifier::FeatureIdentifier;
use crate::FeatureError;
use tracing::debug;
use window_segmenter::Window;

/// Compute the selected features for one window, in selection order
pub fn extract_window_features(
    window: &Window,
    features: &[FeatureIdentifier],
) -> Result<Vec<f64>, FeatureError> {
    let mut values = Vec::with_capacity(features.len());

    for feature in features {
        let column = window
            .channel(feature.channel())
            .ok_or_else(|| FeatureError::UnknownChannel {
                feature: feature.to_string(),
                channel: feature.channel().to_string(),
            })?;
        let samples: Vec<f64> = column.iter().copied().collect();
        values.push(feature.calculator().evaluate(&samples));
    }

    Ok(values)
}

/// Compute feature vectors for every window
pub fn extract_all(
    windows: &[Window],
    features: &[FeatureIdentifier],
) -> Result<Vec<Vec<f64>>, FeatureError> {
    debug!(
        "Extracting {} features from {} windows",
        features.len(),
        windows.len()
    );
    windows
        .iter()
        .map(|w| extract_window_features(w, features))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_table::{Column, SensorTable};
    use window_segmenter::{segment, SegmentConfig};

    fn windows() -> Vec<Window> {
        let table = SensorTable::from_columns(vec![
            Column::numeric("x", (0..20).map(|i| i as f64).collect()),
            Column::numeric("y", vec![2.0; 20]),
        ])
        .unwrap();
        let config = SegmentConfig {
            min_window_samples: 1,
            ..SegmentConfig::new(10, 0.0)
        };
        segment(&table, &["x", "y"], &config).unwrap()
    }

    #[test]
    fn test_feature_extraction() {
        let features =
            FeatureIdentifier::parse_all(&["x__mean", "x__max", "y__variance", "x__length"]).unwrap();
        let values = extract_window_features(&windows()[1], &features).unwrap();
        assert_eq!(values, vec![14.5, 19.0, 0.0, 10.0]);
    }

    #[test]
    fn test_stub_feature_is_zero() {
        let features = FeatureIdentifier::parse_all(&["x__fft_coefficient__coeff_1"]).unwrap();
        let values = extract_window_features(&windows()[0], &features).unwrap();
        assert_eq!(values, vec![0.0]);
    }

    #[test]
    fn test_unknown_channel() {
        let features = FeatureIdentifier::parse_all(&["z__mean"]).unwrap();
        let err = extract_all(&windows(), &features).unwrap_err();
        assert_eq!(
            err,
            FeatureError::UnknownChannel {
                feature: "z__mean".into(),
                channel: "z".into()
            }
        );
    }
}
