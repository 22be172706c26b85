//! Compound Feature Identifiers

use crate::statistics::Calculator;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: &str = "__";

/// Parsed `<channel>__<calculator>[__<params>]` identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureIdentifier {
    raw: String,
    channel: String,
    calculator: Calculator,
    params: Option<String>,
}

impl FeatureIdentifier {
    /// Parse an identifier.
    ///
    /// The channel is everything before the first `__`. The calculator is the
    /// next `__`-delimited token; whatever follows is kept as parameters.
    pub fn parse(raw: &str) -> Result<Self, FeatureError> {
        let malformed = || FeatureError::MalformedIdentifier(raw.to_string());

        let (channel, rest) = raw.split_once(SEPARATOR).ok_or_else(malformed)?;
        let (calculator, params) = match rest.split_once(SEPARATOR) {
            Some((calc, params)) => (calc, Some(params.to_string())),
            None => (rest, None),
        };

        if channel.is_empty() || calculator.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            raw: raw.to_string(),
            channel: channel.to_string(),
            calculator: Calculator::from_name(calculator),
            params,
        })
    }

    /// Parse a list of identifiers, failing on the first malformed one
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, FeatureError> {
        raw.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// Full identifier as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Source channel name
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Calculator to apply
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Trailing parameter suffix, if any
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }
}

impl FromStr for FeatureIdentifier {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FeatureIdentifier {
    type Error = FeatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FeatureIdentifier> for String {
    fn from(id: FeatureIdentifier) -> Self {
        id.raw
    }
}

impl fmt::Display for FeatureIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let id = FeatureIdentifier::parse("accel_x__mean").unwrap();
        assert_eq!(id.channel(), "accel_x");
        assert_eq!(id.calculator(), &Calculator::Mean);
        assert_eq!(id.params(), None);
    }

    #[test]
    fn test_parse_with_params() {
        let id = FeatureIdentifier::parse("chan__fft_coefficient__coeff_3__attr_\"abs\"").unwrap();
        assert_eq!(id.channel(), "chan");
        assert_eq!(
            id.calculator(),
            &Calculator::Unsupported("fft_coefficient".into())
        );
        assert_eq!(id.params(), Some("coeff_3__attr_\"abs\""));
    }

    #[test]
    fn test_calculator_matches_whole_token() {
        let id = FeatureIdentifier::parse("gyro__mean_abs_change").unwrap();
        assert_eq!(
            id.calculator(),
            &Calculator::Unsupported("mean_abs_change".into())
        );
    }

    #[test]
    fn test_malformed() {
        for raw in ["accel_x", "__mean", "accel_x__", "accel_x____lag_1"] {
            assert_eq!(
                FeatureIdentifier::parse(raw),
                Err(FeatureError::MalformedIdentifier(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let id: FeatureIdentifier = "temp__maximum".parse().unwrap();
        assert_eq!(id.to_string(), "temp__maximum");
    }
}
