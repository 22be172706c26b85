//! Statistical Calculators
//!
//! Host-side evaluation of the calculators the translator understands. The
//! numeric semantics match the generated C fragments: population variance,
//! two passes, extrema seeded from the first sample.

use std::fmt;

/// Calculator named by the second token of a feature identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Calculator {
    /// Sample count
    Length,
    /// Arithmetic mean
    Mean,
    /// Population variance (divides by n)
    Variance,
    /// Square root of the population variance
    StandardDeviation,
    /// Largest sample
    Maximum,
    /// Smallest sample
    Minimum,
    /// No embedded template; evaluates to a zero stub
    Unsupported(String),
}

impl Calculator {
    /// Map a calculator name onto the supported vocabulary
    pub fn from_name(name: &str) -> Self {
        match name {
            "length" => Calculator::Length,
            "mean" | "average" => Calculator::Mean,
            "variance" => Calculator::Variance,
            "standard_deviation" | "std" => Calculator::StandardDeviation,
            "maximum" | "max" => Calculator::Maximum,
            "minimum" | "min" => Calculator::Minimum,
            other => Calculator::Unsupported(other.to_string()),
        }
    }

    /// Canonical name
    pub fn name(&self) -> &str {
        match self {
            Calculator::Length => "length",
            Calculator::Mean => "mean",
            Calculator::Variance => "variance",
            Calculator::StandardDeviation => "standard_deviation",
            Calculator::Maximum => "maximum",
            Calculator::Minimum => "minimum",
            Calculator::Unsupported(name) => name,
        }
    }

    /// Whether generated code computes a real value
    pub fn is_implemented(&self) -> bool {
        !matches!(self, Calculator::Unsupported(_))
    }

    /// Compute the calculator over a buffer.
    ///
    /// Unsupported calculators and empty buffers yield `0.0`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let n = values.len() as f64;

        match self {
            Calculator::Length => n,
            Calculator::Mean => mean(values),
            Calculator::Variance => variance(values),
            Calculator::StandardDeviation => variance(values).sqrt(),
            Calculator::Maximum => values[1..].iter().fold(values[0], |m, &v| if v > m { v } else { m }),
            Calculator::Minimum => values[1..].iter().fold(values[0], |m, &v| if v < m { v } else { m }),
            Calculator::Unsupported(_) => 0.0,
        }
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    let mean = mean(values);
    let mut m2 = 0.0;
    for &v in values {
        let d = v - mean;
        m2 += d * d;
    }
    m2 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((Calculator::Mean.evaluate(&values) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_variance() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // population variance is exactly 4, sample variance would be 32/7
        assert!((Calculator::Variance.evaluate(&values) - 4.0).abs() < 1e-12);
        assert!((Calculator::StandardDeviation.evaluate(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_extrema() {
        let values = vec![-3.0, 7.5, 0.0, 7.4, -3.5];
        assert_eq!(Calculator::Maximum.evaluate(&values), 7.5);
        assert_eq!(Calculator::Minimum.evaluate(&values), -3.5);
    }

    #[test]
    fn test_length() {
        assert_eq!(Calculator::Length.evaluate(&[1.0; 42]), 42.0);
    }

    #[test]
    fn test_unsupported_is_zero() {
        let calc = Calculator::from_name("fft_coefficient");
        assert!(!calc.is_implemented());
        assert_eq!(calc.evaluate(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Calculator::from_name("average"), Calculator::Mean);
        assert_eq!(Calculator::from_name("std"), Calculator::StandardDeviation);
        assert_eq!(Calculator::from_name("max"), Calculator::Maximum);
        assert_eq!(Calculator::from_name("min"), Calculator::Minimum);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(Calculator::Mean.evaluate(&[]), 0.0);
        assert_eq!(Calculator::Maximum.evaluate(&[]), 0.0);
    }
}
