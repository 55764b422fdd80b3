//! Summary statistics over a sequence of numbers

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean, bounds and count of a non-empty sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Number of values
    pub count: usize,
}

/// Compute summary statistics
///
/// # Errors
/// * `Error::InvalidInput` - if `numbers` is empty
pub fn summary_stats(numbers: &[f64]) -> Result<Summary> {
    let (&first, rest) = numbers
        .split_first()
        .ok_or_else(|| Error::InvalidInput("number list must not be empty".to_string()))?;

    let (min, max) = rest
        .iter()
        .fold((first, first), |(min, max), &n| (min.min(n), max.max(n)));
    let sum: f64 = numbers.iter().sum();

    Ok(Summary {
        mean: sum / numbers.len() as f64,
        min,
        max,
        count: numbers.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_basic() {
        let summary = summary_stats(&[2.0, 4.0, 6.0]).unwrap();

        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 6.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_summary_empty() {
        assert!(matches!(summary_stats(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_summary_single_and_negative() {
        let summary = summary_stats(&[-1.5]).unwrap();
        assert_eq!(summary.mean, -1.5);
        assert_eq!(summary.min, -1.5);
        assert_eq!(summary.max, -1.5);
        assert_eq!(summary.count, 1);

        let summary = summary_stats(&[3.0, -7.0, 1.0]).unwrap();
        assert_eq!(summary.min, -7.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.mean, -1.0);
    }
}
