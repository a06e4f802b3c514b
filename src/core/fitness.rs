//! Fitness attached to every capacity indicator vector.
//!
//! Values are filled in by the evaluation layer after the supply system has
//! been simulated. Each objective carries a weight whose sign states whether
//! it is maximized (positive) or minimized (negative), and comparisons are
//! made on the weighted values.

use super::IndicatorError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Weighted, possibly multi-objective fitness.
///
/// # Examples
/// ```
/// use capacity_indicators::Fitness;
///
/// let mut cheap = Fitness::new(vec![-1.0, -1.0]);
/// let mut expensive = Fitness::new(vec![-1.0, -1.0]);
/// cheap.set_values(vec![10.0, 3.0]).unwrap();
/// expensive.set_values(vec![12.0, 3.0]).unwrap();
/// assert!(cheap > expensive);
/// assert!(cheap.dominates(&expensive));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fitness {
    weights: Vec<f64>,
    values: Option<Vec<f64>>,
}

impl Fitness {
    /// Creates an invalid (not yet evaluated) fitness with the given weights.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self {
            weights,
            values: None,
        }
    }

    /// Objective weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Raw objective values, if evaluated.
    #[must_use]
    pub fn values(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    /// Stores evaluated objective values.
    ///
    /// # Errors
    /// Returns [`IndicatorError::FitnessLengthMismatch`] when the number of
    /// values differs from the number of weights.
    pub fn set_values(&mut self, values: Vec<f64>) -> Result<(), IndicatorError> {
        if values.len() != self.weights.len() {
            return Err(IndicatorError::FitnessLengthMismatch {
                expected: self.weights.len(),
                found: values.len(),
            });
        }
        self.values = Some(values);
        Ok(())
    }

    /// Discards the evaluated values.
    pub fn invalidate(&mut self) {
        self.values = None;
    }

    /// Indicates whether the fitness has been evaluated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.values.is_some()
    }

    /// Values multiplied by their weights; larger is better.
    #[must_use]
    pub fn weighted_values(&self) -> Option<Vec<f64>> {
        self.values.as_ref().map(|values| {
            values
                .iter()
                .zip(&self.weights)
                .map(|(value, weight)| value * weight)
                .collect()
        })
    }

    /// Pareto dominance: no worse in every objective and better in one.
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        let (Some(own), Some(theirs)) = (self.weighted_values(), other.weighted_values()) else {
            return false;
        };
        if own.len() != theirs.len() {
            return false;
        }
        let mut strictly_better = false;
        for (lhs, rhs) in own.iter().zip(&theirs) {
            if lhs < rhs {
                return false;
            }
            if lhs > rhs {
                strictly_better = true;
            }
        }
        strictly_better
    }
}

impl Default for Fitness {
    fn default() -> Self {
        Self::new(vec![-1.0])
    }
}

/// Equal only when both are evaluated and their weighted values match, so that
/// `==` agrees with [`PartialOrd`].
impl PartialEq for Fitness {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.partial_cmp(other), Some(Ordering::Equal))
    }
}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let own = self.weighted_values()?;
        let theirs = other.weighted_values()?;
        own.partial_cmp(&theirs)
    }
}
