//! Mutation strategies and the mutation entry point.

use crate::core::CapacityIndicatorVector;
use crate::ops::{assign_feasible_draw, random_between, random_unit, OperatorError};
use crate::settings::{check_probability, MutationKind, Settings};
use rand::RngCore;
use std::sync::Arc;

/// Percent scale used by the uniform bounded mutation.
const PERCENT: f64 = 100.0;

/// Perturbs a gene slice and returns the mutated copy.
///
/// # Examples
/// ```
/// use capacity_indicators::ops::MutationOperator;
/// use rand::thread_rng;
///
/// struct Halve;
///
/// impl MutationOperator for Halve {
///     fn mutate(&self, parent: &[f64], _rng: &mut dyn rand::RngCore) -> Vec<f64> {
///         parent.iter().map(|value| value / 2.0).collect()
///     }
/// }
///
/// let child = Halve.mutate(&[0.5, 1.0], &mut thread_rng());
/// assert_eq!(child, vec![0.25, 0.5]);
/// ```
pub trait MutationOperator: Send + Sync {
    /// Mutates the provided gene slice.
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64>;
}

impl<T: MutationOperator + ?Sized> MutationOperator for &T {
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64> {
        (**self).mutate(parent, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Box<T> {
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64> {
        (**self).mutate(parent, rng)
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Arc<T> {
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64> {
        (**self).mutate(parent, rng)
    }
}

/// Replaces genes with a uniformly drawn integer from `[low, up]`.
#[derive(Debug, Clone)]
pub struct UniformIntMutation {
    low: usize,
    up: usize,
    probability: f64,
}

impl UniformIntMutation {
    /// Creates a uniform integer mutation.
    ///
    /// # Errors
    /// Returns [`OperatorError`] when `low` exceeds `up` or the probability
    /// lies outside `[0, 1]`.
    pub fn new(low: usize, up: usize, probability: f64) -> Result<Self, OperatorError> {
        if low > up {
            #[allow(clippy::cast_precision_loss)]
            let (lower, upper) = (low as f64, up as f64);
            return Err(OperatorError::InvalidBounds { lower, upper });
        }
        check_probability("uniform integer mutation", probability)?;
        Ok(Self {
            low,
            up,
            probability,
        })
    }
}

impl MutationOperator for UniformIntMutation {
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64> {
        let mut child = parent.to_vec();
        for gene in &mut child {
            if random_unit(rng) < self.probability {
                #[allow(clippy::cast_precision_loss)]
                let drawn = random_between(self.low, self.up, rng) as f64;
                *gene = drawn;
            }
        }
        child
    }
}

/// Polynomial mutation that keeps every gene within `[lower, upper]`.
#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    distribution_index: f64,
    probability: f64,
    lower: f64,
    upper: f64,
}

impl PolynomialMutation {
    /// Creates a new polynomial mutation operator.
    ///
    /// # Errors
    /// Returns [`OperatorError`] when the distribution index or probability is
    /// invalid, or when `lower` exceeds `upper`.
    pub fn new(
        lower: f64,
        upper: f64,
        distribution_index: f64,
        probability: f64,
    ) -> Result<Self, OperatorError> {
        if !(distribution_index.is_finite() && distribution_index > 0.0) {
            return Err(OperatorError::InvalidDistributionIndex {
                operator: "polynomial mutation",
                value: distribution_index,
            });
        }
        check_probability("polynomial mutation", probability)?;
        if !(lower.is_finite() && upper.is_finite() && lower <= upper) {
            return Err(OperatorError::InvalidBounds { lower, upper });
        }
        Ok(Self {
            distribution_index,
            probability,
            lower,
            upper,
        })
    }
}

impl MutationOperator for PolynomialMutation {
    fn mutate(&self, parent: &[f64], rng: &mut dyn RngCore) -> Vec<f64> {
        let mut child = parent.to_vec();
        let range = self.upper - self.lower;
        for gene in &mut child {
            if random_unit(rng) > self.probability {
                continue;
            }
            if range.abs() < f64::EPSILON {
                *gene = self.lower;
                continue;
            }
            let delta1 = (*gene - self.lower) / range;
            let delta2 = (self.upper - *gene) / range;
            let exponent = self.distribution_index + 1.0;
            let mut u = random_unit(rng);
            let mut delta_q = if u <= 0.5 {
                let term = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta1).powf(exponent);
                term.powf(1.0 / exponent) - 1.0
            } else {
                u = 1.0 - u;
                let term = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta2).powf(exponent);
                1.0 - term.powf(1.0 / exponent)
            };
            if !delta_q.is_finite() {
                delta_q = 0.0;
            }
            *gene = (*gene + delta_q * range).clamp(self.lower, self.upper);
        }
        child
    }
}

/// Mutates `civ` in place with the strategy configured in `settings`, then
/// repairs category coverage.
///
/// # Examples
/// ```
/// use capacity_indicators::ops::mutate;
/// use capacity_indicators::{CapacityIndicatorVector, Category, Settings};
/// use rand::SeedableRng;
///
/// let mut civ = CapacityIndicatorVector::from_structure(vec![
///     ("VCC1", Category::Primary),
///     ("BO1", Category::Secondary),
/// ])
/// .unwrap();
/// let mut settings = Settings::default();
/// settings.mut_prob = 1.0;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(4);
/// mutate(&mut civ, &settings, &mut rng).unwrap();
/// assert!(civ.is_feasible());
/// ```
///
/// # Errors
/// Returns [`OperatorError`] when the settings hold unusable parameters.
pub fn mutate<'a>(
    civ: &'a mut CapacityIndicatorVector,
    settings: &Settings,
    rng: &mut dyn RngCore,
) -> Result<&'a mut CapacityIndicatorVector, OperatorError> {
    match settings.mutation {
        MutationKind::UniformBounded => {
            let operator = UniformIntMutation::new(0, 100, settings.mut_prob)?;
            assign_feasible_draw(civ, rng, |current, rng| {
                let percentages: Vec<f64> = current.iter().map(|value| value * PERCENT).collect();
                operator
                    .mutate(&percentages, rng)
                    .into_iter()
                    .map(|percentage| percentage / PERCENT)
                    .collect()
            })?;
        }
        MutationKind::PolynomialBounded => {
            let operator =
                PolynomialMutation::new(0.0, 1.0, settings.mut_eta, settings.mut_prob)?;
            let child = operator.mutate(&civ.values(), rng);
            civ.set_range(.., &child)?;
        }
    }
    Ok(civ.reset())
}
