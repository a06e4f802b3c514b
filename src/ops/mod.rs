//! Genetic operators for capacity indicator vectors.
//!
//! The perturbation strategies ([`MutationOperator`], [`CrossoverOperator`])
//! work on raw gene slices and know nothing about supply system categories.
//! The entry points [`generate`], [`mutate`] and [`mate`] pick a strategy from
//! the [`Settings`](crate::Settings), write its result into the vector and
//! repair category coverage before returning.

pub mod crossover;
pub mod generation;
pub mod mutation;

pub use crossover::{mate, CrossoverOperator, OnePointCrossover, TwoPointCrossover, UniformCrossover};
pub use generation::generate;
pub use mutation::{mutate, MutationOperator, PolynomialMutation, UniformIntMutation};

use crate::core::{CapacityIndicatorVector, IndicatorError};
use log::{debug, warn};
use rand::RngCore;
use std::fmt::{self, Display, Formatter};

/// Number of random draws tried before falling back to the deterministic repair.
pub const MAX_DRAW_ATTEMPTS: usize = 10;

/// Errors produced while configuring or applying an operator.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// The configured strategy name is not implemented.
    UnsupportedStrategy {
        /// Kind of operator (generation, mutation or crossover).
        operator: &'static str,
        /// Name that was requested.
        name: String,
    },
    /// A probability was outside `[0, 1]`.
    InvalidProbability {
        /// Name of the operator reporting the error.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A distribution index was not strictly positive.
    InvalidDistributionIndex {
        /// Name of the operator reporting the error.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Lower and upper bounds of an operator are reversed.
    InvalidBounds {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// Wrapper around [`IndicatorError`].
    Indicator(IndicatorError),
}

impl OperatorError {
    pub(crate) fn unsupported(operator: &'static str, name: &str) -> Self {
        Self::UnsupportedStrategy {
            operator,
            name: name.to_owned(),
        }
    }
}

impl Display for OperatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedStrategy { operator, name } => write!(
                f,
                "the {operator} method '{name}' has not been implemented for capacity indicator vectors"
            ),
            Self::InvalidProbability { operator, value } => write!(
                f,
                "{operator} probability must be within [0, 1] (received {value})"
            ),
            Self::InvalidDistributionIndex { operator, value } => write!(
                f,
                "{operator} distribution index must be positive (received {value})"
            ),
            Self::InvalidBounds { lower, upper } => {
                write!(f, "lower bound {lower} exceeds upper bound {upper}")
            }
            Self::Indicator(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OperatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Indicator(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IndicatorError> for OperatorError {
    fn from(err: IndicatorError) -> Self {
        Self::Indicator(err)
    }
}

/// Assigns the first draw the vector accepts as a whole. When every draw
/// leaves a category understocked, the last one is written positionally and
/// repaired instead.
pub(crate) fn assign_feasible_draw<F>(
    civ: &mut CapacityIndicatorVector,
    rng: &mut dyn RngCore,
    mut draw: F,
) -> Result<(), OperatorError>
where
    F: FnMut(&[f64], &mut dyn RngCore) -> Vec<f64>,
{
    let current = civ.values();
    let mut rejected = None;
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        let candidate = draw(&current, &mut *rng);
        match civ.set_values(&candidate) {
            Ok(()) => return Ok(()),
            Err(IndicatorError::InsufficientCoverage { category, sum }) => {
                debug!("draw {attempt} rejected: {category:?} indicators add up to {sum}");
                rejected = Some(candidate);
            }
            Err(err) => return Err(err.into()),
        }
    }
    if let Some(candidate) = rejected {
        warn!(
            "no feasible draw within {MAX_DRAW_ATTEMPTS} attempts, repairing the last one instead"
        );
        civ.set_range(.., &candidate)?;
        civ.reset();
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn random_unit(rng: &mut dyn RngCore) -> f64 {
    let value = rng.next_u64() as f64;
    value / (u64::MAX as f64 + 1.0)
}

/// Uniform integer in `[low, high]`.
pub(crate) fn random_between(low: usize, high: usize, rng: &mut dyn RngCore) -> usize {
    #[allow(clippy::cast_possible_truncation)]
    let offset = (rng.next_u64() % (high - low + 1) as u64) as usize;
    low + offset
}
