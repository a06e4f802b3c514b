//! Algorithm settings consumed by the genetic operators.
//!
//! All fields are public, so a [`Settings`] value is usually created through
//! [`Default`] and adjusted in place:
//! ```
//! use capacity_indicators::settings::{CrossoverKind, Settings};
//! let mut settings = Settings::default();
//! settings.crossover = CrossoverKind::TwoPoint;
//! settings.cx_prob = 0.3;
//! assert!(settings.validate().is_ok());
//! ```
//! Settings can also be loaded from JSON, in which case unknown strategy names
//! are rejected while loading:
//! ```
//! use capacity_indicators::settings::{MutationKind, Settings};
//! let settings = Settings::from_json(r#"{"mutation": "PolynomialBounded", "mut_eta": 15.0}"#).unwrap();
//! assert_eq!(settings.mutation, MutationKind::PolynomialBounded);
//! assert!(Settings::from_json(r#"{"mutation": "Gaussian"}"#).is_err());
//! ```

use crate::ops::OperatorError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const DEFAULT_MUT_PROB: f64 = 0.1;
const DEFAULT_MUT_ETA: f64 = 20.0;
const DEFAULT_CX_PROB: f64 = 0.5;

/// Strategy used to draw fresh capacity indicator vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GenerationMethod {
    /// Uniform percent-level draws for every indicator.
    #[default]
    #[serde(rename = "random")]
    Random,
}

/// Strategy used to mutate capacity indicator vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MutationKind {
    /// Uniform integer mutation on the percent scale.
    #[default]
    UniformBounded,
    /// Bounded polynomial mutation on the unit scale.
    PolynomialBounded,
}

/// Strategy used to recombine two capacity indicator vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CrossoverKind {
    /// Swap the tails behind one cut point.
    OnePoint,
    /// Swap the segment between two cut points.
    #[serde(rename = "TowPoint", alias = "TwoPoint")]
    TwoPoint,
    /// Swap every position independently.
    #[default]
    Uniform,
}

impl GenerationMethod {
    /// Configuration name of the strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
        }
    }
}

impl MutationKind {
    /// Configuration name of the strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UniformBounded => "UniformBounded",
            Self::PolynomialBounded => "PolynomialBounded",
        }
    }
}

impl CrossoverKind {
    /// Configuration name of the strategy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::OnePoint => "OnePoint",
            Self::TwoPoint => "TowPoint",
            Self::Uniform => "Uniform",
        }
    }
}

impl FromStr for GenerationMethod {
    type Err = OperatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "random" => Ok(Self::Random),
            other => Err(OperatorError::unsupported("generation", other)),
        }
    }
}

impl FromStr for MutationKind {
    type Err = OperatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "UniformBounded" => Ok(Self::UniformBounded),
            "PolynomialBounded" => Ok(Self::PolynomialBounded),
            other => Err(OperatorError::unsupported("mutation", other)),
        }
    }
}

impl FromStr for CrossoverKind {
    type Err = OperatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "OnePoint" => Ok(Self::OnePoint),
            "TowPoint" | "TwoPoint" => Ok(Self::TwoPoint),
            "Uniform" => Ok(Self::Uniform),
            other => Err(OperatorError::unsupported("crossover", other)),
        }
    }
}

impl Display for GenerationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for MutationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for CrossoverKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A settings object holding the operator configuration of the optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How fresh vectors are drawn
    pub generation: GenerationMethod,
    /// Mutation strategy
    pub mutation: MutationKind,
    /// Crossover strategy
    pub crossover: CrossoverKind,
    /// Per-indicator mutation probability
    pub mut_prob: f64,
    /// Distribution index of the polynomial mutation
    pub mut_eta: f64,
    /// Per-position swap probability of the uniform crossover
    pub cx_prob: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            generation: GenerationMethod::Random,
            mutation: MutationKind::UniformBounded,
            crossover: CrossoverKind::Uniform,
            mut_prob: DEFAULT_MUT_PROB,
            mut_eta: DEFAULT_MUT_ETA,
            cx_prob: DEFAULT_CX_PROB,
        }
    }
}

impl Settings {
    /// Parses settings from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`SettingsError::Json`] for malformed input or unknown strategy
    /// names and [`SettingsError::Invalid`] for out-of-range parameters.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that every numeric parameter is usable by the operators.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidProbability`] when a probability lies
    /// outside `[0, 1]` and [`OperatorError::InvalidDistributionIndex`] when
    /// `mut_eta` is not strictly positive.
    pub fn validate(&self) -> Result<(), OperatorError> {
        check_probability("mutation", self.mut_prob)?;
        check_probability("crossover", self.cx_prob)?;
        if !(self.mut_eta.is_finite() && self.mut_eta > 0.0) {
            return Err(OperatorError::InvalidDistributionIndex {
                operator: "polynomial mutation",
                value: self.mut_eta,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_probability(operator: &'static str, value: f64) -> Result<(), OperatorError> {
    if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
        return Err(OperatorError::InvalidProbability { operator, value });
    }
    Ok(())
}

/// Errors produced while loading [`Settings`].
#[derive(Debug)]
pub enum SettingsError {
    /// The JSON document could not be parsed.
    Json(serde_json::Error),
    /// The parsed settings hold unusable parameters.
    Invalid(OperatorError),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "could not parse settings: {err}"),
            Self::Invalid(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<OperatorError> for SettingsError {
    fn from(err: OperatorError) -> Self {
        Self::Invalid(err)
    }
}
