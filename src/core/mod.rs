//! Capacity indicator primitives.
//!
//! A [`CapacityIndicator`] states which share of a component's maximum viable
//! capacity is installed in one configuration of a supply system. A
//! [`CapacityIndicatorVector`] lines those indicators up in the fixed order
//! used by the genetic operators and keeps every placement [`Category`]
//! able to cover its demand.

pub mod correction;
pub mod fitness;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::{Bound, Index, Range, RangeBounds};
use std::str::FromStr;

pub use fitness::Fitness;

/// Number of decimals kept for every indicator value (percent-level resolution).
pub const VALUE_DECIMALS: usize = 2;

/// Rounds a value to the indicator precision of [`VALUE_DECIMALS`] decimals.
///
/// The result is the nearest two-decimal number to the exact binary value,
/// with ties going to the even last digit.
///
/// # Examples
/// ```
/// use capacity_indicators::core::round_to_precision;
/// assert_eq!(round_to_precision(0.3333), 0.33);
/// assert_eq!(round_to_precision(0.999), 1.0);
/// assert_eq!(round_to_precision(0.125), 0.12);
/// ```
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    format!("{value:.prec$}", prec = VALUE_DECIMALS)
        .parse()
        .unwrap_or(value)
}

/// Placement stage of a supply system component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Components that supply the system demand directly.
    Primary,
    /// Components that supply the primary components.
    Secondary,
    /// Components that reject or absorb heat from the other stages.
    Tertiary,
}

impl Category {
    /// All categories in their canonical order.
    pub const ALL: [Category; 3] = [Category::Primary, Category::Secondary, Category::Tertiary];

    /// Returns the lowercase name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = IndicatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "tertiary" => Ok(Self::Tertiary),
            other => Err(IndicatorError::UnknownCategory(other.to_owned())),
        }
    }
}

/// Errors raised when indicator values or vector shapes are invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// An indicator value fell outside `[0, 1]`.
    ValueOutOfRange(f64),
    /// A component code was provided but empty.
    EmptyCode,
    /// A category name is not one of primary, secondary or tertiary.
    UnknownCategory(String),
    /// A list of values does not match the length it replaces.
    LengthMismatch {
        /// Number of values expected.
        expected: usize,
        /// Number of values provided.
        found: usize,
    },
    /// A position or range lies outside the vector.
    IndexOutOfBounds {
        /// Offending position.
        index: usize,
        /// Length of the vector.
        len: usize,
    },
    /// Bulk assignment would leave a category unable to cover its demand.
    InsufficientCoverage {
        /// Category that falls short (`None` for uncategorized indicators).
        category: Option<Category>,
        /// Sum of the proposed values in that category.
        sum: f64,
    },
    /// Fitness values do not line up with the fitness weights.
    FitnessLengthMismatch {
        /// Number of weights.
        expected: usize,
        /// Number of values provided.
        found: usize,
    },
}

impl Display for IndicatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueOutOfRange(value) => {
                write!(f, "capacity indicator values must lie within [0, 1] (received {value})")
            }
            Self::EmptyCode => f.write_str("component codes must not be empty"),
            Self::UnknownCategory(name) => write!(
                f,
                "unknown supply system category '{name}' (expected primary, secondary or tertiary)"
            ),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "received {found} capacity indicator values but {expected} are required"
            ),
            Self::IndexOutOfBounds { index, len } => write!(
                f,
                "position {index} is out of bounds for a vector of {len} capacity indicators"
            ),
            Self::InsufficientCoverage { category, sum } => {
                let name = category.map_or("uncategorized", Category::as_str);
                write!(
                    f,
                    "{name} capacity indicators add up to {sum} but need to reach at least 1 to meet demand"
                )
            }
            Self::FitnessLengthMismatch { expected, found } => write!(
                f,
                "received {found} fitness values for {expected} objective weights"
            ),
        }
    }
}

impl std::error::Error for IndicatorError {}

fn validate_value(value: f64) -> Result<f64, IndicatorError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(IndicatorError::ValueOutOfRange(value));
    }
    Ok(round_to_precision(value))
}

/// Installed share of one component's maximum viable capacity.
///
/// # Examples
/// ```
/// use capacity_indicators::{CapacityIndicator, Category};
/// let indicator =
///     CapacityIndicator::new(Some(Category::Primary), Some("VCC1"), Some(0.3333)).unwrap();
/// assert_eq!(indicator.value(), 0.33);
/// assert_eq!(indicator.code(), Some("VCC1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityIndicator {
    value: f64,
    code: Option<String>,
    category: Option<Category>,
}

impl CapacityIndicator {
    /// Creates an indicator. A missing value defaults to a fully installed
    /// component (`1.0`).
    ///
    /// # Errors
    /// Returns [`IndicatorError::ValueOutOfRange`] for values outside `[0, 1]`
    /// and [`IndicatorError::EmptyCode`] for an empty component code.
    pub fn new(
        category: Option<Category>,
        code: Option<&str>,
        value: Option<f64>,
    ) -> Result<Self, IndicatorError> {
        if code.map_or(false, str::is_empty) {
            return Err(IndicatorError::EmptyCode);
        }
        Ok(Self {
            value: validate_value(value.unwrap_or(1.0))?,
            code: code.map(str::to_owned),
            category,
        })
    }

    /// Returns the installed share.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the component code, if one was assigned.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the placement category, if one was assigned.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Stores `value` rounded to [`VALUE_DECIMALS`] decimals.
    ///
    /// # Errors
    /// Returns [`IndicatorError::ValueOutOfRange`] when `value` lies outside
    /// `[0, 1]`; the stored value is left untouched.
    pub fn set_value(&mut self, value: f64) -> Result<(), IndicatorError> {
        self.value = validate_value(value)?;
        Ok(())
    }

    /// Changes the value in place and returns the indicator for chaining.
    ///
    /// # Errors
    /// Propagates [`IndicatorError::ValueOutOfRange`] from [`Self::set_value`].
    pub fn change_value(&mut self, value: f64) -> Result<&mut Self, IndicatorError> {
        self.set_value(value)?;
        Ok(self)
    }

    /// Returns a copy carrying `value`, leaving the receiver untouched.
    ///
    /// # Errors
    /// Propagates [`IndicatorError::ValueOutOfRange`] from [`Self::set_value`].
    pub fn with_value(&self, value: f64) -> Result<Self, IndicatorError> {
        let mut copy = self.clone();
        copy.set_value(value)?;
        Ok(copy)
    }
}

impl Default for CapacityIndicator {
    fn default() -> Self {
        Self {
            value: 1.0,
            code: None,
            category: None,
        }
    }
}

/// Ordered capacity indicators of one supply system configuration, together
/// with the fitness assigned to it by the evaluation layer.
///
/// The order of the indicators is the encoding the positional operators work
/// on, and the (code, category) layout never changes after construction.
/// Construction and [`reset`](Self::reset) repair understocked categories,
/// while [`set_values`](Self::set_values) rejects them.
///
/// # Examples
/// ```
/// use capacity_indicators::{CapacityIndicatorVector, Category};
///
/// let mut civ = CapacityIndicatorVector::from_structure(vec![
///     ("VCC1", Category::Primary),
///     ("ACH1", Category::Primary),
///     ("CT1", Category::Tertiary),
/// ])
/// .unwrap();
/// civ.set_values(&[0.5, 0.6, 1.0]).unwrap();
/// assert_eq!(civ.get_cat(Category::Primary), vec![0.5, 0.6]);
///
/// // Raw positional writes skip the coverage check until the vector is reset.
/// civ.set(0, 0.1).unwrap();
/// civ.set(1, 0.3).unwrap();
/// civ.reset();
/// assert_eq!(civ.get_cat(Category::Primary), vec![0.1, 0.9]);
/// ```
#[derive(Debug, Clone)]
pub struct CapacityIndicatorVector {
    indicators: Vec<CapacityIndicator>,
    fitness: Fitness,
}

impl CapacityIndicatorVector {
    /// Wraps the indicators, repairing any category whose values add up to
    /// less than 1. An empty list yields the [`Default`] vector.
    #[must_use]
    pub fn new(indicators: Vec<CapacityIndicator>) -> Self {
        if indicators.is_empty() {
            return Self::default();
        }
        let mut civ = Self {
            indicators,
            fitness: Fitness::default(),
        };
        civ.reset();
        civ
    }

    /// Builds a prototype vector from the ordered (code, category) layout of a
    /// supply system structure. Every component starts fully installed.
    ///
    /// # Errors
    /// Returns [`IndicatorError::EmptyCode`] when a code is empty.
    pub fn from_structure<I, S>(structure: I) -> Result<Self, IndicatorError>
    where
        I: IntoIterator<Item = (S, Category)>,
        S: AsRef<str>,
    {
        let indicators = structure
            .into_iter()
            .map(|(code, category)| CapacityIndicator::new(Some(category), Some(code.as_ref()), None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(indicators))
    }

    /// Returns the indicators in vector order.
    #[must_use]
    pub fn indicators(&self) -> &[CapacityIndicator] {
        &self.indicators
    }

    /// Unwraps the vector into its indicators.
    #[must_use]
    pub fn into_indicators(self) -> Vec<CapacityIndicator> {
        self.indicators
    }

    /// Number of indicators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Indicates whether the vector holds no indicators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Returns the values in vector order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.indicators.iter().map(CapacityIndicator::value).collect()
    }

    /// Iterates over the values in vector order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.indicators.iter().map(CapacityIndicator::value)
    }

    /// Replaces every value at once.
    ///
    /// Nothing is written unless the whole assignment is valid.
    ///
    /// # Errors
    /// Returns [`IndicatorError::LengthMismatch`] when `values` does not match
    /// the vector length, [`IndicatorError::ValueOutOfRange`] for values
    /// outside `[0, 1]`, and [`IndicatorError::InsufficientCoverage`] when any
    /// category would add up to less than 1.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), IndicatorError> {
        if values.len() != self.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: self.len(),
                found: values.len(),
            });
        }
        let rounded = values
            .iter()
            .map(|&value| validate_value(value))
            .collect::<Result<Vec<_>, _>>()?;
        let pairs = self
            .indicators
            .iter()
            .map(CapacityIndicator::category)
            .zip(rounded.iter().copied());
        if let Some((category, sum)) = correction::sums_by_category(pairs)
            .into_iter()
            .find(|&(_, sum)| !correction::covers_demand(sum))
        {
            return Err(IndicatorError::InsufficientCoverage { category, sum });
        }
        for (indicator, value) in self.indicators.iter_mut().zip(rounded) {
            indicator.value = value;
        }
        Ok(())
    }

    /// Returns the value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.indicators.get(index).map(CapacityIndicator::value)
    }

    /// Returns the values within `range`.
    #[must_use]
    pub fn get_range<R: RangeBounds<usize>>(&self, range: R) -> Option<Vec<f64>> {
        let range = self.resolve_range(range).ok()?;
        Some(self.indicators[range].iter().map(CapacityIndicator::value).collect())
    }

    /// Writes one value without checking category coverage. Call
    /// [`reset`](Self::reset) before handing the vector back to the engine.
    ///
    /// # Errors
    /// Returns [`IndicatorError::IndexOutOfBounds`] or
    /// [`IndicatorError::ValueOutOfRange`].
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), IndicatorError> {
        let len = self.len();
        self.indicators
            .get_mut(index)
            .ok_or(IndicatorError::IndexOutOfBounds { index, len })?
            .set_value(value)
    }

    /// Writes the values of `range` without checking category coverage.
    ///
    /// Nothing is written unless every value is valid.
    ///
    /// # Errors
    /// Returns [`IndicatorError::IndexOutOfBounds`] for a range outside the
    /// vector, [`IndicatorError::LengthMismatch`] when `values` does not
    /// cover the range exactly and [`IndicatorError::ValueOutOfRange`].
    pub fn set_range<R: RangeBounds<usize>>(
        &mut self,
        range: R,
        values: &[f64],
    ) -> Result<(), IndicatorError> {
        let range = self.resolve_range(range)?;
        if range.len() != values.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: range.len(),
                found: values.len(),
            });
        }
        let rounded = values
            .iter()
            .map(|&value| validate_value(value))
            .collect::<Result<Vec<_>, _>>()?;
        for (indicator, value) in self.indicators[range].iter_mut().zip(rounded) {
            indicator.value = value;
        }
        Ok(())
    }

    /// Repairs every category that cannot cover its demand. Feasible vectors
    /// are left untouched.
    pub fn reset(&mut self) -> &mut Self {
        for repair in correction::correct_values(&mut self.indicators) {
            debug!(
                "raised {} capacity indicator {} from {} to {}",
                repair.category.map_or("uncategorized", Category::as_str),
                repair.index,
                repair.previous,
                repair.corrected
            );
        }
        self
    }

    /// Indicates whether every category adds up to at least 1.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        correction::understocked_categories(&self.indicators).is_empty()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<Option<Category>> {
        let mut categories = Vec::new();
        for indicator in &self.indicators {
            if !categories.contains(&indicator.category) {
                categories.push(indicator.category);
            }
        }
        categories
    }

    /// Values of one category, in vector order.
    #[must_use]
    pub fn get_cat(&self, category: Category) -> Vec<f64> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.category == Some(category))
            .map(CapacityIndicator::value)
            .collect()
    }

    /// Component codes of one category, in vector order.
    ///
    /// Lines up index for index with [`get_cat`](Self::get_cat); members
    /// without a code yield `None`.
    #[must_use]
    pub fn codes_in(&self, category: Category) -> Vec<Option<&str>> {
        self.indicators
            .iter()
            .filter(|indicator| indicator.category == Some(category))
            .map(CapacityIndicator::code)
            .collect()
    }

    /// Replaces the values of one category through [`set_values`](Self::set_values).
    ///
    /// # Errors
    /// Returns [`IndicatorError::LengthMismatch`] when `values` does not match
    /// the number of indicators in `category`, and any error reported by
    /// [`set_values`](Self::set_values).
    pub fn set_cat(&mut self, category: Category, values: &[f64]) -> Result<(), IndicatorError> {
        let members = self
            .indicators
            .iter()
            .filter(|indicator| indicator.category == Some(category))
            .count();
        if members != values.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: members,
                found: values.len(),
            });
        }
        let mut replacements = values.iter();
        let new_values: Vec<f64> = self
            .indicators
            .iter()
            .map(|indicator| {
                if indicator.category == Some(category) {
                    replacements.next().copied().unwrap_or(indicator.value)
                } else {
                    indicator.value
                }
            })
            .collect();
        self.set_values(&new_values)
    }

    /// Indicates whether both vectors share the same (code, category) layout.
    #[must_use]
    pub fn same_structure(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .indicators
                .iter()
                .zip(&other.indicators)
                .all(|(lhs, rhs)| lhs.code == rhs.code && lhs.category == rhs.category)
    }

    /// Returns the attached fitness.
    #[must_use]
    pub fn fitness(&self) -> &Fitness {
        &self.fitness
    }

    /// Returns the attached fitness mutably.
    pub fn fitness_mut(&mut self) -> &mut Fitness {
        &mut self.fitness
    }

    /// Replaces the attached fitness.
    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }

    fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Result<Range<usize>, IndicatorError> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        if end > len {
            return Err(IndicatorError::IndexOutOfBounds { index: end, len });
        }
        if start > end {
            return Err(IndicatorError::IndexOutOfBounds { index: start, len });
        }
        Ok(start..end)
    }
}

/// Vectors are equal when their indicators are; the fitness is not compared.
impl PartialEq for CapacityIndicatorVector {
    fn eq(&self, other: &Self) -> bool {
        self.indicators == other.indicators
    }
}

impl Default for CapacityIndicatorVector {
    fn default() -> Self {
        Self {
            indicators: vec![CapacityIndicator::default()],
            fitness: Fitness::default(),
        }
    }
}

impl Index<usize> for CapacityIndicatorVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.indicators[index].value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(category: Category, code: &str, value: f64) -> CapacityIndicator {
        CapacityIndicator::new(Some(category), Some(code), Some(value)).unwrap()
    }

    fn two_category_vector() -> CapacityIndicatorVector {
        CapacityIndicatorVector::new(vec![
            indicator(Category::Primary, "VCC1", 0.6),
            indicator(Category::Primary, "VCC2", 0.5),
            indicator(Category::Secondary, "BO1", 1.0),
        ])
    }

    #[test]
    fn indicator_rounds_and_validates() {
        let mut ci = CapacityIndicator::default();
        ci.set_value(0.3333).unwrap();
        assert_eq!(ci.value(), 0.33);
        ci.set_value(0.0).unwrap();
        assert_eq!(ci.value(), 0.0);
        assert_eq!(ci.set_value(1.01), Err(IndicatorError::ValueOutOfRange(1.01)));
        assert!(ci.set_value(-0.2).is_err());
        assert!(ci.set_value(f64::NAN).is_err());
        assert_eq!(ci.value(), 0.0);
        ci.set_value(1.0).unwrap();
        assert_eq!(ci.value(), 1.0);
    }

    #[test]
    fn halves_round_to_even_on_the_exact_value() {
        assert_eq!(round_to_precision(0.125), 0.12);
        assert_eq!(round_to_precision(0.625), 0.62);
        assert_eq!(round_to_precision(0.375), 0.38);
        assert_eq!(round_to_precision(0.015), 0.01);
        let mut ci = CapacityIndicator::default();
        ci.set_value(0.125).unwrap();
        assert_eq!(ci.value(), 0.12);
    }

    #[test]
    fn codes_line_up_with_category_values() {
        let civ = CapacityIndicatorVector::new(vec![
            indicator(Category::Primary, "VCC1", 0.4),
            CapacityIndicator::new(Some(Category::Primary), None, Some(0.6)).unwrap(),
            indicator(Category::Secondary, "BO1", 1.0),
        ]);
        assert_eq!(civ.get_cat(Category::Primary), vec![0.4, 0.6]);
        assert_eq!(civ.codes_in(Category::Primary), vec![Some("VCC1"), None]);
    }

    #[test]
    fn indicator_defaults_missing_value_to_one() {
        let ci = CapacityIndicator::new(Some(Category::Tertiary), Some("CT1"), None).unwrap();
        assert_eq!(ci.value(), 1.0);
        let zero = CapacityIndicator::new(Some(Category::Tertiary), Some("CT1"), Some(0.0)).unwrap();
        assert_eq!(zero.value(), 0.0);
    }

    #[test]
    fn indicator_rejects_empty_code() {
        let err = CapacityIndicator::new(Some(Category::Primary), Some(""), None).unwrap_err();
        assert_eq!(err, IndicatorError::EmptyCode);
    }

    #[test]
    fn change_value_in_place_or_on_copy() {
        let mut original = indicator(Category::Primary, "ACH1", 0.4);
        let copy = original.with_value(0.7).unwrap();
        assert_eq!(original.value(), 0.4);
        assert_eq!(copy.value(), 0.7);
        assert_eq!(copy.code(), Some("ACH1"));
        assert_eq!(original.change_value(0.2).unwrap().value(), 0.2);
        assert_eq!(original.value(), 0.2);
    }

    #[test]
    fn category_parsing() {
        assert_eq!("secondary".parse::<Category>().unwrap(), Category::Secondary);
        assert_eq!(
            "quaternary".parse::<Category>(),
            Err(IndicatorError::UnknownCategory("quaternary".to_owned()))
        );
        assert_eq!(Category::Tertiary.to_string(), "tertiary");
    }

    #[test]
    fn empty_construction_yields_default_vector() {
        let civ = CapacityIndicatorVector::new(Vec::new());
        assert_eq!(civ.len(), 1);
        assert_eq!(civ.values(), vec![1.0]);
        assert_eq!(civ.categories(), vec![None]);
    }

    #[test]
    fn construction_repairs_understocked_category() {
        let civ = CapacityIndicatorVector::new(vec![
            indicator(Category::Primary, "VCC1", 0.5),
            indicator(Category::Primary, "VCC2", 0.1),
            indicator(Category::Primary, "ACH1", 0.3),
        ]);
        assert_eq!(civ.values(), vec![0.6, 0.1, 0.3]);
        assert!(civ.is_feasible());
    }

    #[test]
    fn set_values_rejects_wrong_length_and_infeasible_input() {
        let mut civ = two_category_vector();
        assert_eq!(
            civ.set_values(&[0.5, 0.5]),
            Err(IndicatorError::LengthMismatch { expected: 3, found: 2 })
        );
        let err = civ.set_values(&[0.2, 0.3, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InsufficientCoverage { category: Some(Category::Primary), .. }
        ));
        assert!(civ.set_values(&[0.2, 1.3, 1.0]).is_err());
        assert_eq!(civ.values(), vec![0.6, 0.5, 1.0]);
        civ.set_values(&[0.333, 0.667, 1.0]).unwrap();
        assert_eq!(civ.values(), vec![0.33, 0.67, 1.0]);
    }

    #[test]
    fn positional_access() {
        let mut civ = two_category_vector();
        assert_eq!(civ.get(1), Some(0.5));
        assert_eq!(civ.get(3), None);
        assert_eq!(civ[2], 1.0);
        assert_eq!(civ.get_range(..2), Some(vec![0.6, 0.5]));
        assert_eq!(civ.get_range(1..=2), Some(vec![0.5, 1.0]));
        assert_eq!(civ.get_range(2..5), None);

        civ.set(2, 0.123).unwrap();
        assert_eq!(civ.get(2), Some(0.12));
        assert!(!civ.is_feasible());
        assert_eq!(
            civ.set(3, 0.5),
            Err(IndicatorError::IndexOutOfBounds { index: 3, len: 3 })
        );

        civ.set_range(0..2, &[0.1, 0.2]).unwrap();
        assert_eq!(civ.values(), vec![0.1, 0.2, 0.12]);
        assert!(civ.set_range(0..2, &[0.1]).is_err());
        assert!(civ.set_range(.., &[0.1, 0.2, 2.0]).is_err());
        assert_eq!(civ.values(), vec![0.1, 0.2, 0.12]);
    }

    #[test]
    fn reset_repairs_after_raw_writes_and_is_idempotent() {
        let mut civ = two_category_vector();
        let before = civ.values();
        civ.reset();
        assert_eq!(civ.values(), before);

        civ.set(2, 0.2).unwrap();
        civ.reset();
        assert_eq!(civ.values(), vec![0.6, 0.5, 1.0]);
    }

    #[test]
    fn category_views() {
        let mut civ = two_category_vector();
        assert_eq!(civ.get_cat(Category::Primary), vec![0.6, 0.5]);
        assert_eq!(civ.get_cat(Category::Tertiary), Vec::<f64>::new());
        assert_eq!(civ.codes_in(Category::Primary), vec![Some("VCC1"), Some("VCC2")]);

        civ.set_cat(Category::Primary, &[0.7, 0.4]).unwrap();
        assert_eq!(civ.values(), vec![0.7, 0.4, 1.0]);

        let err = civ.set_cat(Category::Secondary, &[0.3]).unwrap_err();
        assert!(matches!(err, IndicatorError::InsufficientCoverage { .. }));
        assert_eq!(civ.get_cat(Category::Secondary), vec![1.0]);

        assert!(matches!(
            civ.set_cat(Category::Primary, &[1.0]),
            Err(IndicatorError::LengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn set_cat_keeps_interleaved_layout() {
        let mut civ = CapacityIndicatorVector::new(vec![
            indicator(Category::Secondary, "BO1", 0.5),
            indicator(Category::Primary, "VCC1", 1.0),
            indicator(Category::Secondary, "BO2", 0.5),
        ]);
        civ.set_cat(Category::Secondary, &[0.2, 0.9]).unwrap();
        assert_eq!(civ.values(), vec![0.2, 1.0, 0.9]);
    }

    #[test]
    fn clones_are_deep() {
        let civ = two_category_vector();
        let mut copy = civ.clone();
        copy.set(0, 0.9).unwrap();
        assert_eq!(civ.get(0), Some(0.6));
        assert!(civ.same_structure(&copy));
    }
}
