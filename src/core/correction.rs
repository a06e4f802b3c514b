//! Coverage checks and the minimal repair of understocked categories.
//!
//! A category is understocked when its indicator values add up to less than
//! 1 at indicator precision. The repair raises only the largest indicator of
//! each understocked category (the first one on ties) so that the category
//! adds up to exactly 1. Every other value stays as it was.

use super::{round_to_precision, CapacityIndicator, Category};

/// Record of one repaired indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Repair {
    /// Position of the indicator within the vector.
    pub index: usize,
    /// Category that was understocked.
    pub category: Option<Category>,
    /// Value before the repair.
    pub previous: f64,
    /// Value after the repair.
    pub corrected: f64,
}

/// Indicates whether a category sum covers the full demand.
#[must_use]
pub fn covers_demand(sum: f64) -> bool {
    round_to_precision(sum) >= 1.0
}

/// Sums (category, value) pairs per category, in order of first appearance.
pub fn sums_by_category<I>(pairs: I) -> Vec<(Option<Category>, f64)>
where
    I: IntoIterator<Item = (Option<Category>, f64)>,
{
    let mut sums: Vec<(Option<Category>, f64)> = Vec::new();
    for (category, value) in pairs {
        match sums.iter_mut().find(|(known, _)| *known == category) {
            Some((_, sum)) => *sum += value,
            None => sums.push((category, value)),
        }
    }
    sums
}

/// Reports, per category present, whether its values cover the demand.
#[must_use]
pub fn categories_cover_demand(indicators: &[CapacityIndicator]) -> Vec<(Option<Category>, bool)> {
    category_sums(indicators)
        .into_iter()
        .map(|(category, sum)| (category, covers_demand(sum)))
        .collect()
}

/// Categories whose values add up to less than 1.
#[must_use]
pub fn understocked_categories(indicators: &[CapacityIndicator]) -> Vec<Option<Category>> {
    categories_cover_demand(indicators)
        .into_iter()
        .filter(|&(_, covered)| !covered)
        .map(|(category, _)| category)
        .collect()
}

/// Raises the largest indicator of every understocked category so that the
/// category adds up to exactly 1, and reports what was changed.
///
/// # Examples
/// ```
/// use capacity_indicators::core::correction::correct_values;
/// use capacity_indicators::{CapacityIndicator, Category};
///
/// let mut indicators = vec![
///     CapacityIndicator::new(Some(Category::Primary), Some("VCC1"), Some(0.5)).unwrap(),
///     CapacityIndicator::new(Some(Category::Primary), Some("VCC2"), Some(0.1)).unwrap(),
///     CapacityIndicator::new(Some(Category::Primary), Some("ACH1"), Some(0.3)).unwrap(),
/// ];
/// let repairs = correct_values(&mut indicators);
/// assert_eq!(repairs.len(), 1);
/// assert_eq!(indicators[0].value(), 0.6);
/// ```
pub fn correct_values(indicators: &mut [CapacityIndicator]) -> Vec<Repair> {
    let mut repairs = Vec::new();
    for category in understocked_categories(indicators) {
        let mut sum = 0.0;
        let mut largest: Option<(usize, f64)> = None;
        for (index, indicator) in indicators.iter().enumerate() {
            if indicator.category != category {
                continue;
            }
            sum += indicator.value;
            if largest.map_or(true, |(_, max)| indicator.value > max) {
                largest = Some((index, indicator.value));
            }
        }
        let Some((index, max)) = largest else {
            continue;
        };
        let corrected = round_to_precision(1.0 - (sum - max)).clamp(0.0, 1.0);
        indicators[index].value = corrected;
        repairs.push(Repair {
            index,
            category,
            previous: max,
            corrected,
        });
    }
    repairs
}

fn category_sums(indicators: &[CapacityIndicator]) -> Vec<(Option<Category>, f64)> {
    sums_by_category(
        indicators
            .iter()
            .map(|indicator| (indicator.category, indicator.value)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(category: Category, code: &str, value: f64) -> CapacityIndicator {
        CapacityIndicator::new(Some(category), Some(code), Some(value)).unwrap()
    }

    #[test]
    fn coverage_is_judged_at_indicator_precision() {
        assert!(covers_demand(1.0));
        assert!(covers_demand(0.1 + 0.2 + 0.7));
        assert!(covers_demand(0.33 + 0.33 + 0.34));
        assert!(!covers_demand(0.99));
    }

    #[test]
    fn sums_follow_first_appearance() {
        let sums = sums_by_category(vec![
            (Some(Category::Secondary), 0.25),
            (Some(Category::Primary), 0.5),
            (Some(Category::Secondary), 0.5),
        ]);
        assert_eq!(
            sums,
            vec![(Some(Category::Secondary), 0.75), (Some(Category::Primary), 0.5)]
        );
    }

    #[test]
    fn only_understocked_categories_are_repaired() {
        let mut indicators = vec![
            indicator(Category::Primary, "A", 0.6),
            indicator(Category::Primary, "B", 0.5),
            indicator(Category::Secondary, "C", 0.2),
        ];
        assert_eq!(understocked_categories(&indicators), vec![Some(Category::Secondary)]);
        let repairs = correct_values(&mut indicators);
        assert_eq!(
            repairs,
            vec![Repair {
                index: 2,
                category: Some(Category::Secondary),
                previous: 0.2,
                corrected: 1.0,
            }]
        );
        assert_eq!(indicators[0].value(), 0.6);
        assert_eq!(indicators[1].value(), 0.5);
        assert_eq!(indicators[2].value(), 1.0);
    }

    #[test]
    fn first_of_tied_maxima_is_raised() {
        let mut indicators = vec![
            indicator(Category::Tertiary, "CT1", 0.3),
            indicator(Category::Primary, "VCC1", 1.0),
            indicator(Category::Tertiary, "CT2", 0.3),
            indicator(Category::Tertiary, "CT3", 0.1),
        ];
        correct_values(&mut indicators);
        let values: Vec<f64> = indicators.iter().map(CapacityIndicator::value).collect();
        assert_eq!(values, vec![0.6, 1.0, 0.3, 0.1]);
    }

    #[test]
    fn all_zero_category_raises_first_member_to_one() {
        let mut indicators = vec![
            indicator(Category::Secondary, "BO1", 0.0),
            indicator(Category::Secondary, "BO2", 0.0),
        ];
        correct_values(&mut indicators);
        assert_eq!(indicators[0].value(), 1.0);
        assert_eq!(indicators[1].value(), 0.0);
    }

    #[test]
    fn feasible_indicators_are_untouched() {
        let mut indicators = vec![
            indicator(Category::Primary, "A", 0.7),
            indicator(Category::Primary, "B", 0.7),
        ];
        assert!(correct_values(&mut indicators).is_empty());
        assert_eq!(indicators[0].value(), 0.7);
    }
}
