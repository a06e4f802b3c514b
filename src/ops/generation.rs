//! Random generation of capacity indicator vectors from a structural template.

use crate::core::{round_to_precision, CapacityIndicator, CapacityIndicatorVector};
use crate::ops::{assign_feasible_draw, random_between, OperatorError};
use crate::settings::GenerationMethod;
use rand::RngCore;

/// Draws new values for the layout of `template` and returns the resulting
/// indicators. Only the codes and categories of the template are used.
///
/// Up to [`MAX_DRAW_ATTEMPTS`](crate::ops::MAX_DRAW_ATTEMPTS) draws are
/// tried; if none covers every category, the last one is repaired, so the
/// returned indicators are always feasible.
///
/// # Examples
/// ```
/// use capacity_indicators::core::correction::understocked_categories;
/// use capacity_indicators::ops::generate;
/// use capacity_indicators::settings::GenerationMethod;
/// use capacity_indicators::{CapacityIndicatorVector, Category};
/// use rand::SeedableRng;
///
/// let template = CapacityIndicatorVector::from_structure(vec![
///     ("VCC1", Category::Primary),
///     ("VCC2", Category::Primary),
///     ("CT1", Category::Tertiary),
/// ])
/// .unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let indicators = generate(&template, GenerationMethod::Random, &mut rng).unwrap();
/// assert!(understocked_categories(&indicators).is_empty());
/// assert!(CapacityIndicatorVector::new(indicators).same_structure(&template));
/// ```
///
/// # Errors
/// Returns [`OperatorError`] if a drawn value cannot be stored.
pub fn generate(
    template: &CapacityIndicatorVector,
    method: GenerationMethod,
    rng: &mut dyn RngCore,
) -> Result<Vec<CapacityIndicator>, OperatorError> {
    let mut civ = template.clone();
    civ.fitness_mut().invalidate();
    match method {
        GenerationMethod::Random => {
            assign_feasible_draw(&mut civ, rng, |current, rng| {
                current.iter().map(|_| random_percentage(rng)).collect()
            })?;
        }
    }
    Ok(civ.into_indicators())
}

fn random_percentage(rng: &mut dyn RngCore) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let percent = random_between(0, 100, rng) as f64;
    round_to_precision(percent / 100.0)
}
