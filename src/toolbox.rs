//! Engine-facing adapter bundling the operator entry points.
//!
//! An evolutionary engine owns the population, selection and replacement.
//! It only needs four operations on individuals: draw a new one, mutate one,
//! mate two and repair one after a raw write. [`Toolbox`] provides exactly
//! those, bound to one structural template and one validated [`Settings`].

use crate::core::CapacityIndicatorVector;
use crate::ops::{self, OperatorError};
use crate::settings::Settings;
use rand::RngCore;

/// Operator entry points bound to a template and validated settings.
///
/// # Examples
/// ```
/// use capacity_indicators::{CapacityIndicatorVector, Category, Settings, Toolbox};
/// use rand::SeedableRng;
///
/// let template = CapacityIndicatorVector::from_structure(vec![
///     ("VCC1", Category::Primary),
///     ("VCC2", Category::Primary),
///     ("BO1", Category::Secondary),
/// ])
/// .unwrap();
/// let toolbox = Toolbox::new(template, Settings::default()).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
///
/// let mut parent_a = toolbox.generate(&mut rng).unwrap();
/// let mut parent_b = toolbox.generate(&mut rng).unwrap();
/// toolbox.mate(&mut parent_a, &mut parent_b, &mut rng).unwrap();
/// toolbox.mutate(&mut parent_a, &mut rng).unwrap();
/// assert!(parent_a.is_feasible() && parent_b.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Toolbox {
    template: CapacityIndicatorVector,
    settings: Settings,
}

impl Toolbox {
    /// Creates a toolbox after validating `settings`.
    ///
    /// # Errors
    /// Returns [`OperatorError`] when the settings hold unusable parameters.
    pub fn new(template: CapacityIndicatorVector, settings: Settings) -> Result<Self, OperatorError> {
        settings.validate()?;
        Ok(Self { template, settings })
    }

    /// Structural template new individuals are drawn from.
    #[must_use]
    pub fn template(&self) -> &CapacityIndicatorVector {
        &self.template
    }

    /// Operator settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Draws a new feasible individual with an unevaluated fitness.
    ///
    /// # Errors
    /// Propagates any [`OperatorError`] from [`ops::generate`].
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<CapacityIndicatorVector, OperatorError> {
        let indicators = ops::generate(&self.template, self.settings.generation, rng)?;
        Ok(CapacityIndicatorVector::new(indicators))
    }

    /// Mutates an individual in place.
    ///
    /// # Errors
    /// Propagates any [`OperatorError`] from [`ops::mutate`].
    pub fn mutate<'a>(
        &self,
        civ: &'a mut CapacityIndicatorVector,
        rng: &mut dyn RngCore,
    ) -> Result<&'a mut CapacityIndicatorVector, OperatorError> {
        ops::mutate(civ, &self.settings, rng)
    }

    /// Recombines two individuals in place.
    ///
    /// # Errors
    /// Propagates any [`OperatorError`] from [`ops::mate`].
    pub fn mate(
        &self,
        civ_a: &mut CapacityIndicatorVector,
        civ_b: &mut CapacityIndicatorVector,
        rng: &mut dyn RngCore,
    ) -> Result<(), OperatorError> {
        ops::mate(civ_a, civ_b, &self.settings, rng)
    }

    /// Repairs an individual after raw positional writes.
    pub fn reset<'a>(&self, civ: &'a mut CapacityIndicatorVector) -> &'a mut CapacityIndicatorVector {
        civ.reset()
    }
}
