//! Positional crossover strategies and the crossover entry point.

use crate::core::{CapacityIndicatorVector, IndicatorError};
use crate::ops::{random_between, random_unit, OperatorError};
use crate::settings::{check_probability, CrossoverKind, Settings};
use rand::RngCore;
use std::sync::Arc;

/// Produces two offspring by exchanging genes between two parents.
///
/// # Examples
/// ```
/// use capacity_indicators::ops::CrossoverOperator;
/// use rand::thread_rng;
///
/// struct Swap;
///
/// impl CrossoverOperator for Swap {
///     fn crossover(&self, parent_a: &[f64], parent_b: &[f64], _rng: &mut dyn rand::RngCore) -> (Vec<f64>, Vec<f64>) {
///         (parent_b.to_vec(), parent_a.to_vec())
///     }
/// }
///
/// let (child_a, child_b) = Swap.crossover(&[0.1, 0.2], &[0.3, 0.4], &mut thread_rng());
/// assert_eq!(child_a, vec![0.3, 0.4]);
/// assert_eq!(child_b, vec![0.1, 0.2]);
/// ```
pub trait CrossoverOperator: Send + Sync {
    /// Applies crossover to parent slices and returns their offspring.
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>);
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &T {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Box<T> {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Arc<T> {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

/// Swaps everything behind a single random cut point.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointCrossover;

impl CrossoverOperator for OnePointCrossover {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        let mut child_a = parent_a.to_vec();
        let mut child_b = parent_b.to_vec();
        let size = child_a.len().min(child_b.len());
        if size < 2 {
            return (child_a, child_b);
        }
        let cut = random_between(1, size - 1, rng);
        child_a[cut..size].swap_with_slice(&mut child_b[cut..size]);
        (child_a, child_b)
    }
}

/// Swaps the segment between two distinct random cut points.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl CrossoverOperator for TwoPointCrossover {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        let mut child_a = parent_a.to_vec();
        let mut child_b = parent_b.to_vec();
        let size = child_a.len().min(child_b.len());
        if size < 2 {
            return (child_a, child_b);
        }
        let mut first = random_between(1, size, rng);
        let mut second = random_between(1, size - 1, rng);
        if second >= first {
            second += 1;
        } else {
            std::mem::swap(&mut first, &mut second);
        }
        child_a[first..second].swap_with_slice(&mut child_b[first..second]);
        (child_a, child_b)
    }
}

/// Swaps each position independently with a fixed probability.
#[derive(Debug, Clone)]
pub struct UniformCrossover {
    probability: f64,
}

impl UniformCrossover {
    /// Creates a uniform crossover with the given swap probability.
    ///
    /// # Errors
    /// Returns [`OperatorError::InvalidProbability`] when the probability lies
    /// outside `[0, 1]`.
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        check_probability("uniform crossover", probability)?;
        Ok(Self { probability })
    }
}

impl CrossoverOperator for UniformCrossover {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        let mut child_a = parent_a.to_vec();
        let mut child_b = parent_b.to_vec();
        for (gene_a, gene_b) in child_a.iter_mut().zip(child_b.iter_mut()) {
            if random_unit(rng) < self.probability {
                std::mem::swap(gene_a, gene_b);
            }
        }
        (child_a, child_b)
    }
}

/// Builds the crossover strategy selected in `settings`.
///
/// # Errors
/// Returns [`OperatorError::InvalidProbability`] for an unusable `cx_prob`.
pub fn crossover_operator(settings: &Settings) -> Result<Box<dyn CrossoverOperator>, OperatorError> {
    Ok(match settings.crossover {
        CrossoverKind::OnePoint => Box::new(OnePointCrossover),
        CrossoverKind::TwoPoint => Box::new(TwoPointCrossover),
        CrossoverKind::Uniform => Box::new(UniformCrossover::new(settings.cx_prob)?),
    })
}

/// Recombines two vectors in place with the strategy configured in
/// `settings`, then repairs category coverage in both.
///
/// # Errors
/// Returns [`OperatorError`] when the vectors differ in length or the
/// settings hold unusable parameters. Neither vector is modified in that case.
pub fn mate(
    civ_a: &mut CapacityIndicatorVector,
    civ_b: &mut CapacityIndicatorVector,
    settings: &Settings,
    rng: &mut dyn RngCore,
) -> Result<(), OperatorError> {
    if civ_a.len() != civ_b.len() {
        return Err(IndicatorError::LengthMismatch {
            expected: civ_a.len(),
            found: civ_b.len(),
        }
        .into());
    }
    let operator = crossover_operator(settings)?;
    let (child_a, child_b) = operator.crossover(&civ_a.values(), &civ_b.values(), rng);
    civ_a.set_range(.., &child_a)?;
    civ_b.set_range(.., &child_b)?;
    civ_a.reset();
    civ_b.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PARENT_A: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
    const PARENT_B: [f64; 5] = [0.6, 0.7, 0.8, 0.9, 1.0];

    fn is_positional_exchange(parent_a: &[f64], parent_b: &[f64], child_a: &[f64], child_b: &[f64]) -> bool {
        parent_a
            .iter()
            .zip(parent_b)
            .zip(child_a.iter().zip(child_b))
            .all(|((pa, pb), (ca, cb))| (ca == pa && cb == pb) || (ca == pb && cb == pa))
    }

    #[test]
    fn one_point_swaps_a_non_empty_tail() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let (child_a, child_b) = OnePointCrossover.crossover(&PARENT_A, &PARENT_B, &mut rng);
            assert_eq!(child_a[0], PARENT_A[0]);
            assert_eq!(child_a[4], PARENT_B[4]);
            let cut = child_a.iter().position(|gene| PARENT_B.contains(gene)).unwrap();
            assert!(child_a[cut..].iter().zip(&PARENT_B[cut..]).all(|(a, b)| a == b));
            assert!(is_positional_exchange(&PARENT_A, &PARENT_B, &child_a, &child_b));
        }
    }

    #[test]
    fn two_point_swaps_one_contiguous_segment() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            let (child_a, child_b) = TwoPointCrossover.crossover(&PARENT_A, &PARENT_B, &mut rng);
            assert_eq!(child_a[0], PARENT_A[0]);
            let swapped: Vec<bool> = child_a.iter().zip(&PARENT_B).map(|(a, b)| a == b).collect();
            let transitions = swapped.windows(2).filter(|pair| pair[0] != pair[1]).count();
            assert!((1..=2).contains(&transitions));
            assert!(is_positional_exchange(&PARENT_A, &PARENT_B, &child_a, &child_b));
        }
    }

    #[test]
    fn short_parents_are_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(0);
        let (a, b) = OnePointCrossover.crossover(&[0.2], &[0.8], &mut rng);
        assert_eq!((a, b), (vec![0.2], vec![0.8]));
        let (a, b) = TwoPointCrossover.crossover(&[0.2], &[0.8], &mut rng);
        assert_eq!((a, b), (vec![0.2], vec![0.8]));
    }

    #[test]
    fn uniform_extremes() {
        let mut rng = StdRng::seed_from_u64(2);
        let never = UniformCrossover::new(0.0).unwrap();
        assert_eq!(
            never.crossover(&PARENT_A, &PARENT_B, &mut rng),
            (PARENT_A.to_vec(), PARENT_B.to_vec())
        );
        let always = UniformCrossover::new(1.0).unwrap();
        assert_eq!(
            always.crossover(&PARENT_A, &PARENT_B, &mut rng),
            (PARENT_B.to_vec(), PARENT_A.to_vec())
        );
        assert!(UniformCrossover::new(1.5).is_err());
    }

    #[test]
    fn mate_repairs_both_offspring() {
        let structure = vec![
            ("VCC1", Category::Primary),
            ("VCC2", Category::Primary),
            ("BO1", Category::Secondary),
            ("BO2", Category::Secondary),
        ];
        let mut civ_a = CapacityIndicatorVector::from_structure(structure.clone()).unwrap();
        let mut civ_b = CapacityIndicatorVector::from_structure(structure).unwrap();
        civ_a.set_values(&[1.0, 0.0, 1.0, 0.0]).unwrap();
        civ_b.set_values(&[0.0, 1.0, 0.0, 1.0]).unwrap();
        let prototype = civ_a.clone();

        let mut settings = Settings::default();
        settings.crossover = CrossoverKind::Uniform;
        settings.cx_prob = 0.5;
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            mate(&mut civ_a, &mut civ_b, &settings, &mut rng).unwrap();
            assert!(civ_a.is_feasible() && civ_b.is_feasible());
            assert!(civ_a.same_structure(&prototype) && civ_b.same_structure(&prototype));
        }
    }

    #[test]
    fn mate_rejects_length_mismatch() {
        let mut civ_a =
            CapacityIndicatorVector::from_structure(vec![("VCC1", Category::Primary)]).unwrap();
        let mut civ_b = CapacityIndicatorVector::from_structure(vec![
            ("VCC1", Category::Primary),
            ("VCC2", Category::Primary),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = mate(&mut civ_a, &mut civ_b, &Settings::default(), &mut rng).unwrap_err();
        assert_eq!(
            err,
            OperatorError::Indicator(IndicatorError::LengthMismatch { expected: 1, found: 2 })
        );
    }
}
