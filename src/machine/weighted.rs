//! Weighted random choice among an edge's candidates.

use crate::core::StateId;
use rand::Rng;

/// Outcome of resolving an edge's candidate list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// No candidates: the machine halts.
    Halt,
    /// Destination picked.
    Target(StateId),
    /// Two or more candidates whose weights sum to zero.
    ZeroWeight,
}

/// Pick a destination with probability proportional to its weight.
///
/// A single candidate is taken regardless of its weight. Otherwise a number
/// is drawn uniformly from `[0, total)` and candidate weights are subtracted
/// from it in order; the first candidate that brings the remainder to zero
/// or below wins. Zero-weight candidates are never picked from a list whose
/// total is positive.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use temperament::machine::weighted::{resolve, Resolution};
///
/// let mut rng = StdRng::seed_from_u64(7);
///
/// assert_eq!(resolve(&[], &mut rng), Resolution::Halt);
/// ```
pub fn resolve<R: Rng>(candidates: &[(StateId, f64)], rng: &mut R) -> Resolution {
    match candidates {
        [] => Resolution::Halt,
        [(only, _)] => Resolution::Target(*only),
        _ => {
            // Normalized by the largest weight: the raw sum of large finite
            // weights can overflow to infinity.
            let peak = candidates
                .iter()
                .map(|(_, weight)| *weight)
                .fold(0.0, f64::max);
            if peak <= 0.0 || !peak.is_finite() {
                return Resolution::ZeroWeight;
            }

            let total: f64 = candidates.iter().map(|(_, weight)| weight / peak).sum();
            let mut remainder = rng.gen::<f64>() * total;
            for &(target, weight) in candidates {
                if weight <= 0.0 {
                    continue;
                }
                remainder -= weight / peak;
                if remainder <= 0.0 {
                    return Resolution::Target(target);
                }
            }

            // Rounding left a sliver of remainder; it belongs to the last
            // candidate that could have been picked.
            candidates
                .iter()
                .rev()
                .find(|(_, weight)| *weight > 0.0)
                .map_or(Resolution::ZeroWeight, |&(target, _)| Resolution::Target(target))
        }
    }
}
