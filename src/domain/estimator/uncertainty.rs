//! Uncertainty and confidence scores derived from an estimate.

use super::network::TRAIT_DIMS;
use crate::domain::foundation::round2;

const PROB_EPS: f64 = 1e-8;

/// Mean binary entropy of the per-axis probabilities, divided by ln 2.
///
/// 0 means fully confident, 1 maximally uncertain.
pub fn uncertainty_score(probs: &[f64; TRAIT_DIMS]) -> f64 {
    let total: f64 = probs
        .iter()
        .map(|p| {
            let p = p.clamp(PROB_EPS, 1.0 - PROB_EPS);
            -(p * p.ln() + (1.0 - p) * (1.0 - p).ln())
        })
        .sum();
    let mean = total / TRAIT_DIMS as f64;
    (mean / std::f64::consts::LN_2).clamp(0.0, 1.0)
}

/// Base confidence in `[0, 0.95]` from the mean distance of the features
/// from 0.5, interpolated inside each band.
pub fn base_confidence(mean_distance: f64) -> f64 {
    let d = mean_distance.max(0.0);
    if d >= 0.45 {
        0.95
    } else if d >= 0.35 {
        0.90 + (d - 0.35) / 0.10 * 0.05
    } else if d >= 0.25 {
        0.80 + (d - 0.25) / 0.10 * 0.10
    } else if d >= 0.15 {
        0.65 + (d - 0.15) / 0.10 * 0.15
    } else if d >= 0.05 {
        0.45 + (d - 0.05) / 0.10 * 0.20
    } else {
        d / 0.05 * 0.45
    }
}

/// Penalty from the mean standard deviation of the sampled probabilities.
pub fn spread_penalty(mean_std_dev: f64) -> f64 {
    if mean_std_dev > 0.12 {
        ((mean_std_dev - 0.12) / 0.08 * 0.10).min(0.10)
    } else if mean_std_dev > 0.06 {
        0.05
    } else {
        0.0
    }
}

/// Percent confidence, rounded to two decimals and clamped to `[0, 100]`.
pub fn confidence_score(mean_distance: f64, mean_std_dev: f64) -> f64 {
    let raw = (base_confidence(mean_distance) - spread_penalty(mean_std_dev)) * 100.0;
    round2(raw).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn uncertainty_is_one_at_half() {
        assert!((uncertainty_score(&[0.5; 4]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uncertainty_is_near_zero_at_extremes() {
        let u = uncertainty_score(&[0.0, 1.0, 0.0, 1.0]);
        assert!(u >= 0.0 && u < 1e-6);
    }

    #[test]
    fn base_confidence_band_edges() {
        assert_eq!(base_confidence(0.0), 0.0);
        assert!((base_confidence(0.05) - 0.45).abs() < 1e-12);
        assert!((base_confidence(0.15) - 0.65).abs() < 1e-12);
        assert!((base_confidence(0.25) - 0.80).abs() < 1e-12);
        assert!((base_confidence(0.35) - 0.90).abs() < 1e-12);
        assert_eq!(base_confidence(0.45), 0.95);
        assert_eq!(base_confidence(0.5), 0.95);
    }

    #[test]
    fn spread_penalty_tiers() {
        assert_eq!(spread_penalty(0.05), 0.0);
        assert_eq!(spread_penalty(0.06), 0.0);
        assert_eq!(spread_penalty(0.08), 0.05);
        assert_eq!(spread_penalty(0.12), 0.05);
        assert!((spread_penalty(0.16) - 0.05).abs() < 1e-12);
        assert_eq!(spread_penalty(0.5), 0.10);
    }

    #[test]
    fn confidence_combines_base_and_penalty() {
        // d = 0.3 -> 0.85, std 0.1 -> 0.05 penalty
        assert_eq!(confidence_score(0.3, 0.1), 80.0);
        assert_eq!(confidence_score(0.5, 0.0), 95.0);
        assert_eq!(confidence_score(0.0, 0.3), 0.0);
    }

    proptest! {
        #[test]
        fn uncertainty_stays_in_unit_interval(
            a in 0.0f64..=1.0, b in 0.0f64..=1.0, c in 0.0f64..=1.0, d in 0.0f64..=1.0
        ) {
            let u = uncertainty_score(&[a, b, c, d]);
            prop_assert!((0.0..=1.0).contains(&u));
        }

        #[test]
        fn confidence_is_monotonic_in_distance(
            d1 in 0.0f64..=0.5, d2 in 0.0f64..=0.5, s in 0.0f64..=0.5
        ) {
            let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(confidence_score(lo, s) <= confidence_score(hi, s));
        }

        #[test]
        fn confidence_stays_in_percent_range(d in 0.0f64..=0.5, s in 0.0f64..=1.0) {
            let c = confidence_score(d, s);
            prop_assert!((0.0..=100.0).contains(&c));
        }
    }
}
