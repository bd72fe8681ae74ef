//! Rounding for values shown to users and written to logs.

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round2(80.000_000_000_01), 80.0);
    }
}
