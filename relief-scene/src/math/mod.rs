mod cartesian3;
mod cartographic;

pub use cartesian3::*;
pub use cartographic::*;

pub const EPSILON7: f64 = 0.0000001;
pub const EPSILON10: f64 = 0.0000000001;
pub const EPSILON12: f64 = 0.000000000001;
pub const EPSILON14: f64 = 0.00000000000001;

pub fn equals_epsilon(
    left: f64,
    right: f64,
    relative_epsilon: Option<f64>,
    absolute_epsilon: Option<f64>,
) -> bool {
    let relative_epsilon = relative_epsilon.unwrap_or(0.0);
    let absolute_epsilon = absolute_epsilon.unwrap_or(relative_epsilon);
    let diff = (left - right).abs();
    return diff <= absolute_epsilon || diff <= relative_epsilon * left.abs();
}

/// Saturates `value` into `[min, max]`, both bounds inclusive.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value <= min {
        return min;
    }
    if value >= max {
        return max;
    }
    return value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_saturates_inclusive() {
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(7.5, 0.0, 1.0), 1.0);
        for i in 1..100 {
            let x = i as f64 / 100.0;
            assert_eq!(clamp(x, 0.0, 1.0), x);
        }
    }

    #[test]
    fn equals_epsilon_absolute_and_relative() {
        assert!(equals_epsilon(1.0, 1.0 + 1e-9, None, Some(EPSILON7)));
        assert!(!equals_epsilon(1.0, 1.1, None, Some(EPSILON7)));
        assert!(equals_epsilon(1.0e9, 1.0e9 + 1.0, Some(EPSILON7), None));
    }
}
