/// Floating point type used throughout the workspace.
pub type Real = f64;

/// Divide, returning 0 when the denominator is 0.
///
/// Conductances and override resistances are defined as 0 wherever the
/// product they invert vanishes.
#[inline]
pub fn safe_recip_product(numerator: Real, denominator: Real) -> Real {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round `value` to the nearest multiple of `step`.
#[inline]
pub fn snap_to_step(value: Real, step: Real) -> Real {
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_gives_zero() {
        assert_eq!(safe_recip_product(1.0, 0.0), 0.0);
        assert_eq!(safe_recip_product(6.0, 3.0), 2.0);
    }

    #[test]
    fn snapping_to_step_grid() {
        assert_eq!(snap_to_step(651_499.0, 1000.0), 651_000.0);
        assert_eq!(snap_to_step(651_500.0, 1000.0), 652_000.0);
        assert_eq!(snap_to_step(-1_400.0, 1000.0), -1_000.0);
    }
}
