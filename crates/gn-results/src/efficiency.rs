//! Exergy proxy and transport efficiency.

use gn_core::units::constants::P_REF_PA;

/// Work potential carried by `flow` m³/min at absolute `pressure_pa`.
pub fn exergy(flow: f64, pressure_pa: f64) -> f64 {
    flow.abs() * (pressure_pa / P_REF_PA).ln()
}

/// Ratio of the smaller to the larger end exergy of an edge.
///
/// Zero when neither end carries positive exergy or the ratio is undefined.
pub fn transport_efficiency(flow: f64, p_a: f64, p_b: f64) -> f64 {
    let e_a = exergy(flow, p_a);
    let e_b = exergy(flow, p_b);
    let (lo, hi) = if e_a <= e_b { (e_a, e_b) } else { (e_b, e_a) };
    if hi.is_nan() || hi <= 0.0 {
        return 0.0;
    }
    let ratio = lo / hi;
    if ratio.is_finite() { ratio.max(0.0) } else { 0.0 }
}

/// `num / den`, or zero when `den` is not positive.
pub(crate) fn ratio_or_zero(num: f64, den: f64) -> f64 {
    if den > 0.0 && num.is_finite() {
        num / den
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exergy_vanishes_at_reference_pressure() {
        assert_eq!(exergy(50.0, P_REF_PA), 0.0);
        assert!(exergy(-50.0, 700_000.0) > 0.0);
    }

    #[test]
    fn transport_efficiency_is_symmetric() {
        let a = transport_efficiency(40.0, 700_000.0, 650_000.0);
        let b = transport_efficiency(40.0, 650_000.0, 700_000.0);
        assert_eq!(a, b);
        assert!(a > 0.9 && a < 1.0);
    }

    #[test]
    fn transport_efficiency_is_zero_without_exergy() {
        assert_eq!(transport_efficiency(0.0, 700_000.0, 650_000.0), 0.0);
        assert_eq!(transport_efficiency(10.0, 90_000.0, 80_000.0), 0.0);
        assert_eq!(transport_efficiency(10.0, 90_000.0, 200_000.0), 0.0);
    }

    #[test]
    fn ratio_guards_non_positive_denominator() {
        assert_eq!(ratio_or_zero(1.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(1.0, -2.0), 0.0);
        assert_eq!(ratio_or_zero(1.0, 4.0), 0.25);
    }
}
