//! Scalar easing helpers shared by the pose composer and the phase driver

/// Linear interpolation. `t` is not restricted, so values outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bound `x` to `[lo, hi]`. Callers guarantee `lo <= hi`.
#[inline]
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(x))
}

/// Hermite easing between `edge0` and `edge1` (`edge0 < edge1`).
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part in `[0, 1)`, also for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn test_clamp_bounds_and_idempotence() {
        for x in [-5.0, -0.1, 0.0, 0.3, 1.0, 2.0, 100.0] {
            let once = clamp(x, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&once));
            assert_eq!(clamp(once, 0.0, 1.0), once);
        }
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_smoothstep_reference_points() {
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(0.2, 0.4, -3.0), 0.0);
        assert_eq!(smoothstep(0.2, 0.4, 3.0), 1.0);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = smoothstep(0.32, 0.46, 0.32);
        for i in 1..=200 {
            let x = 0.32 + 0.14 * i as f32 / 200.0;
            let v = smoothstep(0.32, 0.46, x);
            assert!(v >= prev, "smoothstep decreased at x={x}");
            prev = v;
        }
    }

    #[test]
    fn test_fract_wraps_into_unit_interval() {
        assert!((fract(2.25) - 0.25).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(fract(3.0), 0.0);
    }
}
