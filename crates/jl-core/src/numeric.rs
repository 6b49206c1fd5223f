use crate::JlError;

/// Floating point type used throughout the system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, JlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(JlError::NonFinite { what, value: v })
    }
}

/// Linear interpolation of `y` at `x` over the segment (x0,y0)-(x1,y1).
///
/// Degenerate segments (x0 == x1) return y0.
pub fn lerp(x: Real, x0: Real, y0: Real, x1: Real, y1: Real) -> Real {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Interpolate the x where `y` crosses `target` over the segment
/// (x0,y0)-(x1,y1). Caller guarantees the crossing is bracketed.
pub fn inverse_lerp(target: Real, x0: Real, y0: Real, x1: Real, y1: Real) -> Real {
    if y1 == y0 {
        return x1;
    }
    x0 + (x1 - x0) * (target - y0) / (y1 - y0)
}
