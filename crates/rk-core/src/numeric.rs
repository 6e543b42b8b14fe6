/// Floating point type used for every physical quantity.
pub type Real = f64;

/// Clip `v` into `[lo, hi]`. NaN maps to `lo`.
pub fn clip(v: Real, lo: Real, hi: Real) -> Real {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

/// Clip into the unit interval `[0, 1]`.
#[inline]
pub fn clip_unit(v: Real) -> Real {
    clip(v, 0.0, 1.0)
}
