/// Small deterministic PRNG (Mulberry32) producing uniform `f64` in `[0, 1)`.
///
/// Used for reproducible sample data; not suitable for anything security related.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Mulberry32(u32);

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub(crate) fn new(seed: u32) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(Self::INCREMENT);
        let t = self.0;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }

    pub(crate) fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Smallest denominator magnitude the projections divide by.
pub(crate) const MIN_DENOMINATOR: f64 = 1e-6;

/// Clamp `den` away from zero, keeping its sign (an exact zero becomes positive).
///
/// NaN passes through unchanged.
pub(crate) fn guard_denominator(den: f64) -> f64 {
    if den == 0.0 {
        MIN_DENOMINATOR
    } else if den.abs() < MIN_DENOMINATOR {
        MIN_DENOMINATOR.copysign(den)
    } else {
        den
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
