use std::fmt;
use std::str::FromStr;

use crate::foundation::error::HyperError;

/// Key of one projection parameter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ParamKey {
    /// Perspective divisor distance.
    #[serde(rename = "d")]
    D,
    /// Orthogonal shear blend of `w` into `x`.
    #[serde(rename = "a")]
    A,
    /// Orthogonal shear blend of `w` into `z`.
    #[serde(rename = "b")]
    B,
    /// Stereographic radius.
    #[serde(rename = "R")]
    R,
    /// Stereographic offset.
    #[serde(rename = "c")]
    C,
}

impl ParamKey {
    /// All keys in document order.
    pub const ALL: [ParamKey; 5] = [
        ParamKey::D,
        ParamKey::A,
        ParamKey::B,
        ParamKey::R,
        ParamKey::C,
    ];

    /// Name as used in session documents (note the upper-case `R`).
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamKey::D => "d",
            ParamKey::A => "a",
            ParamKey::B => "b",
            ParamKey::R => "R",
            ParamKey::C => "c",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = HyperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| HyperError::validation(format!("unknown projection parameter '{s}'")))
    }
}

/// A parameter value together with its slider range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamRange {
    /// Current value. Not necessarily inside `[min, max]`.
    pub value: f64,
    /// Lower slider bound.
    pub min: f64,
    /// Upper slider bound.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

impl ParamRange {
    pub const fn new(value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            value,
            min,
            max,
            step,
        }
    }

    /// Clamp `v` into `[min, max]`. Never panics, even for an inverted range.
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

/// The five projection parameters `d, a, b, R, c`.
///
/// Passed by reference into the projection functions and the validator; nothing reads it
/// implicitly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectionParams {
    /// Perspective divisor distance.
    pub d: ParamRange,
    /// Shear of `w` into `x` (orthogonal).
    pub a: ParamRange,
    /// Shear of `w` into `z` (orthogonal).
    pub b: ParamRange,
    /// Stereographic radius.
    #[serde(rename = "R")]
    pub r: ParamRange,
    /// Stereographic offset.
    pub c: ParamRange,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            d: ParamRange::new(8.0, 2.0, 24.0, 0.5),
            a: ParamRange::new(0.2, -1.0, 1.0, 0.01),
            b: ParamRange::new(0.2, -1.0, 1.0, 0.01),
            r: ParamRange::new(12.0, 2.0, 24.0, 0.5),
            c: ParamRange::new(8.0, -12.0, 24.0, 0.5),
        }
    }
}

impl ProjectionParams {
    pub fn range(&self, key: ParamKey) -> &ParamRange {
        match key {
            ParamKey::D => &self.d,
            ParamKey::A => &self.a,
            ParamKey::B => &self.b,
            ParamKey::R => &self.r,
            ParamKey::C => &self.c,
        }
    }

    fn range_mut(&mut self, key: ParamKey) -> &mut ParamRange {
        match key {
            ParamKey::D => &mut self.d,
            ParamKey::A => &mut self.a,
            ParamKey::B => &mut self.b,
            ParamKey::R => &mut self.r,
            ParamKey::C => &mut self.c,
        }
    }

    /// Current value of `key`.
    pub fn value(&self, key: ParamKey) -> f64 {
        self.range(key).value
    }

    /// Write `v` as-is, without clamping to the slider range.
    pub fn set_value(&mut self, key: ParamKey, v: f64) {
        self.range_mut(key).value = v;
    }

    /// Write `v` clamped into the slider range and return the stored value.
    pub fn set_clamped(&mut self, key: ParamKey, v: f64) -> f64 {
        let r = self.range_mut(key);
        r.value = r.clamp(v);
        r.value
    }

    /// Snapshot of the five current values.
    pub fn values(&self) -> ParamValues {
        ParamValues {
            d: self.d.value,
            a: self.a.value,
            b: self.b.value,
            r: self.r.value,
            c: self.c.value,
        }
    }

    /// Write every value from `values` unclamped.
    pub fn set_values(&mut self, values: ParamValues) {
        for key in ParamKey::ALL {
            self.set_value(key, values.get(key));
        }
    }
}

/// Bare parameter values, as carried by session documents and presets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamValues {
    /// Perspective divisor distance.
    pub d: f64,
    /// Shear of `w` into `x`.
    pub a: f64,
    /// Shear of `w` into `z`.
    pub b: f64,
    /// Stereographic radius.
    #[serde(rename = "R")]
    pub r: f64,
    /// Stereographic offset.
    pub c: f64,
}

impl ParamValues {
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::D => self.d,
            ParamKey::A => self.a,
            ParamKey::B => self.b,
            ParamKey::R => self.r,
            ParamKey::C => self.c,
        }
    }

    /// Bitwise equality, so a NaN parameter still compares equal to itself.
    pub(crate) fn same_bits(&self, other: &Self) -> bool {
        ParamKey::ALL
            .into_iter()
            .all(|k| self.get(k).to_bits() == other.get(k).to_bits())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/params.rs"]
mod tests;
