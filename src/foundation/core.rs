use std::fmt;
use std::str::FromStr;

use crate::foundation::error::HyperError;

/// A point in 4D space. `w` is the axis the slice coordinate cuts across.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point4D {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// Fourth-dimension component.
    pub w: f64,
}

impl Point4D {
    /// Construct a point from its four components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Lift a 3D pick point into 4D at the given slice coordinate.
    pub const fn from_pick(p: Point3, w: f64) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            w,
        }
    }

    /// Euclidean distance over all four components.
    pub fn distance(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        let dw = self.w - other.w;
        (dx * dx + dy * dy + dz * dz + dw * dw).sqrt()
    }

    /// Component-wise linear interpolation, `t = 0` yields `self`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
            w: self.w + (other.w - self.w) * t,
        }
    }
}

/// A projected point in 3D render space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Point3 {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Construct a point from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Uniformly scale all components.
    pub fn scaled(self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

/// Classification tag of a node or stroke ("consciousness type").
///
/// Drives styling and the per-category instance capacity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Human.
    Human,
    /// AI.
    Ai,
    /// Hybrid.
    Hybrid,
    /// Kernel.
    Kernel,
}

impl Category {
    /// All categories in buffer order.
    pub const ALL: [Category; 4] = [
        Category::Human,
        Category::Ai,
        Category::Hybrid,
        Category::Kernel,
    ];

    /// Number of categories; the instance budget is split evenly across them.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable dense index in `0..COUNT`.
    pub const fn index(self) -> usize {
        match self {
            Category::Human => 0,
            Category::Ai => 1,
            Category::Hybrid => 2,
            Category::Kernel => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Human => "human",
            Category::Ai => "ai",
            Category::Hybrid => "hybrid",
            Category::Kernel => "kernel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HyperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| HyperError::validation(format!("unknown category '{s}'")))
    }
}

/// Store-assigned node identifier, unique within one store.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Store-assigned stroke identifier, unique within one store.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StrokeId(pub u64);

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
