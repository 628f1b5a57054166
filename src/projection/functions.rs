use std::fmt;

use crate::foundation::core::{Point3, Point4D};
use crate::foundation::math::guard_denominator;
use crate::projection::params::{ParamKey, ProjectionParams};

/// How a 4D point is mapped into 3D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Drop `w`.
    #[default]
    Slice,
    /// Scale by distance from the slice along `w` (parameter `d`).
    Perspective,
    /// Shear `w` into `x` and `z` (parameters `a`, `b`). Ignores the slice coordinate.
    Orthogonal,
    /// Scale by an offset radius (parameters `R`, `c`).
    Stereographic,
}

impl ProjectionMode {
    /// All modes in menu order.
    pub const ALL: [ProjectionMode; 4] = [
        ProjectionMode::Slice,
        ProjectionMode::Perspective,
        ProjectionMode::Orthogonal,
        ProjectionMode::Stereographic,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ProjectionMode::Slice => "slice",
            ProjectionMode::Perspective => "perspective",
            ProjectionMode::Orthogonal => "orthogonal",
            ProjectionMode::Stereographic => "stereographic",
        }
    }

    /// Parse a mode name; anything unrecognized selects [`ProjectionMode::Slice`].
    pub fn parse_or_slice(name: &str) -> Self {
        match name {
            "perspective" => ProjectionMode::Perspective,
            "orthogonal" => ProjectionMode::Orthogonal,
            "stereographic" => ProjectionMode::Stereographic,
            _ => ProjectionMode::Slice,
        }
    }

    /// Parameters that influence this mode's output.
    pub const fn relevant_params(self) -> &'static [ParamKey] {
        match self {
            ProjectionMode::Slice => &[],
            ProjectionMode::Perspective => &[ParamKey::D],
            ProjectionMode::Orthogonal => &[ParamKey::A, ParamKey::B],
            ProjectionMode::Stereographic => &[ParamKey::R, ParamKey::C],
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project `p` into 3D under `mode`, viewing the cross-section at `w_slice`.
///
/// Pure and deterministic. Near-zero denominators in the perspective and stereographic modes are
/// clamped to `±1e-6`.
pub fn project(
    mode: ProjectionMode,
    p: Point4D,
    w_slice: f64,
    params: &ProjectionParams,
) -> Point3 {
    match mode {
        ProjectionMode::Slice => project_slice(p),
        ProjectionMode::Perspective => project_perspective(p, w_slice, params),
        ProjectionMode::Orthogonal => project_orthogonal(p, params),
        ProjectionMode::Stereographic => project_stereographic(p, w_slice, params),
    }
}

pub fn project_slice(p: Point4D) -> Point3 {
    Point3::new(p.x, p.y, p.z)
}

pub fn project_perspective(p: Point4D, w_slice: f64, params: &ProjectionParams) -> Point3 {
    let d = params.d.value;
    let s = d / guard_denominator(d + (p.w - w_slice));
    Point3::new(p.x, p.y, p.z).scaled(s)
}

pub fn project_orthogonal(p: Point4D, params: &ProjectionParams) -> Point3 {
    Point3::new(p.x + params.a.value * p.w, p.y, p.z + params.b.value * p.w)
}

pub fn project_stereographic(p: Point4D, w_slice: f64, params: &ProjectionParams) -> Point3 {
    let r = params.r.value;
    let wo = (p.w - w_slice) + params.c.value;
    let s = r / guard_denominator(wo + r);
    Point3::new(p.x, p.y, p.z).scaled(s)
}

#[cfg(test)]
#[path = "../../tests/unit/projection/functions.rs"]
mod tests;
