use crate::foundation::error::{HyperError, HyperResult};
use crate::projection::functions::ProjectionMode;
use crate::projection::params::ParamValues;

/// A named projection mode plus parameter values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProjectionPreset {
    /// Stable key, e.g. `deep-perspective`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    pub mode: ProjectionMode,
    pub params: ParamValues,
}

const fn values(d: f64, a: f64, b: f64, r: f64, c: f64) -> ParamValues {
    ParamValues { d, a, b, r, c }
}

/// Built-in presets in menu order.
pub const PRESETS: [ProjectionPreset; 5] = [
    ProjectionPreset {
        key: "flat-slice",
        name: "Flat Slice",
        mode: ProjectionMode::Slice,
        params: values(8.0, 0.0, 0.0, 12.0, 8.0),
    },
    ProjectionPreset {
        key: "deep-perspective",
        name: "Deep Perspective",
        mode: ProjectionMode::Perspective,
        params: values(4.0, 0.2, 0.2, 12.0, 8.0),
    },
    ProjectionPreset {
        key: "w-parallax",
        name: "W-Parallax",
        mode: ProjectionMode::Orthogonal,
        params: values(8.0, 0.6, 0.4, 12.0, 8.0),
    },
    ProjectionPreset {
        key: "hyperbolic-compress",
        name: "Hyperbolic Compress",
        mode: ProjectionMode::Stereographic,
        params: values(8.0, 0.2, 0.2, 6.0, 4.0),
    },
    ProjectionPreset {
        key: "extreme-perspective",
        name: "Extreme Perspective",
        mode: ProjectionMode::Perspective,
        params: values(1.5, 0.2, 0.2, 12.0, 8.0),
    },
];

/// Look up a built-in preset by key.
pub fn preset(key: &str) -> HyperResult<&'static ProjectionPreset> {
    PRESETS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| HyperError::validation(format!("unknown projection preset '{key}'")))
}
