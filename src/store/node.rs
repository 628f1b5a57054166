use std::collections::BTreeMap;

use crate::foundation::core::{Category, NodeId, Point4D};

/// Half-width of the `w` band a node must fall in to count as "in slice".
pub const DEFAULT_SLICE_TOLERANCE: f64 = 2.0;

/// Rendering properties of a node.
///
/// Unknown keys from callers or documents are kept in `extra` and written back out unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    /// Brightness / instance size driver, `>= 0`.
    pub intensity: f64,
    /// Nominally in `[0, 1]`.
    pub coherence: f64,
    /// `>= 0`; averaged into the store statistics.
    pub kernel_coupling: f64,
    /// `>= 0`.
    pub age: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for NodeProperties {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            coherence: 0.7,
            kernel_coupling: 1.0,
            age: 0.0,
            extra: BTreeMap::new(),
        }
    }
}

impl NodeProperties {
    /// Defaults with `overrides` applied key by key.
    pub fn merged(overrides: PropertyOverrides) -> Self {
        let d = Self::default();
        Self {
            intensity: overrides.intensity.unwrap_or(d.intensity),
            coherence: overrides.coherence.unwrap_or(d.coherence),
            kernel_coupling: overrides.kernel_coupling.unwrap_or(d.kernel_coupling),
            age: overrides.age.unwrap_or(d.age),
            extra: overrides.extra,
        }
    }

    /// Uniform instance scale used by full projection passes.
    ///
    /// A zero or NaN intensity falls back to 1.
    pub fn instance_scale(&self) -> f64 {
        let intensity = if self.intensity == 0.0 || self.intensity.is_nan() {
            1.0
        } else {
            self.intensity
        };
        intensity * 0.1
    }
}

/// Caller-supplied node properties; `None` keeps the default.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyOverrides {
    pub intensity: Option<f64>,
    pub coherence: Option<f64>,
    pub kernel_coupling: Option<f64>,
    pub age: Option<f64>,
    /// Extra keys carried verbatim.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PropertyOverrides {
    /// Read overrides from a JSON object leniently.
    ///
    /// Known keys holding non-numbers are ignored; all other keys land in `extra`.
    pub fn from_json(obj: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut out = Self::default();
        for (k, v) in obj {
            let slot = match k.as_str() {
                "intensity" => &mut out.intensity,
                "coherence" => &mut out.coherence,
                "kernelCoupling" => &mut out.kernel_coupling,
                "age" => &mut out.age,
                _ => {
                    out.extra.insert(k.clone(), v.clone());
                    continue;
                }
            };
            if let Some(n) = v.as_f64() {
                *slot = Some(n);
            }
        }
        out
    }
}

/// A point placed in 4D space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HyperNode {
    pub id: NodeId,
    #[serde(rename = "position4D")]
    pub position: Point4D,
    #[serde(rename = "type")]
    pub category: Category,
    pub properties: NodeProperties,
}

impl HyperNode {
    /// `true` when the node's `w` lies within `tolerance` of `w_slice` (inclusive).
    pub fn is_visible_at_slice(&self, w_slice: f64, tolerance: f64) -> bool {
        (self.position.w - w_slice).abs() <= tolerance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/node.rs"]
mod tests;
