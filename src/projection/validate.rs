use std::collections::BTreeMap;

use crate::projection::params::{ParamKey, ProjectionParams};

/// How risky a parameter's current value is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No finding.
    Safe,
    /// Output is usable but visibly distorted.
    Warning,
    /// Output is numerically unreliable.
    Danger,
}

/// Findings of [`validate_params`], keyed by parameter with a human-readable reason.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParamReport {
    /// Parameters that produce extreme but usable output.
    pub warnings: BTreeMap<ParamKey, &'static str>,
    /// Parameters that make the projection unreliable.
    pub dangers: BTreeMap<ParamKey, &'static str>,
}

impl ParamReport {
    /// Danger wins over warning; a key in neither map is safe.
    pub fn severity(&self, key: ParamKey) -> Severity {
        if self.dangers.contains_key(&key) {
            Severity::Danger
        } else if self.warnings.contains_key(&key) {
            Severity::Warning
        } else {
            Severity::Safe
        }
    }

    /// Reason for the highest severity finding on `key`, if any.
    pub fn reason(&self, key: ParamKey) -> Option<&'static str> {
        self.dangers
            .get(&key)
            .or_else(|| self.warnings.get(&key))
            .copied()
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.dangers.is_empty()
    }

    pub fn has_dangers(&self) -> bool {
        !self.dangers.is_empty()
    }
}

/// Classify the current parameter values into warning and danger bands.
///
/// Values outside their slider range and non-finite values are accepted; NaN compares false
/// against every threshold and therefore reports as safe.
pub fn validate_params(params: &ProjectionParams) -> ParamReport {
    let mut report = ParamReport::default();

    let d = params.d.value;
    if d < 0.5 {
        report
            .dangers
            .insert(ParamKey::D, "projection unstable at d < 0.5");
    } else if d < 1.5 {
        report
            .warnings
            .insert(ParamKey::D, "perspective may be extreme");
    }

    // Each shear axis is judged on its own.
    if params.a.value.abs() > 1.5 {
        report.warnings.insert(ParamKey::A, "high w-blend may distort");
    }
    if params.b.value.abs() > 1.5 {
        report.warnings.insert(ParamKey::B, "high w-blend may distort");
    }

    if params.r.value < 1.0 {
        report
            .dangers
            .insert(ParamKey::R, "stereographic radius too small");
    }
    if params.c.value < -10.0 {
        report.warnings.insert(ParamKey::C, "large negative offset");
    }

    report
}

#[cfg(test)]
#[path = "../../tests/unit/projection/validate.rs"]
mod tests;
