use serde_json::{Map, Value};
use sha2::Digest as _;

use crate::foundation::core::{Category, Point4D};
use crate::foundation::error::{HyperError, HyperResult};
use crate::projection::functions::ProjectionMode;
use crate::projection::params::{ParamKey, ParamValues};
use crate::store::node::PropertyOverrides;
use crate::store::space::SpaceSnapshot;
use crate::store::stroke::{Brush, BrushTool, StrokeDraft};

/// Schema tag written into every exported document.
pub const DOCUMENT_SCHEMA: &str = "4d-session/v1";
/// Application tag written into every exported document.
pub const DOCUMENT_APP: &str = "hyperslice";

/// Viewer camera, carried through documents untouched.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraPose {
    pub pos: [f64; 3],
    pub target: [f64; 3],
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            pos: [8.0, 8.0, 12.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// `projection` section of a session document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ProjectionSection {
    pub mode: ProjectionMode,
    pub w_slice: f64,
    pub params: ParamValues,
}

/// A complete exported session.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SessionDocument {
    pub schema: String,
    pub app: String,
    pub version: String,
    pub projection: ProjectionSection,
    pub camera: CameraPose,
    pub data: SpaceSnapshot,
}

impl SessionDocument {
    pub fn to_json_pretty(&self) -> HyperResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HyperError::serde(e.to_string()))
    }

    /// Hex SHA-256 of the `data` section in canonical form.
    pub fn content_digest(&self) -> HyperResult<String> {
        serde_json::to_value(&self.data)
            .map(|data| digest_value(&data))
            .map_err(|e| HyperError::serde(e.to_string()))
    }
}

/// Hex SHA-256 over the canonical JSON text of `value` (sorted keys, no whitespace).
///
/// `serde_json::Map` is ordered by key, so the compact writer is already canonical.
pub fn digest_value(value: &Value) -> String {
    let digest = sha2::Sha256::digest(value.to_string().as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// A node entry recovered from a document.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedNode {
    pub position: Point4D,
    pub category: Category,
    pub overrides: PropertyOverrides,
}

/// Everything salvageable from a document, before it is applied to a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedDocument {
    pub mode: ProjectionMode,
    pub w_slice: f64,
    /// Numeric parameters present in the document, in key order.
    pub params: Vec<(ParamKey, f64)>,
    pub camera: Option<CameraPose>,
    pub nodes: Vec<ImportedNode>,
    pub strokes: Vec<StrokeDraft>,
    /// Node and stroke entries dropped as malformed.
    pub skipped: usize,
}

/// Parse a session document leniently.
///
/// Only text that is not JSON at all is an error. Missing or malformed fields fall back to
/// defaults and malformed nodes or strokes are skipped.
#[tracing::instrument(skip_all, fields(bytes = text.len()))]
pub fn parse_document(text: &str) -> HyperResult<ImportedDocument> {
    let root: Value = serde_json::from_str(text).map_err(|e| HyperError::import(e.to_string()))?;

    let projection = root.get("projection");
    let mode = projection
        .and_then(|p| p.get("mode"))
        .and_then(Value::as_str)
        .map_or(ProjectionMode::Slice, ProjectionMode::parse_or_slice);
    let w_slice = projection
        .and_then(|p| p.get("w_slice"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let mut params = Vec::new();
    if let Some(obj) = projection.and_then(|p| p.get("params")).and_then(Value::as_object) {
        for key in ParamKey::ALL {
            if let Some(v) = obj.get(key.as_str()).and_then(Value::as_f64) {
                params.push((key, v));
            }
        }
    }

    let camera = root.get("camera").and_then(|c| {
        let pos = read_triple(c.get("pos")?)?;
        let target = read_triple(c.get("target")?)?;
        Some(CameraPose { pos, target })
    });

    let data = root.get("data");
    let mut skipped = 0usize;

    let mut nodes = Vec::new();
    for (i, entry) in array_field(data, "nodes").iter().enumerate() {
        match read_node(entry) {
            Some(n) => nodes.push(n),
            None => {
                skipped += 1;
                tracing::warn!(index = i, "skipping malformed node entry");
            }
        }
    }

    let mut strokes = Vec::new();
    for (i, entry) in array_field(data, "strokes").iter().enumerate() {
        match read_stroke(entry) {
            Some(s) => strokes.push(s),
            None => {
                skipped += 1;
                tracing::warn!(index = i, "skipping malformed stroke entry");
            }
        }
    }

    Ok(ImportedDocument {
        mode,
        w_slice,
        params,
        camera,
        nodes,
        strokes,
        skipped,
    })
}

fn array_field<'a>(section: Option<&'a Value>, key: &str) -> &'a [Value] {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

fn read_triple(v: &Value) -> Option<[f64; 3]> {
    let items = v.as_array()?;
    if items.len() != 3 {
        return None;
    }
    Some([items[0].as_f64()?, items[1].as_f64()?, items[2].as_f64()?])
}

fn read_point(v: &Value) -> Option<Point4D> {
    Some(Point4D::new(
        v.get("x")?.as_f64()?,
        v.get("y")?.as_f64()?,
        v.get("z")?.as_f64()?,
        v.get("w")?.as_f64()?,
    ))
}

fn read_category(v: Option<&Value>) -> Option<Category> {
    v?.as_str()?.parse().ok()
}

fn read_node(entry: &Value) -> Option<ImportedNode> {
    let position = read_point(entry.get("position4D")?)?;
    let category = read_category(entry.get("type"))?;
    let overrides = entry
        .get("properties")
        .and_then(Value::as_object)
        .map(PropertyOverrides::from_json)
        .unwrap_or_default();
    Some(ImportedNode {
        position,
        category,
        overrides,
    })
}

fn read_stroke(entry: &Value) -> Option<StrokeDraft> {
    let obj: &Map<String, Value> = entry.as_object()?;
    let category = read_category(obj.get("consciousnessType"))?;
    let tool = obj
        .get("type")
        .and_then(|t| serde_json::from_value::<BrushTool>(t.clone()).ok())
        .unwrap_or_default();

    let mut draft = StrokeDraft::new(tool, category);
    let points = obj
        .get("points4D")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);
    for p in points {
        let Some(position) = p.get("position4D").and_then(read_point) else {
            continue;
        };
        let properties = p
            .get("properties")
            .and_then(|b| serde_json::from_value::<Brush>(b.clone()).ok())
            .unwrap_or_default();
        draft.push_point(position, properties);
    }
    Some(draft)
}

#[cfg(test)]
#[path = "../../tests/unit/session/document.rs"]
mod tests;
