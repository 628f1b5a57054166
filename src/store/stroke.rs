use crate::foundation::core::{Category, Point4D, StrokeId};

/// Paint tool that produced a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BrushTool {
    #[default]
    #[serde(rename = "4DBrush")]
    Brush,
    #[serde(rename = "4DNode")]
    Node,
    #[serde(rename = "4DFlow")]
    Flow,
    #[serde(rename = "4DKernel")]
    Kernel,
    #[serde(rename = "4DEraser")]
    Eraser,
}

/// Brush state; also the per-point property snapshot stored in strokes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brush {
    pub tool: BrushTool,
    #[serde(rename = "consciousnessType")]
    pub category: Category,
    /// Instance size; painted instances are scaled by `size * 0.1`.
    pub size: f64,
    pub intensity: f64,
    pub coherence: f64,
    pub kernel_coupling: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            tool: BrushTool::Brush,
            category: Category::Ai,
            size: 2.0,
            intensity: 1.0,
            coherence: 0.7,
            kernel_coupling: 1.0,
        }
    }
}

impl Brush {
    pub fn instance_scale(&self) -> f64 {
        self.size * 0.1
    }
}

/// One recorded stroke sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokePoint {
    #[serde(rename = "position4D")]
    pub position: Point4D,
    pub properties: Brush,
}

/// A stroke being recorded. Points are only ever appended.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeDraft {
    pub stroke_type: BrushTool,
    pub category: Category,
    points: Vec<StrokePoint>,
}

impl StrokeDraft {
    pub fn new(stroke_type: BrushTool, category: Category) -> Self {
        Self {
            stroke_type,
            category,
            points: Vec::new(),
        }
    }

    pub fn push_point(&mut self, position: Point4D, properties: Brush) {
        self.points.push(StrokePoint {
            position,
            properties,
        });
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn last_position(&self) -> Option<Point4D> {
        self.points.last().map(|p| p.position)
    }
}

/// A frozen polyline through 4D space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HyperStroke {
    pub id: StrokeId,
    #[serde(rename = "type")]
    pub stroke_type: BrushTool,
    #[serde(rename = "consciousnessType")]
    pub category: Category,
    #[serde(rename = "points4D")]
    pub points: Vec<StrokePoint>,
}

impl HyperStroke {
    pub(crate) fn freeze(id: StrokeId, draft: StrokeDraft) -> Self {
        Self {
            id,
            stroke_type: draft.stroke_type,
            category: draft.category,
            points: draft.points,
        }
    }

    /// Sum of 4D segment lengths.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].position.distance(w[1].position))
            .sum()
    }
}
