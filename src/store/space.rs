use crate::foundation::core::{Category, NodeId, Point4D, StrokeId};
use crate::projection::functions::ProjectionMode;
use crate::store::node::{DEFAULT_SLICE_TOLERANCE, HyperNode, NodeProperties, PropertyOverrides};
use crate::store::stroke::{HyperStroke, StrokeDraft};

/// Aggregate statistics over the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStats {
    pub total_nodes: usize,
    /// Nodes within [`DEFAULT_SLICE_TOLERANCE`] of the current slice.
    pub active_nodes: usize,
    pub stroke_count: usize,
    /// Mean kernel coupling over all nodes, 0 when empty.
    pub average_kernel_coupling: f64,
}

/// Serializable view of the whole store (the `data` section of a session document).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SpaceSnapshot {
    pub nodes: Vec<HyperNode>,
    pub strokes: Vec<HyperStroke>,
    pub stats: SpaceStats,
    pub projection: ProjectionMode,
    pub w_slice: f64,
}

/// Append-only store of 4D nodes and strokes.
///
/// `stats` is kept equal to what [`SpatialStore::recompute_stats`] would produce after every
/// mutation. Appending a node folds it into the running totals instead of rescanning.
#[derive(Debug, Default)]
pub struct SpatialStore {
    nodes: Vec<HyperNode>,
    strokes: Vec<HyperStroke>,
    w_slice: f64,
    mode: ProjectionMode,
    stats: SpaceStats,
    kernel_sum: f64,
    next_node_id: u64,
    next_stroke_id: u64,
    generation: u64,
}

impl SpatialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with defaults merged under `overrides`. Never fails.
    pub fn add_node(
        &mut self,
        position: Point4D,
        category: Category,
        overrides: PropertyOverrides,
    ) -> &HyperNode {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        let node = HyperNode {
            id,
            position,
            category,
            properties: NodeProperties::merged(overrides),
        };

        // Same left-to-right summation as `recompute_stats`, so the results are bit-identical.
        self.kernel_sum += coupling_term(&node);
        if node.is_visible_at_slice(self.w_slice, DEFAULT_SLICE_TOLERANCE) {
            self.stats.active_nodes += 1;
        }
        self.nodes.push(node);
        self.stats.total_nodes = self.nodes.len();
        self.stats.average_kernel_coupling = self.kernel_sum / self.nodes.len() as f64;
        self.generation += 1;

        &self.nodes[self.nodes.len() - 1]
    }

    /// Freeze and append a completed stroke.
    pub fn add_stroke(&mut self, draft: StrokeDraft) -> StrokeId {
        let id = StrokeId(self.next_stroke_id);
        self.next_stroke_id += 1;
        self.strokes.push(HyperStroke::freeze(id, draft));
        self.stats.stroke_count = self.strokes.len();
        id
    }

    /// Nodes within `tolerance` of `w_slice`, in insertion order.
    pub fn nodes_in_slice(&self, w_slice: f64, tolerance: f64) -> Vec<&HyperNode> {
        self.nodes
            .iter()
            .filter(|n| n.is_visible_at_slice(w_slice, tolerance))
            .collect()
    }

    /// Euclidean distance over all four components.
    pub fn distance_4d(a: Point4D, b: Point4D) -> f64 {
        a.distance(b)
    }

    /// Recompute every statistic from scratch. Idempotent.
    pub fn recompute_stats(&mut self) {
        let mut kernel_sum = 0.0;
        let mut active = 0usize;
        for n in &self.nodes {
            kernel_sum += coupling_term(n);
            if n.is_visible_at_slice(self.w_slice, DEFAULT_SLICE_TOLERANCE) {
                active += 1;
            }
        }
        self.kernel_sum = kernel_sum;
        self.stats = SpaceStats {
            total_nodes: self.nodes.len(),
            active_nodes: active,
            stroke_count: self.strokes.len(),
            average_kernel_coupling: if self.nodes.is_empty() {
                0.0
            } else {
                kernel_sum / self.nodes.len() as f64
            },
        };
    }

    /// Move the viewed cross-section; statistics follow.
    pub fn set_slice(&mut self, w_slice: f64) {
        if self.w_slice.to_bits() == w_slice.to_bits() {
            return;
        }
        self.w_slice = w_slice;
        self.generation += 1;
        self.recompute_stats();
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.generation += 1;
    }

    /// Drop every node and stroke. Slice and mode are kept; ids keep counting.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.strokes.clear();
        self.generation += 1;
        self.recompute_stats();
    }

    pub fn serialize(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            nodes: self.nodes.clone(),
            strokes: self.strokes.clone(),
            stats: self.stats,
            projection: self.mode,
            w_slice: self.w_slice,
        }
    }

    pub fn nodes(&self) -> &[HyperNode] {
        &self.nodes
    }

    pub fn strokes(&self) -> &[HyperStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn slice(&self) -> f64 {
        self.w_slice
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn stats(&self) -> SpaceStats {
        self.stats
    }

    /// Bumped by every change that invalidates projected output.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn coupling_term(node: &HyperNode) -> f64 {
    let k = node.properties.kernel_coupling;
    if k.is_nan() { 0.0 } else { k }
}

#[cfg(test)]
#[path = "../../tests/unit/store/space.rs"]
mod tests;
