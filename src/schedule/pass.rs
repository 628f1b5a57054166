use crate::foundation::core::Category;
use crate::projection::functions::project;
use crate::projection::params::{ParamValues, ProjectionParams};
use crate::schedule::buffers::{InstanceBuffers, InstanceTransform};
use crate::store::space::SpatialStore;

/// Resumable state of one full projection pass.
///
/// The write cursors persist across chunks and are only reset by starting a new pass.
#[derive(Clone, Debug)]
pub(crate) struct ProjectionPass {
    /// Store generation the pass was started against.
    generation: u64,
    /// Parameter values the pass was started with.
    params: ParamValues,
    next_index: usize,
    cursors: [usize; Category::COUNT],
    pub(crate) chunks: u32,
    /// Visible nodes that found their category buffer full.
    pub(crate) dropped: usize,
}

impl ProjectionPass {
    pub(crate) fn new(store: &SpatialStore, params: &ProjectionParams) -> Self {
        Self {
            generation: store.generation(),
            params: params.values(),
            next_index: 0,
            cursors: [0; Category::COUNT],
            chunks: 0,
            dropped: 0,
        }
    }

    /// `true` when the store or the parameters moved on since the pass started.
    pub(crate) fn is_stale(&self, store: &SpatialStore, params: &ProjectionParams) -> bool {
        self.generation != store.generation() || !self.params.same_bits(&params.values())
    }

    pub(crate) fn is_done(&self, store: &SpatialStore) -> bool {
        self.next_index >= store.len()
    }

    /// Project up to `max_nodes` further nodes into `buffers`. Returns `true` once every node has
    /// been scanned.
    pub(crate) fn run_chunk(
        &mut self,
        store: &SpatialStore,
        params: &ProjectionParams,
        buffers: &mut InstanceBuffers,
        tolerance: f64,
        max_nodes: usize,
    ) -> bool {
        let nodes = store.nodes();
        let start = self.next_index.min(nodes.len());
        let end = start.saturating_add(max_nodes).min(nodes.len());
        let (mode, w_slice) = (store.mode(), store.slice());
        let capacity = buffers.capacity();

        for node in &nodes[start..end] {
            if !node.is_visible_at_slice(w_slice, tolerance) {
                continue;
            }
            let cursor = &mut self.cursors[node.category.index()];
            if *cursor >= capacity {
                self.dropped += 1;
                continue;
            }
            let t = InstanceTransform {
                position: project(mode, node.position, w_slice, params),
                scale: node.properties.instance_scale(),
            };
            buffers.write(node.category, *cursor, t);
            *cursor += 1;
        }

        // Provisional counts; trailing slots stay untouched until `finish`.
        for c in Category::ALL {
            buffers.set_count(c, self.cursors[c.index()]);
        }

        self.next_index = end;
        self.chunks += 1;
        self.is_done(store)
    }

    /// Hide every slot past the cursors and finalize the visible counts.
    pub(crate) fn finish(&self, buffers: &mut InstanceBuffers) {
        for c in Category::ALL {
            let n = self.cursors[c.index()];
            buffers.hide_from(c, n);
            buffers.set_count(c, n);
        }
    }
}
