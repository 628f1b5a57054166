use crate::foundation::core::{Category, Point4D};
use crate::projection::functions::project;
use crate::projection::params::ProjectionParams;
use crate::schedule::buffers::{InstanceBuffers, InstanceTransform};
use crate::schedule::pass::ProjectionPass;
use crate::store::node::DEFAULT_SLICE_TOLERANCE;
use crate::store::space::SpatialStore;

/// Options controlling instance capacity and the per-tick work budget.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerOpts {
    /// Total instance budget, split evenly over the categories.
    pub max_instances: usize,
    /// Stores with at least this many nodes are re-projected in chunks across ticks.
    pub sync_threshold: usize,
    /// Nodes scanned per tick by a batched pass.
    pub chunk_size: usize,
    /// Visibility half-width around the slice coordinate.
    pub slice_tolerance: f64,
}

impl Default for SchedulerOpts {
    fn default() -> Self {
        Self {
            max_instances: 20_000,
            sync_threshold: 5_000,
            chunk_size: 500,
            slice_tolerance: DEFAULT_SLICE_TOLERANCE,
        }
    }
}

impl SchedulerOpts {
    /// Slots per category.
    pub fn per_category_capacity(&self) -> usize {
        self.max_instances / Category::COUNT
    }
}

/// Outcome of requesting or advancing a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassStatus {
    /// No pass in flight.
    Idle,
    /// A batched pass has more chunks to run.
    Pending,
    /// A pass finished and statistics were recomputed.
    Completed,
}

/// Counters describing the most recent completed pass and the scheduler lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    pub passes_completed: u64,
    /// In-flight passes discarded because their inputs changed.
    pub passes_superseded: u64,
    /// Chunks consumed by the last completed pass (1 for a synchronous pass).
    pub last_pass_chunks: u32,
    /// Whether the last completed pass ran synchronously.
    pub last_pass_synchronous: bool,
    /// Visible nodes the last completed pass could not place for lack of capacity.
    pub last_pass_dropped: usize,
}

/// Keeps [`InstanceBuffers`] in sync with a [`SpatialStore`] under a per-tick work budget.
///
/// Small stores are re-projected synchronously inside [`request_full_pass`]. Large stores get a
/// batched pass that advances one chunk per [`tick`]. A pass whose store or parameters change
/// before it completes is restarted from scratch; two passes never interleave.
///
/// [`request_full_pass`]: ProjectionScheduler::request_full_pass
/// [`tick`]: ProjectionScheduler::tick
#[derive(Debug)]
pub struct ProjectionScheduler {
    opts: SchedulerOpts,
    buffers: InstanceBuffers,
    pass: Option<ProjectionPass>,
    stats: SchedulerStats,
}

impl Default for ProjectionScheduler {
    fn default() -> Self {
        Self::new(SchedulerOpts::default())
    }
}

impl ProjectionScheduler {
    pub fn new(opts: SchedulerOpts) -> Self {
        let buffers = InstanceBuffers::new(opts.per_category_capacity());
        Self {
            opts,
            buffers,
            pass: None,
            stats: SchedulerStats::default(),
        }
    }

    pub fn opts(&self) -> &SchedulerOpts {
        &self.opts
    }

    /// Output consumed by the renderer.
    pub fn buffers(&self) -> &InstanceBuffers {
        &self.buffers
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn is_pending(&self) -> bool {
        self.pass.is_some()
    }

    /// Start a full re-projection of `store`.
    ///
    /// Any in-flight pass is discarded. Below the sync threshold the pass runs to completion
    /// before returning.
    #[tracing::instrument(skip_all, fields(nodes = store.len()))]
    pub fn request_full_pass(
        &mut self,
        store: &mut SpatialStore,
        params: &ProjectionParams,
    ) -> PassStatus {
        if self.pass.take().is_some() {
            self.stats.passes_superseded += 1;
            tracing::debug!("superseding in-flight projection pass");
        }

        let mut pass = ProjectionPass::new(store, params);
        if store.len() < self.opts.sync_threshold {
            pass.run_chunk(
                store,
                params,
                &mut self.buffers,
                self.opts.slice_tolerance,
                usize::MAX,
            );
            self.complete(pass, store, true);
            return PassStatus::Completed;
        }

        tracing::debug!(chunk_size = self.opts.chunk_size, "starting batched projection pass");
        self.pass = Some(pass);
        PassStatus::Pending
    }

    /// Advance a batched pass by one chunk.
    pub fn tick(&mut self, store: &mut SpatialStore, params: &ProjectionParams) -> PassStatus {
        let Some(mut pass) = self.pass.take() else {
            return PassStatus::Idle;
        };

        if pass.is_stale(store, params) {
            self.stats.passes_superseded += 1;
            tracing::debug!(
                scanned_chunks = pass.chunks,
                "projection inputs changed mid-pass; restarting"
            );
            pass = ProjectionPass::new(store, params);
        }

        let done = pass.run_chunk(
            store,
            params,
            &mut self.buffers,
            self.opts.slice_tolerance,
            self.opts.chunk_size.max(1),
        );
        if done {
            self.complete(pass, store, false);
            PassStatus::Completed
        } else {
            self.pass = Some(pass);
            PassStatus::Pending
        }
    }

    /// Tick until no pass is pending. Returns the number of ticks consumed.
    pub fn run_to_completion(
        &mut self,
        store: &mut SpatialStore,
        params: &ProjectionParams,
    ) -> usize {
        let mut ticks = 0;
        while self.is_pending() {
            self.tick(store, params);
            ticks += 1;
        }
        ticks
    }

    /// Place one freshly painted point without running a pass.
    ///
    /// Returns `false` when the category buffer is full; the point is then dropped.
    pub fn insert_point(
        &mut self,
        store: &SpatialStore,
        params: &ProjectionParams,
        category: Category,
        position: Point4D,
        scale: f64,
    ) -> bool {
        if self.buffers.count(category) >= self.buffers.capacity() {
            return false;
        }
        let t = InstanceTransform {
            position: project(store.mode(), position, store.slice(), params),
            scale,
        };
        self.buffers.push(category, t)
    }

    /// Hide every instance and drop any in-flight pass.
    pub fn reset(&mut self) {
        self.pass = None;
        self.buffers.clear();
    }

    fn complete(&mut self, pass: ProjectionPass, store: &mut SpatialStore, synchronous: bool) {
        pass.finish(&mut self.buffers);
        store.recompute_stats();
        self.stats.passes_completed += 1;
        self.stats.last_pass_chunks = pass.chunks;
        self.stats.last_pass_synchronous = synchronous;
        self.stats.last_pass_dropped = pass.dropped;
        tracing::debug!(
            chunks = pass.chunks,
            dropped = pass.dropped,
            visible = self.buffers.total_visible(),
            "projection pass complete"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
