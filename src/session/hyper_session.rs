use crate::foundation::core::{Point3, Point4D, StrokeId};
use crate::foundation::error::HyperResult;
use crate::projection::functions::ProjectionMode;
use crate::projection::params::{ParamKey, ProjectionParams};
use crate::projection::presets::preset;
use crate::projection::validate::{ParamReport, validate_params};
use crate::schedule::buffers::InstanceBuffers;
use crate::schedule::scheduler::{PassStatus, ProjectionScheduler, SchedulerOpts};
use crate::session::document::{
    CameraPose, DOCUMENT_APP, DOCUMENT_SCHEMA, ProjectionSection, SessionDocument, parse_document,
};
use crate::session::paint::segment_points;
use crate::session::sample::sample_nodes;
use crate::store::node::PropertyOverrides;
use crate::store::space::SpatialStore;
use crate::store::stroke::{Brush, StrokeDraft};

/// Options for constructing a [`HyperSession`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HyperSessionOpts {
    pub scheduler: SchedulerOpts,
    /// Initial brush.
    pub brush: Brush,
    /// Initial camera pose.
    pub camera: CameraPose,
}

/// Result of [`HyperSession::import_document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub nodes: usize,
    pub strokes: usize,
    /// Malformed entries that were dropped.
    pub skipped: usize,
    /// Status of the full pass requested after the import.
    pub status: PassStatus,
}

/// One editing session: store, parameters, scheduler and paint state.
///
/// Every edit that changes what is visible requests a full projection pass; for large stores the
/// caller then drives [`HyperSession::tick`] once per frame until it returns
/// [`PassStatus::Completed`] or [`PassStatus::Idle`].
#[derive(Debug)]
pub struct HyperSession {
    store: SpatialStore,
    params: ProjectionParams,
    scheduler: ProjectionScheduler,
    camera: CameraPose,
    brush: Brush,
    stroke: Option<StrokeDraft>,
}

impl Default for HyperSession {
    fn default() -> Self {
        Self::new(HyperSessionOpts::default())
    }
}

impl HyperSession {
    pub fn new(opts: HyperSessionOpts) -> Self {
        Self {
            store: SpatialStore::new(),
            params: ProjectionParams::default(),
            scheduler: ProjectionScheduler::new(opts.scheduler),
            camera: opts.camera,
            brush: opts.brush,
            stroke: None,
        }
    }

    pub fn store(&self) -> &SpatialStore {
        &self.store
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    pub fn scheduler(&self) -> &ProjectionScheduler {
        &self.scheduler
    }

    pub fn buffers(&self) -> &InstanceBuffers {
        self.scheduler.buffers()
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn set_camera(&mut self, camera: CameraPose) {
        self.camera = camera;
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Replace the brush. A stroke in progress keeps its tool and category.
    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn current_stroke(&self) -> Option<&StrokeDraft> {
        self.stroke.as_ref()
    }

    pub fn request_full_pass(&mut self) -> PassStatus {
        self.scheduler.request_full_pass(&mut self.store, &self.params)
    }

    /// Advance a pending batched pass by one chunk.
    pub fn tick(&mut self) -> PassStatus {
        self.scheduler.tick(&mut self.store, &self.params)
    }

    pub fn run_to_completion(&mut self) -> usize {
        self.scheduler.run_to_completion(&mut self.store, &self.params)
    }

    pub fn set_slice(&mut self, w_slice: f64) -> PassStatus {
        self.store.set_slice(w_slice);
        self.request_full_pass()
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) -> PassStatus {
        self.store.set_mode(mode);
        self.request_full_pass()
    }

    /// Write a parameter as-is; out-of-range values show up in [`Self::validate`].
    pub fn set_param(&mut self, key: ParamKey, value: f64) -> PassStatus {
        self.params.set_value(key, value);
        self.request_full_pass()
    }

    /// Write a parameter clamped into its slider range; returns the stored value.
    pub fn set_param_clamped(&mut self, key: ParamKey, value: f64) -> f64 {
        let stored = self.params.set_clamped(key, value);
        self.request_full_pass();
        stored
    }

    /// Switch to a built-in preset's mode and values (unclamped).
    pub fn apply_preset(&mut self, key: &str) -> HyperResult<PassStatus> {
        let p = preset(key)?;
        tracing::debug!(preset = p.key, mode = %p.mode, "applying projection preset");
        self.store.set_mode(p.mode);
        self.params.set_values(p.params);
        Ok(self.request_full_pass())
    }

    pub fn validate(&self) -> ParamReport {
        validate_params(&self.params)
    }

    /// Start a stroke at `pick` on the current slice and place its first instance.
    ///
    /// A stroke already in progress is discarded.
    pub fn begin_paint(&mut self, pick: Point3) {
        let position = Point4D::from_pick(pick, self.store.slice());
        let mut draft = StrokeDraft::new(self.brush.tool, self.brush.category);
        draft.push_point(position, self.brush);
        self.stroke = Some(draft);
        self.paint_instance(position);
    }

    /// Extend the stroke towards `pick`. Returns the number of instances laid down.
    pub fn continue_paint(&mut self, pick: Point3) -> usize {
        let position = Point4D::from_pick(pick, self.store.slice());
        let Some(draft) = self.stroke.as_mut() else {
            return 0;
        };
        let Some(last) = draft.last_position() else {
            return 0;
        };
        let Some(points) = segment_points(last, position) else {
            return 0;
        };
        draft.push_point(position, self.brush);
        // Once the category is full every further insert is a no-op.
        points.take_while(|&p| self.paint_instance(p)).count()
    }

    /// Freeze the stroke in progress into the store.
    pub fn end_paint(&mut self) -> Option<StrokeId> {
        let draft = self.stroke.take()?;
        let id = self.store.add_stroke(draft);
        self.store.recompute_stats();
        Some(id)
    }

    /// Append one painted instance and its node. Both are dropped when the category is full.
    fn paint_instance(&mut self, position: Point4D) -> bool {
        let brush = self.brush;
        let placed = self.scheduler.insert_point(
            &self.store,
            &self.params,
            brush.category,
            position,
            brush.instance_scale(),
        );
        if !placed {
            return false;
        }
        self.store.add_node(
            position,
            brush.category,
            PropertyOverrides {
                intensity: Some(brush.intensity),
                coherence: Some(brush.coherence),
                kernel_coupling: Some(brush.kernel_coupling),
                ..PropertyOverrides::default()
            },
        );
        true
    }

    /// Drop every node, stroke and instance. Slice, mode and parameters are kept.
    pub fn clear(&mut self) {
        self.stroke = None;
        self.store.clear();
        self.scheduler.reset();
    }

    /// Replace the contents with the built-in sample scene.
    pub fn load_sample(&mut self) -> PassStatus {
        self.clear();
        for (position, category, overrides) in sample_nodes() {
            self.store.add_node(position, category, overrides);
        }
        self.request_full_pass()
    }

    pub fn export_document(&self) -> SessionDocument {
        SessionDocument {
            schema: DOCUMENT_SCHEMA.to_string(),
            app: DOCUMENT_APP.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            projection: ProjectionSection {
                mode: self.store.mode(),
                w_slice: self.store.slice(),
                params: self.params.values(),
            },
            camera: self.camera,
            data: self.store.serialize(),
        }
    }

    /// Replace the session contents with a parsed document.
    ///
    /// Fails only when `text` is not JSON; the session is left untouched in that case.
    #[tracing::instrument(skip_all)]
    pub fn import_document(&mut self, text: &str) -> HyperResult<ImportSummary> {
        let doc = parse_document(text)?;

        self.stroke = None;
        self.scheduler.reset();
        self.store = SpatialStore::new();
        self.store.set_mode(doc.mode);
        self.store.set_slice(doc.w_slice);
        for (key, value) in doc.params {
            if !self.params.range(key).contains(value) {
                tracing::warn!(%key, value, "parameter outside its range; clamped");
            }
            self.params.set_clamped(key, value);
        }
        if let Some(camera) = doc.camera {
            self.camera = camera;
        }

        let (nodes, strokes) = (doc.nodes.len(), doc.strokes.len());
        for n in doc.nodes {
            self.store.add_node(n.position, n.category, n.overrides);
        }
        for s in doc.strokes {
            self.store.add_stroke(s);
        }
        tracing::debug!(nodes, strokes, skipped = doc.skipped, "session document imported");

        Ok(ImportSummary {
            nodes,
            strokes,
            skipped: doc.skipped,
            status: self.request_full_pass(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/hyper_session.rs"]
mod tests;
