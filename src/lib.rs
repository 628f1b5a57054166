//! hyperslice projects points living in 4D space into 3D render space.
//!
//! The public API is session-oriented:
//!
//! - Create a [`HyperSession`] (or drive a [`SpatialStore`] and [`ProjectionScheduler`] directly)
//! - Move the slice, switch [`ProjectionMode`], edit [`ProjectionParams`] or paint strokes
//! - Read the per-category [`InstanceBuffers`] after each [`HyperSession::tick`]
//! - Export and import sessions as [`SessionDocument`] JSON
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod projection;
pub(crate) mod schedule;
pub(crate) mod session;
pub(crate) mod store;

pub use crate::foundation::core::{Category, NodeId, Point3, Point4D, StrokeId};
pub use crate::foundation::error::{HyperError, HyperResult};

pub use crate::projection::functions::{
    ProjectionMode, project, project_orthogonal, project_perspective, project_slice,
    project_stereographic,
};
pub use crate::projection::params::{ParamKey, ParamRange, ParamValues, ProjectionParams};
pub use crate::projection::presets::{PRESETS, ProjectionPreset, preset};
pub use crate::projection::validate::{ParamReport, Severity, validate_params};
pub use crate::schedule::buffers::{InstanceBuffers, InstanceTransform};
pub use crate::schedule::scheduler::{
    PassStatus, ProjectionScheduler, SchedulerOpts, SchedulerStats,
};
pub use crate::session::document::{
    CameraPose, DOCUMENT_APP, DOCUMENT_SCHEMA, ImportedDocument, ImportedNode, ProjectionSection,
    SessionDocument, digest_value, parse_document,
};
pub use crate::session::hyper_session::{HyperSession, HyperSessionOpts, ImportSummary};
pub use crate::session::paint::{MIN_PAINT_SEGMENT, PAINT_STEP, segment_points};
pub use crate::session::sample::{SAMPLE_SEED, sample_nodes};
pub use crate::store::node::{DEFAULT_SLICE_TOLERANCE, HyperNode, NodeProperties, PropertyOverrides};
pub use crate::store::space::{SpaceSnapshot, SpaceStats, SpatialStore};
pub use crate::store::stroke::{Brush, BrushTool, HyperStroke, StrokeDraft, StrokePoint};
