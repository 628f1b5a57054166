use super::*;
use crate::foundation::core::Category;
use crate::projection::validate::Severity;
use crate::store::stroke::BrushTool;

fn small_session() -> HyperSession {
    HyperSession::new(HyperSessionOpts {
        scheduler: SchedulerOpts {
            max_instances: 40,
            sync_threshold: 20,
            chunk_size: 8,
            ..SchedulerOpts::default()
        },
        ..HyperSessionOpts::default()
    })
}

#[test]
fn sample_scene_projects_immediately() {
    let mut s = HyperSession::default();
    assert_eq!(s.load_sample(), PassStatus::Completed);
    assert_eq!(s.store().len(), 15);

    let stats = s.store().stats();
    assert_eq!(stats.total_nodes, 15);
    // Only the kernel node at w = -2.2 falls outside the default band.
    assert_eq!(stats.active_nodes, 14);
    assert_eq!(s.buffers().total_visible(), 14);
    assert_eq!(s.buffers().count(Category::Kernel), 2);
    assert_eq!(s.buffers().count(Category::Ai), 5);
}

#[test]
fn load_sample_twice_replaces_contents() {
    let mut s = HyperSession::default();
    s.load_sample();
    s.load_sample();
    assert_eq!(s.store().len(), 15);
    assert_eq!(s.buffers().total_visible(), 14);
}

#[test]
fn slice_change_reprojects_and_updates_stats() {
    let mut s = HyperSession::default();
    s.load_sample();
    s.set_slice(10.0);
    assert_eq!(s.store().stats().active_nodes, 0);
    assert_eq!(s.buffers().total_visible(), 0);
}

#[test]
fn clamped_and_unclamped_params() {
    let mut s = HyperSession::default();
    assert_eq!(s.set_param_clamped(ParamKey::D, 0.5), 2.0);
    assert_eq!(s.params().value(ParamKey::D), 2.0);

    s.set_param(ParamKey::D, 0.4);
    assert_eq!(s.params().value(ParamKey::D), 0.4);
    assert_eq!(s.validate().severity(ParamKey::D), Severity::Danger);
}

#[test]
fn preset_sets_mode_and_values() {
    let mut s = HyperSession::default();
    s.apply_preset("w-parallax").unwrap();
    assert_eq!(s.store().mode(), ProjectionMode::Orthogonal);
    assert_eq!(s.params().value(ParamKey::A), 0.6);
    assert_eq!(s.params().value(ParamKey::B), 0.4);

    s.apply_preset("extreme-perspective").unwrap();
    assert_eq!(s.params().value(ParamKey::D), 1.5);
    // Below the slider minimum, yet just outside the warning band.
    assert!(s.validate().is_clean());

    assert!(s.apply_preset("nope").is_err());
    assert_eq!(s.store().mode(), ProjectionMode::Perspective);
}

#[test]
fn paint_gesture_records_stroke_and_instances() {
    let mut s = HyperSession::default();
    s.set_slice(1.0);
    s.set_brush(Brush {
        tool: BrushTool::Flow,
        category: Category::Hybrid,
        size: 3.0,
        intensity: 1.5,
        ..Brush::default()
    });

    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    assert!(s.is_painting());
    assert_eq!(s.store().len(), 1);
    assert_eq!(s.buffers().count(Category::Hybrid), 1);

    // Too short to record.
    assert_eq!(s.continue_paint(Point3::new(0.1, 0.0, 0.0)), 0);
    assert_eq!(s.current_stroke().map(|d| d.points().len()), Some(1));

    assert_eq!(s.continue_paint(Point3::new(1.0, 0.0, 0.0)), 10);
    assert_eq!(s.store().len(), 11);
    assert_eq!(s.buffers().count(Category::Hybrid), 11);
    let last = s.buffers().visible(Category::Hybrid)[10];
    assert_eq!(last.position, Point3::new(1.0, 0.0, 0.0));
    assert!((last.scale - 0.3).abs() < 1e-12);

    let node = &s.store().nodes()[10];
    assert_eq!(node.position.w, 1.0);
    assert_eq!(node.properties.intensity, 1.5);

    let id = s.end_paint().unwrap();
    assert!(!s.is_painting());
    assert_eq!(s.end_paint(), None);
    let stroke = &s.store().strokes()[0];
    assert_eq!(stroke.id, id);
    assert_eq!(stroke.stroke_type, BrushTool::Flow);
    assert_eq!(stroke.points.len(), 2);
    assert_eq!(s.store().stats().stroke_count, 1);
    assert_eq!(s.store().stats().active_nodes, 11);
}

#[test]
fn continue_without_begin_is_a_no_op() {
    let mut s = HyperSession::default();
    assert_eq!(s.continue_paint(Point3::new(5.0, 0.0, 0.0)), 0);
    assert!(s.store().is_empty());
}

#[test]
fn painting_into_a_full_category_drops_instances_and_nodes() {
    let mut s = HyperSession::new(HyperSessionOpts {
        scheduler: SchedulerOpts {
            max_instances: 12,
            ..SchedulerOpts::default()
        },
        ..HyperSessionOpts::default()
    });
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(s.continue_paint(Point3::new(1.0, 0.0, 0.0)), 2);
    assert_eq!(s.buffers().count(Category::Ai), 3);
    assert_eq!(s.store().len(), 3);
    s.end_paint();
    assert_eq!(s.store().strokes()[0].points.len(), 2);
}

#[test]
fn far_paint_targets_stop_at_capacity() {
    let mut s = small_session();
    let cap = s.buffers().capacity();
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(s.continue_paint(Point3::new(5e6, 0.0, 0.0)), cap - 1);
    assert_eq!(s.buffers().count(Category::Ai), cap);
    assert_eq!(s.store().len(), cap);

    assert_eq!(s.continue_paint(Point3::new(1e30, 0.0, 0.0)), 0);
    assert_eq!(s.buffers().count(Category::Ai), cap);
    assert_eq!(s.store().len(), cap);
    s.end_paint();
    assert_eq!(s.store().strokes()[0].points.len(), 3);

    let mut s = small_session();
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(s.continue_paint(Point3::new(1e30, 0.0, 0.0)), cap - 1);
    assert_eq!(s.buffers().count(Category::Ai), cap);
    assert!(s.buffers().visible(Category::Ai).iter().all(|t| t.position.x.is_finite()));
}

#[test]
fn clear_keeps_view_settings() {
    let mut s = HyperSession::default();
    s.load_sample();
    s.set_mode(ProjectionMode::Stereographic);
    s.set_slice(0.5);
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    s.clear();
    assert!(s.store().is_empty());
    assert!(!s.is_painting());
    assert_eq!(s.buffers().total_visible(), 0);
    assert_eq!(s.store().mode(), ProjectionMode::Stereographic);
    assert_eq!(s.store().slice(), 0.5);
}

#[test]
fn large_store_passes_are_batched_across_ticks() {
    let mut s = small_session();
    s.load_sample(); // 15 nodes, below the threshold of 20
    assert!(!s.scheduler().is_pending());

    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    s.continue_paint(Point3::new(0.0, 1.0, 0.0));
    s.end_paint();
    assert!(s.store().len() >= 20);

    assert_eq!(s.set_slice(0.25), PassStatus::Pending);
    let mut ticks = 0;
    while s.tick() == PassStatus::Pending {
        ticks += 1;
    }
    assert!(ticks >= 2);
    assert_eq!(s.tick(), PassStatus::Idle);
    assert_eq!(s.store().stats().active_nodes, s.store().nodes_in_slice(0.25, 2.0).len());
}

#[test]
fn painting_during_a_batched_pass_restarts_it() {
    let mut s = small_session();
    s.load_sample();
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    s.continue_paint(Point3::new(0.0, 1.0, 0.0));
    s.end_paint();
    assert!(s.store().len() >= 20);

    assert_eq!(s.set_slice(0.25), PassStatus::Pending);
    assert_eq!(s.tick(), PassStatus::Pending);

    s.set_brush(Brush {
        tool: BrushTool::Kernel,
        category: Category::Kernel,
        ..Brush::default()
    });
    s.begin_paint(Point3::new(0.0, 0.0, 0.0));
    assert!(s.continue_paint(Point3::new(0.5, 0.0, 0.0)) > 0);
    s.end_paint();
    s.run_to_completion();
    assert!(!s.scheduler().is_pending());
    assert_eq!(s.scheduler().stats().passes_superseded, 1);

    let text = s.export_document().to_json_pretty().unwrap();
    let mut fresh = small_session();
    fresh.import_document(&text).unwrap();
    fresh.run_to_completion();
    for c in Category::ALL {
        assert_eq!(s.buffers().count(c), fresh.buffers().count(c), "{c} count");
        assert_eq!(s.buffers().slots(c), fresh.buffers().slots(c), "{c} slots");
    }
}

#[test]
fn export_describes_session() {
    let mut s = HyperSession::default();
    s.load_sample();
    s.set_mode(ProjectionMode::Perspective);
    let doc = s.export_document();
    assert_eq!(doc.schema, "4d-session/v1");
    assert_eq!(doc.app, "hyperslice");
    assert_eq!(doc.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(doc.projection.mode, ProjectionMode::Perspective);
    assert_eq!(doc.data.projection, ProjectionMode::Perspective);
    assert_eq!(doc.data.nodes.len(), 15);
    assert_eq!(doc.camera, CameraPose::default());

    let v = serde_json::to_value(&doc).unwrap();
    assert_eq!(v["projection"]["params"]["R"], 12.0);
    assert_eq!(v["data"]["nodes"][0]["type"], "human");
    assert!(v["data"]["nodes"][0]["position4D"]["w"].is_number());
    assert!(v["data"]["stats"]["averageKernelCoupling"].is_number());
}

#[test]
fn import_clamps_params_and_restores_camera() {
    let mut s = HyperSession::default();
    s.load_sample();
    let text = serde_json::json!({
        "projection": { "mode": "orthogonal", "w_slice": 1.5, "params": { "a": 4.0, "c": -20 } },
        "camera": { "pos": [1, 1, 1], "target": [0, 0, 0] },
        "data": { "nodes": [
            { "position4D": { "x": 0, "y": 0, "z": 0, "w": 1 }, "type": "ai" }
        ] }
    })
    .to_string();

    let summary = s.import_document(&text).unwrap();
    assert_eq!(summary.nodes, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.status, PassStatus::Completed);

    assert_eq!(s.store().len(), 1);
    assert_eq!(s.store().mode(), ProjectionMode::Orthogonal);
    assert_eq!(s.store().slice(), 1.5);
    assert_eq!(s.params().value(ParamKey::A), 1.0);
    assert_eq!(s.params().value(ParamKey::C), -12.0);
    assert_eq!(s.params().value(ParamKey::D), 8.0);
    assert_eq!(s.camera().pos, [1.0, 1.0, 1.0]);
    assert_eq!(s.buffers().count(Category::Ai), 1);
}

#[test]
fn failed_import_leaves_session_untouched() {
    let mut s = HyperSession::default();
    s.load_sample();
    let before = s.export_document();
    assert!(s.import_document("{{{").unwrap_err().is_import());
    assert_eq!(s.export_document(), before);
}
