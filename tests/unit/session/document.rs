use super::*;
use serde_json::json;

#[test]
fn non_json_is_an_import_error() {
    let err = parse_document("not json {").unwrap_err();
    assert!(err.is_import());
    assert!(parse_document("").unwrap_err().is_import());
}

#[test]
fn empty_object_falls_back_to_defaults() {
    let doc = parse_document("{}").unwrap();
    assert_eq!(doc.mode, ProjectionMode::Slice);
    assert_eq!(doc.w_slice, 0.0);
    assert!(doc.params.is_empty());
    assert_eq!(doc.camera, None);
    assert!(doc.nodes.is_empty());
    assert!(doc.strokes.is_empty());
    assert_eq!(doc.skipped, 0);
}

#[test]
fn unknown_mode_and_bad_slice_are_tolerated() {
    let text = json!({
        "projection": { "mode": "hyperbolic", "w_slice": "three", "params": { "d": 4.0, "a": "x", "R": 30 } }
    })
    .to_string();
    let doc = parse_document(&text).unwrap();
    assert_eq!(doc.mode, ProjectionMode::Slice);
    assert_eq!(doc.w_slice, 0.0);
    assert_eq!(doc.params, vec![(ParamKey::D, 4.0), (ParamKey::R, 30.0)]);
}

#[test]
fn camera_requires_both_triples() {
    let half = json!({ "camera": { "pos": [1, 2, 3] } }).to_string();
    assert_eq!(parse_document(&half).unwrap().camera, None);

    let short = json!({ "camera": { "pos": [1, 2], "target": [0, 0, 0] } }).to_string();
    assert_eq!(parse_document(&short).unwrap().camera, None);

    let full = json!({ "camera": { "pos": [1, 2, 3], "target": [0, 0.5, 0] } }).to_string();
    assert_eq!(
        parse_document(&full).unwrap().camera,
        Some(CameraPose {
            pos: [1.0, 2.0, 3.0],
            target: [0.0, 0.5, 0.0],
        })
    );
}

#[test]
fn malformed_nodes_are_skipped() {
    let text = json!({
        "data": {
            "nodes": [
                { "position4D": { "x": 1, "y": 2, "z": 3, "w": 0.5 }, "type": "kernel",
                  "properties": { "intensity": 2.0, "coherence": "high", "label": "k0" } },
                { "position4D": { "x": 1, "y": 2, "z": 3 }, "type": "ai" },
                { "position4D": { "x": 1, "y": 2, "z": 3, "w": 0 }, "type": "alien" },
                "garbage",
                { "position4D": { "x": 0, "y": 0, "z": 0, "w": 0 }, "type": "human" }
            ]
        }
    })
    .to_string();
    let doc = parse_document(&text).unwrap();
    assert_eq!(doc.nodes.len(), 2);
    assert_eq!(doc.skipped, 3);

    let k = &doc.nodes[0];
    assert_eq!(k.category, Category::Kernel);
    assert_eq!(k.position, Point4D::new(1.0, 2.0, 3.0, 0.5));
    assert_eq!(k.overrides.intensity, Some(2.0));
    assert_eq!(k.overrides.coherence, None);
    assert_eq!(k.overrides.extra.get("label"), Some(&json!("k0")));

    assert_eq!(doc.nodes[1].overrides, PropertyOverrides::default());
}

#[test]
fn strokes_keep_valid_points_only() {
    let text = json!({
        "data": {
            "strokes": [
                { "type": "4DFlow", "consciousnessType": "hybrid", "points4D": [
                    { "position4D": { "x": 0, "y": 0, "z": 0, "w": 0 }, "properties": { "size": 5 } },
                    { "position4D": { "x": "a", "y": 0, "z": 0, "w": 0 } },
                    { "position4D": { "x": 1, "y": 0, "z": 0, "w": 0 }, "properties": 7 }
                ] },
                { "type": "mystery", "consciousnessType": "ai" },
                { "type": "4DNode" }
            ]
        }
    })
    .to_string();
    let doc = parse_document(&text).unwrap();
    assert_eq!(doc.strokes.len(), 2);
    assert_eq!(doc.skipped, 1);

    let flow = &doc.strokes[0];
    assert_eq!(flow.stroke_type, BrushTool::Flow);
    assert_eq!(flow.category, Category::Hybrid);
    assert_eq!(flow.points().len(), 2);
    assert_eq!(flow.points()[0].properties.size, 5.0);
    assert_eq!(flow.points()[1].properties, Brush::default());

    assert_eq!(doc.strokes[1].stroke_type, BrushTool::Brush);
    assert!(doc.strokes[1].points().is_empty());
}

#[test]
fn digest_ignores_key_order_and_whitespace() {
    let a: Value = serde_json::from_str(r#"{"b": 1, "a": {"y": [1, 2], "x": null}}"#).unwrap();
    let b: Value = serde_json::from_str(r#"{"a":{"x":null,"y":[1,2]},"b":1}"#).unwrap();
    assert_eq!(digest_value(&a), digest_value(&b));
    assert_eq!(digest_value(&a).len(), 64);

    let c: Value = serde_json::from_str(r#"{"a":{"x":null,"y":[2,1]},"b":1}"#).unwrap();
    assert_ne!(digest_value(&a), digest_value(&c));
}

#[test]
fn digest_of_empty_object_is_sha256_of_braces() {
    assert_eq!(
        digest_value(&json!({})),
        "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
    );
}

#[test]
fn digest_hashes_compact_sorted_text() {
    // sha256 of {"a":[1,2.5,"x"],"b":{"c":null,"d":true}}
    let v = json!({ "b": { "d": true, "c": null }, "a": [1, 2.5, "x"] });
    assert_eq!(
        digest_value(&v),
        "3f2209c9470486da010ac643a0abb7892811de0d5da1cca29f5c5a88356dce1d"
    );
}

#[test]
fn default_camera_pose() {
    let c = CameraPose::default();
    assert_eq!(c.pos, [8.0, 8.0, 12.0]);
    assert_eq!(c.target, [0.0, 0.0, 0.0]);
}
