//! Testing utilities for drawops workspace
//!
//! Candidate builders, model-response wrappers and an invariant checker
//! shared by the sanitizer, prompt and CLI tests.

#![allow(missing_docs)]

use drawops_model::{Limits, OpKind, Operation};
use serde_json::{json, Value};

pub fn block(label: &str) -> Value {
    json!({"op": "add_block", "blockType": "text", "label": label})
}

pub fn block_at(label: &str, x: f64, y: f64) -> Value {
    json!({
        "op": "add_block",
        "blockType": "paragraph",
        "label": label,
        "x": x,
        "y": y,
        "w": 0.3,
        "h": 0.15
    })
}

pub fn arrow(from: impl Into<Value>, to: impl Into<Value>) -> Value {
    let (from, to): (Value, Value) = (from.into(), to.into());
    json!({"op": "add_arrow", "from": from, "to": to})
}

pub fn stroke(target: usize) -> Value {
    json!({"op": "add_stroke", "target": target, "shape": "underline", "color": "#f97316", "width": 3})
}

pub fn circle(cx: f64, cy: f64, r: f64) -> Value {
    json!({
        "op": "add_shape",
        "shapeType": "circle",
        "cx": cx,
        "cy": cy,
        "rx": r,
        "ry": r,
        "strokeColor": "#e5e7eb",
        "strokeWidth": 2
    })
}

/// Stroke path with `n` points along a diagonal
pub fn stroke_path(n: usize) -> Value {
    let points: Vec<Value> = (0..n)
        .map(|i| {
            let t = if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            json!({"u": 0.05 + 0.9 * t, "v": 0.05 + 0.9 * t})
        })
        .collect();
    json!({"op": "add_stroke_path", "color": "#e5e7eb", "width": 2, "points": points})
}

/// `{"operations": [...]}` as compact JSON text
pub fn payload(ops: &[Value]) -> String {
    json!({ "operations": ops }).to_string()
}

/// Payload wrapped the way models usually answer
pub fn fenced(json_text: &str) -> String {
    format!("Here is your drawing:\n```json\n{json_text}\n```\nLet me know if you want changes.")
}

/// Payload surrounded by prose with no fence
pub fn chatty(json_text: &str) -> String {
    format!("Sure! I sketched the flow below. {json_text} Hope this helps!")
}

/// Panics with a description of the first broken output invariant
pub fn assert_within_limits(ops: &[Operation], limits: &Limits) {
    assert!(
        ops.len() <= limits.max_operations,
        "{} operations exceed total cap {}",
        ops.len(),
        limits.max_operations
    );

    for kind in OpKind::ALL {
        let count = ops.iter().filter(|op| op.kind() == kind).count();
        assert!(
            count <= limits.cap_for(kind),
            "{count} {kind} operations exceed cap {}",
            limits.cap_for(kind)
        );
    }

    for op in ops {
        for (field, value) in op.normalized_fields() {
            assert!(
                (0.0..=1.0).contains(&value),
                "{} field {field} = {value} outside [0, 1]",
                op.kind()
            );
        }

        match op {
            Operation::AddBlock(block) => {
                let label = &block.label;
                assert!(
                    label.split_whitespace().count() <= limits.max_label_words,
                    "label {label:?} has too many words"
                );
                assert!(
                    label.chars().count() <= limits.max_label_chars,
                    "label {label:?} is too long"
                );
                assert!(
                    !label.contains("  ") && label.trim() == label,
                    "label {label:?} is not whitespace-collapsed"
                );
                assert!(
                    !label.chars().any(|c| c.is_whitespace() && c != ' '),
                    "label {label:?} holds non-space whitespace"
                );
            }
            Operation::AddStrokePath(path) => {
                assert!(
                    path.points.len() >= limits.min_path_points,
                    "stroke path has {} points",
                    path.points.len()
                );
                assert!(path.points.len() <= limits.max_path_points);
            }
            _ => {}
        }
    }
}
