use drawops_model::{Limits, Operation};
use drawops_sanitize::{normalize_label_text, sanitize, Sanitizer};
use drawops_test_utils::{assert_within_limits, fenced, payload};
use proptest::prelude::*;
use serde_json::{json, Value};

fn kind_name() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("add_block")),
        Just(json!("add_arrow")),
        Just(json!("add_stroke")),
        Just(json!("add_shape")),
        Just(json!("add_stroke_path")),
        Just(json!("AddBlock")),
        Just(json!("add_sparkle")),
        Just(json!(7)),
    ]
}

fn loose_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5i64..40).prop_map(Value::from),
        (-3.0f64..3.0).prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

fn point() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => ((-1.0f64..2.0), (-1.0f64..2.0)).prop_map(|(u, v)| json!({"u": u, "v": v})),
        1 => loose_scalar(),
    ]
}

fn candidate() -> impl Strategy<Value = Value> {
    (
        kind_name(),
        loose_scalar(),
        loose_scalar(),
        loose_scalar(),
        "[ -~\\t\\n]{0,120}",
        proptest::collection::vec(point(), 0..12),
    )
        .prop_map(|(op, a, b, c, label, points)| {
            json!({
                "op": op,
                "blockType": "text",
                "label": label,
                "x": a,
                "y": b,
                "w": c,
                "from": a,
                "to": b,
                "target": c,
                "shape": "underline",
                "shapeType": "circle",
                "cx": a,
                "rx": c,
                "points": points
            })
        })
}

proptest! {
    #[test]
    fn prop_arbitrary_text_never_panics(raw in "\\PC{0,400}") {
        let ops = sanitize(&raw);
        assert_within_limits(&ops, &Limits::default());
    }

    #[test]
    fn prop_output_respects_limits(
        candidates in proptest::collection::vec(candidate(), 0..160)
    ) {
        let limits = Limits::default();
        let ops = Sanitizer::new(limits.clone()).sanitize(&fenced(&payload(&candidates)));
        assert_within_limits(&ops, &limits);
    }

    #[test]
    fn prop_tight_limits_hold(
        candidates in proptest::collection::vec(candidate(), 0..60),
        total in 1..20usize,
        words in 1..5usize,
        chars in 4..30usize,
    ) {
        let limits = Limits::default()
            .with_max_operations(total)
            .with_label_limits(words, chars);
        let report = Sanitizer::new(limits.clone()).sanitize_with_report(&payload(&candidates));

        assert_within_limits(&report.operations, &limits);
        prop_assert_eq!(report.candidates_seen(), candidates.len());
    }

    #[test]
    fn prop_sanitizing_output_again_is_stable(
        candidates in proptest::collection::vec(candidate(), 0..60)
    ) {
        let first = sanitize(&payload(&candidates));
        let replay: Vec<Value> = first
            .iter()
            .map(|op| serde_json::to_value(op).unwrap())
            .collect();
        let second = sanitize(&payload(&replay));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_label_normalization_is_idempotent(raw in "\\PC{0,160}") {
        let limits = Limits::default();
        let once = normalize_label_text(&raw, &limits);
        let twice = normalize_label_text(&once, &limits);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.chars().count() <= limits.max_label_chars);
        prop_assert!(once.split_whitespace().count() <= limits.max_label_words);
    }
}

#[test]
fn quoted_label_keeps_inner_ellipsis() {
    let raw = payload(&[json!({"op": "add_block", "label": "\"Quoted   label…\""})]);
    let ops = sanitize(&raw);
    let Operation::AddBlock(block) = &ops[0] else {
        panic!("expected block");
    };
    assert_eq!(block.label, "Quoted label\u{2026}");
}
