//! Operation sanitizer
//!
//! Walks the decoded candidates in order and keeps only those that fit one
//! of the five operation shapes, within the per-kind and total caps. A bad
//! candidate is dropped on its own; it never aborts the batch.
//!
//! # Per-candidate steps
//!
//! 1. Object with a known `op` (or `kind`) discriminator
//! 2. Per-kind cap not yet reached
//! 3. Kind-specific structure: clamped coordinates, coerced arrow indices,
//!    at least [`Limits::min_path_points`] points on a path
//! 4. Blocks get a normalized `blockType` and label
//!
//! Once [`Limits::max_operations`] candidates are accepted the rest are
//! dropped unseen.

use crate::decode::{decode_candidates, extract_candidates};
use crate::error::{json_type_name, RejectReason};
use crate::fence::strip_fences;
use crate::fields::{
    clamp_unit, coerce_index, finite_number, number, strict_index, string, unit_interval, Object,
};
use crate::label::normalize_label;
use crate::report::{KindCounts, SanitizeReport};
use drawops_model::{
    Arrow, Block, BlockRefPolicy, BlockRole, BlockType, Limits, OpKind, Operation, PathPoint,
    Shape, ShapeType, Stroke, StrokePath, StrokeShape,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Discriminator keys, in lookup order
const DISCRIMINATOR_KEYS: [&str; 2] = ["op", "kind"];

/// Sanitizer bound to one set of [`Limits`]
///
/// Holds no per-call state; one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    limits: Limits,
}

impl Sanitizer {
    /// Create sanitizer enforcing `limits`
    #[inline]
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Limits enforced by this sanitizer
    #[inline]
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Recover operations from raw model text
    ///
    /// Never fails: unusable input yields an empty list.
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> Vec<Operation> {
        self.sanitize_with_report(raw).operations
    }

    /// Recover operations from an already decoded payload
    #[must_use]
    pub fn sanitize_value(&self, payload: Value) -> Vec<Operation> {
        match extract_candidates(payload) {
            Ok(candidates) => self.sanitize_candidates(&candidates).operations,
            Err(e) => {
                debug!(error = %e, "payload holds no operations list");
                Vec::new()
            }
        }
    }

    /// Like [`Sanitizer::sanitize`], also reporting what was dropped
    #[must_use]
    pub fn sanitize_with_report(&self, raw: &str) -> SanitizeReport {
        match decode_candidates(strip_fences(raw)) {
            Ok(candidates) => self.sanitize_candidates(&candidates),
            Err(e) => {
                debug!(error = %e, raw_len = raw.len(), "model response not decodable");
                SanitizeReport::undecodable(e)
            }
        }
    }

    /// Sanitize a decoded candidate list
    #[must_use]
    pub fn sanitize_candidates(&self, candidates: &[Value]) -> SanitizeReport {
        let mut report = SanitizeReport::default();

        for (index, candidate) in candidates.iter().enumerate() {
            if report.operations.len() >= self.limits.max_operations {
                report.drop_candidate(
                    index,
                    RejectReason::TotalCapReached {
                        cap: self.limits.max_operations,
                    },
                );
                continue;
            }

            match self.check_candidate(candidate, &report.counts) {
                Ok(operation) => {
                    trace!(index, kind = %operation.kind(), "accepted operation");
                    report.accept(operation);
                }
                Err(reason) => {
                    debug!(index, %reason, "dropped candidate operation");
                    report.drop_candidate(index, reason);
                }
            }
        }

        debug!(
            accepted = report.operations.len(),
            dropped = report.dropped.len(),
            "sanitized operation batch"
        );
        report
    }

    fn check_candidate(
        &self,
        candidate: &Value,
        counts: &KindCounts,
    ) -> Result<Operation, RejectReason> {
        let obj = candidate.as_object().ok_or(RejectReason::NotAnObject {
            found: json_type_name(candidate),
        })?;

        let kind = classify(obj)?;

        let cap = self.limits.cap_for(kind);
        if counts.get(kind) >= cap {
            return Err(RejectReason::KindCapReached { kind, cap });
        }

        match kind {
            OpKind::AddBlock => Ok(self.block(obj)),
            OpKind::AddArrow => self.arrow(obj, counts.blocks),
            OpKind::AddStroke => self.stroke(obj, counts.blocks),
            OpKind::AddShape => shape(obj),
            OpKind::AddStrokePath => self.stroke_path(obj),
        }
    }

    fn block(&self, obj: &Object) -> Operation {
        let block_type = obj
            .get("blockType")
            .and_then(Value::as_str)
            .and_then(BlockType::from_wire)
            .unwrap_or_default();

        Operation::AddBlock(Block {
            block_type,
            label: normalize_label(obj.get("label"), &self.limits),
            x: unit_interval(obj, "x"),
            y: unit_interval(obj, "y"),
            w: unit_interval(obj, "w"),
            h: unit_interval(obj, "h"),
            lane: strict_index(obj, "lane").and_then(|v| u32::try_from(v).ok()),
            role: obj
                .get("role")
                .and_then(Value::as_str)
                .and_then(BlockRole::from_wire),
        })
    }

    fn arrow(&self, obj: &Object, blocks: usize) -> Result<Operation, RejectReason> {
        let endpoint = |field: &'static str| -> Result<usize, RejectReason> {
            let index = coerce_index(obj.get(field))
                .map_err(|e| RejectReason::invalid_index(OpKind::AddArrow, field, e.detail()))?;
            self.check_block_ref(OpKind::AddArrow, field, index, blocks)
        };

        let from = endpoint("from")?;
        let to = endpoint("to")?;
        Ok(Operation::AddArrow(Arrow { from, to }))
    }

    fn stroke(&self, obj: &Object, blocks: usize) -> Result<Operation, RejectReason> {
        let kind = OpKind::AddStroke;

        let target = strict_index(obj, "target").ok_or(RejectReason::MissingField {
            kind,
            field: "target",
        })?;
        let target = self.check_block_ref(kind, "target", target, blocks)?;

        let shape = match obj.get("shape").and_then(Value::as_str) {
            Some(name) => StrokeShape::from_wire(name)
                .ok_or_else(|| RejectReason::invalid_variant(kind, "shape", name))?,
            None => return Err(RejectReason::MissingField { kind, field: "shape" }),
        };

        Ok(Operation::AddStroke(Stroke {
            target,
            shape,
            color: string(obj, "color"),
            width: finite_number(obj, "width"),
        }))
    }

    fn stroke_path(&self, obj: &Object) -> Result<Operation, RejectReason> {
        let raw_points = obj
            .get("points")
            .and_then(Value::as_array)
            .ok_or(RejectReason::MissingField {
                kind: OpKind::AddStrokePath,
                field: "points",
            })?;

        let points: Vec<PathPoint> = raw_points
            .iter()
            .filter_map(path_point)
            .take(self.limits.max_path_points)
            .collect();

        if points.len() < self.limits.min_path_points {
            return Err(RejectReason::TooFewPoints {
                found: points.len(),
                required: self.limits.min_path_points,
            });
        }

        Ok(Operation::AddStrokePath(StrokePath {
            color: string(obj, "color"),
            width: finite_number(obj, "width"),
            points,
        }))
    }

    fn check_block_ref(
        &self,
        kind: OpKind,
        field: &'static str,
        index: usize,
        blocks: usize,
    ) -> Result<usize, RejectReason> {
        match self.limits.block_refs {
            BlockRefPolicy::AcceptedBlocks if index >= blocks => Err(RejectReason::IndexOutOfRange {
                kind,
                field,
                index,
                blocks,
            }),
            _ => Ok(index),
        }
    }
}

/// Resolve the operation kind of a candidate
fn classify(obj: &Object) -> Result<OpKind, RejectReason> {
    let discriminator = DISCRIMINATOR_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .ok_or(RejectReason::MissingDiscriminator)?;

    OpKind::from_discriminator(discriminator).ok_or_else(|| RejectReason::UnknownKind {
        value: discriminator.to_string(),
    })
}

fn shape(obj: &Object) -> Result<Operation, RejectReason> {
    let kind = OpKind::AddShape;
    let shape_type = match obj.get("shapeType").and_then(Value::as_str) {
        Some(name) => ShapeType::from_wire(name)
            .ok_or_else(|| RejectReason::invalid_variant(kind, "shapeType", name))?,
        None => return Err(RejectReason::MissingField { kind, field: "shapeType" }),
    };

    Ok(Operation::AddShape(Shape {
        shape_type,
        cx: unit_interval(obj, "cx"),
        cy: unit_interval(obj, "cy"),
        rx: unit_interval(obj, "rx"),
        ry: unit_interval(obj, "ry"),
        x1: unit_interval(obj, "x1"),
        y1: unit_interval(obj, "y1"),
        x2: unit_interval(obj, "x2"),
        y2: unit_interval(obj, "y2"),
        stroke_color: string(obj, "strokeColor"),
        stroke_width: finite_number(obj, "strokeWidth"),
    }))
}

/// One path vertex; a missing coordinate defaults to 0, a mistyped one
/// discards the vertex
fn path_point(value: &Value) -> Option<PathPoint> {
    let obj = value.as_object()?;
    let coord = |key: &str| match obj.get(key) {
        None => Some(0.0),
        Some(v) => number(v).and_then(clamp_unit),
    };
    Some(PathPoint {
        u: coord("u")?,
        v: coord("v")?,
    })
}
