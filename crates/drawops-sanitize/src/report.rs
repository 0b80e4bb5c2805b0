//! Sanitization report
//!
//! The plain [`crate::sanitize`] contract hides every failure. The report
//! keeps the same operations but also records what was dropped and why.

use crate::error::RejectReason;
use drawops_model::{OpKind, Operation, OperationsResponse};
use serde::Serialize;

/// Accepted operations per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    /// `add_block` count
    pub blocks: usize,
    /// `add_arrow` count
    pub arrows: usize,
    /// `add_stroke` count
    pub strokes: usize,
    /// `add_shape` count
    pub shapes: usize,
    /// `add_stroke_path` count
    pub stroke_paths: usize,
}

impl KindCounts {
    /// Count for one kind
    #[inline]
    #[must_use]
    pub fn get(&self, kind: OpKind) -> usize {
        match kind {
            OpKind::AddBlock => self.blocks,
            OpKind::AddArrow => self.arrows,
            OpKind::AddStroke => self.strokes,
            OpKind::AddShape => self.shapes,
            OpKind::AddStrokePath => self.stroke_paths,
        }
    }

    pub(crate) fn increment(&mut self, kind: OpKind) {
        let slot = match kind {
            OpKind::AddBlock => &mut self.blocks,
            OpKind::AddArrow => &mut self.arrows,
            OpKind::AddStroke => &mut self.strokes,
            OpKind::AddShape => &mut self.shapes,
            OpKind::AddStrokePath => &mut self.stroke_paths,
        };
        *slot += 1;
    }

    /// Sum over all kinds
    #[must_use]
    pub fn total(&self) -> usize {
        OpKind::ALL.iter().map(|k| self.get(*k)).sum()
    }
}

/// One dropped candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropped {
    /// Position in the decoded candidate list
    pub index: usize,
    /// Why it was dropped
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// Outcome of one sanitization call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SanitizeReport {
    /// Accepted operations, in input order
    pub operations: Vec<Operation>,
    /// Accepted operations per kind
    pub counts: KindCounts,
    /// Rejected candidates, in input order
    pub dropped: Vec<Dropped>,
    /// Set when the payload produced no candidate list at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl SanitizeReport {
    pub(crate) fn undecodable(error: impl ToString) -> Self {
        Self {
            decode_error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn accept(&mut self, operation: Operation) {
        self.counts.increment(operation.kind());
        self.operations.push(operation);
    }

    pub(crate) fn drop_candidate(&mut self, index: usize, reason: RejectReason) {
        self.dropped.push(Dropped { index, reason });
    }

    /// Number of candidates seen, accepted or not
    #[must_use]
    pub fn candidates_seen(&self) -> usize {
        self.operations.len() + self.dropped.len()
    }

    /// Whether nothing was accepted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Response envelope for the accepted operations
    #[must_use]
    pub fn into_response(self) -> OperationsResponse {
        OperationsResponse::from(self.operations)
    }
}
