//! drawops Sanitize
//!
//! The trusted boundary between a generative model's free-form text and the
//! typed drawing operations the canvas consumes.
//!
//! # Pipeline
//!
//! ```text
//! raw text → strip_fences → decode (strict, then {…} span) → Sanitizer → Vec<Operation>
//!                                                              ↑
//!                                                        normalize_label
//! ```
//!
//! The contract with callers is "always a list, possibly empty": malformed
//! payloads and invalid candidates are dropped, never raised.
//!
//! # Example
//!
//! ```
//! use drawops_model::Operation;
//!
//! let raw = "```json\n{\"operations\":[{\"op\":\"add_block\",\"blockType\":\"text\",\"label\":\"  Start   Flow!!!\"}]}\n```";
//! let ops = drawops_sanitize::sanitize(raw);
//!
//! assert_eq!(ops.len(), 1);
//! let Operation::AddBlock(block) = &ops[0] else { unreachable!() };
//! assert_eq!(block.label, "Start Flow!!!");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod decode;
pub mod error;
pub mod fence;
pub mod label;
pub mod report;
pub mod sanitizer;

mod fields;

pub use decode::{decode_candidates, decode_payload, extract_candidates};
pub use error::{DecodeError, RejectReason};
pub use fence::strip_fences;
pub use label::{normalize_label, normalize_label_text};
pub use report::{Dropped, KindCounts, SanitizeReport};
pub use sanitizer::Sanitizer;

use drawops_model::Operation;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Recover operations from raw model text under default limits
///
/// Returns between zero and the default total cap of operations.
#[must_use]
pub fn sanitize(raw: &str) -> Vec<Operation> {
    Sanitizer::default().sanitize(raw)
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for sanitizing model output
    pub use crate::report::SanitizeReport;
    pub use crate::sanitizer::Sanitizer;
    pub use drawops_model::{Limits, OpKind, Operation, OperationsResponse};
}
