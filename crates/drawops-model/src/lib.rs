//! drawops Model
//!
//! Typed drawing operations emitted for the AI Region, plus the [`Limits`]
//! value that bounds how many of them a single batch may hold.
//!
//! # Core Concepts
//!
//! - [`Operation`]: tagged variant over the five drawing instructions
//! - [`OpKind`]: the discriminator, as it appears on the wire
//! - [`Limits`]: per-kind caps, total cap and label limits, loadable from TOML
//! - [`OperationsResponse`]: the `{"operations": [...]}` envelope
//!
//! All positional and size fields are fractions of the AI Region, so every
//! normalized value lives in `[0, 1]`.
//!
//! # Example
//!
//! ```
//! use drawops_model::{Limits, OpKind};
//!
//! let limits = Limits::default().with_cap(OpKind::AddArrow, 8);
//! assert_eq!(limits.cap_for(OpKind::AddArrow), 8);
//! assert_eq!(limits.cap_for(OpKind::AddBlock), 16);
//! ```

#![warn(unreachable_pub)]

mod limits;
mod operation;

pub use limits::{BlockRefPolicy, Limits, LimitsError};
pub use operation::{
    Arrow, Block, BlockRole, BlockType, OpKind, Operation, OperationsResponse, PathPoint, Shape,
    ShapeType, Stroke, StrokePath, StrokeShape,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
