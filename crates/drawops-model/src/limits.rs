//! Batch limits
//!
//! A single [`Limits`] value is the source of truth for every cap: the
//! sanitizer enforces it and the prompt builder advertises it. Limits load
//! from TOML; omitted keys keep their defaults.
//!
//! ```toml
//! max_blocks = 12
//! max_label_words = 6
//! block_refs = "accepted_blocks"
//! ```

use crate::operation::OpKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How arrow endpoints and stroke targets are checked against blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRefPolicy {
    /// Only require a non-negative integer index
    #[default]
    Permissive,
    /// Require the index to name a block already accepted in the batch
    AcceptedBlocks,
}

/// Caps and limits for one sanitization batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum `add_block` operations
    pub max_blocks: usize,
    /// Maximum `add_arrow` operations
    pub max_arrows: usize,
    /// Maximum `add_stroke` operations
    pub max_strokes: usize,
    /// Maximum `add_shape` operations
    pub max_shapes: usize,
    /// Maximum `add_stroke_path` operations
    pub max_stroke_paths: usize,
    /// Maximum operations of any kind
    pub max_operations: usize,
    /// Maximum words kept in a label
    pub max_label_words: usize,
    /// Maximum characters in a label, ellipsis included
    pub max_label_chars: usize,
    /// Fewest valid points a stroke path may keep
    pub min_path_points: usize,
    /// Most points a stroke path may keep
    pub max_path_points: usize,
    /// Block reference checking
    pub block_refs: BlockRefPolicy,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_blocks: 16,
            max_arrows: 24,
            max_strokes: 16,
            max_shapes: 16,
            max_stroke_paths: 6,
            max_operations: 80,
            max_label_words: 8,
            max_label_chars: 80,
            min_path_points: 4,
            max_path_points: 200,
            block_refs: BlockRefPolicy::Permissive,
        }
    }
}

impl Limits {
    /// Create default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap for one operation kind
    #[inline]
    #[must_use]
    pub fn cap_for(&self, kind: OpKind) -> usize {
        match kind {
            OpKind::AddBlock => self.max_blocks,
            OpKind::AddArrow => self.max_arrows,
            OpKind::AddStroke => self.max_strokes,
            OpKind::AddShape => self.max_shapes,
            OpKind::AddStrokePath => self.max_stroke_paths,
        }
    }

    /// With a different cap for one kind
    #[must_use]
    pub fn with_cap(mut self, kind: OpKind, cap: usize) -> Self {
        let slot = match kind {
            OpKind::AddBlock => &mut self.max_blocks,
            OpKind::AddArrow => &mut self.max_arrows,
            OpKind::AddStroke => &mut self.max_strokes,
            OpKind::AddShape => &mut self.max_shapes,
            OpKind::AddStrokePath => &mut self.max_stroke_paths,
        };
        *slot = cap;
        self
    }

    /// With a different total cap
    #[inline]
    #[must_use]
    pub fn with_max_operations(mut self, max: usize) -> Self {
        self.max_operations = max;
        self
    }

    /// With different label limits
    #[inline]
    #[must_use]
    pub fn with_label_limits(mut self, max_words: usize, max_chars: usize) -> Self {
        self.max_label_words = max_words;
        self.max_label_chars = max_chars;
        self
    }

    /// With a block reference policy
    #[inline]
    #[must_use]
    pub fn with_block_refs(mut self, policy: BlockRefPolicy) -> Self {
        self.block_refs = policy;
        self
    }

    /// Check that the limits can be enforced
    ///
    /// # Errors
    /// Returns [`LimitsError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.max_operations == 0 {
            return Err(LimitsError::invalid("max_operations", "must be at least 1"));
        }
        if self.max_label_words == 0 {
            return Err(LimitsError::invalid("max_label_words", "must be at least 1"));
        }
        if self.max_label_chars == 0 {
            return Err(LimitsError::invalid("max_label_chars", "must be at least 1"));
        }
        if self.min_path_points == 0 {
            return Err(LimitsError::invalid("min_path_points", "must be at least 1"));
        }
        if self.max_path_points < self.min_path_points {
            return Err(LimitsError::invalid(
                "max_path_points",
                format!("must not be below min_path_points ({})", self.min_path_points),
            ));
        }
        Ok(())
    }

    /// Parse and validate limits from TOML text
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or the limits are invalid
    pub fn from_toml_str(text: &str) -> Result<Self, LimitsError> {
        let limits: Self = toml::from_str(text)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Load limits from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or does not hold valid limits
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LimitsError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| LimitsError::io_error(path, source))?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_toml_string(&self) -> Result<String, LimitsError> {
        Ok(toml::to_string(self)?)
    }
}

/// Errors loading or validating [`Limits`]
#[derive(Debug, thiserror::Error)]
pub enum LimitsError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type error
    #[error("invalid limits toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML rendering failed
    #[error("failed to render limits: {0}")]
    Render(#[from] toml::ser::Error),

    /// A limit cannot be enforced
    #[error("invalid limit {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl LimitsError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create invalid-value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_match_advertised_caps() {
        let limits = Limits::default();
        assert_eq!(limits.cap_for(OpKind::AddBlock), 16);
        assert_eq!(limits.cap_for(OpKind::AddArrow), 24);
        assert_eq!(limits.cap_for(OpKind::AddStroke), 16);
        assert_eq!(limits.cap_for(OpKind::AddShape), 16);
        assert_eq!(limits.cap_for(OpKind::AddStrokePath), 6);
        assert_eq!(limits.max_operations, 80);
        assert_eq!(limits.max_label_words, 8);
        assert_eq!(limits.max_label_chars, 80);
        assert_eq!(limits.min_path_points, 4);
        assert_eq!(limits.block_refs, BlockRefPolicy::Permissive);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let limits = Limits::from_toml_str(
            r#"
            max_blocks = 4
            block_refs = "accepted_blocks"
            "#,
        )
        .unwrap();

        assert_eq!(limits.max_blocks, 4);
        assert_eq!(limits.block_refs, BlockRefPolicy::AcceptedBlocks);
        assert_eq!(limits.max_arrows, 24);
        assert_eq!(limits.max_label_chars, 80);
    }

    #[test]
    fn toml_round_trip() {
        let limits = Limits::default()
            .with_cap(OpKind::AddShape, 3)
            .with_label_limits(5, 40);
        let text = limits.to_toml_string().unwrap();
        assert_eq!(Limits::from_toml_str(&text).unwrap(), limits);
    }

    #[test]
    fn rejects_unenforceable_limits() {
        let err = Limits::from_toml_str("max_label_chars = 0").unwrap_err();
        assert!(matches!(err, LimitsError::Invalid { field: "max_label_chars", .. }));

        let err = Limits::default().with_max_operations(0).validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid limit max_operations: must be at least 1");

        let err = Limits::from_toml_str("min_path_points = 10\nmax_path_points = 5").unwrap_err();
        assert!(matches!(err, LimitsError::Invalid { field: "max_path_points", .. }));
    }

    #[test]
    fn rejects_mistyped_toml() {
        let err = Limits::from_toml_str("max_blocks = \"many\"").unwrap_err();
        assert!(matches!(err, LimitsError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_stroke_paths = 2").unwrap();

        let limits = Limits::load(file.path()).unwrap();
        assert_eq!(limits.cap_for(OpKind::AddStrokePath), 2);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Limits::load("/nonexistent/drawops-limits.toml").unwrap_err();
        assert!(matches!(err, LimitsError::Io { .. }));
        assert!(err.to_string().contains("drawops-limits.toml"));
    }
}
