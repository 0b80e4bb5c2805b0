//! drawops Prompt
//!
//! Renders the instruction text that tells a model which drawing operations
//! it may emit for the AI Region. Every number in the text comes from the
//! same [`Limits`] the sanitizer enforces, so the advertised caps and the
//! enforced caps cannot drift apart.
//!
//! # Example
//!
//! ```
//! use drawops_model::Limits;
//! use drawops_prompt::PromptBuilder;
//!
//! let limits = Limits::default();
//! let prompt = PromptBuilder::new(&limits).build("a login flow");
//!
//! assert!(prompt.contains("\"\"\"a login flow\"\"\""));
//! assert!(prompt.contains("AT MOST 16 add_block"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use drawops_model::{BlockRefPolicy, Limits, OpKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Points suggested for a visible freehand stroke
const SUGGESTED_PATH_POINTS: usize = 30;

/// Builds the instruction text for one user request
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    limits: &'a Limits,
}

impl<'a> PromptBuilder<'a> {
    /// Builder advertising `limits`
    #[inline]
    #[must_use]
    pub fn new(limits: &'a Limits) -> Self {
        Self { limits }
    }

    /// Full instruction text embedding `user_prompt`
    #[must_use]
    pub fn build(&self, user_prompt: &str) -> String {
        let sections = [
            self.preamble(user_prompt),
            self.block_section(),
            self.arrow_section(),
            self.stroke_section(),
            self.shape_section(),
            self.stroke_path_section(),
            self.style_section(),
        ];
        sections.join("\n")
    }

    fn cap(&self, kind: OpKind) -> usize {
        self.limits.cap_for(kind)
    }

    fn preamble(&self, user_prompt: &str) -> String {
        format!(
            r#"You are an AI diagram and doodle assistant for a zoomable canvas.

The user has selected a rectangular "AI Region" and given this prompt:

"""{prompt}"""

You must RETURN ONLY JSON in this exact top-level shape:

{{
  "operations": [ Operation, ... ]
}}

No prose, no comments, no explanations. Just that JSON object.
Emit AT MOST {total} operations in total.

Each Operation is one of the following forms.
"#,
            prompt = quote_user_prompt(user_prompt),
            total = self.limits.max_operations,
        )
    }

    fn block_section(&self) -> String {
        let words = self.limits.max_label_words;
        let chars = self.limits.max_label_chars;
        format!(
            r#"1) Add a text/paragraph block
--------------------------------

{{
  "op": "add_block",
  "blockType": "text" | "paragraph",
  "label": "short label (1-{words} words, <= {chars} chars, no newlines)",
  "x": 0.1,
  "y": 0.1,
  "w": 0.4,
  "h": 0.25
}}

Rules:
- LABELS MUST BE SHORT: 1-{words} words, no line breaks, no paragraphs.
- Avoid redundancy. Summarize long ideas into a few concise blocks.
- x, y are the top-left corner; w, h are fractions of the region; all in [0,1].
- "text" is a heading; "paragraph" is smaller explanatory text.
- Emit AT MOST {cap} add_block operations. Prefer 3-7 if possible.
"#,
            cap = self.cap(OpKind::AddBlock),
        )
    }

    fn arrow_section(&self) -> String {
        let strict = match self.limits.block_refs {
            BlockRefPolicy::Permissive => "",
            BlockRefPolicy::AcceptedBlocks => {
                "\n- An arrow may only point at blocks emitted BEFORE it; others are discarded."
            }
        };
        format!(
            r#"2) Add an arrow between two blocks
-----------------------------------

Indexes refer to the ORDER in which you emit add_block operations (starting at 0).

{{
  "op": "add_arrow",
  "from": 0,
  "to": 1
}}

Rules:
- Only use indices that correspond to existing add_block operations.{strict}
- Show essential relationships only (sequence, cause/effect, data flow).
- Hard limit: AT MOST {cap} arrows.
- Prefer a minimal, readable graph, not a dense tangle.
"#,
            cap = self.cap(OpKind::AddArrow),
        )
    }

    fn stroke_section(&self) -> String {
        format!(
            r##"3) Add a decorative stroke around a block
-----------------------------------------

{{
  "op": "add_stroke",
  "target": 0,
  "shape": "underline" | "circle" | "highlight",
  "color": "#f97316",
  "width": 3
}}

Rules:
- Use sparingly to emphasize key blocks.
- At most {cap} add_stroke operations.
"##,
            cap = self.cap(OpKind::AddStroke),
        )
    }

    fn shape_section(&self) -> String {
        format!(
            r##"4) Add a symbolic shape (circle / ellipse / rect / line)
--------------------------------------------------------

Coordinates are normalized to the inner AI Region ([0,1]).
Circle, ellipse and rect use cx, cy, rx, ry. Line uses x1, y1, x2, y2.

{{
  "op": "add_shape",
  "shapeType": "circle" | "ellipse" | "rect" | "line",
  "cx": 0.5,
  "cy": 0.3,
  "rx": 0.15,
  "ry": 0.10,
  "x1": 0.2,
  "y1": 0.5,
  "x2": 0.8,
  "y2": 0.5,
  "strokeColor": "#e5e7eb",
  "strokeWidth": 2
}}

Rules:
- All coordinates MUST be between 0 and 1.
- Use a small number of shapes (<= {cap}) to keep drawings clean.
- Rectangles for boxes, circles/ellipses for icons or heads, lines for legs/axes/etc.
"##,
            cap = self.cap(OpKind::AddShape),
        )
    }

    fn stroke_path_section(&self) -> String {
        let most = self.limits.max_path_points;
        let fewest = self.limits.min_path_points;
        let suggested = SUGGESTED_PATH_POINTS.clamp(fewest, most.max(fewest));
        format!(
            r##"5) Add a freehand stroke path
------------------------------

{{
  "op": "add_stroke_path",
  "color": "#e5e7eb",
  "width": 2,
  "points": [
    {{ "u": 0.10, "v": 0.20 }},
    {{ "u": 0.12, "v": 0.25 }},
    ...
  ]
}}

Rules:
- u, v in [0,1] inside the region.
- Use BETWEEN {suggested} AND {most} points for a visible organic stroke.
- Paths with fewer than {fewest} points are discarded.
- Keep strokes inside 0.05 <= u,v <= 0.95.
- Use at most {cap} stroke paths.
"##,
            cap = self.cap(OpKind::AddStrokePath),
        )
    }

    #[allow(clippy::unused_self)]
    fn style_section(&self) -> String {
        r#"General style rules
-------------------
- Think like a diagrammer: decide WHAT to draw, not how it looks.
- Prefer a few concise blocks with very short labels.
- Prefer a limited number of arrows showing the main flow.
- Do NOT output paragraphs as labels; keep them short summary phrases.
- Never output anything except a valid JSON object with an "operations" array.
"#
        .to_string()
    }
}

/// User text made safe to embed between triple quotes
///
/// Double quotes are escaped so the text can never close the quoted block
/// early.
#[must_use]
pub fn quote_user_prompt(user_prompt: &str) -> String {
    user_prompt.trim().replace('"', "\\\"")
}
