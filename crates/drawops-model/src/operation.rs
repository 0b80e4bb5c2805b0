//! Drawing operations
//!
//! One [`Operation`] is one instruction of the drawing program. The wire form
//! is a JSON object discriminated by `op`:
//!
//! ```json
//! {"op": "add_block", "blockType": "text", "label": "Start", "x": 0.1, "y": 0.1}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// Text or paragraph node
    AddBlock,
    /// Connector between two blocks
    AddArrow,
    /// Decoration around a block
    AddStroke,
    /// Circle, ellipse, rectangle or line
    AddShape,
    /// Freehand polyline
    AddStrokePath,
}

impl OpKind {
    /// All kinds, in wire order
    pub const ALL: [OpKind; 5] = [
        OpKind::AddBlock,
        OpKind::AddArrow,
        OpKind::AddStroke,
        OpKind::AddShape,
        OpKind::AddStrokePath,
    ];

    /// Wire name (`add_block`, ...)
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::AddBlock => "add_block",
            OpKind::AddArrow => "add_arrow",
            OpKind::AddStroke => "add_stroke",
            OpKind::AddShape => "add_shape",
            OpKind::AddStrokePath => "add_stroke_path",
        }
    }

    /// Resolve a discriminator value
    ///
    /// Accepts the snake_case wire names and their PascalCase spellings.
    #[must_use]
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "add_block" | "AddBlock" => Some(OpKind::AddBlock),
            "add_arrow" | "AddArrow" => Some(OpKind::AddArrow),
            "add_stroke" | "AddStroke" => Some(OpKind::AddStroke),
            "add_shape" | "AddShape" => Some(OpKind::AddShape),
            "add_stroke_path" | "AddStrokePath" => Some(OpKind::AddStrokePath),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Heading
    Text,
    /// Smaller explanatory text
    #[default]
    Paragraph,
}

impl BlockType {
    /// Exact wire match, case-sensitive
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "text" => Some(BlockType::Text),
            "paragraph" => Some(BlockType::Paragraph),
            _ => None,
        }
    }
}

/// Position of a block within its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Entry node
    Start,
    /// Terminal node
    End,
    /// Anything in between
    Normal,
}

impl BlockRole {
    /// Exact wire match, case-sensitive
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "start" => Some(BlockRole::Start),
            "end" => Some(BlockRole::End),
            "normal" => Some(BlockRole::Normal),
            _ => None,
        }
    }
}

/// Decoration drawn by [`Stroke`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeShape {
    /// Line under the block
    Underline,
    /// Loop around the block
    Circle,
    /// Marker fill behind the block
    Highlight,
}

impl StrokeShape {
    /// Exact wire match, case-sensitive
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "underline" => Some(StrokeShape::Underline),
            "circle" => Some(StrokeShape::Circle),
            "highlight" => Some(StrokeShape::Highlight),
            _ => None,
        }
    }
}

/// Geometry of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    /// Center + radius
    Circle,
    /// Center + two radii
    Ellipse,
    /// Center + half extents
    Rect,
    /// Two endpoints
    Line,
}

impl ShapeType {
    /// Exact wire match, case-sensitive
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "circle" => Some(ShapeType::Circle),
            "ellipse" => Some(ShapeType::Ellipse),
            "rect" => Some(ShapeType::Rect),
            "line" => Some(ShapeType::Line),
            _ => None,
        }
    }
}

/// Text node placed in the AI Region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Heading or paragraph
    pub block_type: BlockType,
    /// Normalized display label
    pub label: String,
    /// Left edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Top edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Width fraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    /// Height fraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    /// Swimlane index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane: Option<u32>,
    /// Flow role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<BlockRole>,
}

/// Arrow between two blocks, by emission index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    /// Source block index
    pub from: usize,
    /// Destination block index
    pub to: usize,
}

/// Decorative stroke attached to a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Block index
    pub target: usize,
    /// Decoration kind
    pub shape: StrokeShape,
    /// Stroke color, CSS syntax
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Stroke width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Symbolic shape
///
/// Circles, ellipses and rectangles use `cx`/`cy`/`rx`/`ry`; lines use
/// `x1`/`y1`/`x2`/`y2`. Whichever fields are present are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Geometry
    pub shape_type: ShapeType,
    /// Center x
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cx: Option<f64>,
    /// Center y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cy: Option<f64>,
    /// Horizontal radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    /// Vertical radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    /// Line start x
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    /// Line start y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    /// Line end x
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    /// Line end y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    /// Outline color, CSS syntax
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Outline width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// One vertex of a freehand path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Horizontal position
    pub u: f64,
    /// Vertical position
    pub v: f64,
}

/// Freehand polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    /// Line color, CSS syntax
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Line width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Vertices in drawing order
    pub points: Vec<PathPoint>,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Add a text/paragraph block
    AddBlock(Block),
    /// Connect two blocks
    AddArrow(Arrow),
    /// Decorate a block
    AddStroke(Stroke),
    /// Draw a symbolic shape
    AddShape(Shape),
    /// Draw a freehand path
    AddStrokePath(StrokePath),
}

impl Operation {
    /// Discriminator of this operation
    #[inline]
    #[must_use]
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::AddBlock(_) => OpKind::AddBlock,
            Operation::AddArrow(_) => OpKind::AddArrow,
            Operation::AddStroke(_) => OpKind::AddStroke,
            Operation::AddShape(_) => OpKind::AddShape,
            Operation::AddStrokePath(_) => OpKind::AddStrokePath,
        }
    }

    /// Every present field that is normalized to the AI Region
    ///
    /// Path points contribute their `u` and `v` in order.
    #[must_use]
    pub fn normalized_fields(&self) -> Vec<(&'static str, f64)> {
        fn present(fields: &[(&'static str, Option<f64>)]) -> Vec<(&'static str, f64)> {
            fields
                .iter()
                .filter_map(|(name, value)| value.map(|v| (*name, v)))
                .collect()
        }

        match self {
            Operation::AddBlock(block) => present(&[
                ("x", block.x),
                ("y", block.y),
                ("w", block.w),
                ("h", block.h),
            ]),
            Operation::AddShape(shape) => present(&[
                ("cx", shape.cx),
                ("cy", shape.cy),
                ("rx", shape.rx),
                ("ry", shape.ry),
                ("x1", shape.x1),
                ("y1", shape.y1),
                ("x2", shape.x2),
                ("y2", shape.y2),
            ]),
            Operation::AddStrokePath(path) => path
                .points
                .iter()
                .flat_map(|p| [("u", p.u), ("v", p.v)])
                .collect(),
            Operation::AddArrow(_) | Operation::AddStroke(_) => Vec::new(),
        }
    }
}

/// Response envelope handed to the transport layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationsResponse {
    /// Accepted operations, in input order
    pub operations: Vec<Operation>,
}

impl From<Vec<Operation>> for OperationsResponse {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn kind_round_trips_through_discriminator() {
        for kind in OpKind::ALL {
            assert_eq!(OpKind::from_discriminator(kind.as_str()), Some(kind));
        }
        assert_eq!(OpKind::from_discriminator("AddStrokePath"), Some(OpKind::AddStrokePath));
        assert_eq!(OpKind::from_discriminator("add-block"), None);
        assert_eq!(OpKind::from_discriminator("ADD_BLOCK"), None);
    }

    #[test]
    fn block_serializes_with_wire_names() {
        let op = Operation::AddBlock(Block {
            block_type: BlockType::Text,
            label: "Start".to_string(),
            x: Some(0.1),
            y: None,
            w: None,
            h: None,
            lane: Some(2),
            role: Some(BlockRole::Start),
        });

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({
                "op": "add_block",
                "blockType": "text",
                "label": "Start",
                "x": 0.1,
                "lane": 2,
                "role": "start"
            })
        );
    }

    #[test]
    fn shape_serializes_camel_case_stroke_fields() {
        let op = Operation::AddShape(Shape {
            shape_type: ShapeType::Line,
            cx: None,
            cy: None,
            rx: None,
            ry: None,
            x1: Some(0.2),
            y1: Some(0.5),
            x2: Some(0.8),
            y2: Some(0.5),
            stroke_color: Some("#e5e7eb".to_string()),
            stroke_width: Some(2.0),
        });

        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["op"], "add_shape");
        assert_eq!(value["shapeType"], "line");
        assert_eq!(value["strokeColor"], "#e5e7eb");
        assert_eq!(value["strokeWidth"], 2.0);
        assert!(value.get("cx").is_none());
    }

    #[test]
    fn response_envelope_shape() {
        let response = OperationsResponse::from(vec![Operation::AddArrow(Arrow { from: 0, to: 1 })]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"operations": [{"op": "add_arrow", "from": 0, "to": 1}]})
        );
    }

    #[test]
    fn normalized_fields_cover_path_points() {
        let op = Operation::AddStrokePath(StrokePath {
            color: None,
            width: None,
            points: vec![PathPoint { u: 0.1, v: 0.2 }, PathPoint { u: 0.3, v: 0.4 }],
        });
        assert_eq!(
            op.normalized_fields(),
            vec![("u", 0.1), ("v", 0.2), ("u", 0.3), ("v", 0.4)]
        );
        assert!(Operation::AddArrow(Arrow { from: 0, to: 0 })
            .normalized_fields()
            .is_empty());
    }

    #[test]
    fn enum_wire_matching_is_exact() {
        assert_eq!(BlockType::from_wire("text"), Some(BlockType::Text));
        assert_eq!(BlockType::from_wire("Text"), None);
        assert_eq!(BlockRole::from_wire("end"), Some(BlockRole::End));
        assert_eq!(StrokeShape::from_wire("highlight"), Some(StrokeShape::Highlight));
        assert_eq!(ShapeType::from_wire("rect"), Some(ShapeType::Rect));
        assert_eq!(ShapeType::from_wire("square"), None);
        assert_eq!(BlockType::default(), BlockType::Paragraph);
    }
}
