//! Read-only design-document tree consumed by the converter.
//!
//! A decoder for a concrete design format (PSD or similar) produces this
//! tree; the converter only ever reads it. Leaf pixel content arrives
//! pre-encoded (`PixelData::encoded`) together with the raw pixel buffer
//! used for content-addressed deduplication.

#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Bounding box of a layer, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// One node of the layer tree: a group or a leaf layer.
///
/// Child ordering reflects document stacking order, front-to-back; the
/// converter walks children in reverse so the emitted display list is
/// back-to-front.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub struct DesignNode {
    pub name: String,
    #[cfg_attr(feature = "cli", serde(default))]
    pub bounds: Bounds,
    #[cfg_attr(feature = "cli", serde(default = "full_opacity"))]
    pub opacity: u8,
    #[cfg_attr(feature = "cli", serde(default))]
    pub content: NodeContent,
}

#[cfg(feature = "cli")]
fn full_opacity() -> u8 {
    255
}

/// Content carried by a node.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub enum NodeContent {
    /// A group layer with ordered children.
    Group(Vec<DesignNode>),
    /// A text layer with rich-text run data.
    Text(TextData),
    /// A raster layer with pixel content.
    Pixels(PixelData),
    /// A leaf with nothing to render.
    #[default]
    Empty,
}

/// Rich-text descriptor of a text layer.
///
/// Only the first run is consulted for font, size, color, and alignment;
/// multi-style runs within one layer are a known limitation of the format
/// conversion and are not merged.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub struct TextData {
    /// Literal text of the whole layer.
    pub value: String,
    /// Style runs in document order.
    pub runs: Vec<TextRun>,
}

/// One style run of a text layer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub struct TextRun {
    pub font: String,
    pub size_pt: u32,
    /// RGBA, 0-255 per channel.
    pub color: [u8; 4],
    #[cfg_attr(feature = "cli", serde(default))]
    pub align: TextAlign,
}

/// Horizontal alignment of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Pixel content of a raster layer.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(Serialize, Deserialize))]
pub struct PixelData {
    /// Raw decoded pixel buffer (RGBA). This is what gets hashed for
    /// deduplication, so re-encoding artifacts cannot split identical art.
    pub rgba: Vec<u8>,
    /// Encoded image bytes (PNG) produced by the decoder.
    pub encoded: Vec<u8>,
}

impl DesignNode {
    /// Create a group node.
    pub fn group(name: impl Into<String>, bounds: Bounds, children: Vec<DesignNode>) -> Self {
        Self {
            name: name.into(),
            bounds,
            opacity: 255,
            content: NodeContent::Group(children),
        }
    }

    /// Create a raster leaf.
    pub fn image(name: impl Into<String>, bounds: Bounds, pixels: PixelData) -> Self {
        Self {
            name: name.into(),
            bounds,
            opacity: 255,
            content: NodeContent::Pixels(pixels),
        }
    }

    /// Create a text leaf.
    pub fn text(name: impl Into<String>, bounds: Bounds, text: TextData) -> Self {
        Self {
            name: name.into(),
            bounds,
            opacity: 255,
            content: NodeContent::Text(text),
        }
    }

    /// Create an empty leaf (adjustment layers, masks, etc.).
    pub fn empty(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
            opacity: 255,
            content: NodeContent::Empty,
        }
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.content, NodeContent::Group(_))
    }

    /// True when the node carries nothing renderable: an empty leaf, or a
    /// raster leaf whose pixel buffer is empty.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            NodeContent::Empty => true,
            NodeContent::Pixels(px) => px.rgba.is_empty(),
            _ => false,
        }
    }

    /// Children in document stacking order; empty slice for leaves.
    pub fn children(&self) -> &[DesignNode] {
        match &self.content {
            NodeContent::Group(children) => children,
            _ => &[],
        }
    }

    pub fn text_data(&self) -> Option<&TextData> {
        match &self.content {
            NodeContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn pixels(&self) -> Option<&PixelData> {
        match &self.content {
            NodeContent::Pixels(px) => Some(px),
            _ => None,
        }
    }

    /// All nodes below this one (excluding it), pre-order.
    pub fn descendants(&self) -> Vec<&DesignNode> {
        let mut out = Vec::new();
        fn visit<'a>(node: &'a DesignNode, out: &mut Vec<&'a DesignNode>) {
            for child in node.children() {
                out.push(child);
                visit(child, out);
            }
        }
        visit(self, &mut out);
        out
    }
}

impl TextData {
    pub fn first_run(&self) -> Option<&TextRun> {
        self.runs.first()
    }
}
