//! Positioned output of the table flow.
//!
//! A page is a flat list of drawables in document millimeters, top-left origin.
//! The renderer does no layout of its own beyond placing each text line inside its
//! box according to the alignment given here.

use concentra_types::{Color, MediaUri, RasterImage, Rect, Size};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub rect: Rect,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn new(rect: Rect, element: LayoutElement) -> Self {
        Self { rect, element }
    }

    pub fn fill(rect: Rect, color: Color) -> Self {
        Self::new(rect, LayoutElement::Rectangle(RectElement { fill: color }))
    }

    pub fn text(rect: Rect, text: TextElement) -> Self {
        Self::new(rect, LayoutElement::Text(text))
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            LayoutElement::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Image(ImageElement),
}

impl fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.lines.join("\\n")),
            LayoutElement::Rectangle(r) => write!(f, "Rectangle({})", r.fill.to_hex()),
            LayoutElement::Image(i) => write!(f, "Image(src=\"{}\")", i.uri),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
}

/// Already-wrapped text. Each entry of `lines` is one printed line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub lines: Vec<String>,
    pub size_pt: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    pub valign: VerticalAlign,
}

impl TextElement {
    pub fn line(content: impl Into<String>, size_pt: f32) -> Self {
        Self::lines(vec![content.into()], size_pt)
    }

    pub fn lines(lines: Vec<String>, size_pt: f32) -> Self {
        Self {
            lines,
            size_pt,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            align: TextAlign::Left,
            valign: VerticalAlign::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn top(mut self) -> Self {
        self.valign = VerticalAlign::Top;
        self
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectElement {
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub uri: MediaUri,
    pub image: Arc<RasterImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// 1-based.
    pub number: usize,
    pub elements: Vec<PositionedElement>,
}

impl LaidOutPage {
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.elements.iter().filter_map(PositionedElement::as_text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.lines.iter().any(|l| l.contains(needle)))
    }
}

/// The whole document after pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub page_size: Size,
    pub pages: Vec<LaidOutPage>,
    /// Set when the grand-total block did not fit below the last row.
    pub grand_total_omitted: bool,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
