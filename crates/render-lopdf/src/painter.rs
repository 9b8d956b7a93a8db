//! Turns positioned elements into page content operations.
//!
//! Layout works in millimeters from the top-left corner; PDF user space is points
//! from the bottom-left. Every coordinate is converted here and nowhere else.

use concentra_table_flow::text::{line_height_mm, pt_to_mm, text_width_mm};
use concentra_table_flow::{
    FontWeight, LayoutElement, PositionedElement, TextAlign, TextElement, VerticalAlign,
};
use concentra_types::{mm_to_pt, Color, MediaUri, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::collections::HashMap;

pub const REGULAR_FONT: &str = "F1";
pub const BOLD_FONT: &str = "F2";

/// Baseline offset from the top of a line box, as a fraction of the font size.
const BASELINE_RATIO: f32 = 0.9;

pub(crate) struct PageContext<'a> {
    page_height_mm: f32,
    content: Content,
    xobject_names: &'a HashMap<MediaUri, String>,
    fill_color: Option<Color>,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(page_height_mm: f32, xobject_names: &'a HashMap<MediaUri, String>) -> Self {
        Self {
            page_height_mm,
            content: Content { operations: vec![] },
            xobject_names,
            fill_color: None,
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    pub(crate) fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Rectangle(rect) => self.draw_rect(el.rect, rect.fill),
            LayoutElement::Text(text) => self.draw_text(text, el.rect),
            LayoutElement::Image(image) => match self.xobject_names.get(&image.uri) {
                Some(name) => self.draw_image(name.clone(), el.rect),
                None => log::debug!("Image '{}' was not embedded; leaving its box blank", image.uri),
            },
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    /// PDF y of the bottom edge of a box whose top is at `top_mm` and height `height_mm`.
    fn pdf_y(&self, top_mm: f32, height_mm: f32) -> f32 {
        mm_to_pt(self.page_height_mm - top_mm - height_mm)
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.fill_color != Some(color) {
            let [r, g, b] = color.components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.fill_color = Some(color);
        }
    }

    fn draw_rect(&mut self, rect: Rect, fill: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.set_fill_color(fill);
        let y = self.pdf_y(rect.y, rect.height);
        self.push(
            "re",
            vec![
                mm_to_pt(rect.x).into(),
                y.into(),
                mm_to_pt(rect.width).into(),
                mm_to_pt(rect.height).into(),
            ],
        );
        self.push("f", vec![]);
    }

    fn draw_text(&mut self, text: &TextElement, rect: Rect) {
        let lines: Vec<&String> = text.lines.iter().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return;
        }
        let size = text.size_pt;
        let line_height = line_height_mm(size);
        let top = match text.valign {
            VerticalAlign::Top => rect.y,
            VerticalAlign::Middle => rect.y + (rect.height - line_height * lines.len() as f32) / 2.0,
        };
        let font = match text.weight {
            FontWeight::Regular => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };

        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]);
        self.set_fill_color(text.color);
        for (i, line) in lines.into_iter().enumerate() {
            let width = text_width_mm(line, size);
            let x = match text.align {
                TextAlign::Left => rect.x,
                TextAlign::Center => rect.x + (rect.width - width) / 2.0,
                TextAlign::Right => rect.right() - width,
            };
            let baseline = top + i as f32 * line_height + pt_to_mm(size * BASELINE_RATIO);
            // Tm sets an absolute position, so lines do not accumulate offsets.
            self.push(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    mm_to_pt(x).into(),
                    mm_to_pt(self.page_height_mm - baseline).into(),
                ],
            );
            self.push("Tj", vec![Object::String(to_win_ansi(line), StringFormat::Literal)]);
        }
        self.push("ET", vec![]);
    }

    fn draw_image(&mut self, name: String, rect: Rect) {
        let y = self.pdf_y(rect.y, rect.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                mm_to_pt(rect.width).into(),
                0.into(),
                0.into(),
                mm_to_pt(rect.height).into(),
                mm_to_pt(rect.x).into(),
                y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
    }
}

/// Encodes text for the standard fonts' WinAnsi encoding. Unmappable characters
/// become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '•' => 0x95,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
