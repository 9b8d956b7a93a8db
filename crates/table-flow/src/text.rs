//! Text preparation and metric estimates.
//!
//! The document uses the standard Helvetica faces, so widths are estimated from an
//! average glyph width instead of shaping with real font metrics.

use concentra_types::{MM_PER_INCH, PT_PER_INCH};

/// Characters of an item description kept for display.
pub const DESCRIPTION_CHAR_LIMIT: usize = 350;

/// Average Helvetica glyph width as a fraction of the font size.
pub const AVERAGE_CHAR_WIDTH_RATIO: f32 = 0.5;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Keeps at most `limit` characters. Never splits a multi-byte character.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    pt_to_mm(text.chars().count() as f32 * size_pt * AVERAGE_CHAR_WIDTH_RATIO)
}

pub fn line_height_mm(size_pt: f32) -> f32 {
    pt_to_mm(size_pt * LINE_HEIGHT_FACTOR)
}

/// Greedy word wrap into lines no wider than `max_width_mm`.
///
/// Words longer than a full line are broken between characters. Explicit line
/// breaks are kept. Empty input yields no lines.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let char_width = pt_to_mm(size_pt * AVERAGE_CHAR_WIDTH_RATIO);
    let max_chars = if char_width > 0.0 {
        ((max_width_mm / char_width).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }
        if current_len > 0 {
            lines.push(current);
        }
    }
    lines
}

/// Height taken by `lines` lines of text at `size_pt`.
pub fn block_height_mm(lines: usize, size_pt: f32) -> f32 {
    lines as f32 * line_height_mm(size_pt)
}
