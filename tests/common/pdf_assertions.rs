use concentra_render_lopdf::to_win_ansi;
use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// An image draw on a page, in millimeters from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacedImage {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Whether `haystack` contains `needle` as a contiguous byte run.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Whether a shown text string on `page` (1-based) contains `text`.
///
/// Text is drawn one line per `Tj`, so `text` must not span a wrapped line.
pub fn page_contains_text(doc: &LopdfDocument, page: u32, text: &str) -> bool {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return false;
    };
    let Ok(content) = doc.get_page_content(page_id) else {
        return false;
    };
    contains_bytes(&content, &to_win_ansi(text))
}

pub fn pages_containing_text(doc: &LopdfDocument, text: &str) -> Vec<u32> {
    doc.get_pages()
        .keys()
        .copied()
        .filter(|page| page_contains_text(doc, *page, text))
        .collect()
}

/// MediaBox of a page in points.
pub fn page_size_pt(doc: &LopdfDocument, page: u32) -> Option<(f32, f32)> {
    let page_id = doc.get_pages().get(&page).copied()?;
    let dict = doc.get_object(page_id).ok()?.as_dict().ok()?;
    let media_box = dict.get(b"MediaBox").ok()?.as_array().ok()?;
    let number = |i: usize| media_box.get(i).and_then(|o| o.as_float().ok());
    Some((number(2)?, number(3)?))
}

/// Every `Do` on `page`, placed by the `cm` that precedes it.
pub fn image_placements(doc: &LopdfDocument, page: u32) -> Vec<PlacedImage> {
    let Some(page_id) = doc.get_pages().get(&page).copied() else {
        return Vec::new();
    };
    let Some((_, page_height)) = page_size_pt(doc, page) else {
        return Vec::new();
    };
    let Some(content) = doc
        .get_page_content(page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
    else {
        return Vec::new();
    };

    let mut matrix: Option<Vec<f32>> = None;
    let mut placed = Vec::new();
    for operation in content.operations {
        match operation.operator.as_str() {
            "cm" => {
                matrix = operation
                    .operands
                    .iter()
                    .map(|o| o.as_float().ok())
                    .collect::<Option<Vec<_>>>();
            }
            "Do" => {
                let (Some(m), Some(name)) = (matrix.take(), operation.operands.first()) else {
                    continue;
                };
                let (Ok(name), 6) = (name.as_name(), m.len()) else {
                    continue;
                };
                let width = m[0] / PT_PER_MM;
                let height = m[3] / PT_PER_MM;
                placed.push(PlacedImage {
                    name: String::from_utf8_lossy(name).into_owned(),
                    x: m[4] / PT_PER_MM,
                    y: (page_height - m[5]) / PT_PER_MM - height,
                    width,
                    height,
                });
            }
            _ => {}
        }
    }
    placed
}

/// Number of image XObjects in the file.
pub fn image_xobject_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .is_ok_and(|name| name == b"Image")
        })
        .count()
}

/// Info dictionary string entry, e.g. `Title`.
pub fn info_string(doc: &LopdfDocument, key: &[u8]) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let dict = match info.as_reference() {
        Ok(id) => doc.get_object(id).ok()?.as_dict().ok()?,
        Err(_) => info.as_dict().ok()?,
    };
    let bytes = dict.get(key).ok()?.as_str().ok()?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}

/// Assert that some page of the PDF shows specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let pages = $crate::common::pdf_assertions::pages_containing_text(&$pdf.doc, $text);
        assert!(!pages.is_empty(), "PDF should contain '{}' on some page", $text);
    };
}

/// Assert that no page of the PDF shows specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let pages = $crate::common::pdf_assertions::pages_containing_text(&$pdf.doc, $text);
        assert!(pages.is_empty(), "PDF should not contain '{}', found on pages {:?}", $text, pages);
    };
}

/// Assert the page count of a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $expected:expr) => {
        let actual = $pdf.page_count();
        assert_eq!(actual, $expected, "Expected {} pages, got {}", $expected, actual);
    };
}

/// Assert that a PDF has at least a number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        let actual = $pdf.page_count();
        assert!(actual >= $min, "Expected at least {} pages, got {}", $min, actual);
    };
}
