use crate::painter::{to_win_ansi, PageContext, BOLD_FONT, REGULAR_FONT};
use crate::writer::{deflate, StreamingPdfWriter};
use concentra_table_flow::{LaidOutDocument, LayoutElement};
use concentra_types::{mm_to_pt, MediaUri, RasterImage};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use thiserror::Error;

const PDF_VERSION: &str = "1.7";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error while writing the PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image '{uri}' carries {actual} bytes of pixel data, expected {expected}")]
    InvalidImage {
        uri: String,
        expected: usize,
        actual: usize,
    },
}

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub producer: String,
    /// Already in PDF date format (`D:YYYYMMDDHHmmSS`).
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Dictionary {
        let text = |s: &str| Object::String(to_win_ansi(s), StringFormat::Literal);
        let mut info = Dictionary::new();
        for (key, value) in [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Producer", &self.producer),
        ] {
            if !value.is_empty() {
                info.set(key, text(value));
            }
        }
        if let Some(date) = &self.creation_date {
            info.set("CreationDate", text(date));
        }
        info
    }
}

fn standard_fonts() -> Dictionary {
    let font = |base: &str| {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        }
    };
    dictionary! {
        REGULAR_FONT => font("Helvetica"),
        BOLD_FONT => font("Helvetica-Bold"),
    }
}

fn check_raster(uri: &MediaUri, image: &RasterImage) -> Result<(), RenderError> {
    let expected = image.width_px as usize * image.height_px as usize * 3;
    if image.rgb.len() != expected || expected == 0 {
        return Err(RenderError::InvalidImage {
            uri: uri.to_string(),
            expected,
            actual: image.rgb.len(),
        });
    }
    Ok(())
}

fn image_stream(image: &RasterImage) -> Result<Stream, RenderError> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width_px as i64,
        "Height" => image.height_px as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, deflate(&image.rgb)?))
}

/// An image left out of the PDF because its pixel data could not be embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedImage {
    pub uri: MediaUri,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// Images whose cells were left blank.
    pub skipped_images: Vec<SkippedImage>,
}

/// Writes every laid-out page into a single PDF.
///
/// Each distinct image is embedded once and shared by all pages that show it. An
/// image that cannot be embedded is skipped everywhere it appears and reported in
/// [`RenderedPdf::skipped_images`].
pub fn render_pdf(document: &LaidOutDocument, info: &DocumentInfo) -> Result<RenderedPdf, RenderError> {
    let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), PDF_VERSION, standard_fonts())?;

    let mut xobject_names: HashMap<MediaUri, String> = HashMap::new();
    let mut seen: HashSet<&MediaUri> = HashSet::new();
    let mut skipped_images = Vec::new();
    for element in document.pages.iter().flat_map(|p| &p.elements) {
        let LayoutElement::Image(image) = &element.element else {
            continue;
        };
        if !seen.insert(&image.uri) {
            continue;
        }
        if let Err(e) = check_raster(&image.uri, &image.image) {
            log::warn!("Leaving image '{}' out of the document: {e}", image.uri);
            skipped_images.push(SkippedImage {
                uri: image.uri.clone(),
                reason: e.to_string(),
            });
            continue;
        }
        let name = format!("Im{}", xobject_names.len() + 1);
        writer.add_xobject(&name, image_stream(&image.image)?);
        log::debug!("Embedded '{}' as /{name}", image.uri);
        xobject_names.insert(image.uri.clone(), name);
    }

    let width_pt = mm_to_pt(document.page_size.width);
    let height_pt = mm_to_pt(document.page_size.height);
    for page in &document.pages {
        let mut ctx = PageContext::new(document.page_size.height, &xobject_names);
        for element in &page.elements {
            ctx.draw_element(element);
        }
        let content_id = writer.buffer_content_stream(ctx.finish())?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };
        let page_id = writer.buffer_object(page_dict.into());
        writer.push_page_id(page_id);
    }

    writer.set_info(info.to_dictionary());
    let bytes = writer.finish()?.into_inner();
    log::info!(
        "Rendered {} pages ({} images) into {} bytes",
        document.pages.len(),
        xobject_names.len(),
        bytes.len()
    );
    Ok(RenderedPdf {
        bytes,
        skipped_images,
    })
}
