//! PDF output for laid-out concentrate pages, written with lopdf.
//!
//! Text uses the standard Helvetica faces in WinAnsi encoding, so no font files are
//! embedded. Page content and images (RGB XObjects) are Flate-compressed.

mod painter;
mod renderer;
mod writer;

pub use painter::{to_win_ansi, BOLD_FONT, REGULAR_FONT};
pub use renderer::{render_pdf, DocumentInfo, RenderError, RenderedPdf, SkippedImage};
pub use writer::{deflate, StreamingPdfWriter};
