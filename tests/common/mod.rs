#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use concentra::{DocumentExporter, ExportError, ExportedDocument, LayoutModel, Module, ProjectMetadata};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Decoded content stream of a 1-based page.
    pub fn page_content(&self, page: u32) -> Vec<u8> {
        self.doc
            .get_pages()
            .get(&page)
            .and_then(|id| self.doc.get_page_content(*id).ok())
            .unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs one export on a fresh current-thread runtime.
pub fn export_blocking(
    exporter: &DocumentExporter,
    modules: &[Module],
    layout: &LayoutModel,
    metadata: &ProjectMetadata,
) -> Result<ExportedDocument, ExportError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(exporter.export(modules, layout, metadata))
}

pub fn export_pdf(
    exporter: &DocumentExporter,
    modules: &[Module],
    metadata: &ProjectMetadata,
) -> Result<(ExportedDocument, GeneratedPdf), Box<dyn std::error::Error>> {
    let document = export_blocking(exporter, modules, &LayoutModel::default(), metadata)?;
    let pdf = GeneratedPdf::from_bytes(document.bytes.clone())?;
    Ok((document, pdf))
}
