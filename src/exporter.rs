//! Orchestrates one export: pricing checks, image loading, pagination and PDF output.

use crate::config::ExportConfig;
use crate::error::ExportError;
use concentra_layout::{LayoutModel, RegionId};
use concentra_pricing::{compute_grand_with, validate_modules, GrandTotals, PricingConfig};
use concentra_render_lopdf::{render_pdf, DocumentInfo};
use concentra_resource::{ImageLoad, ImageLoader};
use concentra_table_flow::TableFlowRenderer;
use concentra_traits::{DocumentSink, InMemoryMediaSource, MediaSource};
use concentra_types::{ImageSet, MediaUri, Module, ProjectMetadata};
use std::fmt;
use std::sync::Arc;

/// Something that degraded the output without failing the export.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    LogoUnavailable { uri: MediaUri, reason: String },
    ThumbnailUnavailable { uri: MediaUri, reason: String },
    /// Too little room was left below the last row for the grand-total block.
    GrandTotalOmitted,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LogoUnavailable { uri, reason } => {
                write!(f, "logo '{uri}' omitted: {reason}")
            }
            Diagnostic::ThumbnailUnavailable { uri, reason } => {
                write!(f, "thumbnail '{uri}' left blank: {reason}")
            }
            Diagnostic::GrandTotalOmitted => {
                write!(f, "grand total block omitted: not enough space below the last row")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// Suggested artifact name, derived from the project name.
    pub filename: String,
    pub bytes: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
    pub pages: usize,
    pub grand_total_omitted: bool,
    pub totals: GrandTotals,
}

/// `Torre Norte 2` becomes `Torre_Norte_2.pdf`.
///
/// Each whitespace run becomes one `_`, leading and trailing runs included. Path
/// separators become `_` too. A blank name falls back to `concentrado.pdf`.
pub fn suggested_filename(project_name: &str) -> String {
    if project_name.trim().is_empty() {
        return "concentrado.pdf".to_string();
    }
    let mut stem = String::with_capacity(project_name.len());
    let mut in_whitespace = false;
    for c in project_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(if matches!(c, '/' | '\\') { '_' } else { c });
            in_whitespace = false;
        }
    }
    format!("{stem}.pdf")
}

/// Builder for a [`DocumentExporter`].
pub struct ExporterBuilder {
    media: Option<Arc<dyn MediaSource>>,
    config: ExportConfig,
    pricing: PricingConfig,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self {
            media: None,
            config: ExportConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl ExporterBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Where logo and thumbnail bytes come from.
    pub fn with_media_source(self, source: impl MediaSource + 'static) -> Self {
        self.with_shared_media(Arc::new(source))
    }

    pub fn with_shared_media(mut self, source: Arc<dyn MediaSource>) -> Self {
        self.media = Some(source);
        self
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Currency and tax used for the totals reported with each export.
    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn build(self) -> DocumentExporter {
        let media = self.media.unwrap_or_else(|| {
            log::debug!("No media source configured; every image will be reported missing.");
            Arc::new(InMemoryMediaSource::new())
        });
        DocumentExporter {
            loader: ImageLoader::new(Arc::clone(&media))
                .with_timeout(self.config.image_timeout())
                .with_max_edge(self.config.max_image_edge_px),
            config: self.config,
            pricing: self.pricing,
        }
    }
}

/// Produces the concentrate PDF for a quotation.
///
/// An exporter is not re-entrant: callers must wait for one export to finish
/// before starting the next on the same exporter.
pub struct DocumentExporter {
    loader: ImageLoader,
    config: ExportConfig,
    pricing: PricingConfig,
}

impl DocumentExporter {
    pub fn builder() -> ExporterBuilder {
        ExporterBuilder::new()
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Grand totals under this exporter's currency and tax settings.
    pub fn totals(&self, modules: &[Module]) -> Result<GrandTotals, ExportError> {
        Ok(compute_grand_with(modules, &self.pricing)?)
    }

    /// Lays out and renders the document.
    ///
    /// Every image is loaded (or given up on) before pagination starts. A logo or
    /// thumbnail that cannot be loaded is left out and reported in
    /// [`ExportedDocument::diagnostics`].
    pub async fn export(
        &self,
        modules: &[Module],
        layout: &LayoutModel,
        metadata: &ProjectMetadata,
    ) -> Result<ExportedDocument, ExportError> {
        log::info!(
            "Exporting '{}' ({} modules)",
            metadata.project_name,
            modules.len()
        );

        let degenerate = validate_modules(modules);
        if !degenerate.is_empty() {
            log::warn!("{} items have degenerate pricing", degenerate.len());
        }
        let totals = self.totals(modules)?;

        let mut diagnostics = Vec::new();
        let mut images = ImageSet::new();
        let layout = self
            .load_logo(layout, metadata, &mut images, &mut diagnostics)
            .await?;
        self.load_thumbnails(modules, &mut images, &mut diagnostics)
            .await;

        let laid_out = TableFlowRenderer::new(&layout, &self.config.flow).render(
            modules,
            metadata,
            &images,
        )?;
        if laid_out.grand_total_omitted {
            diagnostics.push(Diagnostic::GrandTotalOmitted);
        }

        let info = DocumentInfo {
            title: metadata.project_name.clone(),
            author: metadata.client_name.clone(),
            producer: self.config.producer.clone(),
            creation_date: Some(chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()),
        };
        let rendered = render_pdf(&laid_out, &info)?;
        for skipped in rendered.skipped_images {
            let is_logo = metadata.logo.as_ref() == Some(&skipped.uri);
            diagnostics.push(if is_logo {
                Diagnostic::LogoUnavailable {
                    uri: skipped.uri,
                    reason: skipped.reason,
                }
            } else {
                Diagnostic::ThumbnailUnavailable {
                    uri: skipped.uri,
                    reason: skipped.reason,
                }
            });
        }
        let bytes = rendered.bytes;

        for diagnostic in &diagnostics {
            log::warn!("{diagnostic}");
        }
        log::info!(
            "Export of '{}' finished: {} pages, {} bytes",
            metadata.project_name,
            laid_out.page_count(),
            bytes.len()
        );

        Ok(ExportedDocument {
            filename: suggested_filename(&metadata.project_name),
            bytes,
            diagnostics,
            pages: laid_out.page_count(),
            grand_total_omitted: laid_out.grand_total_omitted,
            totals,
        })
    }

    /// Exports and hands the artifact to `sink` under its suggested filename.
    pub async fn export_to_sink(
        &self,
        modules: &[Module],
        layout: &LayoutModel,
        metadata: &ProjectMetadata,
        sink: &dyn DocumentSink,
    ) -> Result<ExportedDocument, ExportError> {
        let document = self.export(modules, layout, metadata).await?;
        sink.save(&document.filename, &document.bytes)?;
        Ok(document)
    }

    /// Loads the logo and returns the layout with the logo region locked to its
    /// natural ratio. Without a logo the layout is returned unchanged.
    async fn load_logo(
        &self,
        layout: &LayoutModel,
        metadata: &ProjectMetadata,
        images: &mut ImageSet,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<LayoutModel, ExportError> {
        let Some(uri) = &metadata.logo else {
            return Ok(layout.clone());
        };
        match self.loader.load(uri).await {
            ImageLoad::Loaded(image) => {
                let locked = layout.lock_aspect(RegionId::Logo, image.natural_ratio)?;
                images.insert(uri.clone(), image);
                Ok(locked)
            }
            ImageLoad::Failed { uri, reason } => {
                diagnostics.push(Diagnostic::LogoUnavailable {
                    uri,
                    reason: reason.to_string(),
                });
                Ok(layout.clone())
            }
        }
    }

    async fn load_thumbnails(
        &self,
        modules: &[Module],
        images: &mut ImageSet,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let uris = modules
            .iter()
            .flat_map(|module| module.active_items())
            .filter_map(|item| item.thumbnail());
        let resolved = self.loader.load_all(uris).await;
        images.extend(resolved.images);
        diagnostics.extend(resolved.failures.into_iter().map(|(uri, reason)| {
            Diagnostic::ThumbnailUnavailable {
                uri,
                reason: reason.to_string(),
            }
        }));
    }
}
