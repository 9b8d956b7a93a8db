//! Pagination of the row stream onto fixed landscape pages.

use crate::elements::{
    ImageElement, LaidOutDocument, LaidOutPage, LayoutElement, PositionedElement, TextAlign,
    TextElement,
};
use crate::format::{format_quantity, MoneyFormat};
use crate::pagination::check_row_fit;
use crate::rows::{build_rows, ItemRow, TableRow};
use crate::text::{block_height_mm, line_height_mm, wrap_text};
use crate::FlowError;
use concentra_layout::{Column, LayoutModel, Region, RegionId, DOCUMENT_HEIGHT_MM, DOCUMENT_WIDTH_MM};
use concentra_pricing::compute_grand;
use concentra_types::{Color, ImageSet, MediaUri, Module, ProjectMetadata, Rect, Size};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Free space below the last row required to print the grand-total block.
pub const MIN_GRAND_TOTAL_SPACE_MM: f32 = 20.0;
pub const GRAND_TOTAL_EXTRA_WIDTH_MM: f32 = 30.0;
pub const GRAND_TOTAL_HEIGHT_MM: f32 = 14.0;
const GRAND_TOTAL_GAP_MM: f32 = 4.0;

pub const HEADER_ROW_HEIGHT_MM: f32 = 8.0;
pub const BANNER_ROW_HEIGHT_MM: f32 = 8.0;
pub const SUBTOTAL_ROW_HEIGHT_MM: f32 = 8.0;
pub const CELL_PADDING_MM: f32 = 1.5;

/// Lowest point table rows may reach; the footer lives below it.
pub const CONTENT_BOTTOM_MM: f32 = DOCUMENT_HEIGHT_MM - 15.0;
const FOOTER_RIGHT_MM: f32 = DOCUMENT_WIDTH_MM - 10.0;
const FOOTER_WIDTH_MM: f32 = 120.0;
const FOOTER_FONT_SIZE: f32 = 7.0;

const BANNER_FILL: Color = Color::rgb(228, 232, 238);
const SUBTOTAL_FILL: Color = Color::rgb(243, 244, 246);
const RULE_COLOR: Color = Color::rgb(205, 209, 214);
const FOOTER_TEXT: Color = Color::rgb(110, 110, 110);
const RULE_THICKNESS_MM: f32 = 0.2;

/// Fixed strings printed by the table flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLabels {
    pub index: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: String,
    pub unit: String,
    pub total: String,
    pub module: String,
    pub subtotal: String,
    pub grand_total: String,
    pub page: String,
}

impl TableLabels {
    pub fn header(&self, column: Column) -> &str {
        match column {
            Column::Index => &self.index,
            Column::Name => &self.name,
            Column::Description => &self.description,
            Column::Image => &self.image,
            Column::Quantity => &self.quantity,
            Column::Unit => &self.unit,
            Column::Total => &self.total,
        }
    }
}

impl Default for TableLabels {
    fn default() -> Self {
        Self {
            index: "#".to_string(),
            name: "Nombre".to_string(),
            description: "Descripción".to_string(),
            image: "Imagen".to_string(),
            quantity: "Cantidad".to_string(),
            unit: "Precio unitario".to_string(),
            total: "Total".to_string(),
            module: "Módulo".to_string(),
            subtotal: "Subtotal módulo".to_string(),
            grand_total: "TOTAL".to_string(),
            page: "Página".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowOptions {
    pub money: MoneyFormat,
    pub labels: TableLabels,
    /// Printed under the page number on every page.
    pub attribution: String,
    /// Never taken below the height the block itself occupies.
    pub min_grand_total_space_mm: f32,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            money: MoneyFormat::default(),
            labels: TableLabels::default(),
            attribution: "Generado con Concentra".to_string(),
            min_grand_total_space_mm: MIN_GRAND_TOTAL_SPACE_MM,
        }
    }
}

impl FlowOptions {
    /// Space the grand-total block requires, never less than its own gap plus height.
    pub fn grand_total_space_mm(&self) -> f32 {
        self.min_grand_total_space_mm
            .max(GRAND_TOTAL_GAP_MM + GRAND_TOTAL_HEIGHT_MM)
    }
}

fn column_align(column: Column) -> TextAlign {
    match column {
        Column::Index | Column::Image | Column::Quantity => TextAlign::Center,
        Column::Name | Column::Description => TextAlign::Left,
        Column::Unit | Column::Total => TextAlign::Right,
    }
}

fn inset(rect: Rect, horizontal: f32) -> Rect {
    Rect::new(
        rect.x + horizontal,
        rect.y,
        (rect.width - 2.0 * horizontal).max(0.0),
        rect.height,
    )
}

/// A page being filled; `cursor_y` is the absolute top of the next row.
struct PageInProgress {
    number: usize,
    elements: Vec<PositionedElement>,
    cursor_y: f32,
    rows: usize,
}

/// Lays the concentrate table out onto pages.
///
/// Every page repeats the page header (title band, metadata, logo) and the table
/// header row. Rows never split across pages.
pub struct TableFlowRenderer<'a> {
    layout: &'a LayoutModel,
    options: &'a FlowOptions,
}

impl<'a> TableFlowRenderer<'a> {
    pub fn new(layout: &'a LayoutModel, options: &'a FlowOptions) -> Self {
        Self { layout, options }
    }

    pub fn render(
        &self,
        modules: &[Module],
        metadata: &ProjectMetadata,
        images: &ImageSet,
    ) -> Result<LaidOutDocument, FlowError> {
        let rows = build_rows(modules)?;
        let grand_sell = compute_grand(modules, 1.0, 0.0)?.sell_usd;
        log::debug!("Row stream has {} rows over {} modules", rows.len(), modules.len());
        Ok(self.paginate(&rows, grand_sell, metadata, images))
    }

    /// Places an already-built row stream. `grand_sell` feeds the grand-total block.
    pub fn paginate(
        &self,
        rows: &[TableRow],
        grand_sell: f64,
        metadata: &ProjectMetadata,
        images: &ImageSet,
    ) -> LaidOutDocument {
        let body = self.body_bounds();
        let mut pages = Vec::new();
        let mut page = self.start_page(1, metadata, images);

        for row in rows {
            let height = self.row_height(row);
            let fit = check_row_fit(page.cursor_y - body.y, height, body);
            if fit.should_break && page.rows > 0 {
                log::debug!(
                    "Page {} full ({:.1}mm left, row needs {height:.1}mm)",
                    page.number,
                    fit.remaining_height
                );
                let number = page.number + 1;
                pages.push(self.finish_page(page));
                page = self.start_page(number, metadata, images);
            } else if fit.should_break {
                log::warn!("Row of {height:.1}mm is taller than a page body; it will overflow");
            }
            self.place_row(&mut page, row, height, images);
        }

        let remaining = (body.bottom() - page.cursor_y).max(0.0);
        let grand_total_omitted = if remaining > self.options.grand_total_space_mm() {
            self.place_grand_total(&mut page, grand_sell);
            false
        } else {
            log::warn!(
                "Only {remaining:.1}mm left below the last row; grand total block omitted"
            );
            true
        };
        pages.push(self.finish_page(page));

        log::info!("Table flow produced {} pages", pages.len());
        LaidOutDocument {
            page_size: Size::new(DOCUMENT_WIDTH_MM, DOCUMENT_HEIGHT_MM),
            pages,
            grand_total_omitted,
        }
    }

    fn table(&self) -> &Region {
        self.layout.region(RegionId::Table)
    }

    fn font_size(&self) -> f32 {
        self.layout.base_font_size
    }

    /// Where rows go: below the table header, above the footer.
    fn body_bounds(&self) -> Rect {
        let table = self.table().rect;
        let top = table.y + HEADER_ROW_HEIGHT_MM;
        Rect::new(
            table.x,
            top,
            self.layout.table_width(),
            (CONTENT_BOTTOM_MM - top).max(0.0),
        )
    }

    fn cell_rect(&self, column: Column, y: f32, height: f32) -> Rect {
        let x = self.table().rect.x + self.layout.columns.offset_of(column);
        Rect::new(x, y, self.layout.columns.get(column), height)
    }

    fn wrapped(&self, text: &str, column: Column) -> Vec<String> {
        let width = (self.layout.columns.get(column) - 2.0 * CELL_PADDING_MM).max(0.0);
        wrap_text(text, width, self.font_size())
    }

    pub(crate) fn row_height(&self, row: &TableRow) -> f32 {
        let single_line = line_height_mm(self.font_size()) + 2.0 * CELL_PADDING_MM;
        match row {
            TableRow::Banner { .. } => BANNER_ROW_HEIGHT_MM.max(single_line),
            TableRow::Subtotal { .. } => SUBTOTAL_ROW_HEIGHT_MM.max(single_line),
            TableRow::Item(item) => {
                let name_lines = self.wrapped(&item.name, Column::Name).len();
                let description_lines = self.wrapped(&item.description, Column::Description).len();
                let text_height =
                    block_height_mm(name_lines.max(description_lines), self.font_size());
                self.layout.row_height.max(text_height + 2.0 * CELL_PADDING_MM)
            }
        }
    }

    fn start_page(
        &self,
        number: usize,
        metadata: &ProjectMetadata,
        images: &ImageSet,
    ) -> PageInProgress {
        let mut elements = Vec::new();
        self.place_title(&mut elements);
        self.place_metadata(&mut elements, metadata);
        self.place_logo(&mut elements, metadata, images);
        let cursor_y = self.place_table_header(&mut elements);
        PageInProgress {
            number,
            elements,
            cursor_y,
            rows: 0,
        }
    }

    fn place_title(&self, elements: &mut Vec<PositionedElement>) {
        let region = self.layout.region(RegionId::Title);
        if let Some(fill) = region.fill_color {
            elements.push(PositionedElement::fill(region.rect, fill));
        }
        let size = region.font_size.unwrap_or(self.font_size());
        let text_rect = inset(region.rect, CELL_PADDING_MM);
        let lines = wrap_text(region.text.as_deref().unwrap_or_default(), text_rect.width, size);
        if !lines.is_empty() {
            let text = TextElement::lines(lines, size)
                .bold()
                .colored(region.text_color.unwrap_or(Color::BLACK))
                .aligned(TextAlign::Center);
            elements.push(PositionedElement::text(text_rect, text));
        }
    }

    fn place_metadata(&self, elements: &mut Vec<PositionedElement>, metadata: &ProjectMetadata) {
        let entries = [
            (RegionId::Client, metadata.client_name.as_str()),
            (RegionId::Project, metadata.project_name.as_str()),
            (RegionId::Date, metadata.date.as_str()),
        ];
        for (id, value) in entries {
            let region = self.layout.region(id);
            if let Some(fill) = region.fill_color {
                elements.push(PositionedElement::fill(region.rect, fill));
            }
            let content = match region.text.as_deref() {
                Some(label) if !label.is_empty() => format!("{label} {value}"),
                _ => value.to_string(),
            };
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let size = region.font_size.unwrap_or(self.font_size());
            let text = TextElement::line(content, size)
                .colored(region.text_color.unwrap_or(Color::BLACK));
            elements.push(PositionedElement::text(region.rect, text));
        }
    }

    fn place_logo(
        &self,
        elements: &mut Vec<PositionedElement>,
        metadata: &ProjectMetadata,
        images: &ImageSet,
    ) {
        let Some((uri, image)) = metadata
            .logo
            .as_ref()
            .and_then(|uri| images.get(uri).map(|image| (uri, image)))
        else {
            return;
        };
        let region = self.layout.region(RegionId::Logo).rect;
        let fitted = Size::new(image.natural_ratio, 1.0).fit_within(region.size());
        elements.push(PositionedElement::new(
            region.center(fitted),
            LayoutElement::Image(ImageElement {
                uri: uri.clone(),
                image: Arc::clone(image),
            }),
        ));
    }

    /// Draws the column header row and returns the y where rows start.
    fn place_table_header(&self, elements: &mut Vec<PositionedElement>) -> f32 {
        let table = self.table();
        let y = table.rect.y;
        let row = Rect::new(table.rect.x, y, self.layout.table_width(), HEADER_ROW_HEIGHT_MM);
        elements.push(PositionedElement::fill(
            row,
            table.fill_color.unwrap_or(Color::gray(60)),
        ));
        let color = table.text_color.unwrap_or(Color::WHITE);
        for column in Column::ALL {
            let label = self.options.labels.header(column);
            if label.is_empty() {
                continue;
            }
            let cell = inset(self.cell_rect(column, y, HEADER_ROW_HEIGHT_MM), CELL_PADDING_MM);
            let text = TextElement::line(label, self.font_size())
                .bold()
                .colored(color)
                .aligned(column_align(column));
            elements.push(PositionedElement::text(cell, text));
        }
        y + HEADER_ROW_HEIGHT_MM
    }

    fn place_row(&self, page: &mut PageInProgress, row: &TableRow, height: f32, images: &ImageSet) {
        let y = page.cursor_y;
        let width = self.layout.table_width();
        let x = self.table().rect.x;
        let size = self.font_size();
        let elements = &mut page.elements;

        match row {
            TableRow::Banner {
                module_number,
                title,
            } => {
                elements.push(PositionedElement::fill(Rect::new(x, y, width, height), BANNER_FILL));
                let label = format!("{} {module_number}: {title}", self.options.labels.module);
                let text = TextElement::line(label, size).bold();
                elements.push(PositionedElement::text(
                    inset(Rect::new(x, y, width, height), CELL_PADDING_MM),
                    text,
                ));
            }
            TableRow::Item(item) => {
                self.place_item_cells(elements, item, y, height, images);
                elements.push(PositionedElement::fill(
                    Rect::new(x, y + height - RULE_THICKNESS_MM, width, RULE_THICKNESS_MM),
                    RULE_COLOR,
                ));
            }
            TableRow::Subtotal {
                module_number,
                value,
            } => {
                elements.push(PositionedElement::fill(Rect::new(x, y, width, height), SUBTOTAL_FILL));
                let total_column = self.layout.columns.get(Column::Total);
                let label_rect = Rect::new(x, y, (width - total_column).max(0.0), height);
                let label = format!("{} {module_number}", self.options.labels.subtotal);
                elements.push(PositionedElement::text(
                    inset(label_rect, CELL_PADDING_MM),
                    TextElement::line(label, size).bold().aligned(TextAlign::Right),
                ));
                elements.push(PositionedElement::text(
                    inset(self.cell_rect(Column::Total, y, height), CELL_PADDING_MM),
                    TextElement::line(self.money().format(*value), size)
                        .bold()
                        .aligned(TextAlign::Right),
                ));
            }
        }

        page.cursor_y += height;
        page.rows += 1;
    }

    fn place_item_cells(
        &self,
        elements: &mut Vec<PositionedElement>,
        item: &ItemRow,
        y: f32,
        height: f32,
        images: &ImageSet,
    ) {
        let size = self.font_size();
        let cells = [
            (Column::Index, vec![item.index.to_string()]),
            (Column::Name, self.wrapped(&item.name, Column::Name)),
            (Column::Description, self.wrapped(&item.description, Column::Description)),
            (Column::Quantity, vec![format_quantity(item.quantity)]),
            (Column::Unit, vec![self.money().format(item.unit_sell)]),
            (Column::Total, vec![self.money().format(item.line_sell)]),
        ];
        for (column, lines) in cells {
            if lines.is_empty() {
                continue;
            }
            let text = TextElement::lines(lines, size).aligned(column_align(column));
            elements.push(PositionedElement::text(
                inset(self.cell_rect(column, y, height), CELL_PADDING_MM),
                text,
            ));
        }

        if let Some(element) = item
            .thumbnail
            .as_ref()
            .and_then(|uri| self.thumbnail(uri, y, height, images))
        {
            elements.push(element);
        }
    }

    /// The thumbnail for a row, or `None` when the image was not loaded.
    fn thumbnail(
        &self,
        uri: &MediaUri,
        y: f32,
        height: f32,
        images: &ImageSet,
    ) -> Option<PositionedElement> {
        let Some(image) = images.get(uri) else {
            log::debug!("No loaded image for thumbnail '{uri}'; leaving the cell blank");
            return None;
        };
        let cell = self.cell_rect(Column::Image, y, height);
        let side = self
            .layout
            .image_size
            .min(cell.width - 2.0 * CELL_PADDING_MM)
            .min(height - 2.0 * CELL_PADDING_MM);
        if side <= 0.0 {
            return None;
        }
        let fitted = Size::new(image.natural_ratio, 1.0).fit_within(Size::new(side, side));
        Some(PositionedElement::new(
            cell.center(fitted),
            LayoutElement::Image(ImageElement {
                uri: uri.clone(),
                image: Arc::clone(image),
            }),
        ))
    }

    fn place_grand_total(&self, page: &mut PageInProgress, grand_sell: f64) {
        let columns = &self.layout.columns;
        let width = columns.get(Column::Unit) + columns.get(Column::Total) + GRAND_TOTAL_EXTRA_WIDTH_MM;
        let table = self.table();
        let right = table.rect.x + self.layout.table_width();
        let block = Rect::new(
            right - width,
            page.cursor_y + GRAND_TOTAL_GAP_MM,
            width,
            GRAND_TOTAL_HEIGHT_MM,
        );
        let color = table.text_color.unwrap_or(Color::WHITE);
        let size = self.font_size() + 2.0;

        page.elements.push(PositionedElement::fill(
            block,
            table.fill_color.unwrap_or(Color::gray(60)),
        ));
        let inner = inset(block, 2.0 * CELL_PADDING_MM);
        page.elements.push(PositionedElement::text(
            inner,
            TextElement::line(self.options.labels.grand_total.as_str(), size)
                .bold()
                .colored(color),
        ));
        page.elements.push(PositionedElement::text(
            inner,
            TextElement::line(self.money().format(grand_sell), size)
                .bold()
                .colored(color)
                .aligned(TextAlign::Right),
        ));
    }

    fn finish_page(&self, mut page: PageInProgress) -> LaidOutPage {
        let line = line_height_mm(FOOTER_FONT_SIZE);
        let x = FOOTER_RIGHT_MM - FOOTER_WIDTH_MM;
        let top = CONTENT_BOTTOM_MM + 3.0;
        let page_label = format!("{} {}", self.options.labels.page, page.number);
        page.elements.push(PositionedElement::text(
            Rect::new(x, top, FOOTER_WIDTH_MM, line),
            TextElement::line(page_label, FOOTER_FONT_SIZE)
                .colored(FOOTER_TEXT)
                .aligned(TextAlign::Right),
        ));
        if !self.options.attribution.is_empty() {
            page.elements.push(PositionedElement::text(
                Rect::new(x, top + line, FOOTER_WIDTH_MM, line),
                TextElement::line(self.options.attribution.as_str(), FOOTER_FONT_SIZE)
                    .colored(FOOTER_TEXT)
                    .aligned(TextAlign::Right),
            ));
        }
        LaidOutPage {
            number: page.number,
            elements: page.elements,
        }
    }

    fn money(&self) -> &MoneyFormat {
        &self.options.money
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concentra_types::{LineItem, MediaRef, RasterImage};
    use std::collections::HashMap;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn metadata() -> ProjectMetadata {
        ProjectMetadata {
            project_name: "Torre Norte".to_string(),
            client_name: "Grupo Delta".to_string(),
            date: "2026-10-16".to_string(),
            logo: Some(MediaUri::from("logo.png")),
        }
    }

    fn module(id: &str, items: usize) -> Module {
        let mut module = Module::new(id, format!("Módulo {id}"));
        module.items = (0..items)
            .map(|n| LineItem {
                name: format!("equipo {n}"),
                sell_usd: Some(100.0),
                quantity: 1.0,
                ..LineItem::new(format!("{id}-{n}"), n + 1)
            })
            .collect();
        module
    }

    fn raster(ratio: f32) -> Arc<RasterImage> {
        Arc::new(RasterImage {
            width_px: 2,
            height_px: 1,
            natural_ratio: ratio,
            rgb: vec![0; 6],
        })
    }

    fn images_in(page: &LaidOutPage) -> Vec<&ImageElement> {
        page.elements
            .iter()
            .filter_map(|e| match &e.element {
                LayoutElement::Image(image) => Some(image),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_page_has_header_rows_and_grand_total() {
        init_logger();
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);

        let document = renderer
            .render(&[module("a", 2)], &metadata(), &HashMap::new())
            .unwrap();

        assert_eq!(document.page_count(), 1);
        assert!(!document.grand_total_omitted);
        let page = &document.pages[0];
        assert!(page.contains_text("CONCENTRADO"));
        assert!(page.contains_text("Cliente: Grupo Delta"));
        assert!(page.contains_text("Descripción"));
        assert!(page.contains_text("Módulo 1: Módulo a"));
        assert!(page.contains_text("EQUIPO 1"));
        assert!(page.contains_text("Subtotal módulo 1"));
        assert!(page.contains_text("TOTAL"));
        assert!(page.contains_text("$200.00"));
        assert!(page.contains_text("Página 1"));
        assert!(page.contains_text("Generado con Concentra"));
    }

    #[test]
    fn test_rows_never_straddle_pages() {
        init_logger();
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);
        let modules: Vec<Module> = (0..4).map(|n| module(&n.to_string(), 5)).collect();

        let document = renderer.render(&modules, &metadata(), &HashMap::new()).unwrap();
        assert!(document.page_count() > 1);

        for page in &document.pages {
            assert!(page.contains_text("CONCENTRADO"), "page {} lacks the title", page.number);
            assert!(page.contains_text("Precio unitario"));
            assert!(page.contains_text(&format!("Página {}", page.number)));
            for element in page.elements.iter().filter(|e| e.rect.y < CONTENT_BOTTOM_MM) {
                assert!(
                    element.rect.bottom() <= CONTENT_BOTTOM_MM + 0.01,
                    "{} ends at {}",
                    element.element,
                    element.rect.bottom()
                );
            }
        }
        let item_rows: usize = document
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.lines.iter().any(|l| l.starts_with("EQUIPO")))
            .count();
        assert_eq!(item_rows, 20);
    }

    #[test]
    fn test_grand_total_omitted_when_space_is_short() {
        init_logger();
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);
        let body_top = layout.region(RegionId::Table).rect.y + HEADER_ROW_HEIGHT_MM;

        // Banner 8 + five items 125 + subtotal 8 leaves 6mm of the 147mm body.
        let rows = build_rows(&[module("a", 5)]).unwrap();
        let used: f32 = rows.iter().map(|r| renderer.row_height(r)).sum();
        assert!(CONTENT_BOTTOM_MM - body_top - used <= MIN_GRAND_TOTAL_SPACE_MM);

        let document = renderer.paginate(&rows, 500.0, &metadata(), &HashMap::new());
        assert_eq!(document.page_count(), 1);
        assert!(document.grand_total_omitted);
        assert!(!document.pages[0].contains_text("TOTAL"));
    }

    #[test]
    fn test_low_threshold_cannot_push_grand_total_into_footer() {
        init_logger();
        let layout = LayoutModel::default();
        let options = FlowOptions {
            min_grand_total_space_mm: 5.0,
            ..FlowOptions::default()
        };
        assert_eq!(options.grand_total_space_mm(), 18.0);
        let renderer = TableFlowRenderer::new(&layout, &options);

        // 6mm left after the rows: above the configured 5mm, below the block's 18mm.
        let rows = build_rows(&[module("a", 5)]).unwrap();
        let document = renderer.paginate(&rows, 500.0, &metadata(), &HashMap::new());

        assert!(document.grand_total_omitted);
        let page = &document.pages[0];
        assert!(!page.contains_text("TOTAL"));
        for element in page.elements.iter().filter(|e| e.rect.y < CONTENT_BOTTOM_MM) {
            assert!(element.rect.bottom() <= CONTENT_BOTTOM_MM + 0.01, "{}", element.element);
        }
    }

    #[test]
    fn test_grand_total_block_geometry() {
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);
        let document = renderer.paginate(&[], 0.0, &metadata(), &HashMap::new());

        let page = &document.pages[0];
        let block = page
            .elements
            .iter()
            .find(|e| e.as_text().is_some_and(|t| t.content() == "TOTAL"))
            .map(|e| e.rect)
            .unwrap();
        let table = layout.region(RegionId::Table).rect;
        let expected_width = 35.0 + 40.0 + GRAND_TOTAL_EXTRA_WIDTH_MM;
        assert!((block.right() + 2.0 * CELL_PADDING_MM - (table.x + 277.0)).abs() < 1e-3);
        assert!((block.width + 4.0 * CELL_PADDING_MM - expected_width).abs() < 1e-3);
        assert!((block.height - GRAND_TOTAL_HEIGHT_MM).abs() < 1e-3);
    }

    #[test]
    fn test_logo_and_thumbnails_only_when_loaded() {
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);
        let mut m = module("a", 2);
        m.items[0].media = Some(MediaRef::image("a.png"));
        m.items[1].media = Some(MediaRef::image("missing.png"));

        let without = renderer.render(&[m.clone()], &metadata(), &HashMap::new()).unwrap();
        assert!(images_in(&without.pages[0]).is_empty());

        let mut images = ImageSet::new();
        images.insert(MediaUri::from("a.png"), raster(2.0));
        images.insert(MediaUri::from("logo.png"), raster(1.8));
        let with = renderer.render(&[m], &metadata(), &images).unwrap();
        let placed = images_in(&with.pages[0]);
        assert_eq!(placed.len(), 2);

        let logo = with.pages[0]
            .elements
            .iter()
            .find(|e| matches!(&e.element, LayoutElement::Image(i) if i.uri.as_str() == "logo.png"))
            .unwrap();
        let region = layout.region(RegionId::Logo).rect;
        assert!(logo.rect.width <= region.width + 1e-3);
        assert!((logo.rect.width / logo.rect.height - 1.8).abs() < 1e-3);
    }

    #[test]
    fn test_long_descriptions_grow_the_row() {
        let layout = LayoutModel::default();
        let options = FlowOptions::default();
        let renderer = TableFlowRenderer::new(&layout, &options);
        let mut m = module("a", 1);
        m.items[0].description = "cable ".repeat(60);
        let rows = build_rows(&[m]).unwrap();
        assert!(renderer.row_height(&rows[1]) >= layout.row_height);

        let narrow = layout.set_column_width(Column::Description, 20.0).unwrap();
        let narrow_renderer = TableFlowRenderer::new(&narrow, &options);
        assert!(narrow_renderer.row_height(&rows[1]) > layout.row_height);
    }

    #[test]
    fn test_options_load_partially_from_json() {
        let options: FlowOptions = serde_json::from_value(serde_json::json!({
            "attribution": "Hecho por Delta",
            "labels": { "page": "Hoja" }
        }))
        .unwrap();
        assert_eq!(options.labels.page, "Hoja");
        assert_eq!(options.labels.total, "Total");
        assert_eq!(options.min_grand_total_space_mm, MIN_GRAND_TOTAL_SPACE_MM);
    }
}
