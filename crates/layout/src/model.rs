use crate::transform::CoordinateTransform;
use crate::LayoutError;
use concentra_types::{Color, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed, positionable elements of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionId {
    Title,
    Logo,
    Client,
    Project,
    Date,
    Table,
}

impl RegionId {
    pub const ALL: [RegionId; 6] = [
        RegionId::Title,
        RegionId::Logo,
        RegionId::Client,
        RegionId::Project,
        RegionId::Date,
        RegionId::Table,
    ];

    /// The key under which the region is persisted.
    pub fn key(self) -> &'static str {
        match self {
            RegionId::Title => "title",
            RegionId::Logo => "logo",
            RegionId::Client => "client",
            RegionId::Project => "project",
            RegionId::Date => "date",
            RegionId::Table => "table",
        }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Index,
    Name,
    Description,
    Image,
    Quantity,
    Unit,
    Total,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Index,
        Column::Name,
        Column::Description,
        Column::Image,
        Column::Quantity,
        Column::Unit,
        Column::Total,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Column::Index => "index",
            Column::Name => "name",
            Column::Description => "description",
            Column::Image => "image",
            Column::Quantity => "quantity",
            Column::Unit => "unit",
            Column::Total => "total",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Fill,
    Text,
}

/// A positioned element: its print footprint plus optional typed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    #[serde(flatten)]
    pub rect: Rect,
    pub fill_color: Option<Color>,
    pub text_color: Option<Color>,
    pub font_size: Option<f32>,
    pub text: Option<String>,
    /// Width:height lock. Resizes recompute the non-driving dimension from it.
    pub aspect_ratio: Option<f32>,
}

impl Region {
    pub fn at(rect: Rect) -> Self {
        Self {
            rect,
            fill_color: None,
            text_color: None,
            font_size: None,
            text: None,
            aspect_ratio: None,
        }
    }

    /// Applies a requested footprint, honoring the aspect lock if one is declared.
    ///
    /// The dimension with the larger relative change drives; width wins ties.
    fn resized(&self, requested: Rect) -> Rect {
        let Some(ratio) = self.aspect_ratio else {
            return requested;
        };
        let current = self.rect;
        let width_change = relative_change(current.width, requested.width);
        let height_change = relative_change(current.height, requested.height);

        if width_change >= height_change {
            Rect {
                height: requested.width / ratio,
                ..requested
            }
        } else {
            Rect {
                width: requested.height * ratio,
                ..requested
            }
        }
    }
}

fn relative_change(from: f32, to: f32) -> f32 {
    if from.abs() < f32::EPSILON {
        (to - from).abs()
    } else {
        ((to - from) / from).abs()
    }
}

/// One slot per [`RegionId`], so every region always exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regions {
    pub title: Region,
    pub logo: Region,
    pub client: Region,
    pub project: Region,
    pub date: Region,
    pub table: Region,
}

impl Regions {
    pub fn get(&self, id: RegionId) -> &Region {
        match id {
            RegionId::Title => &self.title,
            RegionId::Logo => &self.logo,
            RegionId::Client => &self.client,
            RegionId::Project => &self.project,
            RegionId::Date => &self.date,
            RegionId::Table => &self.table,
        }
    }

    pub fn get_mut(&mut self, id: RegionId) -> &mut Region {
        match id {
            RegionId::Title => &mut self.title,
            RegionId::Logo => &mut self.logo,
            RegionId::Client => &mut self.client,
            RegionId::Project => &mut self.project,
            RegionId::Date => &mut self.date,
            RegionId::Table => &mut self.table,
        }
    }
}

/// Table column widths in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnWidths {
    pub index: f32,
    pub name: f32,
    pub description: f32,
    pub image: f32,
    pub quantity: f32,
    pub unit: f32,
    pub total: f32,
}

impl ColumnWidths {
    pub fn get(&self, column: Column) -> f32 {
        match column {
            Column::Index => self.index,
            Column::Name => self.name,
            Column::Description => self.description,
            Column::Image => self.image,
            Column::Quantity => self.quantity,
            Column::Unit => self.unit,
            Column::Total => self.total,
        }
    }

    pub fn set(&mut self, column: Column, width: f32) {
        let slot = match column {
            Column::Index => &mut self.index,
            Column::Name => &mut self.name,
            Column::Description => &mut self.description,
            Column::Image => &mut self.image,
            Column::Quantity => &mut self.quantity,
            Column::Unit => &mut self.unit,
            Column::Total => &mut self.total,
        };
        *slot = width;
    }

    pub fn total_width(&self) -> f32 {
        Column::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Left edge of `column`, measured from the table's left edge.
    pub fn offset_of(&self, column: Column) -> f32 {
        Column::ALL
            .iter()
            .take_while(|c| **c != column)
            .map(|c| self.get(*c))
            .sum()
    }
}

/// The document's layout, in millimeters.
///
/// Values are never edited in place: every operation returns a new model and leaves
/// `self` untouched, so an editor can undo by dropping the newer value and
/// persistence always serializes a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutModel {
    pub regions: Regions,
    pub columns: ColumnWidths,
    pub base_font_size: f32,
    pub row_height: f32,
    pub image_size: f32,
}

impl LayoutModel {
    pub fn region(&self, id: RegionId) -> &Region {
        self.regions.get(id)
    }

    pub fn table_width(&self) -> f32 {
        self.columns.total_width()
    }

    fn with_region(
        &self,
        id: RegionId,
        edit: impl FnOnce(&mut Region) -> Result<(), LayoutError>,
    ) -> Result<LayoutModel, LayoutError> {
        let mut next = self.clone();
        edit(next.regions.get_mut(id))?;
        Ok(next)
    }

    pub fn move_region(&self, id: RegionId, to: Point) -> Result<LayoutModel, LayoutError> {
        self.with_region(id, |region| {
            let rect = region.rect.with_origin(to);
            ensure_footprint(id, rect)?;
            region.rect = rect;
            Ok(())
        })
    }

    /// Resizes a region. The table's width always follows its column sum, so a
    /// requested table width is ignored; use [`set_column_width`](Self::set_column_width).
    pub fn resize_region(&self, id: RegionId, requested: Rect) -> Result<LayoutModel, LayoutError> {
        let requested = match id {
            RegionId::Table => Rect {
                width: self.table_width(),
                ..requested
            },
            _ => requested,
        };
        self.with_region(id, |region| {
            let rect = region.resized(requested);
            ensure_footprint(id, rect)?;
            region.rect = rect;
            Ok(())
        })
    }

    /// Sets a column width. The table region's width follows the column sum.
    pub fn set_column_width(&self, column: Column, width: f32) -> Result<LayoutModel, LayoutError> {
        if !width.is_finite() || width < 0.0 {
            return Err(LayoutError::InvalidColumnWidth { column, width });
        }
        let mut next = self.clone();
        next.columns.set(column, width);
        next.regions.table.rect.width = next.columns.total_width();
        Ok(next)
    }

    pub fn set_text(&self, id: RegionId, value: impl Into<String>) -> Result<LayoutModel, LayoutError> {
        let value = value.into();
        self.with_region(id, |region| {
            region.text = Some(value);
            Ok(())
        })
    }

    pub fn set_color(&self, id: RegionId, slot: ColorSlot, color: Color) -> Result<LayoutModel, LayoutError> {
        self.with_region(id, |region| {
            match slot {
                ColorSlot::Fill => region.fill_color = Some(color),
                ColorSlot::Text => region.text_color = Some(color),
            }
            Ok(())
        })
    }

    pub fn set_font_size(&self, id: RegionId, size: f32) -> Result<LayoutModel, LayoutError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(LayoutError::InvalidFontSize(size));
        }
        self.with_region(id, |region| {
            region.font_size = Some(size);
            Ok(())
        })
    }

    /// Locks a region to `ratio` (width / height).
    ///
    /// The locked footprint is the largest box of that ratio inside the current one,
    /// centered on it. One dimension may shrink; neither ever grows.
    pub fn lock_aspect(&self, id: RegionId, ratio: f32) -> Result<LayoutModel, LayoutError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(LayoutError::InvalidAspectRatio(ratio));
        }
        self.with_region(id, |region| {
            let fitted = Size::new(ratio, 1.0).fit_within(region.rect.size());
            region.aspect_ratio = Some(ratio);
            region.rect = region.rect.center(fitted);
            Ok(())
        })
    }

    /// Moves a region to a position given in preview pixels.
    pub fn drag_region_px(
        &self,
        id: RegionId,
        to_px: Point,
        transform: &CoordinateTransform,
    ) -> Result<LayoutModel, LayoutError> {
        self.move_region(id, transform.point_to_mm(to_px))
    }

    /// Resizes a region to a footprint given in preview pixels.
    pub fn resize_region_px(
        &self,
        id: RegionId,
        requested_px: Rect,
        transform: &CoordinateTransform,
    ) -> Result<LayoutModel, LayoutError> {
        self.resize_region(id, transform.rect_to_mm(requested_px))
    }
}

fn ensure_footprint(region: RegionId, rect: Rect) -> Result<(), LayoutError> {
    if rect.is_valid_footprint() {
        Ok(())
    } else {
        Err(LayoutError::InvalidGeometry { region, rect })
    }
}
