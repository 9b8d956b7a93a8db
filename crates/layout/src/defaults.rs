//! The default layout.
//!
//! Persisted settings written by older editors may lack fields; those fields are
//! filled from this model, so its values must stay stable.

use crate::model::{ColumnWidths, LayoutModel, Region, Regions};
use concentra_types::{Color, Rect};
use once_cell::sync::Lazy;

pub const BASE_FONT_SIZE: f32 = 9.0;
pub const BASE_ROW_HEIGHT_MM: f32 = 25.0;
pub const IMAGE_CELL_SIZE_MM: f32 = 18.0;
pub const METADATA_X_MM: f32 = 120.0;

pub const BRAND_BLUE: Color = Color::rgb(0x1f, 0x3a, 0x5c);

pub static DEFAULT_LAYOUT: Lazy<LayoutModel> = Lazy::new(|| {
    let metadata = |y: f32, label: &str| Region {
        font_size: Some(BASE_FONT_SIZE),
        text_color: Some(Color::gray(40)),
        text: Some(label.to_string()),
        ..Region::at(Rect::new(METADATA_X_MM, y, 100.0, 6.0))
    };

    let columns = ColumnWidths {
        index: 10.0,
        name: 40.0,
        description: 110.0,
        image: 22.0,
        quantity: 20.0,
        unit: 35.0,
        total: 40.0,
    };

    LayoutModel {
        regions: Regions {
            title: Region {
                fill_color: Some(BRAND_BLUE),
                text_color: Some(Color::WHITE),
                font_size: Some(14.0),
                text: Some("CONCENTRADO".to_string()),
                ..Region::at(Rect::new(10.0, 10.0, 95.0, 15.0))
            },
            logo: Region {
                aspect_ratio: Some(45.0 / 25.0),
                ..Region::at(Rect::new(242.0, 8.0, 45.0, 25.0))
            },
            client: metadata(10.0, "Cliente:"),
            project: metadata(16.0, "Proyecto:"),
            date: metadata(22.0, "Fecha:"),
            table: Region {
                fill_color: Some(BRAND_BLUE),
                text_color: Some(Color::WHITE),
                ..Region::at(Rect::new(10.0, 40.0, columns.total_width(), 0.0))
            },
        },
        columns,
        base_font_size: BASE_FONT_SIZE,
        row_height: BASE_ROW_HEIGHT_MM,
        image_size: IMAGE_CELL_SIZE_MM,
    }
});

impl Default for LayoutModel {
    fn default() -> Self {
        DEFAULT_LAYOUT.clone()
    }
}
