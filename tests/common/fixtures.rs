use concentra::{LineItem, MediaRef, Module, ProjectMetadata};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// A solid-color PNG of the given pixel size.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encoding an in-memory PNG cannot fail");
    bytes.into_inner()
}

pub fn metadata(project: &str) -> ProjectMetadata {
    ProjectMetadata {
        project_name: project.to_string(),
        client_name: "Grupo Delta".to_string(),
        date: "16/10/2026".to_string(),
        logo: None,
    }
}

/// An item priced directly by its sell price.
pub fn sold_item(id: &str, name: &str, quantity: f64, sell_usd: f64) -> LineItem {
    LineItem {
        name: name.to_string(),
        description: format!("Suministro e instalación de {name}"),
        quantity,
        sell_usd: Some(sell_usd),
        ..LineItem::new(id, 1)
    }
}

/// An item priced from cost and margin.
pub fn margin_item(id: &str, quantity: f64, cost_usd: f64, margin_pct: f64) -> LineItem {
    LineItem {
        name: format!("partida {id}"),
        quantity,
        cost_usd,
        margin_pct,
        ..LineItem::new(id, 1)
    }
}

pub fn module(id: &str, title: &str, items: Vec<LineItem>) -> Module {
    Module {
        items,
        ..Module::new(id, title)
    }
}

/// One module with `count` direct-priced items, each with a still-image thumbnail.
pub fn module_with_thumbnails(id: &str, count: usize) -> Module {
    let items = (0..count)
        .map(|n| LineItem {
            media: Some(MediaRef::image(format!("thumbs/{id}-{n}.png"))),
            ..sold_item(&format!("{id}-{n}"), &format!("equipo {n}"), 1.0, 100.0)
        })
        .collect();
    module(id, &format!("Sistema {id}"), items)
}
