//! Persisted layout settings.
//!
//! Settings are stored by the content source as an opaque JSON object keyed by
//! field name. Loading merges that object over the default model one known key at
//! a time, so settings written before a field existed still produce a complete
//! model and a malformed field only costs that field.

use crate::model::{Column, ColumnWidths, LayoutModel, Region, RegionId, Regions};
use crate::LayoutError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub fn export_settings(model: &LayoutModel) -> Result<Value, LayoutError> {
    serde_json::to_value(model).map_err(|e| LayoutError::Settings(e.to_string()))
}

/// Builds a model from persisted settings. Never fails; anything unusable falls back
/// to [`LayoutModel::default`].
pub fn load_settings(persisted: &Value) -> LayoutModel {
    let defaults = LayoutModel::default();
    let default_json = match export_settings(&defaults) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Cannot encode default layout, ignoring persisted settings: {e}");
            return defaults;
        }
    };
    let merged = merge_known_keys(&default_json, persisted);

    let region = |id: RegionId| {
        let fallback = defaults.region(id);
        let decoded: Region = decode_or(merged.pointer(&format!("/regions/{}", id.key())), fallback.clone(), id.key());
        sanitize_region(decoded, fallback)
    };

    let mut columns: ColumnWidths = defaults.columns;
    for column in Column::ALL {
        let fallback = defaults.columns.get(column);
        let width: f32 = decode_or(merged.pointer(&format!("/columns/{}", column.key())), fallback, column.key());
        columns.set(column, non_negative_or(width, fallback));
    }

    let mut model = LayoutModel {
        regions: Regions {
            title: region(RegionId::Title),
            logo: region(RegionId::Logo),
            client: region(RegionId::Client),
            project: region(RegionId::Project),
            date: region(RegionId::Date),
            table: region(RegionId::Table),
        },
        columns,
        base_font_size: positive_or(
            decode_or(merged.get("base_font_size"), defaults.base_font_size, "base_font_size"),
            defaults.base_font_size,
        ),
        row_height: positive_or(
            decode_or(merged.get("row_height"), defaults.row_height, "row_height"),
            defaults.row_height,
        ),
        image_size: positive_or(
            decode_or(merged.get("image_size"), defaults.image_size, "image_size"),
            defaults.image_size,
        ),
    };
    model.regions.table.rect.width = model.columns.total_width();
    model
}

/// Deep-merges `persisted` over `defaults`, keeping only keys `defaults` declares.
///
/// A persisted value replaces the default only when both have the same JSON kind.
/// Defaults that are `null` accept any persisted value.
pub fn merge_known_keys(defaults: &Value, persisted: &Value) -> Value {
    match (defaults, persisted) {
        (Value::Object(known), Value::Object(given)) => {
            let merged: Map<String, Value> = known
                .iter()
                .map(|(key, default)| {
                    let value = match given.get(key) {
                        Some(candidate) => merge_known_keys(default, candidate),
                        None => default.clone(),
                    };
                    (key.clone(), value)
                })
                .collect();
            Value::Object(merged)
        }
        (Value::Null, given) => given.clone(),
        (Value::Number(_), Value::Number(_))
        | (Value::String(_), Value::String(_))
        | (Value::Bool(_), Value::Bool(_))
        | (Value::Array(_), Value::Array(_)) => persisted.clone(),
        // Colors and texts persisted as explicit nulls clear the default.
        (_, Value::Null) if defaults.is_object() || defaults.is_string() => Value::Null,
        _ => defaults.clone(),
    }
}

fn decode_or<T: DeserializeOwned>(value: Option<&Value>, fallback: T, field: &str) -> T {
    match value {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            log::warn!("Persisted layout field '{field}' is unusable ({e}); using default");
            fallback
        }),
        None => fallback,
    }
}

fn non_negative_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 { value } else { fallback }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn sanitize_region(mut region: Region, fallback: &Region) -> Region {
    region.rect.x = non_negative_or(region.rect.x, fallback.rect.x);
    region.rect.y = non_negative_or(region.rect.y, fallback.rect.y);
    region.rect.width = non_negative_or(region.rect.width, fallback.rect.width);
    region.rect.height = non_negative_or(region.rect.height, fallback.rect.height);
    region.font_size = region.font_size.filter(|s| s.is_finite() && *s > 0.0).or(fallback.font_size);
    region.aspect_ratio = region
        .aspect_ratio
        .filter(|r| r.is_finite() && *r > 0.0)
        .or(fallback.aspect_ratio);
    region
}
