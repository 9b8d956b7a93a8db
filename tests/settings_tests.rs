mod common;

use common::fixtures::*;
use common::pdf_assertions::page_contains_text;
use common::{GeneratedPdf, TestResult, export_blocking, init_logger};
use concentra::{
    Column, CoordinateTransform, DocumentExporter, LayoutHistory, LayoutModel, RegionId,
    export_settings, load_settings,
};
use concentra_types::Point;
use serde_json::json;

#[test]
fn test_persisted_settings_survive_a_json_round_trip() -> TestResult {
    init_logger();
    let edited = LayoutModel::default()
        .set_text(RegionId::Title, "RESUMEN DE OBRA")?
        .set_column_width(Column::Description, 95.0)?
        .move_region(RegionId::Logo, Point::new(12.0, 8.0))?;

    let stored = serde_json::to_string(&export_settings(&edited)?)?;
    let restored = load_settings(&serde_json::from_str(&stored)?);
    assert_eq!(restored, edited);

    let modules = vec![module("m1", "Obra", vec![sold_item("a", "tablero", 1.0, 10.0)])];
    let exporter = DocumentExporter::builder().build();
    let document = export_blocking(&exporter, &modules, &restored, &metadata("Obra"))?;
    let pdf = GeneratedPdf::from_bytes(document.bytes)?;
    assert!(page_contains_text(&pdf.doc, 1, "RESUMEN DE OBRA"));
    assert!(!page_contains_text(&pdf.doc, 1, "CONCENTRADO"));
    Ok(())
}

#[test]
fn test_older_settings_are_completed_from_defaults() {
    init_logger();
    let persisted = json!({
        "regions": { "title": { "text": "PRESUPUESTO" } },
        "columns": { "name": 55.0 },
        "retired_field": true
    });

    let model = load_settings(&persisted);
    let defaults = LayoutModel::default();

    assert_eq!(model.region(RegionId::Title).text.as_deref(), Some("PRESUPUESTO"));
    assert_eq!(model.region(RegionId::Title).rect, defaults.region(RegionId::Title).rect);
    assert_eq!(model.columns.get(Column::Name), 55.0);
    assert_eq!(model.columns.get(Column::Total), defaults.columns.get(Column::Total));
    assert_eq!(model.region(RegionId::Logo), defaults.region(RegionId::Logo));
}

#[test]
fn test_garbage_settings_fall_back_to_defaults() {
    init_logger();
    assert_eq!(load_settings(&json!(null)), LayoutModel::default());
    assert_eq!(load_settings(&json!("not an object")), LayoutModel::default());
    assert_eq!(load_settings(&json!({ "columns": "wide" })), LayoutModel::default());
}

#[test]
fn test_preview_drag_lands_in_millimeters() -> TestResult {
    init_logger();
    let transform = CoordinateTransform::for_viewport(1000.0)?;
    assert!((transform.scale() - 3.367).abs() < 1e-3);
    assert!((transform.to_mm(transform.to_pixels(50.0)) - 50.0).abs() < 1e-3);

    let mut history = LayoutHistory::new(LayoutModel::default());
    let to = transform.point_to_pixels(Point::new(30.0, 20.0));
    history.apply(|model| model.drag_region_px(RegionId::Client, to, &transform))?;

    let moved = history.current().region(RegionId::Client).rect;
    assert!((moved.x - 30.0).abs() < 1e-3);
    assert!((moved.y - 20.0).abs() < 1e-3);

    assert!(history.undo());
    assert_eq!(history.current(), &LayoutModel::default());
    Ok(())
}
