mod common;

use common::fixtures::*;
use common::pdf_assertions::{page_contains_text, pages_containing_text};
use common::{TestResult, export_pdf, init_logger};
use concentra::{Diagnostic, DocumentExporter, LineItem};

#[test]
fn test_long_quotation_overflows_onto_more_pages() -> TestResult {
    init_logger();
    let modules = vec![module_with_thumbnails("a", 12), module_with_thumbnails("b", 12)];

    let exporter = DocumentExporter::builder().build();
    let (document, pdf) = export_pdf(&exporter, &modules, &metadata("Torre Norte"))?;

    assert_pdf_min_pages!(pdf, 3);
    assert_eq!(document.pages, pdf.page_count());
    Ok(())
}

#[test]
fn test_every_page_repeats_header_and_footer() -> TestResult {
    init_logger();
    let modules = vec![module_with_thumbnails("a", 20)];

    let exporter = DocumentExporter::builder().build();
    let (_, pdf) = export_pdf(&exporter, &modules, &metadata("Torre Norte"))?;

    for page in 1..=pdf.page_count() as u32 {
        let page_label = format!("Página {page}");
        for text in [
            "CONCENTRADO",
            "Cliente: Grupo Delta",
            "Descripción",
            "Generado con Concentra",
            page_label.as_str(),
        ] {
            assert!(page_contains_text(&pdf.doc, page, text), "page {page} lacks '{text}'");
        }
    }
    Ok(())
}

#[test]
fn test_grand_total_is_on_the_last_page_or_reported() -> TestResult {
    init_logger();
    let modules = vec![module_with_thumbnails("a", 20)];

    let exporter = DocumentExporter::builder().build();
    let (document, pdf) = export_pdf(&exporter, &modules, &metadata("Torre Norte"))?;

    let total_pages = pages_containing_text(&pdf.doc, "TOTAL");
    if document.grand_total_omitted {
        assert!(total_pages.is_empty());
        assert!(document.diagnostics.contains(&Diagnostic::GrandTotalOmitted));
    } else {
        assert_eq!(total_pages, vec![pdf.page_count() as u32]);
        assert!(!document.diagnostics.contains(&Diagnostic::GrandTotalOmitted));
    }
    Ok(())
}

#[test]
fn test_item_index_runs_across_modules_and_pages() -> TestResult {
    init_logger();
    let modules = vec![module_with_thumbnails("a", 9), module_with_thumbnails("b", 9)];

    let exporter = DocumentExporter::builder().build();
    let (_, pdf) = export_pdf(&exporter, &modules, &metadata("Torre Norte"))?;

    assert_pdf_contains_text!(pdf, "(18) Tj");
    assert_pdf_not_contains_text!(pdf, "(19) Tj");
    assert_pdf_contains_text!(pdf, "Módulo 2: Sistema b");
    Ok(())
}

#[test]
fn test_long_description_is_truncated() -> TestResult {
    init_logger();
    let item = LineItem {
        description: "x".repeat(600),
        ..sold_item("a", "tablero", 1.0, 10.0)
    };
    let modules = vec![module("m1", "Obra", vec![item])];

    let exporter = DocumentExporter::builder().build();
    let (_, pdf) = export_pdf(&exporter, &modules, &metadata("Obra"))?;

    let shown = (1..=pdf.page_count() as u32)
        .map(|page| pdf.page_content(page).iter().filter(|b| **b == b'x').count())
        .sum::<usize>();
    assert!(shown <= 350, "{shown} description characters drawn");
    assert!(shown > 0);
    Ok(())
}
