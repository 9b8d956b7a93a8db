//! Table flow and export benchmarks
//!
//! Measures pagination alone, PDF serialization of an already laid-out document,
//! and a full export without media.

use concentra::{DocumentExporter, LayoutModel, LineItem, Module, ProjectMetadata};
use concentra_render_lopdf::{DocumentInfo, render_pdf};
use concentra_table_flow::{FlowOptions, TableFlowRenderer};
use concentra_types::ImageSet;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn quotation(modules: usize, items_per_module: usize) -> Vec<Module> {
    (0..modules)
        .map(|m| Module {
            items: (0..items_per_module)
                .map(|n| LineItem {
                    name: format!("equipo {m}-{n}"),
                    description: "Suministro, instalación y puesta en marcha del equipo, incluye cableado y pruebas."
                        .to_string(),
                    quantity: (n % 5 + 1) as f64,
                    cost_usd: 80.0 + n as f64,
                    margin_pct: 25.0,
                    ..LineItem::new(format!("{m}-{n}"), n + 1)
                })
                .collect(),
            ..Module::new(format!("m{m}"), format!("Sistema {m}"))
        })
        .collect()
}

fn metadata() -> ProjectMetadata {
    ProjectMetadata {
        project_name: "Torre Norte".to_string(),
        client_name: "Grupo Delta".to_string(),
        date: "16/10/2026".to_string(),
        logo: None,
    }
}

fn benchmark_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_flow_paginate");
    let layout = LayoutModel::default();
    let options = FlowOptions::default();
    let images = ImageSet::new();

    for item_count in [10, 100, 1000] {
        let modules = quotation(10, item_count / 10);
        group.bench_with_input(BenchmarkId::new("items", item_count), &modules, |b, modules| {
            let renderer = TableFlowRenderer::new(&layout, &options);
            b.iter(|| {
                let laid_out = renderer.render(black_box(modules), &metadata(), &images);
                black_box(laid_out)
            });
        });
    }
    group.finish();
}

fn benchmark_pdf_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pdf");
    let layout = LayoutModel::default();
    let options = FlowOptions::default();
    let info = DocumentInfo::default();

    for item_count in [10, 100, 1000] {
        let modules = quotation(10, item_count / 10);
        let Ok(laid_out) =
            TableFlowRenderer::new(&layout, &options).render(&modules, &metadata(), &ImageSet::new())
        else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("items", item_count), &laid_out, |b, laid_out| {
            b.iter(|| black_box(render_pdf(black_box(laid_out), &info)))
        });
    }
    group.finish();
}

fn benchmark_full_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let rt = Runtime::new().unwrap();
    let exporter = DocumentExporter::builder().build();
    let layout = LayoutModel::default();

    for item_count in [10, 200] {
        let modules = quotation(4, item_count / 4);
        group.bench_with_input(BenchmarkId::new("items", item_count), &modules, |b, modules| {
            b.iter(|| {
                let exported = rt.block_on(exporter.export(modules, &layout, &metadata()));
                black_box(exported)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_pagination,
    benchmark_pdf_serialization,
    benchmark_full_export
);
criterion_main!(benches);
