use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use shipwright_lib::{Catalog, ModifierChange, Mount, Shipyard};
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/catalog.json")
}

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::from_path(&fixture_path()).expect("fixture loads"));

static FRIGATE: Lazy<Shipyard> = Lazy::new(|| {
    let mut yard = Shipyard::new(CATALOG.clone());
    yard.install_defaults("frigate");
    for part in ["shield_sr25", "armor_plating", "slave_circuits", "extended_range"] {
        yard.install(part, "", false).expect("fixture part");
    }
    let launcher = yard.install("missile_launcher", "", false).expect("fixture part");
    yard.apply_change(&launcher.instance_id, ModifierChange::Mount(Mount::Quad));
    yard.apply_change(&launcher.instance_id, ModifierChange::PayloadCount(4));
    yard
});

fn benchmark_derived_totals(c: &mut Criterion) {
    let yard = &*FRIGATE;

    c.bench_function("report_frigate", |b| {
        b.iter(|| {
            let report = yard.projection().report();
            black_box(report.costs.total_cost)
        });
    });

    c.bench_function("cost_ledger_frigate", |b| {
        b.iter(|| black_box(yard.projection().cost_ledger().total_cost));
    });

    c.bench_function("capacity_budget_frigate", |b| {
        b.iter(|| black_box(yard.projection().capacity_budget().remaining));
    });

    c.bench_function("snapshot_round_trip_frigate", |b| {
        let json = yard.export_json().expect("export");
        b.iter(|| {
            let mut restored = Shipyard::new(CATALOG.clone());
            restored.import_json(&json).expect("import");
            black_box(restored.config().entries.len())
        });
    });
}

criterion_group!(benches, benchmark_derived_totals);
criterion_main!(benches);
