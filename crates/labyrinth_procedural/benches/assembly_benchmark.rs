//! Benchmark for maze assembly.
//!
//! TARGET: a default-length maze in well under a millisecond
//!
//! Run with: cargo bench --package labyrinth_procedural --bench assembly_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use labyrinth_procedural::{
    ConnectorKind, MazeAssembler, MazeSeed, MazeSettings, SectionCatalog, SectionGeometry,
    SectionType,
};
use labyrinth_shared::Vec3;

fn straight(name: &str, length: f32) -> SectionGeometry {
    SectionGeometry::new(name)
        .with_connector(
            ConnectorKind::Entry,
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
        .with_connector(
            ConnectorKind::Exit,
            Vec3::new(-1.0, 0.0, length),
            Vec3::new(1.0, 0.0, length),
        )
}

fn catalog() -> SectionCatalog {
    let turn = straight("turn", 0.0).with_connector(
        ConnectorKind::Exit,
        Vec3::new(1.0, 0.0, 2.0),
        Vec3::new(1.0, 0.0, 0.0),
    );
    let tee = straight("tee", 4.0).with_connector(
        ConnectorKind::Branch,
        Vec3::new(1.0, 0.0, 3.0),
        Vec3::new(1.0, 0.0, 1.0),
    );
    SectionCatalog::new()
        .with_start(SectionType::unlimited(straight("start", 6.0)))
        .with_end(SectionType::unlimited(straight("end", 2.0)))
        .with_dead_end(SectionType::unlimited(straight("alcove", 2.0)))
        .with_hallway(SectionType::unlimited(straight("short", 4.0)))
        .with_hallway(SectionType::unlimited(straight("long", 8.0)))
        .with_hallway(SectionType::unlimited(turn))
        .with_junction(SectionType::unlimited(tee))
}

fn benchmark_default_maze(c: &mut Criterion) {
    let mut assembler = MazeAssembler::new(catalog(), MazeSettings::default(), MazeSeed::new(42));

    c.bench_function("assemble_default_maze", |b| {
        b.iter(|| black_box(assembler.assemble().sections().len()));
    });
}

fn benchmark_long_maze(c: &mut Criterion) {
    let settings = MazeSettings {
        number_of_tjunctions: 50,
        maze_length: 1_000,
    };
    let mut assembler = MazeAssembler::new(catalog(), settings, MazeSeed::new(42));

    let mut group = c.benchmark_group("long_maze");
    group.throughput(Throughput::Elements(u64::from(settings.maze_length)));
    group.sample_size(20);

    group.bench_function("assemble_1000_sections", |b| {
        b.iter(|| black_box(assembler.assemble().sections().len()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_default_maze, benchmark_long_maze);
criterion_main!(benches);
