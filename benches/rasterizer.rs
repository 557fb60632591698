use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastkit::clipper::{CohenSutherland, CyrusBeck, LiangBarsky, LineClipper};
use rastkit::geometry::{Polygon, Rect, Segment};
use rastkit::mesh::Mesh;
use rastkit::render::{draw_line, Surface};
use rastkit::transform::Transform;
use rastkit::visibility::{Shading, ZBufferResolver};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn benchmark_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_line");

    for (name, segment) in [
        ("short", Segment::from_coords(100, 100, 120, 110)),
        ("shallow", Segment::from_coords(10, 20, 790, 300)),
        ("steep", Segment::from_coords(400, 5, 300, 595)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &segment, |b, seg| {
            let mut surface = Surface::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| draw_line(&mut surface, black_box(*seg), 0xFFFF0000));
        });
    }

    group.finish();
}

fn benchmark_clippers(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip");

    let rect = Rect::new(100, 700, 100, 500);
    let square = Polygon::from(vec![(100, 100), (700, 100), (700, 500), (100, 500)]);

    // A fan of segments through the region, most crossing two sides.
    let segments: Vec<Segment> = (0..64)
        .map(|i| {
            let t = i as i32 * 13;
            Segment::from_coords(-50 + t, -20, 850 - t, 620)
        })
        .collect();

    group.bench_function("cohen_sutherland", |b| {
        b.iter(|| {
            for seg in &segments {
                let _ = CohenSutherland.clip(black_box(*seg), &rect);
            }
        });
    });

    group.bench_function("liang_barsky", |b| {
        b.iter(|| {
            for seg in &segments {
                let _ = LiangBarsky.clip(black_box(*seg), &rect);
            }
        });
    });

    group.bench_function("cyrus_beck", |b| {
        b.iter(|| {
            for seg in &segments {
                let _ = CyrusBeck.clip(black_box(*seg), &square);
            }
        });
    });

    group.finish();
}

fn benchmark_zbuffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("zbuffer");
    group.sample_size(20);

    for (name, width, height) in [("160x120", 160, 120), ("320x240", 320, 240)] {
        let mut transform = Transform::new();
        transform
            .set_scale_uniform(height as f32 / 4.0)
            .set_rotation_y(30.0)
            .set_rotation_x(20.0);
        let offset = Transform::new()
            .set_shift_xyz(width as f32 / 2.0, height as f32 / 2.0, 0.0)
            .to_matrix();
        let cube = Mesh::cube()
            .transformed(&transform)
            .map_vertices(|v| offset * v);

        group.bench_function(BenchmarkId::new("cube", name), |b| {
            let mut surface = Surface::new(width, height);
            b.iter(|| {
                ZBufferResolver::new(black_box(&cube), Shading::Flat).resolve(&mut surface)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_lines, benchmark_clippers, benchmark_zbuffer);
criterion_main!(benches);
