//! Builds a wavy height-field mesh and reports its critical points.
//!
//! Usage:
//! ```text
//! cargo run --example analyze              # 16x16 grid
//! cargo run --example analyze -- 40        # 40x40 grid
//! RUST_LOG=scalar_mesh=debug cargo run --example analyze
//! ```

use scalar_mesh::math::GeometricPoint;
use scalar_mesh::mesh::{Mesh, Triangle};

#[allow(clippy::cast_precision_loss)]
fn height_field(cells: usize) -> Mesh {
    let step = 1.0 / cells as f32;
    let at = |i: usize, j: usize| {
        let x = i as f32 * step;
        let z = j as f32 * step;
        let y = (x * std::f32::consts::TAU).sin() * (z * std::f32::consts::TAU).cos();
        GeometricPoint::new(x, y, z)
    };

    // Two triangles per cell, corners repeated per triangle as a loader would emit them.
    let mut mesh = Mesh::new();
    for i in 0..cells {
        for j in 0..cells {
            mesh.add_triangle(Triangle::new(at(i, j), at(i + 1, j), at(i, j + 1)));
            mesh.add_triangle(Triangle::new(at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)));
        }
    }
    mesh
}

fn main() {
    // Default: WARN for everything, INFO for scalar_mesh.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("scalar_mesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cells = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(16);

    let mut mesh = height_field(cells);
    mesh.analyze_vertices();
    mesh.find_critical_points();

    println!("{mesh}");
    for p in mesh.maxima() {
        println!("max {p}");
    }
    for p in mesh.minima() {
        println!("min {p}");
    }
}
