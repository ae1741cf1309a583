// crates/rh_physics/tests/reconstruction_tests.rs

//! 安全线性重构的端到端场景

mod common;

use common::*;
use glam::DVec2;
use rh_physics::prelude::*;
use rh_physics::state::{DENSITY, TRACER_OFFSET};
use rh_physics::PassStage;
use std::sync::Arc;

fn serial() -> SafeLinearConfig {
    SafeLinearConfig::default().with_parallel(false)
}

fn run(
    reconstructor: &mut SafeLinearReconstructor,
    mesh: &PolygonMesh,
    cells: &[CellState],
) -> ReconstructionResult<Vec<FaceStates>> {
    let mut faces = Vec::new();
    reconstructor.reconstruct(mesh, cells, 0.0, &mut faces)?;
    Ok(faces)
}

/// 中心单元密度 1，第一圈单元 1 密度 10，其余 1
fn dense_neighbor_cells() -> Vec<CellState> {
    let mut cells = uniform_cells(1.0, 1.0, DVec2::ZERO);
    cells[1].density = 10.0;
    cells
}

#[test]
fn test_uniform_field_gives_flat_faces() {
    let mesh = hex_patch();
    let cells = uniform_cells(1.0, 1.0, DVec2::ZERO);
    let mut rec = wall_reconstructor(serial());
    let faces = run(&mut rec, &mesh, &cells).unwrap();

    assert_eq!(faces.len(), mesh.n_edges());
    assert_eq!(rec.stage(), PassStage::Done);
    for slope in rec.slopes() {
        assert!(slope.max_abs() < 1e-12);
    }
    for face in &faces {
        assert_state_close(&face.left, &cells[0], 1e-12);
        assert_state_close(&face.right, &cells[0], 1e-12);
    }
    assert!(rec.shocked_cells().iter().all(|&s| !s));
}

#[test]
fn test_dense_neighbor_stays_within_envelope() {
    let mesh = hex_patch();
    let cells = dense_neighbor_cells();
    let mut rec = wall_reconstructor(serial());
    let faces = run(&mut rec, &mesh, &cells).unwrap();

    // 原始梯度指向高密度邻居，大小 √3 / R
    let raw = rec.unlimited_slopes()[0].field(DENSITY);
    assert!((raw.x - 3.0_f64.sqrt() / R).abs() < 1e-10);
    assert!(raw.y.abs() < 1e-10);

    // 中心单元是局部极小值，单调限制后密度平坦
    assert!(!rec.shocked_cells()[0]);
    assert!(rec.slopes()[0].field(DENSITY).length() < 1e-12);

    for &e in mesh.cell_edges(0) {
        let face = &faces[e];
        assert_eq!(mesh.edge(e).neighbors.0, 0);
        assert!(face.left.density >= 1.0 - 1e-12 && face.left.density <= 10.0 + 1e-12);
    }
    let toward = edge_index(&mesh, 0, 1);
    assert!((faces[toward].left.density - 1.0).abs() < 1e-12);
}

#[test]
fn test_monotone_envelope_on_center_cell() {
    let mesh = hex_patch();
    // 非线性场
    let cells = cells_from(|p| {
        let mut s = state(
            1.0 + 0.3 * p.x + 0.05 * p.x * p.y,
            2.0 + 0.2 * (0.7 * p.x).sin(),
            DVec2::new(0.05 * p.y, -0.02 * p.x * p.y),
        );
        s.tracers = vec![0.5 + 0.1 * p.x, 0.5 - 0.1 * p.x];
        s
    });
    let mut rec = wall_reconstructor(serial());
    let faces = run(&mut rec, &mesh, &cells).unwrap();
    assert!(!rec.shocked_cells()[0]);

    for &e in mesh.cell_edges(0) {
        let sample = &faces[e].left;
        for i in 0..sample.n_fields() {
            let values: Vec<f64> = (0..N_CELLS).map(|c| cells[c].field(i)).collect();
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let v = sample.field(i);
            assert!(v >= lo - 1e-12 && v <= hi + 1e-12, "edge {e} field {i}: {v}");
        }
    }
}

#[test]
fn test_linear_field_unlimited_at_center() {
    let mesh = hex_patch();
    let cells = cells_from(|p| state(2.0 + 0.1 * p.x - 0.05 * p.y, 1.0, DVec2::ZERO));
    let mut rec = wall_reconstructor(serial());
    run(&mut rec, &mesh, &cells).unwrap();

    let g = rec.slopes()[0].field(DENSITY);
    assert!((g.x - 0.1).abs() < 1e-12);
    assert!((g.y + 0.05).abs() < 1e-12);
    assert_eq!(rec.slopes()[0], rec.unlimited_slopes()[0]);
}

#[test]
fn test_sampling_at_cm_round_trips() {
    let mesh = hex_patch();
    let cells = dense_neighbor_cells();
    let mut rec = wall_reconstructor(serial().with_slope_limiting(false));
    run(&mut rec, &mesh, &cells).unwrap();
    for (i, cell) in cells.iter().enumerate() {
        let cm = mesh.cell_cm(i);
        assert_eq!(rec.interp(cell, &rec.slopes()[i], cm, cm), *cell);
    }
}

#[test]
fn test_limiting_disabled_uses_raw_slope() {
    let mesh = hex_patch();
    let cells = dense_neighbor_cells();
    let mut rec = wall_reconstructor(SafeLinearConfig::unlimited().with_parallel(false));
    let faces = run(&mut rec, &mesh, &cells).unwrap();

    assert_eq!(rec.slopes(), rec.unlimited_slopes());
    assert!(rec.shocked_cells().iter().all(|&s| !s));
    // 朝向高密度邻居的面值 = 1 + √3/R · (√3R/2) = 2.5
    let toward = edge_index(&mesh, 0, 1);
    assert!((faces[toward].left.density - 2.5).abs() < 1e-10);
}

#[test]
fn test_ghost_tagged_cell_is_flat() {
    let mesh = hex_patch();
    let mut cells = dense_neighbor_cells();
    cells[1].stickers[0] = true;
    cells[1].pressure = -1.0;
    let names = names();

    for config in [serial(), SafeLinearConfig::unlimited().with_parallel(false)] {
        let mut rec = SafeLinearReconstructor::new(
            config,
            names.clone(),
            Arc::new(IdealGasEos::new(5.0 / 3.0, 1e-4)),
            Arc::new(RigidWalls::new(&names)),
        )
        .unwrap();
        let faces = run(&mut rec, &mesh, &cells).unwrap();

        assert!(rec.slopes()[1].is_zero());
        assert!(rec.unlimited_slopes()[1].is_zero());
        for &e in mesh.cell_edges(1) {
            let face = &faces[e];
            let side = if mesh.edge(e).neighbors.0 == 1 {
                &face.left
            } else {
                &face.right
            };
            // 平坦重构且跳过压力下限
            assert_eq!(*side, cells[1]);
        }
    }
}

#[test]
fn test_redress_lifts_face_pressure() {
    let mesh = hex_patch();
    let cells = uniform_cells(1.0, 1.0, DVec2::ZERO);
    // 下限 ρ·R·T = 1 · 1e-4 · 1e5 = 10
    let names = names();
    let mut rec = SafeLinearReconstructor::new(
        serial(),
        names.clone(),
        Arc::new(IdealGasEos::new(5.0 / 3.0, 1e-4)),
        Arc::new(RigidWalls::new(&names)),
    )
    .unwrap();
    let faces = run(&mut rec, &mesh, &cells).unwrap();
    for face in &faces {
        assert!((face.left.pressure - 10.0).abs() < 1e-9);
        assert!((face.right.pressure - 10.0).abs() < 1e-9);
    }
    // 单元状态本身不变
    assert_eq!(cells[0].pressure, 1.0);
}

#[test]
fn test_compressive_flow_is_shocked() {
    let mesh = hex_patch();
    let cells = cells_from(|p| state(1.0, 1.0, -0.5 * p));
    let mut rec = wall_reconstructor(serial());
    let faces = run(&mut rec, &mesh, &cells).unwrap();
    assert!(rec.shocked_cells()[0]);

    // 扩散型限制器不会反转邻居差方向
    for &e in mesh.cell_edges(0) {
        let nbr = &cells[mesh.edge(e).other(0)];
        let sample = &faces[e].left;
        for i in 0..sample.n_fields() {
            let toward = nbr.field(i) - cells[0].field(i);
            let reconstructed = sample.field(i) - cells[0].field(i);
            assert!(toward * reconstructed >= -1e-15, "edge {e} field {i}");
        }
    }
}

#[test]
fn test_pressure_jump_is_shocked() {
    let mesh = hex_patch();
    let mut cells = uniform_cells(1.0, 1.0, DVec2::ZERO);
    cells[3].pressure = 0.5;
    let mut rec = wall_reconstructor(serial());
    run(&mut rec, &mesh, &cells).unwrap();
    assert!(rec.shocked_cells()[0]);
    assert!(rec.shocked_cells()[3]);
    assert!(!rec.shocked_cells()[5]);
}

#[test]
fn test_flat_tracers_have_zero_slope() {
    let mesh = hex_patch();
    let cells = cells_from(|p| {
        let mut s = state(1.0, 1.0, DVec2::ZERO);
        s.tracers = vec![0.5 + 0.01 * p.x, 0.5 - 0.01 * p.x];
        s
    });
    for config in [serial(), SafeLinearConfig::unlimited().with_parallel(false)] {
        let mut rec = wall_reconstructor(config.with_flat_tracers(["Ni56"]));
        run(&mut rec, &mesh, &cells).unwrap();
        let limited = &rec.slopes()[0];
        let raw = &rec.unlimited_slopes()[0];
        assert_eq!(limited.field(TRACER_OFFSET + 1), DVec2::ZERO);
        assert!((raw.x.tracers[1] + 0.01).abs() < 1e-12);
        assert!((limited.x.tracers[0] - 0.01).abs() < 1e-12);
    }
}

#[test]
fn test_rigid_walls_reflect_boundary_faces() {
    let mesh = hex_patch();
    let cells = uniform_cells(1.0, 1.0, DVec2::new(1.0, 0.0));
    let mut rec = wall_reconstructor(serial().with_slope_limiting(false));
    let faces = run(&mut rec, &mesh, &cells).unwrap();
    // 单元 1 在 +x 方向，其外侧角点幽灵为 7
    let e = edge_index(&mesh, 1, 7);
    assert!((faces[e].right.velocity - DVec2::new(-1.0, 0.0)).length() < 1e-12);
    assert_eq!(faces[e].right.density, 1.0);
}

#[test]
fn test_outflow_ghost_side_is_interior_average() {
    let mesh = hex_patch();
    let cells = cells_from(|p| state(2.0 + 0.1 * p.x, 1.0, DVec2::new(0.4, -0.2)));
    let mut rec = reconstructor(
        serial().with_slope_limiting(false),
        Arc::new(OutflowGhosts),
    );
    let faces = run(&mut rec, &mesh, &cells).unwrap();

    // 单元 1 中心在 (√3R, 0)，外侧角点幽灵 7
    let e = edge_index(&mesh, 1, 7);
    let d = spacing();
    let ghost_side = &faces[e].right;
    assert!((ghost_side.density - (2.0 + 0.1 * d)).abs() < 1e-12);
    assert!((ghost_side.velocity - DVec2::new(0.4, -0.2)).length() < 1e-12);
    assert_eq!(ghost_side.tracers, vec![0.3, 0.7]);

    // 内部侧仍按单元 1 的 +x 方向斜率外推
    assert!(rec.slopes()[1].x.density > 0.0);
    assert!(faces[e].left.density > ghost_side.density);
}

#[test]
fn test_too_many_neighbors() {
    let cell = vec![CellState::new(1.0, 1.0, DVec2::ZERO, vec![0.3, 0.7], vec![false])];
    let names = names();

    let ok_mesh = polygon_cell(20);
    let mut rec = wall_reconstructor(serial());
    assert!(run(&mut rec, &ok_mesh, &cell).is_ok());

    let bad_mesh = polygon_cell(21);
    let mut rec = reconstructor(serial(), Arc::new(RigidWalls::new(&names)));
    let err = run(&mut rec, &bad_mesh, &cell).unwrap_err();
    assert!(matches!(
        err,
        ReconstructionError::TooManyNeighbors { n_edges: 21, .. }
    ));
    assert_eq!(rec.stage(), PassStage::Idle);
}

#[test]
fn test_singular_gradient_matrix() {
    // 邻居质心与单元质心重合，M = [[0, 0], [0, V]]
    let mesh = PolygonMesh::builder()
        .cell(DVec2::ZERO, DVec2::ZERO, 1.0)
        .ghost(DVec2::new(1.0, 0.0), DVec2::ZERO, 0)
        .edge(0, 1, DVec2::new(1.0, -0.5), DVec2::new(1.0, 0.5))
        .build()
        .unwrap();
    let cell = vec![state(1.0, 1.0, DVec2::ZERO)];
    let mut rec = reconstructor(serial(), Arc::new(OutflowGhosts));
    let err = run(&mut rec, &mesh, &cell).unwrap_err();
    match err {
        ReconstructionError::SingularGradientMatrix { x, y, volume, .. } => {
            assert_eq!((x, y, volume), (0.0, 0.0, 1.0));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_layout_mismatch() {
    let mesh = hex_patch();
    let mut cells = uniform_cells(1.0, 1.0, DVec2::ZERO);
    cells[4].tracers.pop();
    let mut rec = wall_reconstructor(serial());
    let err = run(&mut rec, &mesh, &cells).unwrap_err();
    assert!(matches!(
        err,
        ReconstructionError::LayoutMismatch { cell: 4, expected: 2, actual: 1 }
    ));
}

#[test]
fn test_unknown_flat_tracer() {
    let names = names();
    let result = SafeLinearReconstructor::new(
        SafeLinearConfig::default().with_flat_tracers(["U235"]),
        names.clone(),
        Arc::new(IdealGasEos::monatomic()),
        Arc::new(RigidWalls::new(&names)),
    );
    assert!(matches!(
        result,
        Err(ReconstructionError::UnknownTracer { ref name }) if name == "U235"
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let names = names();
    let result = SafeLinearReconstructor::new(
        SafeLinearConfig::default().with_diffusion_coefficient(-0.5),
        names.clone(),
        Arc::new(IdealGasEos::monatomic()),
        Arc::new(OutflowGhosts),
    );
    assert!(matches!(result, Err(ReconstructionError::Foundation(_))));
}

#[test]
fn test_parallel_matches_serial() {
    let mesh = hex_patch();
    let cells = cells_from(|p| {
        state(
            1.0 + 0.2 * p.x * p.y,
            1.0 + 0.1 * p.length(),
            DVec2::new(0.1 * p.y, -0.3 * p.x),
        )
    });
    let mut serial_rec = wall_reconstructor(serial());
    let mut parallel_rec =
        wall_reconstructor(SafeLinearConfig::default().with_parallel_threshold(1));
    let a = run(&mut serial_rec, &mesh, &cells).unwrap();
    let b = run(&mut parallel_rec, &mesh, &cells).unwrap();
    assert_eq!(a, b);
    assert_eq!(serial_rec.slopes(), parallel_rec.slopes());
}

#[test]
fn test_buffers_reused_across_passes() {
    let mesh = hex_patch();
    let mut rec = wall_reconstructor(serial());
    let mut faces = Vec::new();
    rec.reconstruct(&mesh, &dense_neighbor_cells(), 0.0, &mut faces)
        .unwrap();
    rec.reconstruct(&mesh, &uniform_cells(1.0, 1.0, DVec2::ZERO), 0.1, &mut faces)
        .unwrap();
    assert_eq!(faces.len(), mesh.n_edges());
    assert_eq!(rec.slopes().len(), N_CELLS);
    assert!(rec.unlimited_slopes()[0].max_abs() < 1e-12);
}
