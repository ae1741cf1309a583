// crates/rh_physics/tests/common/mod.rs

//! 集成测试共享夹具：两圈正六边形单元
//!
//! ```text
//! 单元 0        中心
//! 单元 1..=6    第一圈，第 k 个位于 d·n_k
//! 幽灵 7..=12   第二圈角点，位于 2d·n_k，镜像源为 1+k
//! 幽灵 13..=18  第二圈边点，位于 d·(n_k + n_{k+1})，镜像源为 1+k
//! ```
//!
//! 其中 n_k = (cos 60°k, sin 60°k)，d = √3·R 为相邻中心距离，R 为六边形边长。

#![allow(dead_code)]

use glam::DVec2;
use rh_foundation::FieldNames;
use rh_physics::prelude::*;
use std::sync::Arc;

/// 六边形边长
pub const R: f64 = 1.0;

/// 内部单元数
pub const N_CELLS: usize = 7;

/// 示踪剂
pub const TRACERS: [&str; 2] = ["He4", "Ni56"];

/// 相邻中心距离
pub fn spacing() -> f64 {
    3.0_f64.sqrt() * R
}

/// 六边形面积
pub fn hex_volume() -> f64 {
    1.5 * 3.0_f64.sqrt() * R * R
}

/// 第 k 个方向单位向量
pub fn direction(k: usize) -> DVec2 {
    let theta = std::f64::consts::FRAC_PI_3 * (k % 6) as f64;
    DVec2::new(theta.cos(), theta.sin())
}

/// 所有单元（含幽灵）的中心
pub fn centers() -> Vec<DVec2> {
    let d = spacing();
    let mut points = vec![DVec2::ZERO];
    points.extend((0..6).map(|k| d * direction(k)));
    points.extend((0..6).map(|k| 2.0 * d * direction(k)));
    points.extend((0..6).map(|k| d * (direction(k) + direction(k + 1))));
    points
}

/// 全部边的 (a, b) 对，顺序即边下标
pub fn edge_pairs() -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    pairs.extend((0..6).map(|k| (0, 1 + k)));
    pairs.extend((0..6).map(|k| (1 + k, 1 + (k + 1) % 6)));
    pairs.extend((0..6).map(|k| (1 + k, 7 + k)));
    for k in 0..6 {
        pairs.push((1 + k, 13 + k));
        pairs.push((1 + (k + 1) % 6, 13 + k));
    }
    pairs
}

/// 构建网格
pub fn hex_patch() -> PolygonMesh {
    let points = centers();
    let mut builder = PolygonMesh::builder();
    for &p in &points[..N_CELLS] {
        builder = builder.cell(p, p, hex_volume());
    }
    for k in 0..6 {
        builder = builder.ghost(points[7 + k], points[7 + k], 1 + k);
    }
    for k in 0..6 {
        builder = builder.ghost(points[13 + k], points[13 + k], 1 + k);
    }
    for (a, b) in edge_pairs() {
        let mid = 0.5 * (points[a] + points[b]);
        let u = (points[b] - points[a]).normalize();
        let half = 0.5 * R * u.perp();
        builder = builder.edge(a, b, mid - half, mid + half);
    }
    builder.build().expect("hex patch is valid")
}

/// 以原点为中心的正 n 边形单元，邻居全部为幽灵
pub fn polygon_cell(n: usize) -> PolygonMesh {
    let half_angle = std::f64::consts::PI / n as f64;
    let mut builder = PolygonMesh::builder().cell(
        DVec2::ZERO,
        DVec2::ZERO,
        n as f64 * half_angle.tan(),
    );
    for k in 0..n {
        let theta = 2.0 * half_angle * k as f64;
        let dir = DVec2::new(theta.cos(), theta.sin());
        builder = builder.ghost(2.0 * dir, 2.0 * dir, 0);
    }
    for k in 0..n {
        let theta = 2.0 * half_angle * k as f64;
        let dir = DVec2::new(theta.cos(), theta.sin());
        let half = half_angle.tan() * dir.perp();
        builder = builder.edge(0, 1 + k, dir - half, dir + half);
    }
    builder.build().expect("polygon cell is valid")
}

/// 名称注册表
pub fn names() -> Arc<FieldNames> {
    Arc::new(FieldNames::new(TRACERS, ["ghost"]).expect("unique names"))
}

/// 非幽灵单元状态
pub fn state(density: f64, pressure: f64, velocity: DVec2) -> CellState {
    CellState::new(density, pressure, velocity, vec![0.3, 0.7], vec![false])
}

/// 均匀单元数组
pub fn uniform_cells(density: f64, pressure: f64, velocity: DVec2) -> Vec<CellState> {
    vec![state(density, pressure, velocity); N_CELLS]
}

/// 由中心坐标的函数生成单元
pub fn cells_from(f: impl Fn(DVec2) -> CellState) -> Vec<CellState> {
    centers()[..N_CELLS].iter().map(|&p| f(p)).collect()
}

/// 构建重构器
pub fn reconstructor(
    config: SafeLinearConfig,
    provider: Arc<dyn GhostProvider>,
) -> SafeLinearReconstructor {
    SafeLinearReconstructor::new(config, names(), Arc::new(IdealGasEos::monatomic()), provider)
        .expect("valid reconstructor")
}

/// 固壁边界的默认重构器（串行）
pub fn wall_reconstructor(config: SafeLinearConfig) -> SafeLinearReconstructor {
    let names = names();
    reconstructor(config, Arc::new(RigidWalls::new(&names)))
}

/// 边 (a, b) 的下标
pub fn edge_index(mesh: &PolygonMesh, a: usize, b: usize) -> usize {
    mesh.edges()
        .iter()
        .position(|e| e.neighbors == (a, b) || e.neighbors == (b, a))
        .expect("edge exists")
}

/// 两状态的数值字段逐一接近
pub fn assert_state_close(actual: &CellState, expected: &CellState, tol: f64) {
    assert_eq!(actual.n_fields(), expected.n_fields());
    for i in 0..actual.n_fields() {
        let (a, e) = (actual.field(i), expected.field(i));
        assert!((a - e).abs() <= tol, "field {i}: {a} vs {e}");
    }
}
