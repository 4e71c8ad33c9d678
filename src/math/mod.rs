//! Linear algebra helpers for the nodal solvers

use nalgebra::{DMatrix, DVector, Matrix6, Vector6};

use crate::error::{StaticsError, StaticsResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec6 = Vector6<f64>;

/// Local stiffness matrix of a 2D frame member
///
/// DOF order is `[u_i, v_i, θ_i, u_j, v_j, θ_j]` in member axes.
pub fn frame_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let ea_l = e * a / l;
    let ei_l3 = e * i / (l * l * l);
    let ei_l2 = e * i / (l * l);
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        ea_l,   0.0,           0.0,          -ea_l,  0.0,           0.0,
        0.0,    12.0*ei_l3,    6.0*ei_l2,    0.0,    -12.0*ei_l3,   6.0*ei_l2,
        0.0,    6.0*ei_l2,     4.0*ei_l,     0.0,    -6.0*ei_l2,    2.0*ei_l,
        -ea_l,  0.0,           0.0,          ea_l,   0.0,           0.0,
        0.0,    -12.0*ei_l3,   -6.0*ei_l2,   0.0,    12.0*ei_l3,    -6.0*ei_l2,
        0.0,    6.0*ei_l2,     2.0*ei_l,     0.0,    -6.0*ei_l2,    4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Rotation from global to member axes for direction cosines `(c, s)`
pub fn frame_transformation_matrix(c: f64, s: f64) -> Mat6 {
    #[rustfmt::skip]
    let data = [
        c,    s,    0.0,  0.0,  0.0,  0.0,
        -s,   c,    0.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  1.0,  0.0,  0.0,  0.0,
        0.0,  0.0,  0.0,  c,    s,    0.0,
        0.0,  0.0,  0.0,  -s,   c,    0.0,
        0.0,  0.0,  0.0,  0.0,  0.0,  1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Member stiffness in global axes, `Tᵀ k T`
pub fn frame_global_stiffness(k_local: &Mat6, t: &Mat6) -> Mat6 {
    t.transpose() * k_local * t
}

/// Add the four 3x3 blocks of a member matrix into the structure matrix
///
/// `start` and `end` are node indices; their DOFs begin at `3 * index`.
pub fn scatter_member(global: &mut Mat, member: &Mat6, start: usize, end: usize) {
    let offsets = [3 * start, 3 * end];
    for (block_row, &row_offset) in offsets.iter().enumerate() {
        for (block_col, &col_offset) in offsets.iter().enumerate() {
            for r in 0..3 {
                for c in 0..3 {
                    global[(row_offset + r, col_offset + c)] +=
                        member[(3 * block_row + r, 3 * block_col + c)];
                }
            }
        }
    }
}

/// Ratio of the smallest to the largest singular value
///
/// Zero for an all-zero matrix, so it always reads as singular.
pub fn condition_ratio(a: &Mat) -> f64 {
    let sv = a.clone().singular_values();
    let max = sv.max();
    if max <= 0.0 {
        return 0.0;
    }
    sv.min() / max
}

/// Row then column scaling so every row and column peaks at 1 in magnitude
///
/// Removes the unit mismatch between translational and rotational DOFs.
/// Returns `None` when a row or column is entirely zero.
pub fn equilibrate(a: &Mat) -> Option<Mat> {
    let mut scaled = a.clone();
    for mut row in scaled.row_iter_mut() {
        let peak = row.amax();
        if peak <= 0.0 {
            return None;
        }
        row /= peak;
    }
    for mut col in scaled.column_iter_mut() {
        let peak = col.amax();
        if peak <= 0.0 {
            return None;
        }
        col /= peak;
    }
    Some(scaled)
}

/// Condition ratio of the equilibrated matrix, independent of unit choice
pub fn scaled_condition_ratio(a: &Mat) -> f64 {
    equilibrate(a).map_or(0.0, |scaled| condition_ratio(&scaled))
}

/// Solve a square linear system using LU decomposition
///
/// Systems whose scaled condition ratio falls below `tolerance` are reported
/// as singular even when the factorization would succeed numerically.
pub fn solve_linear_system(a: &Mat, b: &Vec, tolerance: f64) -> StaticsResult<Vec> {
    if !a.is_square() {
        return Err(StaticsError::invalid(format!(
            "expected a square system, got {}x{}",
            a.nrows(),
            a.ncols()
        )));
    }
    let ratio = scaled_condition_ratio(a);
    if ratio < tolerance {
        return Err(StaticsError::SingularSystem(format!(
            "condition ratio {ratio:.3e} below tolerance {tolerance:.1e}"
        )));
    }
    a.clone()
        .lu()
        .solve(b)
        .ok_or_else(|| StaticsError::SingularSystem("LU factorization failed".into()))
}

/// Minimum-norm least-squares solution through the SVD
pub fn solve_least_squares(a: &Mat, b: &Vec, eps: f64) -> StaticsResult<Vec> {
    a.clone()
        .svd(true, true)
        .solve(b, eps)
        .map_err(|e| StaticsError::SingularSystem(e.to_string()))
}
