//! Mathematical utilities for frame analysis

use nalgebra::{DMatrix, DVector, Matrix3, Matrix6, SMatrix, Vector3, Vector6};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

/// 3x6 local-to-basic mapping
pub type Mat3x6 = SMatrix<f64, 3, 6>;

/// Condition number above which the free-DOF stiffness is reported as ill-conditioned
pub const ILL_CONDITIONED: f64 = 1e12;

/// Ratio of smallest to largest singular value treated as singular
pub const SINGULAR_RCOND: f64 = 1e-13;

/// Global-to-local rotation for a plane frame element
///
/// # Arguments
/// * `c` - Cosine of the element axis angle
/// * `s` - Sine of the element axis angle
///
/// # Returns
/// 6x6 matrix mapping [ux, uy, rz]_i, [ux, uy, rz]_j from global to local axes
pub fn frame_rotation_matrix(c: f64, s: f64) -> Mat6 {
    #[rustfmt::skip]
    let data = [
         c,   s,   0.0, 0.0, 0.0, 0.0,
        -s,   c,   0.0, 0.0, 0.0, 0.0,
         0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
         0.0, 0.0, 0.0,  c,   s,  0.0,
         0.0, 0.0, 0.0, -s,   c,  0.0,
         0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Basic stiffness of an Euler-Bernoulli frame element
///
/// # Arguments
/// * `ea` - Axial stiffness
/// * `ei` - Flexural stiffness
/// * `length` - Element length
///
/// # Returns
/// 3x3 matrix relating [axial, rotation_i, rotation_j] deformations to basic forces
pub fn basic_frame_stiffness(ea: f64, ei: f64, length: f64) -> Mat3 {
    let l = length;
    let ea_l = ea / l;
    let ei_l = ei / l;

    #[rustfmt::skip]
    let data = [
        ea_l, 0.0,          0.0,
        0.0,  4.0 * ei_l,   2.0 * ei_l,
        0.0,  2.0 * ei_l,   4.0 * ei_l,
    ];

    Mat3::from_row_slice(&data)
}

/// Extract the square submatrix `k[idx, idx]`
pub fn submatrix(k: &Mat, idx: &[usize]) -> Mat {
    let n = idx.len();
    let mut sub = Mat::zeros(n, n);
    for (i, &di) in idx.iter().enumerate() {
        for (j, &dj) in idx.iter().enumerate() {
            sub[(i, j)] = k[(di, dj)];
        }
    }
    sub
}

/// Extract the entries `v[idx]`
pub fn subvector(v: &Vec, idx: &[usize]) -> Vec {
    Vec::from_iterator(idx.len(), idx.iter().map(|&i| v[i]))
}

/// 2-norm condition number from singular values
///
/// Returns infinity when the smallest singular value vanishes.
pub fn condition_number(a: &Mat) -> f64 {
    let sv = a.clone().svd(false, false).singular_values;
    let max = sv.max();
    let min = sv.min();
    if min <= 0.0 || !min.is_finite() {
        return f64::INFINITY;
    }
    max / min
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}
