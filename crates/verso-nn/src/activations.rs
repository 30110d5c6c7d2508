//! Activation functions.

use verso_core::Matrix;

/// Elementwise hyperbolic tangent over a vector.
///
/// Uses `f32::tanh`, which saturates to ±1 for large |x|. The textbook
/// ratio `(e^x - e^-x) / (e^x + e^-x)` overflows once `e^x` leaves f32
/// range (|x| ≳ 88) and turns the recurrence into NaN, so it is not used.
pub fn tanh(x: &[f32]) -> Vec<f32> {
    x.iter().map(|v| v.tanh()).collect()
}

/// Elementwise tanh over a matrix, preserving its shape.
pub fn tanh_matrix(m: &Matrix) -> Matrix {
    let data: Vec<f32> = m.as_slice().iter().map(|v| v.tanh()).collect();
    Matrix::from_vec(m.rows(), m.cols(), data)
        .expect("tanh_matrix: mapped data has the input's length")
}
