//! Recurrent encoder — folds a verse into a single context vector.

use rand::Rng;

use verso_core::{Matrix, Result, VersoError};

use crate::activations::tanh;

/// Recurrent encoder over embedded input vectors.
///
/// The hidden state starts at zero and is updated once per input vector:
///
/// ```text
/// hidden = tanh(bias + W·vec + U·hidden)
/// ```
///
/// where `W` is `hidden_dim × embedding_dim` and `U` is
/// `hidden_dim × hidden_dim`. The final hidden state is the context vector.
#[derive(Debug, Clone)]
pub struct Encoder {
    w: Matrix,
    u: Matrix,
    bias: Vec<f32>,
}

impl Encoder {
    /// Create an encoder with N(0, 1) random parameters.
    pub fn new(embedding_dim: usize, hidden_dim: usize, rng: &mut impl Rng) -> Self {
        Self {
            w: Matrix::randn(hidden_dim, embedding_dim, rng),
            u: Matrix::randn(hidden_dim, hidden_dim, rng),
            bias: Matrix::randn(hidden_dim, 1, rng).as_slice().to_vec(),
        }
    }

    /// Build from explicit parameters, validating shapes up front.
    pub fn from_parts(w: Matrix, u: Matrix, bias: Vec<f32>) -> Result<Self> {
        let hidden_dim = w.rows();
        if u.rows() != hidden_dim || u.cols() != hidden_dim {
            return Err(VersoError::ShapeMismatch {
                expected: vec![hidden_dim, hidden_dim],
                got: vec![u.rows(), u.cols()],
            });
        }
        if bias.len() != hidden_dim {
            return Err(VersoError::ShapeMismatch {
                expected: vec![hidden_dim],
                got: vec![bias.len()],
            });
        }
        Ok(Self { w, u, bias })
    }

    /// Hidden state size.
    pub fn hidden_dim(&self) -> usize {
        self.w.rows()
    }

    /// Expected input vector size.
    pub fn embedding_dim(&self) -> usize {
        self.w.cols()
    }

    /// Consume a sequence of embedded vectors and return the context vector.
    ///
    /// An empty sequence yields the zero-initialized hidden state unchanged.
    pub fn forward(&self, inputs: &[Vec<f32>]) -> Result<Vec<f32>> {
        let mut hidden = vec![0.0f32; self.hidden_dim()];
        if inputs.is_empty() {
            return Ok(hidden);
        }

        for vec in inputs {
            let wx = self.w.matvec(vec)?;
            let uh = self.u.matvec(&hidden)?;
            let pre: Vec<f32> = self
                .bias
                .iter()
                .zip(wx.iter().zip(&uh))
                .map(|(b, (x, h))| b + x + h)
                .collect();
            hidden = tanh(&pre);
        }
        Ok(hidden)
    }
}
