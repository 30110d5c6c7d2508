//! Recurrent decoder — context-conditioned greedy generation.

use rand::Rng;

use verso_core::{Matrix, Result, VersoError};

use crate::activations::tanh;
use crate::embedding::EmbeddingTable;

/// One greedy decoding step.
#[derive(Debug, Clone)]
pub struct DecodedStep {
    /// Raw predicted output vector (embedding space).
    pub vector: Vec<f32>,
    /// Id of the nearest vocabulary embedding.
    pub id: usize,
    /// Euclidean distance to that embedding — the per-step loss proxy.
    pub distance: f32,
}

/// Recurrent decoder seeded by the encoder's context vector.
///
/// Step 0:
///
/// ```text
/// hidden = tanh(initial · context)
/// output = V·hidden + output_bias
/// ```
///
/// Steps i ≥ 1 feed back the previous step's raw output vector:
///
/// ```text
/// hidden = U'·hidden + W'·output_prev + C'·context + bias'
/// output = V·hidden + output_bias
/// ```
///
/// Note the asymmetry with the encoder: no nonlinearity is applied after
/// step 0, so the recurrence is purely linear from there on. With random
/// N(0, 1) weights that can diverge over long sequences; `decode` checks
/// each step for non-finite values and fails the verse rather than
/// propagating NaN.
///
/// Every output vector is immediately resolved to its nearest vocabulary
/// embedding (greedy decoding). The step count is supplied by the caller
/// from the reference target length (teacher-length decoding) — the decoder
/// does not self-terminate.
#[derive(Debug, Clone)]
pub struct Decoder {
    initial: Matrix,
    u: Matrix,
    w: Matrix,
    c: Matrix,
    bias: Vec<f32>,
    v: Matrix,
    output_bias: Vec<f32>,
}

impl Decoder {
    /// Create a decoder with N(0, 1) random parameters.
    pub fn new(embedding_dim: usize, hidden_dim: usize, rng: &mut impl Rng) -> Self {
        Self {
            initial: Matrix::randn(hidden_dim, hidden_dim, rng),
            u: Matrix::randn(hidden_dim, hidden_dim, rng),
            w: Matrix::randn(hidden_dim, embedding_dim, rng),
            c: Matrix::randn(hidden_dim, hidden_dim, rng),
            bias: Matrix::randn(hidden_dim, 1, rng).as_slice().to_vec(),
            v: Matrix::randn(embedding_dim, hidden_dim, rng),
            output_bias: Matrix::randn(embedding_dim, 1, rng).as_slice().to_vec(),
        }
    }

    /// Build from explicit parameters, validating every shape up front.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        initial: Matrix,
        u: Matrix,
        w: Matrix,
        c: Matrix,
        bias: Vec<f32>,
        v: Matrix,
        output_bias: Vec<f32>,
    ) -> Result<Self> {
        let hidden_dim = w.rows();
        let embedding_dim = w.cols();
        for (m, rows, cols) in [
            (&initial, hidden_dim, hidden_dim),
            (&u, hidden_dim, hidden_dim),
            (&c, hidden_dim, hidden_dim),
            (&v, embedding_dim, hidden_dim),
        ] {
            if m.rows() != rows || m.cols() != cols {
                return Err(VersoError::ShapeMismatch {
                    expected: vec![rows, cols],
                    got: vec![m.rows(), m.cols()],
                });
            }
        }
        if bias.len() != hidden_dim {
            return Err(VersoError::ShapeMismatch {
                expected: vec![hidden_dim],
                got: vec![bias.len()],
            });
        }
        if output_bias.len() != embedding_dim {
            return Err(VersoError::ShapeMismatch {
                expected: vec![embedding_dim],
                got: vec![output_bias.len()],
            });
        }
        Ok(Self {
            initial,
            u,
            w,
            c,
            bias,
            v,
            output_bias,
        })
    }

    /// Hidden state size.
    pub fn hidden_dim(&self) -> usize {
        self.w.rows()
    }

    /// Output vector size (embedding space).
    pub fn embedding_dim(&self) -> usize {
        self.w.cols()
    }

    /// Run exactly `steps` greedy decoding steps against `table`.
    ///
    /// `steps == 0` returns an empty sequence without touching the context.
    pub fn decode(
        &self,
        context: &[f32],
        steps: usize,
        table: &EmbeddingTable,
    ) -> Result<Vec<DecodedStep>> {
        if context.len() != self.hidden_dim() {
            return Err(VersoError::ShapeMismatch {
                expected: vec![self.hidden_dim()],
                got: vec![context.len()],
            });
        }
        if table.embedding_dim() != self.embedding_dim() {
            return Err(VersoError::ShapeMismatch {
                expected: vec![self.embedding_dim()],
                got: vec![table.embedding_dim()],
            });
        }

        let mut decoded = Vec::with_capacity(steps);
        if steps == 0 {
            return Ok(decoded);
        }

        let mut hidden = tanh(&self.initial.matvec(context)?);
        let mut prev_output = self.project(&hidden)?;
        decoded.push(self.resolve(prev_output.clone(), table)?);

        for _ in 1..steps {
            let uh = self.u.matvec(&hidden)?;
            let wy = self.w.matvec(&prev_output)?;
            let cc = self.c.matvec(context)?;
            // Linear update: the source applies tanh only at initialization.
            hidden = self
                .bias
                .iter()
                .zip(uh.iter().zip(wy.iter().zip(&cc)))
                .map(|(b, (h, (y, ctx)))| b + h + y + ctx)
                .collect();
            if !hidden.iter().all(|v| v.is_finite()) {
                return Err(VersoError::NonFinite("decoder hidden state"));
            }
            prev_output = self.project(&hidden)?;
            decoded.push(self.resolve(prev_output.clone(), table)?);
        }
        Ok(decoded)
    }

    /// `V·hidden + output_bias`.
    fn project(&self, hidden: &[f32]) -> Result<Vec<f32>> {
        let vh = self.v.matvec(hidden)?;
        let output: Vec<f32> = vh
            .iter()
            .zip(&self.output_bias)
            .map(|(a, b)| a + b)
            .collect();
        if !output.iter().all(|v| v.is_finite()) {
            return Err(VersoError::NonFinite("decoder output vector"));
        }
        Ok(output)
    }

    fn resolve(&self, vector: Vec<f32>, table: &EmbeddingTable) -> Result<DecodedStep> {
        let (id, distance) = table.nearest(&vector)?;
        Ok(DecodedStep {
            vector,
            id,
            distance,
        })
    }
}
