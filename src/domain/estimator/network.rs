//! Fixed feed-forward network with dropout kept available at inference.
//!
//! Shape is 4 → H → H → 4: linear, relu, dropout, linear, relu, dropout,
//! linear, sigmoid. Weights are row-major `[out][in]` and never mutated
//! after construction.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Probability that a hidden unit is dropped on a noisy pass.
pub const DROPOUT_RATE: f64 = 0.25;

/// Input and output width.
pub const TRAIT_DIMS: usize = 4;

/// Serialized weights artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkWeights {
    pub l1_weight: Vec<Vec<f64>>,
    pub l1_bias: Vec<f64>,
    pub l2_weight: Vec<Vec<f64>>,
    pub l2_bias: Vec<f64>,
    pub l3_weight: Vec<Vec<f64>>,
    pub l3_bias: Vec<f64>,
}

#[derive(Debug, Clone)]
struct Dense {
    /// `[out, in]`
    weights: Array2<f64>,
    bias: Array1<f64>,
}

impl Dense {
    fn new(
        name: &str,
        rows: Vec<Vec<f64>>,
        bias: Vec<f64>,
        inputs: usize,
    ) -> Result<Self, ValidationError> {
        if rows.is_empty() {
            return Err(ValidationError::empty_field(format!("{name}_weight")));
        }
        if bias.len() != rows.len() {
            return Err(ValidationError::wrong_length(
                format!("{name}_bias"),
                rows.len(),
                bias.len(),
            ));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != inputs) {
            return Err(ValidationError::wrong_length(
                format!("{name}_weight"),
                inputs,
                row.len(),
            ));
        }

        let outputs = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let actual = flat.len();
        let weights = Array2::from_shape_vec((outputs, inputs), flat).map_err(|_| {
            ValidationError::wrong_length(format!("{name}_weight"), outputs * inputs, actual)
        })?;
        let bias = Array1::from_vec(bias);

        if !weights.iter().chain(bias.iter()).all(|v| v.is_finite()) {
            return Err(ValidationError::invalid_format(
                format!("{name}_weight"),
                "contains non-finite values",
            ));
        }
        Ok(Self { weights, bias })
    }

    fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn apply(&self, x: &Array1<f64>) -> Array1<f64> {
        self.weights.dot(x) + &self.bias
    }
}

/// The trait network.
#[derive(Debug, Clone)]
pub struct TraitNetwork {
    l1: Dense,
    l2: Dense,
    l3: Dense,
}

impl TraitNetwork {
    /// Validates shapes and builds the network.
    pub fn from_weights(weights: NetworkWeights) -> Result<Self, ValidationError> {
        let l1 = Dense::new("l1", weights.l1_weight, weights.l1_bias, TRAIT_DIMS)?;
        let hidden = l1.outputs();
        let l2 = Dense::new("l2", weights.l2_weight, weights.l2_bias, hidden)?;
        if l2.outputs() != hidden {
            return Err(ValidationError::wrong_length("l2_weight", hidden, l2.outputs()));
        }
        let l3 = Dense::new("l3", weights.l3_weight, weights.l3_bias, hidden)?;
        if l3.outputs() != TRAIT_DIMS {
            return Err(ValidationError::wrong_length("l3_weight", TRAIT_DIMS, l3.outputs()));
        }
        Ok(Self { l1, l2, l3 })
    }

    /// Hidden layer width.
    pub fn hidden_size(&self) -> usize {
        self.l1.outputs()
    }

    /// One forward pass. With `noise_enabled` hidden units are dropped with
    /// probability [`DROPOUT_RATE`] and survivors scaled by `1 / (1 - p)`.
    pub fn forward<R: Rng + ?Sized>(
        &self,
        x: &[f64; TRAIT_DIMS],
        noise_enabled: bool,
        rng: &mut R,
    ) -> [f64; TRAIT_DIMS] {
        let input = Array1::from_vec(x.to_vec());

        let mut h = self.l1.apply(&input);
        h.mapv_inplace(relu);
        if noise_enabled {
            dropout(&mut h, rng);
        }
        let mut h = self.l2.apply(&h);
        h.mapv_inplace(relu);
        if noise_enabled {
            dropout(&mut h, rng);
        }
        let logits = self.l3.apply(&h);

        let mut out = [0.0; TRAIT_DIMS];
        for (o, z) in out.iter_mut().zip(logits.iter()) {
            *o = sigmoid(*z);
        }
        out
    }
}

fn relu(v: f64) -> f64 {
    v.max(0.0)
}

fn dropout<R: Rng + ?Sized>(values: &mut Array1<f64>, rng: &mut R) {
    let keep_scale = 1.0 / (1.0 - DROPOUT_RATE);
    for v in values.iter_mut() {
        if rng.gen::<f64>() > DROPOUT_RATE {
            *v *= keep_scale;
        } else {
            *v = 0.0;
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
