//! Fixed-topology neural controller.
//!
//! Every car carries a two-layer feedforward network mapping speed, heading
//! and the five sensor distances to six steering signals. Weights are the
//! genome: breeding builds a new network weight by weight from two parents.

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Controller input width: speed, heading, then five sensor distances.
pub const INPUT_SIZE: usize = 7;
/// Controller output width, one scalar per steering signal.
pub const OUTPUT_SIZE: usize = 6;

/// A car's controller network and genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNet {
    /// Input-to-hidden weights (`INPUT_SIZE` x hidden width).
    pub hidden_weights: Array2<f32>,
    /// Hidden-to-output weights (hidden width x `OUTPUT_SIZE`).
    pub output_weights: Array2<f32>,
}

impl NeuralNet {
    /// Creates a network with every weight drawn uniformly from [-1, 1).
    pub fn new_random(hidden_width: usize, rng: &mut impl Rng) -> Self {
        Self {
            hidden_weights: Array2::from_shape_fn((INPUT_SIZE, hidden_width), |_| {
                rng.random_range(-1.0..1.0)
            }),
            output_weights: Array2::from_shape_fn((hidden_width, OUTPUT_SIZE), |_| {
                rng.random_range(-1.0..1.0)
            }),
        }
    }

    /// Forward pass: ReLU hidden layer, sigmoid outputs.
    #[inline]
    pub fn infer(&self, input: &Array1<f32>) -> Array1<f32> {
        let hidden = input.dot(&self.hidden_weights).mapv(|v| v.max(0.0));
        hidden
            .dot(&self.output_weights)
            .mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Breeds a child network from two parents.
    ///
    /// Each weight independently mutates to a fresh uniform [-1, 1) draw with
    /// probability `mutation_rate`; otherwise it comes from parent `a` with
    /// probability `parent_bias` and from parent `b` the rest of the time.
    ///
    /// # Panics
    ///
    /// Panics if the parents' weight shapes differ. The topology is fixed at
    /// construction, so a mismatch is a programming error.
    pub fn mate(
        a: &Self,
        b: &Self,
        mutation_rate: f32,
        parent_bias: f32,
        rng: &mut impl Rng,
    ) -> Self {
        assert_eq!(
            a.hidden_weights.dim(),
            b.hidden_weights.dim(),
            "parent hidden layers have mismatched shapes"
        );
        assert_eq!(
            a.output_weights.dim(),
            b.output_weights.dim(),
            "parent output layers have mismatched shapes"
        );
        Self {
            hidden_weights: mate_matrix(
                &a.hidden_weights,
                &b.hidden_weights,
                mutation_rate,
                parent_bias,
                rng,
            ),
            output_weights: mate_matrix(
                &a.output_weights,
                &b.output_weights,
                mutation_rate,
                parent_bias,
                rng,
            ),
        }
    }
}

fn mate_matrix(
    a: &Array2<f32>,
    b: &Array2<f32>,
    mutation_rate: f32,
    parent_bias: f32,
    rng: &mut impl Rng,
) -> Array2<f32> {
    Array2::from_shape_fn(a.dim(), |idx| {
        if rng.random::<f32>() < mutation_rate {
            rng.random_range(-1.0..1.0)
        } else if rng.random::<f32>() < parent_bias {
            a[idx]
        } else {
            b[idx]
        }
    })
}

/// Binary steering signals decoded from one inference pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Steering {
    /// Increase speed by half a pixel per tick.
    pub accelerate: bool,
    /// Decrease speed by half a pixel per tick.
    pub decelerate: bool,
    /// Gentle left turn.
    pub left_soft: bool,
    /// Sharp left turn.
    pub left_hard: bool,
    /// Gentle right turn.
    pub right_soft: bool,
    /// Sharp right turn.
    pub right_hard: bool,
}

impl Steering {
    /// Thresholds the six controller outputs at 0.5.
    pub fn from_outputs(outputs: &Array1<f32>) -> Self {
        Self {
            accelerate: outputs[0] >= 0.5,
            decelerate: outputs[1] >= 0.5,
            left_soft: outputs[2] >= 0.5,
            left_hard: outputs[3] >= 0.5,
            right_soft: outputs[4] >= 0.5,
            right_hard: outputs[5] >= 0.5,
        }
    }

    /// Signed speed change for this tick.
    ///
    /// Accelerate and decelerate stack, so firing both cancels to zero and
    /// the car coasts.
    pub fn acceleration(&self) -> f32 {
        let mut acceleration = 0.0;
        if self.accelerate {
            acceleration += 0.5;
        }
        if self.decelerate {
            acceleration -= 0.5;
        }
        acceleration
    }

    /// Signed heading change in degrees for this tick. Soft and hard turn
    /// impulses are additive, not exclusive.
    pub fn rotation(&self) -> f32 {
        let mut rotation = 0.0;
        if self.left_soft {
            rotation += 1.0;
        }
        if self.left_hard {
            rotation += 4.0;
        }
        if self.right_soft {
            rotation -= 1.0;
        }
        if self.right_hard {
            rotation -= 4.0;
        }
        rotation
    }
}
