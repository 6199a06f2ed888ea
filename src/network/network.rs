use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::activation::activation::{dsigmoid, sigmoid};
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// A single-hidden-layer perceptron trained with online stochastic gradient
/// descent.
///
/// The network owns its topology, parameters, and training set outright.
/// Parameter storage is allocated once at construction and only ever mutated
/// in place by the backward pass. `hidden_weights` is indexed
/// `[input][hidden]` and `output_weights` is indexed `[hidden][output]`; the
/// weight updates keep that correspondence.
///
/// Not synchronized: callers that share an instance across threads must
/// serialize access themselves.
pub struct Network {
    inputs: usize,
    hidden_nodes: usize,
    outputs: usize,
    learning_rate: f64,
    epochs: usize,
    trace: bool,

    hidden_weights: Matrix,
    output_weights: Matrix,
    hidden_bias: Vec<f64>,
    output_bias: Vec<f64>,
    hidden_activations: Vec<f64>,
    output_activations: Vec<f64>,

    training_inputs: Vec<Vec<f64>>,
    training_outputs: Vec<Vec<f64>>,
    training_order: Vec<usize>,

    trained: bool,
    rng: StdRng,
}

impl Network {
    /// Validates `config` and builds a network with uniform-random weights
    /// and biases in `[0, 1)` and an identity training order.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let hidden_weights = Matrix::random(&mut rng, config.inputs, config.hidden_nodes);
        let output_weights = Matrix::random(&mut rng, config.hidden_nodes, config.outputs);
        let hidden_bias = random_bias(&mut rng, config.hidden_nodes);
        let output_bias = random_bias(&mut rng, config.outputs);

        let training_order = (0..config.training_inputs.len()).collect();

        Ok(Network {
            inputs: config.inputs,
            hidden_nodes: config.hidden_nodes,
            outputs: config.outputs,
            learning_rate: config.learning_rate,
            epochs: config.epochs,
            trace: config.trace,
            hidden_weights,
            output_weights,
            hidden_bias,
            output_bias,
            hidden_activations: vec![0.0; config.hidden_nodes],
            output_activations: vec![0.0; config.outputs],
            training_inputs: config.training_inputs,
            training_outputs: config.training_outputs,
            training_order,
            trained: false,
            rng,
        })
    }

    /// Runs the configured number of epochs over the training set, one full
    /// forward/backward step per example, then marks the network trained.
    ///
    /// The training order is re-shuffled uniformly before every epoch. A run
    /// is unconditionally bounded by the epoch count; there is no early exit
    /// and no convergence check.
    pub fn train(&mut self) {
        for epoch in 1..=self.epochs {
            self.training_order.shuffle(&mut self.rng);

            let mut epoch_loss = 0.0;
            for position in 0..self.training_order.len() {
                let example = self.training_order[position];
                let input = self.training_inputs[example].clone();
                let expected = self.training_outputs[example].clone();

                self.propagate_forward(&input);
                self.snapshot("forward");
                epoch_loss += MseLoss::loss(&self.output_activations, &expected);

                self.propagate_backward(&input, &expected);
                self.snapshot("backward");
            }

            debug!(
                epoch,
                loss = epoch_loss / self.training_order.len() as f64,
                "epoch complete"
            );
        }

        self.trained = true;
    }

    /// Runs the forward pass on `sample` and returns a copy of the output
    /// activations.
    ///
    /// The returned vector is a snapshot: later calls cannot mutate it.
    /// NaN entries are treated as missing values and rejected.
    pub fn predict(&mut self, sample: &[f64]) -> Result<Vec<f64>> {
        if !self.trained {
            return Err(Error::NotTrained);
        }
        if sample.len() != self.inputs {
            return Err(Error::InputLength {
                expected: self.inputs,
                actual: sample.len(),
            });
        }
        if let Some(index) = sample.iter().position(|value| value.is_nan()) {
            return Err(Error::MissingValue { index });
        }

        self.propagate_forward(sample);
        Ok(self.output_activations.clone())
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.output_weights
    }

    pub fn hidden_bias(&self) -> &[f64] {
        &self.hidden_bias
    }

    pub fn output_bias(&self) -> &[f64] {
        &self.output_bias
    }

    /// Current visit order over the training set, re-shuffled every epoch.
    pub fn training_order(&self) -> &[usize] {
        &self.training_order
    }

    /// Hidden activations, then output activations, each written in place.
    fn propagate_forward(&mut self, input: &[f64]) {
        for h in 0..self.hidden_nodes {
            let mut activation = self.hidden_bias[h];
            for (i, value) in input.iter().enumerate() {
                activation += value * self.hidden_weights.data[i][h];
            }
            self.hidden_activations[h] = sigmoid(activation);
        }

        for o in 0..self.outputs {
            let mut activation = self.output_bias[o];
            for h in 0..self.hidden_nodes {
                activation += self.hidden_activations[h] * self.output_weights.data[h][o];
            }
            self.output_activations[o] = sigmoid(activation);
        }
    }

    /// One SGD update from the freshly forward-propagated `input`. Deltas
    /// are computed for both layers first; the updates then only read those
    /// deltas, so the two update blocks can run in either order.
    fn propagate_backward(&mut self, input: &[f64], expected: &[f64]) {
        let mut delta_output = vec![0.0; self.outputs];
        for o in 0..self.outputs {
            delta_output[o] =
                (expected[o] - self.output_activations[o]) * dsigmoid(self.output_activations[o]);
        }

        let mut delta_hidden = vec![0.0; self.hidden_nodes];
        for h in 0..self.hidden_nodes {
            let mut error = 0.0;
            for o in 0..self.outputs {
                error += delta_output[o] * self.output_weights.data[h][o];
            }
            delta_hidden[h] = error * dsigmoid(self.hidden_activations[h]);
        }

        for o in 0..self.outputs {
            self.output_bias[o] += delta_output[o] * self.learning_rate;
            for h in 0..self.hidden_nodes {
                self.output_weights.data[h][o] +=
                    self.hidden_activations[h] * delta_output[o] * self.learning_rate;
            }
        }

        for h in 0..self.hidden_nodes {
            self.hidden_bias[h] += delta_hidden[h] * self.learning_rate;
            for (i, value) in input.iter().enumerate() {
                self.hidden_weights.data[i][h] += value * delta_hidden[h] * self.learning_rate;
            }
        }
    }

    /// Weight/bias snapshot emitted after each forward and backward step
    /// when tracing is enabled. Observational only.
    fn snapshot(&self, stage: &str) {
        if !self.trace {
            return;
        }
        trace!(
            stage,
            hidden_weights = ?self.hidden_weights.data,
            hidden_bias = ?self.hidden_bias,
            output_weights = ?self.output_weights.data,
            output_bias = ?self.output_bias,
        );
    }
}

fn random_bias<R: Rng>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen::<f64>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quick_config() -> NetworkConfig {
        NetworkConfig {
            epochs: 1,
            seed: Some(7),
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn construction_sizes_parameters_from_the_topology() {
        let network = Network::new(NetworkConfig {
            inputs: 3,
            hidden_nodes: 5,
            outputs: 2,
            training_inputs: vec![vec![0.0; 3]; 4],
            training_outputs: vec![vec![0.0; 2]; 4],
            seed: Some(1),
            ..NetworkConfig::default()
        })
        .unwrap();

        assert_eq!(network.hidden_weights().rows, 3);
        assert_eq!(network.hidden_weights().cols, 5);
        assert_eq!(network.output_weights().rows, 5);
        assert_eq!(network.output_weights().cols, 2);
        assert_eq!(network.hidden_bias().len(), 5);
        assert_eq!(network.output_bias().len(), 2);
        assert!(!network.is_trained());
    }

    #[test]
    fn initial_parameters_are_uniform_in_the_unit_interval() {
        let network = Network::new(quick_config()).unwrap();

        let parameters = network
            .hidden_weights()
            .data
            .iter()
            .flatten()
            .chain(network.output_weights().data.iter().flatten())
            .chain(network.hidden_bias().iter())
            .chain(network.output_bias().iter());
        for &value in parameters {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn training_order_starts_as_the_identity_permutation() {
        let network = Network::new(quick_config()).unwrap();
        assert_eq!(network.training_order(), &[0, 1, 2, 3]);
    }

    #[test]
    fn training_order_stays_a_permutation_after_training() {
        let mut network = Network::new(NetworkConfig {
            epochs: 17,
            seed: Some(3),
            ..NetworkConfig::default()
        })
        .unwrap();
        network.train();

        let mut order = network.training_order().to_vec();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn predict_before_train_is_rejected() {
        let mut network = Network::new(quick_config()).unwrap();
        assert_eq!(network.predict(&[0.0, 1.0]), Err(Error::NotTrained));
    }

    #[test]
    fn predict_rejects_wrong_sample_length() {
        let mut network = Network::new(quick_config()).unwrap();
        network.train();
        assert_eq!(
            network.predict(&[1.0, 2.0, 3.0]),
            Err(Error::InputLength {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn predict_rejects_missing_values() {
        let mut network = Network::new(quick_config()).unwrap();
        network.train();
        assert_eq!(
            network.predict(&[1.0, f64::NAN]),
            Err(Error::MissingValue { index: 1 })
        );
    }

    #[test]
    fn predict_returns_a_stable_snapshot() {
        let mut network = Network::new(quick_config()).unwrap();
        network.train();

        let first = network.predict(&[1.0, 0.0]).unwrap();
        let _ = network.predict(&[0.0, 0.0]).unwrap();
        let second = network.predict(&[1.0, 0.0]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn xor_converges_with_the_default_configuration() {
        let mut network = Network::new(NetworkConfig {
            seed: Some(42),
            ..NetworkConfig::default()
        })
        .unwrap();
        network.train();

        for (sample, expected) in [
            ([0.0, 0.0], 0.0),
            ([1.0, 0.0], 1.0),
            ([0.0, 1.0], 1.0),
            ([1.0, 1.0], 0.0),
        ] {
            let output = network.predict(&sample).unwrap();
            assert!(
                (output[0] - expected).abs() < 0.1,
                "{:?} predicted {:.4}, expected {}",
                sample,
                output[0],
                expected
            );
        }
    }

    #[test]
    fn identical_seeds_give_identical_parameter_trajectories() {
        let config = NetworkConfig {
            epochs: 250,
            seed: Some(99),
            ..NetworkConfig::default()
        };
        let mut left = Network::new(config.clone()).unwrap();
        let mut right = Network::new(config).unwrap();

        assert_eq!(left.hidden_weights(), right.hidden_weights());

        left.train();
        right.train();

        assert_eq!(left.hidden_weights(), right.hidden_weights());
        assert_eq!(left.output_weights(), right.output_weights());
        assert_eq!(left.hidden_bias(), right.hidden_bias());
        assert_eq!(left.output_bias(), right.output_bias());
        assert_eq!(left.predict(&[0.0, 1.0]), right.predict(&[0.0, 1.0]));
    }

    proptest! {
        #[test]
        fn outputs_stay_inside_the_open_unit_interval(
            a in -10.0..10.0f64,
            b in -10.0..10.0f64,
        ) {
            let mut network = Network::new(NetworkConfig {
                epochs: 1,
                seed: Some(11),
                ..NetworkConfig::default()
            })
            .unwrap();
            network.train();

            let output = network.predict(&[a, b]).unwrap();
            for value in output {
                prop_assert!(0.0 < value && value < 1.0);
            }
        }
    }
}
