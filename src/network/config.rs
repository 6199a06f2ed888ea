use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Everything `Network::new` needs to size, seed, and train a network.
///
/// Every field has a documented default, so `NetworkConfig::default()` (or
/// an empty JSON object) describes the classic XOR setup. Unknown JSON keys
/// are rejected rather than silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Width of the input layer. Default: 2.
    pub inputs: usize,
    /// Width of the single hidden layer. Default: 2.
    pub hidden_nodes: usize,
    /// Width of the output layer. Default: 1.
    pub outputs: usize,
    /// SGD step size. Default: 0.1.
    pub learning_rate: f64,
    /// Full passes over the training set per `train()` call. Default: 100_000.
    pub epochs: usize,
    /// Activation applied at both layers. Default: `Sigmoid`, the only
    /// variant with a wired implementation.
    pub activation: ActivationFunction,
    /// Training samples, one row per example. Default: the four XOR rows.
    pub training_inputs: Vec<Vec<f64>>,
    /// Expected outputs, parallel to `training_inputs`. Default: the XOR
    /// truth values.
    pub training_outputs: Vec<Vec<f64>>,
    /// Seed for weight initialization and epoch shuffling. `None` draws the
    /// seed from the operating system. Default: `None`.
    pub seed: Option<u64>,
    /// Emit a weight/bias snapshot through `tracing` after every forward and
    /// backward step. Default: false.
    pub trace: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            inputs: 2,
            hidden_nodes: 2,
            outputs: 1,
            learning_rate: 0.1,
            epochs: 100_000,
            activation: ActivationFunction::Sigmoid,
            training_inputs: vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
            ],
            training_outputs: vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
            seed: None,
            trace: false,
        }
    }
}

impl NetworkConfig {
    /// Checks ranges and shapes before any parameter storage is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.inputs == 0 {
            return Err(Error::InvalidConfig("inputs must be at least 1".into()));
        }
        if self.hidden_nodes == 0 {
            return Err(Error::InvalidConfig(
                "hidden_nodes must be at least 1".into(),
            ));
        }
        if self.outputs == 0 {
            return Err(Error::InvalidConfig("outputs must be at least 1".into()));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be at least 1".into()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidConfig(
                "learning_rate must be finite and positive".into(),
            ));
        }
        if self.activation != ActivationFunction::Sigmoid {
            return Err(Error::UnsupportedActivation(self.activation));
        }
        if self.training_inputs.is_empty() {
            return Err(Error::InvalidConfig(
                "the training set must not be empty".into(),
            ));
        }
        if self.training_inputs.len() != self.training_outputs.len() {
            return Err(Error::InvalidConfig(format!(
                "{} training inputs but {} training outputs",
                self.training_inputs.len(),
                self.training_outputs.len()
            )));
        }
        for (row, input) in self.training_inputs.iter().enumerate() {
            if input.len() != self.inputs {
                return Err(Error::InvalidConfig(format!(
                    "training input {} has {} values, expected {}",
                    row,
                    input.len(),
                    self.inputs
                )));
            }
        }
        for (row, output) in self.training_outputs.iter().enumerate() {
            if output.len() != self.outputs {
                return Err(Error::InvalidConfig(format!(
                    "training output {} has {} values, expected {}",
                    row,
                    output.len(),
                    self.outputs
                )));
            }
        }
        Ok(())
    }

    /// Serializes the configuration to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a configuration from a JSON file previously written by
    /// `save_json`. Missing fields fall back to their defaults.
    pub fn load_json(path: &str) -> std::io::Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

/// Parses a comma-separated sample such as `"1,0"` into a numeric vector.
/// This is the boundary where loose text becomes typed input; anything that
/// is not a number is rejected here, not inside the network.
pub fn parse_sample(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| Error::InvalidInput(format!("`{}` is not a number", token)))
        })
        .collect()
}
