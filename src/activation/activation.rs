use serde::{Deserialize, Serialize};
use std::f64::consts::E;

/// Activations the configuration surface recognizes.
///
/// Only `Sigmoid` is wired to the forward and backward passes. Asking for
/// any other variant fails construction with
/// [`Error::UnsupportedActivation`](crate::error::Error::UnsupportedActivation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
    ReLU,
}

/// Logistic sigmoid: 1 / (1 + e^(-x)).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed in terms of the sigmoid's own output, so
/// callers pass an activation value rather than a pre-activation.
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_at_one_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_saturates_toward_the_unit_interval() {
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(10.0) < 1.0);
        assert!(sigmoid(-10.0) < 0.01);
        assert!(sigmoid(-10.0) > 0.0);
    }

    #[test]
    fn dsigmoid_peaks_at_the_midpoint() {
        assert_eq!(dsigmoid(0.5), 0.25);
        assert!(dsigmoid(0.9) < 0.25);
        assert!(dsigmoid(0.1) < 0.25);
    }
}
