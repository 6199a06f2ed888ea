pub mod activation;
pub mod error;
pub mod loss;
pub mod math;
pub mod network;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{Error, Result};
pub use loss::mse::MseLoss;
pub use math::matrix::Matrix;
pub use network::config::{parse_sample, NetworkConfig};
pub use network::network::Network;
