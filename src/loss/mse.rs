pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)^2). Reported per epoch for
    /// monitoring; the backward pass works from its own deltas.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_zero_for_a_perfect_prediction() {
        assert_eq!(MseLoss::loss(&[0.5, 0.5], &[0.5, 0.5]), 0.0);
    }

    #[test]
    fn loss_averages_the_squared_errors() {
        assert_eq!(MseLoss::loss(&[1.0, 0.0], &[0.0, 0.0]), 0.5);
    }
}
