use rand::Rng;

/// Row-major 2D container backing the weight tables.
///
/// Allocated once at construction time and never resized; entries are
/// mutated in place by the weight updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a matrix with independent uniform draws from `[0, 1)`.
    /// The RNG is caller-supplied so seeded construction stays reproducible.
    pub fn random<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>();
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zeros_allocates_the_requested_shape() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(m.rows, 2);
        assert_eq!(m.cols, 3);
        assert!(m.data.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn random_fills_the_unit_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = Matrix::random(&mut rng, 4, 4);
        assert_eq!((m.rows, m.cols), (4, 4));
        assert!(m.data.iter().flatten().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn from_data_reads_the_shape_from_the_rows() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!((m.rows, m.cols), (3, 2));
        assert_eq!(m.data[2][1], 6.0);
    }
}
