use std::f64::consts::PI;

/// Side of a coding block.
pub const BLOCK_SIZE: usize = 8;

/// A square matrix of `N`x`N` values, indexed `[row][col]`.
pub type Block<T, const N: usize = BLOCK_SIZE> = [[T; N]; N];

/// Orthonormal two dimensional DCT-II (and its inverse, the DCT-III) on
/// square blocks of side `N`.
///
/// The transform is separable: it runs along the columns first and then
/// along the rows, using a precomputed basis matrix `C` so that
/// `forward(X) = C X Cᵀ` and `inverse(Y) = Cᵀ Y C`.
#[derive(Debug, Clone)]
pub struct DiscreteCosineTransformer<const N: usize = BLOCK_SIZE> {
    basis: Block<f64, N>,
}

impl<const N: usize> Default for DiscreteCosineTransformer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DiscreteCosineTransformer<N> {
    pub fn new() -> Self {
        let mut basis = [[0.; N]; N];
        let zero_normalization = 1. / (N as f64).sqrt();
        let non_zero_normalization = (2. / N as f64).sqrt();

        for (frequency, basis_row) in basis.iter_mut().enumerate() {
            let normalization = if frequency == 0 {
                zero_normalization
            } else {
                non_zero_normalization
            };

            for (sample, value) in basis_row.iter_mut().enumerate() {
                *value = normalization
                    * f64::cos(frequency as f64 * PI * (2. * sample as f64 + 1.) / (2. * N as f64));
            }
        }

        Self { basis }
    }

    pub fn forward(&self, block: &Block<f64, N>) -> Block<f64, N> {
        // C X, then (C X) Cᵀ
        let columns = multiply(&self.basis, block, false, false);
        multiply(&columns, &self.basis, false, true)
    }

    pub fn inverse(&self, amplitudes: &Block<f64, N>) -> Block<f64, N> {
        // Cᵀ Y, then (Cᵀ Y) C
        let columns = multiply(&self.basis, amplitudes, true, false);
        multiply(&columns, &self.basis, false, false)
    }
}

/// `op(a) * op(b)` where `op` optionally transposes its argument.
fn multiply<const N: usize>(
    a: &Block<f64, N>,
    b: &Block<f64, N>,
    transpose_a: bool,
    transpose_b: bool,
) -> Block<f64, N> {
    let at = |row: usize, col: usize| if transpose_a { a[col][row] } else { a[row][col] };
    let bt = |row: usize, col: usize| if transpose_b { b[col][row] } else { b[row][col] };
    let mut result = [[0.; N]; N];

    for (row, result_row) in result.iter_mut().enumerate() {
        for (col, value) in result_row.iter_mut().enumerate() {
            *value = (0..N).map(|k| at(row, k) * bt(k, col)).sum();
        }
    }

    result
}
