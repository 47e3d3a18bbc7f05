use crate::{
    dct::{Block, BLOCK_SIZE},
    error::{CodecError, Result},
};
use tables::{QuantizationTable, DEFAULT_INTRA_TABLE};

pub mod tables;

/// Quantized DCT amplitudes of one coding block.
pub type QuantizedBlock = Block<i64>;

/// Largest DCT amplitude an 8x8 block of 8-bit samples can produce: the
/// transform is orthonormal, so no coefficient exceeds the block's norm.
pub const MAX_AMPLITUDE: f64 = BLOCK_SIZE as f64 * u8::MAX as f64;

/// Scale applied on top of the quantization table. Larger values quantize
/// more coarsely.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct QualityParameter(f64);

impl QualityParameter {
    pub fn new(p: f64) -> Result<Self> {
        if p.is_finite() && p > 0. {
            Ok(Self(p))
        } else {
            Err(CodecError::InvalidParameter(p))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for QualityParameter {
    type Error = CodecError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

/// MPEG-1 style intra quantizer: `q = round(16 * a / (w * p))` where `w` is
/// the table weight of the frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantizer {
    table: QuantizationTable,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_INTRA_TABLE)
    }
}

impl Quantizer {
    pub fn new(table: QuantizationTable) -> Self {
        debug_assert!(table.iter().flatten().all(|&w| w > 0));

        Self { table }
    }

    /// Fails when `p` is so small that a level for an in-range block would
    /// not fit a [`QuantizedBlock`] entry.
    pub fn ensure_representable(&self, p: QualityParameter) -> Result<()> {
        let lightest = self.table.iter().flatten().copied().min().unwrap_or(1).max(1);
        let largest_level = 16. * MAX_AMPLITUDE / (lightest as f64 * p.get());

        if largest_level < i64::MAX as f64 {
            Ok(())
        } else {
            Err(CodecError::InvalidParameter(p.get()))
        }
    }

    /// Distance between two adjacent reconstruction levels at (`row`, `col`).
    pub fn step(&self, row: usize, col: usize, p: QualityParameter) -> f64 {
        self.table[row][col] as f64 * p.get() / 16.
    }

    pub fn quantize(&self, amplitudes: &Block<f64>, p: QualityParameter) -> QuantizedBlock {
        let mut result = [[0; BLOCK_SIZE]; BLOCK_SIZE];

        for row in 0..BLOCK_SIZE {
            for col in 0..BLOCK_SIZE {
                let scaled = 16. * amplitudes[row][col] / (self.table[row][col] as f64 * p.get());
                result[row][col] = scaled.round_ties_even() as i64;
            }
        }

        result
    }

    pub fn dequantize(&self, levels: &QuantizedBlock, p: QualityParameter) -> Block<f64> {
        let mut result = [[0.; BLOCK_SIZE]; BLOCK_SIZE];

        for row in 0..BLOCK_SIZE {
            for col in 0..BLOCK_SIZE {
                result[row][col] =
                    levels[row][col] as f64 / 16. * self.table[row][col] as f64 * p.get();
            }
        }

        result
    }
}
