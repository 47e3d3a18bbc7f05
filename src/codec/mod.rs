use crate::{
    dct::{Block, DiscreteCosineTransformer},
    macroblock::BLOCKS_PER_MACROBLOCK,
    quantization::{QualityParameter, QuantizedBlock, Quantizer},
    resample::{Resampler, ResamplerKind},
};

pub mod decode;
pub mod encode;

/// Quantized coefficients of one macroblock: luma quadrants in row-major
/// order, then Cb, then Cr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedMacroblock {
    pub blocks: [QuantizedBlock; BLOCKS_PER_MACROBLOCK],
}

impl CodedMacroblock {
    /// Luma quadrant in row-major order, `None` past the fourth.
    pub fn luma(&self, quadrant: usize) -> Option<&QuantizedBlock> {
        self.luma_blocks().get(quadrant)
    }

    pub fn luma_blocks(&self) -> &[QuantizedBlock] {
        &self.blocks[..4]
    }

    pub fn cb(&self) -> &QuantizedBlock {
        &self.blocks[4]
    }

    pub fn cr(&self) -> &QuantizedBlock {
        &self.blocks[5]
    }

    /// Number of zero coefficients across all six blocks.
    pub fn zero_count(&self) -> usize {
        self.blocks.iter().map(count_zeros).sum()
    }
}

pub(crate) fn count_zeros(block: &QuantizedBlock) -> usize {
    block.iter().flatten().filter(|&&level| level == 0).count()
}

/// A coded picture: one entry per macroblock, in raster order. The position
/// in the vector is the only record of where a macroblock belongs.
pub type CodedPicture = Vec<CodedMacroblock>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    pub resampler: ResamplerKind,
    /// Code and decode macroblocks on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            resampler: ResamplerKind::default(),
            parallel: true,
        }
    }
}

/// Intra picture coder and reconstructor.
#[derive(Debug)]
pub struct Codec {
    transformer: DiscreteCosineTransformer,
    quantizer: Quantizer,
    resampler: Box<dyn Resampler>,
    parallel: bool,
}

impl Default for Codec {
    fn default() -> Self {
        Self::with_options(CodecOptions::default())
    }
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self {
            transformer: DiscreteCosineTransformer::new(),
            quantizer: Quantizer::default(),
            resampler: options.resampler.build(),
            parallel: options.parallel,
        }
    }

    /// Replaces the chroma resampling strategy.
    pub fn with_resampler(mut self, resampler: Box<dyn Resampler>) -> Self {
        self.resampler = resampler;
        self
    }

    pub fn with_quantizer(mut self, quantizer: Quantizer) -> Self {
        self.quantizer = quantizer;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn resampler(&self) -> &dyn Resampler {
        self.resampler.as_ref()
    }

    pub fn component_to_quantised_dct(
        &self,
        component: &Block<f64>,
        p: QualityParameter,
    ) -> QuantizedBlock {
        self.quantizer
            .quantize(&self.transformer.forward(component), p)
    }

    /// Inverse of [`Self::component_to_quantised_dct`] up to quantization
    /// loss. Samples are saturated into `[0, 255]`.
    pub fn quantised_dct_to_component(
        &self,
        levels: &QuantizedBlock,
        p: QualityParameter,
    ) -> Block<f64> {
        let mut component = self
            .transformer
            .inverse(&self.quantizer.dequantize(levels, p));

        component
            .iter_mut()
            .flatten()
            .for_each(|sample| *sample = sample.clamp(0., 255.));

        component
    }
}
