use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    dct::{Block, BLOCK_SIZE},
    error::{CodecError, Result},
    image::{Plane, Resolution, YCbCrImage, MACROBLOCK_SIZE},
    macroblock::TileAddress,
    quantization::{QualityParameter, QuantizedBlock},
};

use super::{CodedMacroblock, Codec};

impl Codec {
    /// Rebuilds the 16x16 picture tile of one coded macroblock.
    pub fn decode_macroblock(&self, coded: &CodedMacroblock, p: QualityParameter) -> YCbCrImage {
        let quadrants: Vec<Block<f64>> = coded
            .luma_blocks()
            .iter()
            .map(|levels| self.quantised_dct_to_component(levels, p))
            .collect();
        let luma = Plane::from_fn(MACROBLOCK_SIZE, MACROBLOCK_SIZE, |row, col| {
            let quadrant = &quadrants[(row / BLOCK_SIZE) * 2 + col / BLOCK_SIZE];

            to_sample(quadrant[row % BLOCK_SIZE][col % BLOCK_SIZE])
        });

        let chroma = |levels: &QuantizedBlock| {
            let component = self.quantised_dct_to_component(levels, p);
            let reduced = Plane::from_fn(BLOCK_SIZE, BLOCK_SIZE, |row, col| {
                to_sample(component[row][col])
            });

            self.resampler().upsample(&reduced)
        };

        YCbCrImage::merge(luma, chroma(coded.cb()), chroma(coded.cr()))
    }

    /// Reassembles a picture of `resolution` from its coded macroblocks.
    ///
    /// `coded` must hold exactly one entry per 16x16 tile, in raster order.
    pub fn reconstruct_picture(
        &self,
        resolution: Resolution,
        coded: &[CodedMacroblock],
        p: f64,
    ) -> Result<YCbCrImage> {
        resolution.ensure_macroblock_aligned()?;
        let p = QualityParameter::new(p)?;
        let expected = resolution.macroblock_count();
        if coded.len() != expected {
            return Err(CodecError::LengthMismatch {
                expected,
                actual: coded.len(),
            });
        }

        debug!(
            "reconstructing {}x{} picture from {} macroblocks, p = {}",
            resolution.width,
            resolution.height,
            coded.len(),
            p.get()
        );

        let tiles: Vec<YCbCrImage> = if self.parallel {
            coded
                .par_iter()
                .map(|macroblock| self.decode_macroblock(macroblock, p))
                .collect()
        } else {
            coded
                .iter()
                .map(|macroblock| self.decode_macroblock(macroblock, p))
                .collect()
        };

        let mut picture = YCbCrImage::blank(resolution);
        let tiles_per_row = resolution.tiles_per_row();
        for (index, tile) in tiles.iter().enumerate() {
            let address = TileAddress::from_index(index, tiles_per_row);
            let (x, y) = address.pixel_offset();
            trace!("pasting macroblock {index} at ({x}, {y})");

            picture.paste(tile, x, y);
        }

        Ok(picture)
    }
}

fn to_sample(value: f64) -> u8 {
    value.round().clamp(0., 255.) as u8
}
