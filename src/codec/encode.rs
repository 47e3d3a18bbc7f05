use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    error::Result,
    image::Image,
    macroblock::{
        extract_macroblock, image_to_slices, slice_to_macroblocks, Macroblock, TileAddress,
    },
    quantization::QualityParameter,
};

use super::{CodedMacroblock, CodedPicture, Codec};

impl Codec {
    /// Transforms and quantizes the six coding blocks of `macroblock`,
    /// keeping their order.
    pub fn code_macroblock(&self, macroblock: &Macroblock, p: QualityParameter) -> CodedMacroblock {
        let blocks = macroblock
            .to_blocks()
            .map(|block| self.component_to_quantised_dct(&block, p));

        CodedMacroblock { blocks }
    }

    /// Codes every macroblock of `image`, in raster order.
    ///
    /// Both sides of the picture must be positive multiples of 16, the pixel
    /// grid must match the resolution, and `p` must be positive.
    pub fn code_picture(&self, image: &Image, p: f64) -> Result<CodedPicture> {
        let resolution = image.resolution;
        resolution.ensure_macroblock_aligned()?;
        image.ensure_pixel_grid()?;
        let p = QualityParameter::new(p)?;
        self.quantizer.ensure_representable(p)?;

        debug!(
            "coding {}x{} picture as {}x{} macroblocks, p = {}",
            resolution.width,
            resolution.height,
            resolution.tiles_per_row(),
            resolution.tiles_per_column(),
            p.get()
        );

        let coded: CodedPicture = if self.parallel {
            let tiles_per_row = resolution.tiles_per_row();

            (0..resolution.macroblock_count())
                .into_par_iter()
                .map(|index| {
                    let address = TileAddress::from_index(index, tiles_per_row);
                    let macroblock = extract_macroblock(image, address, self.resampler());
                    trace!("coding macroblock {index} at {address:?}");

                    self.code_macroblock(&macroblock, p)
                })
                .collect()
        } else {
            let mut coded = Vec::with_capacity(resolution.macroblock_count());

            for slice in image_to_slices(image) {
                for macroblock in slice_to_macroblocks(&slice, self.resampler()) {
                    trace!("coding macroblock {} in slice {}", coded.len(), slice.index);
                    coded.push(self.code_macroblock(&macroblock, p));
                }
            }

            coded
        };

        Ok(coded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colors::Rgb,
        error::CodecError,
        image::{Plane, Resolution},
    };

    fn gradient(resolution: Resolution) -> Image {
        Image::from_fn(resolution, |row, col| {
            Rgb::new((row * 3) as u8, (col * 2) as u8, ((row + col) % 256) as u8)
        })
    }

    #[test]
    fn produces_one_entry_per_tile() {
        let codec = Codec::new();
        let coded = codec
            .code_picture(&gradient(Resolution::new(64, 32)), 1.)
            .unwrap();

        assert_eq!(coded.len(), 8);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let image = gradient(Resolution::new(80, 48));
        let parallel = Codec::new().code_picture(&image, 2.).unwrap();
        let sequential = Codec::new().sequential().code_picture(&image, 2.).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn flat_macroblock_codes_to_dc_only() {
        let codec = Codec::new();
        let p = QualityParameter::new(1.).unwrap();
        let macroblock = Macroblock {
            luma: Plane::from_fn(16, 16, |_, _| 128),
            cb: Plane::from_fn(8, 8, |_, _| 64),
            cr: Plane::from_fn(8, 8, |_, _| 128),
        };

        let coded = codec.code_macroblock(&macroblock, p);

        // DC = 8 * mean, level = 16 * DC / 8
        assert!(coded.luma_blocks().iter().all(|block| block[0][0] == 2048));
        assert_eq!(coded.cb()[0][0], 1024);
        assert_eq!(coded.zero_count(), 6 * 63);
    }

    #[test]
    fn rejects_unaligned_dimensions() {
        let image = Image::filled(Resolution::new(17, 32), Rgb::default());

        assert_eq!(
            Codec::new().code_picture(&image, 1.),
            Err(CodecError::InvalidDimensions {
                width: 17,
                height: 32
            })
        );
    }

    #[test]
    fn rejects_pixel_grid_smaller_than_resolution() {
        let image = Image {
            resolution: Resolution::new(32, 32),
            pixels: vec![vec![Rgb::default(); 16]; 16],
        };
        let expected = Err(CodecError::InvalidDimensions {
            width: 16,
            height: 16,
        });

        assert_eq!(Codec::new().code_picture(&image, 1.), expected);
        assert_eq!(Codec::new().sequential().code_picture(&image, 1.), expected);
    }

    #[test]
    fn rejects_quality_too_fine_for_the_levels() {
        let image = Image::filled(Resolution::new(16, 16), Rgb::new(255, 255, 255));

        assert_eq!(
            Codec::new().code_picture(&image, 1e-18),
            Err(CodecError::InvalidParameter(1e-18))
        );
    }

    #[test]
    fn rejects_non_positive_quality() {
        let image = Image::filled(Resolution::new(32, 32), Rgb::default());

        assert_eq!(
            Codec::new().code_picture(&image, 0.),
            Err(CodecError::InvalidParameter(0.))
        );
        assert!(Codec::new().code_picture(&image, -1.).is_err());
    }
}
