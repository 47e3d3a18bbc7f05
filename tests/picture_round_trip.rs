use approx::assert_abs_diff_eq;
use mpic::{
    analysis::{psnr, summarise_encoding},
    codec::{Codec, CodecOptions},
    colors::Rgb,
    dct::DiscreteCosineTransformer,
    error::CodecError,
    image::{Image, Resolution, YCbCrImage},
    macroblock::{extract_macroblock, image_to_slices, slice_to_macroblocks, TileAddress},
    ppm::{decode_ppm, encode_ppm},
    quantization::{QualityParameter, Quantizer},
    resample::{AreaResampler, ResamplerKind},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn noisy_image(resolution: Resolution, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);

    Image::from_fn(resolution, |row, col| {
        let base = ((row * 2 + col) % 200) as u8;
        Rgb::new(
            base.saturating_add(rng.gen_range(0..20)),
            base / 2,
            255 - base,
        )
    })
}

/// Each tile gets a distinct grey level so its placement can be checked.
fn labelled_tiles(resolution: Resolution) -> Image {
    Image::from_fn(resolution, |row, col| {
        let index = (row / 16) * resolution.tiles_per_row() + col / 16;
        let level = (index * 13 % 240) as u8 + 8;
        Rgb::new(level, level, level)
    })
}

#[test]
fn flat_picture_is_near_lossless() {
    let resolution = Resolution::new(32, 32);
    let image = Image::filled(resolution, Rgb::new(100, 150, 200));
    let codec = Codec::new();

    let coded = codec.code_picture(&image, 1.).unwrap();
    let reconstructed = Image::from(&codec.reconstruct_picture(resolution, &coded, 1.).unwrap());

    for (a, b) in image.pixels.iter().flatten().zip(reconstructed.pixels.iter().flatten()) {
        assert!(a.r.abs_diff(b.r) <= 2, "{a:?} vs {b:?}");
        assert!(a.g.abs_diff(b.g) <= 2, "{a:?} vs {b:?}");
        assert!(a.b.abs_diff(b.b) <= 2, "{a:?} vs {b:?}");
    }
}

#[test]
fn macroblock_count_matches_the_tile_grid() {
    let codec = Codec::new();

    for (width, height) in [(16, 16), (32, 48), (64, 16), (80, 64)] {
        let resolution = Resolution::new(width, height);
        let coded = codec
            .code_picture(&noisy_image(resolution, 1), 1.)
            .unwrap();

        assert_eq!(coded.len(), (width / 16) * (height / 16));
    }
}

#[test]
fn tiles_return_to_the_offset_they_were_read_from() {
    let resolution = Resolution::new(64, 48);
    let image = labelled_tiles(resolution);
    let codec = Codec::new();

    let coded = codec.code_picture(&image, 0.5).unwrap();
    let reconstructed = codec.reconstruct_picture(resolution, &coded, 0.5).unwrap();
    let walked: Vec<_> = image_to_slices(&image)
        .flat_map(|slice| slice_to_macroblocks(&slice, &AreaResampler))
        .collect();

    for (index, macroblock) in walked.iter().enumerate() {
        let address = TileAddress::from_index(index, resolution.tiles_per_row());
        let (x, y) = address.pixel_offset();
        assert_eq!(
            macroblock,
            &extract_macroblock(&image, address, &AreaResampler)
        );

        for (row, col) in [(0, 0), (5, 11), (15, 15)] {
            let expected = macroblock.luma.get(row, col);
            let actual = reconstructed.luma.get(y + row, x + col);
            assert!(
                expected.abs_diff(actual) <= 2,
                "tile {index}: {expected} vs {actual}"
            );
        }
    }
}

#[test]
fn preconditions_are_enforced() {
    let codec = Codec::new();

    let unaligned = Image::filled(Resolution::new(17, 32), Rgb::default());
    assert_eq!(
        codec.code_picture(&unaligned, 1.),
        Err(CodecError::InvalidDimensions {
            width: 17,
            height: 32
        })
    );

    let aligned = Image::filled(Resolution::new(32, 32), Rgb::default());
    assert_eq!(
        codec.code_picture(&aligned, 0.),
        Err(CodecError::InvalidParameter(0.))
    );

    let coded = codec.code_picture(&aligned, 1.).unwrap();
    assert_eq!(
        codec.reconstruct_picture(Resolution::new(64, 64), &coded[..3], 1.),
        Err(CodecError::LengthMismatch {
            expected: 16,
            actual: 3
        })
    );
}

#[test]
fn coarser_quality_loses_more() {
    let resolution = Resolution::new(64, 64);
    let image = noisy_image(resolution, 9);
    let codec = Codec::new();

    let quality = |p: f64| {
        let coded = codec.code_picture(&image, p).unwrap();
        let zeros: usize = coded.iter().map(|mb| mb.zero_count()).sum();
        let reconstructed =
            Image::from(&codec.reconstruct_picture(resolution, &coded, p).unwrap());

        (psnr(&image, &reconstructed, 255.).unwrap(), zeros)
    };

    let (fine_psnr, fine_zeros) = quality(0.5);
    let (coarse_psnr, coarse_zeros) = quality(8.);

    assert!(fine_psnr > coarse_psnr, "{fine_psnr} <= {coarse_psnr}");
    assert!(fine_zeros <= coarse_zeros);
    assert!(fine_psnr > 25.);
}

#[test]
fn resamplers_are_interchangeable() {
    let resolution = Resolution::new(32, 32);
    let image = noisy_image(resolution, 3);

    for resampler in [ResamplerKind::Area, ResamplerKind::Bilinear] {
        let codec = Codec::with_options(CodecOptions {
            resampler,
            parallel: false,
        });
        let coded = codec.code_picture(&image, 1.).unwrap();
        let reconstructed = codec.reconstruct_picture(resolution, &coded, 1.).unwrap();

        assert_eq!(reconstructed.resolution, resolution);
        let rgb = Image::from(&reconstructed);
        assert!(psnr(&image, &rgb, 255.).unwrap() > 20.);
    }
}

#[test]
fn custom_quantizer_is_used() {
    let resolution = Resolution::new(16, 16);
    let image = noisy_image(resolution, 4);
    let coarse = Codec::new().with_quantizer(Quantizer::new([[255; 8]; 8]));

    let coded = coarse.code_picture(&image, 4.).unwrap();
    let summary = summarise_encoding(resolution, &coded).unwrap();

    assert!(summary.rows[0][0].luma > 90.);
}

#[test]
fn transform_is_invertible_for_random_blocks() {
    let dct = DiscreteCosineTransformer::<8>::new();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..100 {
        let mut block = [[0.; 8]; 8];
        block
            .iter_mut()
            .flatten()
            .for_each(|v| *v = rng.gen_range(-1e3..1e3));
        let restored = dct.inverse(&dct.forward(&block));

        for (a, b) in block.iter().flatten().zip(restored.iter().flatten()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }
}

#[test]
fn dequantizing_twice_does_not_drift() {
    let quantizer = Quantizer::default();
    let p = QualityParameter::new(2.).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let mut block = [[0.; 8]; 8];
    block
        .iter_mut()
        .flatten()
        .for_each(|v| *v = rng.gen_range(-500.0..500.0));

    let once = quantizer.dequantize(&quantizer.quantize(&block, p), p);
    let twice = quantizer.dequantize(&quantizer.quantize(&once, p), p);

    for (a, b) in once.iter().flatten().zip(twice.iter().flatten()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }
}

#[test]
fn ppm_files_feed_the_codec() {
    let resolution = Resolution::new(32, 16);
    let image = labelled_tiles(resolution);
    let decoded = decode_ppm(&encode_ppm(&image)).unwrap();
    let codec = Codec::new();

    let coded = codec.code_picture(&decoded, 1.).unwrap();
    let reconstructed: YCbCrImage = codec.reconstruct_picture(resolution, &coded, 1.).unwrap();

    assert_eq!(reconstructed.luma.get(0, 0), 8);
    assert_eq!(reconstructed.luma.get(0, 16), 21);
}
