use std::fs;

use anyhow::{ensure, Context};
use clap::Parser;
use log::info;

use mpic::{
    analysis::{difference_image, psnr, summarise_encoding},
    cli::Arguments,
    codec::Codec,
    image::Image,
    ppm::{decode_ppm, encode_ppm, is_ppm_by_signature},
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();

    let file = fs::read(&args.input_file)
        .with_context(|| format!("error reading input file {}", args.input_file.display()))?;
    ensure!(
        is_ppm_by_signature(&file),
        "unrecognized input file format {}, expected binary PPM",
        args.input_file.display()
    );
    let image = decode_ppm(&file)
        .with_context(|| format!("error parsing {}", args.input_file.display()))?;
    info!(
        "read {}x{} picture from {}",
        image.resolution.width,
        image.resolution.height,
        args.input_file.display()
    );

    let codec = Codec::with_options(args.codec_options());
    let coded = codec.code_picture(&image, args.p)?;
    info!("coded {} macroblocks with p = {}", coded.len(), args.p);

    let reconstructed = Image::from(&codec.reconstruct_picture(image.resolution, &coded, args.p)?);
    fs::write(&args.output_file, encode_ppm(&reconstructed))
        .with_context(|| format!("error writing {}", args.output_file.display()))?;
    info!("wrote reconstruction to {}", args.output_file.display());

    println!("PSNR: {:.2} dB", psnr(&image, &reconstructed, 255.)?);

    if args.summary {
        println!("zero coefficients per macroblock (luma %, cb %, cr %):");
        print!("{}", summarise_encoding(image.resolution, &coded)?);
    }

    if let Some(path) = &args.difference {
        let difference = difference_image(&image, &reconstructed)?;
        fs::write(path, encode_ppm(&difference))
            .with_context(|| format!("error writing {}", path.display()))?;
        info!("wrote difference picture to {}", path.display());
    }

    Ok(())
}
