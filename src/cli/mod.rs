use std::path::PathBuf;

use clap::Parser;

use crate::{codec::CodecOptions, resample::ResamplerKind};

/// Codes a PPM picture as an MPEG-1 style intra picture and writes the
/// reconstruction back out.
///
/// mpic input.ppm out.ppm -p 2
/// mpic input.ppm out.ppm --resampler bilinear --summary
#[derive(Debug, Parser)]
#[command(name = "mpic", version, about)]
pub struct Arguments {
    /// Binary PPM (P6) picture, both sides multiples of 16
    pub input_file: PathBuf,

    /// Where to write the reconstructed picture (P6)
    pub output_file: PathBuf,

    /// Quality parameter, larger is coarser
    #[arg(short, long = "quality", default_value_t = 1.0)]
    pub p: f64,

    /// Chroma resampling strategy
    #[arg(long, value_enum, default_value_t = ResamplerKind::Area)]
    pub resampler: ResamplerKind,

    /// Code macroblocks on the current thread only
    #[arg(long)]
    pub sequential: bool,

    /// Print the share of zero coefficients per macroblock
    #[arg(long)]
    pub summary: bool,

    /// Also write the absolute difference picture (P6)
    #[arg(long, value_name = "FILE")]
    pub difference: Option<PathBuf>,
}

impl Arguments {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            resampler: self.resampler,
            parallel: !self.sequential,
        }
    }
}
