//! A minimal MPEG-1 style intra picture codec.
//!
//! A picture is cut into 16x16 macroblocks, each carrying four 8x8 luma
//! blocks and one 8x8 block per subsampled chroma plane. Every block is
//! transformed with an orthonormal DCT and quantized against the MPEG-1
//! default intra matrix scaled by a quality parameter `p`. Decoding reverses
//! the steps and pastes the tiles back in raster order.
//!
//! ```no_run
//! use mpic::{codec::Codec, colors::Rgb, image::{Image, Resolution}};
//!
//! let image = Image::filled(Resolution::new(32, 32), Rgb::new(30, 60, 90));
//! let codec = Codec::new();
//! let coded = codec.code_picture(&image, 1.0)?;
//! let reconstructed = codec.reconstruct_picture(image.resolution, &coded, 1.0)?;
//! let rgb = Image::from(&reconstructed);
//! # Ok::<(), mpic::error::CodecError>(())
//! ```

pub mod algebra;
pub mod analysis;
pub mod binary;
pub mod cli;
pub mod codec;
pub mod colors;
pub mod dct;
pub mod error;
pub mod image;
pub mod macroblock;
pub mod ppm;
pub mod quantization;
pub mod resample;

pub use codec::{CodedMacroblock, CodedPicture, Codec, CodecOptions};
pub use error::{CodecError, Result};
