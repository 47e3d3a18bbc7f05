//! Binary PPM (`P6`) reading and writing.

use thiserror::Error;

use crate::{
    binary::byte_reader::ByteReader,
    colors::Rgb,
    image::{Image, Resolution},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PpmError {
    #[error("file does not look like a PPM file (magic number missing)")]
    MissingSignature,
    #[error("PPM stream ended unexpectedly: {0}")]
    UnexpectedEnd(String),
    #[error("{0} is not a valid unsigned integer")]
    InvalidNumber(&'static str),
    #[error("maxval {0} is not supported, expected a value between 1 and 255")]
    UnsupportedMaxval(u32),
    #[error("{width}x{height} picture is too large to address")]
    TooLarge { width: usize, height: usize },
}

macro_rules! ppm_read_bytes {
    ($read_value:expr, $msg:expr) => {
        match $read_value {
            Some(value) => value,
            None => return Err(PpmError::UnexpectedEnd($msg.to_string())),
        }
    };
}

const PPM_SIGNATURE: &[u8] = b"P6";
const PPM_MAX_VALUE: u32 = 255;

pub fn is_ppm_by_signature(file: &[u8]) -> bool {
    file.starts_with(PPM_SIGNATURE)
}

pub fn decode_ppm(bytes: &[u8]) -> Result<Image, PpmError> {
    let mut reader = ByteReader::new(bytes);
    let signature = ppm_read_bytes!(reader.read_ppm_symbol(), "expected magic number");

    if signature != PPM_SIGNATURE {
        return Err(PpmError::MissingSignature);
    }

    let width = read_ascii_integer(&mut reader, "width")? as usize;
    let height = read_ascii_integer(&mut reader, "height")? as usize;
    let max_color_value = read_ascii_integer(&mut reader, "maxval")?;

    if max_color_value == 0 || max_color_value > PPM_MAX_VALUE {
        return Err(PpmError::UnsupportedMaxval(max_color_value));
    }

    reader.skip_single_whitespace();
    let expected_pixel_bytes_size = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(PpmError::TooLarge { width, height })?;
    let pixel_bytes = ppm_read_bytes!(
        reader.read_bytes(expected_pixel_bytes_size),
        format!(
            "expected {} pixel value bytes for {}x{} file, only found {}",
            expected_pixel_bytes_size,
            width,
            height,
            reader.number_of_bytes_left()
        )
    );

    let scale = |value: u8| {
        if max_color_value == PPM_MAX_VALUE {
            value
        } else {
            ((value as u32 * PPM_MAX_VALUE + max_color_value / 2) / max_color_value).min(255) as u8
        }
    };
    Ok(Image::from_fn(Resolution::new(width, height), |row, col| {
        let start = (row * width + col) * 3;
        let rgb = &pixel_bytes[start..start + 3];

        Rgb::new(scale(rgb[0]), scale(rgb[1]), scale(rgb[2]))
    }))
}

pub fn encode_ppm(image: &Image) -> Vec<u8> {
    let Resolution { width, height } = image.resolution;
    let mut bytes = format!("P6\n{width} {height}\n{PPM_MAX_VALUE}\n").into_bytes();
    bytes.extend(image.to_bytes());

    bytes
}

fn read_ascii_integer(reader: &mut ByteReader, field_name: &'static str) -> Result<u32, PpmError> {
    let bytes = ppm_read_bytes!(reader.read_ppm_symbol(), format!("expected {field_name}"));

    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.parse::<u32>().ok())
        .ok_or(PpmError::InvalidNumber(field_name))
}
