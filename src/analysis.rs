//! Read-only measurements over pictures and coded pictures.

use std::{collections::HashSet, fmt};

use crate::{
    codec::{count_zeros, CodedMacroblock},
    colors::Rgb,
    dct::BLOCK_SIZE,
    error::{CodecError, Result},
    image::{Image, Resolution},
    macroblock::TileAddress,
};

/// Reported for identical pictures, whose PSNR is unbounded.
pub const IDENTICAL_PSNR: f64 = 100.;

/// Peak signal-to-noise ratio in dB over the RGB channels of two pictures.
pub fn psnr(a: &Image, b: &Image, max_value: f64) -> Result<f64> {
    ensure_same_size(a, b)?;

    let (sum, count) = a
        .pixels
        .iter()
        .flatten()
        .zip(b.pixels.iter().flatten())
        .flat_map(|(x, y)| [(x.r, y.r), (x.g, y.g), (x.b, y.b)])
        .fold((0., 0usize), |(sum, count), (x, y)| {
            let difference = x as f64 - y as f64;
            (sum + difference * difference, count + 1)
        });

    if count == 0 || sum == 0. {
        return Ok(IDENTICAL_PSNR);
    }

    let mse = sum / count as f64;
    Ok(20. * (max_value / mse.sqrt()).log10())
}

/// Channel-wise absolute difference of two pictures.
pub fn difference_image(a: &Image, b: &Image) -> Result<Image> {
    ensure_same_size(a, b)?;

    Ok(Image::from_fn(a.resolution, |row, col| {
        let (x, y) = (&a.pixels[row][col], &b.pixels[row][col]);

        Rgb::new(x.r.abs_diff(y.r), x.g.abs_diff(y.g), x.b.abs_diff(y.b))
    }))
}

/// Number of distinct RGB colours in the picture.
pub fn count_colours(image: &Image) -> usize {
    image.pixels.iter().flatten().collect::<HashSet<_>>().len()
}

fn ensure_same_size(a: &Image, b: &Image) -> Result<()> {
    if a.resolution == b.resolution {
        Ok(())
    } else {
        Err(CodecError::InvalidDimensions {
            width: b.resolution.width,
            height: b.resolution.height,
        })
    }
}

/// Share of zero coefficients in one macroblock, in percent rounded to one
/// decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroCoefficients {
    pub luma: f64,
    pub cb: f64,
    pub cr: f64,
}

impl ZeroCoefficients {
    pub fn of(coded: &CodedMacroblock) -> Self {
        const BLOCK_AREA: usize = BLOCK_SIZE * BLOCK_SIZE;
        let percent = |zeros: usize, total: usize| {
            (1000. * zeros as f64 / total as f64).round() / 10.
        };
        let luma_zeros: usize = coded.luma_blocks().iter().map(count_zeros).sum();

        Self {
            luma: percent(luma_zeros, 4 * BLOCK_AREA),
            cb: percent(count_zeros(coded.cb()), BLOCK_AREA),
            cr: percent(count_zeros(coded.cr()), BLOCK_AREA),
        }
    }
}

impl fmt::Display for ZeroCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.luma, self.cb, self.cr)
    }
}

/// Zero coefficient shares laid out on the macroblock grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroCoefficientSummary {
    pub rows: Vec<Vec<ZeroCoefficients>>,
}

impl ZeroCoefficientSummary {
    pub fn get(&self, address: TileAddress) -> Option<&ZeroCoefficients> {
        self.rows.get(address.row)?.get(address.column)
    }
}

pub fn summarise_encoding(
    resolution: Resolution,
    coded: &[CodedMacroblock],
) -> Result<ZeroCoefficientSummary> {
    resolution.ensure_macroblock_aligned()?;
    let expected = resolution.macroblock_count();
    if coded.len() != expected {
        return Err(CodecError::LengthMismatch {
            expected,
            actual: coded.len(),
        });
    }

    let rows = coded
        .chunks(resolution.tiles_per_row())
        .map(|row| row.iter().map(ZeroCoefficients::of).collect())
        .collect();

    Ok(ZeroCoefficientSummary { rows })
}

impl fmt::Display for ZeroCoefficientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);

        for row in cells {
            let line: Vec<String> = row.iter().map(|cell| format!("{cell:>width$}")).collect();
            writeln!(f, "{}", line.join("  "))?;
        }

        Ok(())
    }
}
