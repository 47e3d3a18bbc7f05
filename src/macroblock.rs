//! Picture > slice > macroblock > coding block decomposition.

use crate::{
    colors::{Rgb, YCbCr},
    dct::{Block, BLOCK_SIZE},
    image::{Image, Plane, Resolution, MACROBLOCK_SIZE},
    resample::Resampler,
};

/// Number of coding blocks in a macroblock: four luma quadrants, Cb, Cr.
pub const BLOCKS_PER_MACROBLOCK: usize = 6;

/// Position of a macroblock in the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub row: usize,
    pub column: usize,
}

impl TileAddress {
    /// Raster order: left to right, top to bottom.
    pub fn from_index(index: usize, tiles_per_row: usize) -> Self {
        Self {
            row: index / tiles_per_row,
            column: index % tiles_per_row,
        }
    }

    pub fn index(&self, tiles_per_row: usize) -> usize {
        self.row * tiles_per_row + self.column
    }

    /// Top-left pixel of the tile as (x, y).
    pub fn pixel_offset(&self) -> (usize, usize) {
        (self.column * MACROBLOCK_SIZE, self.row * MACROBLOCK_SIZE)
    }
}

/// A full-width horizontal band of the picture, at most [`MACROBLOCK_SIZE`]
/// rows high.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    pub index: usize,
    rows: &'a [Vec<Rgb>],
}

impl<'a> Slice<'a> {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// A 16x16 luma tile with its two chroma tiles already reduced to 8x8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macroblock {
    pub luma: Plane,
    pub cb: Plane,
    pub cr: Plane,
}

impl Macroblock {
    /// Splits the macroblock into its coding blocks: the luma quadrants in
    /// row-major order (top-left, top-right, bottom-left, bottom-right),
    /// then Cb, then Cr.
    pub fn to_blocks(&self) -> [Block<f64>; BLOCKS_PER_MACROBLOCK] {
        let quadrant = |row_offset: usize, col_offset: usize| {
            plane_block(&self.luma, row_offset, col_offset)
        };

        [
            quadrant(0, 0),
            quadrant(0, BLOCK_SIZE),
            quadrant(BLOCK_SIZE, 0),
            quadrant(BLOCK_SIZE, BLOCK_SIZE),
            plane_block(&self.cb, 0, 0),
            plane_block(&self.cr, 0, 0),
        ]
    }
}

fn plane_block(plane: &Plane, row_offset: usize, col_offset: usize) -> Block<f64> {
    let mut block = [[0.; BLOCK_SIZE]; BLOCK_SIZE];

    for (row, block_row) in block.iter_mut().enumerate() {
        for (col, value) in block_row.iter_mut().enumerate() {
            *value = plane.get(row_offset + row, col_offset + col) as f64;
        }
    }

    block
}

/// Cuts the picture into consecutive bands, top to bottom. The last band is
/// shorter when the height is not a multiple of [`MACROBLOCK_SIZE`].
pub fn image_to_slices(image: &Image) -> impl Iterator<Item = Slice<'_>> {
    image
        .pixels
        .chunks(MACROBLOCK_SIZE)
        .enumerate()
        .map(|(index, rows)| Slice { index, rows })
}

/// Cuts a slice into macroblocks, left to right. Only whole 16x16 tiles are
/// produced: a short final slice yields nothing and a partial tile at the
/// right edge is skipped.
pub fn slice_to_macroblocks(slice: &Slice<'_>, resampler: &dyn Resampler) -> Vec<Macroblock> {
    if slice.height() != MACROBLOCK_SIZE {
        return Vec::new();
    }

    (0..slice.width() / MACROBLOCK_SIZE)
        .map(|column| tile_to_macroblock(slice.rows, column * MACROBLOCK_SIZE, resampler))
        .collect()
}

/// Extracts the macroblock at `address` directly, without walking slices.
/// The picture must be macroblock aligned.
pub fn extract_macroblock(
    image: &Image,
    address: TileAddress,
    resampler: &dyn Resampler,
) -> Macroblock {
    let (x, y) = address.pixel_offset();

    tile_to_macroblock(&image.pixels[y..y + MACROBLOCK_SIZE], x, resampler)
}

/// Every macroblock of an aligned picture, in raster order.
pub fn image_to_macroblocks(image: &Image, resampler: &dyn Resampler) -> Vec<Macroblock> {
    let resolution: Resolution = image.resolution;

    (0..resolution.macroblock_count())
        .map(|index| TileAddress::from_index(index, resolution.tiles_per_row()))
        .map(|address| extract_macroblock(image, address, resampler))
        .collect()
}

fn tile_to_macroblock(rows: &[Vec<Rgb>], x: usize, resampler: &dyn Resampler) -> Macroblock {
    let converted: Vec<Vec<YCbCr>> = rows
        .iter()
        .map(|row| row[x..x + MACROBLOCK_SIZE].iter().map(YCbCr::from).collect())
        .collect();
    let component = |get: fn(&YCbCr) -> u8| {
        Plane::from_fn(MACROBLOCK_SIZE, MACROBLOCK_SIZE, |row, col| {
            get(&converted[row][col])
        })
    };

    Macroblock {
        luma: component(|px: &YCbCr| px.y),
        cb: resampler.downsample(&component(|px: &YCbCr| px.cb)),
        cr: resampler.downsample(&component(|px: &YCbCr| px.cr)),
    }
}
