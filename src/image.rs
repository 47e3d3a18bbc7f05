use crate::{
    colors::{Rgb, YCbCr},
    error::{CodecError, Result},
};

/// Side of the square tile covered by one macroblock.
pub const MACROBLOCK_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Fails unless both sides are positive multiples of [`MACROBLOCK_SIZE`].
    pub fn ensure_macroblock_aligned(&self) -> Result<()> {
        let aligned = |side: usize| side > 0 && side % MACROBLOCK_SIZE == 0;

        if aligned(self.width) && aligned(self.height) {
            Ok(())
        } else {
            Err(CodecError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn tiles_per_row(&self) -> usize {
        self.width / MACROBLOCK_SIZE
    }

    pub fn tiles_per_column(&self) -> usize {
        self.height / MACROBLOCK_SIZE
    }

    pub fn macroblock_count(&self) -> usize {
        self.tiles_per_row() * self.tiles_per_column()
    }
}

/// An RGB picture as handed over by the file readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub resolution: Resolution,
    pub pixels: Vec<Vec<Rgb>>,
}

impl Image {
    pub fn new(resolution: Resolution, pixels: Vec<Vec<Rgb>>) -> Self {
        debug_assert_eq!(pixels.len(), resolution.height);
        debug_assert!(pixels.iter().all(|row| row.len() == resolution.width));

        Self { resolution, pixels }
    }

    pub fn filled(resolution: Resolution, colour: Rgb) -> Self {
        Self::from_fn(resolution, |_, _| colour)
    }

    /// Builds an image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(resolution: Resolution, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let pixels = (0..resolution.height)
            .map(|row| (0..resolution.width).map(|col| f(row, col)).collect())
            .collect();

        Self { resolution, pixels }
    }

    /// Fails when the pixel grid does not have the shape `resolution`
    /// claims. The error carries the grid's own height and the length of
    /// its first mismatching row.
    pub fn ensure_pixel_grid(&self) -> Result<()> {
        let Resolution { width, height } = self.resolution;
        let mismatched_row = self.pixels.iter().find(|row| row.len() != width);

        match mismatched_row {
            None if self.pixels.len() == height => Ok(()),
            _ => Err(CodecError::InvalidDimensions {
                width: mismatched_row.map_or(width, Vec::len),
                height: self.pixels.len(),
            }),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|line| line.iter().flat_map(|px| [px.r, px.g, px.b]))
            .collect()
    }
}

/// A single 8-bit sample plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Plane {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0; width * height],
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let samples = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();

        Self {
            width,
            height,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.samples[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.samples[row * self.width..(row + 1) * self.width]
    }

    /// Copies `src` so that its top-left sample lands at (`x`, `y`).
    /// Samples falling outside this plane are dropped.
    pub fn paste(&mut self, src: &Plane, x: usize, y: usize) {
        let rows = src.height.min(self.height.saturating_sub(y));
        let cols = src.width.min(self.width.saturating_sub(x));

        for row in 0..rows {
            let start = (y + row) * self.width + x;
            self.samples[start..start + cols].copy_from_slice(&src.row(row)[..cols]);
        }
    }
}

/// A picture in the working colour representation, one plane per component.
/// Chroma planes are stored at full resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCbCrImage {
    pub resolution: Resolution,
    pub luma: Plane,
    pub cb: Plane,
    pub cr: Plane,
}

impl YCbCrImage {
    /// An all-zero picture, the starting canvas for reconstruction.
    pub fn blank(resolution: Resolution) -> Self {
        let plane = Plane::blank(resolution.width, resolution.height);

        Self {
            resolution,
            luma: plane.clone(),
            cb: plane.clone(),
            cr: plane,
        }
    }

    /// Merges three equally sized planes into one picture.
    pub fn merge(luma: Plane, cb: Plane, cr: Plane) -> Self {
        debug_assert_eq!((luma.width, luma.height), (cb.width, cb.height));
        debug_assert_eq!((luma.width, luma.height), (cr.width, cr.height));

        Self {
            resolution: Resolution::new(luma.width, luma.height),
            luma,
            cb,
            cr,
        }
    }

    pub fn pixel(&self, row: usize, col: usize) -> YCbCr {
        YCbCr::new(
            self.luma.get(row, col),
            self.cb.get(row, col),
            self.cr.get(row, col),
        )
    }

    pub fn paste(&mut self, tile: &YCbCrImage, x: usize, y: usize) {
        self.luma.paste(&tile.luma, x, y);
        self.cb.paste(&tile.cb, x, y);
        self.cr.paste(&tile.cr, x, y);
    }
}

impl From<&Image> for YCbCrImage {
    fn from(value: &Image) -> Self {
        let Resolution { width, height } = value.resolution;
        let converted: Vec<YCbCr> = value.pixels.iter().flatten().map(YCbCr::from).collect();

        YCbCrImage::merge(
            Plane::from_fn(width, height, |row, col| converted[row * width + col].y),
            Plane::from_fn(width, height, |row, col| converted[row * width + col].cb),
            Plane::from_fn(width, height, |row, col| converted[row * width + col].cr),
        )
    }
}

impl From<&YCbCrImage> for Image {
    fn from(value: &YCbCrImage) -> Self {
        Image::from_fn(value.resolution, |row, col| {
            Rgb::from(&value.pixel(row, col))
        })
    }
}
