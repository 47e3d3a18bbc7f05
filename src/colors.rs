use crate::algebra::{Matrix3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<&Rgb> for Vec3 {
    fn from(val: &Rgb) -> Self {
        Vec3([val.r as f32, val.g as f32, val.b as f32])
    }
}

impl From<Vec3> for Rgb {
    fn from(value: Vec3) -> Self {
        let [r, g, b] = value.to_u8_saturating();

        Rgb { r, g, b }
    }
}

/// A pixel in the working colour representation: full range (JPEG style)
/// luma with chroma centred on 128.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YCbCr {
    pub y: u8,
    pub cb: u8,
    pub cr: u8,
}

impl YCbCr {
    pub const fn new(y: u8, cb: u8, cr: u8) -> Self {
        Self { y, cb, cr }
    }
}

impl From<&YCbCr> for Vec3 {
    fn from(val: &YCbCr) -> Self {
        Vec3([val.y as f32, val.cb as f32, val.cr as f32])
    }
}

impl From<Vec3> for YCbCr {
    fn from(value: Vec3) -> Self {
        let [y, cb, cr] = value.to_u8_saturating();

        YCbCr { y, cb, cr }
    }
}

const RGB_TO_YCBCR_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [0.299, -0.168736, 0.5],
    [0.587, -0.331264, -0.418688],
    [0.114, 0.5, -0.081312],
);
const CHROMA_OFFSET: Vec3 = Vec3::new(0., 128., 128.);

const YCBCR_TO_RGB_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [1., 1., 1.],
    [0., -0.344136, 1.772],
    [1.402, -0.714136, 0.],
);

impl From<&Rgb> for YCbCr {
    fn from(rgb: &Rgb) -> Self {
        let rgb_vec: Vec3 = rgb.into();

        Self::from(CHROMA_OFFSET + rgb_vec * &RGB_TO_YCBCR_CONVERSION_TABLE)
    }
}

impl From<&YCbCr> for Rgb {
    fn from(ycbcr: &YCbCr) -> Self {
        let vec: Vec3 = ycbcr.into();

        Rgb::from((vec - CHROMA_OFFSET) * &YCBCR_TO_RGB_CONVERSION_TABLE)
    }
}
