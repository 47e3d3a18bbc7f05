//! Chroma resampling strategies.
//!
//! Chroma planes are halved in both directions before coding and doubled
//! again on reconstruction. Neither direction is the inverse of the other.

use std::fmt::Debug;

use crate::image::Plane;

pub trait Resampler: Debug + Send + Sync {
    /// Halves both sides of `plane` (16x16 -> 8x8 for a macroblock).
    fn downsample(&self, plane: &Plane) -> Plane;

    /// Doubles both sides of `plane` (8x8 -> 16x16 for a macroblock).
    fn upsample(&self, plane: &Plane) -> Plane;
}

/// Built-in resamplers, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResamplerKind {
    #[default]
    Area,
    Bilinear,
}

impl ResamplerKind {
    pub fn build(self) -> Box<dyn Resampler> {
        match self {
            ResamplerKind::Area => Box::new(AreaResampler),
            ResamplerKind::Bilinear => Box::new(BilinearResampler),
        }
    }
}

/// Averages every 2x2 neighbourhood on the way down, repeats every sample
/// into a 2x2 square on the way up.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaResampler;

impl Resampler for AreaResampler {
    fn downsample(&self, plane: &Plane) -> Plane {
        box_downsample(plane)
    }

    fn upsample(&self, plane: &Plane) -> Plane {
        Plane::from_fn(plane.width() * 2, plane.height() * 2, |row, col| {
            plane.get(row / 2, col / 2)
        })
    }
}

/// Area averaging on the way down, bilinear interpolation between sample
/// centres on the way up.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearResampler;

impl Resampler for BilinearResampler {
    fn downsample(&self, plane: &Plane) -> Plane {
        box_downsample(plane)
    }

    fn upsample(&self, plane: &Plane) -> Plane {
        let source_coordinate = |target: usize, limit: usize| {
            let position = ((target as f32 + 0.5) / 2. - 0.5).clamp(0., (limit - 1) as f32);
            let low = position.floor() as usize;
            let high = (low + 1).min(limit - 1);

            (low, high, position - low as f32)
        };

        Plane::from_fn(plane.width() * 2, plane.height() * 2, |row, col| {
            let (top, bottom, fy) = source_coordinate(row, plane.height());
            let (left, right, fx) = source_coordinate(col, plane.width());
            let lerp = |a: u8, b: u8, t: f32| a as f32 + (b as f32 - a as f32) * t;

            let upper = lerp(plane.get(top, left), plane.get(top, right), fx);
            let lower = lerp(plane.get(bottom, left), plane.get(bottom, right), fx);

            (upper + (lower - upper) * fy).round().clamp(0., 255.) as u8
        })
    }
}

fn box_downsample(plane: &Plane) -> Plane {
    Plane::from_fn(plane.width() / 2, plane.height() / 2, |row, col| {
        let sum: u16 = [(0, 0), (0, 1), (1, 0), (1, 1)]
            .iter()
            .map(|&(dy, dx)| plane.get(row * 2 + dy, col * 2 + dx) as u16)
            .sum();

        ((sum + 2) / 4) as u8
    })
}
