//! Synthetic and file-backed field sources selected from configuration.

use std::f64::consts::TAU;
use std::path::PathBuf;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use crate::{FieldBuf, FieldError, raw};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldSource {
    /// `radius - distance(center)`: positive inside the ball.
    Sphere {
        #[serde(default)]
        center: Option<[f64; 3]>,
        #[serde(default = "default_radius")]
        radius: f64,
    },
    /// Triply periodic gyroid, one period every `period` samples.
    Gyroid {
        #[serde(default = "default_period")]
        period: f64,
    },
    /// OpenSimplex2 noise in [-1, 1].
    Noise {
        #[serde(default = "default_seed")]
        seed: i32,
        #[serde(default = "default_frequency")]
        frequency: f32,
    },
    /// Flat little-endian f32 samples in x-fastest order.
    Raw { path: PathBuf },
}

fn default_radius() -> f64 {
    8.0
}
fn default_period() -> f64 {
    16.0
}
fn default_seed() -> i32 {
    1337
}
fn default_frequency() -> f32 {
    0.08
}

impl Default for FieldSource {
    fn default() -> Self {
        FieldSource::Sphere {
            center: None,
            radius: default_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FieldSpec {
    #[serde(default = "default_dim")]
    pub nx: usize,
    #[serde(default = "default_dim")]
    pub ny: usize,
    #[serde(default = "default_dim")]
    pub nz: usize,
    #[serde(default)]
    pub source: FieldSource,
}

fn default_dim() -> usize {
    24
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            nx: default_dim(),
            ny: default_dim(),
            nz: default_dim(),
            source: FieldSource::default(),
        }
    }
}

/// Materializes the configured field.
pub fn generate_field(spec: &FieldSpec) -> Result<FieldBuf, FieldError> {
    let (nx, ny, nz) = (spec.nx, spec.ny, spec.nz);
    match &spec.source {
        FieldSource::Sphere { center, radius } => {
            let c = center.unwrap_or([
                (nx as f64 - 1.0) * 0.5,
                (ny as f64 - 1.0) * 0.5,
                (nz as f64 - 1.0) * 0.5,
            ]);
            FieldBuf::from_fn(nx, ny, nz, |i, j, k| {
                let dx = i as f64 - c[0];
                let dy = j as f64 - c[1];
                let dz = k as f64 - c[2];
                (radius - (dx * dx + dy * dy + dz * dz).sqrt()) as f32
            })
        }
        FieldSource::Gyroid { period } => {
            let s = TAU / period.max(f64::EPSILON);
            FieldBuf::from_fn(nx, ny, nz, |i, j, k| {
                let (x, y, z) = (i as f64 * s, j as f64 * s, k as f64 * s);
                (x.sin() * y.cos() + y.sin() * z.cos() + z.sin() * x.cos()) as f32
            })
        }
        FieldSource::Noise { seed, frequency } => {
            let mut noise = FastNoiseLite::with_seed(*seed);
            noise.set_noise_type(Some(NoiseType::OpenSimplex2));
            noise.set_frequency(Some(*frequency));
            FieldBuf::from_fn(nx, ny, nz, |i, j, k| {
                noise.get_noise_3d(i as f32, j as f32, k as f32)
            })
        }
        FieldSource::Raw { path } => raw::load_raw_f32(path, nx, ny, nz),
    }
}
