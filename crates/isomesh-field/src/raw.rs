//! Raw `f32` volume files: no header, little-endian, x fastest.

use std::fs;
use std::path::Path;

use crate::{FieldBuf, FieldError};

pub fn load_raw_f32(path: &Path, nx: usize, ny: usize, nz: usize) -> Result<FieldBuf, FieldError> {
    let bytes = fs::read(path)?;
    let values = decode_le_f32(&bytes)?;
    FieldBuf::from_values(nx, ny, nz, values)
}

pub fn decode_le_f32(bytes: &[u8]) -> Result<Vec<f32>, FieldError> {
    if bytes.len() % 4 != 0 {
        return Err(FieldError::LengthMismatch {
            expected: bytes.len() / 4 * 4,
            actual: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

pub fn encode_le_f32(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_sample() {
        assert!(matches!(
            decode_le_f32(&[0, 0, 128]),
            Err(FieldError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn encode_then_load_from_disk() {
        let values: Vec<f32> = (0..8).map(|i| i as f32 * 0.5 - 1.0).collect();
        let path = std::env::temp_dir().join(format!("isomesh-raw-{}.f32", std::process::id()));
        fs::write(&path, encode_le_f32(&values)).unwrap();
        let buf = load_raw_f32(&path, 2, 2, 2).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(buf.values(), &values[..]);
    }
}
