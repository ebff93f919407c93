//! Per-face line contouring.
//!
//! Each cube face is treated as a ring of four corners. Ring edge `r` joins ring corners `r`
//! and `r + 1`, so a segment is a pair of ring edge positions and maps to cube edges through
//! [`CubeFace::edges`].

use isomesh_field::Axis;

use crate::constants::CUBE_CORNERS;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CubeFace {
    NegX = 0,
    PosX = 1,
    NegY = 2,
    PosY = 3,
    NegZ = 4,
    PosZ = 5,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::NegX,
        CubeFace::PosX,
        CubeFace::NegY,
        CubeFace::PosY,
        CubeFace::NegZ,
        CubeFace::PosZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cube corners in ring order.
    #[inline]
    pub fn corners(self) -> [usize; 4] {
        match self {
            CubeFace::NegX => [0, 3, 7, 4],
            CubeFace::PosX => [1, 2, 6, 5],
            CubeFace::NegY => [0, 1, 5, 4],
            CubeFace::PosY => [3, 2, 6, 7],
            CubeFace::NegZ => [0, 1, 2, 3],
            CubeFace::PosZ => [4, 5, 6, 7],
        }
    }

    /// Cube edges in ring order.
    #[inline]
    pub fn edges(self) -> [u8; 4] {
        match self {
            CubeFace::NegX => [3, 11, 7, 8],
            CubeFace::PosX => [1, 10, 5, 9],
            CubeFace::NegY => [0, 9, 4, 8],
            CubeFace::PosY => [2, 10, 6, 11],
            CubeFace::NegZ => [0, 1, 2, 3],
            CubeFace::PosZ => [4, 5, 6, 7],
        }
    }

    /// Faces on the high side of a cell. The low-side neighbour owns them, except on the
    /// grid's last cell along that axis.
    #[inline]
    pub fn is_high_side(self) -> bool {
        matches!(self, CubeFace::PosX | CubeFace::PosY | CubeFace::PosZ)
    }

    /// Axis the face is perpendicular to.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            CubeFace::NegX | CubeFace::PosX => Axis::X,
            CubeFace::NegY | CubeFace::PosY => Axis::Y,
            CubeFace::NegZ | CubeFace::PosZ => Axis::Z,
        }
    }

    /// 4-bit inside mask of this face, bit `r` for ring corner `r`.
    #[inline]
    pub fn mask(self, cube_index: u8) -> u8 {
        let mut m = 0u8;
        for (r, &c) in self.corners().iter().enumerate() {
            if cube_index & (1 << c) != 0 {
                m |= 1 << r;
            }
        }
        m
    }

    /// This face's samples in ring order.
    #[inline]
    pub fn samples(self, corners: &[f32; CUBE_CORNERS]) -> [f32; 4] {
        self.corners().map(|c| corners[c])
    }
}

/// Tag carried by a contour segment: the face index in the high bits, the face mask below.
#[inline]
pub fn line_tag(face: CubeFace, mask: u8) -> i32 {
    ((face.index() as i32) << 4) | mask as i32
}

/// Zero, one or two segments on one face, as pairs of ring edge positions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FaceSegments {
    len: usize,
    pairs: [[usize; 2]; 2],
}

impl FaceSegments {
    const NONE: FaceSegments = FaceSegments {
        len: 0,
        pairs: [[0; 2]; 2],
    };

    fn one(a: usize, b: usize) -> Self {
        Self {
            len: 1,
            pairs: [[a, b], [0, 0]],
        }
    }

    fn two(first: [usize; 2], second: [usize; 2]) -> Self {
        Self {
            len: 2,
            pairs: [first, second],
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[[usize; 2]] {
        &self.pairs[..self.len]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Contour segments for a face with inside mask `mask` and ring-ordered `samples`.
///
/// The diagonal masks 5 and 10 are resolved by the face centre: the mean of the four samples
/// is classified against `threshold` and compared with ring corner 0. When they agree the
/// centre is connected to corner 0, so the other two corners are cut off individually.
/// Returns `None` for a value outside `0..16`.
pub fn face_segments(mask: u8, samples: &[f32; 4], threshold: f32) -> Option<FaceSegments> {
    let segs = match mask {
        0 | 15 => FaceSegments::NONE,
        1 | 14 => FaceSegments::one(3, 0),
        2 | 13 => FaceSegments::one(0, 1),
        4 | 11 => FaceSegments::one(1, 2),
        8 | 7 => FaceSegments::one(2, 3),
        3 | 12 => FaceSegments::one(1, 3),
        6 | 9 => FaceSegments::one(0, 2),
        5 | 10 => {
            let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / 4.0;
            let centre_inside = mean > threshold as f64;
            let reference_inside = mask & 1 != 0;
            if centre_inside == reference_inside {
                FaceSegments::two([0, 1], [2, 3])
            } else {
                FaceSegments::two([3, 0], [1, 2])
            }
        }
        _ => return None,
    };
    Some(segs)
}
