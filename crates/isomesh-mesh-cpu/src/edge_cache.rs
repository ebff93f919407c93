//! Two-layer cache of edge vertices.
//!
//! Holds, for the layer being swept and the one below it, the vertex id generated for each of
//! the 12 edges of each cell. Memory is `2 * 12 * cx * cy` slots regardless of depth.

use crate::constants::CUBE_EDGES;
use crate::sink::VertexId;
use crate::tables::{SHARED_WITH_NEXT_I, SHARED_WITH_NEXT_J, SHARED_WITH_NEXT_K};

pub struct LayerEdgeCache {
    cx: usize,
    cy: usize,
    slots: Vec<Option<VertexId>>,
    parity: usize,
}

impl LayerEdgeCache {
    /// Cache for a grid with `cx * cy` cells per layer.
    pub fn new(cx: usize, cy: usize) -> Self {
        Self {
            cx,
            cy,
            slots: vec![None; 2 * cx * cy * CUBE_EDGES],
            parity: 0,
        }
    }

    /// Flat slot index; every other accessor goes through here.
    #[inline]
    pub fn edge_slot(&self, parity: usize, i: usize, j: usize, edge: u8) -> usize {
        debug_assert!(parity < 2 && i < self.cx && j < self.cy);
        debug_assert!((edge as usize) < CUBE_EDGES);
        ((parity * self.cy + j) * self.cx + i) * CUBE_EDGES + edge as usize
    }

    #[inline]
    fn layer_len(&self) -> usize {
        self.cx * self.cy * CUBE_EDGES
    }

    /// Buffer half holding layer `k`.
    #[inline]
    pub fn parity(&self) -> usize {
        self.parity
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Makes layer `k` current: its top edges from layer `k - 1` become its bottom edges and
    /// every other slot is emptied.
    pub fn begin_layer(&mut self, k: usize) {
        let cur = k & 1;
        let prev = cur ^ 1;
        let len = self.layer_len();
        self.slots[cur * len..(cur + 1) * len].fill(None);
        if k > 0 {
            for j in 0..self.cy {
                for i in 0..self.cx {
                    for &(top, bottom) in &SHARED_WITH_NEXT_K {
                        let from = self.edge_slot(prev, i, j, top);
                        let to = self.edge_slot(cur, i, j, bottom);
                        self.slots[to] = self.slots[from];
                    }
                }
            }
        }
        self.parity = cur;
    }

    /// Vertex already assigned to `edge` of cell `(i, j)` in the current layer.
    #[inline]
    pub fn get(&self, i: usize, j: usize, edge: u8) -> Option<VertexId> {
        self.slots[self.edge_slot(self.parity, i, j, edge)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, edge: u8, id: VertexId) {
        let s = self.edge_slot(self.parity, i, j, edge);
        self.slots[s] = Some(id);
    }

    /// Hands the vertices of edges shared with the `+i` and `+j` neighbours to those cells.
    pub fn propagate(&mut self, i: usize, j: usize, verts: &[Option<VertexId>; CUBE_EDGES]) {
        if i + 1 < self.cx {
            for &(here, there) in &SHARED_WITH_NEXT_I {
                if let Some(id) = verts[here as usize] {
                    self.set(i + 1, j, there, id);
                }
            }
        }
        if j + 1 < self.cy {
            for &(here, there) in &SHARED_WITH_NEXT_J {
                if let Some(id) = verts[here as usize] {
                    self.set(i, j + 1, there, id);
                }
            }
        }
    }
}
