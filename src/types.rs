// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Record shapes returned by the reader.
//!
//! Every type here is a plain value: no type in this module borrows from a
//! cache. Callers can hold, clone, and send these between threads freely
//! (subject only to the reader that produced them, which is not `Sync`).

use crate::ids::{VertexId, NO_CONTRACTION};
use smallvec::SmallVec;

/// A geographic point, already decoded to degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f32,
    pub longitude: f32,
}

/// One vertex's location plus the window into its block's `arcs[]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub latitude: f32,
    pub longitude: f32,
    pub arc_index: u32,
    pub arc_count: u32,
}

/// A single directed-or-bidirectional CH arc.
///
/// `forward_weight` is the cost of traversing from the block-owning vertex to
/// `target`; `backward_weight` the reverse. Either may be `f32::INFINITY` to
/// denote a one-way arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub target: VertexId,
    pub forward_weight: f32,
    pub backward_weight: f32,
    pub forward_contracted_id: Option<VertexId>,
    pub backward_contracted_id: Option<VertexId>,
    pub contracted_direction_bits: u8,
    pub tags_value: u32,
}

impl EdgeData {
    pub(crate) fn decode_contracted_id(raw: VertexId) -> Option<VertexId> {
        if raw == NO_CONTRACTION {
            None
        } else {
            Some(raw)
        }
    }

    pub(crate) fn encode_contracted_id(id: Option<VertexId>) -> VertexId {
        id.unwrap_or(NO_CONTRACTION)
    }

    /// The data a caller would see approaching this arc from `target` instead
    /// of from the block-owning vertex: forward/backward weights and
    /// contracted ids swap.
    ///
    /// `contracted_direction_bits` and `tags_value` are left unchanged; the
    /// writer convention for inverting those fields is not specified (see
    /// Open Questions), and swapping them would be a guess this reader does
    /// not make.
    pub fn inverted(&self) -> EdgeData {
        EdgeData {
            target: self.target,
            forward_weight: self.backward_weight,
            backward_weight: self.forward_weight,
            forward_contracted_id: self.backward_contracted_id,
            backward_contracted_id: self.forward_contracted_id,
            contracted_direction_bits: self.contracted_direction_bits,
            tags_value: self.tags_value,
        }
    }
}

/// A block of up to `blockSize` consecutive vertices and their outgoing arcs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub vertices: Vec<Vertex>,
    pub arcs: Vec<EdgeData>,
}

/// Intermediate geometry of one arc, in on-disk order. Empty means the arc
/// exists but has no intermediate points, which is distinct from the arc not
/// existing at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline(pub SmallVec<[Point; 4]>);

impl Polyline {
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shape block parallel to a `Block`: `arcs[i]` is the polyline for
/// `Block::arcs[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeBlock {
    pub arcs: Vec<Polyline>,
}

/// The vertex ids whose coordinates fall inside one map tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    pub vertices: Vec<VertexId>,
}

/// A geographic bounding box, inclusive of its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn new(
        min_latitude: f64,
        min_longitude: f64,
        max_latitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        }
    }
}
