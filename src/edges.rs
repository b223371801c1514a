// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! The adjacency iterator returned by `ChGraphReader::edges`
//! `getEdges(v)`).
//!
//! The source system's enumerator surface (`moveNext`/`current`/`reset`) is
//! expressed here as an ordinary, restartable `Iterator`: `next()` plays the
//! role of `moveNext` + `current`, and `reset()` rewinds it without
//! re-touching the caches.

use crate::ids::VertexId;
use crate::types::{EdgeData, Polyline};

/// One outgoing arc of the vertex an `AdjacencyIter` was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyEdge {
    pub neighbour: VertexId,
    pub edge_data: EdgeData,
    pub intermediates: Polyline,
}

impl AdjacencyEdge {
    /// Always `false`: arcs reached through `ChGraphReader::edges` are read
    /// directly off the owning vertex's block, never synthesized by
    /// reversing a neighbour's arc.
    pub fn is_inverted(&self) -> bool {
        false
    }

    /// `edge_data` as it would read approaching from `neighbour` instead.
    pub fn inverted_edge_data(&self) -> EdgeData {
        self.edge_data.inverted()
    }
}

/// A lazy, finite, restartable sequence of a vertex's outgoing arcs.
///
/// All arcs are materialized up front when the iterator is built (the block
/// and shape-block fetches that back it are themselves cached), so `reset`
/// is a cheap index rewind rather than a re-fetch.
#[derive(Debug, Clone)]
pub struct AdjacencyIter {
    edges: Vec<AdjacencyEdge>,
    position: usize,
}

impl AdjacencyIter {
    pub(crate) fn new(edges: Vec<AdjacencyEdge>) -> Self {
        Self { edges, position: 0 }
    }

    /// Rewinds to the first arc without discarding or re-fetching anything.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Iterator for AdjacencyIter {
    type Item = AdjacencyEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.edges.get(self.position)?.clone();
        self.position += 1;
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.edges.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}
