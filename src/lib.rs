// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! A read-only data source over a single serialized Contraction-Hierarchy
//! (CH) routing graph: vertices, weighted arcs with shortcut bookkeeping,
//! arc polylines, and a tile-indexed spatial lookup, all backed by a
//! seekable stream and fronted by bounded LRU caches.
//!
//! Writing the format is out of scope; see the module docs on `deser` for
//! the wire layout this reader expects.

mod block_index;
mod cache;
pub mod config;
mod deser;
mod edges;
mod error;
mod graph;
mod ids;
mod region_index;
mod tile;
mod types;

#[cfg(any(test, feature = "testutil"))]
pub mod fixture;

pub use config::{BlockIndexConfig, CacheCapacities, ReaderConfig, RegionIndexConfig};
pub use edges::{AdjacencyEdge, AdjacencyIter};
pub use error::{DeserializeCause, Error, Result};
pub use graph::ChGraphReader;
pub use ids::{block_id_of, BlockId, TileId, VertexId, NO_CONTRACTION};
pub use tile::{decode_tile_id, encode_tile_id, tile_range};
pub use types::{Block, BoundingBox, EdgeData, Point, Polyline, Region, ShapeBlock, Vertex};
