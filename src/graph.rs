// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! The public surface of the crate: vertex lookup, edge lookup (single and
//! adjacency), shape lookup, and bounding-box vertex enumeration.
//!
//! `ChGraphReader` owns its stream and all three caches exclusively and is
//! not `Sync`; correctness only requires that one reader give correct
//! results under serial access from its single owning thread, and every
//! method here is blocking and synchronous to match.

use crate::block_index::BlockLocationIndex;
use crate::cache::BoundedCache;
use crate::config::ReaderConfig;
use crate::deser;
use crate::edges::{AdjacencyEdge, AdjacencyIter};
use crate::error::Error;
use crate::ids::{block_id_of, BlockId, TileId, VertexId};
use crate::region_index::RegionIndex;
use crate::tile::tile_range;
use crate::types::{Block, BoundingBox, EdgeData, Polyline, Region, ShapeBlock};
use positioned_io::ReadAt;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// A read-only data source over a single serialized CH routing graph.
///
/// `S` is the backing stream (anything implementing `positioned_io::ReadAt`:
/// a `File`, an in-memory `Cursor<Vec<u8>>`, a memory map). `T` is the
/// externally-owned tag-collection index: the reader carries it by
/// value but never inspects it; profile and tag interpretation live outside
/// this crate entirely.
pub struct ChGraphReader<S, T = ()> {
    stream: RefCell<S>,
    block_location_index: BlockLocationIndex,
    region_index: RegionIndex,
    block_cache: BoundedCache<BlockId, Rc<Block>>,
    shape_cache: BoundedCache<BlockId, Rc<ShapeBlock>>,
    region_cache: BoundedCache<TileId, Rc<Region>>,
    config: ReaderConfig,
    tag_index: T,
}

impl<S, T> ChGraphReader<S, T>
where
    S: ReadAt,
{
    pub fn new(stream: S, config: ReaderConfig, tag_index: T) -> Result<Self, Error> {
        let block_location_index = BlockLocationIndex::new(
            config.block_index.block_size,
            config.block_index.start_of_blocks,
            config.block_index.block_location_index.clone(),
            config.block_index.start_of_shapes,
            config.block_index.shape_location_index.clone(),
        );
        let region_index = RegionIndex::new(
            config.region_index.start_of_regions,
            &config.region_index.location_index,
            &config.region_index.region_ids,
        )?;
        Ok(Self {
            stream: RefCell::new(stream),
            block_cache: BoundedCache::new(config.block_cache_capacity()),
            shape_cache: BoundedCache::new(config.shape_cache_capacity()),
            region_cache: BoundedCache::new(config.region_cache_capacity()),
            block_location_index,
            region_index,
            config,
            tag_index,
        })
    }

    /// The externally-owned tag-collection index, unchanged and opaque.
    pub fn tag_index(&self) -> &T {
        &self.tag_index
    }

    fn block_size(&self) -> u32 {
        self.block_location_index.block_size()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn get_block(&self, block_id: BlockId) -> Result<Option<Rc<Block>>, Error> {
        if let Some(cached) = self.block_cache.try_get(&block_id) {
            tracing::trace!(block_id, "block cache hit");
            return Ok(Some(cached));
        }
        let Some((offset, length)) = self.block_location_index.resolve_block(block_id) else {
            return Ok(None);
        };
        tracing::debug!(block_id, offset, length, "block cache miss");
        let block = Rc::new(deser::read_block(&*self.stream.borrow(), offset, length)?);
        self.block_cache.insert(block_id, block.clone());
        Ok(Some(block))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn get_shape_block(&self, block_id: BlockId) -> Result<Option<Rc<ShapeBlock>>, Error> {
        if let Some(cached) = self.shape_cache.try_get(&block_id) {
            tracing::trace!(block_id, "shape cache hit");
            return Ok(Some(cached));
        }
        let Some((offset, length)) = self.block_location_index.resolve_shape(block_id) else {
            return Ok(None);
        };
        tracing::debug!(block_id, offset, length, "shape cache miss");
        let shape = Rc::new(deser::read_shape_block(
            &*self.stream.borrow(),
            offset,
            length,
        )?);
        self.shape_cache.insert(block_id, shape.clone());
        Ok(Some(shape))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn get_region(&self, tile_id: TileId) -> Result<Option<Rc<Region>>, Error> {
        if let Some(cached) = self.region_cache.try_get(&tile_id) {
            tracing::trace!(tile_id, "region cache hit");
            return Ok(Some(cached));
        }
        let Some((offset, length)) = self.region_index.locate(tile_id) else {
            return Ok(None);
        };
        tracing::debug!(tile_id, offset, length, "region cache miss");
        let region = Rc::new(deser::read_region(&*self.stream.borrow(), offset, length)?);
        self.region_cache.insert(tile_id, region.clone());
        Ok(Some(region))
    }

    /// `idx = v - BlockId(v)`; `None` when out of the block's actual vertex
    /// count (including when the final block is shorter than `blockSize`).
    fn locate_vertex(&self, block: &Block, block_id: BlockId, v: VertexId) -> Option<usize> {
        let idx = (v - block_id) as usize;
        (idx < block.vertices.len()).then_some(idx)
    }

    /// `getVertex(v)`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn vertex(&self, v: VertexId) -> Result<Option<(f32, f32)>, Error> {
        let block_id = block_id_of(v, self.block_size());
        let Some(block) = self.get_block(block_id)? else {
            return Ok(None);
        };
        let Some(idx) = self.locate_vertex(&block, block_id, v) else {
            return Ok(None);
        };
        let vertex = block.vertices[idx];
        Ok(Some((vertex.latitude, vertex.longitude)))
    }

    /// Scans `owner`'s block for an arc targeting `target`. Returns the
    /// owning block id, the arc's position within the block's `arcs[]` (also
    /// valid as an index into the matching shape block), and the arc data
    /// exactly as stored, never reversed.
    fn find_arc_from_owner(
        &self,
        owner: VertexId,
        target: VertexId,
    ) -> Result<Option<(BlockId, usize, EdgeData)>, Error> {
        let block_id = block_id_of(owner, self.block_size());
        let Some(block) = self.get_block(block_id)? else {
            return Ok(None);
        };
        let Some(idx) = self.locate_vertex(&block, block_id, owner) else {
            return Ok(None);
        };
        let vertex = block.vertices[idx];
        let start = vertex.arc_index as usize;
        let end = start + vertex.arc_count as usize;
        for i in start..end {
            if block.arcs[i].target == target {
                return Ok(Some((block_id, i, block.arcs[i])));
            }
        }
        Ok(None)
    }

    /// The symmetric-edge protocol: search `v1`'s block first, then
    /// fall back to `v2`'s block, because the serialization stores a
    /// directed arc only once, on whichever endpoint owns it.
    fn find_arc(
        &self,
        v1: VertexId,
        v2: VertexId,
    ) -> Result<Option<(BlockId, usize, EdgeData)>, Error> {
        if let Some(found) = self.find_arc_from_owner(v1, v2)? {
            tracing::trace!(v1, v2, "edge found via source block");
            return Ok(Some(found));
        }
        if let Some(found) = self.find_arc_from_owner(v2, v1)? {
            tracing::trace!(v1, v2, "edge found via target-block fallback");
            return Ok(Some(found));
        }
        Ok(None)
    }

    /// `getEdge(v1, v2)`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn edge(&self, v1: VertexId, v2: VertexId) -> Result<Option<EdgeData>, Error> {
        Ok(self.find_arc(v1, v2)?.map(|(_, _, data)| data))
    }

    /// `containsEdge(v1, v2)`.
    pub fn contains_edge(&self, v1: VertexId, v2: VertexId) -> Result<bool, Error> {
        Ok(self.edge(v1, v2)?.is_some())
    }

    /// `getEdgeShape(v1, v2)`. `None` means the edge itself is missing; an
    /// empty (but present) polyline means the edge exists with no
    /// intermediate points.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn edge_shape(&self, v1: VertexId, v2: VertexId) -> Result<Option<Polyline>, Error> {
        let Some((owner_block_id, arc_pos, _)) = self.find_arc(v1, v2)? else {
            return Ok(None);
        };
        let shape = self.get_shape_block(owner_block_id)?;
        let polyline = shape
            .and_then(|s| s.arcs.get(arc_pos).cloned())
            .unwrap_or_default();
        Ok(Some(polyline))
    }

    /// `getEdges(v)`: the adjacency iterator over `v`'s outgoing arcs.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn edges(&self, v: VertexId) -> Result<AdjacencyIter, Error> {
        let block_id = block_id_of(v, self.block_size());
        let Some(block) = self.get_block(block_id)? else {
            return Ok(AdjacencyIter::new(Vec::new()));
        };
        let Some(idx) = self.locate_vertex(&block, block_id, v) else {
            return Ok(AdjacencyIter::new(Vec::new()));
        };
        let vertex = block.vertices[idx];
        let shape = self.get_shape_block(block_id)?;
        let start = vertex.arc_index as usize;
        let end = start + vertex.arc_count as usize;
        let mut out = Vec::with_capacity(end.saturating_sub(start));
        for i in start..end {
            let edge_data = block.arcs[i];
            let intermediates = shape
                .as_ref()
                .and_then(|s| s.arcs.get(i).cloned())
                .unwrap_or_default();
            out.push(AdjacencyEdge {
                neighbour: edge_data.target,
                edge_data,
                intermediates,
            });
        }
        Ok(AdjacencyIter::new(out))
    }

    /// `getEdges(box)`: vertices inside the tile range covering `box`, and
    /// the edges among them, deduplicated per the `v < u` / `u ∉ V` rule.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn edges_in_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<(VertexId, VertexId, EdgeData)>, Error> {
        let tiles = tile_range(self.config.zoom, bbox);
        tracing::debug!(tile_count = tiles.len(), "expanded bounding box to tiles");
        let mut vertex_set: BTreeSet<VertexId> = BTreeSet::new();
        for tile in tiles {
            if let Some(region) = self.get_region(tile)? {
                vertex_set.extend(region.vertices.iter().copied());
            }
        }
        let mut out = Vec::new();
        for &v in &vertex_set {
            for edge in self.edges(v)? {
                let u = edge.neighbour;
                if v < u || !vertex_set.contains(&u) {
                    out.push((v, u, edge.edge_data));
                }
            }
        }
        Ok(out)
    }

    /// `supportsProfile(profile)`.
    pub fn supports_profile(&self, profile: &str) -> bool {
        self.config.profiles.contains(profile)
    }

    /// `addProfile`: unsupported on a read-only source.
    pub fn add_profile(&self, _profile: &str) -> Result<(), Error> {
        Err(Error::Unsupported("addProfile"))
    }

    /// `addRestriction`: unsupported, this format never stores turn
    /// restrictions.
    pub fn add_restriction(&self) -> Result<(), Error> {
        Err(Error::Unsupported("addRestriction"))
    }

    /// `enumerateVertices`: unsupported, the format is not indexed for a
    /// full vertex scan.
    pub fn enumerate_vertices(&self) -> Result<std::iter::Empty<VertexId>, Error> {
        Err(Error::Unsupported("enumerateVertices"))
    }

    /// `vertexCount`: unsupported, for the same reason as
    /// `enumerate_vertices`.
    pub fn vertex_count(&self) -> Result<usize, Error> {
        Err(Error::Unsupported("vertexCount"))
    }
}
