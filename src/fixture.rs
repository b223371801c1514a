// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! An in-memory stream and a builder that lays out blocks, shape blocks, and
//! regions the way a real writer would, for use in this crate's own tests
//! and by downstream integration tests. Gated behind `testutil` because it
//! depends on the test-only encoder in `deser`.

use crate::config::{BlockIndexConfig, CacheCapacities, ReaderConfig, RegionIndexConfig};
use crate::deser::encode;
use crate::error::Error;
use crate::ids::TileId;
use crate::types::{Block, Region, ShapeBlock};
use positioned_io::ReadAt;
use std::collections::BTreeSet;
use std::io;

/// A stream backed entirely by an in-memory buffer.
#[derive(Debug, Clone)]
pub struct InMemoryStream(Vec<u8>);

impl ReadAt for InMemoryStream {
    fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.0.as_slice().read_at(pos, buf)
    }
}

/// Assembles a blocks zone, a shapes zone, and a regions zone into one
/// stream plus the `ReaderConfig` that describes it, mirroring the layout a
/// real writer would produce.
#[derive(Debug, Default)]
pub struct FixtureBuilder {
    block_size: u32,
    blocks: Vec<Block>,
    shapes: Vec<ShapeBlock>,
    regions: Vec<(TileId, Region)>,
    cache_capacities: CacheCapacities,
    zoom: u8,
    profiles: BTreeSet<String>,
}

impl FixtureBuilder {
    pub fn new(block_size: u32) -> Self {
        Self {
            block_size,
            cache_capacities: CacheCapacities::default(),
            ..Default::default()
        }
    }

    /// Appends one block and its parallel shape block. Blocks must be added
    /// in ascending block-ordinal order; the Nth call here becomes block
    /// ordinal N.
    pub fn with_block(mut self, block: Block, shape: ShapeBlock) -> Self {
        self.blocks.push(block);
        self.shapes.push(shape);
        self
    }

    pub fn with_region(mut self, tile_id: TileId, region: Region) -> Self {
        self.regions.push((tile_id, region));
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_cache_capacities(mut self, capacities: CacheCapacities) -> Self {
        self.cache_capacities = capacities;
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.insert(profile.into());
        self
    }

    pub fn build(self) -> Result<(InMemoryStream, ReaderConfig), Error> {
        let mut bytes = Vec::new();

        let start_of_blocks = 0u64;
        let mut block_location_index = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            bytes.extend(encode::block(block));
            block_location_index.push(bytes.len() as u64 - start_of_blocks);
        }

        let start_of_shapes = bytes.len() as u64;
        let mut shape_location_index = Vec::with_capacity(self.shapes.len());
        for shape in &self.shapes {
            bytes.extend(encode::shape_block(shape));
            shape_location_index.push(bytes.len() as u64 - start_of_shapes);
        }

        let start_of_regions = bytes.len() as u64;
        let mut location_index = Vec::with_capacity(self.regions.len());
        let mut region_ids = Vec::with_capacity(self.regions.len());
        for (tile_id, region) in &self.regions {
            bytes.extend(encode::region(region));
            location_index.push(bytes.len() as u64 - start_of_regions);
            region_ids.push(*tile_id);
        }

        let config = ReaderConfig::new(
            BlockIndexConfig {
                block_size: self.block_size,
                start_of_blocks,
                block_location_index,
                start_of_shapes,
                shape_location_index,
            },
            RegionIndexConfig {
                start_of_regions,
                location_index,
                region_ids,
            },
            self.cache_capacities,
            self.zoom,
            self.profiles,
        )?;

        Ok((InMemoryStream(bytes), config))
    }
}
