// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Validated construction parameters for a reader.
//!
//! Zone offsets, the two block indices, the region index arrays, cache
//! capacities, and the supported-profile set are gathered here and checked
//! once, eagerly, before any stream I/O is attempted.

use crate::error::Error;
use crate::ids::TileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

const DEFAULT_BLOCK_CACHE_CAPACITY: usize = 5000;
const DEFAULT_SHAPE_CACHE_CAPACITY: usize = 1000;
const DEFAULT_REGION_CACHE_CAPACITY: usize = 1000;

/// Raw inputs for the two parallel block/shape prefix-sum indices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockIndexConfig {
    pub block_size: u32,
    pub start_of_blocks: u64,
    pub block_location_index: Vec<u64>,
    pub start_of_shapes: u64,
    pub shape_location_index: Vec<u64>,
}

/// Raw inputs for the region (tile) index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionIndexConfig {
    pub start_of_regions: u64,
    pub location_index: Vec<u64>,
    pub region_ids: Vec<TileId>,
}

/// Cache capacities for the three caches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheCapacities {
    pub blocks: usize,
    pub shapes: usize,
    pub regions: usize,
}

impl Default for CacheCapacities {
    fn default() -> Self {
        Self {
            blocks: DEFAULT_BLOCK_CACHE_CAPACITY,
            shapes: DEFAULT_SHAPE_CACHE_CAPACITY,
            regions: DEFAULT_REGION_CACHE_CAPACITY,
        }
    }
}

/// Fully validated configuration for one reader instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderConfig {
    pub block_index: BlockIndexConfig,
    pub region_index: RegionIndexConfig,
    pub cache_capacities: CacheCapacities,
    pub zoom: u8,
    pub profiles: BTreeSet<String>,
}

impl ReaderConfig {
    pub fn new(
        block_index: BlockIndexConfig,
        region_index: RegionIndexConfig,
        cache_capacities: CacheCapacities,
        zoom: u8,
        profiles: BTreeSet<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            block_index,
            region_index,
            cache_capacities,
            zoom,
            profiles,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.block_index.block_size == 0 {
            return Err(Error::InvalidConfig("blockSize must be non-zero".into()));
        }
        if self.block_index.block_location_index.is_empty() {
            return Err(Error::InvalidConfig(
                "blockLocationIndex must contain at least one block".into(),
            ));
        }
        if !is_non_decreasing(&self.block_index.block_location_index) {
            return Err(Error::InvalidConfig(
                "blockLocationIndex must be a non-decreasing prefix sum".into(),
            ));
        }
        if !is_non_decreasing(&self.block_index.shape_location_index) {
            return Err(Error::InvalidConfig(
                "shapeLocationIndex must be a non-decreasing prefix sum".into(),
            ));
        }
        if self.block_index.block_location_index.len() != self.block_index.shape_location_index.len()
        {
            return Err(Error::InvalidConfig(
                "blockLocationIndex and shapeLocationIndex must have the same length".into(),
            ));
        }
        if self.region_index.location_index.len() != self.region_index.region_ids.len() {
            return Err(Error::InvalidConfig(
                "region index location and id arrays must have the same length".into(),
            ));
        }
        if self.cache_capacities.blocks == 0
            || self.cache_capacities.shapes == 0
            || self.cache_capacities.regions == 0
        {
            return Err(Error::InvalidConfig(
                "cache capacities must be non-zero".into(),
            ));
        }
        if self.profiles.iter().any(|p| p.is_empty()) {
            return Err(Error::InvalidConfig(
                "profile names must be non-empty".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn block_cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacities.blocks).expect("validated non-zero")
    }

    pub(crate) fn shape_cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacities.shapes).expect("validated non-zero")
    }

    pub(crate) fn region_cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacities.regions).expect("validated non-zero")
    }
}

fn is_non_decreasing(values: &[u64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
