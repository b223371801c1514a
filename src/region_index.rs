// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Maps a tile id to the `(offset, length)` slice of the regions zone that
//! holds that tile's vertex list.

use crate::error::Error;
use crate::ids::TileId;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RegionIndex {
    offsets: HashMap<TileId, (u64, u64)>,
}

impl RegionIndex {
    /// Builds the index from the parallel `LocationIndex[]` / `RegionIds[]`
    /// arrays supplied at construction. `location_index[i]` is the
    /// cumulative byte length of tiles `0..=i`; `region_ids[i]` is the tile
    /// id occupying that slot.
    pub fn new(
        start_of_regions: u64,
        location_index: &[u64],
        region_ids: &[TileId],
    ) -> Result<Self, Error> {
        if location_index.len() != region_ids.len() {
            return Err(Error::InvalidConfig(format!(
                "region index arrays have mismatched lengths: {} locations vs {} ids",
                location_index.len(),
                region_ids.len()
            )));
        }
        let mut offsets = HashMap::with_capacity(region_ids.len());
        let mut prev = 0u64;
        for (i, &tile_id) in region_ids.iter().enumerate() {
            let len = location_index[i];
            if len < prev {
                return Err(Error::InvalidConfig(
                    "region location index is not non-decreasing".to_string(),
                ));
            }
            let offset = start_of_regions + prev;
            let length = len - prev;
            if offsets.insert(tile_id, (offset, length)).is_some() {
                return Err(Error::InvalidConfig(format!(
                    "duplicate tile id {tile_id} in region index"
                )));
            }
            prev = len;
        }
        Ok(Self { offsets })
    }

    /// Resolves a tile id to its `(offset, length)` slice, or `None` if the
    /// tile has no region record (i.e. no vertices fall inside it).
    pub fn locate(&self, tile_id: TileId) -> Option<(u64, u64)> {
        self.offsets.get(&tile_id).copied()
    }

    pub fn tile_count(&self) -> usize {
        self.offsets.len()
    }
}
