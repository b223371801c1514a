// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Tile-range expansion for bounding-box queries.
//!
//! Tile ids use a standard slippy-map (Web Mercator) grid: `tileId = zoom
//! << 58 | x << 29 | y`.

use crate::ids::TileId;
use crate::types::BoundingBox;

/// Maximum latitude representable in the Web Mercator projection used by
/// the slippy-map tile scheme.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

pub fn encode_tile_id(zoom: u8, x: u64, y: u64) -> TileId {
    ((zoom as u64) << 58) | ((x & 0x1fff_ffff) << 29) | (y & 0x1fff_ffff)
}

pub fn decode_tile_id(tile_id: TileId) -> (u8, u64, u64) {
    let zoom = (tile_id >> 58) as u8;
    let x = (tile_id >> 29) & 0x1fff_ffff;
    let y = tile_id & 0x1fff_ffff;
    (zoom, x, y)
}

fn tiles_per_axis(zoom: u8) -> u64 {
    1u64 << zoom
}

/// Tile coordinates of the point, clamped to the valid Mercator range.
fn point_to_tile(latitude: f64, longitude: f64, zoom: u8) -> (u64, u64) {
    let n = tiles_per_axis(zoom) as f64;
    let lat = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    let lon = longitude.clamp(-180.0, 180.0);

    let x = ((lon + 180.0) / 360.0 * n).floor();
    let lat_rad = lat.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n)
        .floor();

    let max_index = (n as u64).saturating_sub(1);
    (
        (x as i64).clamp(0, max_index as i64) as u64,
        (y as i64).clamp(0, max_index as i64) as u64,
    )
}

/// Enumerates every tile at `zoom` whose footprint intersects `box`,
/// producing each tile's id. The writer's scheme and this one must agree;
/// see the module doc.
pub fn tile_range(zoom: u8, bbox: &BoundingBox) -> Vec<TileId> {
    // Higher latitude is further north, which is a *smaller* tile-y
    // coordinate in the slippy-map scheme (y grows southward).
    let (x_min, y_min) = point_to_tile(bbox.max_latitude, bbox.min_longitude, zoom);
    let (x_max, y_max) = point_to_tile(bbox.min_latitude, bbox.max_longitude, zoom);

    let mut ids = Vec::new();
    for x in x_min..=x_max {
        for y in y_min..=y_max {
            ids.push(encode_tile_id(zoom, x, y));
        }
    }
    ids
}
