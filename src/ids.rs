// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Id types used throughout the reader.
//!
//! `VertexId`, `BlockId`, and `TileId` are plain integer aliases, not
//! newtypes.

/// A stable vertex identifier. Zero is a valid id.
pub type VertexId = u32;

/// `BlockId(v)`, i.e. `v` rounded down to a multiple of `blockSize`.
pub type BlockId = u32;

/// A 64-bit tile identifier, as stored in the region index.
pub type TileId = u64;

/// Sentinel used for `forwardContractedId` / `backwardContractedId` when an
/// arc is not a shortcut in that direction.
pub const NO_CONTRACTION: VertexId = VertexId::MAX;

/// Computes `BlockId(v)` for a given `blockSize`.
///
/// # Panics
/// Panics if `block_size` is zero; a reader is never constructed with a zero
/// block size (`ReaderConfig` validates this eagerly), so reaching this
/// function with one is a programmer contract violation.
#[inline]
pub fn block_id_of(vertex: VertexId, block_size: u32) -> BlockId {
    debug_assert_ne!(block_size, 0, "blockSize must be non-zero");
    vertex - (vertex % block_size)
}

/// Computes `blockOrdinal = BlockId / blockSize`.
#[inline]
pub fn block_ordinal_of(block_id: BlockId, block_size: u32) -> usize {
    (block_id / block_size) as usize
}
