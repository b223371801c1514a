// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! The leaf of the dependency graph: turns `[offset, offset+length)` of the
//! backing stream into one typed record.
//!
//! The byte layout fixed here is little-endian fixed-width integers and
//! IEEE-754 floats, with `u32` length prefixes for the variable-length parts
//! of each record. A deployment backed by a real writer would swap this
//! module out and keep everything above it unchanged.

use crate::error::{DeserializeCause, Error};
use crate::types::{Block, EdgeData, Point, Polyline, Region, ShapeBlock, Vertex};
use byteorder::{ReadBytesExt, LE};
use positioned_io::ReadAt;
use smallvec::SmallVec;
use std::io::{self, Cursor};

fn malformed(kind: &'static str, offset: u64, length: u64, msg: impl Into<String>) -> Error {
    Error::Deserialize {
        kind,
        offset,
        length,
        source: DeserializeCause::Malformed(msg.into()),
    }
}

fn io_err(kind: &'static str, offset: u64, length: u64, err: io::Error) -> Error {
    Error::Deserialize {
        kind,
        offset,
        length,
        source: DeserializeCause::Io(err),
    }
}

/// Reads exactly `length` bytes starting at `offset` from a random-access
/// stream. Callers are not required to have visited this offset before;
/// seeking and reading happen entirely within this call.
fn read_slice(stream: &impl ReadAt, offset: u64, length: u64) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; length as usize];
    stream.read_exact_at(offset, &mut buf)?;
    Ok(buf)
}

#[tracing::instrument(level = "trace", skip(stream))]
pub(crate) fn read_block(stream: &impl ReadAt, offset: u64, length: u64) -> Result<Block, Error> {
    let bytes =
        read_slice(stream, offset, length).map_err(|e| io_err("Block", offset, length, e))?;
    decode_block(&bytes).map_err(|e| malformed("Block", offset, length, e))
}

#[tracing::instrument(level = "trace", skip(stream))]
pub(crate) fn read_shape_block(
    stream: &impl ReadAt,
    offset: u64,
    length: u64,
) -> Result<ShapeBlock, Error> {
    let bytes = read_slice(stream, offset, length)
        .map_err(|e| io_err("BlockCoordinates", offset, length, e))?;
    decode_shape_block(&bytes).map_err(|e| malformed("BlockCoordinates", offset, length, e))
}

#[tracing::instrument(level = "trace", skip(stream))]
pub(crate) fn read_region(stream: &impl ReadAt, offset: u64, length: u64) -> Result<Region, Error> {
    let bytes =
        read_slice(stream, offset, length).map_err(|e| io_err("Region", offset, length, e))?;
    decode_region(&bytes).map_err(|e| malformed("Region", offset, length, e))
}

fn decode_block(bytes: &[u8]) -> Result<Block, String> {
    let mut r = Cursor::new(bytes);
    let vertex_count = read_u32(&mut r)?;
    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for _ in 0..vertex_count {
        vertices.push(Vertex {
            latitude: read_f32(&mut r)?,
            longitude: read_f32(&mut r)?,
            arc_index: read_u32(&mut r)?,
            arc_count: read_u32(&mut r)?,
        });
    }
    let arc_count = read_u32(&mut r)?;
    let mut arcs = Vec::with_capacity(arc_count as usize);
    for _ in 0..arc_count {
        arcs.push(read_edge_data(&mut r)?);
    }
    for v in &vertices {
        let end = v
            .arc_index
            .checked_add(v.arc_count)
            .ok_or_else(|| "arc window overflowed".to_string())?;
        if end as usize > arcs.len() {
            return Err(format!(
                "vertex arc window [{}, {}) exceeds block arc count {}",
                v.arc_index,
                end,
                arcs.len()
            ));
        }
    }
    Ok(Block { vertices, arcs })
}

fn decode_shape_block(bytes: &[u8]) -> Result<ShapeBlock, String> {
    let mut r = Cursor::new(bytes);
    let arc_count = read_u32(&mut r)?;
    let mut arcs = Vec::with_capacity(arc_count as usize);
    for _ in 0..arc_count {
        let point_count = read_u32(&mut r)?;
        let mut points = SmallVec::with_capacity(point_count as usize);
        for _ in 0..point_count {
            points.push(Point {
                latitude: read_f32(&mut r)?,
                longitude: read_f32(&mut r)?,
            });
        }
        arcs.push(Polyline(points));
    }
    Ok(ShapeBlock { arcs })
}

fn decode_region(bytes: &[u8]) -> Result<Region, String> {
    let mut r = Cursor::new(bytes);
    let vertex_count = read_u32(&mut r)?;
    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for _ in 0..vertex_count {
        vertices.push(read_u32(&mut r)?);
    }
    Ok(Region { vertices })
}

fn read_edge_data(r: &mut Cursor<&[u8]>) -> Result<EdgeData, String> {
    let target = read_u32(r)?;
    let forward_weight = read_f32(r)?;
    let backward_weight = read_f32(r)?;
    let forward_contracted_id = EdgeData::decode_contracted_id(read_u32(r)?);
    let backward_contracted_id = EdgeData::decode_contracted_id(read_u32(r)?);
    let contracted_direction_bits = r
        .read_u8()
        .map_err(|e| format!("truncated contractedDirectionBits: {e}"))?;
    let tags_value = read_u32(r)?;
    Ok(EdgeData {
        target,
        forward_weight,
        backward_weight,
        forward_contracted_id,
        backward_contracted_id,
        contracted_direction_bits,
        tags_value,
    })
}

fn read_u32(r: &mut Cursor<&[u8]>) -> Result<u32, String> {
    r.read_u32::<LE>()
        .map_err(|e| format!("truncated record: {e}"))
}

fn read_f32(r: &mut Cursor<&[u8]>) -> Result<f32, String> {
    r.read_f32::<LE>()
        .map_err(|e| format!("truncated record: {e}"))
}

// --- Test-only encoder: the symmetric half of this module's wire format. ---
// Never part of the public API; writing is out of scope for this library,
// but the fixtures that exercise the reader still have to produce
// well-formed bytes.
#[cfg(any(test, feature = "testutil"))]
pub(crate) mod encode {
    use super::*;
    use byteorder::WriteBytesExt;

    pub(crate) fn block(block: &Block) -> Vec<u8> {
        let mut w = Vec::new();
        w.write_u32::<LE>(block.vertices.len() as u32).unwrap();
        for v in &block.vertices {
            w.write_f32::<LE>(v.latitude).unwrap();
            w.write_f32::<LE>(v.longitude).unwrap();
            w.write_u32::<LE>(v.arc_index).unwrap();
            w.write_u32::<LE>(v.arc_count).unwrap();
        }
        w.write_u32::<LE>(block.arcs.len() as u32).unwrap();
        for a in &block.arcs {
            edge_data(&mut w, a);
        }
        w
    }

    fn edge_data(w: &mut Vec<u8>, a: &EdgeData) {
        w.write_u32::<LE>(a.target).unwrap();
        w.write_f32::<LE>(a.forward_weight).unwrap();
        w.write_f32::<LE>(a.backward_weight).unwrap();
        w.write_u32::<LE>(EdgeData::encode_contracted_id(a.forward_contracted_id))
            .unwrap();
        w.write_u32::<LE>(EdgeData::encode_contracted_id(a.backward_contracted_id))
            .unwrap();
        w.write_u8(a.contracted_direction_bits).unwrap();
        w.write_u32::<LE>(a.tags_value).unwrap();
    }

    pub(crate) fn shape_block(shape: &ShapeBlock) -> Vec<u8> {
        let mut w = Vec::new();
        w.write_u32::<LE>(shape.arcs.len() as u32).unwrap();
        for polyline in &shape.arcs {
            w.write_u32::<LE>(polyline.0.len() as u32).unwrap();
            for p in polyline.points() {
                w.write_f32::<LE>(p.latitude).unwrap();
                w.write_f32::<LE>(p.longitude).unwrap();
            }
        }
        w
    }

    pub(crate) fn region(region: &Region) -> Vec<u8> {
        let mut w = Vec::new();
        w.write_u32::<LE>(region.vertices.len() as u32).unwrap();
        for v in &region.vertices {
            w.write_u32::<LE>(*v).unwrap();
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;

    fn sample_block() -> Block {
        Block {
            vertices: vec![Vertex {
                latitude: 50.0,
                longitude: 4.0,
                arc_index: 0,
                arc_count: 1,
            }],
            arcs: vec![EdgeData {
                target: 1,
                forward_weight: 10.0,
                backward_weight: 10.0,
                forward_contracted_id: None,
                backward_contracted_id: Some(3),
                contracted_direction_bits: 1,
                tags_value: 9,
            }],
        }
    }

    #[test]
    fn block_roundtrips() {
        let original = sample_block();
        let bytes = encode::block(&original);
        let decoded = decode_block(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn shape_block_roundtrips() {
        let shape = ShapeBlock {
            arcs: vec![Polyline(SmallVec::from_vec(vec![
                Point {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                Point {
                    latitude: 3.0,
                    longitude: 4.0,
                },
            ]))],
        };
        let bytes = encode::shape_block(&shape);
        let decoded = decode_shape_block(&bytes).unwrap();
        assert_eq!(decoded, shape);
    }

    #[test]
    fn region_roundtrips() {
        let region = Region {
            vertices: vec![1, 2, 3],
        };
        let bytes = encode::region(&region);
        let decoded = decode_region(&bytes).unwrap();
        assert_eq!(decoded, region);
    }

    #[test]
    fn malformed_arc_window_is_rejected() {
        let mut block = sample_block();
        block.vertices[0].arc_count = 5;
        let bytes = encode::block(&block);
        let err = decode_block(&bytes).unwrap_err();
        assert!(err.contains("exceeds block arc count"));
    }

    #[test]
    fn truncated_stream_is_an_io_deserialize_error() {
        struct Empty;
        impl ReadAt for Empty {
            fn read_at(&self, _pos: u64, _buf: &mut [u8]) -> io::Result<usize> {
                Ok(0)
            }
        }
        let err = read_block(&Empty, 0, 16).unwrap_err();
        assert!(matches!(
            err,
            Error::Deserialize {
                source: DeserializeCause::Io(_),
                ..
            }
        ));
    }
}
