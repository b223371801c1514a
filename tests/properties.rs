// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Property-style tests for the invariants that must hold across repeated
//! and reordered calls, plus an `rstest` table of block-boundary vertices.
//! Run with `cargo test --features testutil`.

use ch_graph_store::config::CacheCapacities;
use ch_graph_store::fixture::{FixtureBuilder, InMemoryStream};
use ch_graph_store::{Block, ChGraphReader, EdgeData, Polyline, ReaderConfig, ShapeBlock, Vertex};
use quickcheck_macros::quickcheck;
use rstest::rstest;

const VERTEX_COUNT: u32 = 12;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn flat_edge(target: u32, forward_weight: f32, backward_weight: f32) -> EdgeData {
    EdgeData {
        target,
        forward_weight,
        backward_weight,
        forward_contracted_id: None,
        backward_contracted_id: None,
        contracted_direction_bits: 0,
        tags_value: 0,
    }
}

fn vertex_at(latitude: f32, arc_index: u32, arc_count: u32) -> Vertex {
    Vertex {
        latitude,
        longitude: 0.0,
        arc_index,
        arc_count,
    }
}

fn empty_shape(arc_count: usize) -> ShapeBlock {
    ShapeBlock {
        arcs: vec![Polyline::default(); arc_count],
    }
}

/// Three blocks of four vertices each (`blockSize = 4`), with two arcs
/// crossing a block boundary (1->4, 5->8) so the symmetric-edge fallback
/// path is exercised alongside same-block lookups.
fn sample_graph() -> (InMemoryStream, ReaderConfig) {
    let block0 = Block {
        vertices: vec![
            vertex_at(0.0, 0, 1),
            vertex_at(1.0, 1, 1),
            vertex_at(2.0, 2, 0),
            vertex_at(3.0, 2, 0),
        ],
        arcs: vec![flat_edge(1, 1.5, 2.5), flat_edge(4, 3.0, 4.0)],
    };
    let block1 = Block {
        vertices: vec![
            vertex_at(4.0, 0, 1),
            vertex_at(5.0, 1, 1),
            vertex_at(6.0, 2, 0),
            vertex_at(7.0, 2, 0),
        ],
        arcs: vec![flat_edge(5, 5.0, 6.0), flat_edge(8, 7.0, 8.0)],
    };
    let block2 = Block {
        vertices: vec![
            vertex_at(8.0, 0, 1),
            vertex_at(9.0, 1, 0),
            vertex_at(10.0, 1, 0),
            vertex_at(11.0, 1, 0),
        ],
        arcs: vec![flat_edge(9, 9.0, 10.0)],
    };
    FixtureBuilder::new(4)
        .with_block(block0, empty_shape(2))
        .with_block(block1, empty_shape(2))
        .with_block(block2, empty_shape(1))
        .build()
        .unwrap()
}

/// Invariant: `getEdge(v1,v2).found == getEdge(v2,v1).found`, and when both
/// are found they resolve to the same stored record (the fallback search
/// never reverses a found arc's fields, as scenario S2 also documents).
#[quickcheck]
fn symmetric_edge_duality(a: u32, b: u32) -> bool {
    init_tracing();
    let v1 = a % VERTEX_COUNT;
    let v2 = b % VERTEX_COUNT;
    let (stream, config) = sample_graph();
    let reader: ChGraphReader<_, ()> = ChGraphReader::new(stream, config, ()).unwrap();
    let forward = reader.edge(v1, v2).unwrap();
    let backward = reader.edge(v2, v1).unwrap();
    forward.is_some() == backward.is_some() && forward == backward
}

/// Invariant: a reader with cache capacity 1 and a reader with an
/// effectively unbounded cache return identical results over the same
/// sequence of queries against identical bytes.
#[quickcheck]
fn cache_transparency(queries: Vec<u32>) -> bool {
    init_tracing();
    let (stream_tiny, mut config_tiny) = sample_graph();
    let (stream_huge, mut config_huge) = sample_graph();
    config_tiny.cache_capacities = CacheCapacities {
        blocks: 1,
        shapes: 1,
        regions: 1,
    };
    config_huge.cache_capacities = CacheCapacities {
        blocks: usize::MAX,
        shapes: usize::MAX,
        regions: usize::MAX,
    };
    let tiny: ChGraphReader<_, ()> = ChGraphReader::new(stream_tiny, config_tiny, ()).unwrap();
    let huge: ChGraphReader<_, ()> = ChGraphReader::new(stream_huge, config_huge, ()).unwrap();
    queries.into_iter().all(|q| {
        let v = q % VERTEX_COUNT;
        let u = q.wrapping_add(1) % VERTEX_COUNT;
        tiny.vertex(v).unwrap() == huge.vertex(v).unwrap()
            && tiny.edge(v, u).unwrap() == huge.edge(v, u).unwrap()
    })
}

/// Invariant: calling any query twice, with nothing else run in between,
/// returns value-equal results.
#[quickcheck]
fn query_results_are_idempotent(a: u32, b: u32) -> bool {
    init_tracing();
    let v1 = a % VERTEX_COUNT;
    let v2 = b % VERTEX_COUNT;
    let (stream, config) = sample_graph();
    let reader: ChGraphReader<_, ()> = ChGraphReader::new(stream, config, ()).unwrap();
    reader.vertex(v1).unwrap() == reader.vertex(v1).unwrap()
        && reader.edge(v1, v2).unwrap() == reader.edge(v1, v2).unwrap()
        && reader.edge_shape(v1, v2).unwrap() == reader.edge_shape(v1, v2).unwrap()
}

#[rstest]
#[case(0, true)] // first vertex of block 0
#[case(3, true)] // last vertex of block 0
#[case(4, true)] // first vertex of block 1
#[case(7, true)] // last vertex of block 1
#[case(8, true)] // first vertex of block 2
#[case(11, true)] // last vertex of block 2
#[case(12, false)] // one past the last known block
#[case(1000, false)] // far out of range
fn vertex_presence_at_block_boundaries(#[case] vertex: u32, #[case] present: bool) {
    init_tracing();
    let (stream, config) = sample_graph();
    let reader: ChGraphReader<_, ()> = ChGraphReader::new(stream, config, ()).unwrap();
    assert_eq!(reader.vertex(vertex).unwrap().is_some(), present);
}
