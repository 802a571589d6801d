//! Tile layouts for both maps.
//!
//! Each map is a 16×12 grid of grass variants (1..=10). Row 0 is the top of
//! the screen.

use bevy::prelude::*;

use crate::shared::*;

/// Complete definition of a map's ground layer.
#[derive(Debug, Clone)]
pub struct MapDef {
    pub id: MapId,
    pub width: usize,
    pub height: usize,
    /// Row-major tile data: tiles[row * width + col]
    pub tiles: Vec<u8>,
}

impl MapDef {
    pub fn get_tile(&self, col: usize, row: usize) -> Option<u8> {
        if col >= self.width || row >= self.height {
            None
        } else {
            Some(self.tiles[row * self.width + col])
        }
    }

    /// Centre of a tile in logical (bottom-left origin) coordinates.
    pub fn tile_center(col: usize, row: usize) -> Vec2 {
        Vec2::new(
            col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
            SCREEN_HEIGHT - (row as f32 * TILE_SIZE + TILE_SIZE / 2.0),
        )
    }
}

pub fn generate_map(map_id: MapId) -> MapDef {
    let tiles = match map_id {
        MapId::Overworld => overworld_tiles(),
        MapId::PotRoom => POT_ROOM_TILES.iter().flatten().copied().collect(),
    };
    MapDef {
        id: map_id,
        width: MAP_WIDTH,
        height: MAP_HEIGHT,
        tiles,
    }
}

/// Diagonal bands: each row shifts the variant cycle one step.
fn overworld_tiles() -> Vec<u8> {
    let mut tiles = Vec::with_capacity(MAP_WIDTH * MAP_HEIGHT);
    for row in 0..MAP_HEIGHT {
        for col in 0..MAP_WIDTH {
            tiles.push(((row + col) % TILE_VARIANTS as usize) as u8 + 1);
        }
    }
    tiles
}

const POT_ROOM_TILES: [[u8; MAP_WIDTH]; MAP_HEIGHT] = [
    [4, 9, 2, 7, 1, 8, 3, 5, 6, 10, 2, 9, 4, 1, 7, 3],
    [6, 1, 8, 3, 5, 2, 10, 4, 7, 9, 6, 8, 1, 5, 3, 2],
    [9, 3, 5, 10, 6, 4, 1, 7, 2, 8, 9, 3, 6, 4, 10, 1],
    [1, 7, 4, 2, 9, 5, 8, 6, 10, 3, 1, 7, 5, 9, 2, 8],
    [3, 6, 9, 8, 4, 1, 7, 2, 5, 10, 3, 6, 8, 1, 4, 7],
    [5, 10, 1, 9, 3, 7, 2, 8, 4, 6, 5, 10, 2, 7, 9, 3],
    [7, 4, 6, 1, 8, 9, 5, 10, 3, 2, 7, 4, 9, 8, 1, 5],
    [2, 8, 10, 4, 7, 3, 6, 1, 9, 5, 2, 8, 3, 6, 7, 10],
    [8, 5, 3, 6, 10, 2, 4, 9, 1, 7, 8, 5, 10, 2, 6, 4],
    [10, 2, 7, 5, 1, 6, 3, 4, 8, 9, 10, 2, 6, 3, 5, 1],
    [9, 1, 4, 8, 6, 10, 2, 3, 7, 5, 9, 1, 3, 10, 8, 2],
    [3, 7, 5, 9, 2, 8, 1, 6, 10, 4, 3, 7, 8, 9, 1, 6],
];
