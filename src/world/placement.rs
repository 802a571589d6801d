//! Random scatter of collectibles by rejection sampling.
//!
//! Each point is drawn up to `attempts` times until it keeps `separation`
//! from every point already placed and from the reserved points. When all
//! attempts fail the last candidate is used anyway, so the count asked for is
//! always produced.

use bevy::prelude::*;
use rand::Rng;

/// Axis-aligned area points are drawn from (inclusive bounds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlacementArea {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

pub fn place_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    area: PlacementArea,
    separation: f32,
    attempts: usize,
    reserved: &[Vec2],
) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);
    let attempts = attempts.max(1);

    for _ in 0..count {
        let mut candidate = area.sample(rng);
        for attempt in 0..attempts {
            if attempt > 0 {
                candidate = area.sample(rng);
            }
            let clear = placed
                .iter()
                .chain(reserved.iter())
                .all(|p| p.distance(candidate) >= separation);
            if clear {
                break;
            }
        }
        placed.push(candidate);
    }

    placed
}
