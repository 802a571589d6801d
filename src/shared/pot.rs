//! The brewing pot in the pot room.

use bevy::prelude::*;

use super::{GameError, ItemType, Rejected, WorldItem, POT_CAPACITY};

/// Ingredients dropped into the pot, in deposit order.
#[derive(Resource, Debug, Clone)]
pub struct Pot {
    collected: Vec<WorldItem>,
    capacity: usize,
}

impl Default for Pot {
    fn default() -> Self {
        Self::with_capacity(POT_CAPACITY)
    }
}

impl Pot {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            collected: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Only `Source` items go in, and never more than `capacity`.
    pub fn add(&mut self, item: WorldItem) -> Result<usize, Rejected> {
        let found = item.item_type();
        if found != ItemType::Source {
            let reason = GameError::WrongItemType {
                item: item.name.clone(),
                expected: ItemType::Source,
                found,
            };
            return Err(Rejected::new(item, reason));
        }
        if self.is_full() {
            return Err(Rejected::new(item, GameError::PotFull));
        }
        self.collected.push(item);
        Ok(self.collected.len())
    }

    pub fn contents(&self) -> &[WorldItem] {
        &self.collected
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.collected.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.collected.clear();
    }

    /// Empty the pot and hand back what was in it.
    pub fn drain(&mut self) -> Vec<WorldItem> {
        std::mem::take(&mut self.collected)
    }
}

/// Cosmetic frame clock for the bubbling pot. Ticks in every game state.
#[derive(Resource, Debug, Clone)]
pub struct PotAnimation {
    pub frame: usize,
    pub timer: Timer,
}

impl Default for PotAnimation {
    fn default() -> Self {
        Self {
            frame: 0,
            timer: Timer::from_seconds(POT_FRAME_SECONDS, TimerMode::Repeating),
        }
    }
}

pub const POT_FRAME_COUNT: usize = 6;
pub const POT_FRAME_SECONDS: f32 = 0.1;
