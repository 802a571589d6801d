//! Fixed-slot inventory carried by the witch.

use bevy::prelude::*;

use super::{GameError, Rejected, WorldItem, INVENTORY_SLOTS};

#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    slots: [Option<WorldItem>; INVENTORY_SLOTS],
    /// Always `< INVENTORY_SLOTS`; only changed through `select`.
    selected_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            selected_slot: 0,
        }
    }
}

impl Inventory {
    pub fn capacity(&self) -> usize {
        INVENTORY_SLOTS
    }

    fn check(&self, index: usize) -> Result<(), GameError> {
        if index < INVENTORY_SLOTS {
            Ok(())
        } else {
            Err(GameError::IndexOutOfRange {
                index,
                capacity: INVENTORY_SLOTS,
            })
        }
    }

    /// Place `item` in the first empty slot (index order) and return that
    /// index. A full inventory hands the item back unchanged.
    pub fn add(&mut self, item: WorldItem) -> Result<usize, Rejected> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(Rejected::new(item, GameError::InventoryFull)),
        }
    }

    /// Take whatever is in `index`. An empty slot yields `Ok(None)`.
    pub fn remove(&mut self, index: usize) -> Result<Option<WorldItem>, GameError> {
        self.check(index)?;
        Ok(self.slots[index].take())
    }

    /// Put `item` into `index`, returning the previous occupant.
    pub fn replace(&mut self, index: usize, item: WorldItem) -> Result<Option<WorldItem>, GameError> {
        self.check(index)?;
        Ok(self.slots[index].replace(item))
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), GameError> {
        self.check(i)?;
        self.check(j)?;
        self.slots.swap(i, j);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Option<&WorldItem>, GameError> {
        self.check(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// `(index, name)` for every slot, left to right.
    pub fn summary(&self) -> Vec<(usize, Option<&str>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i, slot.as_ref().map(|item| item.name.as_str())))
            .collect()
    }

    pub fn has_space(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn items(&self) -> impl Iterator<Item = &WorldItem> {
        self.slots.iter().flatten()
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    pub fn select(&mut self, index: usize) -> Result<(), GameError> {
        self.check(index)?;
        self.selected_slot = index;
        Ok(())
    }

    pub fn selected(&self) -> Option<&WorldItem> {
        self.slots[self.selected_slot].as_ref()
    }
}
