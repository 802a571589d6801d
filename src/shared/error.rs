//! Error taxonomy shared by every domain.
//!
//! `InventoryFull`, `PotFull`, `WrongItemType`, `EmptySlot` and `NoTarget` are
//! steady-state conditions during play: systems report them and carry on.
//! `IndexOutOfRange` is a contract violation and is logged at `error!`.
//! `AssetNotFound` is recovered by skipping optional entities.

use super::{ItemType, WorldItem};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("inventory is full")]
    InventoryFull,

    #[error("slot index {index} out of range (capacity {capacity})")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("{item} is {found:?}, expected {expected:?}")]
    WrongItemType {
        item: String,
        expected: ItemType,
        found: ItemType,
    },

    #[error("pot is full")]
    PotFull,

    #[error("slot {index} is empty")]
    EmptySlot { index: usize },

    #[error("nothing to interact with in range")]
    NoTarget,

    #[error("pot holds {held}/{capacity} ingredients, cannot brew yet")]
    PotNotReady { held: usize, capacity: usize },

    #[error("config error: {0}")]
    Config(String),
}

/// An item handed back because a container refused it. The caller owns the
/// item again and decides where it goes; nothing is lost.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} rejected: {reason}", .item.name)]
pub struct Rejected {
    pub item: WorldItem,
    pub reason: GameError,
}

impl Rejected {
    pub fn new(item: WorldItem, reason: GameError) -> Self {
        Self { item, reason }
    }
}

impl From<Rejected> for GameError {
    fn from(rejected: Rejected) -> Self {
        rejected.reason
    }
}
