//! Shared components, resources, events, and states for Witch's Pot.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

mod assets;
mod error;
mod inventory;
mod pot;

pub use assets::*;
pub use error::{GameError, Rejected};
pub use inventory::Inventory;
pub use pot::{Pot, PotAnimation, POT_FRAME_COUNT, POT_FRAME_SECONDS};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    StartPage,
    Playing,
    EndingTransition,
    Ended,
}

/// Ordered stages of one gameplay tick. Configured as a chain in `main.rs`
/// (and in the headless test app) so that pickups always see the position
/// movement produced in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Input,
    Movement,
    Proximity,
    Effects,
    Phase,
}

/// Wire the `TickSet` chain into an app.
pub fn configure_tick_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TickSet::Input,
            TickSet::Movement,
            TickSet::Proximity,
            TickSet::Effects,
            TickSet::Phase,
        )
            .chain(),
    );
}

// ═══════════════════════════════════════════════════════════════════════
// MAPS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapId {
    #[default]
    Overworld,
    PotRoom,
}

impl MapId {
    pub fn as_str(self) -> &'static str {
        match self {
            MapId::Overworld => "overworld",
            MapId::PotRoom => "pot_room",
        }
    }

    /// Where the portal on this map leads.
    pub fn other(self) -> Self {
        match self {
            MapId::Overworld => MapId::PotRoom,
            MapId::PotRoom => MapId::Overworld,
        }
    }

    /// Centre of this map's portal trigger.
    pub fn portal(self) -> Vec2 {
        match self {
            MapId::Overworld => OVERWORLD_PORTAL,
            MapId::PotRoom => POT_ROOM_PORTAL,
        }
    }

    /// Where the witch appears when arriving on this map.
    pub fn arrival(self) -> Vec2 {
        match self {
            MapId::Overworld => OVERWORLD_ARRIVAL,
            MapId::PotRoom => POT_ROOM_ARRIVAL,
        }
    }
}

/// The pot's solid footprint in the pot room.
pub const POT_BBOX: Rect = Rect {
    min: Vec2::new(POT_POSITION.x - 85.0, POT_POSITION.y - 105.0),
    max: Vec2::new(POT_POSITION.x + 85.0, POT_POSITION.y + 20.0),
};

/// AABB test of a box centred on `center` against the pot footprint.
pub fn overlaps_pot(center: Vec2, half_size: Vec2) -> bool {
    let min = center - half_size;
    let max = center + half_size;
    max.x > POT_BBOX.min.x && min.x < POT_BBOX.max.x && max.y > POT_BBOX.min.y && min.y < POT_BBOX.max.y
}

/// The map the witch is currently on.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveMap {
    pub map: MapId,
}

// ═══════════════════════════════════════════════════════════════════════
// ENTITIES
// ═══════════════════════════════════════════════════════════════════════

/// Process-unique identity for fruits, items and NPCs. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Resource, Debug, Default)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fruit,
    Item,
    Npc,
}

/// What an entity may be delivered to: `Source` feeds the pot, `Item` is a
/// gift for NPCs, `None` is never carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Source,
    Item,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Fruit { index: Option<u32> },
    Item,
}

/// A collectible placed on a map or carried in the inventory. Held by value,
/// so it lives in exactly one place at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItem {
    pub id: EntityId,
    pub kind: ItemKind,
    pub name: String,
    pub sprite: String,
    pub position: Vec2,
}

impl WorldItem {
    pub fn fruit(
        id: EntityId,
        fruit: FruitRef<'_>,
        position: Vec2,
        catalog: &AssetCatalog,
    ) -> Result<Self, GameError> {
        let sprite = catalog.fruit(fruit)?;
        Ok(Self {
            id,
            kind: ItemKind::Fruit {
                index: sprite.index,
            },
            name: sprite.name,
            sprite: sprite.path,
            position,
        })
    }

    pub fn item(
        id: EntityId,
        name_or_file: &str,
        position: Vec2,
        catalog: &AssetCatalog,
    ) -> Result<Self, GameError> {
        let sprite = catalog.item(name_or_file)?;
        Ok(Self {
            id,
            kind: ItemKind::Item,
            name: sprite.name,
            sprite: sprite.path,
            position,
        })
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self.kind {
            ItemKind::Fruit { .. } => EntityKind::Fruit,
            ItemKind::Item => EntityKind::Item,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Fruit { .. } => ItemType::Source,
            ItemKind::Item => ItemType::Item,
        }
    }
}

/// Collectibles lying on each map, not yet picked up.
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldItems {
    pub maps: HashMap<MapId, Vec<WorldItem>>,
}

impl WorldItems {
    pub fn on_map(&self, map: MapId) -> &[WorldItem] {
        self.maps.get(&map).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn on_map_mut(&mut self, map: MapId) -> &mut Vec<WorldItem> {
        self.maps.entry(map).or_default()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.maps.values().flatten().any(|item| item.id == id)
    }
}

/// Logical position in screen-space units (origin bottom-left, 800×600).
/// The render layer converts this to a centred `Transform`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LogicalPosition(pub Vec2);

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub is_running: bool,
    /// Walking speed in units per second.
    pub speed: f32,
    /// Run-cycle frame, 0..WITCH_FRAME_COUNT.
    pub frame: usize,
    pub frame_timer: Timer,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            is_moving: false,
            is_running: false,
            speed: WALK_SPEED,
            frame: 0,
            frame_timer: Timer::from_seconds(TICK_SECONDS, TimerMode::Repeating),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// NPCS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone)]
pub struct Npc {
    pub id: EntityId,
    pub name: String,
    pub sprite: String,
    pub affinity: u32,
    /// Position in the cast list; fixes iteration order for delivery.
    pub roster_index: usize,
}

impl Npc {
    /// Accept a gift. Returns the new affinity.
    pub fn receive_item(&mut self, _item: WorldItem) -> u32 {
        self.affinity += 1;
        self.affinity
    }

    pub fn item_type(&self) -> ItemType {
        ItemType::None
    }

    pub fn entity_kind(&self) -> EntityKind {
        EntityKind::Npc
    }
}

/// Which map an NPC stands on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpcMapTag(pub MapId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreetingKind {
    #[default]
    AskForItem,
    Heart,
}

/// Speech shown above an NPC while the witch is close.
#[derive(Component, Debug, Clone, Default)]
pub struct NpcGreeting {
    pub visible: bool,
    pub kind: GreetingKind,
    pub was_near: bool,
}

impl NpcGreeting {
    /// Text to draw, top line first. Empty while hidden.
    pub fn lines(&self, affinity: u32) -> Vec<String> {
        if !self.visible {
            return Vec::new();
        }
        match self.kind {
            GreetingKind::AskForItem => vec!["Give me Item".to_string()],
            GreetingKind::Heart => vec![
                "heart +1".to_string(),
                format!("current heart : {affinity}"),
            ],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════

/// How the delivery check picks among several NPCs in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NpcSelection {
    /// First NPC in roster order that is within range.
    #[default]
    FirstInRange,
    /// The closest NPC within range.
    Nearest,
}

/// Gameplay tunables. Loaded from `assets/config.ron` when present.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pickup_radius: f32,
    pub interaction_radius: f32,
    pub pot_interaction_radius: f32,
    pub portal_radius: f32,
    pub ending_affinity: u32,
    pub ending_delay_secs: f32,
    pub tick_seconds: f32,
    pub walk_speed: f32,
    pub run_multiplier: f32,
    pub overworld_fruits: usize,
    pub overworld_items: usize,
    pub placement_attempts: usize,
    pub npc_selection: NpcSelection,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pickup_radius: PICKUP_RADIUS,
            interaction_radius: INTERACTION_RADIUS,
            pot_interaction_radius: POT_INTERACTION_RADIUS,
            portal_radius: PORTAL_RADIUS,
            ending_affinity: ENDING_AFFINITY,
            ending_delay_secs: ENDING_DELAY_SECS,
            tick_seconds: TICK_SECONDS,
            walk_speed: WALK_SPEED,
            run_multiplier: RUN_MULTIPLIER,
            overworld_fruits: 6,
            overworld_items: 4,
            placement_attempts: 50,
            npc_selection: NpcSelection::FirstInRange,
        }
    }
}

impl GameConfig {
    /// Minimum distance between freshly placed collectibles.
    pub fn placement_separation(&self) -> f32 {
        self.pickup_radius + 20.0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Game actions for this frame, rebuilt from the keyboard in `PreUpdate`.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub run: bool,
    pub interact: bool,
    pub brew: bool,
    pub end_game: bool,
    pub quit: bool,
    pub select_slot: Option<usize>,
    pub swap_left: bool,
    pub swap_right: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    StartPage,
    Gameplay,
    Disabled,
}

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub run: KeyCode,
    pub interact: KeyCode,
    pub brew: KeyCode,
    pub end_game: KeyCode,
    pub swap_left: KeyCode,
    pub swap_right: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            interact: KeyCode::KeyE,
            brew: KeyCode::KeyR,
            end_game: KeyCode::KeyQ,
            swap_left: KeyCode::BracketLeft,
            swap_right: KeyCode::BracketRight,
            quit: KeyCode::Escape,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct ItemPickedUpEvent {
    pub item_id: EntityId,
    pub name: String,
    pub slot: usize,
    pub map: MapId,
}

#[derive(Event, Debug, Clone)]
pub struct PickupFailedEvent {
    pub item_id: EntityId,
    pub name: String,
    pub reason: GameError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    Pot,
    Npc(Entity),
}

/// The interact key resolved to a target; domain systems act on it.
#[derive(Event, Debug, Clone)]
pub struct DeliveryRequestEvent {
    pub target: DeliveryTarget,
    pub slot: usize,
}

#[derive(Event, Debug, Clone)]
pub struct DeliveryEvent {
    pub target: DeliveryTarget,
    pub item_name: String,
    pub slot: usize,
}

#[derive(Event, Debug, Clone)]
pub struct DeliveryFailedEvent {
    pub target: Option<DeliveryTarget>,
    pub reason: GameError,
}

#[derive(Event, Debug, Clone)]
pub struct GiftGivenEvent {
    pub npc: Entity,
    pub npc_name: String,
    pub item_name: String,
    pub affinity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PotBrewedEvent {
    pub product: EntityId,
    pub product_name: String,
    pub ingredients: Vec<String>,
}

#[derive(Event, Debug, Clone)]
pub struct MapTransitionEvent {
    pub from: MapId,
    pub to: MapId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndingReason {
    Affinity { npc_name: String },
    Requested,
}

#[derive(Event, Debug, Clone)]
pub struct EndingTriggeredEvent {
    pub reason: EndingReason,
}

/// The ending countdown ran out; the run is over.
#[derive(Event, Debug, Clone)]
pub struct GameEndedEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 50.0;
pub const MAP_WIDTH: usize = 16;
pub const MAP_HEIGHT: usize = 12;
pub const SCREEN_WIDTH: f32 = MAP_WIDTH as f32 * TILE_SIZE; // 800
pub const SCREEN_HEIGHT: f32 = MAP_HEIGHT as f32 * TILE_SIZE; // 600

/// Margin kept between placed collectibles and the screen edge.
pub const PLACEMENT_MARGIN: f32 = 50.0;

pub const INVENTORY_SLOTS: usize = 10;
pub const POT_CAPACITY: usize = 3;

pub const PICKUP_RADIUS: f32 = 48.0;
pub const INTERACTION_RADIUS: f32 = 80.0;
pub const POT_INTERACTION_RADIUS: f32 = 120.0;
pub const PORTAL_RADIUS: f32 = 30.0;

pub const ENDING_AFFINITY: u32 = 30;
pub const ENDING_DELAY_SECS: f32 = 2.0;
pub const TICK_SECONDS: f32 = 0.05;

pub const WALK_SPEED: f32 = 100.0;
pub const RUN_MULTIPLIER: f32 = 1.8;
pub const WITCH_FRAME_COUNT: usize = 8;
/// Half extents of the witch's collision box.
pub const WITCH_HALF_SIZE: Vec2 = Vec2::new(20.0, 30.0);

pub const PLAYER_START: Vec2 = Vec2::new(400.0, 300.0);

/// The fixed cast: sprite name and standing point on the overworld.
pub const NPC_CAST: [(&str, Vec2); 3] = [
    ("girl1_idle", Vec2::new(200.0, 420.0)),
    ("girl2_idle", Vec2::new(600.0, 420.0)),
    ("boy1_idle", Vec2::new(250.0, 150.0)),
];

pub const POT_POSITION: Vec2 = Vec2::new(400.0, 300.0);
/// Where a brewed potion lands.
pub const POT_OUTPUT: Vec2 = Vec2::new(400.0, 150.0);
pub const POT_DRAW_SIZE: f32 = 200.0;

pub const OVERWORLD_PORTAL: Vec2 = Vec2::new(720.0, 80.0);
pub const OVERWORLD_ARRIVAL: Vec2 = Vec2::new(640.0, 110.0);
pub const POT_ROOM_PORTAL: Vec2 = Vec2::new(100.0, 450.0);
pub const POT_ROOM_ARRIVAL: Vec2 = Vec2::new(180.0, 450.0);

// Draw order: later layers occlude earlier ones.
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_PROPS: f32 = 5.0;
pub const Z_WORLD_ITEMS: f32 = 10.0;
pub const Z_NPCS: f32 = 20.0;
pub const Z_PLAYER: f32 = 30.0;
pub const Z_OVERLAY: f32 = 100.0;
