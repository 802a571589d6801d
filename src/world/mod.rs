//! World domain plugin for Witch's Pot.
//!
//! Responsible for:
//! - Scattering fruits and gems across the overworld
//! - Tracking which map is active
//! - Respawning the overworld when the witch comes back from the pot room

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::*;

pub mod maps;
pub mod placement;

use placement::{place_points, PlacementArea};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldRng>()
            .init_resource::<WorldPopulated>()
            .add_systems(OnEnter(GameState::Playing), spawn_initial_items)
            .add_systems(
                Update,
                handle_map_transition
                    .in_set(TickSet::Effects)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Randomness for item placement. Tests insert a seeded one before the
/// plugin is added.
#[derive(Resource)]
pub struct WorldRng(pub StdRng);

impl Default for WorldRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl WorldRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Set once the overworld has had its first scatter.
#[derive(Resource, Debug, Default)]
pub struct WorldPopulated(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// Points new collectibles keep their distance from.
pub fn reserved_points() -> Vec<Vec2> {
    let mut reserved = vec![PLAYER_START, MapId::Overworld.arrival(), MapId::Overworld.portal()];
    reserved.extend(NPC_CAST.iter().map(|(_, pos)| *pos));
    reserved
}

pub fn placement_area() -> PlacementArea {
    PlacementArea::new(
        Vec2::splat(PLACEMENT_MARGIN),
        Vec2::new(SCREEN_WIDTH - PLACEMENT_MARGIN, SCREEN_HEIGHT - PLACEMENT_MARGIN),
    )
}

/// Replace everything lying on the overworld with a fresh random scatter.
/// Entries whose sprite is missing are skipped with a warning.
pub fn respawn_overworld<R: Rng + ?Sized>(
    world_items: &mut WorldItems,
    ids: &mut EntityIds,
    catalog: &AssetCatalog,
    config: &GameConfig,
    rng: &mut R,
) -> usize {
    let total = config.overworld_fruits + config.overworld_items;
    let points = place_points(
        rng,
        total,
        placement_area(),
        config.placement_separation(),
        config.placement_attempts,
        &reserved_points(),
    );

    let mut fresh = Vec::with_capacity(total);
    for (n, position) in points.into_iter().enumerate() {
        let spawned = if n < config.overworld_fruits {
            let index = rng.gen_range(0..FRUIT_VARIETIES);
            WorldItem::fruit(ids.next(), FruitRef::Index(index), position, catalog)
        } else {
            let gem = GEM_NAMES[rng.gen_range(0..GEM_NAMES.len())];
            WorldItem::item(ids.next(), gem, position, catalog)
        };
        match spawned {
            Ok(item) => fresh.push(item),
            Err(e) => warn!("[World] Skipping collectible: {}", e),
        }
    }

    let count = fresh.len();
    *world_items.on_map_mut(MapId::Overworld) = fresh;
    count
}

fn spawn_initial_items(
    mut populated: ResMut<WorldPopulated>,
    mut world_items: ResMut<WorldItems>,
    mut ids: ResMut<EntityIds>,
    mut rng: ResMut<WorldRng>,
    catalog: Res<AssetCatalog>,
    config: Res<GameConfig>,
) {
    if populated.0 {
        return;
    }
    populated.0 = true;

    let count = respawn_overworld(&mut world_items, &mut ids, &catalog, &config, &mut rng.0);
    info!("[World] Scattered {} collectibles on the overworld", count);
}

// ═══════════════════════════════════════════════════════════════════════
// MAP TRANSITIONS
// ═══════════════════════════════════════════════════════════════════════

fn handle_map_transition(
    mut events: EventReader<MapTransitionEvent>,
    mut active: ResMut<ActiveMap>,
    mut world_items: ResMut<WorldItems>,
    mut ids: ResMut<EntityIds>,
    mut rng: ResMut<WorldRng>,
    catalog: Res<AssetCatalog>,
    config: Res<GameConfig>,
) {
    for event in events.read() {
        if active.map != event.from {
            warn!(
                "[World] Transition from {} ignored, active map is {}",
                event.from.as_str(),
                active.map.as_str()
            );
            continue;
        }
        active.map = event.to;
        info!(
            "[World] {} -> {}",
            event.from.as_str(),
            event.to.as_str()
        );

        if event.from == MapId::PotRoom && event.to == MapId::Overworld {
            let count =
                respawn_overworld(&mut world_items, &mut ids, &catalog, &config, &mut rng.0);
            info!("[World] Overworld respawned with {} collectibles", count);
        }
    }
}
