//! NPC spawning: instantiate the fixed cast on the overworld.

use bevy::prelude::*;
use crate::shared::*;

/// Resource tracking which NPCs are currently spawned, by name.
#[derive(Resource, Debug, Default)]
pub struct SpawnedNpcs {
    pub entities: std::collections::HashMap<String, Entity>,
}

/// System: on entering Playing state, spawn every cast member whose sprite
/// exists. A missing sprite drops that NPC with a warning.
pub fn spawn_initial_npcs(
    mut commands: Commands,
    mut spawned: ResMut<SpawnedNpcs>,
    mut ids: ResMut<EntityIds>,
    catalog: Res<AssetCatalog>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !spawned.entities.is_empty() {
        return;
    }

    for (roster_index, (name, position)) in NPC_CAST.iter().enumerate() {
        let sprite = match catalog.npc(name) {
            Ok(sprite) => sprite,
            Err(e) => {
                warn!("[Npc] Skipping {}: {}", name, e);
                continue;
            }
        };

        let entity = commands
            .spawn((
                Npc {
                    id: ids.next(),
                    name: sprite.name.clone(),
                    sprite: sprite.path,
                    affinity: 0,
                    roster_index,
                },
                NpcMapTag(MapId::Overworld),
                LogicalPosition(*position),
                NpcGreeting::default(),
            ))
            .id();
        spawned.entities.insert(sprite.name, entity);
    }

    info!("[Npc] Spawned {} NPCs", spawned.entities.len());
}
