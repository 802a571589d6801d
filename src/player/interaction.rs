use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════════
// Portals
// ═══════════════════════════════════════════════════════════════════════════

/// Send a `MapTransitionEvent` when the witch steps into the active map's
/// portal circle.
pub fn map_transition_check(
    active: Res<ActiveMap>,
    config: Res<GameConfig>,
    query: Query<&LogicalPosition, With<Player>>,
    mut map_events: EventWriter<MapTransitionEvent>,
) {
    let Ok(pos) = query.get_single() else {
        return;
    };

    if pos.0.distance(active.map.portal()) <= config.portal_radius {
        map_events.send(MapTransitionEvent {
            from: active.map,
            to: active.map.other(),
        });
    }
}

/// Place the witch at the arrival point of the new map. The world domain
/// switches `ActiveMap`; we only move the player. Inventory goes along
/// untouched.
pub fn handle_map_transition(
    mut events: EventReader<MapTransitionEvent>,
    mut query: Query<&mut LogicalPosition, With<Player>>,
) {
    // Process only the most recent transition (in case multiple fire).
    let Some(ev) = events.read().last() else {
        return;
    };

    let Ok(mut pos) = query.get_single_mut() else {
        return;
    };

    pos.0 = ev.to.arrival();
    debug!("[Player] Arrived on {} at {}", ev.to.as_str(), pos.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Item Pickup
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum PickupOutcome {
    Picked {
        item_id: EntityId,
        name: String,
        slot: usize,
    },
    Refused {
        item_id: EntityId,
        name: String,
        reason: GameError,
    },
}

/// Move every item within `radius` of the player into the inventory.
/// Items the inventory refuses stay where they were, and the relative order
/// of the remaining set is preserved.
pub fn collect_nearby(
    items: &mut Vec<WorldItem>,
    inventory: &mut Inventory,
    player_pos: Vec2,
    radius: f32,
) -> Vec<PickupOutcome> {
    let mut kept = Vec::with_capacity(items.len());
    let mut outcomes = Vec::new();

    for item in items.drain(..) {
        if item.position.distance(player_pos) > radius {
            kept.push(item);
            continue;
        }
        let item_id = item.id;
        let name = item.name.clone();
        match inventory.add(item) {
            Ok(slot) => outcomes.push(PickupOutcome::Picked { item_id, name, slot }),
            Err(rejected) => {
                outcomes.push(PickupOutcome::Refused {
                    item_id,
                    name,
                    reason: rejected.reason,
                });
                kept.push(rejected.item);
            }
        }
    }

    *items = kept;
    outcomes
}

/// Proximity pickup against the active map's world set. Runs every tick, so
/// a refused item is retried for as long as the witch stands next to it.
pub fn item_pickup_check(
    active: Res<ActiveMap>,
    config: Res<GameConfig>,
    query: Query<&LogicalPosition, With<Player>>,
    mut world_items: ResMut<WorldItems>,
    mut inventory: ResMut<Inventory>,
    mut picked: EventWriter<ItemPickedUpEvent>,
    mut failed: EventWriter<PickupFailedEvent>,
) {
    let Ok(pos) = query.get_single() else {
        return;
    };

    let map = active.map;
    let outcomes = collect_nearby(
        world_items.on_map_mut(map),
        &mut inventory,
        pos.0,
        config.pickup_radius,
    );

    for outcome in outcomes {
        match outcome {
            PickupOutcome::Picked { item_id, name, slot } => {
                info!("[Player] Picked up {} into slot {}", name, slot);
                picked.send(ItemPickedUpEvent {
                    item_id,
                    name,
                    slot,
                    map,
                });
            }
            PickupOutcome::Refused {
                item_id,
                name,
                reason,
            } => {
                debug!("[Player] Could not pick up {}: {}", name, reason);
                failed.send(PickupFailedEvent {
                    item_id,
                    name,
                    reason,
                });
            }
        }
    }
}
