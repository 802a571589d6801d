//! Interaction dispatcher (E key)
//!
//! Resolves the interact key to one delivery target and sends a
//! `DeliveryRequestEvent`. The pot wins while the witch is near it in the pot
//! room; otherwise an NPC on the active map within range is picked according
//! to `GameConfig::npc_selection`.

use bevy::prelude::*;
use crate::shared::*;

/// Pick an NPC from `(entity, roster_index, position)` candidates.
pub fn select_npc(
    candidates: &[(Entity, usize, Vec2)],
    player: Vec2,
    radius: f32,
    policy: NpcSelection,
) -> Option<Entity> {
    let in_range = candidates
        .iter()
        .map(|&(entity, roster, pos)| (entity, roster, pos.distance(player)))
        .filter(|&(_, _, d)| d <= radius);

    let best = match policy {
        NpcSelection::FirstInRange => in_range.min_by_key(|&(_, roster, _)| roster),
        NpcSelection::Nearest => in_range.min_by(|a, b| {
            a.2.total_cmp(&b.2).then(a.1.cmp(&b.1))
        }),
    };
    best.map(|(entity, _, _)| entity)
}

pub fn dispatch_interact(
    player_input: Res<PlayerInput>,
    active: Res<ActiveMap>,
    config: Res<GameConfig>,
    inventory: Res<Inventory>,
    player_query: Query<&LogicalPosition, With<Player>>,
    npc_query: Query<(Entity, &Npc, &NpcMapTag, &LogicalPosition)>,
    mut requests: EventWriter<DeliveryRequestEvent>,
    mut failures: EventWriter<DeliveryFailedEvent>,
) {
    if !player_input.interact {
        return;
    }

    let Ok(player_pos) = player_query.get_single() else {
        return;
    };
    let slot = inventory.selected_slot();

    if active.map == MapId::PotRoom
        && player_pos.0.distance(POT_POSITION) <= config.pot_interaction_radius
    {
        requests.send(DeliveryRequestEvent {
            target: DeliveryTarget::Pot,
            slot,
        });
        return;
    }

    let candidates: Vec<(Entity, usize, Vec2)> = npc_query
        .iter()
        .filter(|(_, _, tag, _)| tag.0 == active.map)
        .map(|(entity, npc, _, pos)| (entity, npc.roster_index, pos.0))
        .collect();

    match select_npc(
        &candidates,
        player_pos.0,
        config.interaction_radius,
        config.npc_selection,
    ) {
        Some(npc) => {
            requests.send(DeliveryRequestEvent {
                target: DeliveryTarget::Npc(npc),
                slot,
            });
        }
        None => {
            debug!("[Player] Interact pressed with nothing in range");
            failures.send(DeliveryFailedEvent {
                target: None,
                reason: GameError::NoTarget,
            });
        }
    }
}
