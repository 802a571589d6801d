//! Gift system: hand the selected item to an NPC for +1 affinity.

use bevy::prelude::*;
use crate::shared::*;

/// Give the item in `slot` to `npc`. Only `Item`-typed entities are accepted;
/// fruits belong in the pot. Returns the item name and the new affinity.
pub fn give_selected(
    inventory: &mut Inventory,
    npc: &mut Npc,
    slot: usize,
) -> Result<(String, u32), GameError> {
    let item = inventory.get(slot)?.ok_or(GameError::EmptySlot { index: slot })?;
    let found = item.item_type();
    if found != ItemType::Item {
        return Err(GameError::WrongItemType {
            item: item.name.clone(),
            expected: ItemType::Item,
            found,
        });
    }

    let item = inventory
        .remove(slot)?
        .ok_or(GameError::EmptySlot { index: slot })?;
    let name = item.name.clone();
    let affinity = npc.receive_item(item);
    Ok((name, affinity))
}

/// Apply NPC-targeted delivery requests.
pub fn handle_gifts(
    mut requests: EventReader<DeliveryRequestEvent>,
    mut inventory: ResMut<Inventory>,
    mut npc_query: Query<&mut Npc>,
    mut delivered: EventWriter<DeliveryEvent>,
    mut gifts: EventWriter<GiftGivenEvent>,
    mut failed: EventWriter<DeliveryFailedEvent>,
) {
    for request in requests.read() {
        let DeliveryTarget::Npc(entity) = request.target else {
            continue;
        };
        let Ok(mut npc) = npc_query.get_mut(entity) else {
            warn!("[Npc] Gift target {:?} not found", entity);
            continue;
        };

        match give_selected(&mut inventory, &mut npc, request.slot) {
            Ok((item_name, affinity)) => {
                info!(
                    "[Npc] {} received {} (heart {})",
                    npc.name, item_name, affinity
                );
                delivered.send(DeliveryEvent {
                    target: request.target,
                    item_name: item_name.clone(),
                    slot: request.slot,
                });
                gifts.send(GiftGivenEvent {
                    npc: entity,
                    npc_name: npc.name.clone(),
                    item_name,
                    affinity,
                });
            }
            Err(reason) => {
                if matches!(reason, GameError::IndexOutOfRange { .. }) {
                    error!("[Npc] Gift from slot {}: {}", request.slot, reason);
                } else {
                    info!("[Npc] {} refused the gift: {}", npc.name, reason);
                }
                failed.send(DeliveryFailedEvent {
                    target: Some(request.target),
                    reason,
                });
            }
        }
    }
}
