//! Pot deposits and brewing.

use bevy::prelude::*;
use crate::shared::*;

/// Move the item in `slot` into the pot and return its name.
///
/// Nothing moves unless the deposit can succeed: an empty slot, a gift item
/// or a full pot leave both containers exactly as they were.
pub fn deposit_selected(
    inventory: &mut Inventory,
    pot: &mut Pot,
    slot: usize,
) -> Result<String, GameError> {
    let item = inventory.get(slot)?.ok_or(GameError::EmptySlot { index: slot })?;
    let found = item.item_type();
    if found != ItemType::Source {
        return Err(GameError::WrongItemType {
            item: item.name.clone(),
            expected: ItemType::Source,
            found,
        });
    }
    if pot.is_full() {
        return Err(GameError::PotFull);
    }

    let item = inventory
        .remove(slot)?
        .ok_or(GameError::EmptySlot { index: slot })?;
    let name = item.name.clone();
    match pot.add(item) {
        Ok(_) => Ok(name),
        Err(rejected) => {
            inventory.replace(slot, rejected.item)?;
            Err(rejected.reason)
        }
    }
}

/// Turn a full pot into one potion placed at the pot's output point.
pub fn brew(pot: &mut Pot, ids: &mut EntityIds, catalog: &AssetCatalog) -> Result<WorldItem, GameError> {
    if !pot.is_full() {
        return Err(GameError::PotNotReady {
            held: pot.len(),
            capacity: pot.capacity(),
        });
    }
    let potion = WorldItem::item(ids.next(), POTION_NAME, POT_OUTPUT, catalog)?;
    pot.drain();
    Ok(potion)
}

pub fn handle_pot_deposit(
    mut requests: EventReader<DeliveryRequestEvent>,
    mut inventory: ResMut<Inventory>,
    mut pot: ResMut<Pot>,
    mut delivered: EventWriter<DeliveryEvent>,
    mut failed: EventWriter<DeliveryFailedEvent>,
) {
    for request in requests.read() {
        if request.target != DeliveryTarget::Pot {
            continue;
        }

        match deposit_selected(&mut inventory, &mut pot, request.slot) {
            Ok(item_name) => {
                info!(
                    "[Pot] {} added ({}/{})",
                    item_name,
                    pot.len(),
                    pot.capacity()
                );
                delivered.send(DeliveryEvent {
                    target: DeliveryTarget::Pot,
                    item_name,
                    slot: request.slot,
                });
            }
            Err(reason) => {
                if matches!(reason, GameError::IndexOutOfRange { .. }) {
                    error!("[Pot] Deposit from slot {}: {}", request.slot, reason);
                } else {
                    info!("[Pot] Deposit refused: {}", reason);
                }
                failed.send(DeliveryFailedEvent {
                    target: Some(DeliveryTarget::Pot),
                    reason,
                });
            }
        }
    }
}

/// Brew input while standing at the pot.
pub fn handle_brew_input(
    input: Res<PlayerInput>,
    active: Res<ActiveMap>,
    config: Res<GameConfig>,
    catalog: Res<AssetCatalog>,
    player: Query<&LogicalPosition, With<Player>>,
    mut pot: ResMut<Pot>,
    mut ids: ResMut<EntityIds>,
    mut world_items: ResMut<WorldItems>,
    mut brewed: EventWriter<PotBrewedEvent>,
) {
    if !input.brew || active.map != MapId::PotRoom {
        return;
    }
    let Ok(pos) = player.get_single() else {
        return;
    };
    if pos.0.distance(POT_POSITION) > config.pot_interaction_radius {
        return;
    }

    let ingredients: Vec<String> = pot.contents().iter().map(|i| i.name.clone()).collect();
    match brew(&mut pot, &mut ids, &catalog) {
        Ok(potion) => {
            info!("[Pot] Brewed {} from {:?}", potion.name, ingredients);
            brewed.send(PotBrewedEvent {
                product: potion.id,
                product_name: potion.name.clone(),
                ingredients,
            });
            world_items.on_map_mut(MapId::PotRoom).push(potion);
        }
        Err(GameError::AssetNotFound(path)) => {
            warn!("[Pot] Cannot brew, missing sprite {}", path);
        }
        Err(e) => info!("[Pot] {}", e),
    }
}

/// Cosmetic; advances in every state.
pub fn animate_pot(time: Res<Time>, mut anim: ResMut<PotAnimation>) {
    anim.timer.tick(time.delta());
    let steps = anim.timer.times_finished_this_tick() as usize;
    if steps > 0 {
        anim.frame = (anim.frame + steps) % POT_FRAME_COUNT;
    }
}
