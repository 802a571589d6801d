use bevy::prelude::*;
use crate::shared::*;

/// Move the selected item one slot left (`-1`) or right (`+1`), taking the
/// selection along. At either end of the bar nothing happens.
pub fn shift_selected(inventory: &mut Inventory, dir: isize) -> Result<usize, GameError> {
    let from = inventory.selected_slot();
    let Some(to) = from.checked_add_signed(dir).filter(|&to| to < inventory.capacity()) else {
        return Ok(from);
    };
    inventory.swap(from, to)?;
    inventory.select(to)?;
    Ok(to)
}

/// Digit keys pick a slot; bracket keys carry the selected item sideways.
pub fn hotbar_input(input: Res<PlayerInput>, mut inventory: ResMut<Inventory>) {
    if let Some(slot) = input.select_slot {
        if let Err(e) = inventory.select(slot) {
            error!("[Player] Hotbar select failed: {}", e);
        }
    }

    let dir = match (input.swap_left, input.swap_right) {
        (true, false) => -1,
        (false, true) => 1,
        _ => return,
    };
    match shift_selected(&mut inventory, dir) {
        Ok(slot) => debug!("[Player] Selected item now in slot {}", slot),
        Err(e) => error!("[Player] Hotbar swap failed: {}", e),
    }
}
