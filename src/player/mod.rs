mod hotbar;
mod interact_dispatch;
mod interaction;
mod movement;
mod spawn;

pub use hotbar::shift_selected;
pub use interact_dispatch::select_npc;
pub use interaction::{collect_nearby, PickupOutcome};
pub use movement::step_position;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn the witch when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        app.add_systems(
            Update,
            hotbar::hotbar_input
                .in_set(TickSet::Input)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (movement::player_movement, movement::animate_run_cycle)
                .chain()
                .in_set(TickSet::Movement)
                .run_if(in_state(GameState::Playing)),
        );

        // Pickup sees this frame's position; dispatch resolves the interact
        // key to a target before the effects stage applies it.
        app.add_systems(
            Update,
            (
                interaction::item_pickup_check,
                interaction::map_transition_check,
                interact_dispatch::dispatch_interact,
            )
                .in_set(TickSet::Proximity)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            interaction::handle_map_transition
                .in_set(TickSet::Effects)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
