//! NPC domain plugin for Witch's Pot.
//!
//! Manages the fixed cast: spawning, gifts and the greeting bubble.
//! Communicates exclusively through shared resources and events.

use bevy::prelude::*;
use crate::shared::*;

mod gifts;
mod greeting;
mod spawning;

pub use gifts::give_selected;
pub use greeting::step_greeting;
pub use spawning::SpawnedNpcs;

use gifts::handle_gifts;
use greeting::update_greetings;
use spawning::spawn_initial_npcs;

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnedNpcs>()
            .add_systems(OnEnter(GameState::Playing), spawn_initial_npcs)
            .add_systems(
                Update,
                (handle_gifts, update_greetings)
                    .chain()
                    .in_set(TickSet::Effects)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
