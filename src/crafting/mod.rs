use bevy::prelude::*;
use crate::shared::*;

mod brewing;

pub use brewing::{brew, deposit_selected};

pub struct CraftingPlugin;

impl Plugin for CraftingPlugin {
    fn build(&self, app: &mut App) {
        app
            // Deposits and brewing only while playing
            .add_systems(
                Update,
                (brewing::handle_pot_deposit, brewing::handle_brew_input)
                    .in_set(TickSet::Effects)
                    .run_if(in_state(GameState::Playing)),
            )
            // The pot keeps bubbling on every screen
            .add_systems(Update, brewing::animate_pot);
    }
}
