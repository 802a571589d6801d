use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        // Context first, so the first frame of a new state reads its keys.
        app.add_systems(
            PreUpdate,
            (manage_input_context, reset_and_read_input).chain(),
        );
    }
}

/// Hotbar keys, left to right. `Digit0` is the tenth slot.
const SLOT_KEYS: [KeyCode; INVENTORY_SLOTS] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
    KeyCode::Digit0,
];

pub fn slot_for_key(key: KeyCode) -> Option<usize> {
    SLOT_KEYS.iter().position(|k| *k == key)
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    // Quitting works on every screen.
    input.quit = keys.just_pressed(bindings.quit);

    match *context {
        InputContext::Disabled => {}

        InputContext::StartPage => {
            input.interact = keys.just_pressed(bindings.interact);
        }

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis.normalize_or_zero();
            input.run = keys.pressed(bindings.run) || keys.pressed(KeyCode::ShiftRight);

            input.interact = keys.just_pressed(bindings.interact);
            input.brew = keys.just_pressed(bindings.brew);
            input.end_game = keys.just_pressed(bindings.end_game);

            input.select_slot = keys.get_just_pressed().find_map(|k| slot_for_key(*k));
            input.swap_left = keys.just_pressed(bindings.swap_left);
            input.swap_right = keys.just_pressed(bindings.swap_right);
        }
    }
}

/// Derives InputContext from GameState. ONE system, replaces all per-domain guards.
fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::StartPage => InputContext::StartPage,
        GameState::Playing => InputContext::Gameplay,
        GameState::EndingTransition | GameState::Ended => InputContext::Disabled,
    };
}
