use bevy::prelude::*;
use crate::shared::*;

/// Spawn the witch. Runs once on `OnEnter(GameState::Playing)`.
///
/// The render layer attaches the sprite; here we only make sure the sheet
/// exists, since the game cannot run without it.
pub fn spawn_player(
    mut commands: Commands,
    existing: Query<Entity, With<Player>>,
    catalog: Res<AssetCatalog>,
    config: Res<GameConfig>,
    mut exit: EventWriter<AppExit>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    if let Err(e) = catalog.path(WITCH_SPRITE) {
        error!("[Player] Cannot start without the witch sprite: {}", e);
        exit.send(AppExit::error());
        return;
    }

    commands.spawn((
        Player,
        PlayerMovement {
            speed: config.walk_speed,
            // One run-cycle frame per reference tick.
            frame_timer: Timer::from_seconds(config.tick_seconds, TimerMode::Repeating),
            ..default()
        },
        LogicalPosition(PLAYER_START),
    ));
    info!("[Player] Witch spawned at {}", PLAYER_START);
}
