use bevy::prelude::*;
use crate::shared::*;

/// Move one step, resolving each axis separately so the witch slides along
/// the pot instead of sticking to it. The result stays on screen.
pub fn step_position(pos: Vec2, delta: Vec2, map: MapId) -> Vec2 {
    let min = WITCH_HALF_SIZE;
    let max = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) - WITCH_HALF_SIZE;
    let blocked = |from: Vec2, to: Vec2| {
        map == MapId::PotRoom
            && overlaps_pot(to, WITCH_HALF_SIZE)
            && !overlaps_pot(from, WITCH_HALF_SIZE)
    };

    let mut next = pos;

    let try_x = Vec2::new((next.x + delta.x).clamp(min.x, max.x), next.y);
    if !blocked(next, try_x) {
        next = try_x;
    }

    let try_y = Vec2::new(next.x, (next.y + delta.y).clamp(min.y, max.y));
    if !blocked(next, try_y) {
        next = try_y;
    }

    next
}

/// Core movement system. Reads the frame's `PlayerInput`, applies velocity
/// and updates facing.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    active: Res<ActiveMap>,
    mut query: Query<(&mut LogicalPosition, &mut PlayerMovement), With<Player>>,
) {
    let Ok((mut pos, mut movement)) = query.get_single_mut() else {
        return;
    };

    let dir = input.move_axis;
    movement.is_running = input.run;

    if dir == Vec2::ZERO {
        movement.is_moving = false;
        return;
    }
    movement.is_moving = true;

    // Vertical-only input keeps the previous facing.
    if dir.x < 0.0 {
        movement.facing = Facing::Left;
    } else if dir.x > 0.0 {
        movement.facing = Facing::Right;
    }

    let speed = if movement.is_running {
        movement.speed * config.run_multiplier
    } else {
        movement.speed
    };
    let delta = dir.normalize_or_zero() * speed * time.delta_secs();
    pos.0 = step_position(pos.0, delta, active.map);
}

/// Advance the 8-frame run cycle while moving; idle shows frame 0.
pub fn animate_run_cycle(
    time: Res<Time>,
    mut query: Query<&mut PlayerMovement, With<Player>>,
) {
    let Ok(mut movement) = query.get_single_mut() else {
        return;
    };

    if !movement.is_moving {
        movement.frame = 0;
        movement.frame_timer.reset();
        return;
    }

    movement.frame_timer.tick(time.delta());
    let steps = movement.frame_timer.times_finished_this_tick() as usize;
    movement.frame = (movement.frame + steps) % WITCH_FRAME_COUNT;
}
