//! Speech above NPCs: "Give me Item" when the witch walks up, heart count
//! after a gift.

use bevy::prelude::*;
use crate::shared::*;

/// One greeting step given whether the witch is near this frame and whether
/// a gift just landed.
pub fn step_greeting(greeting: &mut NpcGreeting, near: bool, gifted: bool) {
    if near && !greeting.was_near {
        greeting.kind = GreetingKind::AskForItem;
    }
    if gifted {
        greeting.kind = GreetingKind::Heart;
    }
    greeting.visible = near;
    greeting.was_near = near;
}

pub fn update_greetings(
    active: Res<ActiveMap>,
    config: Res<GameConfig>,
    mut gifts: EventReader<GiftGivenEvent>,
    player: Query<&LogicalPosition, With<Player>>,
    mut npcs: Query<(Entity, &NpcMapTag, &LogicalPosition, &mut NpcGreeting), Without<Player>>,
) {
    let gifted: Vec<Entity> = gifts.read().map(|ev| ev.npc).collect();
    let Ok(player_pos) = player.get_single() else {
        return;
    };

    for (entity, tag, pos, mut greeting) in &mut npcs {
        let near = tag.0 == active.map && pos.0.distance(player_pos.0) <= config.interaction_radius;
        step_greeting(&mut greeting, near, gifted.contains(&entity));
    }
}
