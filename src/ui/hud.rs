use bevy::prelude::*;
use crate::shared::*;

use super::{to_screen, UiFontHandle};

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HotbarSlot {
    pub index: usize,
}

#[derive(Component)]
pub struct HotbarItemText {
    pub index: usize,
}

/// Greeting text floating above one NPC.
#[derive(Component)]
pub struct GreetingText {
    pub npc: Entity,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();

    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(56.0),
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(3.0),
                    padding: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|hotbar| {
                for i in 0..INVENTORY_SLOTS {
                    hotbar
                        .spawn((
                            HotbarSlot { index: i },
                            Node {
                                width: Val::Px(64.0),
                                height: Val::Px(46.0),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                flex_direction: FlexDirection::Column,
                                border: UiRect::all(Val::Px(2.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgba(0.15, 0.12, 0.1, 0.85)),
                            BorderColor(Color::srgba(0.4, 0.35, 0.3, 0.8)),
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|slot| {
                            // 1-9, then 0 for the tenth slot
                            slot.spawn((
                                Text::new(format!("{}", (i + 1) % 10)),
                                TextFont {
                                    font: font.clone(),
                                    font_size: 8.0,
                                    ..default()
                                },
                                TextColor(Color::srgba(0.5, 0.5, 0.45, 0.7)),
                                Node {
                                    align_self: AlignSelf::FlexStart,
                                    margin: UiRect::left(Val::Px(2.0)),
                                    ..default()
                                },
                                PickingBehavior::IGNORE,
                            ));
                            slot.spawn((
                                HotbarItemText { index: i },
                                Text::new(""),
                                TextFont {
                                    font: font.clone(),
                                    font_size: 10.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                                PickingBehavior::IGNORE,
                            ));
                        });
                }
            });
        });
}

pub fn despawn_hud(
    mut commands: Commands,
    hud_query: Query<Entity, With<HudRoot>>,
    greeting_query: Query<Entity, With<GreetingText>>,
) {
    for entity in hud_query.iter().chain(greeting_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATES
// ═══════════════════════════════════════════════════════════════════════

/// Short label for a hotbar cell.
fn slot_label(name: Option<&str>) -> String {
    match name {
        Some(name) if name.chars().count() > 8 => {
            let short: String = name.chars().take(7).collect();
            format!("{short}.")
        }
        Some(name) => name.to_string(),
        None => String::new(),
    }
}

pub fn update_hotbar(
    inventory: Res<Inventory>,
    mut slot_query: Query<(&HotbarSlot, &mut BackgroundColor, &mut BorderColor)>,
    mut item_text_query: Query<(&HotbarItemText, &mut Text)>,
) {
    // Highlight selected
    for (slot, mut bg, mut border) in &mut slot_query {
        if slot.index == inventory.selected_slot() {
            *bg = BackgroundColor(Color::srgba(0.3, 0.25, 0.15, 0.95));
            *border = BorderColor(Color::srgb(1.0, 0.84, 0.0));
        } else {
            *bg = BackgroundColor(Color::srgba(0.15, 0.12, 0.1, 0.85));
            *border = BorderColor(Color::srgba(0.4, 0.35, 0.3, 0.8));
        }
    }

    let summary = inventory.summary();
    for (item_text, mut text) in &mut item_text_query {
        let name = summary.get(item_text.index).and_then(|(_, name)| *name);
        **text = slot_label(name);
    }
}

/// One floating text per NPC, filled from its greeting state.
pub fn update_npc_greetings(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    npcs: Query<(Entity, &Npc, &NpcGreeting, &LogicalPosition)>,
    mut texts: Query<(Entity, &GreetingText, &mut Text2d, &mut Transform, &mut Visibility)>,
) {
    let mut has_text = Vec::new();

    for (text_entity, greeting_text, mut text, mut transform, mut visibility) in &mut texts {
        let Ok((_, npc, greeting, pos)) = npcs.get(greeting_text.npc) else {
            commands.entity(text_entity).despawn();
            continue;
        };
        has_text.push(greeting_text.npc);

        let lines = greeting.lines(npc.affinity);
        if lines.is_empty() {
            *visibility = Visibility::Hidden;
            continue;
        }
        **text = lines.join("\n");
        transform.translation = to_screen(pos.0 + Vec2::new(0.0, 65.0), Z_OVERLAY);
        *visibility = Visibility::Inherited;
    }

    for (npc_entity, _, _, pos) in &npcs {
        if has_text.contains(&npc_entity) {
            continue;
        }
        commands.spawn((
            GreetingText { npc: npc_entity },
            Text2d::new(""),
            TextFont {
                font: font_handle.0.clone(),
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_translation(to_screen(pos.0 + Vec2::new(0.0, 65.0), Z_OVERLAY)),
            Visibility::Hidden,
        ));
    }
}
