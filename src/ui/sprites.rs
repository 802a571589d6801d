//! Sprites for everything that lives in game state: collectibles, NPCs, the
//! witch and the pot animation.

use bevy::prelude::*;
use std::collections::HashSet;
use crate::shared::*;

use super::tiles::PotSprite;
use super::to_screen;

/// Source frames in both sheets are 48×48.
const SHEET_FRAME: u32 = 48;
const ITEM_DRAW_SIZE: f32 = 50.0;
const NPC_DRAW_SIZE: f32 = 100.0;
const WITCH_DRAW_SIZE: f32 = 100.0;
/// Ingredients sit in a row under the pot.
const INGREDIENT_ROW_Y: f32 = 150.0;
const INGREDIENT_SPACING: f32 = 80.0;

pub struct Sheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

#[derive(Resource, Default)]
pub struct SpriteSheets {
    pub witch: Option<Sheet>,
    pub pot: Option<Sheet>,
}

#[derive(Component)]
pub struct WorldItemSprite(pub EntityId);

/// Draw size and z layer for anything placed on a map.
fn draw_layer(kind: EntityKind) -> (f32, f32) {
    match kind {
        EntityKind::Fruit | EntityKind::Item => (ITEM_DRAW_SIZE, Z_WORLD_ITEMS),
        EntityKind::Npc => (NPC_DRAW_SIZE, Z_NPCS),
    }
}

pub fn load_sprite_sheets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    // The run cycle is stacked vertically, 8 rows.
    let witch = catalog.path(WITCH_SPRITE).ok().map(|path| Sheet {
        image: asset_server.load(path),
        layout: layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(SHEET_FRAME),
            1,
            WITCH_FRAME_COUNT as u32,
            None,
            None,
        )),
    });
    // The pot bubbles left to right, 6 columns.
    let pot = catalog.path(POT_SPRITE).ok().map(|path| Sheet {
        image: asset_server.load(path),
        layout: layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(SHEET_FRAME),
            POT_FRAME_COUNT as u32,
            1,
            None,
            None,
        )),
    });
    if pot.is_none() {
        warn!("[Ui] Pot sheet missing, pot will not be drawn");
    }
    commands.insert_resource(SpriteSheets { witch, pot });
}

/// Keep one sprite per collectible lying on the active map.
pub fn sync_world_item_sprites(
    mut commands: Commands,
    active: Res<ActiveMap>,
    world_items: Res<WorldItems>,
    asset_server: Res<AssetServer>,
    sprites: Query<(Entity, &WorldItemSprite)>,
) {
    let items = world_items.on_map(active.map);
    let wanted: HashSet<EntityId> = items.iter().map(|i| i.id).collect();

    let mut shown = HashSet::new();
    for (entity, sprite) in &sprites {
        if wanted.contains(&sprite.0) {
            shown.insert(sprite.0);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for item in items.iter().filter(|i| !shown.contains(&i.id)) {
        let (size, z) = draw_layer(item.entity_kind());
        commands.spawn((
            WorldItemSprite(item.id),
            Sprite {
                image: asset_server.load(item.sprite.clone()),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_translation(to_screen(item.position, z)),
        ));
    }
}

pub fn attach_npc_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    added: Query<(Entity, &Npc, &LogicalPosition), Added<Npc>>,
) {
    for (entity, npc, pos) in &added {
        let (size, z) = draw_layer(npc.entity_kind());
        commands.entity(entity).insert((
            Sprite {
                image: asset_server.load(npc.sprite.clone()),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_translation(to_screen(pos.0, z)),
            Visibility::default(),
        ));
    }
}

/// NPCs only show on their own map.
pub fn sync_npc_sprites(
    active: Res<ActiveMap>,
    mut npcs: Query<(&Npc, &NpcMapTag, &LogicalPosition, &mut Transform, &mut Visibility)>,
) {
    for (npc, tag, pos, mut transform, mut visibility) in &mut npcs {
        let (_, z) = draw_layer(npc.entity_kind());
        transform.translation = to_screen(pos.0, z);
        *visibility = if tag.0 == active.map {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn attach_player_sprite(
    mut commands: Commands,
    sheets: Res<SpriteSheets>,
    added: Query<(Entity, &LogicalPosition), Added<Player>>,
) {
    let Some(witch) = &sheets.witch else {
        return;
    };
    for (entity, pos) in &added {
        commands.entity(entity).insert((
            Sprite {
                image: witch.image.clone(),
                texture_atlas: Some(TextureAtlas {
                    layout: witch.layout.clone(),
                    index: witch_atlas_index(0),
                }),
                custom_size: Some(Vec2::splat(WITCH_DRAW_SIZE)),
                ..default()
            },
            Transform::from_translation(to_screen(pos.0, Z_PLAYER)),
        ));
    }
}

/// Frame 0 is the bottom row of the sheet; atlas rows count from the top.
fn witch_atlas_index(frame: usize) -> usize {
    WITCH_FRAME_COUNT - 1 - (frame % WITCH_FRAME_COUNT)
}

pub fn sync_player_sprite(
    mut player: Query<(&LogicalPosition, &PlayerMovement, &mut Transform, &mut Sprite), With<Player>>,
) {
    let Ok((pos, movement, mut transform, mut sprite)) = player.get_single_mut() else {
        return;
    };
    transform.translation = to_screen(pos.0, Z_PLAYER);
    sprite.flip_x = movement.facing == Facing::Left;
    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        atlas.index = witch_atlas_index(movement.frame);
    }
}

pub fn sync_pot_frame(anim: Res<PotAnimation>, mut pots: Query<&mut Sprite, With<PotSprite>>) {
    for mut sprite in &mut pots {
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = anim.frame % POT_FRAME_COUNT;
        }
    }
}

/// Marks the sprite of one ingredient waiting in the pot.
#[derive(Component)]
pub struct PotIngredientSprite(pub EntityId);

fn ingredient_position(index: usize) -> Vec2 {
    Vec2::new(
        POT_POSITION.x - INGREDIENT_SPACING + index as f32 * INGREDIENT_SPACING,
        INGREDIENT_ROW_Y,
    )
}

/// Draw what is in the pot under it, in deposit order, while in the pot room.
pub fn sync_pot_ingredients(
    mut commands: Commands,
    active: Res<ActiveMap>,
    pot: Res<Pot>,
    asset_server: Res<AssetServer>,
    sprites: Query<(Entity, &PotIngredientSprite)>,
) {
    let wanted: Vec<&WorldItem> = if active.map == MapId::PotRoom {
        pot.contents().iter().take(POT_CAPACITY).collect()
    } else {
        Vec::new()
    };
    let shown: Vec<EntityId> = sprites.iter().map(|(_, s)| s.0).collect();
    let wanted_ids: Vec<EntityId> = wanted.iter().map(|i| i.id).collect();
    if shown == wanted_ids {
        return;
    }

    for (entity, _) in &sprites {
        commands.entity(entity).despawn();
    }
    for (index, item) in wanted.into_iter().enumerate() {
        let (size, z) = draw_layer(item.entity_kind());
        commands.spawn((
            PotIngredientSprite(item.id),
            Sprite {
                image: asset_server.load(item.sprite.clone()),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_translation(to_screen(ingredient_position(index), z)),
        ));
    }
}
