//! Ground tiles and fixed props (pot, portal arrow) for the active map.

use bevy::prelude::*;
use crate::shared::*;
use crate::world::maps::{generate_map, MapDef};

use super::sprites::SpriteSheets;
use super::to_screen;

#[derive(Component)]
pub struct MapTile;

/// Anything drawn only on one map besides tiles: the pot and portal arrows.
#[derive(Component)]
pub struct MapProp;

#[derive(Component)]
pub struct PotSprite;

/// Rebuild the tile layer whenever the active map changes.
pub fn sync_map_tiles(
    mut commands: Commands,
    active: Res<ActiveMap>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
    tiles: Query<Entity, With<MapTile>>,
    mut rendered: Local<Option<MapId>>,
) {
    if *rendered == Some(active.map) {
        return;
    }
    *rendered = Some(active.map);

    for entity in &tiles {
        commands.entity(entity).despawn();
    }

    let map_def = generate_map(active.map);
    for row in 0..map_def.height {
        for col in 0..map_def.width {
            let Some(tile) = map_def.get_tile(col, row) else {
                continue;
            };
            let path = match catalog.path(&tile_sprite(tile)) {
                Ok(path) => path,
                Err(_) => continue,
            };
            commands.spawn((
                MapTile,
                Sprite {
                    image: asset_server.load(path),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(to_screen(
                    MapDef::tile_center(col, row),
                    Z_BACKGROUND,
                )),
            ));
        }
    }
    debug!("[Ui] Drew {} tiles for {}", map_def.tiles.len(), active.map.as_str());
}

/// Pot (pot room only) and the portal arrow on each map.
pub fn sync_map_props(
    mut commands: Commands,
    active: Res<ActiveMap>,
    sheets: Res<SpriteSheets>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
    props: Query<Entity, With<MapProp>>,
    mut rendered: Local<Option<MapId>>,
) {
    if *rendered == Some(active.map) {
        return;
    }
    *rendered = Some(active.map);

    for entity in &props {
        commands.entity(entity).despawn();
    }

    if let Ok(path) = catalog.path(ARROW_SPRITE) {
        commands.spawn((
            MapProp,
            Sprite {
                image: asset_server.load(path),
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(to_screen(active.map.portal(), Z_PROPS)),
        ));
    }

    if active.map == MapId::PotRoom {
        if let Some(pot) = &sheets.pot {
            commands.spawn((
                MapProp,
                PotSprite,
                Sprite {
                    image: pot.image.clone(),
                    texture_atlas: Some(TextureAtlas {
                        layout: pot.layout.clone(),
                        index: 0,
                    }),
                    custom_size: Some(Vec2::splat(POT_DRAW_SIZE)),
                    ..default()
                },
                Transform::from_translation(to_screen(POT_POSITION, Z_PROPS)),
            ));
        }
    }
}
