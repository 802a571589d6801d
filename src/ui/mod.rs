//! Render layer. Only the binary adds this plugin; every gameplay rule lives
//! in the domain plugins and runs headless.

mod hud;
mod screens;
mod sprites;
mod tiles;
mod transitions;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // The start page is entered before `Startup`, so handles load in
        // `PreStartup` once the catalog is filled.
        app.add_systems(
            PreStartup,
            (load_ui_font, sprites::load_sprite_sheets).after(crate::data::populate_catalog),
        );

        // ─── FADE OVERLAY: always present ───
        app.add_systems(Startup, transitions::spawn_fade_overlay);
        app.add_systems(
            Update,
            (
                transitions::trigger_fade_on_transition,
                transitions::update_fade,
            )
                .chain(),
        );

        // ─── START / END SCREENS ───
        app.add_systems(OnEnter(GameState::StartPage), screens::spawn_start_page);
        app.add_systems(OnExit(GameState::StartPage), screens::despawn_start_page);
        app.add_systems(OnEnter(GameState::Ended), screens::spawn_end_page);

        // ─── WORLD: tiles and sprites follow game state every frame ───
        app.add_systems(
            Update,
            (
                tiles::sync_map_tiles,
                tiles::sync_map_props,
                sprites::sync_world_item_sprites,
                sprites::attach_npc_sprites,
                sprites::sync_npc_sprites,
                sprites::attach_player_sprite,
                sprites::sync_player_sprite,
                sprites::sync_pot_frame,
                sprites::sync_pot_ingredients,
            )
                .after(TickSet::Phase)
                .run_if(not(in_state(GameState::StartPage))),
        );

        // ─── HUD: visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnEnter(GameState::Ended), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_hotbar,
                hud::update_npc_greetings,
            )
                .after(TickSet::Phase)
                .run_if(in_state(GameState::Playing).or(in_state(GameState::EndingTransition))),
        );
    }
}

/// Handle to the game's bitmap font, loaded once at startup.
#[derive(Resource, Clone, Default)]
pub struct UiFontHandle(pub Handle<Font>);

fn load_ui_font(mut commands: Commands, asset_server: Res<AssetServer>, catalog: Res<AssetCatalog>) {
    let handle = match catalog.path(UI_FONT) {
        Ok(path) => asset_server.load(path),
        Err(e) => {
            warn!("[Ui] {}; falling back to the default font", e);
            Handle::default()
        }
    };
    commands.insert_resource(UiFontHandle(handle));
}

/// Logical coordinates have their origin at the bottom-left corner of the
/// 800×600 screen; the camera sits at the centre.
pub fn to_screen(pos: Vec2, z: f32) -> Vec3 {
    Vec3::new(pos.x - SCREEN_WIDTH / 2.0, pos.y - SCREEN_HEIGHT / 2.0, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_centre_maps_to_origin() {
        assert_eq!(to_screen(Vec2::new(400.0, 300.0), 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(to_screen(Vec2::ZERO, 0.0), Vec3::new(-400.0, -300.0, 0.0));
    }
}
