//! Full-screen start and end pages.

use bevy::prelude::*;
use crate::shared::*;

use super::UiFontHandle;

#[derive(Component)]
pub struct StartPageRoot;

#[derive(Component)]
pub struct EndPageRoot;

fn page_image(asset_server: &AssetServer, catalog: &AssetCatalog, path: &str) -> Option<ImageNode> {
    match catalog.path(path) {
        Ok(path) => Some(ImageNode::new(asset_server.load(path))),
        Err(e) => {
            warn!("[Ui] {}", e);
            None
        }
    }
}

fn page_text(font: &Handle<Font>, text: &str) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

pub fn spawn_start_page(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
) {
    let mut root = commands.spawn((
        StartPageRoot,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::FlexEnd,
            padding: UiRect::bottom(Val::Px(80.0)),
            ..default()
        },
        BackgroundColor(Color::srgb(0.08, 0.12, 0.06)),
        GlobalZIndex(50),
    ));
    if let Some(image) = page_image(&asset_server, &catalog, START_PAGE_SPRITE) {
        root.insert(image);
    }
    root.with_children(|parent| {
        parent.spawn(page_text(&font_handle.0, "press E"));
    });
}

pub fn despawn_start_page(mut commands: Commands, query: Query<Entity, With<StartPageRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn spawn_end_page(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    asset_server: Res<AssetServer>,
    catalog: Res<AssetCatalog>,
) {
    let mut root = commands.spawn((
        EndPageRoot,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::FlexStart,
            padding: UiRect::top(Val::Px(70.0)),
            ..default()
        },
        BackgroundColor(Color::srgb(0.05, 0.03, 0.08)),
        GlobalZIndex(50),
    ));
    if let Some(image) = page_image(&asset_server, &catalog, END_PAGE_SPRITE) {
        root.insert(image);
    }
    root.with_children(|parent| {
        parent.spawn(page_text(&font_handle.0, "GAME END"));
    });
}
