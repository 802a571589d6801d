//! Data layer: the asset manifest and gameplay config.
//!
//! At startup this plugin fills the `AssetCatalog` with every manifest entry
//! that is actually present under the asset root. Every other domain
//! resolves sprite names through the catalog and never builds asset paths
//! itself, so a missing file surfaces as `AssetNotFound` at the point of use.
//! It also owns loading `GameConfig` from `assets/config.ron`.

pub mod config;

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use crate::shared::*;

pub use config::{load_config, parse_config, CONFIG_PATH};

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        // Loaded here rather than in a system so that every plugin sees the
        // final values from its first frame. A config inserted earlier wins.
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(load_config(CONFIG_PATH));
        }
        app.init_resource::<AssetRoot>()
            .init_resource::<AssetCatalog>()
            .add_systems(PreStartup, populate_catalog);
    }
}

/// Directory the manifest is checked against. Same default as Bevy's
/// `AssetPlugin::file_path`.
#[derive(Resource, Debug, Clone)]
pub struct AssetRoot(pub PathBuf);

impl Default for AssetRoot {
    fn default() -> Self {
        Self(PathBuf::from(ASSET_ROOT))
    }
}

pub const ASSET_ROOT: &str = "assets";

/// NPC sprites shipped with the game.
pub const NPC_SPRITES: [&str; 3] = ["girl1_idle", "girl2_idle", "boy1_idle"];

/// Every asset path the game ships with.
pub fn manifest() -> Vec<String> {
    let mut paths = Vec::new();

    for i in 0..FRUIT_VARIETIES {
        paths.push(format!("{FRUIT_DIR}/{}", fruit_filename(i)));
    }
    for gem in GEM_NAMES.iter().chain(std::iter::once(&POTION_NAME)) {
        paths.push(format!("{ITEM_DIR}/{}", png_filename(gem)));
    }
    for npc in NPC_SPRITES {
        paths.push(format!("{NPC_DIR}/{}", png_filename(npc)));
    }
    for tile in 1..=TILE_VARIANTS {
        paths.push(tile_sprite(tile));
    }
    for fixed in [
        WITCH_SPRITE,
        POT_SPRITE,
        ARROW_SPRITE,
        START_PAGE_SPRITE,
        END_PAGE_SPRITE,
        UI_FONT,
    ] {
        paths.push(fixed.to_string());
    }

    paths
}

/// Split the manifest into entries found under `root` and entries missing.
pub fn scan_manifest(root: &Path) -> (Vec<String>, Vec<String>) {
    manifest()
        .into_iter()
        .partition(|path| root.join(path).is_file())
}

pub fn populate_catalog(root: Res<AssetRoot>, mut catalog: ResMut<AssetCatalog>) {
    let (found, missing) = scan_manifest(&root.0);
    for path in &missing {
        warn!("[Data] Asset missing: {}", root.0.join(path).display());
    }
    for path in found {
        catalog.insert(path);
    }
    info!(
        "[Data] Asset catalog ready: {} entries, {} missing under {}",
        catalog.len(),
        missing.len(),
        root.0.display()
    );
}
