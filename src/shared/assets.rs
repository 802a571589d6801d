//! Logical sprite identifiers and the catalog that resolves them.
//!
//! Every sprite the game can show is listed in the catalog (populated by the
//! data plugin). Lookups are pure string work, so they behave the same with
//! or without an `AssetServer`.

use bevy::prelude::*;
use std::collections::HashSet;

use super::GameError;

pub const FRUIT_DIR: &str = "fruits_16x16";
pub const ITEM_DIR: &str = "items";
pub const NPC_DIR: &str = "npc";

pub const WITCH_SPRITE: &str = "B_witch_run.png";
pub const POT_SPRITE: &str = "pot/green_pot.png";
pub const ARROW_SPRITE: &str = "arrow.png";
pub const START_PAGE_SPRITE: &str = "tiles/start_page.png";
pub const END_PAGE_SPRITE: &str = "tiles/end_page.png";
pub const UI_FONT: &str = "ENCR10B.TTF";

/// Fruits 0-5 have proper names; anything else is named after its file.
pub const FRUIT_NAMES: [&str; 6] = ["apple", "banana", "cherry", "grape", "orange", "pear"];

/// Number of fruit sprites shipped (`fruit_000.png` ..).
pub const FRUIT_VARIETIES: u32 = 12;
/// Giftable gems scattered on the overworld.
pub const GEM_NAMES: [&str; 5] = ["blue_1", "blue_2", "green_1", "purple_1", "red_1"];
/// What the pot produces.
pub const POTION_NAME: &str = "potion";
pub const TILE_VARIANTS: u8 = 10;

pub fn tile_sprite(tile: u8) -> String {
    format!("tiles/grass{tile}.png")
}

/// A fruit is addressed either by sheet index or by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FruitRef<'a> {
    Index(u32),
    File(&'a str),
}

pub fn fruit_filename(index: u32) -> String {
    format!("fruit_{index:03}.png")
}

/// `fruit_002.png` → `Some(2)`. Anything not shaped like that → `None`.
pub fn parse_fruit_index(filename: &str) -> Option<u32> {
    let digits = filename.strip_prefix("fruit_")?.strip_suffix(".png")?;
    if digits.len() != 3 {
        return None;
    }
    digits.parse().ok()
}

pub fn fruit_name(index: Option<u32>, filename: &str) -> String {
    index
        .and_then(|i| FRUIT_NAMES.get(i as usize))
        .map(|name| name.to_string())
        .unwrap_or_else(|| file_stem(filename).to_string())
}

/// Strip any directory part and make sure the name ends in `.png`.
pub fn png_filename(name_or_file: &str) -> String {
    let base = name_or_file.rsplit('/').next().unwrap_or(name_or_file);
    if base.ends_with(".png") {
        base.to_string()
    } else {
        format!("{base}.png")
    }
}

pub fn file_stem(filename: &str) -> &str {
    filename.strip_suffix(".png").unwrap_or(filename)
}

/// A resolved sprite: display name, asset path and (for fruits) sheet index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRef {
    pub name: String,
    pub path: String,
    pub index: Option<u32>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AssetCatalog {
    paths: HashSet<String>,
}

impl AssetCatalog {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Resolve a fixed path such as [`WITCH_SPRITE`].
    pub fn path(&self, path: &str) -> Result<String, GameError> {
        if self.paths.contains(path) {
            Ok(path.to_string())
        } else {
            Err(GameError::AssetNotFound(path.to_string()))
        }
    }

    pub fn fruit(&self, fruit: FruitRef<'_>) -> Result<SpriteRef, GameError> {
        let (index, filename) = match fruit {
            FruitRef::Index(i) => (Some(i), fruit_filename(i)),
            FruitRef::File(file) => {
                let filename = png_filename(file);
                (parse_fruit_index(&filename), filename)
            }
        };
        let path = self.path(&format!("{FRUIT_DIR}/{filename}"))?;
        Ok(SpriteRef {
            name: fruit_name(index, &filename),
            path,
            index,
        })
    }

    pub fn item(&self, name_or_file: &str) -> Result<SpriteRef, GameError> {
        self.named(ITEM_DIR, name_or_file)
    }

    pub fn npc(&self, name_or_file: &str) -> Result<SpriteRef, GameError> {
        self.named(NPC_DIR, name_or_file)
    }

    fn named(&self, dir: &str, name_or_file: &str) -> Result<SpriteRef, GameError> {
        let filename = png_filename(name_or_file);
        let path = self.path(&format!("{dir}/{filename}"))?;
        Ok(SpriteRef {
            name: file_stem(&filename).to_string(),
            path,
            index: None,
        })
    }
}
