//! `GameConfig` from RON.

use bevy::prelude::*;
use crate::shared::*;

/// Default location of the tunables file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config.ron";

pub fn parse_config(text: &str) -> Result<GameConfig, GameError> {
    let config: GameConfig = ron::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &GameConfig) -> Result<(), GameError> {
    let radii = [
        ("pickup_radius", config.pickup_radius),
        ("interaction_radius", config.interaction_radius),
        ("pot_interaction_radius", config.pot_interaction_radius),
        ("portal_radius", config.portal_radius),
        ("walk_speed", config.walk_speed),
        ("tick_seconds", config.tick_seconds),
    ];
    for (name, value) in radii {
        if !(value.is_finite() && value > 0.0) {
            return Err(GameError::Config(format!("{name} must be positive, got {value}")));
        }
    }
    if config.ending_delay_secs < 0.0 || config.run_multiplier < 1.0 {
        return Err(GameError::Config(
            "ending_delay_secs must be >= 0 and run_multiplier >= 1".into(),
        ));
    }
    Ok(())
}

/// Read the config file. A missing file means defaults; a broken one is
/// reported and also falls back to defaults.
pub fn load_config(path: &str) -> GameConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            info!("[Data] No config at {} ({}), using defaults", path, e);
            return GameConfig::default();
        }
    };

    match parse_config(&text) {
        Ok(config) => {
            info!("[Data] Loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("[Data] Ignoring {}: {}", path, e);
            GameConfig::default()
        }
    }
}
