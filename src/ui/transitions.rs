use bevy::prelude::*;
use crate::shared::*;

/// Marker for the full-screen fade overlay.
#[derive(Component)]
pub struct ScreenFadeOverlay;

/// Drives the overlay's opacity toward a target.
#[derive(Resource)]
pub struct ScreenFade {
    /// 0.0 is transparent, 1.0 opaque black.
    pub alpha: f32,
    pub target_alpha: f32,
    /// Alpha units per second.
    pub speed: f32,
    /// Fade back to clear once the target is reached.
    pub bounce: bool,
    pub active: bool,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            target_alpha: 0.0,
            speed: 3.0,
            bounce: false,
            active: false,
        }
    }
}

impl ScreenFade {
    /// Dip to black and come back: used when the witch changes map.
    pub fn dip(&mut self) {
        self.target_alpha = 1.0;
        self.speed = 4.0;
        self.bounce = true;
        self.active = true;
    }

    /// Darken and stay dark: used while the ending counts down.
    pub fn dim(&mut self, to: f32, over_secs: f32) {
        self.target_alpha = to;
        self.speed = (to - self.alpha).abs() / over_secs.max(0.01);
        self.bounce = false;
        self.active = true;
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let diff = self.target_alpha - self.alpha;
        if diff.abs() < 0.01 {
            self.alpha = self.target_alpha;
            if self.bounce && self.target_alpha > 0.0 {
                self.target_alpha = 0.0;
                self.bounce = false;
            } else {
                self.active = false;
            }
            return;
        }
        let step = (self.speed * dt).min(diff.abs());
        self.alpha = (self.alpha + diff.signum() * step).clamp(0.0, 1.0);
    }
}

/// Spawn the fade overlay (always present but invisible)
pub fn spawn_fade_overlay(mut commands: Commands) {
    commands.insert_resource(ScreenFade::default());

    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(100), // on top of everything
        PickingBehavior::IGNORE,
    ));
}

pub fn trigger_fade_on_transition(
    mut map_events: EventReader<MapTransitionEvent>,
    mut ending_events: EventReader<EndingTriggeredEvent>,
    config: Res<GameConfig>,
    mut fade: ResMut<ScreenFade>,
) {
    if map_events.read().last().is_some() {
        fade.dip();
    }
    if ending_events.read().last().is_some() {
        fade.dim(0.6, config.ending_delay_secs);
    }
}

pub fn update_fade(
    time: Res<Time>,
    mut fade: ResMut<ScreenFade>,
    mut query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    if !fade.active {
        return;
    }
    fade.step(time.delta_secs());

    for mut bg in &mut query {
        *bg = BackgroundColor(Color::srgba(0.0, 0.0, 0.0, fade.alpha));
    }
}
