mod shared;
mod input;
mod phase;
mod player;
mod world;
mod npcs;
mod crafting;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Witch's Pot".into(),
                    resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                    present_mode: PresentMode::AutoVsync,
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    // Game state
    .init_state::<GameState>()
    // Config (GameConfig itself is loaded by DataPlugin)
    .init_resource::<KeyBindings>()
    // Shared resources
    .init_resource::<ActiveMap>()
    .init_resource::<Inventory>()
    .init_resource::<Pot>()
    .init_resource::<PotAnimation>()
    .init_resource::<WorldItems>()
    .init_resource::<EntityIds>()
    .init_resource::<PlayerInput>()
    .init_resource::<InputContext>()
    // Events
    .add_event::<ItemPickedUpEvent>()
    .add_event::<PickupFailedEvent>()
    .add_event::<DeliveryRequestEvent>()
    .add_event::<DeliveryEvent>()
    .add_event::<DeliveryFailedEvent>()
    .add_event::<GiftGivenEvent>()
    .add_event::<PotBrewedEvent>()
    .add_event::<MapTransitionEvent>()
    .add_event::<EndingTriggeredEvent>()
    .add_event::<GameEndedEvent>();

    configure_tick_sets(&mut app);

    app
        // Data loading
        .add_plugins(data::DataPlugin)
        .add_plugins(input::InputPlugin)
        // Domain plugins
        .add_plugins(phase::PhasePlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(npcs::NpcPlugin)
        .add_plugins(crafting::CraftingPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
