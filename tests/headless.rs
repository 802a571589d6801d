//! Headless integration tests for Witch's Pot.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register every domain
//! plugin except rendering and keyboard input, and drive `PlayerInput`
//! directly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use witchpot::crafting::CraftingPlugin;
use witchpot::data::{manifest, AssetRoot, DataPlugin};
use witchpot::npcs::NpcPlugin;
use witchpot::phase::PhasePlugin;
use witchpot::player::PlayerPlugin;
use witchpot::shared::*;
use witchpot::world::{WorldPlugin, WorldRng};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a headless app with all shared resources and events registered and
/// every gameplay plugin added. Each `update()` advances time by one 50 ms
/// tick.
fn build_test_app() -> App {
    build_test_app_with(GameConfig::default())
}

fn build_test_app_with(config: GameConfig) -> App {
    build_test_app_missing(config, &[])
}

/// Keeps the stocked asset directory alive for the app's lifetime.
#[derive(Resource)]
struct StockedAssets(#[allow(dead_code)] tempfile::TempDir);

/// Write an empty file for every manifest entry except `missing`.
fn stock_assets(missing: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp asset dir");
    for path in manifest() {
        if missing.contains(&path.as_str()) {
            continue;
        }
        let file = dir.path().join(&path);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, b"").unwrap();
    }
    dir
}

fn build_test_app_missing(config: GameConfig, missing: &[&str]) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.insert_resource(config)
        .init_resource::<KeyBindings>()
        .init_resource::<ActiveMap>()
        .init_resource::<Inventory>()
        .init_resource::<Pot>()
        .init_resource::<PotAnimation>()
        .init_resource::<WorldItems>()
        .init_resource::<EntityIds>()
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ItemPickedUpEvent>()
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

    // Deterministic scatter
    app.insert_resource(WorldRng::seeded(42));

    // ── Asset root with every shipped file present (minus `missing`) ─────
    let assets = stock_assets(missing);
    app.insert_resource(AssetRoot(assets.path().to_path_buf()))
        .insert_resource(StockedAssets(assets));

    app.add_plugins(DataPlugin)
        .add_plugins(PhasePlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(WorldPlugin)
        .add_plugins(NpcPlugin)
        .add_plugins(CraftingPlugin);

    app
}

/// Run startup, then move from the start page into Playing.
fn enter_playing_state(app: &mut App) {
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
}

/// Playing, with an empty overworld and empty inventory so tests control
/// exactly what is in reach.
fn enter_clean_playing_state(app: &mut App) {
    enter_playing_state(app);
    app.world_mut().resource_mut::<WorldItems>().maps.clear();
    *app.world_mut().resource_mut::<Inventory>() = Inventory::default();
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Hold `input` for exactly one frame.
fn press(app: &mut App, set: impl FnOnce(&mut PlayerInput)) {
    set(&mut app.world_mut().resource_mut::<PlayerInput>());
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
}

fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

fn player_pos(app: &mut App) -> Vec2 {
    app.world_mut()
        .query_filtered::<&LogicalPosition, With<Player>>()
        .single(app.world())
        .0
}

fn set_player_pos(app: &mut App, pos: Vec2) {
    let world = app.world_mut();
    let mut q = world.query_filtered::<&mut LogicalPosition, With<Player>>();
    q.single_mut(world).0 = pos;
}

fn npc_entity(app: &mut App, roster_index: usize) -> Entity {
    let world = app.world_mut();
    let mut q = world.query::<(Entity, &Npc)>();
    q.iter(world)
        .find(|(_, npc)| npc.roster_index == roster_index)
        .map(|(e, _)| e)
        .expect("npc in roster")
}

fn npc(app: &App, entity: Entity) -> &Npc {
    app.world().get::<Npc>(entity).expect("npc component")
}

fn move_npc(app: &mut App, entity: Entity, pos: Vec2) {
    app.world_mut()
        .get_mut::<LogicalPosition>(entity)
        .expect("npc position")
        .0 = pos;
}

fn gem(app: &mut App, name: &str, position: Vec2) -> WorldItem {
    let id = app.world_mut().resource_mut::<EntityIds>().next();
    WorldItem::item(id, name, position, app.world().resource::<AssetCatalog>()).unwrap()
}

fn fruit(app: &mut App, index: u32, position: Vec2) -> WorldItem {
    let id = app.world_mut().resource_mut::<EntityIds>().next();
    WorldItem::fruit(
        id,
        FruitRef::Index(index),
        position,
        app.world().resource::<AssetCatalog>(),
    )
    .unwrap()
}

fn give(app: &mut App, item: WorldItem) -> usize {
    app.world_mut().resource_mut::<Inventory>().add(item).unwrap()
}

fn drop_on(app: &mut App, map: MapId, item: WorldItem) {
    app.world_mut()
        .resource_mut::<WorldItems>()
        .on_map_mut(map)
        .push(item);
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot and phases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_start_page_gates_gameplay() {
    let mut app = build_test_app();
    tick(&mut app, 3);

    assert_eq!(state(&app), GameState::StartPage);
    let players = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .count();
    assert_eq!(players, 0, "No witch before the start page is dismissed");
    assert!(
        app.world().resource::<WorldItems>().on_map(MapId::Overworld).is_empty(),
        "Nothing is scattered before play starts"
    );

    press(&mut app, |input| input.interact = true);
    app.update();

    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(player_pos(&mut app), PLAYER_START);
    assert_eq!(
        app.world().resource::<WorldItems>().on_map(MapId::Overworld).len(),
        10,
        "Overworld gets 6 fruits and 4 gems"
    );
    let npcs = app
        .world_mut()
        .query::<&Npc>()
        .iter(app.world())
        .count();
    assert_eq!(npcs, 3);
}

#[test]
fn test_headless_smoke_ticks_in_playing() {
    let mut app = build_test_app();
    enter_playing_state(&mut app);

    for _ in 0..120 {
        app.update();
    }

    assert_eq!(
        state(&app),
        GameState::Playing,
        "State should remain Playing after smoke ticks"
    );
}

#[test]
fn test_pot_animation_runs_on_start_page() {
    let mut app = build_test_app();
    tick(&mut app, 6);
    assert_eq!(state(&app), GameState::StartPage);
    assert!(
        app.world().resource::<PotAnimation>().frame > 0,
        "Pot animation is cosmetic and ignores the phase gate"
    );
}

#[test]
fn test_missing_witch_sprite_aborts_startup() {
    let mut app = build_test_app_missing(GameConfig::default(), &[WITCH_SPRITE]);
    app.update();
    assert!(
        app.world().resource::<AssetCatalog>().path(WITCH_SPRITE).is_err(),
        "A file absent from disk must not be in the catalog"
    );

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    let exits = events::<AppExit>(&app);
    assert!(
        exits.iter().any(|e| matches!(e, AppExit::Error(_))),
        "A missing witch sheet must end the app with an error"
    );
    let players = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .count();
    assert_eq!(players, 0);
}

#[test]
fn test_missing_npc_sprite_skips_that_npc() {
    let mut app = build_test_app_missing(GameConfig::default(), &["npc/girl2_idle.png"]);
    enter_playing_state(&mut app);

    let names: Vec<String> = app
        .world_mut()
        .query::<&Npc>()
        .iter(app.world())
        .map(|n| n.name.clone())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"girl2_idle".to_string()));
    assert_eq!(state(&app), GameState::Playing);
}

#[test]
fn test_missing_gem_sprite_skips_those_gems() {
    let missing: Vec<String> = GEM_NAMES.iter().map(|g| format!("items/{g}.png")).collect();
    let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
    let mut app = build_test_app_missing(GameConfig::default(), &missing);
    enter_playing_state(&mut app);

    let set = app.world().resource::<WorldItems>().on_map(MapId::Overworld);
    assert_eq!(set.len(), 6, "Only the fruits can be placed");
    assert!(set.iter().all(|i| i.entity_kind() == EntityKind::Fruit));
    assert_eq!(state(&app), GameState::Playing);
}

// ─────────────────────────────────────────────────────────────────────────────
// Movement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_walk_and_run_speeds() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);

    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::X;
    tick(&mut app, 10);
    let walked = player_pos(&mut app).x - PLAYER_START.x;
    assert!(
        (walked - 50.0).abs() < 0.5,
        "10 ticks at 100 u/s should cover 50 units, got {walked}"
    );

    {
        let mut input = app.world_mut().resource_mut::<PlayerInput>();
        input.move_axis = Vec2::NEG_X;
        input.run = true;
    }
    tick(&mut app, 10);
    let ran = PLAYER_START.x + walked - player_pos(&mut app).x;
    assert!((ran - 90.0).abs() < 0.5, "Running is 1.8x, got {ran}");

    let world = app.world_mut();
    let movement = world
        .query_filtered::<&PlayerMovement, With<Player>>()
        .single(world);
    assert_eq!(movement.facing, Facing::Left);
    assert!(movement.is_running);
    assert!(movement.frame < WITCH_FRAME_COUNT);
}

#[test]
fn test_pot_blocks_the_witch_in_the_pot_room() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    app.world_mut().resource_mut::<ActiveMap>().map = MapId::PotRoom;
    set_player_pos(&mut app, Vec2::new(250.0, 260.0));

    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::X;
    tick(&mut app, 40);

    let pos = player_pos(&mut app);
    assert!(
        pos.x + WITCH_HALF_SIZE.x <= POT_BBOX.min.x + 0.01,
        "Witch walked into the pot: {pos}"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Pickup
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_pickup_within_radius() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);

    let near = gem(&mut app, "blue_1", Vec2::new(430.0, 300.0));
    let far = gem(&mut app, "red_1", Vec2::new(600.0, 500.0));
    let near_id = near.id;
    drop_on(&mut app, MapId::Overworld, near);
    drop_on(&mut app, MapId::Overworld, far);

    app.update();

    let inv = app.world().resource::<Inventory>();
    assert_eq!(inv.get(0).unwrap().map(|i| i.id), Some(near_id));
    assert_eq!(inv.occupied(), 1);
    let set = app.world().resource::<WorldItems>().on_map(MapId::Overworld);
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].name, "red_1");
    let world_items = app.world().resource::<WorldItems>();
    assert!(!world_items.contains(near_id), "Picked item left the world");

    let picked = events::<ItemPickedUpEvent>(&app);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].slot, 0);
    assert_eq!(picked[0].map, MapId::Overworld);

    // Idempotent: the item is gone, nothing more happens.
    app.update();
    assert_eq!(app.world().resource::<Inventory>().occupied(), 1);
    assert!(events::<ItemPickedUpEvent>(&app).is_empty());
}

#[test]
fn test_full_inventory_leaves_item_in_place() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);

    for n in 0..INVENTORY_SLOTS {
        let item = gem(&mut app, "green_1", Vec2::ZERO);
        assert_eq!(give(&mut app, item), n);
    }
    let extra = gem(&mut app, "purple_1", Vec2::ZERO);
    let rejected = app
        .world_mut()
        .resource_mut::<Inventory>()
        .add(extra)
        .unwrap_err();
    assert_eq!(rejected.reason, GameError::InventoryFull);

    let spot = Vec2::new(420.0, 310.0);
    let item = gem(&mut app, "blue_2", spot);
    drop_on(&mut app, MapId::Overworld, item);
    app.update();

    let set = app.world().resource::<WorldItems>().on_map(MapId::Overworld);
    assert_eq!(set.len(), 1, "Refused item stays on the map");
    assert_eq!(set[0].position, spot);
    let failed = events::<PickupFailedEvent>(&app);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].reason, GameError::InventoryFull);

    // Retried every tick while in range.
    app.update();
    assert_eq!(events::<PickupFailedEvent>(&app).len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Hotbar
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hotbar_select_and_swap() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let item = gem(&mut app, "blue_1", Vec2::ZERO);
    let id = item.id;
    give(&mut app, item);

    press(&mut app, |input| input.swap_right = true);
    press(&mut app, |input| input.swap_right = true);

    let inv = app.world().resource::<Inventory>();
    assert_eq!(inv.selected_slot(), 2);
    assert_eq!(inv.get(2).unwrap().map(|i| i.id), Some(id));
    assert!(inv.get(0).unwrap().is_none());

    press(&mut app, |input| input.select_slot = Some(9));
    assert_eq!(app.world().resource::<Inventory>().selected_slot(), 9);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pot
// ─────────────────────────────────────────────────────────────────────────────

fn stand_at_pot(app: &mut App) {
    app.world_mut().resource_mut::<ActiveMap>().map = MapId::PotRoom;
    set_player_pos(app, Vec2::new(400.0, 400.0));
}

#[test]
fn test_pot_accepts_three_fruits_then_refuses() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    for i in 0..4 {
        let f = fruit(&mut app, i, Vec2::ZERO);
        give(&mut app, f);
    }
    stand_at_pot(&mut app);

    for slot in 0..3 {
        press(&mut app, |input| {
            input.select_slot = Some(slot);
            input.interact = true;
        });
        assert_eq!(events::<DeliveryEvent>(&app).len(), 1, "deposit {slot}");
    }
    assert_eq!(app.world().resource::<Pot>().len(), 3);

    press(&mut app, |input| {
        input.select_slot = Some(3);
        input.interact = true;
    });
    let failed = events::<DeliveryFailedEvent>(&app);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].reason, GameError::PotFull);
    assert_eq!(failed[0].target, Some(DeliveryTarget::Pot));

    let inv = app.world().resource::<Inventory>();
    assert!(inv.get(3).unwrap().is_some(), "Refused fruit stays in its slot");
    assert_eq!(inv.occupied(), 1);
    let names: Vec<_> = app
        .world()
        .resource::<Pot>()
        .contents()
        .iter()
        .map(|i| i.name.clone())
        .collect();
    assert_eq!(names, vec!["apple", "banana", "cherry"]);
}

#[test]
fn test_pot_refuses_gifts() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let g = gem(&mut app, "blue_1", Vec2::ZERO);
    give(&mut app, g);
    stand_at_pot(&mut app);

    press(&mut app, |input| input.interact = true);

    let failed = events::<DeliveryFailedEvent>(&app);
    assert!(matches!(
        failed[0].reason,
        GameError::WrongItemType {
            expected: ItemType::Source,
            found: ItemType::Item,
            ..
        }
    ));
    assert!(app.world().resource::<Pot>().is_empty());
    assert_eq!(app.world().resource::<Inventory>().occupied(), 1);
}

#[test]
fn test_brew_places_potion_at_output() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    for i in 0..3 {
        let f = fruit(&mut app, i, Vec2::ZERO);
        give(&mut app, f);
    }
    stand_at_pot(&mut app);

    // Not ready yet
    press(&mut app, |input| input.brew = true);
    assert!(events::<PotBrewedEvent>(&app).is_empty());

    for slot in 0..3 {
        press(&mut app, |input| {
            input.select_slot = Some(slot);
            input.interact = true;
        });
    }
    press(&mut app, |input| input.brew = true);

    let brewed = events::<PotBrewedEvent>(&app);
    assert_eq!(brewed.len(), 1);
    assert_eq!(brewed[0].product_name, POTION_NAME);
    assert_eq!(brewed[0].ingredients, vec!["apple", "banana", "cherry"]);
    assert!(app.world().resource::<Pot>().is_empty());

    let room = app.world().resource::<WorldItems>().on_map(MapId::PotRoom);
    assert_eq!(room.len(), 1);
    assert_eq!(room[0].position, POT_OUTPUT);
    assert_eq!(room[0].item_type(), ItemType::Item);

    // The potion is an ordinary collectible.
    set_player_pos(&mut app, POT_OUTPUT + Vec2::new(0.0, -30.0));
    app.update();
    let inv = app.world().resource::<Inventory>();
    assert_eq!(inv.items().next().map(|i| i.name.as_str()), Some(POTION_NAME));
}

// ─────────────────────────────────────────────────────────────────────────────
// NPCs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_gift_raises_affinity_and_greeting() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let girl = npc_entity(&mut app, 0);
    let (_, girl_pos) = NPC_CAST[0];

    set_player_pos(&mut app, girl_pos + Vec2::new(30.0, 0.0));
    app.update();
    let greeting = app.world().get::<NpcGreeting>(girl).unwrap();
    assert_eq!(greeting.lines(0), vec!["Give me Item"]);

    let g = gem(&mut app, "red_1", Vec2::ZERO);
    give(&mut app, g);
    press(&mut app, |input| input.interact = true);

    assert_eq!(npc(&app, girl).affinity, 1);
    assert!(app.world().resource::<Inventory>().get(0).unwrap().is_none());
    let gifts = events::<GiftGivenEvent>(&app);
    assert_eq!(gifts.len(), 1);
    assert_eq!(gifts[0].npc, girl);
    assert_eq!(gifts[0].item_name, "red_1");

    let greeting = app.world().get::<NpcGreeting>(girl).unwrap();
    assert_eq!(greeting.lines(1), vec!["heart +1", "current heart : 1"]);
}

#[test]
fn test_npc_refuses_fruit() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let girl = npc_entity(&mut app, 0);
    set_player_pos(&mut app, NPC_CAST[0].1 + Vec2::new(0.0, -40.0));
    let f = fruit(&mut app, 4, Vec2::ZERO);
    give(&mut app, f);

    press(&mut app, |input| input.interact = true);

    let failed = events::<DeliveryFailedEvent>(&app);
    assert_eq!(failed.len(), 1);
    assert_eq!(
        failed[0].reason,
        GameError::WrongItemType {
            item: "orange".into(),
            expected: ItemType::Item,
            found: ItemType::Source,
        }
    );
    assert_eq!(npc(&app, girl).affinity, 0);
    assert_eq!(app.world().resource::<Inventory>().occupied(), 1);
}

#[test]
fn test_interact_with_nobody_around() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    press(&mut app, |input| input.interact = true);

    let failed = events::<DeliveryFailedEvent>(&app);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].target, None);
    assert_eq!(failed[0].reason, GameError::NoTarget);
}

#[test]
fn test_empty_slot_gift_is_reported() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    set_player_pos(&mut app, NPC_CAST[1].1 + Vec2::new(-20.0, 0.0));
    press(&mut app, |input| input.interact = true);

    let failed = events::<DeliveryFailedEvent>(&app);
    assert_eq!(failed[0].reason, GameError::EmptySlot { index: 0 });
}

/// Two NPCs in range: roster order by default, distance when configured.
fn gift_with_two_in_range(config: GameConfig) -> (u32, u32) {
    let mut app = build_test_app_with(config);
    enter_clean_playing_state(&mut app);
    let first = npc_entity(&mut app, 0);
    let second = npc_entity(&mut app, 1);
    move_npc(&mut app, first, Vec2::new(470.0, 300.0));
    move_npc(&mut app, second, Vec2::new(420.0, 300.0));
    set_player_pos(&mut app, Vec2::new(400.0, 300.0));

    let g = gem(&mut app, "blue_1", Vec2::ZERO);
    give(&mut app, g);
    press(&mut app, |input| input.interact = true);

    (npc(&app, first).affinity, npc(&app, second).affinity)
}

#[test]
fn test_npc_selection_policies() {
    assert_eq!(gift_with_two_in_range(GameConfig::default()), (1, 0));
    assert_eq!(
        gift_with_two_in_range(GameConfig {
            npc_selection: NpcSelection::Nearest,
            ..default()
        }),
        (0, 1)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Maps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_portal_round_trip_respawns_overworld() {
    let mut app = build_test_app();
    enter_playing_state(&mut app);
    *app.world_mut().resource_mut::<Inventory>() = Inventory::default();
    let keep = gem(&mut app, "blue_1", Vec2::ZERO);
    give(&mut app, keep);

    let before: Vec<EntityId> = app
        .world()
        .resource::<WorldItems>()
        .on_map(MapId::Overworld)
        .iter()
        .map(|i| i.id)
        .collect();

    set_player_pos(&mut app, OVERWORLD_PORTAL + Vec2::new(10.0, 0.0));
    app.update();
    assert_eq!(app.world().resource::<ActiveMap>().map, MapId::PotRoom);
    assert_eq!(player_pos(&mut app), POT_ROOM_ARRIVAL);
    assert_eq!(events::<MapTransitionEvent>(&app).len(), 1);

    // Arriving does not bounce straight back.
    tick(&mut app, 3);
    assert_eq!(app.world().resource::<ActiveMap>().map, MapId::PotRoom);

    set_player_pos(&mut app, POT_ROOM_PORTAL);
    app.update();
    assert_eq!(app.world().resource::<ActiveMap>().map, MapId::Overworld);
    assert_eq!(player_pos(&mut app), OVERWORLD_ARRIVAL);

    let set = app.world().resource::<WorldItems>().on_map(MapId::Overworld);
    assert_eq!(set.len(), 10);
    assert!(
        set.iter().all(|i| !before.contains(&i.id)),
        "Respawn creates fresh entities"
    );
    let sep = GameConfig::default().placement_separation();
    for (n, a) in set.iter().enumerate() {
        for b in &set[n + 1..] {
            assert!(a.position.distance(b.position) >= sep);
        }
        assert!(a.position.distance(OVERWORLD_ARRIVAL) >= sep);
    }

    assert!(
        app.world()
            .resource::<Inventory>()
            .items()
            .any(|i| i.name == "blue_1"),
        "Inventory survives map changes"
    );
}

#[test]
fn test_npcs_only_interact_on_their_map() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let girl = npc_entity(&mut app, 0);
    app.world_mut().resource_mut::<ActiveMap>().map = MapId::PotRoom;
    set_player_pos(&mut app, NPC_CAST[0].1);
    let g = gem(&mut app, "blue_1", Vec2::ZERO);
    give(&mut app, g);

    press(&mut app, |input| input.interact = true);

    assert_eq!(npc(&app, girl).affinity, 0);
    assert_eq!(
        events::<DeliveryFailedEvent>(&app)[0].reason,
        GameError::NoTarget
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Ending
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_affinity_threshold_ends_the_game() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);
    let girl = npc_entity(&mut app, 0);
    set_player_pos(&mut app, NPC_CAST[0].1 + Vec2::new(30.0, 0.0));

    // One real gift per press, from zero hearts.
    for n in 1..=ENDING_AFFINITY {
        let g = gem(&mut app, GEM_NAMES[n as usize % GEM_NAMES.len()], Vec2::ZERO);
        give(&mut app, g);
        press(&mut app, |input| input.interact = true);
        assert_eq!(npc(&app, girl).affinity, n);

        let triggered = events::<EndingTriggeredEvent>(&app);
        if n < ENDING_AFFINITY {
            assert!(triggered.is_empty(), "No ending at {n} hearts");
            assert_eq!(state(&app), GameState::Playing);
        } else {
            assert_eq!(triggered.len(), 1);
            assert_eq!(
                triggered[0].reason,
                EndingReason::Affinity {
                    npc_name: "girl1_idle".into()
                }
            );
        }
    }
    assert_eq!(app.world().resource::<Inventory>().occupied(), 0);

    app.update();
    assert_eq!(state(&app), GameState::EndingTransition);

    // Gameplay is frozen during the countdown.
    let frozen_at = player_pos(&mut app);
    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::X;
    tick(&mut app, 30);
    assert_eq!(player_pos(&mut app), frozen_at);
    assert_eq!(
        state(&app),
        GameState::EndingTransition,
        "Still counting down after 1.5 s"
    );

    let mut ended_after = None;
    for n in 0..20 {
        app.update();
        if state(&app) == GameState::Ended {
            ended_after = Some(31 + n);
            break;
        }
    }
    let ended_after = ended_after.expect("game should end about 2 s after the trigger");
    assert!(
        (38..=43).contains(&ended_after),
        "ended after {ended_after} ticks"
    );
    assert_eq!(events::<GameEndedEvent>(&app).len(), 1);
}

#[test]
fn test_end_input_ends_the_game() {
    let mut app = build_test_app();
    enter_clean_playing_state(&mut app);

    press(&mut app, |input| input.end_game = true);
    assert_eq!(
        events::<EndingTriggeredEvent>(&app)[0].reason,
        EndingReason::Requested
    );
    app.update();
    assert_eq!(state(&app), GameState::EndingTransition);
}

#[test]
fn test_quit_input_exits() {
    let mut app = build_test_app();
    app.update();
    press(&mut app, |input| input.quit = true);
    assert!(events::<AppExit>(&app)
        .iter()
        .any(|e| matches!(e, AppExit::Success)));
}
