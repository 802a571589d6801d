//! Game phase plugin: start page → playing → ending transition → ended.
//!
//! Owns every `NextState<GameState>` write. Domain plugins only gate on the
//! current state.

use bevy::prelude::*;
use crate::shared::*;

pub struct PhasePlugin;

impl Plugin for PhasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EndingCountdown>()
            .add_systems(
                Update,
                start_on_interact.run_if(in_state(GameState::StartPage)),
            )
            .add_systems(
                Update,
                check_ending_trigger
                    .in_set(TickSet::Phase)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::EndingTransition), start_countdown)
            .add_systems(
                Update,
                tick_ending_countdown.run_if(in_state(GameState::EndingTransition)),
            )
            .add_systems(OnEnter(GameState::Ended), announce_game_end)
            .add_systems(Update, handle_quit);
    }
}

/// Delay between the ending trigger and the end screen.
#[derive(Resource, Debug, Clone)]
pub struct EndingCountdown {
    pub timer: Timer,
}

impl Default for EndingCountdown {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(ENDING_DELAY_SECS, TimerMode::Once),
        }
    }
}

/// The first NPC (roster order) whose affinity has reached `threshold`.
pub fn ending_reason<'a>(
    npcs: impl IntoIterator<Item = &'a Npc>,
    threshold: u32,
    requested: bool,
) -> Option<EndingReason> {
    if requested {
        return Some(EndingReason::Requested);
    }
    npcs.into_iter()
        .filter(|npc| npc.affinity >= threshold)
        .min_by_key(|npc| npc.roster_index)
        .map(|npc| EndingReason::Affinity {
            npc_name: npc.name.clone(),
        })
}

fn start_on_interact(
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.interact {
        info!("[Phase] Start page dismissed");
        next_state.set(GameState::Playing);
    }
}

fn check_ending_trigger(
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    npcs: Query<&Npc>,
    mut next_state: ResMut<NextState<GameState>>,
    mut triggered: EventWriter<EndingTriggeredEvent>,
) {
    let Some(reason) = ending_reason(&npcs, config.ending_affinity, input.end_game) else {
        return;
    };

    info!("[Phase] Ending triggered: {:?}", reason);
    triggered.send(EndingTriggeredEvent { reason });
    next_state.set(GameState::EndingTransition);
}

fn start_countdown(config: Res<GameConfig>, mut countdown: ResMut<EndingCountdown>) {
    countdown.timer = Timer::from_seconds(config.ending_delay_secs, TimerMode::Once);
    debug!("[Phase] Ending in {}s", config.ending_delay_secs);
}

fn tick_ending_countdown(
    time: Res<Time>,
    mut countdown: ResMut<EndingCountdown>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if countdown.timer.tick(time.delta()).just_finished() {
        next_state.set(GameState::Ended);
    }
}

fn announce_game_end(mut ended: EventWriter<GameEndedEvent>) {
    info!("[Phase] Game over");
    ended.send(GameEndedEvent);
}

fn handle_quit(input: Res<PlayerInput>, mut exit: EventWriter<AppExit>) {
    if input.quit {
        info!("[Phase] Quit requested");
        exit.send(AppExit::Success);
    }
}
