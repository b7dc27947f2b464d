//! Per-frame simulation tick
//!
//! Order within a tick: player → difficulty → spawner → entity resolution.
//! Nothing runs unless the session is `Running`.

use glam::Vec2;

use super::autopilot;
use super::collision::entity_hits;
use super::spawn::update_spawner;
use super::state::{EntityKind, GameEvent, GamePhase, GameState, HazardKind, PickupKind};

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Only used by the `Band` movement profile
    pub up: bool,
    pub down: bool,
    /// Absolute pointer position in arena coordinates while dragging
    pub pointer: Option<Vec2>,
    /// Idle/demo mode - the autopilot steers
    pub autopilot: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.session.phase != GamePhase::Running {
        return;
    }
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    let dt = dt.min(state.tuning.max_frame_dt);

    let mut input = input.clone();
    if input.autopilot {
        if let Some(target) = autopilot::choose_target(state) {
            input.pointer = Some(target);
        }
    }

    state
        .player
        .update(&input, &state.arena, &state.tuning, dt);
    state.progression.advance(dt, &state.tuning);
    update_spawner(state, dt);
    resolve_entities(state, dt);
}

/// Move every entity, then resolve player hits and bottom-edge misses.
/// A game over part way through still finishes the pass; the phase gate in
/// `tick` stops the next one.
fn resolve_entities(state: &mut GameState, dt: f32) {
    let player_box = state.player.hit_box(&state.tuning);
    let floor = state.arena.height + state.tuning.bottom_margin;

    // Reverse order so removal never shifts an unvisited entity
    for i in (0..state.entities.len()).rev() {
        state.entities[i].advance(dt);

        if entity_hits(&state.entities[i], &player_box, &state.tuning) {
            let entity = state.entities.remove(i);
            match entity.kind {
                EntityKind::Pickup { kind, value } => collect_pickup(state, kind, value),
                EntityKind::Hazard(kind) => apply_hazard(state, kind),
            }
            continue;
        }

        if state.entities[i].pos.y > floor {
            let entity = state.entities.remove(i);
            if let EntityKind::Pickup { kind, .. } = entity.kind {
                state.session.combo = 0;
                state.events.push(GameEvent::PickupMissed { kind });
            }
        }
    }
}

/// Score a pickup: value plus a capped combo bonus
pub fn collect_pickup(state: &mut GameState, kind: PickupKind, value: u32) {
    let points = u64::from(value) + u64::from(state.tuning.combo_bonus(state.session.combo));
    state.session.score += points;
    state.session.combo += 1;
    state
        .events
        .push(GameEvent::PickupCollected { kind, points });
    note_best_score(state);
}

/// Hazard contact: combo always breaks, side effects always apply, damage is gated
pub fn apply_hazard(state: &mut GameState, kind: HazardKind) {
    state.session.combo = 0;

    match kind {
        HazardKind::Bomb => {
            state.session.score = state
                .session
                .score
                .saturating_sub(u64::from(state.tuning.bomb_score_penalty));
        }
        HazardKind::ShockBolt => {
            state.player.slow_timer = state.player.slow_timer.max(state.tuning.shock_slow_duration);
        }
        HazardKind::Spikes | HazardKind::Saw => {}
    }

    let lives_lost = damage_player(state, kind.damage());
    state
        .events
        .push(GameEvent::HazardHit { kind, lives_lost });

    if lives_lost > 0 && state.session.lives == 0 {
        end_game(state);
    }
}

/// Take `amount` lives unless invulnerable; returns lives actually lost
pub fn damage_player(state: &mut GameState, amount: u32) -> u32 {
    if state.player.is_invulnerable() {
        return 0;
    }
    let lost = amount.min(state.session.lives);
    state.session.lives -= lost;
    state.player.invuln = state.tuning.invuln_grace;
    lost
}

fn note_best_score(state: &mut GameState) {
    if state.session.record_score() {
        state.events.push(GameEvent::NewBest {
            score: state.session.best_score,
        });
    }
}

fn end_game(state: &mut GameState) {
    note_best_score(state);
    state.session.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.session.score,
        best_score: state.session.best_score,
    });
    log::info!(
        "Game over: score {} (best {}) after {:.1}s",
        state.session.score,
        state.session.best_score,
        state.progression.elapsed
    );
}
