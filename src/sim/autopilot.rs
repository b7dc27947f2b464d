//! Idle/demo mode steering
//!
//! Picks a pointer target each tick: the best pickup that can still be reached
//! before it lands, unless a hazard is about to come down on that spot. With
//! nothing worth chasing it only dodges.

use glam::Vec2;

use super::state::{Entity, EntityKind, GameState};

/// How far ahead (seconds) hazards are considered dangerous
const DANGER_HORIZON: f32 = 0.8;

/// Returns a pointer target in arena coordinates, or None to keep still
pub fn choose_target(state: &GameState) -> Option<Vec2> {
    let player = &state.player;
    let center = player.rect().center();
    let reach_speed = state.tuning.move_speed(state.arena.width) * player.speed_multiplier(&state.tuning);
    let half_width = player.size.x / 2.0;

    let dangers: Vec<(f32, f32)> = state
        .entities
        .iter()
        .filter(|e| !e.kind.is_pickup())
        .filter(|e| {
            let t = time_to_reach(e, player.pos.y);
            (-0.2..DANGER_HORIZON).contains(&t) && e.pos.y < player.pos.y + player.size.y
        })
        .map(|e| (e.pos.x - half_width, e.pos.x + e.size.x + half_width))
        .collect();
    let is_dangerous = |x: f32| dangers.iter().any(|&(lo, hi)| x > lo && x < hi);

    let best_pickup = state
        .entities
        .iter()
        .filter_map(|e| match e.kind {
            EntityKind::Pickup { value, .. } => Some((e, value)),
            EntityKind::Hazard(_) => None,
        })
        .filter_map(|(e, value)| {
            let t = time_to_reach(e, player.pos.y);
            if t < 0.0 {
                return None;
            }
            let x = e.rect().center().x;
            let travel = (x - center.x).abs() / reach_speed.max(1.0);
            if travel > t + 0.1 || is_dangerous(x) {
                return None;
            }
            Some((x, value as f32 / (t + 0.2)))
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(x, _)| x);

    if let Some(x) = best_pickup {
        return Some(Vec2::new(x, center.y));
    }

    if !is_dangerous(center.x) {
        return None;
    }

    // Flee to whichever side of the nearest threat has more room
    let (lo, hi) = dangers
        .iter()
        .copied()
        .filter(|&(lo, hi)| center.x > lo && center.x < hi)
        .fold((f32::MAX, f32::MIN), |acc, (lo, hi)| (acc.0.min(lo), acc.1.max(hi)));
    let flee_left = lo - half_width;
    let flee_right = hi + half_width;
    let x = if flee_left > 0.0 && (center.x - flee_left) <= (flee_right - center.x) {
        flee_left
    } else if flee_right < state.arena.width {
        flee_right
    } else {
        flee_left.max(half_width)
    };
    Some(Vec2::new(x, center.y))
}

/// Seconds until the entity's bottom edge reaches `line_y`
fn time_to_reach(entity: &Entity, line_y: f32) -> f32 {
    (line_y - (entity.pos.y + entity.size.y)) / entity.vy
}
