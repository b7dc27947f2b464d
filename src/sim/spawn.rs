//! Entity spawner
//!
//! One roll picks the category (hazard chance grows with elapsed time, bills
//! have a fixed share, buckets get the rest), a second picks the hazard
//! subtype. Kinematics are jittered around the current progression values.

use glam::Vec2;
use rand::Rng;

use super::progression::Progression;
use super::state::{Arena, Entity, EntityKind, GameState, HazardKind, PickupKind};
use crate::tuning::Tuning;

/// Top-level category of the next spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Hazard,
    Bill,
    Bucket,
}

/// Map a uniform roll in [0, 1) to a category
pub fn roll_category(roll: f32, hazard_chance: f32, bill_chance: f32) -> SpawnCategory {
    if roll < hazard_chance {
        SpawnCategory::Hazard
    } else if roll < hazard_chance + bill_chance {
        SpawnCategory::Bill
    } else {
        SpawnCategory::Bucket
    }
}

/// Build the next entity
pub fn spawn_entity<R: Rng>(
    rng: &mut R,
    id: u32,
    arena: &Arena,
    progression: &Progression,
    tuning: &Tuning,
) -> Entity {
    let category = roll_category(
        rng.random::<f32>(),
        tuning.hazard_chance(progression.elapsed),
        tuning.bill_chance,
    );

    let kind = match category {
        SpawnCategory::Hazard => {
            EntityKind::Hazard(HazardKind::ALL[rng.random_range(0..HazardKind::ALL.len())])
        }
        SpawnCategory::Bill => EntityKind::Pickup {
            kind: PickupKind::Bill,
            value: tuning.bill_value,
        },
        SpawnCategory::Bucket => EntityKind::Pickup {
            kind: PickupKind::Bucket,
            value: tuning.bucket_value,
        },
    };

    let base = tuning.entity_base_size(arena.width);
    let size = match category {
        SpawnCategory::Bucket => base,
        SpawnCategory::Bill | SpawnCategory::Hazard => (base * tuning.small_entity_scale).floor(),
    };

    let x = rng.random::<f32>() * (arena.width - size).max(0.0);
    let y = -size - tuning.spawn_margin;
    let vy = progression.fall_speed * jitter(rng, tuning.fall_jitter_min, tuning.fall_jitter_max);

    Entity {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: Vec2::splat(size),
        vy,
        age: 0.0,
    }
}

/// Delay until the spawn after this one
pub fn next_countdown<R: Rng>(rng: &mut R, progression: &Progression, tuning: &Tuning) -> f32 {
    progression.spawn_interval * jitter(rng, tuning.spawn_jitter_min, tuning.spawn_jitter_max)
}

fn jitter<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Count down and spawn at most one entity; returns true if one was spawned
pub fn update_spawner(state: &mut GameState, dt: f32) -> bool {
    state.progression.spawn_countdown -= dt;
    if state.progression.spawn_countdown > 0.0 {
        return false;
    }

    let id = state.next_entity_id();
    let entity = spawn_entity(&mut state.rng, id, &state.arena, &state.progression, &state.tuning);
    log::debug!("Spawn #{} {:?} at x={:.0} vy={:.0}", id, entity.kind, entity.pos.x, entity.vy);
    state.entities.push(entity);

    state.progression.spawn_countdown = next_countdown(&mut state.rng, &state.progression, &state.tuning);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_category_thresholds() {
        assert_eq!(roll_category(0.0, 0.25, 0.35), SpawnCategory::Hazard);
        assert_eq!(roll_category(0.249, 0.25, 0.35), SpawnCategory::Hazard);
        assert_eq!(roll_category(0.25, 0.25, 0.35), SpawnCategory::Bill);
        assert_eq!(roll_category(0.59, 0.25, 0.35), SpawnCategory::Bill);
        assert_eq!(roll_category(0.61, 0.25, 0.35), SpawnCategory::Bucket);
        assert_eq!(roll_category(0.89, 0.55, 0.35), SpawnCategory::Bill);
        assert_eq!(roll_category(0.91, 0.55, 0.35), SpawnCategory::Bucket);
    }

    #[test]
    fn test_spawned_entity_kinematics() {
        let tuning = Tuning::default();
        let arena = Arena::new(510.0, 900.0);
        let progression = Progression::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(42);
        // base = clamp(floor(510 * 0.13), 38, 70) = 66, others floor(66 * 0.92) = 60
        for id in 0..500 {
            let e = spawn_entity(&mut rng, id, &arena, &progression, &tuning);
            let expected = match e.kind {
                EntityKind::Pickup { kind: PickupKind::Bucket, value } => {
                    assert_eq!(value, 20);
                    66.0
                }
                EntityKind::Pickup { kind: PickupKind::Bill, value } => {
                    assert_eq!(value, 10);
                    60.0
                }
                EntityKind::Hazard(_) => 60.0,
            };
            assert_eq!(e.size, Vec2::splat(expected));
            assert!(e.pos.x >= 0.0 && e.pos.x <= arena.width - expected);
            assert_eq!(e.pos.y, -expected - 10.0);
            assert!(e.vy >= 240.0 * 0.9 - 1e-3 && e.vy <= 240.0 * 1.45 + 1e-3);
            assert!(e.vy > 0.0);
            assert_eq!(e.age, 0.0);
        }
    }

    #[test]
    fn test_category_mix_early_game() {
        let tuning = Tuning::default();
        let arena = Arena::new(500.0, 900.0);
        let progression = Progression::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut hazards = 0;
        let mut subtypes = [0u32; 4];
        let n = 4000;
        for id in 0..n {
            if let EntityKind::Hazard(kind) =
                spawn_entity(&mut rng, id, &arena, &progression, &tuning).kind
            {
                hazards += 1;
                subtypes[HazardKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)] += 1;
            }
        }
        let share = hazards as f32 / n as f32;
        assert!((share - 0.25).abs() < 0.04, "hazard share {share}");
        assert!(subtypes.iter().all(|&c| c > 150), "{subtypes:?}");
    }

    #[test]
    fn test_countdown_range() {
        let tuning = Tuning::default();
        let progression = Progression::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..200 {
            let c = next_countdown(&mut rng, &progression, &tuning);
            assert!(c >= 0.85 * 0.70 - 1e-4 && c <= 0.85 * 1.40 + 1e-4);
        }
    }

    #[test]
    fn test_update_spawner_emits_one() {
        let mut state = GameState::new(5, Tuning::default(), Arena::new(480.0, 800.0), 0);
        state.reset();
        assert!(update_spawner(&mut state, 0.016));
        assert_eq!(state.entities.len(), 1);
        assert!(state.progression.spawn_countdown > 0.0);
        assert!(!update_spawner(&mut state, 0.016));
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_narrow_arena_does_not_panic() {
        let tuning = Tuning::default();
        let arena = Arena::new(20.0, 400.0);
        let progression = Progression::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        let e = spawn_entity(&mut rng, 1, &arena, &progression, &tuning);
        assert_eq!(e.pos.x, 0.0);
    }
}
