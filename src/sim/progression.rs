//! Difficulty ramp
//!
//! Once per second of play the fall speed steps up toward its cap and the
//! spawn interval steps down toward its floor.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Seconds since the session started
    pub elapsed: f32,
    /// Base fall speed for new entities (px/s)
    pub fall_speed: f32,
    /// Base delay between spawns (s)
    pub spawn_interval: f32,
    /// Time left until the next spawn (s)
    pub spawn_countdown: f32,
    /// Time accumulated toward the next difficulty step
    step_timer: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            elapsed: 0.0,
            fall_speed: tuning.fall_speed_start,
            spawn_interval: tuning.spawn_interval_start,
            spawn_countdown: 0.0,
            step_timer: 0.0,
        }
    }

    /// Advance by `dt`; returns the number of difficulty steps taken
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> u32 {
        self.elapsed += dt;
        self.step_timer += dt;

        let mut steps = 0;
        while self.step_timer >= 1.0 {
            self.step_timer -= 1.0;
            self.fall_speed = (self.fall_speed + tuning.fall_speed_increment).min(tuning.fall_speed_cap);
            self.spawn_interval =
                (self.spawn_interval - tuning.spawn_interval_decrement).max(tuning.spawn_interval_floor);
            steps += 1;
        }

        if steps > 0 {
            log::trace!(
                "Difficulty t={:.1}s fall={:.0} interval={:.3}",
                self.elapsed,
                self.fall_speed,
                self.spawn_interval
            );
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_steps_once_per_second() {
        let tuning = Tuning::default();
        let mut p = Progression::new(&tuning);
        for _ in 0..29 {
            assert_eq!(p.advance(1.0 / 30.0, &tuning), 0);
        }
        assert_eq!(p.fall_speed, 240.0);
        // 30 frames of 1/30 can land a hair under 1.0; one more frame settles it
        let steps = p.advance(1.0 / 30.0, &tuning) + p.advance(1.0 / 30.0, &tuning);
        assert_eq!(steps, 1);
        assert_eq!(p.fall_speed, 249.0);
        assert!((p.spawn_interval - 0.838).abs() < 1e-5);
    }

    #[test]
    fn test_bounded_after_long_session() {
        let tuning = Tuning::default();
        let mut p = Progression::new(&tuning);
        p.advance(600.0, &tuning);
        assert_eq!(p.fall_speed, 780.0);
        assert_eq!(p.spawn_interval, 0.35);
        assert!((p.elapsed - 600.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_bounded(dts in prop::collection::vec(0.0f32..0.5, 1..400)) {
            let tuning = Tuning::default();
            let mut p = Progression::new(&tuning);
            for dt in dts {
                let (speed, interval) = (p.fall_speed, p.spawn_interval);
                p.advance(dt, &tuning);
                prop_assert!(p.fall_speed >= speed);
                prop_assert!(p.fall_speed <= tuning.fall_speed_cap);
                prop_assert!(p.spawn_interval <= interval);
                prop_assert!(p.spawn_interval >= tuning.spawn_interval_floor);
            }
        }
    }
}
