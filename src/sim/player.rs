//! Player controller
//!
//! Position eases toward a target with a proportional gain instead of
//! snapping, so pointer jumps turn into a short smooth slide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::Arena;
use super::tick::TickInput;
use crate::tuning::{MovementProfile, Tuning};

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Where the avatar is heading (top-left corner space)
    pub target: Vec2,
    pub vel: Vec2,
    /// Seconds of damage immunity left
    pub invuln: f32,
    /// Seconds of slow debuff left
    pub slow_timer: f32,
}

impl Player {
    pub fn new(arena: &Arena, tuning: &Tuning) -> Self {
        let size = Self::size_for(arena, tuning);
        let pos = Vec2::new(
            ((arena.width - size.x) / 2.0).max(0.0),
            Self::rest_y(arena, tuning, size.y),
        );
        Self {
            pos,
            size,
            target: pos,
            vel: Vec2::ZERO,
            invuln: 0.0,
            slow_timer: 0.0,
        }
    }

    /// Sprite size derived from the arena width
    pub fn size_for(arena: &Arena, tuning: &Tuning) -> Vec2 {
        let w = (arena.width * tuning.player_width_factor)
            .floor()
            .clamp(tuning.player_min_width, tuning.player_max_width);
        Vec2::new(w, (w * tuning.player_aspect).floor())
    }

    /// Resting y: a fixed gap above the bottom edge
    pub fn rest_y(arena: &Arena, tuning: &Tuning, height: f32) -> f32 {
        let gap = tuning
            .bottom_gap_min
            .max((arena.height * tuning.bottom_gap_factor).floor());
        (arena.height - height - gap).max(0.0)
    }

    /// Legal range for `pos.x`
    pub fn x_range(&self, arena: &Arena) -> (f32, f32) {
        (0.0, (arena.width - self.size.x).max(0.0))
    }

    /// Legal range for `pos.y`; a single point when pinned
    pub fn y_range(&self, arena: &Arena, tuning: &Tuning) -> (f32, f32) {
        let y_max = Self::rest_y(arena, tuning, self.size.y);
        match tuning.movement {
            MovementProfile::Pinned => (y_max, y_max),
            MovementProfile::Band => (
                (y_max - arena.height * tuning.band_height_factor).max(0.0),
                y_max,
            ),
        }
    }

    /// Re-derive size after a resize and pull everything back in bounds
    pub fn fit_to_arena(&mut self, arena: &Arena, tuning: &Tuning) {
        self.size = Self::size_for(arena, tuning);
        self.pos = self.clamp_to_bounds(self.pos, arena, tuning);
        self.target = self.clamp_to_bounds(self.target, arena, tuning);
    }

    fn clamp_to_bounds(&self, p: Vec2, arena: &Arena, tuning: &Tuning) -> Vec2 {
        let (x_min, x_max) = self.x_range(arena);
        let (y_min, y_max) = self.y_range(arena, tuning);
        Vec2::new(p.x.clamp(x_min, x_max), p.y.clamp(y_min, y_max))
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln > 0.0
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_timer > 0.0
    }

    /// 1.0 normally, the slow factor while debuffed
    pub fn speed_multiplier(&self, tuning: &Tuning) -> f32 {
        if self.is_slowed() { tuning.slow_factor } else { 1.0 }
    }

    /// Advance timers and move one tick
    pub fn update(&mut self, input: &TickInput, arena: &Arena, tuning: &Tuning, dt: f32) {
        self.slow_timer = (self.slow_timer - dt).max(0.0);
        self.steer(input, arena, tuning, dt);
        self.integrate(arena, tuning, dt);
        self.invuln = (self.invuln - dt).max(0.0);
    }

    /// Apply pointer and held keys to the target
    pub fn steer(&mut self, input: &TickInput, arena: &Arena, tuning: &Tuning, dt: f32) {
        let vertical = tuning.movement == MovementProfile::Band;

        if let Some(pointer) = input.pointer {
            if pointer.x.is_finite() {
                self.target.x = pointer.x - self.size.x / 2.0;
            }
            if vertical && pointer.y.is_finite() {
                self.target.y = pointer.y - self.size.y / 2.0;
            }
        }

        let step = tuning.move_speed(arena.width) * self.speed_multiplier(tuning) * dt;
        if input.left {
            self.target.x -= step;
        }
        if input.right {
            self.target.x += step;
        }
        if vertical {
            if input.up {
                self.target.y -= step;
            }
            if input.down {
                self.target.y += step;
            }
        }

        self.target = self.clamp_to_bounds(self.target, arena, tuning);
    }

    /// Chase the target and clamp into the arena
    pub fn integrate(&mut self, arena: &Arena, tuning: &Tuning, dt: f32) {
        let slow = self.speed_multiplier(tuning);
        let chase = |target: f32, current: f32| {
            (tuning.follow_gain * (target - current)).clamp(-tuning.max_speed, tuning.max_speed)
        };

        self.vel.x = chase(self.target.x, self.pos.x);
        self.vel.y = match tuning.movement {
            MovementProfile::Band => chase(self.target.y, self.pos.y),
            MovementProfile::Pinned => 0.0,
        };

        let next = self.pos + self.vel * dt * slow;
        self.pos = self.clamp_to_bounds(next, arena, tuning);
    }

    /// Collision box: the sprite shrunk by a fixed fraction per side
    pub fn hit_box(&self, tuning: &Tuning) -> Rect {
        self.rect().inset(tuning.hit_inset_x, tuning.hit_inset_y)
    }

    /// Full sprite bounds
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
