//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a profile can be swapped
//! from JSON without touching gameplay code. Missing fields fall back to the
//! default profile.

use serde::{Deserialize, Serialize};

/// How the player is allowed to move vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementProfile {
    /// Y is pinned to a fixed offset above the bottom edge every tick
    #[default]
    Pinned,
    /// Player may also move vertically inside a band near the bottom
    Band,
}

/// Full balance profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// At least 1; a session never starts without a life to lose
    pub starting_lives: u32,

    // === Player ===
    pub movement: MovementProfile,
    /// Player width as a fraction of arena width, clamped to [min, max]
    pub player_width_factor: f32,
    pub player_min_width: f32,
    pub player_max_width: f32,
    /// Height = width * aspect
    pub player_aspect: f32,
    /// Gap between player feet and bottom edge: max(min, H * factor)
    pub bottom_gap_min: f32,
    pub bottom_gap_factor: f32,
    /// Height of the vertical band (fraction of H) for `MovementProfile::Band`
    pub band_height_factor: f32,
    /// Keyboard speed = max(min, W * factor)
    pub move_speed_min: f32,
    pub move_speed_width_factor: f32,
    /// Easing gain toward the target position
    pub follow_gain: f32,
    pub max_speed: f32,
    /// Multiplier on movement while slowed
    pub slow_factor: f32,
    /// Fractional inset of the player's hit box, per side
    pub hit_inset_x: f32,
    pub hit_inset_y: f32,
    /// Invulnerability after taking damage (seconds)
    pub invuln_grace: f32,

    // === Progression ===
    pub fall_speed_start: f32,
    pub fall_speed_increment: f32,
    pub fall_speed_cap: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_decrement: f32,
    pub spawn_interval_floor: f32,

    // === Spawning ===
    pub hazard_chance_base: f32,
    pub hazard_chance_per_sec: f32,
    pub hazard_chance_max: f32,
    pub bill_chance: f32,
    pub entity_size_factor: f32,
    pub entity_min_size: f32,
    pub entity_max_size: f32,
    /// Non-bucket entities are scaled down by this
    pub small_entity_scale: f32,
    pub spawn_margin: f32,
    pub fall_jitter_min: f32,
    pub fall_jitter_max: f32,
    pub spawn_jitter_min: f32,
    pub spawn_jitter_max: f32,
    pub bucket_value: u32,
    pub bill_value: u32,
    /// Bomb and ShockBolt are not collidable for this long after spawning
    pub telegraph_window: f32,
    /// Entities are culled once they fall this far below the arena
    pub bottom_margin: f32,

    // === Scoring and hazards ===
    pub combo_bonus_per_step: u32,
    pub combo_bonus_cap: u32,
    pub bomb_score_penalty: u32,
    pub shock_slow_duration: f32,
    /// Radius of the saw's hit circle as a fraction of min(w, h)
    pub saw_radius_factor: f32,

    // === Frame driver ===
    /// Largest delta-time a single frame may advance the simulation by
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,

            movement: MovementProfile::Pinned,
            player_width_factor: 0.18,
            player_min_width: 70.0,
            player_max_width: 100.0,
            player_aspect: 1.30,
            bottom_gap_min: 28.0,
            bottom_gap_factor: 0.06,
            band_height_factor: 0.30,
            move_speed_min: 430.0,
            move_speed_width_factor: 1.25,
            follow_gain: 18.0,
            max_speed: 1400.0,
            slow_factor: 0.55,
            hit_inset_x: 0.12,
            hit_inset_y: 0.08,
            invuln_grace: 0.9,

            fall_speed_start: 240.0,
            fall_speed_increment: 9.0,
            fall_speed_cap: 780.0,
            spawn_interval_start: 0.85,
            spawn_interval_decrement: 0.012,
            spawn_interval_floor: 0.35,

            hazard_chance_base: 0.25,
            hazard_chance_per_sec: 0.02,
            hazard_chance_max: 0.55,
            bill_chance: 0.35,
            entity_size_factor: 0.13,
            entity_min_size: 38.0,
            entity_max_size: 70.0,
            small_entity_scale: 0.92,
            spawn_margin: 10.0,
            fall_jitter_min: 0.9,
            fall_jitter_max: 1.45,
            spawn_jitter_min: 0.70,
            spawn_jitter_max: 1.40,
            bucket_value: 20,
            bill_value: 10,
            telegraph_window: 0.30,
            bottom_margin: 140.0,

            combo_bonus_per_step: 2,
            combo_bonus_cap: 30,
            bomb_score_penalty: 30,
            shock_slow_duration: 2.5,
            saw_radius_factor: 0.34,

            max_frame_dt: 0.033,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) profile from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        if tuning.starting_lives == 0 {
            return Err(serde::de::Error::custom("starting_lives must be at least 1"));
        }
        Ok(tuning)
    }

    /// Keyboard movement speed for an arena of the given width, before slow
    pub fn move_speed(&self, arena_width: f32) -> f32 {
        self.move_speed_min.max(arena_width * self.move_speed_width_factor)
    }

    /// Chance that the next spawn is a hazard after `elapsed` seconds
    pub fn hazard_chance(&self, elapsed: f32) -> f32 {
        (self.hazard_chance_base + elapsed * self.hazard_chance_per_sec)
            .clamp(self.hazard_chance_base, self.hazard_chance_max)
    }

    /// Base entity size for an arena of the given width
    pub fn entity_base_size(&self, arena_width: f32) -> f32 {
        (arena_width * self.entity_size_factor)
            .floor()
            .clamp(self.entity_min_size, self.entity_max_size)
    }

    /// Extra score granted on top of a pickup's value for the current combo
    pub fn combo_bonus(&self, combo: u32) -> u32 {
        combo
            .saturating_mul(self.combo_bonus_per_step)
            .min(self.combo_bonus_cap)
    }
}
