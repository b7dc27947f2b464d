//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: the frame driver owns it and
//! hands `&mut` access to every system for the duration of a tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::player::Player;
use super::progression::Progression;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets; nothing simulates yet
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Lives ran out; frozen until restart
    GameOver,
}

/// Playfield dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

/// Beneficial falling items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Bucket,
    Bill,
}

/// Harmful falling items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Spikes,
    Saw,
    Bomb,
    ShockBolt,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Spikes,
        HazardKind::Saw,
        HazardKind::Bomb,
        HazardKind::ShockBolt,
    ];

    /// Lives taken on contact (before the invulnerability gate)
    pub fn damage(self) -> u32 {
        match self {
            HazardKind::Saw => 2,
            HazardKind::Spikes | HazardKind::Bomb | HazardKind::ShockBolt => 1,
        }
    }

    /// Bomb and bolt "arm" for a moment after spawning
    pub fn is_telegraphed(self) -> bool {
        matches!(self, HazardKind::Bomb | HazardKind::ShockBolt)
    }
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Pickup { kind: PickupKind, value: u32 },
    Hazard(HazardKind),
}

impl EntityKind {
    pub fn is_pickup(&self) -> bool {
        matches!(self, EntityKind::Pickup { .. })
    }
}

/// A falling entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed in px/s, always positive
    pub vy: f32,
    /// Seconds since spawn
    pub age: f32,
}

impl Entity {
    /// Fall for one tick
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.vy * dt;
        self.age += dt;
    }

    /// Full sprite bounds
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// False while a telegraphed hazard is still arming
    pub fn is_armed(&self, telegraph_window: f32) -> bool {
        match self.kind {
            EntityKind::Hazard(kind) if kind.is_telegraphed() => self.age >= telegraph_window,
            _ => true,
        }
    }
}

/// Score, lives and flow state for one playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    /// Consecutive pickups without a hazard touch or a miss
    pub combo: u32,
    pub lives: u32,
    /// Survives restarts; never decreases
    pub best_score: u64,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(best_score: u64) -> Self {
        Self {
            score: 0,
            combo: 0,
            lives: 0,
            best_score,
            phase: GamePhase::NotStarted,
        }
    }

    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Raise the best score if the current score beats it
    pub fn record_score(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }
}

/// Things that happened during a tick, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { kind: PickupKind, points: u64 },
    /// A pickup fell off the bottom
    PickupMissed { kind: PickupKind },
    /// `lives_lost` is 0 when invulnerability absorbed the hit
    HazardHit { kind: HazardKind, lives_lost: u32 },
    NewBest { score: u64 },
    GameOver { score: u64, best_score: u64 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub arena: Arena,
    pub player: Player,
    /// Live entities in spawn order
    pub entities: Vec<Entity>,
    pub session: Session,
    pub progression: Progression,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session that has not started yet
    pub fn new(seed: u64, tuning: Tuning, arena: Arena, best_score: u64) -> Self {
        let player = Player::new(&arena, &tuning);
        let progression = Progression::new(&tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            player,
            entities: Vec::new(),
            session: Session::new(best_score),
            progression,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// (Re)initialise everything except the best score and enter `Running`
    pub fn reset(&mut self) {
        self.entities.clear();
        self.events.clear();
        self.next_id = 1;

        self.session.score = 0;
        self.session.combo = 0;
        self.session.lives = self.tuning.starting_lives.max(1);
        self.session.phase = GamePhase::Running;

        self.progression = Progression::new(&self.tuning);
        self.player = Player::new(&self.arena, &self.tuning);

        log::info!(
            "Session reset ({}x{}, best {})",
            self.arena.width,
            self.arena.height,
            self.session.best_score
        );
    }

    /// Viewport changed; player size follows the arena unless the game is over
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
        if !self.session.game_over() {
            self.player.fit_to_arena(&self.arena, &self.tuning);
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(7, Tuning::default(), Arena::new(480.0, 800.0), 0)
    }

    #[test]
    fn test_not_started_before_reset() {
        let state = fresh();
        assert_eq!(state.session.phase, GamePhase::NotStarted);
        assert!(!state.session.running());
        assert!(!state.session.game_over());
    }

    #[test]
    fn test_reset_defaults() {
        let mut state = fresh();
        state.reset();
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.session.combo, 0);
        assert!(state.session.running());
        assert!(!state.session.game_over());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = fresh();
        once.reset();
        let mut twice = fresh();
        twice.reset();
        twice.reset();
        assert_eq!(once.session, twice.session);
        assert_eq!(once.player, twice.player);
        assert_eq!(once.progression, twice.progression);
        assert_eq!(once.entities, twice.entities);
        assert!(twice.entities.is_empty());
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut state = GameState::new(1, Tuning::default(), Arena::new(480.0, 800.0), 250);
        state.session.score = 90;
        state.reset();
        assert_eq!(state.session.best_score, 250);
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_record_score_monotonic() {
        let mut session = Session::new(100);
        session.score = 50;
        assert!(!session.record_score());
        assert_eq!(session.best_score, 100);
        session.score = 120;
        assert!(session.record_score());
        assert_eq!(session.best_score, 120);
    }

    #[test]
    fn test_telegraph_only_bomb_and_bolt() {
        let mut entity = Entity {
            id: 1,
            kind: EntityKind::Hazard(HazardKind::Bomb),
            pos: Vec2::ZERO,
            size: Vec2::splat(40.0),
            vy: 300.0,
            age: 0.0,
        };
        assert!(!entity.is_armed(0.3));
        entity.advance(0.31);
        assert!(entity.is_armed(0.3));
        assert!((entity.pos.y - 93.0).abs() < 1e-3);

        for kind in [HazardKind::Spikes, HazardKind::Saw] {
            entity.kind = EntityKind::Hazard(kind);
            entity.age = 0.0;
            assert!(entity.is_armed(0.3));
        }
        assert!(HazardKind::ShockBolt.is_telegraphed());
    }

    #[test]
    fn test_resize_skipped_after_game_over() {
        let mut state = fresh();
        state.reset();
        let width_before = state.player.size.x;
        state.session.phase = GamePhase::GameOver;
        state.resize(200.0, 400.0);
        assert_eq!(state.arena.width, 200.0);
        assert_eq!(state.player.size.x, width_before);
    }

    #[test]
    fn test_arena_rejects_nan() {
        let arena = Arena::new(f32::NAN, -5.0);
        assert_eq!(arena.width, 1.0);
        assert_eq!(arena.height, 1.0);
    }
}
