//! Drop Catcher - A falling-items arcade catcher game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawning, collisions, session)
//! - `game`: Frame driver wiring the simulation to the platform sinks
//! - `headless`: Autopilot runs without a browser
//! - `renderer`: Canvas 2D rendering and sprite geometry
//! - `platform`: HUD and haptics adapters (browser and headless)
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance
//! - `input`, `clock`: Input aggregation and frame timing
//! - `assets`, `settings`, `error`: Startup assets, preferences, error types

pub mod assets;
pub mod clock;
pub mod error;
pub mod game;
pub mod headless;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, StorageError};
pub use game::{Game, Platform};
pub use settings::Settings;
pub use tuning::{MovementProfile, Tuning};
