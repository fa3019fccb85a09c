//! Cube Rush - a timed collect-a-thon in a bounded arena
//!
//! Core modules:
//! - `sim`: Deterministic gameplay core (movement, collisions, round state)
//! - `leaderboard`: Ranked top-10 score table with dedup across sessions
//! - `persistence`: Swappable score storage (LocalStorage, file, in-memory)
//! - `platform`: Browser/native time and periodic-callback plumbing

pub mod config;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use leaderboard::Leaderboard;

/// Game configuration constants
pub mod consts {
    /// Distance the player covers per frame at full intent
    pub const PLAYER_SPEED: f32 = 0.1;
    /// Arena clamp bound on x and z
    pub const WORLD_HALF_EXTENT: f32 = 20.0;
    /// Collectibles placed at round start
    pub const COLLECTIBLE_COUNT: usize = 10;
    /// Countdown length in seconds
    pub const ROUND_DURATION_SECS: f32 = 20.0;
    /// Collection distance threshold (world units)
    pub const PICKUP_RADIUS: f32 = 1.0;

    /// Resting height of the player shape
    pub const PLAYER_HEIGHT: f32 = 0.5;
    /// Resting height of collectibles above the ground
    pub const COLLECTIBLE_HEIGHT: f32 = 0.4;
    /// Vertical bob amplitude of the collectible idle animation
    pub const BOB_AMPLITUDE: f32 = 0.2;
    /// Spin applied to each collectible per frame (radians)
    pub const SPIN_RATE: f32 = 0.02;
    /// Collectibles spawn within this fraction of the arena extent
    pub const SPAWN_EXTENT_RATIO: f32 = 0.75;
    /// Cadence of the countdown driver in milliseconds
    pub const TIMER_INTERVAL_MS: i32 = 100;
}
