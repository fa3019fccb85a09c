//! Round state and core simulation types
//!
//! Everything a round owns lives here: the player, the collectible set, the
//! countdown, and the Playing/Won/Lost machine. The session aggregate is
//! passed by reference to whichever driver needs it; there are no ambient
//! globals.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::generate_collectibles;
use super::clock::{RoundClock, TimerUrgency};
use crate::config::GameConfig;
use crate::consts::PLAYER_HEIGHT;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Input, collisions, and the countdown are live
    Playing,
    /// All collectibles gathered before expiry (terminal)
    Won,
    /// Countdown expired with collectibles remaining (terminal)
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundStatus::Playing)
    }
}

/// A collectible item
#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub position: Vec3,
    /// Resting height the bob animation oscillates around
    pub baseline_height: f32,
    /// Accumulated spin in radians, cosmetic
    pub rotation: f32,
}

/// One playthrough from timer start to a terminal state
#[derive(Debug, Clone)]
pub struct RoundState {
    pub score: u32,
    pub status: RoundStatus,
    pub player: Vec3,
    /// Ordered by id for deterministic iteration
    pub collectibles: Vec<Collectible>,
    /// Elapsed seconds at the moment the round ended; None while playing
    pub final_elapsed: Option<f32>,
}

impl RoundState {
    /// Fresh round: zero score, player at the origin, full collectible set
    pub fn new(config: &GameConfig, rng: &mut Pcg32) -> Self {
        Self {
            score: 0,
            status: RoundStatus::Playing,
            player: Vec3::new(0.0, PLAYER_HEIGHT, 0.0),
            collectibles: generate_collectibles(
                config.collectible_count,
                config.world_half_extent,
                rng,
            ),
            final_elapsed: None,
        }
    }
}

/// Aggregate owning the round, its entities, and the countdown clock.
///
/// Both periodic drivers (frame callback and countdown callback) go through
/// this one object; each checks the terminal status per tick and stops itself.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub round: RoundState,
    pub clock: RoundClock,
    seed: u64,
}

impl GameSession {
    /// Start a session with a seeded collectible layout and a running clock
    pub fn new(seed: u64, now_ms: f64, config: GameConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let round = RoundState::new(&config, &mut rng);
        let clock = RoundClock::new(now_ms, config.round_duration_secs);
        Self {
            config,
            round,
            clock,
            seed,
        }
    }

    /// Reset to a fresh round; a new seed reshuffles collectible placement
    pub fn restart(&mut self, seed: u64, now_ms: f64) {
        self.seed = seed;
        let mut rng = Pcg32::seed_from_u64(seed);
        self.round = RoundState::new(&self.config, &mut rng);
        self.clock.reset(now_ms);
        log::info!("Round restarted with seed {seed}");
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_over(&self) -> bool {
        self.round.status.is_terminal()
    }

    /// Elapsed seconds at the moment the round ended; None while playing.
    /// This is the value the leaderboard records as the final time.
    pub fn final_elapsed(&self) -> Option<f32> {
        self.round.final_elapsed
    }

    /// Enter a terminal state, freezing score and remaining time.
    ///
    /// The clock is refreshed first so the frozen remaining time (and the
    /// derived final elapsed time) reflect `now_ms` rather than the last
    /// countdown tick.
    pub(crate) fn finish(&mut self, status: RoundStatus, now_ms: f64) {
        self.clock.tick(now_ms);
        self.round.status = status;
        self.round.final_elapsed = Some(self.clock.duration_secs() - self.clock.remaining_secs());
        log::info!(
            "Round over: {:?} with score {} after {:.1}s",
            status,
            self.round.score,
            self.round.final_elapsed.unwrap_or_default(),
        );
    }

    /// Read-only view of the current frame for the render/HUD adapter
    pub fn snapshot(&self) -> RenderSnapshot {
        let time_remaining = self.clock.remaining_secs();
        RenderSnapshot {
            player: self.round.player,
            collectibles: self
                .round
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    position: c.position,
                    rotation: c.rotation,
                })
                .collect(),
            score: self.round.score,
            items_left: self.round.collectibles.len(),
            total_items: self.config.collectible_count,
            time_remaining,
            urgency: TimerUrgency::for_remaining(time_remaining),
            status: self.round.status,
        }
    }
}

/// Per-collectible render data
#[derive(Debug, Clone, Copy)]
pub struct CollectibleView {
    pub id: u32,
    pub position: Vec3,
    pub rotation: f32,
}

/// Read-only frame snapshot consumed by the view adapter.
///
/// The core never touches presentation; drawing and DOM/text updates happen
/// entirely on the other side of this type.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub player: Vec3,
    pub collectibles: Vec<CollectibleView>,
    pub score: u32,
    pub items_left: usize,
    pub total_items: usize,
    pub time_remaining: f32,
    pub urgency: TimerUrgency,
    pub status: RoundStatus,
}
