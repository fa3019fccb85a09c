//! Deterministic gameplay core
//!
//! All round logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only, used for collectible placement
//! - Wall-clock time enters only as an argument
//! - Stable iteration order (by collectible id)
//! - No rendering or platform dependencies

pub mod arena;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use arena::{MoveIntent, generate_collectibles, move_player};
pub use clock::{RoundClock, TimerUrgency};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use state::{
    Collectible, CollectibleView, GameSession, RenderSnapshot, RoundState, RoundStatus,
};
pub use tick::{FrameInput, frame, timer_tick};
