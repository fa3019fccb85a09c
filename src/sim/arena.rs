//! Bounded movement plane and collectible placement
//!
//! The arena is a square on the x/z plane; y is cosmetic (bob height).

use glam::Vec3;
use rand::Rng;

use super::state::Collectible;
use crate::consts::{COLLECTIBLE_HEIGHT, SPAWN_EXTENT_RATIO};

/// Normalized movement intent for one frame
///
/// Keyboard input contributes ±1 per held direction, analog input contributes
/// continuous fractions; the sim does not distinguish the source. Diagonals
/// sum and are not re-normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub x: f32,
    pub z: f32,
}

impl MoveIntent {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// Build an intent, clamping each axis to [-1, 1]
    pub fn new(x: f32, z: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            z: z.clamp(-1.0, 1.0),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.z == 0.0
    }
}

/// Move the player by `intent * speed`, clamping x and z independently to
/// `[-half_extent, half_extent]`
pub fn move_player(pos: &mut Vec3, intent: MoveIntent, speed: f32, half_extent: f32) {
    pos.x = (pos.x + intent.x * speed).clamp(-half_extent, half_extent);
    pos.z = (pos.z + intent.z * speed).clamp(-half_extent, half_extent);
}

/// Place `count` collectibles uniformly inside the spawn region
///
/// x/z are drawn from `[-half_extent * 0.75, half_extent * 0.75]`, height is
/// fixed at [`COLLECTIBLE_HEIGHT`]. Ids and positions are assigned in draw
/// order, so a seeded RNG reproduces the same layout.
pub fn generate_collectibles<R: Rng>(
    count: usize,
    half_extent: f32,
    rng: &mut R,
) -> Vec<Collectible> {
    let spawn = half_extent * SPAWN_EXTENT_RATIO;
    (0..count)
        .map(|i| Collectible {
            id: i as u32,
            position: Vec3::new(
                rng.random_range(-spawn..=spawn),
                COLLECTIBLE_HEIGHT,
                rng.random_range(-spawn..=spawn),
            ),
            baseline_height: COLLECTIBLE_HEIGHT,
            rotation: 0.0,
        })
        .collect()
}
