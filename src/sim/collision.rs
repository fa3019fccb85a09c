//! Pickup detection and scoring
//!
//! Proximity checks between the player and the collectible set. Distance is
//! full 3D, including the animated bob height, so the effective pickup window
//! breathes slightly with the animation phase.

use glam::Vec3;

use super::state::Collectible;

/// Result of one collision resolution pass
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// Ids collected this pass, in iteration order
    pub collected: Vec<u32>,
    /// Score after crediting one point per collected item
    pub new_score: u32,
}

impl CollisionOutcome {
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }
}

/// Collect every item strictly closer than `pickup_radius` to the player.
///
/// Processes the full current set exactly once: removing several items in the
/// same pass neither double-counts nor skips neighbors. Deterministic for
/// identical positions; the only randomness in the game is initial placement.
pub fn resolve_collisions(
    player_pos: Vec3,
    collectibles: &mut Vec<Collectible>,
    pickup_radius: f32,
    score: u32,
) -> CollisionOutcome {
    let mut collected = Vec::new();
    collectibles.retain(|c| {
        if player_pos.distance(c.position) < pickup_radius {
            collected.push(c.id);
            false
        } else {
            true
        }
    });

    let new_score = score + collected.len() as u32;
    CollisionOutcome {
        collected,
        new_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: u32, x: f32, y: f32, z: f32) -> Collectible {
        Collectible {
            id,
            position: Vec3::new(x, y, z),
            baseline_height: y,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_collects_within_radius() {
        let player = Vec3::new(0.0, 0.5, 0.0);
        let mut items = vec![item(0, 0.5, 0.4, 0.0), item(1, 5.0, 0.4, 0.0)];

        let outcome = resolve_collisions(player, &mut items, 1.0, 0);
        assert_eq!(outcome.collected, vec![0]);
        assert_eq!(outcome.new_score, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn test_radius_is_strict() {
        let player = Vec3::new(0.0, 0.0, 0.0);
        let mut items = vec![item(0, 1.0, 0.0, 0.0)];

        let outcome = resolve_collisions(player, &mut items, 1.0, 0);
        assert!(outcome.collected.is_empty());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_adjacent_items_collected_in_one_pass() {
        // Several items inside the radius at once; none may be skipped when
        // earlier ones are removed.
        let player = Vec3::new(0.0, 0.5, 0.0);
        let mut items = vec![
            item(0, 0.2, 0.5, 0.0),
            item(1, -0.2, 0.5, 0.1),
            item(2, 0.0, 0.5, -0.3),
            item(3, 8.0, 0.5, 8.0),
        ];

        let outcome = resolve_collisions(player, &mut items, 1.0, 5);
        assert_eq!(outcome.collected, vec![0, 1, 2]);
        assert_eq!(outcome.new_score, 8);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_bob_height_affects_distance() {
        // Item at horizontal distance 0.9: in range at player height, out of
        // range once the bob lifts it far enough.
        let player = Vec3::new(0.0, 0.5, 0.0);

        let mut level = vec![item(0, 0.9, 0.5, 0.0)];
        assert_eq!(resolve_collisions(player, &mut level, 1.0, 0).collected_count(), 1);

        let mut lifted = vec![item(0, 0.9, 1.2, 0.0)];
        assert_eq!(resolve_collisions(player, &mut lifted, 1.0, 0).collected_count(), 0);
    }

    proptest! {
        /// Resolution never grows the set and never loses score
        #[test]
        fn prop_score_and_count_invariants(
            px in -20.0f32..20.0,
            pz in -20.0f32..20.0,
            score in 0u32..100,
            xs in proptest::collection::vec((-20.0f32..20.0, -20.0f32..20.0), 0..20),
        ) {
            let player = Vec3::new(px, 0.5, pz);
            let mut items: Vec<Collectible> = xs
                .iter()
                .enumerate()
                .map(|(i, &(x, z))| item(i as u32, x, 0.4, z))
                .collect();
            let before = items.len();

            let outcome = resolve_collisions(player, &mut items, 1.0, score);
            prop_assert!(items.len() <= before);
            prop_assert!(outcome.new_score >= score);
            prop_assert_eq!(outcome.new_score, score + outcome.collected_count() as u32);
            prop_assert_eq!(items.len() + outcome.collected_count(), before);
        }
    }
}
