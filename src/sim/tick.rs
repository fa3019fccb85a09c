//! Frame and countdown entry points
//!
//! The round state machine advances here in a fixed evaluation order:
//! animate, move, resolve collisions, check Won, check Lost. When a win and a
//! loss could both fire in the same frame, the win is taken: the collect-all
//! check runs after movement resolution and before the expiry check.

use super::arena::{MoveIntent, move_player};
use super::collision::resolve_collisions;
use super::state::{Collectible, GameSession, RoundStatus};
use crate::consts::{BOB_AMPLITUDE, SPIN_RATE};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub intent: MoveIntent,
}

/// Advance the session by one frame of the render/update driver.
///
/// No-op once the round is terminal: input is ignored and no further
/// collision resolution occurs.
pub fn frame(session: &mut GameSession, input: &FrameInput, now_ms: f64) {
    if session.round.status.is_terminal() {
        return;
    }

    let time_secs = session.clock.elapsed_secs(now_ms);
    animate_collectibles(&mut session.round.collectibles, time_secs);

    move_player(
        &mut session.round.player,
        input.intent,
        session.config.player_speed,
        session.config.world_half_extent,
    );

    let outcome = resolve_collisions(
        session.round.player,
        &mut session.round.collectibles,
        session.config.pickup_radius,
        session.round.score,
    );
    if !outcome.collected.is_empty() {
        log::debug!(
            "Collected {:?}, score {} -> {}",
            outcome.collected,
            session.round.score,
            outcome.new_score
        );
    }
    session.round.score = outcome.new_score;

    if session.round.collectibles.is_empty() {
        session.finish(RoundStatus::Won, now_ms);
        return;
    }

    if session.clock.tick(now_ms) {
        session.finish(RoundStatus::Lost, now_ms);
    }
}

/// Advance the countdown from the independent timer driver.
///
/// Ignored once the round is terminal, so remaining time stays frozen.
pub fn timer_tick(session: &mut GameSession, now_ms: f64) {
    if session.round.status.is_terminal() {
        return;
    }
    if session.clock.tick(now_ms) {
        session.finish(RoundStatus::Lost, now_ms);
    }
}

/// Spin each collectible and bob it around its baseline height.
///
/// The bob feeds back into gameplay: collision distance is 3D and uses the
/// animated position.
fn animate_collectibles(collectibles: &mut [Collectible], time_secs: f32) {
    for c in collectibles.iter_mut() {
        c.rotation += SPIN_RATE;
        c.position.y = c.baseline_height + (time_secs + c.id as f32).sin() * BOB_AMPLITUDE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use glam::Vec3;

    const FRAME_MS: f64 = 16.0;

    fn session() -> GameSession {
        GameSession::new(1234, 0.0, GameConfig::default())
    }

    /// Park every collectible out of reach so only the timer can end the round
    fn scatter_far(session: &mut GameSession) {
        for (i, c) in session.round.collectibles.iter_mut().enumerate() {
            c.position = Vec3::new(10.0 + i as f32, c.baseline_height, 10.0);
            c.baseline_height = c.position.y;
        }
    }

    /// Pile every collectible next to the origin so one frame collects all
    fn pile_near_player(session: &mut GameSession) {
        for c in session.round.collectibles.iter_mut() {
            c.position = Vec3::new(0.3, c.baseline_height, 0.2);
        }
    }

    #[test]
    fn test_collect_all_wins_and_stops_clock() {
        let mut s = session();
        pile_near_player(&mut s);

        frame(&mut s, &FrameInput::default(), 5_000.0);
        assert_eq!(s.round.status, RoundStatus::Won);
        assert_eq!(s.round.score, 10);
        assert!(s.round.collectibles.is_empty());

        // final elapsed = duration - remaining at the win
        let final_time = s.final_elapsed().expect("terminal round has a final time");
        assert!((final_time - 5.0).abs() < 0.01);
        assert!((s.clock.remaining_secs() - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_expiry_loses_with_items_remaining() {
        let mut s = session();
        scatter_far(&mut s);
        s.round.score = 7;

        timer_tick(&mut s, 10_000.0);
        assert_eq!(s.round.status, RoundStatus::Playing);

        timer_tick(&mut s, 20_050.0);
        assert_eq!(s.round.status, RoundStatus::Lost);
        // Score frozen at collected-so-far
        assert_eq!(s.round.score, 7);
        assert_eq!(s.round.collectibles.len(), 10);
        assert!((s.final_elapsed().unwrap() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_win_takes_precedence_over_same_tick_expiry() {
        let mut s = session();
        pile_near_player(&mut s);

        // Both conditions hold at this instant; collection resolves first.
        frame(&mut s, &FrameInput::default(), 20_500.0);
        assert_eq!(s.round.status, RoundStatus::Won);
    }

    #[test]
    fn test_frame_expires_clock_without_collection() {
        let mut s = session();
        scatter_far(&mut s);

        frame(&mut s, &FrameInput::default(), 21_000.0);
        assert_eq!(s.round.status, RoundStatus::Lost);
        assert_eq!(s.clock.remaining_secs(), 0.0);
    }

    #[test]
    fn test_movement_integrates_over_frames() {
        let mut s = session();
        scatter_far(&mut s);
        let input = FrameInput {
            intent: MoveIntent::new(1.0, 0.0),
        };

        for i in 0..50 {
            frame(&mut s, &input, i as f64 * FRAME_MS);
        }
        // 50 frames at 0.1/frame
        assert!((s.round.player.x - 5.0).abs() < 1e-3);
        assert_eq!(s.round.player.z, 0.0);
    }

    #[test]
    fn test_terminal_round_ignores_input_and_ticks() {
        let mut s = session();
        scatter_far(&mut s);
        timer_tick(&mut s, 25_000.0);
        assert_eq!(s.round.status, RoundStatus::Lost);

        let player_before = s.round.player;
        let remaining_before = s.clock.remaining_secs();

        let input = FrameInput {
            intent: MoveIntent::new(1.0, 1.0),
        };
        frame(&mut s, &input, 30_000.0);
        timer_tick(&mut s, 30_000.0);

        assert_eq!(s.round.player, player_before);
        assert_eq!(s.clock.remaining_secs(), remaining_before);
        assert_eq!(s.round.status, RoundStatus::Lost);
    }

    #[test]
    fn test_won_is_not_overturned_by_later_expiry() {
        let mut s = session();
        pile_near_player(&mut s);
        frame(&mut s, &FrameInput::default(), 1_000.0);
        assert_eq!(s.round.status, RoundStatus::Won);

        timer_tick(&mut s, 60_000.0);
        assert_eq!(s.round.status, RoundStatus::Won);
    }

    #[test]
    fn test_bob_animation_moves_height_only() {
        let mut s = session();
        scatter_far(&mut s);
        let before: Vec<_> = s
            .round
            .collectibles
            .iter()
            .map(|c| (c.position.x, c.position.z))
            .collect();

        frame(&mut s, &FrameInput::default(), 2_000.0);

        for (c, (x, z)) in s.round.collectibles.iter().zip(before) {
            assert_eq!(c.position.x, x);
            assert_eq!(c.position.z, z);
            assert!((c.position.y - c.baseline_height).abs() <= crate::consts::BOB_AMPLITUDE);
            assert!(c.rotation > 0.0);
        }
    }

    #[test]
    fn test_drivers_agree_within_same_instant() {
        // A timer tick and a frame at the same wall-clock instant must not
        // depend on ordering: neither path ends a round the other would not.
        let mut a = session();
        let mut b = session();
        scatter_far(&mut a);
        scatter_far(&mut b);

        let now = 20_001.0;
        timer_tick(&mut a, now);
        frame(&mut a, &FrameInput::default(), now);

        frame(&mut b, &FrameInput::default(), now);
        timer_tick(&mut b, now);

        assert_eq!(a.round.status, RoundStatus::Lost);
        assert_eq!(b.round.status, RoundStatus::Lost);
        assert_eq!(a.round.score, b.round.score);
    }
}
