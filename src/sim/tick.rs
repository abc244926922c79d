//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::resolve_ship_collisions;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held
    pub move_left: bool,
    /// Right held
    pub move_right: bool,
    /// Start a new run (only honored after game over)
    pub restart: bool,
}

impl TickInput {
    /// Horizontal steering: -1, 0 or 1
    pub fn direction(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Stars keep drifting in every phase
    for star in &mut state.stars {
        star.update(dt, &state.arena, &mut state.star_rng);
    }

    match state.phase {
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
                state.events.push(GameEvent::Restarted);
                log::info!("New run started (seed {})", state.seed);
            }
        }
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Ship, then the shield tracks it
    state.ship.steer(input.direction(), dt, &state.arena);
    state.shield.follow(&state.ship);

    // Meteors fall; the ones past the bottom edge count as dodged
    let target = state.ship.center();
    for meteor in &mut state.meteors {
        meteor.update(dt, &state.arena, target);
    }
    let before = state.meteors.len();
    let arena = state.arena;
    state.meteors.retain(|m| !m.is_off_screen(&arena));
    let dodged = (before - state.meteors.len()) as u64;
    for _ in 0..dodged {
        state.score += 1;
        state.events.push(GameEvent::MeteorDodged { score: state.score });

        if state.score.is_multiple_of(SHIELD_RECHARGE_SCORE) && !state.shield.active {
            state.shield.active = true;
            state.events.push(GameEvent::ShieldRecharged);
            log::debug!("Shield recharged at score {}", state.score);
        }
    }

    // Spawn on a shrinking interval
    state.spawn_cooldown = state.spawn_cooldown.saturating_sub(1);
    if state.spawn_cooldown == 0 {
        state.spawn_meteor();
        state.spawn_cooldown = state.spawn_interval();
    }

    // Collisions last, against final positions
    let shield_rect = state.shield.rect;
    let result = resolve_ship_collisions(
        &state.meteors,
        &state.ship.rect,
        state.shield.active.then_some(&shield_rect),
    );

    if let Some(id) = result.absorbed {
        state.meteors.retain(|m| m.id != id);
        state.shield.active = false;
        state.events.push(GameEvent::ShieldAbsorbed);
        log::debug!("Shield absorbed meteor {}", id);
    }

    if let Some(id) = result.ship_hit {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::ShipDestroyed { score: state.score });
        log::info!(
            "Ship destroyed by meteor {} - score {} after {:.1}s",
            id,
            state.score,
            state.elapsed_secs()
        );
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Arena, MeteorKind};

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Arena::default(), 20)
    }

    /// Drop a meteor right on top of the ship
    fn drop_on_ship(state: &mut GameState) -> u32 {
        state.spawn_meteor_of(MeteorKind::Straight, false);
        let center = state.ship.center();
        let meteor = state.meteors.last_mut().unwrap();
        meteor.rect.pos = center - meteor.rect.size / 2.0;
        meteor.id
    }

    #[test]
    fn test_direction() {
        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), 0.0);
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        assert_eq!(left.direction(), -1.0);
    }

    #[test]
    fn test_ship_moves_with_input() {
        let mut state = new_state(1);
        let start = state.ship.rect.left();
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!((state.ship.rect.left() - (start + SHIP_SPEED * SIM_DT)).abs() < 1e-4);
        assert_eq!(state.shield.rect.center(), state.ship.center());
    }

    #[test]
    fn test_first_meteor_spawns_after_interval() {
        let mut state = new_state(2);
        let input = TickInput::default();
        for _ in 0..SPAWN_INTERVAL_START_TICKS - 1 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.meteors.is_empty());
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.meteors.len(), 1);
    }

    #[test]
    fn test_dodged_meteor_scores() {
        let mut state = new_state(3);
        state.spawn_meteor_of(MeteorKind::Straight, false);
        // Far from the ship, about to leave the screen
        state.meteors[0].rect.pos.x = 0.0;
        state.ship.rect.pos.x = state.arena.width - SHIP_WIDTH;
        state.meteors[0].rect.pos.y = state.arena.height - 0.5;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 1);
        assert!(state.meteors.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::MeteorDodged { score: 1 })
        );
    }

    #[test]
    fn test_each_dodge_reports_its_own_score() {
        let mut state = new_state(3);
        state.score = 9;
        state.ship.rect.pos.x = state.arena.width - SHIP_WIDTH;
        for x in [0.0, 100.0] {
            state.spawn_meteor_of(MeteorKind::Straight, false);
            let m = state.meteors.last_mut().unwrap();
            m.rect.pos.x = x;
            m.rect.pos.y = state.arena.height - 0.5;
        }

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 11);
        let dodged: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::MeteorDodged { .. }))
            .collect();
        assert_eq!(
            dodged,
            vec![
                GameEvent::MeteorDodged { score: 10 },
                GameEvent::MeteorDodged { score: 11 },
            ]
        );
    }

    #[test]
    fn test_star_count_does_not_change_meteors() {
        let mut low = GameState::new(1234, Arena::default(), 30);
        let mut high = GameState::new(1234, Arena::default(), 120);
        let input = TickInput::default();

        for _ in 0..200 {
            tick(&mut low, &input, SIM_DT);
            tick(&mut high, &input, SIM_DT);
        }

        assert!(!low.meteors.is_empty());
        assert_eq!(low.meteors.len(), high.meteors.len());
        for (a, b) in low.meteors.iter().zip(&high.meteors) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.rect, b.rect);
        }
        assert_eq!(low.score, high.score);
    }

    #[test]
    fn test_shield_absorbs_then_ship_dies() {
        let mut state = new_state(4);
        let input = TickInput::default();

        let first = drop_on_ship(&mut state);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.shield.active);
        assert!(state.meteors.iter().all(|m| m.id != first));
        assert_eq!(state.drain_events(), vec![GameEvent::ShieldAbsorbed]);

        drop_on_ship(&mut state);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ShipDestroyed { score: 0 })
        );
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = new_state(5);
        state.shield.active = false;
        drop_on_ship(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let ship_x = state.ship.rect.left();
        let meteor_y = state.meteors[0].rect.top();
        let ticks = state.time_ticks;
        let star_y = state.stars[0].pos.y;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.ship.rect.left(), ship_x);
        assert_eq!(state.meteors[0].rect.top(), meteor_y);
        assert_eq!(state.time_ticks, ticks);
        assert_ne!(state.stars[0].pos.y, star_y);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = new_state(6);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };

        // Ignored while playing
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.time_ticks, 1);
        assert!(!state.events.contains(&GameEvent::Restarted));

        state.shield.active = false;
        drop_on_ship(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
        assert!(state.meteors.is_empty());
        assert!(state.events.contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_shield_recharges() {
        let mut state = new_state(7);
        state.shield.active = false;
        state.score = SHIELD_RECHARGE_SCORE - 1;
        state.spawn_meteor_of(MeteorKind::Straight, false);
        state.meteors[0].rect.pos.x = 0.0;
        state.ship.rect.pos.x = state.arena.width - SHIP_WIDTH;
        state.meteors[0].rect.pos.y = state.arena.height - 0.5;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, SHIELD_RECHARGE_SCORE);
        assert!(state.shield.active);
        assert!(state.events.contains(&GameEvent::ShieldRecharged));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        for i in 0..600u32 {
            let input = TickInput {
                move_left: i % 90 < 45,
                move_right: i % 90 >= 45,
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.meteors.len(), state2.meteors.len());
        for (a, b) in state1.meteors.iter().zip(&state2.meteors) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.rect, b.rect);
        }
        assert_eq!(state1.ship.rect, state2.ship.rect);
    }
}
