//! Game state and core simulation types
//!
//! Everything a run needs to be replayed from its seed lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Meteors falling, ship under player control
    Playing,
    /// Ship destroyed, waiting for restart input
    GameOver,
}

/// Things that happened during a tick, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A meteor left the bottom of the screen; `score` is the total after it
    MeteorDodged { score: u64 },
    /// The shield took a meteor hit and went down
    ShieldAbsorbed,
    /// The shield came back up
    ShieldRecharged,
    /// A meteor hit the unshielded ship
    ShipDestroyed { score: u64 },
    /// A new run started after game over
    Restarted,
}

/// Arena dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// A decorative background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    /// Fall speed (pixels/s)
    pub speed: f32,
    pub size: f32,
}

impl Star {
    fn random(rng: &mut Pcg32, arena: &Arena) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..arena.width),
                rng.random_range(0.0..arena.height),
            ),
            speed: rng.random_range(STAR_MIN_SPEED..STAR_MAX_SPEED),
            size: rng.random_range(STAR_MIN_SIZE..STAR_MAX_SIZE),
        }
    }

    /// Move down; wrap to the top at a fresh x once fully off the bottom
    pub fn update(&mut self, dt: f32, arena: &Arena, rng: &mut Pcg32) {
        self.pos.y += self.speed * dt;
        if self.pos.y > arena.height {
            self.pos.y = -self.size;
            self.pos.x = rng.random_range(0.0..arena.width);
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Spaceship {
    pub rect: Rect,
}

impl Spaceship {
    /// Horizontally centered near the bottom edge
    pub fn new(arena: &Arena) -> Self {
        let x = (arena.width - SHIP_WIDTH) / 2.0;
        let y = arena.height - SHIP_BOTTOM_MARGIN - SHIP_HEIGHT;
        Self {
            rect: Rect::new(x, y, SHIP_WIDTH, SHIP_HEIGHT),
        }
    }

    /// Move by `direction` (-1 left, 0 still, 1 right), clamped to the screen
    pub fn steer(&mut self, direction: f32, dt: f32, arena: &Arena) {
        self.rect.pos.x += direction * SHIP_SPEED * dt;
        self.rect.clamp_x(0.0, arena.width);
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// One-hit bubble around the ship
#[derive(Debug, Clone)]
pub struct Shield {
    pub rect: Rect,
    pub active: bool,
}

impl Shield {
    pub fn new(ship: &Spaceship) -> Self {
        Self {
            rect: ship.rect.inflate(SHIELD_PADDING),
            active: true,
        }
    }

    /// Re-center on the ship
    pub fn follow(&mut self, ship: &Spaceship) {
        self.rect = Rect::from_center(ship.center(), self.rect.size);
    }
}

/// Meteor movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorKind {
    /// Falls straight down
    Straight,
    /// Swings left and right while falling
    Zigzag,
    /// Drifts toward the ship while falling
    Homing,
}

/// A falling meteor
#[derive(Debug, Clone)]
pub struct Meteor {
    pub id: u32,
    pub kind: MeteorKind,
    pub rect: Rect,
    /// Velocity (pixels/s); y is always the fall speed
    pub vel: Vec2,
    pub age_ticks: u32,
}

impl Meteor {
    /// Advance one tick. `target` is the ship center, used by homing meteors.
    pub fn update(&mut self, dt: f32, arena: &Arena, target: Vec2) {
        self.age_ticks += 1;

        match self.kind {
            MeteorKind::Straight => {}
            MeteorKind::Zigzag => {
                if self.age_ticks.is_multiple_of(ZIGZAG_PERIOD_TICKS) {
                    self.vel.x = -self.vel.x;
                }
            }
            MeteorKind::Homing => {
                let dx = target.x - self.rect.center().x;
                let desired = dx.clamp(-HOMING_MAX_DRIFT, HOMING_MAX_DRIFT);
                let max_change = HOMING_STEER * dt;
                self.vel.x += (desired - self.vel.x).clamp(-max_change, max_change);
            }
        }

        self.rect.pos += self.vel * dt;

        // Zigzag meteors bounce off the side walls
        if self.kind == MeteorKind::Zigzag {
            if self.rect.left() < 0.0 {
                self.rect.pos.x = 0.0;
                self.vel.x = self.vel.x.abs();
            } else if self.rect.right() > arena.width {
                self.rect.pos.x = arena.width - self.rect.size.x;
                self.vel.x = -self.vel.x.abs();
            }
        }
    }

    /// Entirely below the bottom edge
    pub fn is_off_screen(&self, arena: &Arena) -> bool {
        self.rect.top() > arena.height
    }
}

/// Mixed into the run seed to derive the star field's RNG
const STAR_SEED_SALT: u64 = 0x5354_4152_4649_454c;

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for meteors and restarts
    pub rng: Pcg32,
    /// Separate stream for the star field, so the star count never shifts gameplay
    pub star_rng: Pcg32,
    pub arena: Arena,
    /// Meteors dodged this run
    pub score: u64,
    /// Simulation tick counter for this run
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks until the next meteor spawns
    pub spawn_cooldown: u32,
    pub ship: Spaceship,
    pub shield: Shield,
    /// Active meteors (sorted by id for determinism)
    pub meteors: Vec<Meteor>,
    /// Background stars (not gameplay-affecting)
    pub stars: Vec<Star>,
    /// Events raised since the front end last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64, arena: Arena, star_count: usize) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let mut star_rng = Pcg32::seed_from_u64(seed ^ STAR_SEED_SALT);
        let stars = (0..star_count)
            .map(|_| Star::random(&mut star_rng, &arena))
            .collect();
        let ship = Spaceship::new(&arena);
        let shield = Shield::new(&ship);

        Self {
            seed,
            rng,
            star_rng,
            arena,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            spawn_cooldown: SPAWN_INTERVAL_START_TICKS,
            ship,
            shield,
            meteors: Vec::new(),
            stars,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Start over in place, keeping the arena and star count
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let star_count = self.stars.len();
        let events = std::mem::take(&mut self.events);
        *self = Self::new(seed, self.arena, star_count);
        self.events = events;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current ticks between spawns, shrinking as the run goes on
    pub fn spawn_interval(&self) -> u32 {
        let ramp = (self.time_ticks / SPAWN_RAMP_TICKS).min(u32::MAX as u64) as u32;
        SPAWN_INTERVAL_START_TICKS
            .saturating_sub(ramp)
            .max(SPAWN_INTERVAL_MIN_TICKS)
    }

    /// Spawn a meteor just above the top edge
    pub fn spawn_meteor(&mut self) {
        let roll: u32 = self.rng.random_range(0..100);
        let kind = match roll {
            0..60 => MeteorKind::Straight,
            60..85 => MeteorKind::Zigzag,
            _ if self.score >= HOMING_UNLOCK_SCORE => MeteorKind::Homing,
            _ => MeteorKind::Straight,
        };
        let drift_right = self.rng.random_bool(0.5);
        self.spawn_meteor_of(kind, drift_right);
    }

    /// Spawn a meteor of a given kind; `drift_right` picks the zigzag start direction
    pub fn spawn_meteor_of(&mut self, kind: MeteorKind, drift_right: bool) {
        let size = self.rng.random_range(METEOR_MIN_SIZE..=METEOR_MAX_SIZE);
        let max_x = (self.arena.width - size).max(0.0);
        let x = if max_x > 0.0 {
            self.rng.random_range(0.0..=max_x)
        } else {
            0.0
        };
        let fall_speed = self.rng.random_range(METEOR_MIN_SPEED..=METEOR_MAX_SPEED);
        let vx = match kind {
            MeteorKind::Zigzag if drift_right => ZIGZAG_SPEED,
            MeteorKind::Zigzag => -ZIGZAG_SPEED,
            _ => 0.0,
        };

        let id = self.next_entity_id();
        log::trace!("Spawned meteor {} ({:?}) at x={:.0}", id, kind, x);
        self.meteors.push(Meteor {
            id,
            kind,
            rect: Rect::new(x, -size, size, size),
            vel: Vec2::new(vx, fall_speed),
            age_ticks: 0,
        });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure meteors are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.meteors.sort_by_key(|m| m.id);
    }

    /// Seconds survived this run
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 / TICKS_PER_SECOND as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, Arena::default(), 60);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stars.len(), 60);
        assert!(state.meteors.is_empty());
        assert!(state.shield.active);
        assert_eq!(state.ship.rect.bottom(), 480.0 - SHIP_BOTTOM_MARGIN);
        assert_eq!(state.ship.center().x, 320.0);
        assert_eq!(state.shield.rect.center(), state.ship.center());
    }

    #[test]
    fn test_stars_start_on_screen() {
        let arena = Arena::default();
        let state = GameState::new(1, arena, 120);
        for star in &state.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < arena.width);
            assert!(star.pos.y >= 0.0 && star.pos.y < arena.height);
        }
    }

    #[test]
    fn test_star_wraps_to_top() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut star = Star {
            pos: Vec2::new(100.0, arena.height - 0.5),
            speed: 120.0,
            size: 2.0,
        };
        star.update(SIM_DT, &arena, &mut rng);
        assert_eq!(star.pos.y, -2.0);
        assert!(star.pos.x >= 0.0 && star.pos.x < arena.width);
    }

    #[test]
    fn test_ship_clamped_to_screen() {
        let arena = Arena::default();
        let mut ship = Spaceship::new(&arena);
        for _ in 0..600 {
            ship.steer(-1.0, SIM_DT, &arena);
        }
        assert_eq!(ship.rect.left(), 0.0);
        for _ in 0..600 {
            ship.steer(1.0, SIM_DT, &arena);
        }
        assert_eq!(ship.rect.right(), arena.width);
    }

    #[test]
    fn test_shield_follows_ship() {
        let arena = Arena::default();
        let mut ship = Spaceship::new(&arena);
        let mut shield = Shield::new(&ship);
        ship.steer(1.0, 0.5, &arena);
        shield.follow(&ship);
        assert_eq!(shield.rect.center(), ship.center());
        assert_eq!(shield.rect.size, ship.rect.inflate(SHIELD_PADDING).size);
    }

    #[test]
    fn test_spawned_meteor_starts_above_screen() {
        let mut state = GameState::new(11, Arena::default(), 0);
        for _ in 0..50 {
            state.spawn_meteor();
        }
        for m in &state.meteors {
            assert_eq!(m.rect.bottom(), 0.0);
            assert!(m.rect.left() >= 0.0 && m.rect.right() <= state.arena.width);
            assert!(m.vel.y >= METEOR_MIN_SPEED && m.vel.y <= METEOR_MAX_SPEED);
        }
        // No homing meteors before the unlock score
        assert!(state.meteors.iter().all(|m| m.kind != MeteorKind::Homing));
        // Ids are unique and increasing
        assert!(state.meteors.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_homing_unlocks_at_score() {
        let mut state = GameState::new(11, Arena::default(), 0);
        state.score = HOMING_UNLOCK_SCORE - 1;
        for _ in 0..200 {
            state.spawn_meteor();
        }
        assert!(state.meteors.iter().all(|m| m.kind != MeteorKind::Homing));

        state.meteors.clear();
        state.score = HOMING_UNLOCK_SCORE;
        for _ in 0..200 {
            state.spawn_meteor();
        }
        let homing = state
            .meteors
            .iter()
            .filter(|m| m.kind == MeteorKind::Homing)
            .count();
        assert!(homing > 0);
        assert!(homing < 200);
        assert!(state.meteors.iter().any(|m| m.kind == MeteorKind::Zigzag));
    }

    #[test]
    fn test_zigzag_flips_and_bounces() {
        let arena = Arena::default();
        let mut m = Meteor {
            id: 1,
            kind: MeteorKind::Zigzag,
            rect: Rect::new(300.0, 0.0, 20.0, 20.0),
            vel: Vec2::new(ZIGZAG_SPEED, 150.0),
            age_ticks: 0,
        };
        for _ in 0..ZIGZAG_PERIOD_TICKS {
            m.update(SIM_DT, &arena, Vec2::ZERO);
        }
        assert_eq!(m.vel.x, -ZIGZAG_SPEED);

        m.rect.pos.x = 1.0;
        m.update(SIM_DT, &arena, Vec2::ZERO);
        assert_eq!(m.rect.left(), 0.0);
        assert!(m.vel.x > 0.0);
    }

    #[test]
    fn test_homing_drifts_toward_target() {
        let arena = Arena::default();
        let mut m = Meteor {
            id: 1,
            kind: MeteorKind::Homing,
            rect: Rect::new(100.0, 0.0, 20.0, 20.0),
            vel: Vec2::new(0.0, 150.0),
            age_ticks: 0,
        };
        let target = Vec2::new(500.0, 450.0);
        let start_x = m.rect.center().x;
        for _ in 0..60 {
            m.update(SIM_DT, &arena, target);
            assert!(m.vel.x <= HOMING_MAX_DRIFT + 1e-3);
        }
        assert!(m.rect.center().x > start_x);
        assert_eq!(m.vel.y, 150.0);
    }

    #[test]
    fn test_spawn_interval_ramps_down() {
        let mut state = GameState::new(5, Arena::default(), 0);
        assert_eq!(state.spawn_interval(), SPAWN_INTERVAL_START_TICKS);
        state.time_ticks = SPAWN_RAMP_TICKS * 3;
        assert_eq!(state.spawn_interval(), SPAWN_INTERVAL_START_TICKS - 3);
        state.time_ticks = u64::MAX / 2;
        assert_eq!(state.spawn_interval(), SPAWN_INTERVAL_MIN_TICKS);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(9, Arena::new(800, 600), 30);
        state.score = 42;
        state.phase = GamePhase::GameOver;
        state.shield.active = false;
        state.spawn_meteor();
        let old_seed = state.seed;

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.meteors.is_empty());
        assert!(state.shield.active);
        assert_eq!(state.arena, Arena::new(800, 600));
        assert_eq!(state.stars.len(), 30);
        assert_ne!(state.seed, old_seed);
    }
}
