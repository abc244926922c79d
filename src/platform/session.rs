//! One playing session: simulation, input, frame clock and leaderboard
//!
//! Both front ends feed it key events and frame times, then draw
//! `session.state` once per frame after all ticks have run.

use super::input::InputState;
use super::time::{FixedTimestep, FpsCounter};
use crate::consts::SIM_DT;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Arena, GameEvent, GamePhase, GameState, tick};

pub struct Session {
    pub state: GameState,
    pub input: InputState,
    pub high_scores: HighScores,
    clock: FixedTimestep,
    fps: FpsCounter,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings, high_scores: HighScores) -> Self {
        let (width, height) = settings.window_size();
        let state = GameState::new(seed, Arena::new(width, height), settings.star_count());
        log::info!(
            "Session started: seed {}, arena {}x{}, {} stars",
            seed,
            width,
            height,
            state.stars.len()
        );
        Self {
            state,
            input: InputState::new(),
            high_scores,
            clock: FixedTimestep::new(),
            fps: FpsCounter::new(),
        }
    }

    /// Run the fixed steps owed for `frame_dt` seconds and return the events
    /// they raised. `frame_time_ms` is a monotonic timestamp for the FPS counter.
    pub fn frame(&mut self, frame_dt: f32, frame_time_ms: f64) -> Vec<GameEvent> {
        let steps = self.clock.advance(frame_dt);
        for _ in 0..steps {
            let input = self.input.tick_input();
            tick(&mut self.state, &input, SIM_DT);
            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }
        self.fps.record(frame_time_ms);
        self.state.drain_events()
    }

    /// Put a finished run on the leaderboard; returns its rank if it placed
    pub fn record_run(&mut self, score: u64, timestamp: f64) -> Option<usize> {
        let survived = self.state.elapsed_secs();
        let rank = self.high_scores.add_score(score, survived, timestamp);
        match rank {
            Some(1) => log::info!("New high score: {} ({:.1}s)", score, survived),
            Some(rank) => log::info!("Score {} placed #{} on the leaderboard", score, rank),
            None => {}
        }
        rank
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn best_score(&self) -> u64 {
        self.high_scores.top_score().unwrap_or(0).max(self.state.score)
    }

    /// One-line status for a window title
    pub fn status_line(&self, show_fps: bool) -> String {
        let mut line = match self.state.phase {
            GamePhase::Playing => format!(
                "Meteor Dodge | Score: {} | Best: {} | Shield: {}",
                self.state.score,
                self.best_score(),
                if self.state.shield.active { "up" } else { "down" }
            ),
            GamePhase::GameOver => format!(
                "Meteor Dodge | GAME OVER - Score: {} | Best: {} | R to restart",
                self.state.score,
                self.best_score()
            ),
        };
        if show_fps {
            line.push_str(&format!(" | FPS: {}", self.fps()));
        }
        line
    }
}
