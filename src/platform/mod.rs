//! Platform abstraction layer
//!
//! Pieces shared by the native and browser front ends:
//! - Frame time to fixed simulation steps
//! - Key events to per-tick input
//! - A session tying both to the simulation and leaderboard

pub mod input;
pub mod session;
pub mod time;

pub use input::{InputState, Key};
pub use session::Session;
pub use time::{FixedTimestep, FpsCounter};
