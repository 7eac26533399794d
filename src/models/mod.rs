//! Core data models for the league ranker.

mod ids;
mod league;
mod match_result;
mod player;
mod ranking;

pub use ids::*;
pub use league::*;
pub use match_result::*;
pub use player::*;
pub use ranking::*;
