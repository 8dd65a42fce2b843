//! Ranking card generator: reads a leaderboard, renders one card per
//! placement and assembles the composite sheet.

pub mod bootstrap;
pub mod config;
pub mod services;

pub use bootstrap::init_foundation;
