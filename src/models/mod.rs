//! Core data models for the battle stats tracker.

mod aggregate;
mod battle;
mod faction;
mod ids;
mod level;
mod person;
mod player;
mod window;

pub use aggregate::*;
pub use battle::*;
pub use faction::*;
pub use ids::*;
pub use level::*;
pub use person::*;
pub use player::*;
pub use window::*;
