//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod events;
pub mod game;
pub mod language;
pub mod pool;
pub mod rng;
pub mod selection;
pub mod state;
pub mod tags;

pub use cards::*;
pub use events::*;
pub use language::*;
pub use pool::*;
pub use rng::*;
pub use selection::*;
pub use state::*;
pub use tags::*;
