// Models module - data structures for the game API

pub mod character;
pub mod item;
pub mod map;
pub mod responses;

// Re-export all models for easier imports
pub use character::*;
pub use item::*;
pub use map::*;
pub use responses::*;
