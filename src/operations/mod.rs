// Operations module - the order fulfillment engine and its action layer

pub mod actions;
pub mod character_ops;
pub mod gather;
pub mod resolver;
pub mod orders;

pub use actions::{FightTally, GameActions, TaskStatus};
pub use character_ops::CharacterOperations;
pub use gather::GatherStrategy;
pub use resolver::{CraftResolver, Readiness, ResolveState};
pub use orders::{ORDER_BATCH_CAP, OrderDispatcher, Role};
