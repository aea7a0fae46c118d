// Storage module for file-backed shared state
pub mod task_store;
pub mod order_set;

pub use task_store::*;
pub use order_set::*;
