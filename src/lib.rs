// Artifacts Crew - cooperative character automation library
// One process per character; cooperation happens through shared files

pub mod models;
pub mod client;
pub mod operations;
pub mod storage;
pub mod catalog;
pub mod overseer;
pub mod config;
pub mod verbosity;

// Re-export commonly used types
pub use models::{
    character::{Character, Skill, Slot},
    item::{Item, Craft, CraftIngredient, SimpleItem},
    map::{MapTile, Monster, Resource},
    responses::*,
};

pub use client::ArtifactsClient;
pub use catalog::GameCatalog;
pub use operations::{
    CharacterOperations, CraftResolver, GameActions, GatherStrategy, OrderDispatcher, Readiness,
    ResolveState, Role,
};
pub use storage::{OrderSet, Task, TaskStore};
pub use overseer::Overseer;
pub use config::{ConfigManager, CrewConfig};

// Constants
pub const API_BASE_URL: &str = "https://api.artifactsmmo.com";
pub const TOKEN_FILE: &str = "TOKEN";
