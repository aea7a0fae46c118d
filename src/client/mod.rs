// Client module - game server API client
pub mod api;

pub use api::ArtifactsClient;
