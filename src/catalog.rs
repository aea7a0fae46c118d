// Game catalog - read-only world knowledge fetched once at startup
use std::collections::HashMap;

use crate::client::ArtifactsClient;
use crate::models::{Item, MapTile, Monster, Resource};
use crate::v_info;

pub struct GameCatalog {
    items: HashMap<String, Item>,
    monsters: Vec<Monster>,
    resources: Vec<Resource>,
    maps: Vec<MapTile>,
}

impl GameCatalog {
    pub async fn load(client: &ArtifactsClient) -> Result<Self, Box<dyn std::error::Error>> {
        v_info!("🗺️  Loading world catalog...");
        let items = client.get_all_items().await?;
        let monsters = client.get_all_monsters().await?;
        let resources = client.get_all_resources().await?;
        let maps = client.get_all_maps().await?;

        let catalog = Self::from_parts(items, monsters, resources, maps);
        v_info!(
            "🗺️  Catalog ready: {} items, {} monsters, {} resources, {} tiles",
            catalog.items.len(),
            catalog.monsters.len(),
            catalog.resources.len(),
            catalog.maps.len()
        );
        Ok(catalog)
    }

    pub fn from_parts(
        items: Vec<Item>,
        monsters: Vec<Monster>,
        resources: Vec<Resource>,
        maps: Vec<MapTile>,
    ) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.code.clone(), item))
            .collect();
        Self {
            items,
            monsters,
            resources,
            maps,
        }
    }

    pub fn get_item(&self, code: &str) -> Option<&Item> {
        self.items.get(code)
    }

    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn all_monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn all_resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Weakest monster whose drop table contains the code.
    pub fn monster_dropping(&self, code: &str) -> Option<&Monster> {
        self.monsters
            .iter()
            .filter(|m| m.drops_code(code))
            .min_by_key(|m| m.level)
    }

    /// Lowest-level resource node whose drop table contains the code.
    pub fn resource_dropping(&self, code: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.drops_code(code))
            .min_by_key(|r| r.level)
    }

    /// Closest tile holding the given content, by Manhattan distance.
    pub fn closest_content(
        &self,
        from: (i32, i32),
        content_type: &str,
        code: &str,
    ) -> Option<(i32, i32)> {
        self.maps
            .iter()
            .filter(|tile| tile.holds(content_type, code))
            .min_by_key(|tile| (tile.x - from.0).abs() + (tile.y - from.1).abs())
            .map(|tile| (tile.x, tile.y))
    }
}
