use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MapTile {
    #[serde(default)]
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub content: Option<MapContent>,
}

impl MapTile {
    pub fn holds(&self, content_type: &str, code: &str) -> bool {
        match &self.content {
            Some(c) => c.content_type == content_type && c.code == code,
            None => false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MapContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Monster {
    pub code: String,
    pub name: String,
    pub level: i32,
    pub hp: i32,
    #[serde(default)]
    pub attack_fire: i32,
    #[serde(default)]
    pub attack_earth: i32,
    #[serde(default)]
    pub attack_water: i32,
    #[serde(default)]
    pub attack_air: i32,
    #[serde(default)]
    pub res_fire: i32,
    #[serde(default)]
    pub res_earth: i32,
    #[serde(default)]
    pub res_water: i32,
    #[serde(default)]
    pub res_air: i32,
    #[serde(default)]
    pub drops: Vec<DropRate>,
}

impl Monster {
    pub fn drops_code(&self, code: &str) -> bool {
        self.drops.iter().any(|d| d.code == code)
    }

    pub fn resistance(&self, element: &str) -> i32 {
        match element {
            "fire" => self.res_fire,
            "earth" => self.res_earth,
            "water" => self.res_water,
            "air" => self.res_air,
            _ => 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Resource {
    pub code: String,
    pub name: String,
    pub skill: String,
    pub level: i32,
    #[serde(default)]
    pub drops: Vec<DropRate>,
}

impl Resource {
    pub fn drops_code(&self, code: &str) -> bool {
        self.drops.iter().any(|d| d.code == code)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DropRate {
    pub code: String,
    #[serde(default)]
    pub rate: i32,
    #[serde(default)]
    pub min_quantity: i32,
    #[serde(default)]
    pub max_quantity: i32,
}
