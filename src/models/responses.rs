use serde::Deserialize;
use chrono::{DateTime, Utc};
use crate::models::{Character, Item, MapTile, SimpleItem};

// API response wrappers - every endpoint nests its payload under "data"

#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<i64>,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
}

/// Cooldown attached to every effectful action response.
#[derive(Debug, Deserialize, Clone)]
pub struct Cooldown {
    pub total_seconds: i32,
    pub remaining_seconds: f64,
    pub expiration: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct MoveData {
    pub cooldown: Cooldown,
    pub destination: MapTile,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct FightData {
    pub cooldown: Cooldown,
    pub fight: Fight,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct Fight {
    pub xp: i32,
    pub gold: i32,
    pub result: String,
    #[serde(default)]
    pub drops: Vec<SimpleItem>,
}

impl Fight {
    pub fn won(&self) -> bool {
        self.result == "win"
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillData {
    pub cooldown: Cooldown,
    pub details: SkillDetails,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct SkillDetails {
    pub xp: i32,
    #[serde(default)]
    pub items: Vec<SimpleItem>,
}

#[derive(Debug, Deserialize)]
pub struct EquipData {
    pub cooldown: Cooldown,
    pub slot: String,
    pub item: Item,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct RestData {
    pub cooldown: Cooldown,
    pub hp_restored: i32,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct UseItemData {
    pub cooldown: Cooldown,
    pub item: Item,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct BankTransactionData {
    pub cooldown: Cooldown,
    #[serde(default)]
    pub bank: Vec<SimpleItem>,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct RecycleData {
    pub cooldown: Cooldown,
    pub details: RecycleDetails,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct RecycleDetails {
    #[serde(default)]
    pub items: Vec<SimpleItem>,
}

#[derive(Debug, Deserialize)]
pub struct TaskData {
    pub cooldown: Cooldown,
    pub task: TaskAssignment,
    pub character: Character,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TaskAssignment {
    pub code: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub total: i32,
}

#[derive(Debug, Deserialize)]
pub struct TaskRewardData {
    pub cooldown: Cooldown,
    pub rewards: TaskRewards,
    pub character: Character,
}

#[derive(Debug, Deserialize)]
pub struct TaskRewards {
    #[serde(default)]
    pub items: Vec<SimpleItem>,
    #[serde(default)]
    pub gold: i32,
}
