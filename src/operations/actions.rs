// Game action contract - everything the order engine may ask of a character
use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::{Skill, Slot};

/// Win/loss record for a series of fights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FightTally {
    pub wins: i32,
    pub losses: i32,
    pub xp: i32,
}

/// The character's standing task-master assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus {
    pub code: String,
    pub task_type: String,
    pub progress: i32,
    pub total: i32,
}

impl TaskStatus {
    pub fn is_complete(&self) -> bool {
        self.progress >= self.total
    }
}

/// Surface the order engine drives. Implementations hide cooldowns,
/// retries and state refreshes; callers only see outcomes. Methods
/// returning bool report routine in-game failures (lost fight, item
/// not in bank), Err is reserved for calls the server rejected.
#[async_trait]
pub trait GameActions: Send + Sync {
    // Snapshot reads of the character we last saw
    fn name(&self) -> String;
    fn level(&self) -> i32;
    fn position(&self) -> (i32, i32);
    fn skill_level(&self, skill: Skill) -> i32;
    fn equipped(&self, slot: Slot) -> String;
    fn inventory_free_space(&self) -> i32;
    fn inventory_count(&self, code: &str) -> i32;
    fn current_task(&self) -> Option<TaskStatus>;

    /// Nearest map tile holding the given content, by walking distance.
    fn find_closest_content(&self, content_type: &str, code: &str) -> Option<(i32, i32)>;

    async fn move_to(&self, x: i32, y: i32) -> Result<(), String>;

    /// Fight up to `rounds` times at the current tile, resting as needed.
    async fn fight(&self, rounds: i32) -> Result<FightTally, String>;

    /// Fight at the current tile until `quantity` of `code` has dropped.
    /// Gives up (false) after too many consecutive losses.
    async fn fight_for_drop(&self, code: &str, quantity: i32) -> Result<bool, String>;

    /// Gather at the current tile until `quantity` of the node's yield
    /// is in hand. False when the pack fills up first.
    async fn gather(&self, quantity: i32) -> Result<bool, String>;

    /// Craft `quantity` of `code` at the current tile. Returns xp gained.
    async fn craft(&self, code: &str, quantity: i32) -> Result<i32, String>;

    async fn recycle(&self, code: &str, quantity: i32) -> Result<(), String>;

    async fn equip(&self, code: &str, slot: Slot) -> Result<bool, String>;
    async fn unequip(&self, slot: Slot) -> Result<bool, String>;

    /// Swap in the best banked weapon against the given monster.
    async fn gear_up_for(&self, monster_code: &str) -> Result<(), String>;

    /// Withdraw from the bank, travelling there first. False when the
    /// bank no longer holds the requested quantity.
    async fn withdraw(&self, code: &str, quantity: i32) -> Result<bool, String>;
    async fn deposit(&self, code: &str, quantity: i32) -> Result<(), String>;
    async fn deposit_all_inventory(&self) -> Result<(), String>;
    async fn get_bank_contents(&self) -> Result<HashMap<String, i32>, String>;

    async fn accept_task(&self) -> Result<TaskStatus, String>;
    async fn complete_task(&self) -> Result<(), String>;
    async fn exchange_task_coins(&self) -> Result<(), String>;
}
