// Character operations - GameActions backed by the live API client
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::catalog::GameCatalog;
use crate::client::ArtifactsClient;
use crate::config::CrewConfig;
use crate::models::{Character, Item, Monster, Skill, Slot};
use crate::operations::actions::{FightTally, GameActions, TaskStatus};
use crate::{v_debug, v_info};

const MAX_RECOVERY_ROUNDS: i32 = 8;

/// Drives one character. Holds the last character sheet the server sent
/// us; every effectful call commits the sheet from its response.
pub struct CharacterOperations {
    client: ArtifactsClient,
    catalog: Arc<GameCatalog>,
    state: Mutex<Character>,
    max_loss_streak: i32,
    rest_threshold: f64,
}

impl CharacterOperations {
    pub fn new(
        client: ArtifactsClient,
        catalog: Arc<GameCatalog>,
        character: Character,
        config: &CrewConfig,
    ) -> Self {
        CharacterOperations {
            client,
            catalog,
            state: Mutex::new(character),
            max_loss_streak: config.combat.max_loss_streak,
            rest_threshold: config.combat.rest_threshold,
        }
    }

    fn snapshot(&self) -> Character {
        self.state.lock().unwrap().clone()
    }

    fn commit(&self, character: Character) {
        *self.state.lock().unwrap() = character;
    }

    /// Get hp back above the rest threshold, eating banked-up food from
    /// the pack before falling back to resting in place.
    async fn ensure_health(&self) -> Result<(), String> {
        for _ in 0..MAX_RECOVERY_ROUNDS {
            let character = self.snapshot();
            if character.hp_fraction() >= self.rest_threshold {
                return Ok(());
            }

            match self.pick_food(&character) {
                Some(code) => {
                    v_debug!("🍖 {} eating {}", character.name, code);
                    let data = self.client.use_item(&code, 1).await.map_err(|e| e.to_string())?;
                    self.commit(data.character);
                }
                None => {
                    let data = self.client.rest().await.map_err(|e| e.to_string())?;
                    v_debug!("😴 {} rested (+{} hp)", character.name, data.hp_restored);
                    self.commit(data.character);
                }
            }
        }
        Ok(())
    }

    fn pick_food(&self, character: &Character) -> Option<String> {
        character
            .inventory
            .iter()
            .filter(|slot| slot.quantity > 0)
            .find(|slot| match self.catalog.get_item(&slot.code) {
                Some(item) => {
                    item.item_type == "consumable"
                        && item.effect_value("heal") > 0
                        && item.level <= character.level
                }
                None => false,
            })
            .map(|slot| slot.code.clone())
    }

    async fn go_to_bank(&self) -> Result<(), String> {
        let Some((x, y)) = self.find_closest_content("bank", "bank") else {
            return Err("no bank on the map".to_string());
        };
        self.move_to(x, y).await
    }

    async fn go_to_tasks_master(&self) -> Result<(), String> {
        let board = {
            let character = self.state.lock().unwrap();
            if character.task_type.is_empty() {
                "monsters".to_string()
            } else {
                character.task_type.clone()
            }
        };
        let Some((x, y)) = self.find_closest_content("tasks_master", &board) else {
            return Err("no tasks master on the map".to_string());
        };
        self.move_to(x, y).await
    }
}

/// Expected damage per round against a monster's resistances.
fn weapon_score(weapon: &Item, monster: &Monster) -> i32 {
    let mut score = 0;
    for element in ["fire", "earth", "water", "air"] {
        let attack = weapon.effect_value(&format!("attack_{}", element));
        if attack > 0 {
            score += attack * (100 - monster.resistance(element)) / 100;
        }
    }
    score
}

#[async_trait]
impl GameActions for CharacterOperations {
    fn name(&self) -> String {
        self.state.lock().unwrap().name.clone()
    }

    fn level(&self) -> i32 {
        self.state.lock().unwrap().level
    }

    fn position(&self) -> (i32, i32) {
        self.state.lock().unwrap().position()
    }

    fn skill_level(&self, skill: Skill) -> i32 {
        self.state.lock().unwrap().skill_level(skill)
    }

    fn equipped(&self, slot: Slot) -> String {
        self.state.lock().unwrap().equipped(slot).to_string()
    }

    fn inventory_free_space(&self) -> i32 {
        self.state.lock().unwrap().inventory_free_space()
    }

    fn inventory_count(&self, code: &str) -> i32 {
        self.state.lock().unwrap().inventory_count(code)
    }

    fn current_task(&self) -> Option<TaskStatus> {
        let character = self.state.lock().unwrap();
        if character.task.is_empty() {
            return None;
        }
        Some(TaskStatus {
            code: character.task.clone(),
            task_type: character.task_type.clone(),
            progress: character.task_progress,
            total: character.task_total,
        })
    }

    fn find_closest_content(&self, content_type: &str, code: &str) -> Option<(i32, i32)> {
        self.catalog.closest_content(self.position(), content_type, code)
    }

    async fn move_to(&self, x: i32, y: i32) -> Result<(), String> {
        if self.position() == (x, y) {
            return Ok(());
        }
        if let Some(data) = self.client.move_to(x, y).await.map_err(|e| e.to_string())? {
            self.commit(data.character);
        }
        Ok(())
    }

    async fn fight(&self, rounds: i32) -> Result<FightTally, String> {
        let mut tally = FightTally::default();
        let mut streak = 0;
        let home = self.position();

        for _ in 0..rounds {
            if self.inventory_free_space() <= 0 {
                v_info!("🎒 {} pack is full, breaking off the hunt", self.name());
                break;
            }
            self.ensure_health().await?;

            let data = self.client.fight().await.map_err(|e| e.to_string())?;
            let fight = data.fight;
            self.commit(data.character);
            tally.xp += fight.xp;

            if fight.won() {
                tally.wins += 1;
                streak = 0;
            } else {
                tally.losses += 1;
                streak += 1;
                if streak >= self.max_loss_streak {
                    v_info!("💀 {} lost {} in a row, breaking off", self.name(), streak);
                    break;
                }
                // A loss sends us back to spawn
                self.move_to(home.0, home.1).await?;
            }
        }

        Ok(tally)
    }

    async fn fight_for_drop(&self, code: &str, quantity: i32) -> Result<bool, String> {
        let mut acquired = 0;
        let mut streak = 0;
        let home = self.position();

        while acquired < quantity {
            if self.inventory_free_space() <= 0 {
                v_info!("🎒 {} pack filled up before {} did", self.name(), code);
                return Ok(false);
            }
            self.ensure_health().await?;

            let data = self.client.fight().await.map_err(|e| e.to_string())?;
            let fight = data.fight;
            self.commit(data.character);

            if fight.won() {
                streak = 0;
                acquired += fight
                    .drops
                    .iter()
                    .filter(|drop| drop.code == code)
                    .map(|drop| drop.quantity)
                    .sum::<i32>();
                v_debug!("⚔️ {} drops: {}/{}", code, acquired, quantity);
            } else {
                streak += 1;
                if streak >= self.max_loss_streak {
                    v_info!("💀 Giving up on {} after {} straight losses", code, streak);
                    return Ok(false);
                }
                self.move_to(home.0, home.1).await?;
            }
        }

        Ok(true)
    }

    async fn gather(&self, quantity: i32) -> Result<bool, String> {
        // The node decides what it yields; count whatever shows up first
        let mut target: Option<String> = None;
        let mut acquired = 0;

        while acquired < quantity {
            if self.inventory_free_space() <= 0 {
                v_info!("🎒 {} pack is full mid-harvest", self.name());
                return Ok(false);
            }

            let data = self.client.gather().await.map_err(|e| e.to_string())?;
            let details = data.details;
            self.commit(data.character);

            if target.is_none() {
                target = details.items.first().map(|item| item.code.clone());
            }
            if let Some(code) = &target {
                acquired += details
                    .items
                    .iter()
                    .filter(|item| &item.code == code)
                    .map(|item| item.quantity)
                    .sum::<i32>();
            }
        }

        Ok(true)
    }

    async fn craft(&self, code: &str, quantity: i32) -> Result<i32, String> {
        let data = self
            .client
            .craft(code, quantity)
            .await
            .map_err(|e| e.to_string())?;
        let xp = data.details.xp;
        self.commit(data.character);
        Ok(xp)
    }

    async fn recycle(&self, code: &str, quantity: i32) -> Result<(), String> {
        let data = self
            .client
            .recycle(code, quantity)
            .await
            .map_err(|e| e.to_string())?;
        v_debug!(
            "♻️ {} x{} shredded into {} item stack(s)",
            code,
            quantity,
            data.details.items.len()
        );
        self.commit(data.character);
        Ok(())
    }

    async fn equip(&self, code: &str, slot: Slot) -> Result<bool, String> {
        if self.equipped(slot) == code {
            return Ok(true);
        }
        if !self.equipped(slot).is_empty() {
            match self.client.unequip(slot.as_str()).await {
                Ok(data) => self.commit(data.character),
                Err(e) => {
                    v_info!("⚠️ Could not clear {} slot: {}", slot.as_str(), e);
                    return Ok(false);
                }
            }
        }
        match self.client.equip(code, slot.as_str()).await {
            Ok(data) => {
                self.commit(data.character);
                Ok(true)
            }
            Err(e) => {
                v_info!("⚠️ Could not equip {}: {}", code, e);
                Ok(false)
            }
        }
    }

    async fn unequip(&self, slot: Slot) -> Result<bool, String> {
        if self.equipped(slot).is_empty() {
            return Ok(true);
        }
        match self.client.unequip(slot.as_str()).await {
            Ok(data) => {
                self.commit(data.character);
                Ok(true)
            }
            Err(e) => {
                v_info!("⚠️ Could not unequip {} slot: {}", slot.as_str(), e);
                Ok(false)
            }
        }
    }

    async fn gear_up_for(&self, monster_code: &str) -> Result<(), String> {
        let Some(monster) = self
            .catalog
            .all_monsters()
            .iter()
            .find(|m| m.code == monster_code)
        else {
            return Ok(());
        };

        let character = self.snapshot();
        let current_score = self
            .catalog
            .get_item(character.equipped(Slot::Weapon))
            .map(|item| weapon_score(item, monster))
            .unwrap_or(0);

        let bank = self.get_bank_contents().await?;
        let mut best: Option<(String, i32)> = None;
        for code in bank.keys() {
            let Some(item) = self.catalog.get_item(code) else {
                continue;
            };
            if item.item_type != "weapon" || item.level > character.level {
                continue;
            }
            let score = weapon_score(item, monster);
            if score > current_score && best.as_ref().map(|(_, s)| score > *s).unwrap_or(true) {
                best = Some((code.clone(), score));
            }
        }

        let Some((code, score)) = best else {
            return Ok(());
        };
        v_info!(
            "🗡️ Swapping to {} against {} (score {} beats {})",
            code,
            monster.code,
            score,
            current_score
        );
        if self.withdraw(&code, 1).await? {
            self.equip(&code, Slot::Weapon).await?;
        }
        Ok(())
    }

    async fn withdraw(&self, code: &str, quantity: i32) -> Result<bool, String> {
        self.go_to_bank().await?;
        match self.client.withdraw_item(code, quantity).await {
            Ok(data) => {
                self.commit(data.character);
                Ok(true)
            }
            Err(e) => {
                v_info!("🏦 Withdrawal of {} x{} refused: {}", code, quantity, e);
                Ok(false)
            }
        }
    }

    async fn deposit(&self, code: &str, quantity: i32) -> Result<(), String> {
        self.go_to_bank().await?;
        let data = self
            .client
            .deposit_item(code, quantity)
            .await
            .map_err(|e| e.to_string())?;
        self.commit(data.character);
        Ok(())
    }

    async fn deposit_all_inventory(&self) -> Result<(), String> {
        let holdings: Vec<(String, i32)> = {
            let character = self.state.lock().unwrap();
            character
                .inventory
                .iter()
                .filter(|slot| slot.quantity > 0 && !slot.code.is_empty())
                .map(|slot| (slot.code.clone(), slot.quantity))
                .collect()
        };
        if holdings.is_empty() {
            return Ok(());
        }

        self.go_to_bank().await?;
        for (code, quantity) in holdings {
            let data = self
                .client
                .deposit_item(&code, quantity)
                .await
                .map_err(|e| e.to_string())?;
            self.commit(data.character);
        }
        v_debug!("🏦 {} emptied the pack", self.name());
        Ok(())
    }

    async fn get_bank_contents(&self) -> Result<HashMap<String, i32>, String> {
        let items = self
            .client
            .get_bank_items()
            .await
            .map_err(|e| e.to_string())?;
        let mut contents = HashMap::new();
        for item in items {
            *contents.entry(item.code).or_insert(0) += item.quantity;
        }
        Ok(contents)
    }

    async fn accept_task(&self) -> Result<TaskStatus, String> {
        self.go_to_tasks_master().await?;
        let data = self
            .client
            .accept_new_task()
            .await
            .map_err(|e| e.to_string())?;
        let task = data.task.clone();
        self.commit(data.character);
        v_info!("📜 {} accepted task: {} x{}", self.name(), task.code, task.total);
        Ok(TaskStatus {
            code: task.code,
            task_type: task.task_type,
            progress: 0,
            total: task.total,
        })
    }

    async fn complete_task(&self) -> Result<(), String> {
        self.go_to_tasks_master().await?;
        let data = self
            .client
            .complete_task()
            .await
            .map_err(|e| e.to_string())?;
        v_info!(
            "🎁 Task rewards: {} gold, {} item stack(s)",
            data.rewards.gold,
            data.rewards.items.len()
        );
        self.commit(data.character);
        Ok(())
    }

    async fn exchange_task_coins(&self) -> Result<(), String> {
        self.go_to_tasks_master().await?;
        let data = self
            .client
            .exchange_task_coins()
            .await
            .map_err(|e| e.to_string())?;
        v_info!(
            "🪙 Coin exchange paid out {} gold, {} item stack(s)",
            data.rewards.gold,
            data.rewards.items.len()
        );
        self.commit(data.character);
        Ok(())
    }
}
