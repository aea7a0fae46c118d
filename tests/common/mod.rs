// Shared test fixtures: a scripted GameActions and a small world catalog
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use artifacts_crew::models::{Craft, CraftIngredient, DropRate, Item, Monster, Resource, Skill, Slot};
use artifacts_crew::operations::{FightTally, GameActions, TaskStatus};
use artifacts_crew::GameCatalog;

pub fn raw_item(code: &str, item_type: &str, subtype: &str) -> Item {
    Item {
        code: code.to_string(),
        name: code.to_string(),
        item_type: item_type.to_string(),
        subtype: subtype.to_string(),
        level: 1,
        effects: Vec::new(),
        craft: None,
    }
}

pub fn crafted_item(
    code: &str,
    item_type: &str,
    skill: &str,
    level: i32,
    ingredients: &[(&str, i32)],
) -> Item {
    Item {
        code: code.to_string(),
        name: code.to_string(),
        item_type: item_type.to_string(),
        subtype: String::new(),
        level,
        effects: Vec::new(),
        craft: Some(Craft {
            skill: skill.to_string(),
            level,
            items: ingredients
                .iter()
                .map(|(c, q)| CraftIngredient {
                    code: c.to_string(),
                    quantity: *q,
                })
                .collect(),
            quantity: 1,
        }),
    }
}

fn monster(code: &str, level: i32, drops: &[&str]) -> Monster {
    Monster {
        code: code.to_string(),
        name: code.to_string(),
        level,
        hp: 80,
        attack_fire: 10,
        attack_earth: 0,
        attack_water: 0,
        attack_air: 0,
        res_fire: 0,
        res_earth: 0,
        res_water: 0,
        res_air: 0,
        drops: drops
            .iter()
            .map(|code| DropRate {
                code: code.to_string(),
                rate: 10,
                min_quantity: 1,
                max_quantity: 1,
            })
            .collect(),
    }
}

fn resource(code: &str, skill: &str, level: i32, drops: &[&str]) -> Resource {
    Resource {
        code: code.to_string(),
        name: code.to_string(),
        skill: skill.to_string(),
        level,
        drops: drops
            .iter()
            .map(|code| DropRate {
                code: code.to_string(),
                rate: 1,
                min_quantity: 1,
                max_quantity: 1,
            })
            .collect(),
    }
}

/// Small world shared by the engine tests: two harvestable ores, one
/// monster drop, a task-reward item and a handful of recipes.
pub fn test_catalog() -> GameCatalog {
    let items = vec![
        raw_item("copper_ore", "resource", ""),
        raw_item("copper", "resource", ""),
        raw_item("ash_wood", "resource", ""),
        raw_item("iron", "resource", ""),
        raw_item("raw_hide", "resource", "mob"),
        raw_item("magic_stone", "resource", "task"),
        raw_item("iron_pickaxe", "weapon", "tool"),
        crafted_item("copper_dagger", "weapon", "weaponcrafting", 1, &[("copper", 6)]),
        crafted_item("hide_cap", "helmet", "gearcrafting", 1, &[("raw_hide", 2)]),
        crafted_item("wooden_staff", "weapon", "weaponcrafting", 1, &[("ash_wood", 4)]),
        crafted_item("ash_plank", "resource", "woodcutting", 1, &[("ash_wood", 2)]),
        crafted_item("wooden_shield", "shield", "gearcrafting", 1, &[("ash_plank", 3)]),
        crafted_item("iron_sword", "weapon", "weaponcrafting", 20, &[("iron", 3)]),
        crafted_item("ring_a", "ring", "jewelrycrafting", 1, &[("ring_b", 1)]),
        crafted_item("ring_b", "ring", "jewelrycrafting", 1, &[("ring_a", 1)]),
    ];
    let monsters = vec![monster("wolf", 3, &["raw_hide"])];
    let resources = vec![
        resource("copper_rocks", "mining", 1, &["copper_ore", "copper"]),
        resource("ash_tree", "woodcutting", 1, &["ash_wood"]),
    ];
    GameCatalog::from_parts(items, monsters, resources, Vec::new())
}

/// Scripted GameActions. World effects are recorded as call strings so
/// tests can assert what the engine asked for; canned results steer the
/// failure paths.
pub struct MockActions {
    pub bank: Mutex<HashMap<String, i32>>,
    pub inventory: Mutex<HashMap<String, i32>>,
    pub skills: Mutex<HashMap<Skill, i32>>,
    pub level: i32,
    pub free_space: Mutex<i32>,
    pub position: Mutex<(i32, i32)>,
    pub equipped_weapon: Mutex<String>,
    pub task: Mutex<Option<TaskStatus>>,
    pub map: HashMap<(String, String), (i32, i32)>,
    pub fight_drop_result: bool,
    pub gather_result: bool,
    calls: Mutex<Vec<String>>,
}

impl MockActions {
    pub fn new() -> Self {
        let mut skills = HashMap::new();
        for skill in [
            Skill::Mining,
            Skill::Woodcutting,
            Skill::Fishing,
            Skill::Weaponcrafting,
            Skill::Gearcrafting,
            Skill::Jewelrycrafting,
            Skill::Cooking,
            Skill::Alchemy,
        ] {
            skills.insert(skill, 10);
        }

        let mut map = HashMap::new();
        for (content_type, code, x, y) in [
            ("bank", "bank", 4, 1),
            ("workshop", "weaponcrafting", 1, 3),
            ("workshop", "jewelrycrafting", 1, 4),
            ("workshop", "woodcutting", 1, 5),
            ("workshop", "gearcrafting", 2, 3),
            ("monster", "wolf", 5, 5),
            ("resource", "copper_rocks", 2, 0),
            ("resource", "ash_tree", 6, 1),
            ("tasks_master", "monsters", 1, 2),
        ] {
            map.insert((content_type.to_string(), code.to_string()), (x, y));
        }

        MockActions {
            bank: Mutex::new(HashMap::new()),
            inventory: Mutex::new(HashMap::new()),
            skills: Mutex::new(skills),
            level: 10,
            free_space: Mutex::new(100),
            position: Mutex::new((0, 0)),
            equipped_weapon: Mutex::new(String::new()),
            task: Mutex::new(None),
            map,
            fight_drop_result: true,
            gather_result: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bank(self, code: &str, quantity: i32) -> Self {
        self.bank.lock().unwrap().insert(code.to_string(), quantity);
        self
    }

    pub fn with_skill(self, skill: Skill, level: i32) -> Self {
        self.skills.lock().unwrap().insert(skill, level);
        self
    }

    pub fn with_free_space(self, space: i32) -> Self {
        *self.free_space.lock().unwrap() = space;
        self
    }

    pub fn failing_fights(mut self) -> Self {
        self.fight_drop_result = false;
        self
    }

    pub fn failing_gather(mut self) -> Self {
        self.gather_result = false;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saw_call(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GameActions for MockActions {
    fn name(&self) -> String {
        "test_agent".to_string()
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn position(&self) -> (i32, i32) {
        *self.position.lock().unwrap()
    }

    fn skill_level(&self, skill: Skill) -> i32 {
        self.skills.lock().unwrap().get(&skill).copied().unwrap_or(0)
    }

    fn equipped(&self, slot: Slot) -> String {
        match slot {
            Slot::Weapon => self.equipped_weapon.lock().unwrap().clone(),
            _ => String::new(),
        }
    }

    fn inventory_free_space(&self) -> i32 {
        *self.free_space.lock().unwrap()
    }

    fn inventory_count(&self, code: &str) -> i32 {
        self.inventory.lock().unwrap().get(code).copied().unwrap_or(0)
    }

    fn current_task(&self) -> Option<TaskStatus> {
        self.task.lock().unwrap().clone()
    }

    fn find_closest_content(&self, content_type: &str, code: &str) -> Option<(i32, i32)> {
        self.map
            .get(&(content_type.to_string(), code.to_string()))
            .copied()
    }

    async fn move_to(&self, x: i32, y: i32) -> Result<(), String> {
        self.record(format!("move({},{})", x, y));
        *self.position.lock().unwrap() = (x, y);
        Ok(())
    }

    async fn fight(&self, rounds: i32) -> Result<FightTally, String> {
        self.record(format!("fight({})", rounds));
        Ok(FightTally {
            wins: rounds,
            losses: 0,
            xp: rounds * 10,
        })
    }

    async fn fight_for_drop(&self, code: &str, quantity: i32) -> Result<bool, String> {
        self.record(format!("fight_for_drop({},{})", code, quantity));
        Ok(self.fight_drop_result)
    }

    async fn gather(&self, quantity: i32) -> Result<bool, String> {
        self.record(format!("gather({})", quantity));
        Ok(self.gather_result)
    }

    async fn craft(&self, code: &str, quantity: i32) -> Result<i32, String> {
        self.record(format!("craft({},{})", code, quantity));
        *self
            .inventory
            .lock()
            .unwrap()
            .entry(code.to_string())
            .or_insert(0) += quantity;
        Ok(quantity * 5)
    }

    async fn recycle(&self, code: &str, quantity: i32) -> Result<(), String> {
        self.record(format!("recycle({},{})", code, quantity));
        Ok(())
    }

    async fn equip(&self, code: &str, slot: Slot) -> Result<bool, String> {
        self.record(format!("equip({},{})", code, slot.as_str()));
        if slot == Slot::Weapon {
            *self.equipped_weapon.lock().unwrap() = code.to_string();
        }
        Ok(true)
    }

    async fn unequip(&self, slot: Slot) -> Result<bool, String> {
        self.record(format!("unequip({})", slot.as_str()));
        if slot == Slot::Weapon {
            self.equipped_weapon.lock().unwrap().clear();
        }
        Ok(true)
    }

    async fn gear_up_for(&self, monster_code: &str) -> Result<(), String> {
        self.record(format!("gear_up({})", monster_code));
        Ok(())
    }

    async fn withdraw(&self, code: &str, quantity: i32) -> Result<bool, String> {
        let mut bank = self.bank.lock().unwrap();
        let have = bank.get(code).copied().unwrap_or(0);
        if have < quantity {
            self.record(format!("withdraw_refused({},{})", code, quantity));
            return Ok(false);
        }
        bank.insert(code.to_string(), have - quantity);
        drop(bank);
        self.record(format!("withdraw({},{})", code, quantity));
        Ok(true)
    }

    async fn deposit(&self, code: &str, quantity: i32) -> Result<(), String> {
        *self
            .bank
            .lock()
            .unwrap()
            .entry(code.to_string())
            .or_insert(0) += quantity;
        self.record(format!("deposit({},{})", code, quantity));
        Ok(())
    }

    async fn deposit_all_inventory(&self) -> Result<(), String> {
        self.record("deposit_all".to_string());
        let holdings: Vec<(String, i32)> = self.inventory.lock().unwrap().drain().collect();
        let mut bank = self.bank.lock().unwrap();
        for (code, quantity) in holdings {
            *bank.entry(code).or_insert(0) += quantity;
        }
        Ok(())
    }

    async fn get_bank_contents(&self) -> Result<HashMap<String, i32>, String> {
        Ok(self.bank.lock().unwrap().clone())
    }

    async fn accept_task(&self) -> Result<TaskStatus, String> {
        self.record("accept_task".to_string());
        let status = TaskStatus {
            code: "wolf".to_string(),
            task_type: "monsters".to_string(),
            progress: 0,
            total: 5,
        };
        *self.task.lock().unwrap() = Some(status.clone());
        Ok(status)
    }

    async fn complete_task(&self) -> Result<(), String> {
        self.record("complete_task".to_string());
        *self.task.lock().unwrap() = None;
        Ok(())
    }

    async fn exchange_task_coins(&self) -> Result<(), String> {
        self.record("exchange_coins".to_string());
        Ok(())
    }
}
