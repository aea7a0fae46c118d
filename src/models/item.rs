use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Item {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub subtype: String,
    pub level: i32,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub craft: Option<Craft>,
}

impl Item {
    /// Raw drops have no recipe; everything else is produced at a workshop.
    pub fn is_craftable(&self) -> bool {
        self.craft.is_some()
    }

    pub fn effect_value(&self, effect_name: &str) -> i32 {
        self.effects
            .iter()
            .find(|e| e.name == effect_name)
            .map(|e| e.value)
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Effect {
    #[serde(alias = "code")]
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Craft {
    pub skill: String,
    pub level: i32,
    #[serde(default)]
    pub items: Vec<CraftIngredient>,
    #[serde(default = "default_craft_quantity")]
    pub quantity: i32,
}

impl Craft {
    /// Inventory space one crafted unit consumes while its inputs are held.
    pub fn space_per_unit(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

fn default_craft_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CraftIngredient {
    pub code: String,
    pub quantity: i32,
}

/// Bare code/quantity pair used for bank rows, drops and deposits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimpleItem {
    pub code: String,
    pub quantity: i32,
}
