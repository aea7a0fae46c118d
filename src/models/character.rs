use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Character {
    pub name: String,
    pub level: i32,
    pub xp: i32,
    pub max_xp: i32,
    pub gold: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub x: i32,
    pub y: i32,
    pub mining_level: i32,
    pub woodcutting_level: i32,
    pub fishing_level: i32,
    pub weaponcrafting_level: i32,
    pub gearcrafting_level: i32,
    pub jewelrycrafting_level: i32,
    pub cooking_level: i32,
    pub alchemy_level: i32,
    #[serde(default)]
    pub weapon_slot: String,
    #[serde(default)]
    pub shield_slot: String,
    #[serde(default)]
    pub helmet_slot: String,
    #[serde(default)]
    pub body_armor_slot: String,
    #[serde(default)]
    pub leg_armor_slot: String,
    #[serde(default)]
    pub boots_slot: String,
    #[serde(default)]
    pub ring1_slot: String,
    #[serde(default)]
    pub ring2_slot: String,
    #[serde(default)]
    pub amulet_slot: String,
    #[serde(default)]
    pub artifact1_slot: String,
    #[serde(default)]
    pub artifact2_slot: String,
    #[serde(default)]
    pub artifact3_slot: String,
    #[serde(default)]
    pub utility1_slot: String,
    #[serde(default)]
    pub utility2_slot: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub task_type: String,
    #[serde(default)]
    pub task_progress: i32,
    #[serde(default)]
    pub task_total: i32,
    pub inventory_max_items: i32,
    #[serde(default)]
    pub inventory: Vec<InventorySlot>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InventorySlot {
    pub slot: i32,
    pub code: String,
    pub quantity: i32,
}

impl Character {
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 1.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    pub fn skill_level(&self, skill: Skill) -> i32 {
        match skill {
            Skill::Mining => self.mining_level,
            Skill::Woodcutting => self.woodcutting_level,
            Skill::Fishing => self.fishing_level,
            Skill::Weaponcrafting => self.weaponcrafting_level,
            Skill::Gearcrafting => self.gearcrafting_level,
            Skill::Jewelrycrafting => self.jewelrycrafting_level,
            Skill::Cooking => self.cooking_level,
            Skill::Alchemy => self.alchemy_level,
        }
    }

    /// Item code currently equipped in a slot, empty string when bare.
    pub fn equipped(&self, slot: Slot) -> &str {
        match slot {
            Slot::Weapon => &self.weapon_slot,
            Slot::Shield => &self.shield_slot,
            Slot::Helmet => &self.helmet_slot,
            Slot::BodyArmor => &self.body_armor_slot,
            Slot::LegArmor => &self.leg_armor_slot,
            Slot::Boots => &self.boots_slot,
            Slot::Ring1 => &self.ring1_slot,
            Slot::Ring2 => &self.ring2_slot,
            Slot::Amulet => &self.amulet_slot,
            Slot::Artifact1 => &self.artifact1_slot,
            Slot::Artifact2 => &self.artifact2_slot,
            Slot::Artifact3 => &self.artifact3_slot,
            Slot::Utility1 => &self.utility1_slot,
            Slot::Utility2 => &self.utility2_slot,
        }
    }

    pub fn inventory_total(&self) -> i32 {
        self.inventory.iter().map(|s| s.quantity).sum()
    }

    pub fn inventory_free_space(&self) -> i32 {
        (self.inventory_max_items - self.inventory_total()).max(0)
    }

    pub fn inventory_count(&self, code: &str) -> i32 {
        self.inventory
            .iter()
            .filter(|s| s.code == code)
            .map(|s| s.quantity)
            .sum()
    }
}

/// Trainable skills; recipes and resource nodes reference these by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Mining,
    Woodcutting,
    Fishing,
    Weaponcrafting,
    Gearcrafting,
    Jewelrycrafting,
    Cooking,
    Alchemy,
}

impl Skill {
    pub fn parse(name: &str) -> Option<Skill> {
        match name {
            "mining" => Some(Skill::Mining),
            "woodcutting" => Some(Skill::Woodcutting),
            "fishing" => Some(Skill::Fishing),
            "weaponcrafting" => Some(Skill::Weaponcrafting),
            "gearcrafting" => Some(Skill::Gearcrafting),
            "jewelrycrafting" => Some(Skill::Jewelrycrafting),
            "cooking" => Some(Skill::Cooking),
            "alchemy" => Some(Skill::Alchemy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Mining => "mining",
            Skill::Woodcutting => "woodcutting",
            Skill::Fishing => "fishing",
            Skill::Weaponcrafting => "weaponcrafting",
            Skill::Gearcrafting => "gearcrafting",
            Skill::Jewelrycrafting => "jewelrycrafting",
            Skill::Cooking => "cooking",
            Skill::Alchemy => "alchemy",
        }
    }
}

/// Equipment slots, matched to the wire names the equip endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Weapon,
    Shield,
    Helmet,
    BodyArmor,
    LegArmor,
    Boots,
    Ring1,
    Ring2,
    Amulet,
    Artifact1,
    Artifact2,
    Artifact3,
    Utility1,
    Utility2,
}

/// Slots the crafter default scans when looking for its weakest piece.
pub const GEAR_SLOTS: [Slot; 9] = [
    Slot::Weapon,
    Slot::Shield,
    Slot::Helmet,
    Slot::BodyArmor,
    Slot::LegArmor,
    Slot::Boots,
    Slot::Ring1,
    Slot::Ring2,
    Slot::Amulet,
];

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Shield => "shield",
            Slot::Helmet => "helmet",
            Slot::BodyArmor => "body_armor",
            Slot::LegArmor => "leg_armor",
            Slot::Boots => "boots",
            Slot::Ring1 => "ring1",
            Slot::Ring2 => "ring2",
            Slot::Amulet => "amulet",
            Slot::Artifact1 => "artifact1",
            Slot::Artifact2 => "artifact2",
            Slot::Artifact3 => "artifact3",
            Slot::Utility1 => "utility1",
            Slot::Utility2 => "utility2",
        }
    }

    /// Item type that goes into this slot (rings share one type).
    pub fn item_type(&self) -> &'static str {
        match self {
            Slot::Weapon => "weapon",
            Slot::Shield => "shield",
            Slot::Helmet => "helmet",
            Slot::BodyArmor => "body_armor",
            Slot::LegArmor => "leg_armor",
            Slot::Boots => "boots",
            Slot::Ring1 | Slot::Ring2 => "ring",
            Slot::Amulet => "amulet",
            Slot::Artifact1 | Slot::Artifact2 | Slot::Artifact3 => "artifact",
            Slot::Utility1 | Slot::Utility2 => "utility",
        }
    }
}
