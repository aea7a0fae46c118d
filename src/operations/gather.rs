// Gather strategy - turning a raw item code into a trip that produces it
use crate::catalog::GameCatalog;
use crate::models::{Item, Skill, Slot};
use crate::operations::actions::GameActions;
use crate::storage::OrderSet;
use crate::{v_debug, v_info};

/// Loot that the item catalog files under a resource subtype even
/// though only monsters drop it.
const MISLABELED_MONSTER_LOOT: &[&str] = &["milk_bucket", "golden_egg"];

/// A monster, not a node, is the source for this item.
pub fn is_monster_loot(item: &Item) -> bool {
    item.subtype == "mob" || MISLABELED_MONSTER_LOOT.contains(&item.code.as_str())
}

/// Harvesting tool worth holding while gathering with a skill.
fn tool_for_skill(skill: Skill) -> Option<&'static str> {
    match skill {
        Skill::Mining => Some("iron_pickaxe"),
        Skill::Woodcutting => Some("iron_axe"),
        Skill::Fishing => Some("spruce_fishing_rod"),
        Skill::Alchemy => Some("leather_gloves"),
        _ => None,
    }
}

/// Produces non-crafted items: classifies a code as monster loot or a
/// harvest, travels to the source and collects. Codes that cannot be
/// produced get banned so nobody claims them again this session.
pub struct GatherStrategy<'a, A: GameActions> {
    actions: &'a A,
    catalog: &'a GameCatalog,
}

impl<'a, A: GameActions> GatherStrategy<'a, A> {
    pub fn new(actions: &'a A, catalog: &'a GameCatalog) -> Self {
        GatherStrategy { actions, catalog }
    }

    /// Obtain `quantity` of `code`. The haul is deposited unless
    /// `keep_haul`. Returns whether the full quantity came in.
    pub async fn obtain(
        &self,
        code: &str,
        quantity: i32,
        keep_haul: bool,
        banned: &mut OrderSet,
    ) -> Result<bool, String> {
        let Some(item) = self.catalog.get_item(code) else {
            v_info!("🚫 {} is not in the item catalog, banning", code);
            banned.add(code);
            return Ok(false);
        };

        if item.subtype == "task" {
            v_info!("🚫 {} only comes from task rewards, banning", code);
            banned.add(code);
            return Ok(false);
        }

        if is_monster_loot(item) {
            self.hunt(code, quantity, banned).await
        } else {
            self.harvest(code, quantity, keep_haul, banned).await
        }
    }

    async fn hunt(
        &self,
        code: &str,
        quantity: i32,
        banned: &mut OrderSet,
    ) -> Result<bool, String> {
        let Some(monster) = self.catalog.monster_dropping(code) else {
            v_info!("🚫 No monster drops {}, banning", code);
            banned.add(code);
            return Ok(false);
        };
        let Some((x, y)) = self.actions.find_closest_content("monster", &monster.code) else {
            v_info!("🚫 {} is not on the map, banning {}", monster.code, code);
            banned.add(code);
            return Ok(false);
        };

        v_debug!("⚔️ Hunting {} for {} x{}", monster.code, code, quantity);
        self.actions.gear_up_for(&monster.code).await?;
        self.actions.move_to(x, y).await?;

        if !self.actions.fight_for_drop(code, quantity).await? {
            v_info!("🚫 {} would not drop {}, banning", monster.code, code);
            banned.add(code);
            return Ok(false);
        }
        Ok(true)
    }

    async fn harvest(
        &self,
        code: &str,
        quantity: i32,
        keep_haul: bool,
        banned: &mut OrderSet,
    ) -> Result<bool, String> {
        let Some(resource) = self.catalog.resource_dropping(code) else {
            v_info!("🚫 No resource node yields {}, banning", code);
            banned.add(code);
            return Ok(false);
        };
        let node_code = resource.code.clone();

        if let Some(skill) = Skill::parse(&resource.skill) {
            self.equip_tool(skill).await?;
        }

        let Some((x, y)) = self.actions.find_closest_content("resource", &node_code) else {
            v_info!("🚫 {} is not on the map, banning {}", node_code, code);
            banned.add(code);
            return Ok(false);
        };

        v_debug!("🌾 Harvesting {} at ({}, {}) for {} x{}", node_code, x, y, code, quantity);
        self.actions.move_to(x, y).await?;

        let gathered = self.actions.gather(quantity).await?;
        if gathered && !keep_haul {
            self.actions.deposit_all_inventory().await?;
        }
        Ok(gathered)
    }

    /// Pull the skill's tool out of the bank when one is there.
    async fn equip_tool(&self, skill: Skill) -> Result<(), String> {
        let Some(tool) = tool_for_skill(skill) else {
            return Ok(());
        };
        if self.actions.equipped(Slot::Weapon) == tool {
            return Ok(());
        }
        let bank = self.actions.get_bank_contents().await?;
        if bank.get(tool).copied().unwrap_or(0) <= 0 {
            return Ok(());
        }
        if self.actions.withdraw(tool, 1).await? {
            self.actions.equip(tool, Slot::Weapon).await?;
        }
        Ok(())
    }
}
