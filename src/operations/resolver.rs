// Craft resolver - recursive material resolution against the shared bank
use std::collections::HashMap;

use crate::catalog::GameCatalog;
use crate::models::{Craft, Skill};
use crate::operations::actions::GameActions;
use crate::operations::gather::is_monster_loot;
use crate::storage::{OrderSet, Task, TaskStore};
use crate::{v_debug, v_info};

/// How close an item is to being craftable right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Everything needed is in the bank.
    Ok,
    /// Orders for missing materials are in flight on the task store.
    NeedsOrder,
    /// No path to this item this session.
    Unsatisfiable,
}

/// Mutable state threaded through one resolution tree: the shared task
/// store, this agent's order sets, and the chain of codes currently
/// being resolved (recipe cycle guard).
pub struct ResolveState<'a> {
    pub store: &'a mut TaskStore,
    pub current: &'a mut OrderSet,
    pub banned: &'a mut OrderSet,
    chain: Vec<String>,
}

impl<'a> ResolveState<'a> {
    pub fn new(
        store: &'a mut TaskStore,
        current: &'a mut OrderSet,
        banned: &'a mut OrderSet,
    ) -> Self {
        ResolveState {
            store,
            current,
            banned,
            chain: Vec::new(),
        }
    }

    fn enter(&mut self, code: &str) -> bool {
        if self.chain.iter().any(|c| c == code) {
            return false;
        }
        self.chain.push(code.to_string());
        true
    }

    fn leave(&mut self, code: &str) {
        if self.chain.last().map(|c| c.as_str()) == Some(code) {
            self.chain.pop();
        }
    }

    fn on_chain(&self, code: &str) -> bool {
        self.chain.iter().any(|c| c == code)
    }
}

/// Resolves an item's full material tree: withdraws what the bank has,
/// orders what it doesn't, recurses into craftable intermediates, and
/// runs the craft at the right workshop.
pub struct CraftResolver<'a, A: GameActions> {
    actions: &'a A,
    catalog: &'a GameCatalog,
}

impl<'a, A: GameActions> CraftResolver<'a, A> {
    pub fn new(actions: &'a A, catalog: &'a GameCatalog) -> Self {
        CraftResolver { actions, catalog }
    }

    /// Craft up to `quantity` of `code`, sized down to what fits in the
    /// pack. Output is deposited unless `keep_output`. `allow_order`
    /// gates whether missing materials may spawn tasks for the crew.
    pub async fn craft_item(
        &self,
        code: &str,
        quantity: i32,
        allow_order: bool,
        keep_output: bool,
        state: &mut ResolveState<'_>,
    ) -> Result<Readiness, String> {
        if state.banned.contains(code) {
            v_debug!("🚫 {} is banned for this agent", code);
            return Ok(Readiness::Unsatisfiable);
        }

        let Some(item) = self.catalog.get_item(code) else {
            v_info!("🚫 {} is not in the item catalog, banning", code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        };
        let Some(craft) = item.craft.clone() else {
            v_info!("🚫 {} has no recipe, banning", code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        };

        if !state.enter(code) {
            v_info!("🔁 {} is already on the resolution chain, banning", code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        }
        let outcome = self
            .craft_sized_batch(code, &craft, quantity, allow_order, keep_output, state)
            .await;
        state.leave(code);
        match &outcome {
            Ok(Readiness::Ok) => {}
            // Attempt is over without a finished craft; drop the
            // in-flight marker so the next pass retries the craft
            // instead of waiting on itself. Markers for raw materials
            // stay until the bank shows them.
            _ => {
                state.current.remove(code);
            }
        }
        outcome
    }

    async fn craft_sized_batch(
        &self,
        code: &str,
        craft: &Craft,
        quantity: i32,
        allow_order: bool,
        keep_output: bool,
        state: &mut ResolveState<'_>,
    ) -> Result<Readiness, String> {
        let Some(skill) = Skill::parse(&craft.skill) else {
            v_info!("🚫 {} wants unknown skill {:?}, banning", code, craft.skill);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        };
        let our_level = self.actions.skill_level(skill);
        if our_level < craft.level {
            v_info!(
                "📉 {} needs {} {} and we are {}, banning",
                code,
                craft.skill,
                craft.level,
                our_level
            );
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        }

        // Size the batch to what the pack can stage in one trip
        let space_per_unit = craft.space_per_unit();
        let batch = if space_per_unit > 0 {
            quantity.min(self.actions.inventory_free_space() / space_per_unit)
        } else {
            quantity
        };
        if batch <= 0 {
            return Err(format!("no room to stage materials for {}", code));
        }

        state.current.add(code);

        let bank = self.actions.get_bank_contents().await?;
        match self
            .requirements_satisfied(code, craft, batch, &bank, allow_order, state)
            .await?
        {
            Readiness::Ok => {}
            Readiness::NeedsOrder => {
                v_info!("⏳ {} is waiting on ordered materials", code);
                return Ok(Readiness::NeedsOrder);
            }
            Readiness::Unsatisfiable => {
                v_info!("🚫 Materials for {} are out of reach, banning", code);
                state.banned.add(code);
                return Ok(Readiness::Unsatisfiable);
            }
        }

        // Stage materials; the snapshot can go stale underneath us
        for requirement in &craft.items {
            let amount = requirement.quantity * batch;
            if !self.actions.withdraw(&requirement.code, amount).await? {
                return Err(format!(
                    "bank no longer holds {} x{} for {}",
                    requirement.code, amount, code
                ));
            }
        }

        let Some((x, y)) = self.actions.find_closest_content("workshop", craft.skill.as_str())
        else {
            v_info!("🚫 No {} workshop on the map, banning {}", craft.skill, code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        };
        self.actions.move_to(x, y).await?;

        let xp = self.actions.craft(code, batch).await?;
        v_info!("🔨 Crafted {} x{} (+{} xp)", code, batch, xp);
        state.current.remove(code);

        if !keep_output {
            self.actions.deposit_all_inventory().await?;
        }
        Ok(Readiness::Ok)
    }

    /// Check each recipe line against the bank snapshot and order what
    /// is missing. Bank stock covering a line also clears any in-flight
    /// order for that material.
    async fn requirements_satisfied(
        &self,
        code: &str,
        craft: &Craft,
        quantity: i32,
        bank: &HashMap<String, i32>,
        allow_order: bool,
        state: &mut ResolveState<'_>,
    ) -> Result<Readiness, String> {
        let mut outcome = Readiness::Ok;

        for requirement in &craft.items {
            let needed = requirement.quantity * quantity;
            let have = bank.get(&requirement.code).copied().unwrap_or(0);

            if have >= needed {
                if state.current.remove(&requirement.code) {
                    v_debug!("✅ Order for {} has been fulfilled", requirement.code);
                }
                continue;
            }

            let missing = needed - have;
            v_debug!(
                "📋 {} needs {} x{}, bank has {}",
                code,
                requirement.code,
                needed,
                have
            );
            if !allow_order {
                v_info!(
                    "🚫 Missing {} x{} and ordering is off",
                    requirement.code,
                    missing
                );
                outcome = Readiness::Unsatisfiable;
                continue;
            }

            match self.order_item(&requirement.code, missing, state).await? {
                Readiness::Ok => {}
                Readiness::NeedsOrder => {
                    if outcome == Readiness::Ok {
                        outcome = Readiness::NeedsOrder;
                    }
                }
                Readiness::Unsatisfiable => {
                    outcome = Readiness::Unsatisfiable;
                }
            }
        }

        Ok(outcome)
    }

    /// Get `quantity` of a missing material on its way: craft it here
    /// when it has a recipe, otherwise put tasks on the store for the
    /// role that produces it.
    async fn order_item(
        &self,
        code: &str,
        quantity: i32,
        state: &mut ResolveState<'_>,
    ) -> Result<Readiness, String> {
        if state.banned.contains(code) {
            return Ok(Readiness::Unsatisfiable);
        }
        // A code that needs itself further up the tree is a recipe
        // loop, not an order in flight
        if state.on_chain(code) {
            v_info!("🔁 {} is its own ancestor in the recipe tree, banning", code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        }
        if state.current.contains(code) {
            v_debug!("⏳ {} is already on order, waiting on the crew", code);
            return Ok(Readiness::NeedsOrder);
        }

        let Some(item) = self.catalog.get_item(code) else {
            v_info!("🚫 {} is not in the item catalog, banning", code);
            state.banned.add(code);
            return Ok(Readiness::Unsatisfiable);
        };

        if item.is_craftable() {
            return Box::pin(self.craft_item(code, quantity, true, false, state)).await;
        }

        let role = if is_monster_loot(item) { "fighter" } else { "forager" };
        v_info!("📨 Ordering {} x{} from the {}s", code, quantity, role);
        state.current.add(code);
        for _ in 0..quantity {
            state
                .store
                .enqueue(Task::new(role, code))
                .map_err(|e| e.to_string())?;
        }
        Ok(Readiness::NeedsOrder)
    }
}
