// Order dispatch - one agent's pass over the shared task store
use rand::Rng;

use crate::catalog::GameCatalog;
use crate::config::CrewConfig;
use crate::models::{GEAR_SLOTS, Skill, Slot};
use crate::operations::actions::GameActions;
use crate::operations::gather::GatherStrategy;
use crate::operations::resolver::{CraftResolver, Readiness, ResolveState};
use crate::storage::{OrderSet, Task, TaskStore};
use crate::{v_debug, v_error, v_info, v_summary};

/// Most orders one claim may pull off the store in a single pass.
pub const ORDER_BATCH_CAP: usize = 10;

const TASKS_COIN: &str = "tasks_coin";
const COIN_EXCHANGE_QUANTITY: i32 = 6;

/// What an agent does for the crew. Decides which store tasks it may
/// claim and what it falls back to when the store has nothing for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Fighter,
    Crafter,
    Forager,
    Tasker,
    Recycler,
}

impl Role {
    pub fn parse(name: &str) -> Option<Role> {
        match name.to_lowercase().as_str() {
            "fighter" => Some(Role::Fighter),
            "crafter" => Some(Role::Crafter),
            "forager" => Some(Role::Forager),
            "tasker" => Some(Role::Tasker),
            "recycler" => Some(Role::Recycler),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Fighter => "fighter",
            Role::Crafter => "crafter",
            Role::Forager => "forager",
            Role::Tasker => "tasker",
            Role::Recycler => "recycler",
        }
    }

    /// Task role labels this role serves. Older store files carry
    /// legacy labels, and foragers cover crafter work since harvests
    /// feed most recipes anyway.
    pub fn claimable_labels(&self) -> &'static [&'static str] {
        match self {
            Role::Fighter => &["fighter", "hunter"],
            Role::Crafter => &["crafter"],
            Role::Forager => &["forager", "gatherer", "crafter"],
            Role::Tasker => &["tasker"],
            Role::Recycler => &["recycler"],
        }
    }

    pub fn claims(&self, task_role: &str) -> bool {
        self.claimable_labels().contains(&task_role)
    }
}

struct Claim {
    code: String,
    indexes: Vec<usize>,
}

enum Produced {
    Done,
    Ordered,
    Failed,
}

/// Runs one agent's side of the shared order economy: claim matching
/// store tasks, produce them, and fall back to role default work when
/// the store has nothing to offer.
pub struct OrderDispatcher<'a, A: GameActions> {
    actions: &'a A,
    catalog: &'a GameCatalog,
    role: Role,
    config: &'a CrewConfig,
}

impl<'a, A: GameActions> OrderDispatcher<'a, A> {
    pub fn new(
        actions: &'a A,
        catalog: &'a GameCatalog,
        role: Role,
        config: &'a CrewConfig,
    ) -> Self {
        OrderDispatcher {
            actions,
            catalog,
            role,
            config,
        }
    }

    /// One dispatcher pass. Returns whether store work was claimed.
    pub async fn fill_orders(
        &self,
        store: &mut TaskStore,
        current: &mut OrderSet,
        banned: &mut OrderSet,
    ) -> Result<bool, String> {
        // Start from a clean pack so capacity math is honest
        self.actions.deposit_all_inventory().await?;

        let snapshot = store.list();
        let Some(claim) = self.select_claim(&snapshot, banned) else {
            v_debug!("📭 No claimable orders for the {}", self.role.as_str());
            self.default_activity(store, current, banned).await?;
            return Ok(false);
        };

        // Pull the claimed rows off the store, highest index first so
        // the remaining indexes stay valid
        let mut claimed = Vec::new();
        for &index in claim.indexes.iter().rev() {
            if let Some(task) = store.dequeue(index).map_err(|e| e.to_string())? {
                claimed.push(task);
            }
        }
        claimed.reverse();
        let quantity = claimed.len() as i32;
        if quantity == 0 {
            return Ok(false);
        }
        v_summary!(
            "📦 {} claimed {} order(s) for {}",
            self.actions.name(),
            quantity,
            claim.code
        );

        match self.produce(&claim.code, quantity, store, current, banned).await {
            Ok(Produced::Done) => {
                v_summary!("✅ Filled {} x{}", claim.code, quantity);
            }
            Ok(Produced::Ordered) => {
                v_info!("⏳ {} needs ordered materials, putting the claim back", claim.code);
                self.put_back(claimed, store);
            }
            Ok(Produced::Failed) => {
                v_info!("🚫 Could not fill {}, putting the claim back and banning", claim.code);
                self.put_back(claimed, store);
                banned.add(&claim.code);
            }
            Err(e) => {
                v_error!("❌ Claim on {} hit an error: {}", claim.code, e);
                self.put_back(claimed, store);
            }
        }
        Ok(true)
    }

    /// First claimable task wins; later tasks join the claim while they
    /// share its item code, up to the batch cap.
    fn select_claim(&self, snapshot: &[Task], banned: &OrderSet) -> Option<Claim> {
        let mut claim: Option<Claim> = None;
        for (index, task) in snapshot.iter().enumerate() {
            match &mut claim {
                None => {
                    if self.role.claims(&task.role) && !banned.contains(&task.code) {
                        claim = Some(Claim {
                            code: task.code.clone(),
                            indexes: vec![index],
                        });
                    }
                }
                Some(c) => {
                    if c.indexes.len() >= ORDER_BATCH_CAP {
                        break;
                    }
                    if task.code == c.code && self.role.claims(&task.role) {
                        c.indexes.push(index);
                    }
                }
            }
        }
        claim
    }

    async fn produce(
        &self,
        code: &str,
        quantity: i32,
        store: &mut TaskStore,
        current: &mut OrderSet,
        banned: &mut OrderSet,
    ) -> Result<Produced, String> {
        let craftable = self
            .catalog
            .get_item(code)
            .map(|item| item.is_craftable())
            .unwrap_or(false);

        if craftable {
            let resolver = CraftResolver::new(self.actions, self.catalog);
            let mut state = ResolveState::new(store, current, banned);
            return match resolver.craft_item(code, quantity, true, false, &mut state).await? {
                Readiness::Ok => Ok(Produced::Done),
                Readiness::NeedsOrder => Ok(Produced::Ordered),
                Readiness::Unsatisfiable => Ok(Produced::Failed),
            };
        }

        let gather = GatherStrategy::new(self.actions, self.catalog);
        if gather.obtain(code, quantity, false, banned).await? {
            Ok(Produced::Done)
        } else {
            Ok(Produced::Failed)
        }
    }

    fn put_back(&self, tasks: Vec<Task>, store: &mut TaskStore) {
        for task in tasks {
            let label = format!("{}/{}", task.role, task.code);
            if let Err(e) = store.enqueue(task) {
                v_error!("❌ Could not re-enqueue {}: {}", label, e);
            }
        }
    }

    /// Keep busy when the store holds nothing for this role.
    async fn default_activity(
        &self,
        store: &mut TaskStore,
        current: &mut OrderSet,
        banned: &mut OrderSet,
    ) -> Result<(), String> {
        match self.role {
            Role::Fighter => self.fight_for_xp().await,
            Role::Crafter => self.craft_an_upgrade(store, current, banned).await,
            Role::Forager => self.harvest_somewhere(banned).await,
            Role::Tasker => self.work_task_board().await,
            Role::Recycler => self.recycle_surplus().await,
        }
    }

    /// Fighter default: grind the strongest monster we can take.
    async fn fight_for_xp(&self) -> Result<(), String> {
        let level = self.actions.level();
        let target = self
            .catalog
            .all_monsters()
            .iter()
            .filter(|monster| monster.level <= level)
            .max_by_key(|monster| monster.level);
        let Some(monster) = target else {
            v_info!("🤷 No monster at or under level {}", level);
            return Ok(());
        };
        let Some((x, y)) = self.actions.find_closest_content("monster", &monster.code) else {
            v_info!("🤷 {} is not on the map", monster.code);
            return Ok(());
        };

        v_info!("⚔️ Training against {} (level {})", monster.code, monster.level);
        self.actions.gear_up_for(&monster.code).await?;
        self.actions.move_to(x, y).await?;
        let tally = self.actions.fight(self.config.combat.xp_fight_rounds).await?;
        v_summary!(
            "⚔️ Training pass: {} win(s), {} loss(es), +{} xp",
            tally.wins,
            tally.losses,
            tally.xp
        );
        self.actions.deposit_all_inventory().await?;
        Ok(())
    }

    /// Crafter default: build a better piece for the weakest gear slot.
    async fn craft_an_upgrade(
        &self,
        store: &mut TaskStore,
        current: &mut OrderSet,
        banned: &mut OrderSet,
    ) -> Result<(), String> {
        let mut weakest: Option<(Slot, i32)> = None;
        for slot in GEAR_SLOTS {
            let code = self.actions.equipped(slot);
            let level = if code.is_empty() {
                0
            } else {
                self.catalog.get_item(&code).map(|item| item.level).unwrap_or(0)
            };
            if weakest.map(|(_, lowest)| level < lowest).unwrap_or(true) {
                weakest = Some((slot, level));
            }
        }
        let Some((slot, worn_level)) = weakest else {
            return Ok(());
        };

        let candidate = self
            .catalog
            .all_items()
            .filter(|item| item.item_type == slot.item_type())
            .filter(|item| item.level <= self.actions.level() && item.level > worn_level)
            .filter(|item| !banned.contains(&item.code))
            .filter(|item| match &item.craft {
                Some(craft) => Skill::parse(&craft.skill)
                    .map(|skill| self.actions.skill_level(skill) >= craft.level)
                    .unwrap_or(false),
                None => false,
            })
            .max_by_key(|item| item.level)
            .map(|item| item.code.clone());

        let Some(code) = candidate else {
            v_info!("🤷 No craftable upgrade for the {} slot", slot.as_str());
            return Ok(());
        };

        v_info!("🛠️ Gear project: {} for the {} slot", code, slot.as_str());
        let resolver = CraftResolver::new(self.actions, self.catalog);
        let mut state = ResolveState::new(store, current, banned);
        match resolver.craft_item(&code, 1, true, true, &mut state).await {
            Ok(Readiness::Ok) => {
                self.actions.equip(&code, slot).await?;
                v_summary!("🛡️ Upgraded the {} slot to {}", slot.as_str(), code);
                self.actions.deposit_all_inventory().await?;
            }
            Ok(Readiness::NeedsOrder) => {
                v_info!("⏳ Upgrade {} is waiting on ordered materials", code);
            }
            Ok(Readiness::Unsatisfiable) => {
                v_info!("🚫 Upgrade {} is out of reach this session", code);
            }
            Err(e) => {
                v_info!("⚠️ Upgrade attempt on {} failed: {}", code, e);
            }
        }
        Ok(())
    }

    /// Forager default: harvest a random node our skills can work.
    async fn harvest_somewhere(&self, banned: &mut OrderSet) -> Result<(), String> {
        let eligible: Vec<(String, String)> = self
            .catalog
            .all_resources()
            .iter()
            .filter(|resource| match Skill::parse(&resource.skill) {
                Some(skill) => self.actions.skill_level(skill) >= resource.level,
                None => false,
            })
            .filter_map(|resource| {
                resource
                    .drops
                    .first()
                    .map(|drop| (resource.code.clone(), drop.code.clone()))
            })
            .filter(|(_, drop)| !banned.contains(drop))
            .collect();

        if eligible.is_empty() {
            v_info!("🤷 No resource node within our skills");
            return Ok(());
        }
        let pick = rand::thread_rng().gen_range(0..eligible.len());
        let (node, drop) = &eligible[pick];
        v_info!("🌲 Freelance harvest: {} from {}", drop, node);

        let gather = GatherStrategy::new(self.actions, self.catalog);
        gather
            .obtain(drop, self.config.gathering.default_harvest_batch, false, banned)
            .await?;
        Ok(())
    }

    /// Tasker default: work the task master's board for coins.
    async fn work_task_board(&self) -> Result<(), String> {
        let status = match self.actions.current_task() {
            Some(status) => status,
            None => self.actions.accept_task().await?,
        };

        if status.is_complete() {
            self.actions.complete_task().await?;
            v_summary!("📜 Task {} turned in", status.code);
        } else if status.task_type == "monsters" {
            let Some((x, y)) = self.actions.find_closest_content("monster", &status.code) else {
                v_info!("🤷 Task monster {} is not on the map", status.code);
                return Ok(());
            };
            let remaining = status.total - status.progress;
            let rounds = remaining.min(self.config.combat.xp_fight_rounds);
            self.actions.gear_up_for(&status.code).await?;
            self.actions.move_to(x, y).await?;
            let tally = self.actions.fight(rounds).await?;
            v_info!("⚔️ Task progress on {}: {} win(s) this pass", status.code, tally.wins);
            if self
                .actions
                .current_task()
                .map(|s| s.is_complete())
                .unwrap_or(false)
            {
                self.actions.complete_task().await?;
                v_summary!("📜 Task {} turned in", status.code);
            }
            self.actions.deposit_all_inventory().await?;
        } else {
            v_info!("🤷 Task type {} is beyond this crew, leaving it", status.task_type);
        }

        // Cash coins for reward crates once enough pile up
        let bank = self.actions.get_bank_contents().await?;
        if bank.get(TASKS_COIN).copied().unwrap_or(0) >= COIN_EXCHANGE_QUANTITY
            && self.actions.withdraw(TASKS_COIN, COIN_EXCHANGE_QUANTITY).await?
        {
            self.actions.exchange_task_coins().await?;
            v_summary!("🪙 Exchanged {} task coins", COIN_EXCHANGE_QUANTITY);
            self.actions.deposit_all_inventory().await?;
        }
        Ok(())
    }

    /// Recycler default: shred surplus crafted gear back into materials.
    async fn recycle_surplus(&self) -> Result<(), String> {
        let bank = self.actions.get_bank_contents().await?;
        let keep = self.config.recycling.keep_in_bank;

        let mut best: Option<(String, i32, Skill)> = None;
        for (code, quantity) in &bank {
            let surplus = *quantity - keep;
            if surplus <= 0 {
                continue;
            }
            let Some(item) = self.catalog.get_item(code) else {
                continue;
            };
            let Some(craft) = &item.craft else {
                continue;
            };
            let Some(skill) = Skill::parse(&craft.skill) else {
                continue;
            };
            if !matches!(
                skill,
                Skill::Weaponcrafting | Skill::Gearcrafting | Skill::Jewelrycrafting
            ) {
                continue;
            }
            if best.as_ref().map(|(_, s, _)| surplus > *s).unwrap_or(true) {
                best = Some((code.clone(), surplus, skill));
            }
        }

        let Some((code, surplus, skill)) = best else {
            v_debug!("✨ Bank is tidy, nothing worth shredding");
            return Ok(());
        };

        let amount = surplus.min(self.actions.inventory_free_space());
        if amount <= 0 {
            return Ok(());
        }
        if !self.actions.withdraw(&code, amount).await? {
            return Ok(());
        }
        let Some((x, y)) = self.actions.find_closest_content("workshop", skill.as_str()) else {
            self.actions.deposit_all_inventory().await?;
            return Ok(());
        };
        self.actions.move_to(x, y).await?;
        self.actions.recycle(&code, amount).await?;
        v_summary!("♻️ Recycled {} x{}", code, amount);
        self.actions.deposit_all_inventory().await?;
        Ok(())
    }
}
