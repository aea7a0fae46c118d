// Overseer module - continuous single-character order loop orchestration
use std::fs;
use std::sync::Arc;

use crate::catalog::GameCatalog;
use crate::client::ArtifactsClient;
use crate::config::ConfigManager;
use crate::operations::{CharacterOperations, OrderDispatcher, Role};
use crate::storage::{OrderSet, TaskStore};
use crate::v_summary;

/// Owns everything one character needs to work the crew's order
/// economy and runs its cycle forever.
pub struct Overseer {
    actions: CharacterOperations,
    catalog: Arc<GameCatalog>,
    role: Role,
    store: TaskStore,
    current: OrderSet,
    banned: OrderSet,
    config_manager: ConfigManager,
}

impl Overseer {
    /// Fetch the character and the world catalog, open the stores and
    /// stand the agent up.
    pub async fn bootstrap(
        token: String,
        character_name: &str,
        role: Role,
        config_path: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_manager = ConfigManager::new(config_path)?;
        let config = config_manager.config().clone();

        let client = ArtifactsClient::new(token, character_name);
        let character = client.get_character().await?;
        v_summary!(
            "🧭 {} (level {}) reporting for duty as {}",
            character.name,
            character.level,
            role.as_str()
        );

        let catalog = Arc::new(GameCatalog::load(&client).await?);

        let store = TaskStore::new(&config.storage.tasks_file);
        // Bans are per-session; start clean. Current orders carry over
        // so in-flight materials are not ordered twice after a restart.
        let banned = OrderSet::open_fresh(&config.storage.banned_orders_path(character_name));
        let current = OrderSet::load(&config.storage.current_orders_path(character_name));

        let actions = CharacterOperations::new(client, Arc::clone(&catalog), character, &config);

        Ok(Self {
            actions,
            catalog,
            role,
            store,
            current,
            banned,
            config_manager,
        })
    }

    pub async fn run_continuous(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        println!("🎖️  Overseer starting CONTINUOUS order operations...");
        println!("⚠️  This will run indefinitely - Press Ctrl+C to stop");

        let mut cycle_count = 0;

        loop {
            cycle_count += 1;
            println!("\n🔄 ═══════ ORDER CYCLE #{} ═══════", cycle_count);

            self.config_manager.check_and_reload();

            match self.run_cycle().await {
                Ok(true) => {
                    println!("✅ Cycle #{} filled store orders", cycle_count);
                }
                Ok(false) => {
                    println!(
                        "✅ Cycle #{} ran {} default work",
                        cycle_count,
                        self.role.as_str()
                    );
                }
                Err(e) => {
                    let delay = self.config_manager.config().timing.error_retry_delay_seconds;
                    eprintln!("❌ Cycle #{} failed: {}", cycle_count, e);
                    eprintln!("⏳ Waiting {} seconds before retry...", delay);
                    tokio::time::sleep(tokio::time::Duration::from_secs(delay)).await;
                }
            }

            // Brief pause between cycles
            let delay = self.config_manager.config().timing.main_cycle_delay_seconds;
            println!(
                "⏳ Cycle complete. Waiting {} seconds before next cycle...",
                delay
            );
            tokio::time::sleep(tokio::time::Duration::from_secs(delay)).await;
        }
    }

    async fn run_cycle(&mut self) -> Result<bool, String> {
        let config = self.config_manager.config().clone();
        let dispatcher = OrderDispatcher::new(&self.actions, &self.catalog, self.role, &config);
        dispatcher
            .fill_orders(&mut self.store, &mut self.current, &mut self.banned)
            .await
    }
}

pub fn load_api_token() -> Result<String, Box<dyn std::error::Error>> {
    let token = fs::read_to_string(crate::TOKEN_FILE)
        .map_err(|e| format!("Failed to read {}: {}", crate::TOKEN_FILE, e))?
        .trim()
        .to_string();
    Ok(token)
}
