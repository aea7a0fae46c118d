use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::v_info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewConfig {
    pub storage: StorageConfig,
    pub timing: TimingConfig,
    pub combat: CombatConfig,
    pub gathering: GatheringConfig,
    pub recycling: RecyclingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for per-character order state files
    pub data_dir: String,
    /// Shared task store file, one per crew
    pub tasks_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Main cycle delay in seconds
    pub main_cycle_delay_seconds: u64,
    /// Retry delay after errors in seconds
    pub error_retry_delay_seconds: u64,
    /// Config hot-reload check interval in seconds
    pub config_reload_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Consecutive losses before a fight series is abandoned
    pub max_loss_streak: i32,
    /// Hp fraction below which the character recovers before fighting (0.0 to 1.0)
    pub rest_threshold: f64,
    /// Fight rounds per training pass
    pub xp_fight_rounds: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatheringConfig {
    /// Units harvested per freelance gathering trip
    pub default_harvest_batch: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecyclingConfig {
    /// Copies of each crafted item to leave in the bank
    pub keep_in_bank: i32,
}

impl StorageConfig {
    pub fn banned_orders_path(&self, character: &str) -> String {
        format!("{}/banned_orders_{}.json", self.data_dir, character)
    }

    pub fn current_orders_path(&self, character: &str) -> String {
        format!("{}/current_orders_{}.json", self.data_dir, character)
    }
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: "storage".to_string(),
                tasks_file: "storage/tasks.json".to_string(),
            },
            timing: TimingConfig {
                main_cycle_delay_seconds: 30,
                error_retry_delay_seconds: 60,
                config_reload_interval_seconds: 30,
            },
            combat: CombatConfig {
                max_loss_streak: 3,
                rest_threshold: 0.5, // recover above 50% hp
                xp_fight_rounds: 15,
            },
            gathering: GatheringConfig {
                default_harvest_batch: 20,
            },
            recycling: RecyclingConfig { keep_in_bank: 5 },
        }
    }
}

impl CrewConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if Path::new(config_path).exists() {
            v_info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: CrewConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path);
            let config = CrewConfig::default();
            config.save(config_path)?;
            v_info!("💡 Edit {} to customize crew behavior", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.combat.rest_threshold < 0.0 || self.combat.rest_threshold > 1.0 {
            return Err("rest_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.combat.max_loss_streak <= 0 {
            return Err("max_loss_streak must be greater than 0".to_string());
        }
        if self.combat.xp_fight_rounds <= 0 {
            return Err("xp_fight_rounds must be greater than 0".to_string());
        }
        if self.gathering.default_harvest_batch <= 0 {
            return Err("default_harvest_batch must be greater than 0".to_string());
        }
        if self.recycling.keep_in_bank < 0 {
            return Err("keep_in_bank must not be negative".to_string());
        }
        if self.timing.main_cycle_delay_seconds == 0 {
            return Err("main_cycle_delay_seconds must be greater than 0".to_string());
        }
        if self.storage.tasks_file.is_empty() {
            return Err("tasks_file must not be empty".to_string());
        }

        v_info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        v_info!("📋 Configuration Summary:");
        v_info!("   📦 Task store: {}", self.storage.tasks_file);
        v_info!("   ⏰ Cycle delay: {}s", self.timing.main_cycle_delay_seconds);
        v_info!("   💀 Loss streak limit: {}", self.combat.max_loss_streak);
        v_info!("   ❤️ Rest threshold: {:.0}%", self.combat.rest_threshold * 100.0);
        v_info!("   🌾 Harvest batch: {}", self.gathering.default_harvest_batch);
        v_info!("   🔄 Config reload: {}s", self.timing.config_reload_interval_seconds);
    }
}

/// Hot-reloadable configuration manager
#[derive(Debug)]
pub struct ConfigManager {
    config: CrewConfig,
    config_path: String,
    last_modified: Option<SystemTime>,
    last_reload_check: SystemTime,
}

impl ConfigManager {
    pub fn new(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CrewConfig::load_or_create(config_path)?;
        config.validate()?;
        config.print_summary();

        let last_modified = fs::metadata(config_path).and_then(|m| m.modified()).ok();

        Ok(Self {
            config,
            config_path: config_path.to_string(),
            last_modified,
            last_reload_check: SystemTime::now(),
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &CrewConfig {
        &self.config
    }

    /// Check if config should be reloaded and do so if needed
    pub fn check_and_reload(&mut self) -> bool {
        let now = SystemTime::now();
        let reload_interval =
            std::time::Duration::from_secs(self.config.timing.config_reload_interval_seconds);

        // Only check file system at the configured interval
        if now.duration_since(self.last_reload_check).unwrap_or_default() < reload_interval {
            return false;
        }

        self.last_reload_check = now;

        // Check if file was modified
        if let Ok(metadata) = fs::metadata(&self.config_path) {
            if let Ok(modified) = metadata.modified() {
                if Some(modified) != self.last_modified {
                    return self.reload_config(modified);
                }
            }
        }

        false
    }

    fn reload_config(&mut self, new_modified_time: SystemTime) -> bool {
        match CrewConfig::load_or_create(&self.config_path) {
            Ok(new_config) => match new_config.validate() {
                Ok(_) => {
                    let old_values = format!(
                        "cycle: {}s, loss streak: {}, harvest batch: {}",
                        self.config.timing.main_cycle_delay_seconds,
                        self.config.combat.max_loss_streak,
                        self.config.gathering.default_harvest_batch
                    );

                    self.config = new_config;
                    self.last_modified = Some(new_modified_time);

                    let new_values = format!(
                        "cycle: {}s, loss streak: {}, harvest batch: {}",
                        self.config.timing.main_cycle_delay_seconds,
                        self.config.combat.max_loss_streak,
                        self.config.gathering.default_harvest_batch
                    );

                    v_info!("🔄 Configuration reloaded successfully!");
                    if old_values != new_values {
                        v_info!("   📝 Changes: {} → {}", old_values, new_values);
                    }
                    true
                }
                Err(e) => {
                    v_info!("⚠️ Invalid configuration detected, keeping current config: {}", e);
                    false
                }
            },
            Err(e) => {
                v_info!("⚠️ Failed to reload configuration, keeping current config: {}", e);
                false
            }
        }
    }
}
