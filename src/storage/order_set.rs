// Order sets - per-agent persisted item-code sets
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use crate::v_error;

/// A persisted set of item codes. Two live per agent: the codes it is
/// currently pursuing ("current orders") and the codes it has given up
/// on this session ("banned orders"). Persisted as a JSON array so the
/// files stay hand-editable.
pub struct OrderSet {
    storage_path: String,
    codes: HashSet<String>,
}

impl OrderSet {
    /// Open a set, keeping whatever the file already holds.
    pub fn load(storage_path: &str) -> Self {
        let mut set = Self {
            storage_path: storage_path.to_string(),
            codes: HashSet::new(),
        };

        if let Err(e) = set.load_from_disk() {
            println!("⚠️ Failed to load order set {}: {}", storage_path, e);
            println!("💾 Starting with an empty set");
        }

        set
    }

    /// Open a set for a fresh session, truncating the backing file.
    pub fn open_fresh(storage_path: &str) -> Self {
        let set = Self {
            storage_path: storage_path.to_string(),
            codes: HashSet::new(),
        };

        if let Err(e) = set.save_to_disk() {
            println!("⚠️ Failed to reset order set {}: {}", storage_path, e);
        }

        set
    }

    fn load_from_disk(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !Path::new(&self.storage_path).exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&self.storage_path)?;
        let codes: Vec<String> = serde_json::from_str(&content)?;
        self.codes = codes.into_iter().collect();
        Ok(())
    }

    fn save_to_disk(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut codes: Vec<&String> = self.codes.iter().collect();
        codes.sort();
        let content = serde_json::to_string_pretty(&codes)?;

        if let Some(parent) = Path::new(&self.storage_path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.storage_path, content)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save_to_disk() {
            v_error!("⚠️ Failed to persist order set {}: {}", self.storage_path, e);
        }
    }

    /// Insert a code. Returns false when it was already present.
    pub fn add(&mut self, code: &str) -> bool {
        if !self.codes.insert(code.to_string()) {
            return false;
        }
        self.persist();
        true
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Drop a code. Returns false when it was not present.
    pub fn remove(&mut self, code: &str) -> bool {
        if !self.codes.remove(code) {
            return false;
        }
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        if self.codes.is_empty() {
            return;
        }
        self.codes.clear();
        self.persist();
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
