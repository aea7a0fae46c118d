// Task store - the shared work queue every agent process pulls from
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::v_error;

/// One unit of work: someone playing `role` should obtain one `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub role: String,
    pub code: String,
}

impl Task {
    pub fn new(role: &str, code: &str) -> Self {
        Task {
            role: role.to_string(),
            code: code.to_string(),
        }
    }
}

/// FIFO queue persisted as one JSON array, rewritten whole on every
/// mutation. Shared between processes with no locking; see the order
/// engine for how claim races are tolerated.
pub struct TaskStore {
    storage_path: String,
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(storage_path: &str) -> Self {
        let mut store = Self {
            storage_path: storage_path.to_string(),
            tasks: Vec::new(),
        };
        store.reload();
        store
    }

    /// Re-read the backing file. Missing or malformed contents mean an
    /// empty queue, never an error: sibling processes rewrite this file
    /// at will and humans edit it by hand.
    fn reload(&mut self) {
        self.tasks = match fs::read_to_string(&self.storage_path) {
            Ok(content) => match serde_json::from_str::<Vec<Task>>(&content) {
                Ok(tasks) => tasks,
                Err(e) => {
                    v_error!(
                        "⚠️ Task store {} is malformed ({}), treating as empty",
                        self.storage_path,
                        e
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
    }

    fn save_to_disk(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(&self.tasks)?;

        if let Some(parent) = Path::new(&self.storage_path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.storage_path, content)?;
        Ok(())
    }

    /// Append a task at the tail and rewrite the file.
    pub fn enqueue(&mut self, task: Task) -> Result<(), Box<dyn std::error::Error>> {
        self.reload();
        self.tasks.push(task);
        self.save_to_disk()
    }

    /// Fresh snapshot of the queue, oldest first.
    pub fn list(&mut self) -> Vec<Task> {
        self.reload();
        self.tasks.clone()
    }

    /// Remove and return the task at `index`; out-of-range returns None.
    pub fn dequeue(&mut self, index: usize) -> Result<Option<Task>, Box<dyn std::error::Error>> {
        self.reload();
        if index >= self.tasks.len() {
            return Ok(None);
        }
        let task = self.tasks.remove(index);
        self.save_to_disk()?;
        Ok(Some(task))
    }

    pub fn len(&mut self) -> usize {
        self.reload();
        self.tasks.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}
