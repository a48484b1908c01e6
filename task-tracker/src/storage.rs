//! Storage backends for the task store.
//!
//! A backend hands out the whole ordered collection on [`TaskStorage::load`] and
//! replaces it wholesale on [`TaskStorage::save`]. Loading never fails: a
//! missing, unreadable or malformed store is reported in the logs and treated
//! as empty.

use crate::error::StorageError;
use crate::task::{Task, is_blank};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Whole-collection persistence for tasks.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStorage {
    /// Loads every stored task in insertion order, or nothing if the store
    /// cannot be read.
    fn load(&self) -> Vec<Task>;

    /// Replaces the stored collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// Reasons a store's contents are rejected.
#[derive(Error, Debug)]
pub(crate) enum MalformedStore {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("task id 0 is not allowed")]
    ZeroId,
    #[error("task id {0} appears more than once")]
    DuplicateId(u32),
    #[error("task {0} has an empty description")]
    BlankDescription(u32),
}

/// Parses stored JSON into tasks, treating empty documents as an empty store.
pub(crate) fn parse_tasks(contents: &str) -> Result<Vec<Task>, MalformedStore> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(contents)?;
    if is_empty_document(&value) {
        return Ok(Vec::new());
    }
    let tasks: Vec<Task> = serde_json::from_value(value)?;
    validate(&tasks)?;
    Ok(tasks)
}

fn is_empty_document(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn validate(tasks: &[Task]) -> Result<(), MalformedStore> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id() == 0 {
            return Err(MalformedStore::ZeroId);
        }
        if !seen.insert(task.id()) {
            return Err(MalformedStore::DuplicateId(task.id()));
        }
        if is_blank(task.description()) {
            return Err(MalformedStore::BlankDescription(task.id()));
        }
    }
    Ok(())
}

/// Store kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "tasks".into());
        name.push(format!(".tmp.{}", std::process::id()));
        self.path.with_file_name(name)
    }
}

impl TaskStorage for JsonFileStorage {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Vec<Task> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("store file does not exist yet");
                return Vec::new();
            }
            Err(err) => {
                warn!(error = %err, "cannot read store file, treating it as empty");
                return Vec::new();
            }
        };

        match parse_tasks(&contents) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(err) => {
                warn!(error = %err, "malformed store file, treating it as empty");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display(), count = tasks.len()))]
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut json = serde_json::to_string_pretty(tasks)?;
        json.push('\n');

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| StorageError::io(dir, err))?;
        }

        // Write beside the target and rename so a crash never leaves a truncated store.
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|err| StorageError::io(&tmp, err))?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(error = %cleanup, "cannot remove temporary store file");
            }
            return Err(StorageError::io(&self.path, err));
        }

        debug!("saved tasks");
        Ok(())
    }
}

/// Store held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tasks: RefCell<Vec<Task>>,
    saves: Cell<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            saves: Cell::new(0),
        }
    }

    /// Snapshot of the stored collection.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of times the collection has been saved.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl TaskStorage for InMemoryStorage {
    fn load(&self) -> Vec<Task> {
        self.tasks()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
