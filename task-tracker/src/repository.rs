use crate::clock::Clock;
use crate::error::{TaskError, UsageError};
use crate::storage::TaskStorage;
use crate::task::{Status, Task, is_blank};
use tracing::info;

/// Fields to change on an existing task. Unset fields are left alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TaskUpdate {
    fn validate(&self) -> Result<(), UsageError> {
        if self.description.is_none() && self.status.is_none() {
            return Err(UsageError::NothingToUpdate);
        }
        if self.description.as_deref().is_some_and(is_blank) {
            return Err(UsageError::EmptyDescription);
        }
        Ok(())
    }
}

/// Snapshot of the store taken by [`TaskRepository::list`].
#[derive(Debug, Clone)]
pub struct TaskListing {
    tasks: Vec<Task>,
    status: Option<String>,
}

impl TaskListing {
    /// Whether the store held no tasks at all, regardless of the filter.
    pub fn is_store_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Tasks matching the filter, in store order. Each call starts a fresh pass.
    pub fn matching(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |task| match &self.status {
            Some(status) => task.status().as_str() == status,
            None => true,
        })
    }

    pub fn has_matches(&self) -> bool {
        self.matching().next().is_some()
    }
}

/// Create, list, update and delete over a [`TaskStorage`].
///
/// Every operation loads the full collection, and the mutating ones write it
/// back in full. Nothing is cached between calls.
pub struct TaskRepository<S, C> {
    storage: S,
    clock: C,
    default_status: Status,
}

impl<S: TaskStorage, C: Clock> TaskRepository<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            default_status: Status::default(),
        }
    }

    /// Status given to tasks created without one.
    pub fn with_default_status(mut self, status: impl Into<Status>) -> Self {
        self.default_status = status.into();
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends a new task with the next free id.
    ///
    /// # Errors
    ///
    /// * [`UsageError::EmptyDescription`] if `description` is blank; storage is not touched
    /// * [`TaskError::IdsExhausted`] if the highest id is already `u32::MAX`; nothing is written
    /// * [`TaskError::Storage`] if the store cannot be written
    #[tracing::instrument(skip(self))]
    pub fn create(&self, description: String, status: Option<String>) -> Result<Task, TaskError> {
        if is_blank(&description) {
            return Err(UsageError::EmptyDescription.into());
        }

        let mut tasks = self.storage.load();
        let id = next_id(&tasks).ok_or(TaskError::IdsExhausted)?;
        let status = status.map_or_else(|| self.default_status.clone(), Status::from);
        let task = Task::new(id, description, status, self.clock.now());
        tasks.push(task.clone());
        self.storage.save(&tasks)?;

        info!(id, "task created");
        Ok(task)
    }

    /// Loads the store for display, optionally filtered by exact status.
    #[tracing::instrument(skip(self))]
    pub fn list(&self, status: Option<String>) -> TaskListing {
        TaskListing {
            tasks: self.storage.load(),
            status,
        }
    }

    /// Applies `update` to the task with `id` and refreshes its `updatedAt`.
    ///
    /// # Errors
    ///
    /// * [`UsageError`] if the update carries no field or a blank description; storage is not touched
    /// * [`TaskError::NotFound`] if no task has `id`; nothing is written
    /// * [`TaskError::Storage`] if the store cannot be written
    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: u32, update: TaskUpdate) -> Result<Task, TaskError> {
        update.validate()?;

        let mut tasks = self.storage.load();
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskError::NotFound(id))?;

        if let Some(description) = update.description {
            task.set_description(description);
        }
        if let Some(status) = update.status {
            task.set_status(status.into());
        }
        task.touch(self.clock.now());
        let updated = task.clone();
        self.storage.save(&tasks)?;

        info!(id, "task updated");
        Ok(updated)
    }

    /// Removes the task with `id`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// * [`TaskError::NotFound`] if no task has `id`; nothing is written
    /// * [`TaskError::Storage`] if the store cannot be written
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: u32) -> Result<Task, TaskError> {
        let mut tasks = self.storage.load();
        let position = tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskError::NotFound(id))?;
        let removed = tasks.remove(position);
        self.storage.save(&tasks)?;

        info!(id, "task deleted");
        Ok(removed)
    }
}

/// One past the highest id in use, or `None` once `u32::MAX` is taken.
fn next_id(tasks: &[Task]) -> Option<u32> {
    tasks.iter().map(Task::id).max().unwrap_or(0).checked_add(1)
}
