//! Personal task tracker backed by a JSON file.
//!
//! [`TaskRepository`] runs the create / list / update / delete operations over
//! any [`TaskStorage`]; the binary wires it to a [`JsonFileStorage`] and the
//! [`SystemClock`].

pub mod clock;
pub mod config;
pub mod error;
pub mod render;
pub mod repository;
pub mod storage;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StorageError, TaskError, UsageError};
pub use repository::{TaskListing, TaskRepository, TaskUpdate};
pub use storage::{InMemoryStorage, JsonFileStorage, TaskStorage};
pub use task::{Status, Task};
