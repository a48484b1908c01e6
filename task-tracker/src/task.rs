use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Wire format of `createdAt` / `updatedAt`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_STATUS: &str = "Pending";

/// Free-form status label attached to a task.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone, Hash)]
#[serde(transparent)]
pub struct Status(String);

impl Default for Status {
    fn default() -> Self {
        Self(DEFAULT_STATUS.to_string())
    }
}

impl Status {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Self(label)
    }
}

#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: u32,
    description: String,
    status: Status,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    updated_at: NaiveDateTime,
}

impl Task {
    /// Creates a task whose `updated_at` starts equal to `created_at`.
    pub fn new(id: u32, description: String, status: Status, now: NaiveDateTime) -> Self {
        Self {
            id,
            description,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub(crate) fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now;
    }
}

/// Returns `true` when a description carries no visible text.
pub fn is_blank(description: &str) -> bool {
    description.trim().is_empty()
}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` timestamp strings.
mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
