use crate::repository::TaskListing;
use crate::task::{TIMESTAMP_FORMAT, Task};

pub const EMPTY_STORE_NOTICE: &str = "Your task list is empty! Go add something to do.";

const RULE_WIDTH: usize = 96;

pub fn created(task: &Task) -> String {
    format!("Task added with ID {}", task.id())
}

pub fn updated(task: &Task) -> String {
    format!("Task {} updated successfully.", task.id())
}

pub fn deleted(task: &Task) -> String {
    format!("Task {} has been deleted successfully.", task.id())
}

pub fn no_matches(status: &str) -> String {
    format!("No tasks with status '{status}' found.")
}

/// Renders a listing as a table, or as a notice when there is nothing to show.
pub fn listing(listing: &TaskListing) -> String {
    if listing.is_store_empty() {
        return EMPTY_STORE_NOTICE.to_string();
    }
    if !listing.has_matches() {
        // An unfiltered listing of a non-empty store always has matches.
        return no_matches(listing.status_filter().unwrap_or_default());
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        format!("{:^RULE_WIDTH$}", "--- Your Tasks ---"),
        rule.clone(),
        format!(
            "{:<5} | {:<12} | {:<19} | {:<19} | Description",
            "ID", "Status", "Created At", "Updated At"
        ),
        rule.clone(),
    ];
    lines.extend(listing.matching().map(row));
    lines.push(rule);
    lines.join("\n")
}

fn row(task: &Task) -> String {
    format!(
        "{:<5} | {:<12} | {} | {} | {}",
        task.id(),
        task.status(),
        task.created_at().format(TIMESTAMP_FORMAT),
        task.updated_at().format(TIMESTAMP_FORMAT),
        task.description()
    )
}
