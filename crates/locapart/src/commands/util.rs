//! Shared helpers for command handlers.

use std::sync::Arc;

use locapart_core::{Resource, ResourceClient};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Load the collection and return entry `id`, or a `NotFound` error
/// pointing at the matching list command.
pub async fn require<T: Resource>(
    client: &ResourceClient<T>,
    id: i64,
) -> Result<Arc<T>, CliError> {
    let list = client.list().await?;
    list.iter()
        .find(|item| item.id() == id)
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource: T::NAME.into(),
            id,
            list_command: format!("{}s list", T::NAME),
        })
}

/// Resolve an optional label: `None` keeps `current`, a label that does
/// not match resolves to `None` so validation reports it.
pub fn relabel(label: Option<&str>, current: Option<i64>, resolved: Option<i64>) -> Option<i64> {
    match label {
        Some(_) => resolved,
        None => current,
    }
}
