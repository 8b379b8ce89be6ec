//! SSH key helpers shared by the `sshkeys` commands.

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};

/// Key type prefixes accepted as the start of a public key line.
const KEY_PREFIXES: [&str; 4] = ["ssh-rsa", "ssh-ed25519", "ssh-dss", "ecdsa-sha2-"];

/// Extract the public key line from pasted or file-read input.
///
/// Returns the first line that starts with a known key type, trimmed. Input
/// without such a line is returned trimmed as-is.
#[must_use]
pub fn clean_public_key(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .lines()
        .map(str::trim)
        .find(|line| KEY_PREFIXES.iter().any(|p| line.starts_with(*p)))
        .unwrap_or(trimmed)
        .to_string()
}

/// Key IDs to send when adding `key_id` to a server's current keys.
///
/// The assign endpoint replaces the server's key set, so current keys are
/// kept and `key_id` is appended only if it is not already present.
#[must_use]
pub fn with_added_key(current: &[u64], key_id: u64) -> Vec<u64> {
    let mut ids = current.to_vec();
    if !ids.contains(&key_id) {
        ids.push(key_id);
    }
    ids
}

/// Assign one key to a server while keeping its existing keys.
///
/// The current assignment is read best-effort; if it cannot be read, only
/// `key_id` is sent. Returns the provider's result flag.
///
/// # Errors
/// Any [`ApiError`] from the assign request.
pub async fn assign_key(client: &ApiClient, resource_id: &str, key_id: u64) -> Result<bool, ApiError> {
    let current: Vec<u64> = match client.server_ssh_keys(resource_id).await {
        Ok(keys) => keys.into_iter().map(|k| k.id).collect(),
        Err(e) => {
            warn!(error = %e, resource_id, "Unable to read assigned SSH keys");
            Vec::new()
        }
    };

    let ids = with_added_key(&current, key_id);
    debug!(resource_id, ?ids, "Assigning SSH keys");
    client.assign_ssh_keys(resource_id, &ids).await
}
