//! Resolution of user-facing identifiers to provider records.
//!
//! The API has no lookup by service ID or by SSH key label, so each resolution
//! fetches the full list and scans it in the order the API returned it. The
//! first exact match wins; when labels are duplicated the winner depends on the
//! provider's ordering, which is not guaranteed to be stable.

use tracing::debug;

use crate::api::models::SshKey;
use crate::api::{ApiClient, ApiError, ValidationError};

/// First item in `items` satisfying `predicate`, in iteration order.
pub fn find_first<I, P>(items: I, mut predicate: P) -> Option<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    items.into_iter().find(|item| predicate(item))
}

/// Parse a user-supplied service ID.
///
/// # Errors
/// [`ValidationError::InvalidArgument`] when the input is not a non-negative integer.
pub fn parse_service_id(raw: &str) -> Result<u64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidArgument("Service ID must be a number".into()))
}

/// Resolve a service ID to the server's resource ID.
///
/// # Errors
/// [`ApiError::NotFound`] when no server carries `service_id`, or the list
/// call's own error.
pub async fn resolve_server(client: &ApiClient, service_id: u64) -> Result<String, ApiError> {
    let servers = client.list_servers().await?;
    debug!(service_id, candidates = servers.len(), "Resolving service ID");

    find_first(servers, |s| s.service_id == service_id)
        .map(|s| s.resource_id)
        .ok_or_else(|| ApiError::not_found(format!("server with Service ID {service_id}")))
}

/// Resolve an SSH key label (exact, case-sensitive) to its record.
///
/// # Errors
/// [`ApiError::NotFound`] when no key carries `label`, or the list call's own error.
pub async fn resolve_ssh_key(client: &ApiClient, label: &str) -> Result<SshKey, ApiError> {
    let keys = client.list_ssh_keys().await?;
    debug!(label, candidates = keys.len(), "Resolving SSH key label");

    find_ssh_key(&keys, label)
        .cloned()
        .ok_or_else(|| ApiError::not_found(format!("SSH Key with name {label}")))
}

/// Resolve several labels with a single list fetch.
///
/// Output order follows `labels`. Each label gets the first matching key.
///
/// # Errors
/// [`ValidationError::UnknownSshKey`] naming the first label without a match,
/// or the list call's own error.
pub async fn resolve_ssh_keys<S: AsRef<str>>(
    client: &ApiClient,
    labels: &[S],
) -> Result<Vec<SshKey>, ApiError> {
    if labels.is_empty() {
        return Ok(Vec::new());
    }

    let keys = client.list_ssh_keys().await?;
    debug!(
        labels = labels.len(),
        candidates = keys.len(),
        "Resolving SSH key labels"
    );

    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            find_ssh_key(&keys, label)
                .cloned()
                .ok_or_else(|| ApiError::from(ValidationError::UnknownSshKey(label.to_string())))
        })
        .collect()
}

fn find_ssh_key<'a>(keys: &'a [SshKey], label: &str) -> Option<&'a SshKey> {
    find_first(keys, |k| k.label == label)
}
