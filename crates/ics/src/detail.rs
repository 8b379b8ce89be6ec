//! Server detail composition.
//!
//! Joins the server record with its assigned SSH keys and power state. The
//! server record itself is required; the other two are fetched best-effort
//! and degrade to [`Enrichment::Unavailable`] on failure.

use tracing::{debug, warn};

use crate::api::models::ServerDetail;
use crate::api::{ApiClient, ApiError};

/// Placeholder shown instead of the OS password.
pub const REDACTED: &str = "********";

/// What to include in a [`ServerDetailView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailOptions {
    /// Show the OS password instead of [`REDACTED`].
    pub show_password: bool,
    /// Fetch the power state.
    pub show_power: bool,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            show_password: false,
            show_power: true,
        }
    }
}

/// Outcome of a best-effort lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    /// The lookup succeeded.
    Available(T),
    /// The lookup failed; the reason has been logged.
    Unavailable,
    /// The lookup was not requested.
    Skipped,
}

impl<T> Enrichment<T> {
    fn from_result(what: &str, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(e) => {
                warn!(error = %e, "Unable to retrieve {what}");
                Self::Unavailable
            }
        }
    }
}

/// Display-ready server details.
///
/// Never holds the real password unless [`DetailOptions::show_password`] was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDetailView {
    pub service_id: u64,
    pub hostname: String,
    pub friendly_name: String,
    pub datacenter: String,
    pub operating_system: String,
    pub primary_ip: String,
    pub primary_mac: String,
    /// Non-primary addresses, in API order.
    pub secondary_ips: Vec<String>,
    pub username: String,
    pub password: String,
    /// Labels of the assigned SSH keys.
    pub ssh_keys: Enrichment<Vec<String>>,
    /// `true` when powered on.
    pub power: Enrichment<bool>,
}

impl ServerDetailView {
    fn from_detail(detail: ServerDetail, show_password: bool) -> Self {
        let password = if show_password {
            detail.operating_system_password
        } else {
            REDACTED.to_string()
        };

        Self {
            service_id: detail.service_id,
            hostname: detail.hostname,
            friendly_name: detail.friendly_name,
            datacenter: detail.datacenter_name,
            operating_system: detail.operating_system_name,
            primary_ip: detail.public_ip,
            primary_mac: detail.mac_address,
            secondary_ips: detail
                .ip_addresses
                .into_iter()
                .filter(|ip| !ip.is_primary)
                .map(|ip| ip.ip_address)
                .collect(),
            username: detail.operating_system_username,
            password,
            ssh_keys: Enrichment::Skipped,
            power: Enrichment::Skipped,
        }
    }
}

/// Fetch and compose the detail view for a server.
///
/// Requests run one after another: detail, assigned SSH keys, then power state.
///
/// # Errors
/// Any [`ApiError`] from the server detail request. Failures of the SSH key
/// and power requests are reported through [`Enrichment::Unavailable`].
pub async fn compose(
    client: &ApiClient,
    resource_id: &str,
    options: DetailOptions,
) -> Result<ServerDetailView, ApiError> {
    let detail = client.server_detail(resource_id).await?;
    let server_id = detail.id.clone();
    debug!(resource_id, server_id = %server_id, "Fetched server detail");

    let mut view = ServerDetailView::from_detail(detail, options.show_password);

    let keys = client
        .server_ssh_keys(&server_id)
        .await
        .map(|keys| keys.into_iter().map(|k| k.label).collect::<Vec<_>>());
    view.ssh_keys = Enrichment::from_result("SSH keys", keys);

    if options.show_power {
        view.power = Enrichment::from_result("power status", client.power_status(&server_id).await);
    }

    Ok(view)
}
