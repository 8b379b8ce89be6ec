//! Typed endpoint wrappers over [`ApiClient::request`].

use reqwest::Method;
use serde::de::IgnoredAny;

use super::client::{ApiClient, ACTION_TIMEOUT_SECS, AUTH_TIMEOUT_SECS, LIST_TIMEOUT_SECS};
use super::models::{
    ActionResult, AddonCatalog, AssignedSshKey, CreatedSshKey, FriendlyNameRequest,
    InventoryUnit, NewSshKey, OperatingSystem, OrderReceipt, OsList, PowerStatus, PxeRequest,
    ReinstallRequest, RemoteAccess, RenameSshKey, Server, ServerDetail, SshKey, SshKeyIds,
    UserDetails,
};
use super::traits::ApiError;
use crate::order::OrderDraft;

/// Power operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    On,
    Off,
    Reboot,
}

impl PowerAction {
    fn segment(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Reboot => "reboot",
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "power on"),
            Self::Off => write!(f, "power off"),
            Self::Reboot => write!(f, "reboot"),
        }
    }
}

/// Remote console flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKind {
    /// Serial-over-LAN.
    Sol,
    /// IPMI iKVM.
    Ikvm,
}

impl ConsoleKind {
    fn segment(self) -> &'static str {
        match self {
            Self::Sol => "sol",
            Self::Ikvm => "ikvm",
        }
    }
}

impl std::fmt::Display for ConsoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sol => write!(f, "SOL"),
            Self::Ikvm => write!(f, "iKVM"),
        }
    }
}

impl ApiClient {
    // ------------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------------

    /// List all servers in the account.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn list_servers(&self) -> Result<Vec<Server>, ApiError> {
        self.get(LIST_TIMEOUT_SECS, "/servers").await
    }

    /// Full detail for one server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn server_detail(&self, resource_id: &str) -> Result<ServerDetail, ApiError> {
        self.get(LIST_TIMEOUT_SECS, &format!("/servers/{resource_id}"))
            .await
    }

    /// Whether the server is powered on.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn power_status(&self, server_id: &str) -> Result<bool, ApiError> {
        let status: PowerStatus = self
            .get(LIST_TIMEOUT_SECS, &format!("/servers/{server_id}/power/status"))
            .await?;
        Ok(status.is_powered_on)
    }

    /// SSH keys currently assigned to a server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn server_ssh_keys(&self, server_id: &str) -> Result<Vec<AssignedSshKey>, ApiError> {
        self.get(LIST_TIMEOUT_SECS, &format!("/servers/{server_id}/ssh-keys"))
            .await
    }

    /// Send a power action. Returns the provider's `success` flag.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn power(&self, resource_id: &str, action: PowerAction) -> Result<bool, ApiError> {
        let result: ActionResult = self
            .post_empty(
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/power/{}", action.segment()),
            )
            .await?;
        Ok(result.success)
    }

    /// Request a remote console link.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn remote_console(
        &self,
        resource_id: &str,
        kind: ConsoleKind,
    ) -> Result<String, ApiError> {
        let access: RemoteAccess = self
            .post_empty(
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/remote-access/{}", kind.segment()),
            )
            .await?;
        Ok(access.redirect)
    }

    /// Point the server at a custom iPXE script; the provider reboots it.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn set_pxe_url(&self, resource_id: &str, url: &str) -> Result<(), ApiError> {
        let body = PxeRequest {
            pxe_script_url: url.to_string(),
        };
        let _: Option<IgnoredAny> = self
            .send_json(
                Method::PUT,
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/set-pxe"),
                &body,
            )
            .await?;
        Ok(())
    }

    /// Set the friendly name of a server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn set_friendly_name(&self, resource_id: &str, name: &str) -> Result<(), ApiError> {
        let body = FriendlyNameRequest {
            friendly_name: name.to_string(),
        };
        let _: Option<IgnoredAny> = self
            .send_json(
                Method::PUT,
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/friendly-name"),
                &body,
            )
            .await?;
        Ok(())
    }

    /// Operating systems installable on a server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn os_list(&self, resource_id: &str) -> Result<Vec<OperatingSystem>, ApiError> {
        let list: OsList = self
            .get(
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/provision/os-list"),
            )
            .await?;
        Ok(list.os_list)
    }

    /// Reinstall the operating system. Returns the provider's `success` flag.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn reinstall(
        &self,
        resource_id: &str,
        os_image_id: &str,
        reason: &str,
    ) -> Result<bool, ApiError> {
        let body = ReinstallRequest {
            os_image_id: os_image_id.to_string(),
            reason: reason.to_string(),
        };
        let result: ActionResult = self
            .send_json(
                Method::POST,
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/provision/reload-os"),
                &body,
            )
            .await?;
        Ok(result.success)
    }

    // ------------------------------------------------------------------
    // SSH keys
    // ------------------------------------------------------------------

    /// List every SSH key in the account.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>, ApiError> {
        self.get(LIST_TIMEOUT_SECS, "/ssh-keys").await
    }

    /// Upload a new SSH key and return its ID.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn add_ssh_key(&self, label: &str, public_key: &str) -> Result<u64, ApiError> {
        let body = NewSshKey {
            label: label.to_string(),
            public_key: public_key.to_string(),
        };
        let created: CreatedSshKey = self
            .send_json(Method::POST, ACTION_TIMEOUT_SECS, "/ssh-keys", &body)
            .await?;
        Ok(created.id)
    }

    /// Delete an SSH key.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn delete_ssh_key(&self, key_id: u64) -> Result<(), ApiError> {
        let _: Option<IgnoredAny> = self
            .delete(ACTION_TIMEOUT_SECS, &format!("/ssh-keys/{key_id}"))
            .await?;
        Ok(())
    }

    /// Change the label of an SSH key.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn rename_ssh_key(&self, key_id: u64, label: &str) -> Result<(), ApiError> {
        let body = RenameSshKey {
            label: label.to_string(),
        };
        let _: Option<IgnoredAny> = self
            .send_json(
                Method::PUT,
                ACTION_TIMEOUT_SECS,
                &format!("/ssh-keys/{key_id}"),
                &body,
            )
            .await?;
        Ok(())
    }

    /// Replace the set of SSH keys assigned to a server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn assign_ssh_keys(
        &self,
        resource_id: &str,
        key_ids: &[u64],
    ) -> Result<bool, ApiError> {
        let body = SshKeyIds {
            ssh_key_ids: key_ids.to_vec(),
        };
        self.send_json(
            Method::PATCH,
            ACTION_TIMEOUT_SECS,
            &format!("/servers/{resource_id}/ssh-keys/assign"),
            &body,
        )
        .await
    }

    /// Remove SSH keys from a server.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn unassign_ssh_keys(
        &self,
        resource_id: &str,
        key_ids: &[u64],
    ) -> Result<(), ApiError> {
        let body = SshKeyIds {
            ssh_key_ids: key_ids.to_vec(),
        };
        let _: Option<IgnoredAny> = self
            .send_json(
                Method::PATCH,
                ACTION_TIMEOUT_SECS,
                &format!("/servers/{resource_id}/ssh-keys/un-assign"),
                &body,
            )
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Raw per-batch inventory.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn fetch_inventory(&self) -> Result<Vec<InventoryUnit>, ApiError> {
        self.get(ACTION_TIMEOUT_SECS, "/server-orders/inventory")
            .await
    }

    /// Add-ons (operating systems, licenses, support) for a SKU in a location.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn list_addons(&self, sku: &str, location: &str) -> Result<AddonCatalog, ApiError> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("sku_product_name", sku)
            .append_pair("location_code", location)
            .finish();
        self.get(
            ACTION_TIMEOUT_SECS,
            &format!("/server-orders/list-addons?{query}"),
        )
        .await
    }

    /// Submit an order.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn place_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        self.send_json(
            Method::POST,
            ACTION_TIMEOUT_SECS,
            "/server-orders/order",
            draft,
        )
        .await
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Profile of the token's owner; used to verify credentials.
    ///
    /// # Errors
    /// Any [`ApiError`] from the request.
    pub async fn user_details(&self) -> Result<UserDetails, ApiError> {
        self.get(AUTH_TIMEOUT_SECS, "/user/details").await
    }
}
