//! ICS API request and response models.
//!
//! Every response is wrapped in a `{statusCode, message, data}` envelope; the
//! types below describe the `data` payload of each endpoint.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Envelope
// ============================================================================

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Status code echoed by the API.
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<i64>,
    /// Human-readable message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Endpoint-specific payload.
    pub data: T,
}

/// `data` of mutating endpoints that report `{success: bool}`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ActionResult {
    /// Whether the provider accepted the action.
    #[serde(default)]
    pub success: bool,
}

/// Treat JSON `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept either a JSON string or number and keep it as an opaque string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

// ============================================================================
// Servers
// ============================================================================

/// A server as returned by `GET /servers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Server {
    /// Provider-internal ID required by mutating endpoints.
    #[serde(rename = "id", deserialize_with = "string_or_number")]
    pub resource_id: String,
    /// User-facing service ID.
    #[serde(default)]
    pub service_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datacenter_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub friendly_name: String,
    /// e.g. "dedicated".
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_type: String,
}

/// Full server record from `GET /servers/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerDetail {
    /// Numeric server ID used by the power and SSH key endpoints.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub service_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub friendly_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_ip: String,
    #[serde(rename = "datacenter", default, deserialize_with = "null_as_default")]
    pub datacenter_name: String,
    #[serde(
        rename = "operatingSystemId",
        default,
        deserialize_with = "string_or_number"
    )]
    pub operating_system_id: String,
    #[serde(rename = "operating_system", default, deserialize_with = "null_as_default")]
    pub operating_system_name: String,
    #[serde(rename = "operating_system_user", default, deserialize_with = "null_as_default")]
    pub operating_system_username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operating_system_password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_addresses: Vec<IpAddress>,
    #[serde(rename = "network_port", default, deserialize_with = "null_as_default")]
    pub network_ports: Vec<NetworkPort>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provisioning_status: ProvisioningStatus,
}

/// An IP address assigned to a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddress {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gateway: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub netmask: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub vlan_id: String,
}

/// A physical network port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPort {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub port_number: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mac_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_speed: String,
}

/// Provisioning progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningStatus {
    #[serde(default)]
    pub is_provisioning: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_message: String,
}

/// `data` of `GET /servers/{id}/power/status`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PowerStatus {
    pub is_powered_on: bool,
}

/// An SSH key assigned to a server, from `GET /servers/{id}/ssh-keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssignedSshKey {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// `data` of the remote-access endpoints (SOL, iKVM).
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAccess {
    /// Console URL.
    pub redirect: String,
}

/// `data` of `GET /servers/{id}/provision/os-list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsList {
    #[serde(rename = "osList", default, deserialize_with = "null_as_default")]
    pub os_list: Vec<OperatingSystem>,
}

/// An operating system image installable on a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperatingSystem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub licenses: Vec<String>,
}

impl OperatingSystem {
    /// Whether installing this image requires a license.
    #[must_use]
    pub fn requires_license(&self) -> bool {
        self.licenses.first().is_some_and(|l| !l.is_empty())
    }
}

/// Body of `POST /servers/{id}/provision/reload-os`.
#[derive(Debug, Serialize)]
pub struct ReinstallRequest {
    pub os_image_id: String,
    pub reason: String,
}

/// Body of `PUT /servers/{id}/set-pxe`.
#[derive(Debug, Serialize)]
pub struct PxeRequest {
    pub pxe_script_url: String,
}

/// Body of `PUT /servers/{id}/friendly-name`.
#[derive(Debug, Serialize)]
pub struct FriendlyNameRequest {
    pub friendly_name: String,
}

// ============================================================================
// SSH keys
// ============================================================================

/// An SSH key from `GET /ssh-keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SshKey {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    /// Public key material.
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assigned_servers: Vec<SshKeyServer>,
}

impl SshKey {
    /// Resource IDs of the servers this key is assigned to.
    #[must_use]
    pub fn assigned_resource_ids(&self) -> BTreeSet<&str> {
        self.assigned_servers
            .iter()
            .map(|s| s.server_id.as_str())
            .collect()
    }
}

/// A server an SSH key is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SshKeyServer {
    #[serde(default, deserialize_with = "string_or_number")]
    pub server_id: String,
    #[serde(default)]
    pub service_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datacenter_name: String,
}

/// Body of `POST /ssh-keys`.
#[derive(Debug, Serialize)]
pub struct NewSshKey {
    pub label: String,
    pub public_key: String,
}

/// `data` of `POST /ssh-keys`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CreatedSshKey {
    pub id: u64,
}

/// Body of `PUT /ssh-keys/{id}`.
#[derive(Debug, Serialize)]
pub struct RenameSshKey {
    pub label: String,
}

/// Body of the assign / un-assign endpoints.
#[derive(Debug, Serialize)]
pub struct SshKeyIds {
    pub ssh_key_ids: Vec<u64>,
}

// ============================================================================
// Inventory and orders
// ============================================================================

/// One purchasable stock batch from `GET /server-orders/inventory`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InventoryUnit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_code: String,
    #[serde(rename = "sku_product_name", default, deserialize_with = "null_as_default")]
    pub sku_name: String,
    /// Unit price as sent by the API; usually a decimal string.
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub sku_id: i64,
    #[serde(rename = "auto_provision_quantity", default)]
    pub auto_provision_qty: i64,
    #[serde(default)]
    pub datacenter_id: i64,
    #[serde(default)]
    pub region_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_brand: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_model: String,
    #[serde(default)]
    pub cpu_clock_speed_ghz: f64,
    #[serde(default)]
    pub cpu_cores: i64,
    #[serde(default)]
    pub cpu_count: i64,
    #[serde(default)]
    pub total_ssd_size_gb: i64,
    #[serde(default)]
    pub total_hdd_size_gb: i64,
    #[serde(default)]
    pub total_nvme_size_gb: i64,
    #[serde(default)]
    pub raid_enabled: bool,
    #[serde(default)]
    pub total_ram_gb: i64,
    #[serde(default)]
    pub nic_speed_mbps: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Vec<Metadata>,
}

/// Free-form inventory metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

/// `data` of `GET /server-orders/list-addons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddonCatalog {
    #[serde(default)]
    pub operating_systems: OsSection,
    #[serde(default)]
    pub licenses: LicenseSection,
    #[serde(default)]
    pub support_levels: SupportSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub required: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<OsProduct>,
}

/// An operating system offered with a SKU.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub os_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Number, `null`, or absent depending on the product.
    #[serde(default)]
    pub price_per_core: Option<serde_json::Value>,
}

impl OsProduct {
    /// Per-core monthly price, when the product is billed per core.
    #[must_use]
    pub fn per_core_price(&self) -> Option<f64> {
        self.price_per_core
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .filter(|p| *p > 0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<LicenseProduct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicenseProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<SupportProduct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

/// `data` of `POST /server-orders/order`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderReceipt {
    /// Service IDs created by the order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_service_ids: Vec<u64>,
}

// ============================================================================
// Account
// ============================================================================

/// `data` of `GET /user/details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDetails {
    #[serde(rename = "userProfile", default)]
    pub user_profile: UserProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}
