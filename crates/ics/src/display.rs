//! Terminal presentation.
//!
//! Everything here consumes plain result structures and writes to stdout.
//! Diagnostics go through `tracing` to stderr instead.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone};
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::api::models::{AddonCatalog, OperatingSystem, Server, SshKey};
use crate::detail::{Enrichment, ServerDetailView};
use crate::inventory::InventoryGroup;
use crate::order::OrderDraft;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Messages
// ============================================================================

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print an informational message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("=== {title} ===").blue().bold());
}

fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{} {}", label.blue().bold(), value);
}

// ============================================================================
// Formatting
// ============================================================================

/// Prefix a price with `$` unless it already has one.
#[must_use]
pub fn format_price(raw: &str) -> String {
    if raw.starts_with('$') {
        raw.to_string()
    } else {
        format!("${raw}")
    }
}

/// Monthly add-on price: "Free", "$x.xx /mo" or "$x.xx per core /mo".
#[must_use]
pub fn addon_price(price: f64, per_core: Option<f64>) -> String {
    if let Some(per_core) = per_core.filter(|p| *p > 0.0) {
        return format!("${per_core:.2} per core /mo");
    }
    if price > 0.0 {
        format!("${price:.2} /mo")
    } else {
        "Free".to_string()
    }
}

/// Format a unix timestamp in local time.
#[must_use]
pub fn format_timestamp(secs: i64) -> String {
    format_timestamp_in(secs, &Local)
}

fn format_timestamp_in<Tz>(secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(secs, 0).map_or_else(
        || secs.to_string(),
        |utc| utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
    )
}

/// Servers whose datacenter contains `site`, ignoring case.
#[must_use]
pub fn servers_at_site<'a>(servers: &'a [Server], site: &str) -> Vec<&'a Server> {
    let site = site.to_lowercase();
    servers
        .iter()
        .filter(|s| site.is_empty() || s.datacenter_name.to_lowercase().contains(&site))
        .collect()
}

/// Servers grouped by datacenter name, groups sorted by name.
#[must_use]
pub fn group_by_datacenter<'a, I>(servers: I) -> BTreeMap<&'a str, Vec<&'a Server>>
where
    I: IntoIterator<Item = &'a Server>,
{
    let mut groups: BTreeMap<&str, Vec<&Server>> = BTreeMap::new();
    for server in servers {
        groups
            .entry(server.datacenter_name.as_str())
            .or_default()
            .push(server);
    }
    groups
}

// ============================================================================
// Tables
// ============================================================================

/// Build a table with a blue header and a yellow first column.
#[must_use]
pub fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Blue).add_attribute(Attribute::Bold)),
    );

    for row in rows {
        table.add_row(row.into_iter().enumerate().map(|(i, cell)| {
            if i == 0 {
                Cell::new(cell).fg(Color::Yellow)
            } else {
                Cell::new(cell)
            }
        }));
    }
    table
}

/// Print a table built by [`build_table`].
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

// ============================================================================
// Servers
// ============================================================================

/// Print servers in one table.
pub fn print_servers(servers: &[&Server]) {
    let rows: Vec<Vec<String>> = servers
        .iter()
        .map(|s| {
            vec![
                s.service_id.to_string(),
                s.hostname.clone(),
                s.public_ip.clone(),
                s.datacenter_name.clone(),
                s.friendly_name.clone(),
            ]
        })
        .collect();
    print_table(
        &["Service ID", "Hostname", "Primary IP", "Datacenter", "Friendly Name"],
        rows,
    );
}

/// Print one table per datacenter.
pub fn print_servers_by_datacenter(servers: &[&Server]) {
    for (datacenter, servers) in group_by_datacenter(servers.iter().copied()) {
        println!();
        print_field("Datacenter:", datacenter);
        let rows: Vec<Vec<String>> = servers
            .iter()
            .map(|s| {
                vec![
                    s.service_id.to_string(),
                    s.hostname.clone(),
                    s.public_ip.clone(),
                    s.friendly_name.clone(),
                ]
            })
            .collect();
        print_table(&["Service ID", "Hostname", "Primary IP", "Friendly Name"], rows);
    }
}

/// Print a composed server detail view.
pub fn print_server_detail(view: &ServerDetailView) {
    print_field("Server ID:", view.service_id);
    print_field("Hostname:", &view.hostname);
    print_field("Friendly Name:", &view.friendly_name);
    print_field("Datacenter:", &view.datacenter);
    print_field("Operating System:", &view.operating_system);

    print_section("NETWORK INFORMATION");
    print_field("Primary IP Address:", &view.primary_ip);
    print_field("Primary MAC Address:", &view.primary_mac);
    for ip in &view.secondary_ips {
        print_field("Secondary IP Address:", ip);
    }

    print_section("CREDENTIALS");
    print_field("Username:", &view.username);
    print_field("Password:", &view.password);
    match &view.ssh_keys {
        Enrichment::Available(labels) if labels.is_empty() => print_field("Assigned SSH Keys:", "None"),
        Enrichment::Available(labels) => print_field("Assigned SSH Keys:", labels.join(", ")),
        Enrichment::Unavailable => {
            print_field("Assigned SSH Keys:", "Unable to retrieve SSH keys".red());
        }
        Enrichment::Skipped => {}
    }

    match view.power {
        Enrichment::Available(on) => {
            print_section("POWER STATUS");
            let state = if on {
                "Powered On".green()
            } else {
                "Powered Off".red()
            };
            print_field("Power State:", state);
        }
        Enrichment::Unavailable => {
            print_section("POWER STATUS");
            print_field("Power State:", "UNKNOWN".red());
        }
        Enrichment::Skipped => {}
    }
}

/// Print installable operating systems.
pub fn print_os_list(systems: &[OperatingSystem]) {
    let rows: Vec<Vec<String>> = systems
        .iter()
        .map(|os| {
            let license = if os.requires_license() { "Yes" } else { "No" };
            vec![os.id.clone(), os.name.clone(), license.to_string()]
        })
        .collect();
    print_table(&["ID", "Name", "License Required"], rows);
}

// ============================================================================
// Inventory and orders
// ============================================================================

/// Print aggregated inventory.
pub fn print_inventory(groups: &[InventoryGroup]) {
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.location_code.clone(),
                g.sku_name.clone(),
                format_price(&g.price),
                g.total_quantity.to_string(),
            ]
        })
        .collect();
    print_table(
        &["Location", "Server Type", "Price (USD)", "Available Quantity"],
        rows,
    );
}

/// Print the add-ons available for a SKU.
pub fn print_addons(catalog: &AddonCatalog) {
    let oses = &catalog.operating_systems;
    if !oses.products.is_empty() {
        println!("\n{}", oses.name.green().bold());
        let rows: Vec<Vec<String>> = oses
            .products
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.os_type.clone(),
                    p.product_code.clone(),
                    addon_price(p.price, p.per_core_price()),
                ]
            })
            .collect();
        print_table(&["Name", "Type", "Product Code", "Price"], rows);
    }

    let licenses = &catalog.licenses;
    if !licenses.products.is_empty() {
        println!("\n{}", licenses.name.green().bold());
        let rows: Vec<Vec<String>> = licenses
            .products
            .iter()
            .map(|p| vec![p.name.clone(), p.product_code.clone(), addon_price(p.price, None)])
            .collect();
        print_table(&["Name", "Product Code", "Price"], rows);
    }

    let support = &catalog.support_levels;
    if !support.products.is_empty() {
        println!("\n{}", support.name.green().bold());
        let rows: Vec<Vec<String>> = support
            .products
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.description.clone(),
                    p.product_code.clone(),
                    addon_price(p.price, None),
                ]
            })
            .collect();
        print_table(&["Name", "Description", "Product Code", "Price"], rows);
    }
}

/// Print an order draft ahead of confirmation.
pub fn print_order_draft(draft: &OrderDraft) {
    print_section("Order Details");
    print_field("Server Type:", &draft.sku);
    print_field("Datacenter:", &draft.location);
    print_field("Operating System:", &draft.os_code);
    print_field("Quantity:", draft.quantity);
    if let Some(license) = &draft.license {
        print_field("License:", license);
    }
    if let Some(bandwidth) = draft.bandwidth_tb {
        print_field("Additional Bandwidth:", format!("{bandwidth} TB"));
    }
    if let Some(support) = &draft.support {
        print_field("Support Level:", support);
    }
    if !draft.ssh_key_ids.is_empty() {
        print_field("SSH Keys:", format!("{:?}", draft.ssh_key_ids));
    }
}

// ============================================================================
// SSH keys
// ============================================================================

/// Print SSH keys in a table.
pub fn print_ssh_keys(keys: &[SshKey]) {
    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|k| {
            vec![
                k.label.clone(),
                format_timestamp(k.created_at),
                format_timestamp(k.updated_at),
                k.assigned_servers.len().to_string(),
            ]
        })
        .collect();
    print_table(
        &["Key Name", "Created At", "Updated At", "Assigned To Servers"],
        rows,
    );
}

/// Print one SSH key with its key material.
pub fn print_ssh_key(key: &SshKey) {
    print_field("Name:", &key.label);
    print_field("Created At:", format_timestamp(key.created_at));
    print_field("Updated At:", format_timestamp(key.updated_at));
    print_field("Assigned to servers:", key.assigned_servers.len());
    println!("{}\n{}", "SSH Key:".blue().bold(), key.key);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn server(service_id: u64, datacenter: &str) -> Server {
        Server {
            resource_id: format!("srv-{service_id}"),
            service_id,
            datacenter_name: datacenter.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("99.00"), "$99.00");
        assert_eq!(format_price("$99.00"), "$99.00");
    }

    #[test]
    fn test_addon_price() {
        assert_eq!(addon_price(0.0, None), "Free");
        assert_eq!(addon_price(25.0, None), "$25.00 /mo");
        assert_eq!(addon_price(0.0, Some(2.5)), "$2.50 per core /mo");
        assert_eq!(addon_price(10.0, Some(0.0)), "$10.00 /mo");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp_in(0, &Utc), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp_in(1_700_000_000, &Utc), "2023-11-14 22:13:20");
        assert_eq!(format_timestamp(1_700_000_000).len(), 19);
    }

    #[test]
    fn test_servers_at_site_is_substring_ignoring_case() {
        let servers = vec![
            server(1, "New York 1"),
            server(2, "London"),
            server(3, "NEW JERSEY"),
        ];

        let ids: Vec<u64> = servers_at_site(&servers, "new")
            .iter()
            .map(|s| s.service_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(servers_at_site(&servers, "").len(), 3);
        assert!(servers_at_site(&servers, "tokyo").is_empty());
    }

    #[test]
    fn test_group_by_datacenter_sorted() {
        let servers = vec![server(1, "NYC1"), server(2, "AMS1"), server(3, "NYC1")];

        let groups = group_by_datacenter(&servers);
        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["AMS1", "NYC1"]);
        assert_eq!(groups["NYC1"].len(), 2);
    }

    #[test]
    fn test_build_table_holds_header_and_rows() {
        let rows = vec![
            vec!["1".to_string(), "a-long-hostname".to_string()],
            vec!["123456".to_string(), "b".to_string()],
        ];
        let mut table = build_table(&["Service ID", "Host"], rows);

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        for text in ["Service ID", "Host", "a-long-hostname", "123456"] {
            assert!(rendered.contains(text), "{text} missing from:\n{rendered}");
        }
    }
}
