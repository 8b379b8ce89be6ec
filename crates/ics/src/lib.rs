//! Ingenuity Cloud Services bare metal client.
//!
//! This crate provides a typed client for the ICS REST API plus the
//! logic behind the `ics-cli` commands: resolving service IDs and SSH key
//! names, aggregating inventory, assembling orders and composing server
//! details.
//!
//! # Example
//!
//! ```rust,ignore
//! use ics::api::{ApiClient, StaticToken};
//! use ics::inventory::{self, InventoryFilter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ApiClient::new(StaticToken::new("api_key"))?;
//!
//!     // Resolve a service ID to the server's resource ID
//!     let resource_id = ics::resolve::resolve_server(&client, 123_456).await?;
//!
//!     // Summarize what is in stock in NYC1
//!     let filter = InventoryFilter {
//!         location: "NYC1".into(),
//!         ..InventoryFilter::default()
//!     };
//!     let units = client.fetch_inventory().await?;
//!     for group in inventory::aggregate(&units, &filter) {
//!         println!("{} {} x{}", group.location_code, group.sku_name, group.total_quantity);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod detail;
pub mod display;
pub mod inventory;
pub mod order;
pub mod resolve;
pub mod sshkey;

pub use api::{ApiClient, ApiError, CredentialProvider, StaticToken, ValidationError};
pub use config::Config;
