//! Interface property table extraction for network device configurations.
//!
//! Given raw config text in one of two dialects (IOS-style indented,
//! Junos-style brace-nested), this library derives a fixed nine-column table
//! of per-interface properties: switchport mode, VLAN membership,
//! link-aggregation relationships in both directions, primary IPv4 address,
//! and VRF/routing-instance membership.
//!
//! # Architecture
//!
//! - [`record`] — the [`record::InterfaceRecord`] capability contract shared
//!   by both dialects, plus the materialized row type
//! - [`ios`] — IOS-style derivations over indented interface blocks
//! - [`junos`] — Junos-style derivations over physical interfaces and their
//!   logical units
//! - [`table`] — anchor discovery and table assembly ([`table::parse_config`])
//! - [`render`] — text table, CSV, and JSON presentation
//! - [`inspect`] — parsed-tree visualization for debugging dialect quirks
//!
//! Tree parsing and regex querying live in `conf-tree-core`; everything
//! vendor-specific is contained here.
//!
//! # Example
//!
//! ```ignore
//! use conf_tree_core::Syntax;
//! use intf_prop_table::table::parse_config;
//!
//! let table = parse_config(&config_text, Syntax::Ios)?;
//! println!("hostname = {}", table.hostname());
//! for row in table.rows() {
//!     println!("{} vrf={}", row.interface, row.vrf);
//! }
//! ```

pub mod inspect;
pub mod ios;
pub mod junos;
pub mod record;
pub mod render;
pub mod table;
