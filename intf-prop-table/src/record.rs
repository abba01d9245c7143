use std::fmt::{self, Display, Formatter};

use conf_tree_core::{ConfigTree, TypedPattern};
use regex::Regex;
use serde::Serialize;

/// Layer-2 mode of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwitchportMode {
    Access,
    Trunk,
    None,
}

impl Display for SwitchportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            SwitchportMode::Access => "ACCESS",
            SwitchportMode::Trunk => "TRUNK",
            SwitchportMode::None => "NONE",
        };
        write!(f, "{label}")
    }
}

/// Per-interface property accessors shared by both vendor dialects.
///
/// Every accessor is a soft query against the shared immutable tree: a miss
/// yields an absent/default value, never an error. `switchport` is always
/// derived from the mode and never stored independently.
pub trait InterfaceRecord {
    /// Qualified `hostname[interface]` name.
    fn interface(&self) -> String;
    /// Switchport mode (ACCESS/TRUNK/NONE).
    fn switchport_mode(&self) -> SwitchportMode;
    /// Access VLAN id.
    fn access_vlan(&self) -> Option<u16>;
    /// Trunk VLAN ids (e.g. `"1,3,5-8"`).
    fn allowed_vlans(&self) -> Option<String>;
    /// Owning aggregate interface name, for LAG members.
    fn channel_group(&self) -> Option<String>;
    /// Member interface names, for LAG aggregates.
    fn channel_group_members(&self) -> Vec<String>;
    /// Primary IPv4 address in CIDR form.
    fn primary_address(&self) -> Option<String>;
    /// VRF / routing-instance name.
    fn vrf(&self) -> String;

    /// True for any layer-2 bridged port.
    fn switchport(&self) -> bool {
        self.switchport_mode() != SwitchportMode::None
    }
}

/// Capture the device hostname from the first matching declaration.
pub(crate) fn resolve_hostname(tree: &ConfigTree, pattern: &TypedPattern) -> Option<String> {
    tree.first_match_typed(pattern)
}

/// Qualified `hostname[interface]` display form.
pub(crate) fn host_interface(hostname: &str, interface: &str) -> String {
    format!("{hostname}[{interface}]")
}

pub(crate) fn typed(pattern: &str) -> TypedPattern {
    TypedPattern::new(pattern).expect("static typed pattern")
}

pub(crate) fn plain(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

/// One materialized table row (the fixed nine-column schema).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceRow {
    #[serde(rename = "Interface")]
    pub interface: String,
    #[serde(rename = "Access_VLAN")]
    pub access_vlan: Option<u16>,
    #[serde(rename = "Allowed_VLANs")]
    pub allowed_vlans: Option<String>,
    #[serde(rename = "Channel_Group")]
    pub channel_group: Option<String>,
    #[serde(rename = "Channel_Group_Members")]
    pub channel_group_members: Vec<String>,
    #[serde(rename = "Primary_Address")]
    pub primary_address: Option<String>,
    #[serde(rename = "Switchport")]
    pub switchport: bool,
    #[serde(rename = "Switchport_mode")]
    pub switchport_mode: SwitchportMode,
    #[serde(rename = "VRF")]
    pub vrf: String,
}

impl InterfaceRow {
    /// Read all nine properties out of a record.
    pub fn from_record(record: &dyn InterfaceRecord) -> Self {
        Self {
            interface: record.interface(),
            access_vlan: record.access_vlan(),
            allowed_vlans: record.allowed_vlans(),
            channel_group: record.channel_group(),
            channel_group_members: record.channel_group_members(),
            primary_address: record.primary_address(),
            switchport: record.switchport(),
            switchport_mode: record.switchport_mode(),
            vrf: record.vrf(),
        }
    }
}

/// Column names in presentation order.
pub const COLUMNS: [&str; 9] = [
    "Interface",
    "Access_VLAN",
    "Allowed_VLANs",
    "Channel_Group",
    "Channel_Group_Members",
    "Primary_Address",
    "Switchport",
    "Switchport_mode",
    "VRF",
];
