use conf_tree_core::{normalize_cidr, ConfigTree, LineId, TypedPattern};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{host_interface, plain, typed, InterfaceRecord, SwitchportMode};

/// Compiled IOS pattern catalogue, one shared immutable table for every
/// record.
pub(crate) struct IosPatterns {
    pub hostname: TypedPattern,
    pub interface: TypedPattern,
    pub interface_line: Regex,
    pub switchport_mode: TypedPattern,
    pub access_vlan: TypedPattern,
    pub allowed_vlans: TypedPattern,
    pub channel_group: TypedPattern,
    /// `Port-channel`/`Port-Channel` both occur in the wild.
    pub aggregate_intf: TypedPattern,
    pub aggregate_name: TypedPattern,
    /// `addr mask` and `addr/prefix` both occur; normalized downstream.
    pub ipv4_address: TypedPattern,
    pub vrf: TypedPattern,
}

pub(crate) static PATTERNS: Lazy<IosPatterns> = Lazy::new(|| IosPatterns {
    hostname: typed(r"^hostname\s+(.+)"),
    interface: typed(r"interface\s+(\S+)"),
    interface_line: plain(r"^interface\s+\S+"),
    switchport_mode: typed(r"(?i)switchport\s+mode\s+(\w+)"),
    access_vlan: typed(r"switchport\s+access\s+vlan\s+(\d+)"),
    allowed_vlans: typed(r"switchport\s+trunk\s+allowed\s+vlan\s+(\S+)"),
    channel_group: typed(r"channel-group\s+(\d+)"),
    aggregate_intf: typed(r"(?i)^interface\s+Port-channel(\d+)"),
    aggregate_name: typed(r"(?i)^Port-channel(\d+)"),
    ipv4_address: typed(r"ip(?:v4)?\s+address\s+(.+)$"),
    vrf: typed(r"ip\s+vrf\s+forwarding\s+(\S+)"),
});

/// Property view over one IOS interface block.
pub struct IosRecord<'a> {
    tree: &'a ConfigTree,
    hostname: &'a str,
    intf: LineId,
}

impl<'a> IosRecord<'a> {
    pub fn new(tree: &'a ConfigTree, hostname: &'a str, intf: LineId) -> Self {
        Self {
            tree,
            hostname,
            intf,
        }
    }

    fn name(&self) -> Option<String> {
        self.tree.match_typed(self.intf, &PATTERNS.interface)
    }

    /// Aggregate number of this record's own name, when it names a
    /// Port-channel interface.
    fn own_aggregate_number(&self) -> Option<u32> {
        let name = self.name()?;
        PATTERNS.aggregate_name.capture(&name)?.parse().ok()
    }
}

impl InterfaceRecord for IosRecord<'_> {
    fn interface(&self) -> String {
        host_interface(self.hostname, self.name().as_deref().unwrap_or_default())
    }

    fn switchport_mode(&self) -> SwitchportMode {
        if let Some(mode) = self
            .tree
            .match_iter_typed(self.intf, &PATTERNS.switchport_mode, false)
        {
            if mode.eq_ignore_ascii_case("access") {
                return SwitchportMode::Access;
            }
            if mode.eq_ignore_ascii_case("trunk") {
                return SwitchportMode::Trunk;
            }
        }
        // vEOS-style access ports omit the explicit mode line
        if !self
            .tree
            .search_children(self.intf, PATTERNS.access_vlan.regex(), false)
            .is_empty()
        {
            return SwitchportMode::Access;
        }
        SwitchportMode::None
    }

    fn access_vlan(&self) -> Option<u16> {
        self.tree
            .match_iter_typed(self.intf, &PATTERNS.access_vlan, false)?
            .parse()
            .ok()
    }

    fn allowed_vlans(&self) -> Option<String> {
        self.tree
            .match_iter_typed(self.intf, &PATTERNS.allowed_vlans, false)
    }

    fn channel_group(&self) -> Option<String> {
        let group: u32 = self
            .tree
            .match_iter_typed(self.intf, &PATTERNS.channel_group, false)?
            .parse()
            .ok()?;
        // group ids compare as integers; leading zeros occur in the wild
        self.tree
            .find_objects(PATTERNS.aggregate_intf.regex())
            .into_iter()
            .find(|&id| {
                self.tree
                    .match_typed(id, &PATTERNS.aggregate_intf)
                    .and_then(|number| number.parse::<u32>().ok())
                    == Some(group)
            })
            .and_then(|id| self.tree.match_typed(id, &PATTERNS.interface))
    }

    fn channel_group_members(&self) -> Vec<String> {
        let Some(group) = self.own_aggregate_number() else {
            return Vec::new();
        };
        let Ok(member_line) = Regex::new(&format!(r"channel-group\s+0*{group}(\s|$)")) else {
            return Vec::new();
        };
        self.tree
            .find_objects_with_all_children(&PATTERNS.interface_line, &[member_line])
            .into_iter()
            .filter_map(|id| self.tree.match_typed(id, &PATTERNS.interface))
            .collect()
    }

    fn primary_address(&self) -> Option<String> {
        let value = self
            .tree
            .match_iter_typed(self.intf, &PATTERNS.ipv4_address, false)?;
        // malformed values degrade to absent for this record
        normalize_cidr(&value).ok()
    }

    fn vrf(&self) -> String {
        self.tree
            .match_iter_typed(self.intf, &PATTERNS.vrf, false)
            .unwrap_or_else(|| "default".to_string())
    }
}

#[cfg(test)]
mod tests {
    use conf_tree_core::{parse, ConfigTree, Syntax};
    use pretty_assertions::assert_eq;

    use super::{IosRecord, PATTERNS};
    use crate::record::{InterfaceRecord, SwitchportMode};

    fn tree(config: &str) -> ConfigTree {
        parse(config, Syntax::Ios).expect("parse")
    }

    fn record_for<'a>(tree: &'a ConfigTree, name: &str) -> IosRecord<'a> {
        let anchor = tree
            .find_objects(&PATTERNS.interface_line)
            .into_iter()
            .find(|&id| tree.text(id) == format!("interface {name}"))
            .expect("anchor");
        IosRecord::new(tree, "sw1", anchor)
    }

    #[test]
    fn trunk_mode_and_allowed_vlans_are_captured() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Gi0/2\n",
            " switchport mode trunk\n",
            " switchport trunk allowed vlan 10,20\n",
        ));
        let record = record_for(&tree, "Gi0/2");

        assert_eq!(record.interface(), "sw1[Gi0/2]");
        assert_eq!(record.switchport_mode(), SwitchportMode::Trunk);
        assert!(record.switchport());
        assert_eq!(record.allowed_vlans().as_deref(), Some("10,20"));
        assert_eq!(record.access_vlan(), None);
    }

    #[test]
    fn access_vlan_implies_access_mode_without_a_mode_line() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Et1\n",
            " switchport access vlan 30\n",
        ));
        let record = record_for(&tree, "Et1");

        assert_eq!(record.switchport_mode(), SwitchportMode::Access);
        assert_eq!(record.access_vlan(), Some(30));
    }

    #[test]
    fn routed_port_is_not_a_switchport() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Gi0/5\n",
            " ip address 10.1.1.1 255.255.255.252\n",
        ));
        let record = record_for(&tree, "Gi0/5");

        assert_eq!(record.switchport_mode(), SwitchportMode::None);
        assert!(!record.switchport());
        assert_eq!(record.primary_address().as_deref(), Some("10.1.1.1/30"));
    }

    #[test]
    fn aggregation_is_bidirectional() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Gi0/3\n",
            " channel-group 5 mode active\n",
            "interface Gi0/4\n",
            " channel-group 5 mode active\n",
            "interface Port-channel5\n",
            " switchport mode trunk\n",
        ));

        let member = record_for(&tree, "Gi0/3");
        assert_eq!(member.channel_group().as_deref(), Some("Port-channel5"));
        assert!(member.channel_group_members().is_empty());

        let aggregate = record_for(&tree, "Port-channel5");
        assert_eq!(aggregate.channel_group(), None);
        assert_eq!(aggregate.channel_group_members(), vec!["Gi0/3", "Gi0/4"]);
    }

    #[test]
    fn channel_group_ids_compare_as_integers() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Gi0/3\n",
            " channel-group 05 mode active\n",
            "interface Port-Channel5\n",
        ));

        let member = record_for(&tree, "Gi0/3");
        assert_eq!(member.channel_group().as_deref(), Some("Port-Channel5"));

        let aggregate = record_for(&tree, "Port-Channel5");
        assert_eq!(aggregate.channel_group_members(), vec!["Gi0/3"]);
    }

    #[test]
    fn vrf_defaults_without_a_forwarding_line() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Vlan10\n",
            " ip vrf forwarding CUST-A\n",
            " ip address 192.168.10.1 255.255.255.0\n",
            "interface Vlan20\n",
            " ip address 192.168.20.1 255.255.255.0\n",
        ));

        assert_eq!(record_for(&tree, "Vlan10").vrf(), "CUST-A");
        assert_eq!(record_for(&tree, "Vlan20").vrf(), "default");
    }

    #[test]
    fn malformed_address_degrades_to_absent() {
        let tree = tree(concat!(
            "hostname sw1\n",
            "interface Gi0/7\n",
            " ip address dhcp\n",
        ));
        assert_eq!(record_for(&tree, "Gi0/7").primary_address(), None);
    }
}
