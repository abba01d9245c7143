use conf_tree_core::{normalize_cidr, ConfigTree, LineId, TypedPattern};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{host_interface, plain, typed, InterfaceRecord, SwitchportMode};

/// Compiled Junos pattern catalogue, one shared immutable table for every
/// record.
pub(crate) struct JunosPatterns {
    /// `host-name` on Junos proper, `hostname` on lookalikes.
    pub hostname: TypedPattern,
    pub interfaces_root: Regex,
    pub first_token: TypedPattern,
    pub aggregate_name: Regex,
    pub unit: TypedPattern,
    pub vlan_tagging: Regex,
    pub vlan_id: TypedPattern,
    pub gigether_options: Regex,
    pub lag_parent: TypedPattern,
    /// Anchored so `family inet6` never matches.
    pub family_inet: Regex,
    pub address: TypedPattern,
    pub routing_instances: Regex,
}

pub(crate) static PATTERNS: Lazy<JunosPatterns> = Lazy::new(|| JunosPatterns {
    hostname: typed(r"host-?name\s+(\S+)"),
    interfaces_root: plain(r"^interfaces$"),
    first_token: typed(r"(\S+)"),
    aggregate_name: plain(r"^ae\d+"),
    unit: typed(r"^unit\s+(\d+)"),
    vlan_tagging: plain(r"(?:flexible-)?vlan-tagging"),
    vlan_id: typed(r"vlan-id\s+(\d+)"),
    gigether_options: plain(r"^gigether-options$"),
    lag_parent: typed(r"802\.3ad\s+(\S+)"),
    family_inet: plain(r"family\s+inet$"),
    address: typed(r"address\s+(\S+)"),
    routing_instances: plain(r"^routing-instances$"),
});

/// Property view over one Junos interface, or one of its logical units.
///
/// `unit` is `None` for the physical interface itself; a unit record is
/// named `"<physical>.<unit-number>"`.
pub struct JunosRecord<'a> {
    tree: &'a ConfigTree,
    hostname: &'a str,
    intf: LineId,
    unit: Option<LineId>,
}

impl<'a> JunosRecord<'a> {
    pub fn new(
        tree: &'a ConfigTree,
        hostname: &'a str,
        intf: LineId,
        unit: Option<LineId>,
    ) -> Self {
        Self {
            tree,
            hostname,
            intf,
            unit,
        }
    }

    fn is_unit(&self) -> bool {
        self.unit.is_some()
    }

    fn name(&self) -> Option<String> {
        let base = self.tree.match_typed(self.intf, &PATTERNS.first_token)?;
        match self.unit {
            Some(unit) => {
                let number = self.tree.match_typed(unit, &PATTERNS.unit)?;
                Some(format!("{base}.{number}"))
            }
            None => Some(base),
        }
    }

    fn is_aggregate(&self) -> bool {
        self.name()
            .is_some_and(|name| PATTERNS.aggregate_name.is_match(&name))
    }

    /// Name of the routing instance whose subtree declares this unit.
    fn attached_instance(&self) -> Option<String> {
        let name = self.name()?;
        let member = Regex::new(&format!(r"interface\s+{}$", regex::escape(&name))).ok()?;
        let root = self
            .tree
            .find_objects(&PATTERNS.routing_instances)
            .into_iter()
            .find(|&id| self.tree.parent(id).is_none())?;
        self.tree
            .children(root)
            .iter()
            .copied()
            .find(|&instance| !self.tree.search_children(instance, &member, true).is_empty())
            .and_then(|instance| self.tree.match_typed(instance, &PATTERNS.first_token))
    }
}

impl InterfaceRecord for JunosRecord<'_> {
    fn interface(&self) -> String {
        host_interface(self.hostname, self.name().as_deref().unwrap_or_default())
    }

    fn switchport_mode(&self) -> SwitchportMode {
        if self.is_unit() {
            return SwitchportMode::None;
        }
        if self.allowed_vlans().is_some() {
            SwitchportMode::Trunk
        } else {
            SwitchportMode::None
        }
    }

    fn access_vlan(&self) -> Option<u16> {
        // access VLAN derivation is not defined for this dialect
        None
    }

    fn allowed_vlans(&self) -> Option<String> {
        if self.is_unit() {
            return None;
        }
        if self
            .tree
            .search_children(self.intf, &PATTERNS.vlan_tagging, false)
            .is_empty()
        {
            return None;
        }
        let ids: Vec<String> = self
            .tree
            .search_children(self.intf, PATTERNS.vlan_id.regex(), true)
            .into_iter()
            .filter_map(|id| self.tree.match_typed(id, &PATTERNS.vlan_id))
            .collect();
        if ids.is_empty() {
            None
        } else {
            Some(ids.join(","))
        }
    }

    fn channel_group(&self) -> Option<String> {
        if self.is_unit() || self.is_aggregate() {
            return None;
        }
        let options = *self
            .tree
            .search_children(self.intf, &PATTERNS.gigether_options, false)
            .first()?;
        self.tree
            .match_iter_typed(options, &PATTERNS.lag_parent, false)
    }

    fn channel_group_members(&self) -> Vec<String> {
        if self.is_unit() || !self.is_aggregate() {
            return Vec::new();
        }
        let Some(name) = self.name() else {
            return Vec::new();
        };
        // end-anchored so ae1 does not collect ae10's members
        let Ok(member_line) = Regex::new(&format!(r"802\.3ad\s+{}$", regex::escape(&name))) else {
            return Vec::new();
        };
        self.tree
            .find_objects(&member_line)
            .into_iter()
            .filter_map(|id| {
                // 802.3ad line -> gigether-options block -> owning interface
                let options = self.tree.parent(id)?;
                let owner = self.tree.parent(options)?;
                self.tree.match_typed(owner, &PATTERNS.first_token)
            })
            .collect()
    }

    fn primary_address(&self) -> Option<String> {
        let unit = self.unit?;
        let inet = *self
            .tree
            .search_children(unit, &PATTERNS.family_inet, false)
            .first()?;
        let value = self.tree.match_iter_typed(inet, &PATTERNS.address, false)?;
        normalize_cidr(&value).ok()
    }

    fn vrf(&self) -> String {
        // layer-3 gate: an addressless interface never joins an instance
        if self.primary_address().is_none() {
            return "default".to_string();
        }
        self.attached_instance()
            .unwrap_or_else(|| "default".to_string())
    }
}
