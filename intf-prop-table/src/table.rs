use conf_tree_core::{parse, ConfigTree, LineId, ParseError, Syntax};
use thiserror::Error;

use crate::ios::{self, IosRecord};
use crate::junos::{self, JunosRecord};
use crate::record::{resolve_hostname, InterfaceRecord, InterfaceRow};

/// Errors raised while building a [`PropTable`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The input declares no hostname.
    #[error("no hostname declaration found in config")]
    MissingHostname,
    /// The input could not be parsed into a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One interface anchor: the interface line, plus the unit line for a Junos
/// logical sub-interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    intf: LineId,
    unit: Option<LineId>,
}

/// Interface property table for one device config.
///
/// Owns the parsed tree; records are lightweight views referencing it and
/// never outlive the table.
#[derive(Debug)]
pub struct PropTable {
    syntax: Syntax,
    hostname: String,
    tree: ConfigTree,
    anchors: Vec<Anchor>,
}

/// Parse raw config text and build the per-interface property table.
///
/// Fails when the text cannot be parsed or declares no hostname; every
/// property miss below that level degrades to an absent value instead.
pub fn parse_config(text: &str, syntax: Syntax) -> Result<PropTable, BuildError> {
    let tree = parse(text, syntax)?;
    let hostname_pattern = match syntax {
        Syntax::Ios => &ios::PATTERNS.hostname,
        Syntax::Junos => &junos::PATTERNS.hostname,
    };
    let hostname =
        resolve_hostname(&tree, hostname_pattern).ok_or(BuildError::MissingHostname)?;
    let anchors = match syntax {
        Syntax::Ios => ios_anchors(&tree),
        Syntax::Junos => junos_anchors(&tree),
    };
    Ok(PropTable {
        syntax,
        hostname,
        tree,
        anchors,
    })
}

fn ios_anchors(tree: &ConfigTree) -> Vec<Anchor> {
    tree.find_objects(&ios::PATTERNS.interface_line)
        .into_iter()
        .map(|intf| Anchor { intf, unit: None })
        .collect()
}

/// A physical interface is listed first, immediately followed by its
/// declared units in declaration order.
fn junos_anchors(tree: &ConfigTree) -> Vec<Anchor> {
    let Some(root) = tree
        .find_objects(&junos::PATTERNS.interfaces_root)
        .into_iter()
        .find(|&id| tree.parent(id).is_none())
    else {
        return Vec::new();
    };

    let mut anchors = Vec::new();
    for &intf in tree.children(root) {
        anchors.push(Anchor { intf, unit: None });
        for unit in tree.search_children(intf, junos::PATTERNS.unit.regex(), false) {
            anchors.push(Anchor {
                intf,
                unit: Some(unit),
            });
        }
    }
    anchors
}

impl PropTable {
    /// Device hostname.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Parsed configuration tree.
    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// One record view per interface anchor, in discovery order.
    pub fn records(&self) -> impl Iterator<Item = Box<dyn InterfaceRecord + '_>> {
        self.anchors.iter().map(|&anchor| self.record_at(anchor))
    }

    /// Materialize all rows by reading the nine accessors per record.
    pub fn rows(&self) -> Vec<InterfaceRow> {
        self.records()
            .map(|record| InterfaceRow::from_record(record.as_ref()))
            .collect()
    }

    fn record_at(&self, anchor: Anchor) -> Box<dyn InterfaceRecord + '_> {
        match self.syntax {
            Syntax::Ios => Box::new(IosRecord::new(&self.tree, &self.hostname, anchor.intf)),
            Syntax::Junos => Box::new(JunosRecord::new(
                &self.tree,
                &self.hostname,
                anchor.intf,
                anchor.unit,
            )),
        }
    }
}
