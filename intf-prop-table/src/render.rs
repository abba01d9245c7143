use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::record::{InterfaceRow, COLUMNS};
use crate::table::PropTable;

/// JSON payload for `--format json`.
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub hostname: String,
    pub rows: Vec<InterfaceRow>,
}

impl TableReport {
    pub fn new(table: &PropTable) -> Self {
        Self {
            hostname: table.hostname().to_string(),
            rows: table.rows(),
        }
    }
}

/// Render rows as an aligned text table with the fixed nine-column header.
pub fn render_table(rows: &[InterfaceRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(COLUMNS);
    for row in rows {
        builder.push_record(row_cells(row));
    }
    builder.build().with(Style::sharp()).to_string()
}

/// Render rows as RFC-4180 CSV, same header and cell conventions as the
/// text table.
pub fn render_csv(rows: &[InterfaceRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.write_record(row_cells(row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Absent values render as empty cells; member lists join with `,`.
fn row_cells(row: &InterfaceRow) -> Vec<String> {
    vec![
        row.interface.clone(),
        row.access_vlan
            .map(|vlan| vlan.to_string())
            .unwrap_or_default(),
        row.allowed_vlans.clone().unwrap_or_default(),
        row.channel_group.clone().unwrap_or_default(),
        row.channel_group_members.join(","),
        row.primary_address.clone().unwrap_or_default(),
        row.switchport.to_string(),
        row.switchport_mode.to_string(),
        row.vrf.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use conf_tree_core::Syntax;

    use super::{render_csv, render_table, TableReport};
    use crate::table::parse_config;

    const CONFIG: &str = concat!(
        "hostname sw1\n",
        "interface Gi0/3\n",
        " channel-group 5 mode active\n",
        "interface Gi0/4\n",
        " channel-group 5 mode active\n",
        "interface Port-channel5\n",
        " switchport mode trunk\n",
        " switchport trunk allowed vlan 10,20\n",
    );

    #[test]
    fn text_table_carries_header_and_joined_members() {
        let table = parse_config(CONFIG, Syntax::Ios).expect("table");
        let rendered = render_table(&table.rows());

        assert!(rendered.contains("Interface"));
        assert!(rendered.contains("Channel_Group_Members"));
        assert!(rendered.contains("sw1[Port-channel5]"));
        assert!(rendered.contains("Gi0/3,Gi0/4"));
    }

    #[test]
    fn csv_quotes_cells_that_contain_commas() {
        let table = parse_config(CONFIG, Syntax::Ios).expect("table");
        let csv = render_csv(&table.rows()).expect("csv");
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some(
                "Interface,Access_VLAN,Allowed_VLANs,Channel_Group,Channel_Group_Members,\
                 Primary_Address,Switchport,Switchport_mode,VRF"
            )
        );
        assert!(csv.contains("\"Gi0/3,Gi0/4\""));
        assert!(csv.contains("\"10,20\""));
    }

    #[test]
    fn json_report_names_every_column() {
        let table = parse_config(CONFIG, Syntax::Ios).expect("table");
        let report = serde_json::to_value(TableReport::new(&table)).expect("json");

        assert_eq!(report["hostname"], "sw1");
        let row = &report["rows"][2];
        assert_eq!(row["Interface"], "sw1[Port-channel5]");
        assert_eq!(row["Switchport_mode"], "TRUNK");
        assert_eq!(row["Switchport"], true);
        assert_eq!(row["Channel_Group_Members"][0], "Gi0/3");
    }
}
