//! Inventory workbook writer
//!
//! Writes records at the fixed column positions of the integrated inventory
//! template's worksheet. Unset fields leave their cell untouched so the
//! renderer's output distinguishes "no value" from an empty string.

use crate::inventory::record::InventoryRecord;
use crate::settings::ReportSettings;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

// Template column positions (0-based).
const COL_UNIQUE_ID: u16 = 0;
const COL_IP_ADDRESS: u16 = 1;
const COL_IS_VIRTUAL: u16 = 2;
const COL_IS_PUBLIC: u16 = 3;
const COL_DNS_NAME: u16 = 4;
const COL_MAC_ADDRESS: u16 = 6;
const COL_AUTHENTICATED_SCAN: u16 = 7;
const COL_BASELINE_CONFIG: u16 = 8;
const COL_ASSET_TYPE: u16 = 11;
const COL_HARDWARE_MODEL: u16 = 12;
const COL_SOFTWARE_VENDOR: u16 = 14;
const COL_SOFTWARE_PRODUCT: u16 = 15;
const COL_LABEL: u16 = 17;
const COL_NETWORK_ID: u16 = 20;
const COL_OWNER: u16 = 21;

const HEADERS: &[(u16, &str)] = &[
    (COL_UNIQUE_ID, "Unique Asset Identifier"),
    (COL_IP_ADDRESS, "IPv4 or IPv6 Address"),
    (COL_IS_VIRTUAL, "Virtual"),
    (COL_IS_PUBLIC, "Public"),
    (COL_DNS_NAME, "DNS Name or URL"),
    (COL_MAC_ADDRESS, "MAC Address"),
    (COL_AUTHENTICATED_SCAN, "Authenticated Scan"),
    (COL_BASELINE_CONFIG, "Baseline Configuration Name"),
    (COL_ASSET_TYPE, "Asset Type"),
    (COL_HARDWARE_MODEL, "Hardware Make/Model"),
    (COL_SOFTWARE_VENDOR, "Software/Database Vendor"),
    (COL_SOFTWARE_PRODUCT, "Software/Database Name & Version"),
    (COL_LABEL, "Diagram Label"),
    (COL_NETWORK_ID, "VLAN/Network ID"),
    (COL_OWNER, "System Owner"),
];

/// Write the inventory into a workbook at `path`.
pub fn write_report(
    records: &[InventoryRecord],
    settings: &ReportSettings,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(&settings.worksheet_name)
        .context("naming report worksheet")?;

    let header_format = Format::new().set_bold();
    for (column, title) in HEADERS {
        sheet.write_string_with_format(0, *column, *title, &header_format)?;
    }

    let mut row = settings.first_writable_row.saturating_sub(1);

    tracing::info!(
        "writing {} rows into worksheet {} starting at row {}",
        records.len(),
        settings.worksheet_name,
        row + 1
    );

    for record in records {
        write_record(sheet, row, record)?;
        row += 1;
    }

    workbook
        .save(path)
        .with_context(|| format!("saving inventory workbook to {}", path.display()))?;

    tracing::info!("completed saving inventory into {}", path.display());

    Ok(())
}

fn write_record(sheet: &mut Worksheet, row: u32, record: &InventoryRecord) -> Result<()> {
    sheet.write_string(row, COL_UNIQUE_ID, &record.unique_id)?;
    sheet.write_string(row, COL_ASSET_TYPE, &record.asset_type)?;

    let text_cells = [
        (COL_IP_ADDRESS, &record.ip_address),
        (COL_DNS_NAME, &record.dns_name),
        (COL_MAC_ADDRESS, &record.mac_address),
        (COL_BASELINE_CONFIG, &record.baseline_config),
        (COL_HARDWARE_MODEL, &record.hardware_model),
        (COL_SOFTWARE_VENDOR, &record.software_vendor),
        (COL_SOFTWARE_PRODUCT, &record.software_product_name),
        (COL_LABEL, &record.label),
        (COL_NETWORK_ID, &record.network_id),
        (COL_OWNER, &record.owner),
    ];
    for (column, value) in text_cells {
        if let Some(value) = value {
            sheet.write_string(row, column, value)?;
        }
    }

    let tri_cells = [
        (COL_IS_VIRTUAL, record.is_virtual),
        (COL_IS_PUBLIC, record.is_public),
        (COL_AUTHENTICATED_SCAN, record.authenticated_scan_planned),
    ];
    for (column, value) in tri_cells {
        if let Some(value) = value {
            sheet.write_string(row, column, value.as_str())?;
        }
    }

    Ok(())
}
