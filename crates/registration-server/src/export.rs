//! Phone masking and downloadable exports.

use registration_store::Registration;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};

/// Fixed download filename for the XLSX export.
pub const EXCEL_FILENAME: &str = "data_pendaftaran.xlsx";

/// Fixed download filename for the JSON export.
pub const JSON_FILENAME: &str = "data_pendaftaran.json";

/// Content type for XLSX workbooks.
pub const EXCEL_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Worksheet name in the exported workbook.
const WORKSHEET_NAME: &str = "Data Pendaftaran";

/// Header captions and column widths for the workbook, in column order.
const COLUMNS: [(&str, f64); 5] = [
    ("Name", 20.0),
    ("House Block", 15.0),
    ("Phone", 20.0),
    ("Category", 15.0),
    ("Event", 30.0),
];

/// Partially redact a phone number for on-screen display.
///
/// Keeps the first and last four characters and replaces everything in
/// between with `*`, preserving length. Numbers shorter than 8
/// characters are returned unchanged since masking them would leave
/// nothing visible worth showing.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 8 {
        return phone.to_string();
    }

    let first: String = chars[..4].iter().collect();
    let last: String = chars[chars.len() - 4..].iter().collect();
    let middle = "*".repeat(chars.len() - 8);
    format!("{first}{middle}{last}")
}

/// One exported row: the five business fields, unmasked.
///
/// Timestamps and store-internal identifiers never appear in exports.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,
    pub house_block: String,
    pub phone: String,
    pub category: String,
    pub event: String,
}

impl From<&Registration> for ExportRow {
    fn from(r: &Registration) -> Self {
        Self {
            name: r.name.clone(),
            house_block: r.house_block.clone(),
            phone: r.phone.clone(),
            category: r.category.clone(),
            event: r.event.clone(),
        }
    }
}

/// Serialize records into a pretty-printed JSON array.
pub fn to_json(records: &[Registration]) -> Result<Vec<u8>, serde_json::Error> {
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    serde_json::to_vec_pretty(&rows)
}

/// Build an XLSX workbook with a fixed header row and one row per record.
pub fn to_workbook(records: &[Registration]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_with_format(0, col, *header, &bold)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write(row, 0, record.name.as_str())?;
        worksheet.write(row, 1, record.house_block.as_str())?;
        worksheet.write(row, 2, record.phone.as_str())?;
        worksheet.write(row, 3, record.category.as_str())?;
        worksheet.write(row, 4, record.event.as_str())?;
    }

    workbook.save_to_buffer()
}
