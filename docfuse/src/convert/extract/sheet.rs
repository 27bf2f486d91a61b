//! Spreadsheets and CSV, rendered as fixed-width text tables.

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

use super::Extractor;
use crate::classify::extension;
use crate::error::{DocFuseError, Result};

/// Widest a rendered column gets; longer cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 30;

const COLUMN_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";
const EMPTY_SHEET: &str = "(empty sheet)";

/// One worksheet as rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Worksheet name.
    pub name: String,
    /// Cell text, row-major. Rows may be ragged.
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|cell| cell.is_empty())
    }
}

/// Extracts XLSX/XLS/ODS workbooks through calamine and CSV through the
/// csv reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetExtractor;

impl SheetExtractor {
    fn sheets(&self, name: &str, bytes: &[u8]) -> Result<Vec<Sheet>> {
        if extension(name).as_deref() == Some("csv") {
            Ok(vec![read_csv(name, bytes)?])
        } else {
            read_workbook(name, bytes)
        }
    }
}

impl Extractor for SheetExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> String {
        match self.sheets(name, bytes) {
            Ok(sheets) => render_sheets(&sheets),
            Err(err) => {
                tracing::warn!(name, error = %err, "spreadsheet could not be parsed");
                format!("Error reading spreadsheet: {err}")
            }
        }
    }
}

fn read_workbook(name: &str, bytes: &[u8]) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DocFuseError::conversion(name, e.to_string()))?;

    let mut sheets = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| DocFuseError::conversion(name, format!("sheet {sheet_name}: {e}")))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        sheets.push(Sheet {
            name: sheet_name,
            rows,
        });
    }
    Ok(sheets)
}

fn read_csv(name: &str, bytes: &[u8]) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| DocFuseError::conversion(name, e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    Ok(Sheet {
        name: "Sheet1".to_string(),
        rows,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Render every sheet with its banner, separated by blank lines.
pub fn render_sheets(sheets: &[Sheet]) -> String {
    sheets
        .iter()
        .map(|sheet| format!("=== Sheet: {} ===\n{}", sheet.name, render_table(sheet)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one sheet as a fixed-width table.
///
/// The first row is treated as the header and followed by a rule.
pub fn render_table(sheet: &Sheet) -> String {
    if sheet.is_empty() {
        return EMPTY_SHEET.to_string();
    }

    let columns = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in &sheet.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count().min(MAX_COLUMN_WIDTH));
        }
    }

    let mut lines = Vec::with_capacity(sheet.rows.len() + 1);
    for (index, row) in sheet.rows.iter().enumerate() {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let truncated: String = cell.chars().take(MAX_COLUMN_WIDTH).collect();
                format!("{truncated:<width$}")
            })
            .collect();
        lines.push(cells.join(COLUMN_SEPARATOR));

        if index == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(rule.join(RULE_SEPARATOR));
        }
    }

    lines.join("\n")
}
