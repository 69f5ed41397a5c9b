//! Workbook loading.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

/// A worksheet as text: the header row and the data rows below it.
#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Split rows at `header_row` (1-based, counted from the top of the
    /// sheet). `first_row` is the 0-based sheet row of `rows[0]`.
    pub fn from_rows(rows: Vec<Vec<String>>, first_row: usize, header_row: usize) -> Result<Self> {
        if header_row == 0 {
            bail!("header row is 1-based");
        }
        let Some(skip) = (header_row - 1).checked_sub(first_row) else {
            bail!("header row {header_row} lies above the used range of the sheet");
        };
        let mut rows = rows.into_iter().skip(skip);
        let headers = rows
            .next()
            .with_context(|| format!("sheet has no row {header_row}"))?;
        Ok(Self {
            headers,
            rows: rows.collect(),
        })
    }
}

/// Read `sheet` (first sheet when `None`) from the workbook at `path`.
pub fn load(path: &Path, sheet: Option<&str>, header_row: usize) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open workbook {}", path.display()))?;
    let name = match sheet {
        Some(name) => name.to_owned(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context("workbook has no sheet")?,
    };
    let range = workbook
        .worksheet_range(&name)
        .with_context(|| format!("read sheet {name}"))?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    tracing::debug!(sheet = %name, first_row, "sheet loaded");
    Table::from_rows(rows, first_row, header_row)
}

/// Cell rendered as text. Whole floats lose their fractional part so numeric
/// codes read back as typed.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

/// Whether every cell of `row` is blank.
pub fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
