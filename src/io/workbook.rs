//! Spreadsheet adapters.
//!
//! Reads the `Team`, `Feature`, and `Planning` sheets of a workbook into a
//! [`ForecastRequest`] and writes the forecast back as a `Pivot Data` sheet.
//!
//! ## Input Structure
//!
//! ```text
//! Sheet: Team
//! | Team     | Head Count | Productivity | Week Capacity |
//! | Platform | 5          | 0.8          | 20            |
//!
//! Sheet: Feature
//! | Feature | Priority | Total Efforts |
//! | Login   | 1        | 35            |
//!
//! Sheet: Planning
//! | Team     | Feature | Efforts |
//! | Platform | Login   | 15      |
//! ```
//!
//! The first row of each sheet is a header. Rows with a blank or
//! mistyped required cell are dropped.
//!
//! Writing produces a fresh workbook holding the input sheets' cell values
//! (formatting is not carried over) plus the pivot sheet.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, warn};

use super::report::{PivotRow, PIVOT_HEADERS};
use crate::error::{ForecastError, Result};
use crate::forecast::ForecastRequest;
use crate::models::{Allocation, Feature, Team};

/// Team sheet name.
pub const TEAM_SHEET: &str = "Team";
/// Feature sheet name.
pub const FEATURE_SHEET: &str = "Feature";
/// Planning sheet name.
pub const PLANNING_SHEET: &str = "Planning";
/// Output sheet name.
pub const PIVOT_SHEET: &str = "Pivot Data";

/// Loads teams, features, and planned allocations from a workbook.
pub fn read_request(path: impl AsRef<Path>) -> Result<ForecastRequest> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let mut range_of = |name: &str| -> Result<Range<Data>> {
        if !names.iter().any(|n| n == name) {
            return Err(ForecastError::MissingSheet(name.to_string()));
        }
        Ok(workbook.worksheet_range(name)?)
    };

    let teams = parse_teams(&range_of(TEAM_SHEET)?);
    let features = parse_features(&range_of(FEATURE_SHEET)?);
    let allocations = parse_planning(&range_of(PLANNING_SHEET)?);

    debug!(
        path = %path.display(),
        teams = teams.len(),
        features = features.len(),
        allocations = allocations.len(),
        "workbook loaded"
    );
    Ok(ForecastRequest::new(teams, features, allocations))
}

/// Writes `rows` as the pivot sheet of a copy of the `input` workbook.
///
/// `output` may equal `input`; the input is fully read before saving.
/// An existing pivot sheet in the input is replaced.
pub fn write_report(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    rows: &[PivotRow],
) -> Result<()> {
    let mut source = open_workbook_auto(input.as_ref())?;
    let mut sheets = Vec::new();
    for name in source.sheet_names() {
        if name == PIVOT_SHEET {
            continue;
        }
        let range = source.worksheet_range(&name)?;
        sheets.push((name, range));
    }
    drop(source);

    let mut workbook = Workbook::new();
    for (name, range) in &sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        copy_range(sheet, range)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(PIVOT_SHEET)?;
    write_pivot(sheet, rows)?;

    workbook.save(output.as_ref())?;
    debug!(
        output = %output.as_ref().display(),
        rows = rows.len(),
        "pivot sheet written"
    );
    Ok(())
}

/// Parses the `Team` sheet.
pub fn parse_teams(range: &Range<Data>) -> Vec<Team> {
    parse_sheet(range, TEAM_SHEET, |row| {
        let name = cell_text(row.first()?)?;
        let head_count = u32::try_from(cell_integer(row.get(1)?)?).ok()?;
        let productivity = cell_number(row.get(2)?)?;
        let week_capacity = cell_number(row.get(3)?)?;
        Some(
            Team::new(name, week_capacity)
                .with_head_count(head_count)
                .with_productivity(productivity),
        )
    })
}

/// Parses the `Feature` sheet.
pub fn parse_features(range: &Range<Data>) -> Vec<Feature> {
    parse_sheet(range, FEATURE_SHEET, |row| {
        let name = cell_text(row.first()?)?;
        let priority = cell_integer(row.get(1)?)?;
        let total_efforts = cell_number(row.get(2)?)?;
        Some(Feature::new(name, priority).with_total_efforts(total_efforts))
    })
}

/// Parses the `Planning` sheet.
pub fn parse_planning(range: &Range<Data>) -> Vec<Allocation> {
    parse_sheet(range, PLANNING_SHEET, |row| {
        let team = cell_text(row.first()?)?;
        let feature = cell_text(row.get(1)?)?;
        let efforts = cell_number(row.get(2)?)?;
        Some(Allocation::new(team, feature, efforts))
    })
}

fn parse_sheet<T>(
    range: &Range<Data>,
    sheet: &str,
    parse_row: impl Fn(&[Data]) -> Option<T>,
) -> Vec<T> {
    data_rows(range)
        .filter_map(|(line, row)| {
            let parsed = parse_row(row);
            if parsed.is_none() {
                warn!(sheet, line, "dropping incomplete row");
            }
            parsed
        })
        .collect()
}

/// Rows after the header with their 1-based sheet line numbers.
fn data_rows(range: &Range<Data>) -> impl Iterator<Item = (u32, &[Data])> {
    let first_line = range.start().map_or(1, |(row, _)| row + 1);
    range
        .rows()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| !row.iter().all(|c| matches!(c, Data::Empty)))
        .map(move |(i, row)| (first_line + i as u32, row))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Data::Int(i) => Some(i.to_string()),
        // Integral floats within the exact range render without a decimal point
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            Some(format!("{}", *f as i64))
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_integer(cell: &Data) -> Option<i64> {
    let n = cell_number(cell)?;
    (n.is_finite() && n.fract() == 0.0).then_some(n as i64)
}

fn copy_range(sheet: &mut Worksheet, range: &Range<Data>) -> Result<()> {
    let (row0, col0) = range.start().unwrap_or((0, 0));
    for (r, c, cell) in range.used_cells() {
        let row = row0 + r as u32;
        let Ok(col) = u16::try_from(col0 as usize + c) else {
            continue;
        };
        match cell {
            Data::Int(i) => {
                sheet.write_number(row, col, *i as f64)?;
            }
            Data::Float(f) => {
                sheet.write_number(row, col, *f)?;
            }
            Data::DateTime(dt) => {
                sheet.write_number(row, col, dt.as_f64())?;
            }
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                sheet.write_string(row, col, s)?;
            }
            Data::Bool(b) => {
                sheet.write_boolean(row, col, *b)?;
            }
            Data::Error(_) | Data::Empty => {}
        }
    }
    Ok(())
}

fn write_pivot(sheet: &mut Worksheet, rows: &[PivotRow]) -> Result<()> {
    let header = Format::new().set_bold();
    for (col, title) in PIVOT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let line = i as u32 + 1;
        sheet.write_string(line, 0, &row.feature)?;
        sheet.write_number(line, 1, row.rank as f64)?;
        sheet.write_string(line, 2, &row.week)?;
        sheet.write_number(line, 3, row.effort)?;
        sheet.write_string(line, 4, &row.team)?;
    }
    Ok(())
}
