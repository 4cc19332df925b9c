use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

use u_forecast::forecast::{ForecastEngine, ForecastSummary};
use u_forecast::io::{pivot_rows, read_request, write_report, PIVOT_HEADERS};
use u_forecast::io::workbook::PIVOT_SHEET;
use u_forecast::ForecastError;

fn write_input(path: &Path) {
    let mut workbook = Workbook::new();

    let team = workbook.add_worksheet();
    team.set_name("Team").unwrap();
    for (col, h) in ["Team", "Head Count", "Productivity", "Week Capacity"].iter().enumerate() {
        team.write_string(0, col as u16, *h).unwrap();
    }
    team.write_string(1, 0, "Core").unwrap();
    team.write_number(1, 1, 4.0).unwrap();
    team.write_number(1, 2, 1.0).unwrap();
    team.write_number(1, 3, 10.0).unwrap();
    team.write_string(2, 0, "Mobile").unwrap();
    team.write_number(2, 1, 2.0).unwrap();
    team.write_number(2, 2, 0.5).unwrap();
    team.write_number(2, 3, 4.0).unwrap();
    // Missing capacity, dropped on load
    team.write_string(3, 0, "Broken").unwrap();
    team.write_number(3, 1, 1.0).unwrap();

    let feature = workbook.add_worksheet();
    feature.set_name("Feature").unwrap();
    for (col, h) in ["Feature", "Priority", "Total Efforts"].iter().enumerate() {
        feature.write_string(0, col as u16, *h).unwrap();
    }
    for (row, (name, priority, total)) in [("F1", 1.0, 15.0), ("F2", 1.0, 5.0), ("F3", 2.0, 8.0)]
        .iter()
        .enumerate()
    {
        let row = row as u32 + 1;
        feature.write_string(row, 0, *name).unwrap();
        feature.write_number(row, 1, *priority).unwrap();
        feature.write_number(row, 2, *total).unwrap();
    }

    let planning = workbook.add_worksheet();
    planning.set_name("Planning").unwrap();
    for (col, h) in ["Team", "Feature", "Efforts"].iter().enumerate() {
        planning.write_string(0, col as u16, *h).unwrap();
    }
    for (row, (team, feature, efforts)) in [
        ("Core", "F1", Some(15.0)),
        ("Core", "F2", Some(5.0)),
        ("Core", "F3", Some(4.0)),
        ("Mobile", "F3", Some(4.0)),
        ("Mobile", "F1", None),
    ]
    .iter()
    .enumerate()
    {
        let row = row as u32 + 1;
        planning.write_string(row, 0, *team).unwrap();
        planning.write_string(row, 1, *feature).unwrap();
        if let Some(e) = efforts {
            planning.write_number(row, 2, *e).unwrap();
        }
    }

    workbook.save(path).unwrap();
}

fn text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => panic!("expected string, got {other:?}"),
    }
}

fn number(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        other => panic!("expected number, got {other:?}"),
    }
}

fn read_pivot(path: &Path) -> Vec<(String, f64, String, f64, String)> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(PIVOT_SHEET).unwrap();
    let mut rows = range.rows();

    let header: Vec<String> = rows.next().unwrap().iter().map(text).collect();
    assert_eq!(header, PIVOT_HEADERS);

    rows.map(|r| (text(&r[0]), number(&r[1]), text(&r[2]), number(&r[3]), text(&r[4])))
        .collect()
}

#[test]
fn test_load_forecast_and_write_pivot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("plan.xlsx");
    let output = dir.path().join("out.xlsx");
    write_input(&input);

    let request = read_request(&input).unwrap();
    assert_eq!(request.teams.len(), 2);
    assert_eq!(request.features.len(), 3);
    assert_eq!(request.allocations.len(), 4);

    let forecast = ForecastEngine::new().forecast_request(&request).unwrap();
    let rows = pivot_rows(&forecast, &request.features).unwrap();
    write_report(&input, &output, &rows).unwrap();

    let pivot = read_pivot(&output);
    let expected = vec![
        ("F2", 1.0, "Week 1", 5.0, "Core"),
        ("F1", 1.0, "Week 1", 5.0, "Core"),
        ("F1", 1.0, "Week 2", 10.0, "Core"),
        ("F3", 2.0, "Week 3", 4.0, "Core"),
        ("F3", 2.0, "Week 1", 4.0, "Mobile"),
    ];
    assert_eq!(pivot.len(), expected.len());
    for (actual, exp) in pivot.iter().zip(&expected) {
        assert_eq!(actual.0, exp.0);
        assert!((actual.1 - exp.1).abs() < 1e-9);
        assert_eq!(actual.2, exp.2);
        assert!((actual.3 - exp.3).abs() < 1e-9);
        assert_eq!(actual.4, exp.4);
    }

    let summary = ForecastSummary::calculate(&forecast, &request.teams);
    assert_eq!(summary.team("Core").unwrap().last_week, 3);
    assert_eq!(summary.team("Mobile").unwrap().last_week, 1);
}

#[test]
fn test_rewrite_in_place_keeps_input_sheets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.xlsx");
    write_input(&path);

    for _ in 0..2 {
        let request = read_request(&path).unwrap();
        let forecast = ForecastEngine::new().forecast_request(&request).unwrap();
        let rows = pivot_rows(&forecast, &request.features).unwrap();
        write_report(&path, &path, &rows).unwrap();
    }

    let workbook = open_workbook_auto(&path).unwrap();
    let names = workbook.sheet_names();
    assert_eq!(names, vec!["Team", "Feature", "Planning", PIVOT_SHEET]);
    // Re-running replaces the pivot sheet instead of appending to it
    assert_eq!(read_pivot(&path).len(), 5);
}

#[test]
fn test_missing_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet().set_name("Team").unwrap();
    workbook.save(&path).unwrap();

    let err = read_request(&path).unwrap_err();
    assert!(matches!(err, ForecastError::MissingSheet(ref s) if s == "Feature"));
}
