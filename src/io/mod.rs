//! Input/output adapters around the forecast core.
//!
//! - **`workbook`**: reads the input sheets and writes the pivot sheet
//! - **`report`**: flattens a forecast into pivot rows (also as JSON)

pub mod report;
pub mod workbook;

pub use report::{pivot_rows, to_json, PivotRow, PIVOT_HEADERS};
pub use workbook::{read_request, write_report};
