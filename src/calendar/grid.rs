use chrono::{Datelike, NaiveDate};

use crate::calendar::date::{week_contains, weeks_after};
use crate::foundation::error::{LifegridError, LifegridResult};

/// Number of week columns in every grid row.
pub const WEEK_COLUMNS: usize = 52;

/// Fill classification for one week cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellClass {
    /// Plain week.
    Normal,
    /// Week containing the birthday anniversary.
    Birthday,
    /// Week containing January 1st.
    NewYear,
}

/// One week cell, positioned and classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Row index from the top, 0-based.
    pub row: usize,
    /// Column index from the left, `0..WEEK_COLUMNS`.
    pub col: usize,
    /// First day of the represented week.
    pub week_start: NaiveDate,
    /// Fill classification.
    pub class: CellClass,
    /// Whether the week lies strictly before the darken boundary.
    pub darkened: bool,
}

/// Side length of one week box.
///
/// The grid fills the vertical band between the margins and every row
/// spends `box_margin` on inter-row spacing. A geometry that leaves no
/// positive box size is a [`LifegridError::LayoutInfeasible`].
pub fn cell_box_size(
    page_height: f64,
    top_margin: f64,
    bottom_margin: f64,
    rows: u32,
    box_margin: f64,
) -> LifegridResult<f64> {
    let size = (page_height - top_margin - bottom_margin) / f64::from(rows) - box_margin;
    if !size.is_finite() || size <= 0.0 {
        return Err(LifegridError::layout_infeasible(format!(
            "{rows} rows in a {page_height}pt page leave no positive box size"
        )));
    }
    Ok(size)
}

/// Left offset that centers a [`WEEK_COLUMNS`]-wide row on the page.
pub fn grid_x_margin(page_width: f64, box_size: f64, box_margin: f64) -> f64 {
    (page_width - (box_size + box_margin) * WEEK_COLUMNS as f64) / 2.0
}

/// Build every row of week cells.
///
/// Row `r` starts `r * 52` weeks after `start`; column `c` adds `c` more
/// weeks. Rows therefore advance top-to-bottom and columns left-to-right
/// in strict date order, which the row-label emission relies on.
///
/// Classification checks the birthday before the new year, first match
/// wins. Darkening is independent of classification and marks weeks
/// beginning strictly before `darken_until`.
pub fn build_rows(
    start: NaiveDate,
    birth: NaiveDate,
    rows: u32,
    darken_until: Option<NaiveDate>,
) -> LifegridResult<Vec<Vec<Cell>>> {
    let mut out = Vec::with_capacity(rows as usize);

    for r in 0..rows {
        let row_start = weeks_after(start, i64::from(r) * WEEK_COLUMNS as i64);
        let mut row = Vec::with_capacity(WEEK_COLUMNS);

        for c in 0..WEEK_COLUMNS {
            let week_start = weeks_after(row_start, c as i64);
            let class = classify(week_start, birth)?;
            let darkened = darken_until.is_some_and(|limit| week_start < limit);

            row.push(Cell {
                row: r as usize,
                col: c,
                week_start,
                class,
                darkened,
            });
        }

        out.push(row);
    }

    Ok(out)
}

fn classify(week_start: NaiveDate, birth: NaiveDate) -> LifegridResult<CellClass> {
    if week_contains(week_start, birth.month(), birth.day())? {
        return Ok(CellClass::Birthday);
    }
    if week_contains(week_start, 1, 1)? {
        return Ok(CellClass::NewYear);
    }
    Ok(CellClass::Normal)
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/grid.rs"]
mod tests;
