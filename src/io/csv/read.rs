//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, bail};
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReader, DataType}};

use crate::{config::ScoreColumns, network::{SegmentId, SegmentScores, WalkCategory}};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string.
#[cfg(test)]
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(std::io::Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Score rows parsed from the table, plus the number of rows rejected.
pub(crate) struct ScoreRows {
    pub(crate) rows: Vec<SegmentScores>,
    pub(crate) rejected: usize,
}

/// Extract score rows from a DataFrame using the configured column names.
///
/// Rows with a missing or non-integral key, an unknown category label or a
/// missing length are rejected. Missing auxiliary scores become NaN.
pub(crate) fn read_score_rows(df: &DataFrame, columns: &ScoreColumns) -> Result<ScoreRows> {
    let ids = key_column(column(df, &columns.id)?)?;
    let categories = column(df, &columns.category)?.cast(&DataType::String)?;
    let lengths = float_column(column(df, &columns.length)?)?;
    let aesthetics = float_column(column(df, &columns.aesthetics)?)?;
    let destination = float_column(column(df, &columns.destination)?)?;
    let conspicuousness = float_column(column(df, &columns.conspicuousness)?)?;
    let safety = float_column(column(df, &columns.safety)?)?;

    let mut rows = Vec::with_capacity(df.height());
    let mut rejected = 0;

    for (i, label) in categories.str()?.into_iter().enumerate() {
        let id = ids[i];
        let category = label.and_then(WalkCategory::from_label);
        let length = lengths[i].filter(|length| length.is_finite());

        let (Some(id), Some(category), Some(length)) = (id, category, length) else {
            rejected += 1;
            continue;
        };

        rows.push(SegmentScores {
            id,
            category,
            length,
            aesthetics: aesthetics[i].unwrap_or(f64::NAN),
            destination: destination[i].unwrap_or(f64::NAN),
            conspicuousness: conspicuousness[i].unwrap_or(f64::NAN),
            safety: safety[i].unwrap_or(f64::NAN),
        });
    }

    Ok(ScoreRows { rows, rejected })
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    match df.column(name) {
        Ok(column) => Ok(column),
        Err(_) => bail!(
            "[io::csv::read] missing column {name:?}; found {:?}",
            df.get_column_names().iter().map(|name| name.as_str()).collect::<Vec<_>>()
        ),
    }
}

fn float_column(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)
        .with_context(|| format!("[io::csv::read] column {:?} is not numeric", column.name()))?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Normalize the join key to `i64`. Integer columns pass through; float and
/// string columns must hold integral values.
fn key_column(column: &Column) -> Result<Vec<Option<SegmentId>>> {
    if column.dtype().is_integer() {
        let cast = column.cast(&DataType::Int64)?;
        return Ok(cast.i64()?.into_iter().collect())
    }

    Ok(float_column(column)?
        .into_iter()
        .map(|value| value.and_then(integral))
        .collect())
}

fn integral(value: f64) -> Option<SegmentId> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as SegmentId)
}
