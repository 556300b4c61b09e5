//! Indicator tables
//!
//! Loads one indicator CSV file, keeps the rows that pass the unit filter,
//! and answers the two lookups the dashboard needs: all regions in a given
//! year (for the map) and all years of a given region (for the comparison).

use super::error::{DataError, DataResult};
use super::types::{Columns, LoadReport, Observation, UnitFilter};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// CSV loader with configurable column names and unit filter
#[derive(Debug, Clone)]
pub struct TableLoader {
    /// Name used in logs and error messages
    name: String,
    columns: Columns,
    filter: UnitFilter,
}

/// Positions of the needed columns within a header row
struct ColumnIndex {
    region_code: usize,
    region_name: usize,
    period: usize,
    value: usize,
    unit: usize,
}

impl TableLoader {
    /// Create a loader with the default OECD column names
    pub fn new(name: impl Into<String>, filter: UnitFilter) -> Self {
        Self {
            name: name.into(),
            columns: Columns::default(),
            filter,
        }
    }

    /// Override the column names
    pub fn with_columns(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    /// Load a table from a CSV file
    pub fn load(&self, path: &Path) -> DataResult<IndicatorTable> {
        if !path.exists() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        tracing::debug!(table = %self.name, path = ?path, "Loading indicator table");
        self.read_from(file)
    }

    /// Load a table from an in-memory CSV string
    pub fn load_str(&self, csv_data: &str) -> DataResult<IndicatorTable> {
        self.read_from(csv_data.as_bytes())
    }

    /// Load a table from any reader
    pub fn read_from<R: Read>(&self, reader: R) -> DataResult<IndicatorTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let index = self.locate_columns(&headers)?;

        let mut rows = Vec::new();
        let mut report = LoadReport::default();

        for (line_num, result) in reader.records().enumerate() {
            report.rows_read += 1;
            let line = line_num + 2;

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    tracing::debug!(table = %self.name, line, error = %e, "Skipping unreadable row");
                    report.rows_skipped += 1;
                    continue;
                }
            };

            if !record.get(index.unit).is_some_and(|u| self.filter.accepts(u)) {
                report.rows_filtered += 1;
                continue;
            }

            match parse_observation(&record, &index) {
                Some(obs) => {
                    rows.push(obs);
                    report.rows_kept += 1;
                }
                None => {
                    tracing::debug!(table = %self.name, line, "Skipping malformed row");
                    report.rows_skipped += 1;
                }
            }
        }

        tracing::info!(table = %self.name, %report, "Indicator table loaded");

        Ok(IndicatorTable {
            name: self.name.clone(),
            rows,
            report,
        })
    }

    fn locate_columns(&self, headers: &csv::StringRecord) -> DataResult<ColumnIndex> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
                .ok_or_else(|| DataError::MissingColumn {
                    column: column.to_string(),
                    source_name: self.name.clone(),
                })
        };

        Ok(ColumnIndex {
            region_code: find(self.columns.region_code.as_str())?,
            region_name: find(self.columns.region_name.as_str())?,
            period: find(self.columns.period.as_str())?,
            value: find(self.columns.value.as_str())?,
            unit: find(self.filter.column.as_str())?,
        })
    }
}

fn parse_observation(record: &csv::StringRecord, index: &ColumnIndex) -> Option<Observation> {
    let region_code = record.get(index.region_code)?.trim();
    let region_name = record.get(index.region_name)?.trim();
    if region_code.is_empty() || region_name.is_empty() {
        return None;
    }

    let period = record.get(index.period)?.trim().parse::<i32>().ok()?;
    let value = record.get(index.value)?.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(Observation::new(region_code, region_name, period, value))
}

/// An immutable, filtered indicator table
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    name: String,
    rows: Vec<Observation>,
    report: LoadReport,
}

impl IndicatorTable {
    /// Build a table directly from observations
    pub fn from_rows(name: impl Into<String>, rows: Vec<Observation>) -> Self {
        let report = LoadReport {
            rows_read: rows.len(),
            rows_kept: rows.len(),
            ..Default::default()
        };
        Self {
            name: name.into(),
            rows,
            report,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All observations for one year, in file order
    pub fn rows_for_period(&self, period: i32) -> Vec<&Observation> {
        self.rows.iter().filter(|o| o.period == period).collect()
    }

    /// All observations for one region, matched on the region name
    pub fn rows_for_region(&self, region_name: &str) -> Vec<&Observation> {
        self.rows
            .iter()
            .filter(|o| o.region_name == region_name)
            .collect()
    }

    /// Distinct years present, ascending
    pub fn periods(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.rows.iter().map(|o| o.period).collect();
        set.into_iter().collect()
    }

    /// Distinct region names present, sorted
    pub fn regions(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|o| o.region_name.as_str()).collect();
        set.into_iter().collect()
    }
}
