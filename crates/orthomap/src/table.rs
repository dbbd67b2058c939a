//! In-memory result tables
//!
//! BioMart answers every query with a flat table whose schema depends on the
//! requested attributes. [`Table`] holds such results and provides the few
//! relational operations the mapper needs to stitch them together: column
//! renames and drops, client-side row filtering, full outer merges and
//! row-wise concatenation.

use crate::error::{OrthoError, Result};
use serde::Serialize;
use fxhash::FxHashMap;
use std::collections::HashSet;

/// A single cell; `None` is a missing value
pub type Cell = Option<String>;

/// Suffixes applied to non-key columns present on both sides of a merge
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Rows of optional string cells under named columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table, checking every row against the column count
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Cell>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| OrthoError::ColumnNotFound(name.to_string()))
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(OrthoError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Value at `row` in column `name`, `None` when missing or out of range
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// All cells of one column, in row order
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>> {
        let col = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| row[col].as_deref()).collect())
    }

    /// Present values of a column, deduplicated, in first-seen order
    pub fn distinct_values(&self, name: &str) -> Result<Vec<String>> {
        let col = self.require_column(name)?;
        let mut seen = HashSet::new();
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row[col].as_deref())
            .filter(|value| seen.insert(*value))
            .map(str::to_string)
            .collect())
    }

    /// Rename a column; absent columns are left alone
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(col) = self.column_index(from) {
            self.columns[col] = to.to_string();
        }
    }

    /// Remove a column and its cells
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let col = self.require_column(name)?;
        self.columns.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
        Ok(())
    }

    /// New table with only `names`, in that order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Table {
            columns: names.iter().map(|n| n.as_ref().to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Keep rows whose `column` value is present and contained in `values`
    pub fn retain_rows_in(&mut self, column: &str, values: &HashSet<&str>) -> Result<()> {
        let col = self.require_column(column)?;
        self.rows
            .retain(|row| row[col].as_deref().is_some_and(|v| values.contains(v)));
        Ok(())
    }

    /// Drop repeated rows, keeping the first occurrence
    pub fn dedup_rows(&mut self) {
        let mut seen = HashSet::new();
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Full outer join of `self` (left) with `right`
    ///
    /// Output columns are the left columns followed by the right ones. When
    /// both keys share a name the right key column is folded into the left
    /// one. Other shared names get `_x`/`_y` suffixes. Each left row is
    /// followed by its matches in right order; unmatched right rows come
    /// last. Missing keys never match anything.
    pub fn outer_merge(&self, right: &Table, left_on: &str, right_on: &str) -> Result<Table> {
        let left_key = self.require_column(left_on)?;
        let right_key = right.require_column(right_on)?;
        let shared_key = left_on == right_on;

        let right_cols: Vec<usize> = (0..right.columns.len())
            .filter(|&i| !(shared_key && i == right_key))
            .collect();

        let clashes: HashSet<&str> = self
            .columns
            .iter()
            .filter(|c| !(shared_key && c.as_str() == left_on))
            .filter(|c| right.has_column(c))
            .map(String::as_str)
            .collect();

        let mut columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| suffixed(c, &clashes, LEFT_SUFFIX))
            .collect();
        columns.extend(
            right_cols
                .iter()
                .map(|&i| suffixed(&right.columns[i], &clashes, RIGHT_SUFFIX)),
        );

        // Build: hash the right side once
        let mut build = JoinBuild::new(right, right_key);
        let mut rows = Vec::with_capacity(self.rows.len().max(right.rows.len()));

        // Probe: every left row, padded when nothing matches
        for left_row in &self.rows {
            let matches = build.probe(left_row[left_key].as_deref());
            if matches.is_empty() {
                let mut row = left_row.clone();
                row.extend(std::iter::repeat(None).take(right_cols.len()));
                rows.push(row);
                continue;
            }
            for pos in matches {
                let mut row = left_row.clone();
                row.extend(right_cols.iter().map(|&i| right.rows[pos][i].clone()));
                rows.push(row);
            }
        }

        // Emit right rows no probe reached
        for pos in build.unmatched() {
            let right_row = &right.rows[pos];
            let mut row: Vec<Cell> = vec![None; self.columns.len()];
            if shared_key {
                row[left_key] = right_row[right_key].clone();
            }
            row.extend(right_cols.iter().map(|&i| right_row[i].clone()));
            rows.push(row);
        }

        Ok(Table { columns, rows })
    }

    /// Append `other` below `self`
    ///
    /// The column set becomes the union of both, in first-seen order; cells
    /// a side does not have are missing.
    pub fn append(&mut self, other: Table) {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        for column in &other.columns {
            if !self.has_column(column) {
                self.columns.push(column.clone());
                for row in &mut self.rows {
                    row.push(None);
                }
            }
        }

        let positions: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();

        for other_row in other.rows {
            let mut row: Vec<Cell> = vec![None; self.columns.len()];
            for (cell, &pos) in other_row.into_iter().zip(&positions) {
                row[pos] = cell;
            }
            self.rows.push(row);
        }
    }

    /// Rows as column-name to value maps, for JSON output
    pub fn records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| {
                        let value = cell
                            .as_ref()
                            .map_or(serde_json::Value::Null, |v| serde_json::Value::String(v.clone()));
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Hash table over the build (right) side of an outer merge
///
/// Rows with a missing key are never indexed. `matched` records which rows
/// a probe has returned so the unmatched ones can be emitted afterwards.
struct JoinBuild<'a> {
    index: FxHashMap<&'a str, Vec<usize>>,
    matched: Vec<bool>,
}

impl<'a> JoinBuild<'a> {
    fn new(table: &'a Table, key: usize) -> Self {
        let mut index: FxHashMap<&'a str, Vec<usize>> = FxHashMap::default();
        for (pos, row) in table.rows.iter().enumerate() {
            if let Some(value) = row[key].as_deref() {
                index.entry(value).or_default().push(pos);
            }
        }
        Self {
            index,
            matched: vec![false; table.rows.len()],
        }
    }

    /// Build rows matching `key`, in build order
    fn probe(&mut self, key: Option<&str>) -> Vec<usize> {
        let Some(positions) = key.and_then(|k| self.index.get(k)) else {
            return Vec::new();
        };
        for &pos in positions {
            self.matched[pos] = true;
        }
        positions.clone()
    }

    fn unmatched(&self) -> impl Iterator<Item = usize> + '_ {
        self.matched
            .iter()
            .enumerate()
            .filter(|&(_, &hit)| !hit)
            .map(|(pos, _)| pos)
    }
}

fn suffixed(name: &str, clashes: &HashSet<&str>, suffix: &str) -> String {
    if clashes.contains(name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}
