//! Column-labeled numeric tables
//!
//! MESA writes `history.data` and `profile<N>.data` with the same layout:
//!
//! ```text
//! line 1   column numbers of the run metadata
//! line 2   run metadata names      (initial_mass, initial_z, ...)
//! line 3   run metadata values
//! line 4   (blank)
//! line 5   column numbers of the data block
//! line 6   column names            (model_number, log_Teff, ...)
//! line 7+  one row of whitespace separated numbers per step / zone
//! ```
//!
//! The first five lines are the preamble. The loader keeps lines 2 and 3 as a
//! [`Preamble`] and turns the rest into a [`Table`] backed by a `DMatrix<f64>`
//! (rows × columns, file order).

use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MesaError, Result};

/// Number of lines before the column header in history and profile files
pub const DATA_PREAMBLE_LINES: usize = 5;

// =================================================================================================
// Preamble
// =================================================================================================

/// Run metadata found in the preamble of history and profile files
///
/// Values are kept as text because some of them (`version_number`, `compiler`,
/// `date`) are not numbers. Use [`Preamble::get_f64`] for numeric entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preamble {
    entries: Vec<(String, String)>,
}

impl Preamble {
    /// Build a preamble from the names line and the values line
    ///
    /// Mismatched lengths give an empty preamble: the metadata is informational
    /// and never blocks loading the data block.
    pub(crate) fn from_lines(names: Option<&str>, values: Option<&str>) -> Self {
        let (Some(names), Some(values)) = (names, values) else {
            return Self::default();
        };

        let names = split_quoted(names);
        let values = split_quoted(values);

        if names.len() != values.len() {
            log::debug!(
                "Ignoring preamble: {} names vs {} values",
                names.len(),
                values.len()
            );
            return Self::default();
        }

        Self {
            entries: names.into_iter().zip(values).collect(),
        }
    }

    /// Raw value of a metadata entry
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric value of a metadata entry
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(parse_number)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split on whitespace, keeping double-quoted runs together and unquoted
fn split_quoted(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

// =================================================================================================
// Number parsing
// =================================================================================================

/// Parse a numeric field as written by Fortran
///
/// Accepts plain Rust floats plus the two Fortran oddities MESA emits:
/// `D` exponents (`1.0D+00`) and three-digit exponents written without a letter
/// (`1.234567-100`).
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    if let Ok(value) = token.parse::<f64>() {
        return Some(value);
    }

    let normalized = token.replace(['D', 'd'], "E");
    if let Ok(value) = normalized.parse::<f64>() {
        return Some(value);
    }

    let sign_at = normalized.get(1..)?.rfind(['+', '-'])? + 1;
    let mantissa = &normalized[..sign_at];
    if !mantissa.ends_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    format!("{}E{}", mantissa, &normalized[sign_at..])
        .parse::<f64>()
        .ok()
}

// =================================================================================================
// Table
// =================================================================================================

/// Ordered, column-labeled numeric table
///
/// Row order is file order. No deduplication and no sorting is ever applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: PathBuf,
    preamble: Preamble,
    columns: Vec<String>,
    lookup: HashMap<String, usize>,
    data: DMatrix<f64>,
}

impl Table {
    fn assemble(
        source: PathBuf,
        preamble: Preamble,
        columns: Vec<String>,
        data: DMatrix<f64>,
    ) -> Self {
        let mut lookup = HashMap::with_capacity(columns.len());
        for (j, name) in columns.iter().enumerate() {
            // First occurrence wins for duplicated names
            lookup.entry(name.clone()).or_insert(j);
        }

        Self {
            source,
            preamble,
            columns,
            lookup,
            data,
        }
    }

    /// Build an in-memory table from column names and rows
    ///
    /// # Errors
    ///
    /// Returns [`MesaError::InvalidInput`] if a row length differs from the number of columns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mesa_rs::data::Table;
    ///
    /// let table = Table::from_rows(
    ///     vec!["model_number".to_string(), "log_L".to_string()],
    ///     vec![vec![1.0, 0.1], vec![2.0, 0.2]],
    /// ).unwrap();
    /// assert_eq!(table.n_rows(), 2);
    /// ```
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_columns = columns.len();
        let mut values = Vec::with_capacity(rows.len() * n_columns);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_columns {
                return Err(MesaError::invalid_input(format!(
                    "row {} has {} values for {} columns",
                    i,
                    row.len(),
                    n_columns
                )));
            }
            values.extend_from_slice(row);
        }

        let data = DMatrix::from_row_slice(rows.len(), n_columns, &values);
        Ok(Self::assemble(
            PathBuf::from("<memory>"),
            Preamble::default(),
            columns,
            data,
        ))
    }

    /// File the table was read from (`<memory>` for in-memory tables)
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Run metadata from the file preamble
    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    /// Number of data rows
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    /// Check for an empty data block
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in file order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Check a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| MesaError::MissingColumn {
                path: self.source.clone(),
                column: name.to_string(),
            })
    }

    /// Copy of a whole column
    pub fn column(&self, name: &str) -> Result<DVector<f64>> {
        let j = self.column_index(name)?;
        Ok(self.data.column(j).into_owned())
    }

    /// Value at `row` in column `name`, `None` when the row does not exist
    pub fn value(&self, row: usize, name: &str) -> Result<Option<f64>> {
        let j = self.column_index(name)?;
        Ok((row < self.n_rows()).then(|| self.data[(row, j)]))
    }

    /// Copy of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<f64>> {
        (row < self.n_rows()).then(|| self.data.row(row).iter().copied().collect())
    }

    /// Underlying matrix (rows × columns)
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// New table holding the given rows, in the given order
    ///
    /// # Panics
    ///
    /// Panics if a row index is out of range.
    pub fn select_rows(&self, rows: &[usize]) -> Table {
        Self::assemble(
            self.source.clone(),
            self.preamble.clone(),
            self.columns.clone(),
            self.data.select_rows(rows.iter()),
        )
    }

    /// New table holding the rows whose `name` value satisfies `predicate`
    pub fn filter_rows<F>(&self, name: &str, predicate: F) -> Result<Table>
    where
        F: Fn(f64) -> bool,
    {
        let j = self.column_index(name)?;
        let rows: Vec<usize> = (0..self.n_rows())
            .filter(|&i| predicate(self.data[(i, j)]))
            .collect();

        Ok(self.select_rows(&rows))
    }
}

// =================================================================================================
// Reading
// =================================================================================================

/// Read a history or profile file
pub(crate) fn read_data_file(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| MesaError::from_io(path, e))?;
    let table = parse_data_table(path, &text)?;

    log::debug!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        table.n_rows(),
        table.n_columns()
    );

    Ok(table)
}

/// Parse the text of a history or profile file
pub(crate) fn parse_data_table(path: &Path, text: &str) -> Result<Table> {
    let lines: Vec<&str> = text.lines().collect();
    let preamble = Preamble::from_lines(lines.get(1).copied(), lines.get(2).copied());

    let mut body = lines
        .iter()
        .enumerate()
        .skip(DATA_PREAMBLE_LINES)
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = body.next().ok_or_else(|| {
        MesaError::parse(
            path,
            lines.len().max(DATA_PREAMBLE_LINES) + 1,
            "missing column header after the preamble",
        )
    })?;

    let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();
    let n_columns = columns.len();

    let mut values = Vec::new();
    let mut n_rows = 0;

    for (idx, line) in body {
        let line_number = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != n_columns {
            return Err(MesaError::parse(
                path,
                line_number,
                format!("expected {} fields, found {}", n_columns, fields.len()),
            ));
        }

        for field in fields {
            let value = parse_number(field).ok_or_else(|| {
                MesaError::parse(path, line_number, format!("'{}' is not a number", field))
            })?;
            values.push(value);
        }

        n_rows += 1;
    }

    let data = DMatrix::from_row_slice(n_rows, n_columns, &values);
    Ok(Table::assemble(path.to_path_buf(), preamble, columns, data))
}

// =================================================================================================
// Tests
// =================================================================================================
