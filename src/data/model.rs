use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single value in the delivery table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell.  Categorical columns hold `Text`, the cleaned
/// duration column holds `Number` or `Missing`.
/// Used as a `BTreeSet` key downstream, so `Cell` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

// -- Manual Eq/Ord so we can put Cell in BTreeSet --

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Cell::*;
        fn discriminant(v: &Cell) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Text(s) => s.hash(state),
            Cell::Number(f) => f.to_bits().hash(state),
            Cell::Missing => {}
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => write!(f, "<missing>"),
        }
    }
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DeliveryRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single delivery order, one cell per table column in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRecord {
    pub cells: Vec<Cell>,
}

impl DeliveryRecord {
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

// ---------------------------------------------------------------------------
// DeliveryTable – the complete validated dataset
// ---------------------------------------------------------------------------

/// The validated dataset with pre-computed column indices.
///
/// Never mutated after construction; filtered views are built with
/// [`DeliveryTable::subset`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTable {
    /// Column names in header order, surrounding whitespace trimmed.
    pub columns: Vec<String>,
    /// All records (rows), in file order.
    pub records: Vec<DeliveryRecord>,
    /// Position of the numeric duration column within `columns`.
    pub duration_index: usize,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<Cell>>,
}

impl DeliveryTable {
    /// Build column indices from the loaded records.
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<DeliveryRecord>,
        duration_index: usize,
    ) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Cell>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for rec in &records {
            for (col, val) in columns.iter().zip(&rec.cells) {
                if let Some(set) = unique_values.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }

        DeliveryTable {
            columns,
            records,
            duration_index,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of a column by exact (already trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Name of the numeric duration column.
    pub fn duration_column(&self) -> &str {
        &self.columns[self.duration_index]
    }

    /// Numeric duration of a record, `None` when missing.
    pub fn duration(&self, row: usize) -> Option<f64> {
        self.records
            .get(row)
            .and_then(|r| r.get(self.duration_index))
            .and_then(Cell::as_f64)
    }

    /// Cell at (row, column name).
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.records.get(row)?.get(col)
    }

    /// Sorted distinct text values of a categorical column.
    pub fn categories(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| {
                vals.iter()
                    .filter_map(|v| v.as_text().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Largest present duration, if any row has one.
    pub fn max_duration(&self) -> Option<f64> {
        (0..self.len())
            .filter_map(|i| self.duration(i))
            .reduce(f64::max)
    }

    /// New table holding only the given rows, in the given order.
    /// Out-of-range indices are skipped.
    pub fn subset(&self, indices: &[usize]) -> DeliveryTable {
        let records = indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect();
        DeliveryTable::from_records(self.columns.clone(), records, self.duration_index)
    }
}
