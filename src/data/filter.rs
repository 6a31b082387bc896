use std::collections::BTreeSet;

use super::model::{Cell, DeliveryTable};
use super::schema::{CITY, ORDER_DATE, TRAFFIC_DENSITY, VEHICLE_TYPE};

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// A single condition a record must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact text match on a categorical column.
    Equals { column: String, value: String },
    /// Inclusive lower bound on a numeric column; missing values fail.
    AtLeast { column: String, min: f64 },
    /// Membership in a set of text values; an empty set admits nothing.
    OneOf {
        column: String,
        values: BTreeSet<String>,
    },
}

impl Predicate {
    fn column(&self) -> &str {
        match self {
            Predicate::Equals { column, .. }
            | Predicate::AtLeast { column, .. }
            | Predicate::OneOf { column, .. } => column,
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        match (self, cell) {
            (Predicate::Equals { value, .. }, Cell::Text(s)) => s == value,
            (Predicate::AtLeast { min, .. }, Cell::Number(v)) => v >= min,
            (Predicate::OneOf { values, .. }, Cell::Text(s)) => values.contains(s),
            _ => false,
        }
    }
}

/// Conjunction of predicates plus an optional row limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub predicates: Vec<Predicate>,
    pub limit: Option<usize>,
}

/// Return indices of records that pass every predicate, in table order,
/// truncated to `filters.limit`.
///
/// A predicate on a column the table does not have matches nothing.
pub fn filtered_indices(table: &DeliveryTable, filters: &FilterSet) -> Vec<usize> {
    let resolved: Vec<(Option<usize>, &Predicate)> = filters
        .predicates
        .iter()
        .map(|p| (table.column_index(p.column()), p))
        .collect();

    let limit = filters.limit.unwrap_or(usize::MAX);

    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            resolved.iter().all(|(col, pred)| {
                col.and_then(|c| rec.get(c))
                    .is_some_and(|cell| pred.matches(cell))
            })
        })
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}

/// Filtered copy of `table`; the source is left untouched.
pub fn apply_filters(table: &DeliveryTable, filters: &FilterSet) -> DeliveryTable {
    table.subset(&filtered_indices(table, filters))
}

// ---------------------------------------------------------------------------
// Dashboard selection
// ---------------------------------------------------------------------------

/// What the user picked in the filter panel.  `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryFilter {
    pub city: Option<String>,
    pub vehicle: Option<String>,
    pub order_date: Option<String>,
    /// `None` = every traffic density; `Some(set)` = only those listed.
    pub traffic: Option<BTreeSet<String>>,
    pub min_duration: Option<f64>,
    pub limit: Option<usize>,
}

impl DeliveryFilter {
    /// Compile the selection into row predicates.
    pub fn to_filter_set(&self, duration_column: &str) -> FilterSet {
        let mut predicates = Vec::new();
        let equals = [
            (CITY, &self.city),
            (VEHICLE_TYPE, &self.vehicle),
            (ORDER_DATE, &self.order_date),
        ];
        for (column, value) in equals {
            if let Some(value) = value {
                predicates.push(Predicate::Equals {
                    column: column.to_string(),
                    value: value.clone(),
                });
            }
        }
        if let Some(values) = &self.traffic {
            predicates.push(Predicate::OneOf {
                column: TRAFFIC_DENSITY.to_string(),
                values: values.clone(),
            });
        }
        if let Some(min) = self.min_duration {
            predicates.push(Predicate::AtLeast {
                column: duration_column.to_string(),
                min,
            });
        }
        FilterSet {
            predicates,
            limit: self.limit,
        }
    }

    /// Indices of matching records in `table`.
    pub fn apply(&self, table: &DeliveryTable) -> Vec<usize> {
        filtered_indices(table, &self.to_filter_set(table.duration_column()))
    }
}
