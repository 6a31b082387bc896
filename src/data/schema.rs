use std::collections::BTreeSet;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Column names of the delivery dataset
// ---------------------------------------------------------------------------

pub const DURATION: &str = "Time_taken(min)";
pub const ORDER_DATE: &str = "Order_Date";
pub const TRAFFIC_DENSITY: &str = "Road_traffic_density";
pub const WEATHER: &str = "Weatherconditions";
pub const CITY: &str = "City";
pub const VEHICLE_TYPE: &str = "Type_of_vehicle";

/// Declarative list of the columns the dashboard depends on.
///
/// Always has exactly one duration column (free text reduced to a minute
/// count); every other required column is kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySchema {
    duration: &'static str,
    categorical: Vec<&'static str>,
}

impl Default for DeliverySchema {
    fn default() -> Self {
        Self::delivery()
    }
}

impl DeliverySchema {
    /// Union of every column any dashboard view reads.
    pub fn delivery() -> Self {
        DeliverySchema {
            duration: DURATION,
            categorical: vec![ORDER_DATE, TRAFFIC_DENSITY, WEATHER, CITY, VEHICLE_TYPE],
        }
    }

    /// The column holding the free-text duration.
    pub fn duration_column(&self) -> &'static str {
        self.duration
    }

    /// Every required column, duration first.
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.duration).chain(self.categorical.iter().copied())
    }

    /// Check a (trimmed) header row against the schema in one pass and
    /// return the position of the duration column.
    ///
    /// A name that appears twice is rejected, since lookups by name could
    /// only ever reach the first.  Otherwise every absent column is reported,
    /// in schema order, in a single [`LoadError::Schema`].
    pub fn validate_headers(&self, headers: &[String]) -> Result<usize, LoadError> {
        let mut seen = BTreeSet::new();
        if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(LoadError::DuplicateColumn {
                column: dup.clone(),
            });
        }

        let missing: Vec<String> = self
            .required()
            .filter(|name| !headers.iter().any(|h| h.as_str() == *name))
            .map(str::to_string)
            .collect();

        match headers.iter().position(|h| h.as_str() == self.duration) {
            Some(index) if missing.is_empty() => Ok(index),
            _ => Err(LoadError::Schema { missing }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_header_passes_with_duration_position() {
        let schema = DeliverySchema::delivery();
        let hdr = headers(&[
            "ID", CITY, VEHICLE_TYPE, ORDER_DATE, TRAFFIC_DENSITY, WEATHER, DURATION,
        ]);
        assert_eq!(schema.validate_headers(&hdr).unwrap(), 6);
    }

    #[test]
    fn all_missing_columns_reported_together() {
        let schema = DeliverySchema::delivery();
        let hdr = headers(&[ORDER_DATE, TRAFFIC_DENSITY, WEATHER, VEHICLE_TYPE]);
        match schema.validate_headers(&hdr) {
            Err(LoadError::Schema { missing }) => {
                assert_eq!(missing, vec![DURATION.to_string(), CITY.to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let schema = DeliverySchema::delivery();
        let hdr = headers(&[
            "city", VEHICLE_TYPE, ORDER_DATE, TRAFFIC_DENSITY, WEATHER, DURATION,
        ]);
        assert!(matches!(
            schema.validate_headers(&hdr),
            Err(LoadError::Schema { missing }) if missing == vec![CITY.to_string()]
        ));
    }

    #[test]
    fn repeated_column_is_rejected() {
        let schema = DeliverySchema::delivery();
        let hdr = headers(&[
            CITY, ORDER_DATE, CITY, VEHICLE_TYPE, TRAFFIC_DENSITY, WEATHER, DURATION,
        ]);
        assert!(matches!(
            schema.validate_headers(&hdr),
            Err(LoadError::DuplicateColumn { column }) if column == CITY
        ));
    }

    #[test]
    fn required_lists_duration_first() {
        let schema = DeliverySchema::delivery();
        assert_eq!(schema.duration_column(), DURATION);
        let required: Vec<&str> = schema.required().collect();
        assert_eq!(required.len(), 6);
        assert_eq!(required[0], DURATION);
    }
}
