use std::fs::File;
use std::path::Path;

use super::error::LoadError;
use super::model::{Cell, DeliveryRecord, DeliveryTable};
use super::schema::DeliverySchema;

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Knobs for [`load_file`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter of the input text.
    pub delimiter: u8,
    /// Columns that must be present.
    pub schema: DeliverySchema,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            schema: DeliverySchema::delivery(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and validate a delivery dataset.
///
/// Pipeline:
/// 1. the path must be a readable file, else [`LoadError::FileNotFound`]
/// 2. parse delimited text with a header row, else [`LoadError::Parse`]
/// 3. trim surrounding whitespace from column names
/// 4. check the schema, else [`LoadError::Schema`] listing all gaps, or
///    [`LoadError::DuplicateColumn`] when two names collide after trimming
/// 5. reduce the duration column to its first digit run as `f64`
/// 6. reject a non-empty table whose durations are all missing
///    ([`LoadError::TypeMismatch`])
///
/// No row is dropped. Reading the same bytes always yields an equal table.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<DeliveryTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| {
        log::debug!("opening {}: {e}", path.display());
        LoadError::FileNotFound {
            path: path.to_path_buf(),
        }
    })?;

    let parse_err = |source: csv::Error| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    log::debug!("{}: columns {:?}", path.display(), columns);

    let duration_index = options.schema.validate_headers(&columns)?;
    let duration_name = options.schema.duration_column();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(parse_err)?;
        let cells = record
            .iter()
            .enumerate()
            .map(|(i, field)| {
                if i == duration_index {
                    extract_duration(field).map_or(Cell::Missing, Cell::Number)
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        records.push(DeliveryRecord { cells });
    }

    let numeric = records
        .iter()
        .filter(|r| matches!(r.get(duration_index), Some(Cell::Number(_))))
        .count();
    if !records.is_empty() && numeric == 0 {
        return Err(LoadError::TypeMismatch {
            column: duration_name.to_string(),
            reason: format!(
                "no numeric value could be extracted from any of {} rows",
                records.len()
            ),
        });
    }

    log::info!(
        "Loaded {} delivery records from {} ({} without a duration)",
        records.len(),
        path.display(),
        records.len() - numeric
    );

    Ok(DeliveryTable::from_records(columns, records, duration_index))
}

// ---------------------------------------------------------------------------
// Duration extraction
// ---------------------------------------------------------------------------

/// First run of ASCII digits in `text` as a minute count.
///
/// `"30 mins"` → 30, `"(min) 24"` → 24, `"unknown"` → `None`.
pub fn extract_duration(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{CITY, DURATION, ORDER_DATE};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "ID,Order_Date,City,Type_of_vehicle,Road_traffic_density,Weatherconditions,Time_taken(min)";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn load(contents: &str) -> Result<DeliveryTable, LoadError> {
        let file = write_csv(contents);
        load_file(file.path(), &LoadOptions::default())
    }

    #[test]
    fn extracts_first_digit_run() {
        assert_eq!(extract_duration("30 mins"), Some(30.0));
        assert_eq!(extract_duration("(min) 24"), Some(24.0));
        assert_eq!(extract_duration("12.5"), Some(12.0));
        assert_eq!(extract_duration("007"), Some(7.0));
        assert_eq!(extract_duration("unknown"), None);
        assert_eq!(extract_duration(""), None);
    }

    #[test]
    fn well_formed_file_keeps_every_row() {
        let table = load(&format!(
            "{HEADER}\n\
             a1,19-03-2022,Urban,motorcycle,High,Sunny,(min) 24\n\
             a2,25-03-2022,Metropolitian,scooter,Jam,Stormy,33 mins\n\
             a3,19-03-2022,Urban,scooter,Low,Fog,unknown\n"
        ))
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.duration_column(), DURATION);
        assert_eq!(table.duration(0), Some(24.0));
        assert_eq!(table.duration(1), Some(33.0));
        assert_eq!(table.duration(2), None);
        assert_eq!(table.value(2, DURATION), Some(&Cell::Missing));
        assert_eq!(
            table.value(1, CITY),
            Some(&Cell::Text("Metropolitian".to_string()))
        );
        for rec in &table.records {
            assert!(matches!(
                rec.get(table.duration_index),
                Some(Cell::Number(_)) | Some(Cell::Missing)
            ));
        }
    }

    #[test]
    fn column_names_are_trimmed_but_not_recased() {
        let table = load(
            " ID , Order_Date ,City,Type_of_vehicle,Road_traffic_density,Weatherconditions, Time_taken(min) \n\
             a1,19-03-2022,Urban,bicycle,High,Sunny,20\n",
        )
        .unwrap();
        assert_eq!(table.columns[0], "ID");
        assert_eq!(table.column_index(ORDER_DATE), Some(1));
        assert_eq!(table.duration(0), Some(20.0));
    }

    #[test]
    fn other_cells_are_kept_verbatim() {
        let table = load(&format!("{HEADER}\na1,19-03-2022,Urban ,bicycle,High ,Sunny,20\n")).unwrap();
        assert_eq!(table.value(0, CITY), Some(&Cell::Text("Urban ".to_string())));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery_data.csv");
        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert!(err.to_string().contains("delivery_data.csv"));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn missing_duration_column_is_schema_error() {
        let err = load(
            "ID,Order_Date,City,Type_of_vehicle,Road_traffic_density,Weatherconditions\n\
             a1,19-03-2022,Urban,bicycle,High,Sunny\n",
        )
        .unwrap_err();
        match err {
            LoadError::Schema { missing } => assert_eq!(missing, vec![DURATION.to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn columns_equal_after_trimming_are_rejected() {
        let err = load(
            "City,Order_Date, City ,Type_of_vehicle,Road_traffic_density,Weatherconditions,Time_taken(min)\n\
             A,19-03-2022,B,bicycle,High,Sunny,20\n",
        )
        .unwrap_err();
        match err {
            LoadError::DuplicateColumn { ref column } => assert_eq!(column, CITY),
            ref other => panic!("expected duplicate column, got {other:?}"),
        }
        assert_eq!(err.kind(), "SchemaError");
        assert!(err.to_string().contains("'City'"));
    }

    #[test]
    fn ragged_row_is_parse_error() {
        let err = load(&format!("{HEADER}\na1,19-03-2022,Urban\n")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(b"\na1,19-03-2022,\xff\xfe,bicycle,High,Sunny,20\n")
            .unwrap();
        file.flush().unwrap();
        let err = load_file(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn all_missing_durations_is_type_mismatch() {
        let err = load(&format!(
            "{HEADER}\na1,19-03-2022,Urban,bicycle,High,Sunny,n/a\n\
             a2,19-03-2022,Urban,bicycle,High,Sunny,\n"
        ))
        .unwrap_err();
        match err {
            LoadError::TypeMismatch { column, .. } => assert_eq!(column, DURATION),
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_loads_empty() {
        let table = load(&format!("{HEADER}\n")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let file = write_csv(
            "Order_Date;City;Type_of_vehicle;Road_traffic_density;Weatherconditions;Time_taken(min)\n\
             19-03-2022;Urban;bicycle;High;Sunny;(min) 18\n",
        );
        let options = LoadOptions {
            delimiter: b';',
            ..LoadOptions::default()
        };
        let table = load_file(file.path(), &options).unwrap();
        assert_eq!(table.duration(0), Some(18.0));
    }

    #[test]
    fn loading_twice_is_identical() {
        let file = write_csv(&format!(
            "{HEADER}\na1,19-03-2022,Urban,bicycle,High,Sunny,20\n\
             a2,20-03-2022,Semi-Urban,scooter,Jam,Fog,?\n"
        ));
        let first = load_file(file.path(), &LoadOptions::default()).unwrap();
        let second = load_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}
