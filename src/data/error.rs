use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be turned into a validated table.
///
/// Every variant is terminal for the current load: the caller surfaces the
/// message and does not render partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "File not found: '{}'. Make sure '{}' is in the expected folder.",
        path.display(),
        file_name(path)
    )]
    FileNotFound { path: PathBuf },

    #[error("Could not parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Column '{column}' appears more than once after trimming header whitespace")]
    DuplicateColumn { column: String },

    #[error("Column '{column}' has the wrong type: {reason}")]
    TypeMismatch { column: String, reason: String },
}

impl LoadError {
    /// Short machine-friendly kind label, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::FileNotFound { .. } => "FileNotFound",
            LoadError::Parse { .. } => "ParseError",
            LoadError::Schema { .. } | LoadError::DuplicateColumn { .. } => "SchemaError",
            LoadError::TypeMismatch { .. } => "TypeMismatch",
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_file() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("data/delivery_data.csv"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'delivery_data.csv'"), "{msg}");
        assert_eq!(err.kind(), "FileNotFound");
    }

    #[test]
    fn schema_message_lists_every_column() {
        let err = LoadError::Schema {
            missing: vec!["Time_taken(min)".into(), "City".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): Time_taken(min), City"
        );
    }
}
