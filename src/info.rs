use serde::{Deserialize, Serialize};

/// Outcome of a single storage operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Success,
    Fail,
}

/// Metadata describing one object transfer.
///
/// Created fresh per operation and never mutated after return; callers that
/// need the object itself go back to the store under `stored_filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Original, human-given name, including extension
    pub filename: String,

    /// Backend key; the filename codec maps it back to `filename`
    pub stored_filename: String,

    /// Content type as supplied by the caller
    pub file_type: String,

    /// Bytes actually persisted (0 when the transfer failed)
    pub length: u64,

    pub result_status: ResultStatus,
}

impl FileInfo {
    /// Describe a completed transfer
    pub fn success<F, S, T>(filename: F, stored_filename: S, file_type: T, length: u64) -> Self
    where
        F: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            filename: filename.into(),
            stored_filename: stored_filename.into(),
            file_type: file_type.into(),
            length,
            result_status: ResultStatus::Success,
        }
    }

    /// Describe a failed transfer; nothing was persisted
    pub fn failure<F, S, T>(filename: F, stored_filename: S, file_type: T) -> Self
    where
        F: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            filename: filename.into(),
            stored_filename: stored_filename.into(),
            file_type: file_type.into(),
            length: 0,
            result_status: ResultStatus::Fail,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result_status == ResultStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reports_zero_length() {
        let info = FileInfo::failure("a.png", "0f-a.png", "image/png");
        assert_eq!(info.length, 0);
        assert_eq!(info.result_status, ResultStatus::Fail);
        assert!(!info.is_success());
    }

    #[test]
    fn status_serializes_in_wire_casing() {
        let json = serde_json::to_string(&ResultStatus::Success).unwrap();
        assert_eq!(json, "\"SUCCESS\"");
        let json = serde_json::to_string(&ResultStatus::Fail).unwrap();
        assert_eq!(json, "\"FAIL\"");
    }
}
