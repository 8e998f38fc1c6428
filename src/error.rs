use thiserror::Error;

/// Failures the sync job distinguishes. Each variant is contained at a
/// different scope: config → whole run (soft), fetch → one source,
/// storage → one query or one item.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to load sources from {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("fetch failed for source {source_id}: {reason}")]
    Fetch { source_id: i32, reason: String },

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for SyncError {
    fn from(e: sqlx::Error) -> Self {
        SyncError::Storage(e.to_string())
    }
}

impl SyncError {
    pub fn fetch(source_id: i32, reason: impl ToString) -> Self {
        SyncError::Fetch { source_id, reason: reason.to_string() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::ConfigLoad { .. } => "config_load",
            SyncError::Fetch { .. } => "fetch",
            SyncError::Storage(_) => "storage",
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_the_source() {
        let e = SyncError::fetch(7, "status=error");
        assert_eq!(e.kind(), "fetch");
        assert_eq!(e.to_string(), "fetch failed for source 7: status=error");
    }
}
