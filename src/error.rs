use thiserror::Error;

/// Failure that aborts the scan of a single file.
///
/// Scan errors never cross the file boundary: `check::check_file` converts
/// them into field issues on the file's [`CheckResult`](crate::model::CheckResult)
/// so one undecodable file cannot abort the batch.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot decode input as {0}")]
    Decode(&'static str),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// True for decoding failures, which the report labels separately from
    /// plain read errors.
    pub fn is_decode(&self) -> bool {
        matches!(self, ScanError::Decode(_))
    }
}
