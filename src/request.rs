use crate::error::{Result, SummaryError};
use std::path::PathBuf;

pub const REPORT_EXTENSION: &str = "txt";

/// The three inputs a report run needs.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_name: String,
}

impl SummaryRequest {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        base_name: impl Into<String>,
    ) -> Self {
        SummaryRequest {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            base_name: base_name.into(),
        }
    }

    /// Checks the preconditions in order: input directory, output
    /// directory, base name. Only metadata is read.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(SummaryError::InvalidInputDir(self.input_dir.clone()));
        }
        if !self.output_dir.is_dir() {
            return Err(SummaryError::InvalidOutputDir(self.output_dir.clone()));
        }
        if self.base_name.is_empty() {
            return Err(SummaryError::EmptyBaseName);
        }
        Ok(())
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{REPORT_EXTENSION}", self.base_name))
    }
}
