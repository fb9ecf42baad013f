use crate::error::{Result, SummaryError};
use clap::ValueEnum;
use log::{debug, warn};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = ".dir_summary_config";

/// What to do with a directory entry that holds no files at any depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EmptyDirPolicy {
    /// Abort the report: the last modified time is undefined
    #[default]
    Fail,
    /// Report the directory as 0 bytes with no timestamp
    Zero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub sort: bool,
    pub empty_dirs: EmptyDirPolicy,
}

impl ReportOptions {
    /// Reads `KEY=value` pairs from `path` on top of the defaults.
    ///
    /// Recognised keys are `SORT` and `EMPTY_DIRS`. Unknown keys are
    /// ignored with a warning.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SummaryError::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Loads the explicit config file if one was named, otherwise the
    /// default dotfile in the working directory when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut options = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((k, v)) = line.split_once('=') else {
                return Err(SummaryError::Config {
                    path: path.to_path_buf(),
                    reason: format!("expected KEY=value, got '{line}'"),
                });
            };
            let key = k.trim();
            let val = v.trim().trim_matches('"');

            match key {
                "SORT" => options.sort = parse_bool(val).ok_or_else(|| SummaryError::Config {
                    path: path.to_path_buf(),
                    reason: format!("SORT must be true or false, got '{val}'"),
                })?,
                "EMPTY_DIRS" => {
                    options.empty_dirs =
                        EmptyDirPolicy::from_str(val, true).map_err(|_| SummaryError::Config {
                            path: path.to_path_buf(),
                            reason: format!("EMPTY_DIRS must be fail or zero, got '{val}'"),
                        })?;
                }
                other => warn!("Ignoring unknown key '{other}' in {}", path.display()),
            }
        }

        debug!("Loaded options from {}: {options:?}", path.display());
        Ok(options)
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
