use crate::config::EmptyDirPolicy;
use crate::error::{Result, SummaryError};
use crate::types::{DirectoryEntry, EntryKind};
use chrono::{DateTime, Local};
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Totals over every regular file beneath a directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub total_size: u64,
    pub file_count: usize,
    pub latest_modified: Option<SystemTime>,
}

/// Direct children of `dir`, in filesystem order unless `sort` is set.
pub fn list_children(dir: &Path, sort: bool) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SummaryError::io(dir, e))? {
        let entry = entry.map_err(|e| SummaryError::io(dir, e))?;
        children.push(entry.path());
    }

    if sort {
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(children)
}

/// Walks the whole subtree of `dir` without descending into linked
/// directories. Symlinks that resolve to a regular file are counted with
/// the target's size and mtime; dangling links are skipped. Any other entry
/// that can't be read aborts the walk.
pub fn aggregate_subtree(dir: &Path) -> Result<Aggregate> {
    let mut agg = Aggregate::default();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| SummaryError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let file_type = entry.file_type();
        let metadata = if file_type.is_file() {
            entry.metadata().map_err(|e| SummaryError::Walk {
                path: entry.path().to_path_buf(),
                source: e,
            })?
        } else if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(m) if m.is_file() => m,
                _ => continue,
            }
        } else {
            continue;
        };
        let modified = metadata
            .modified()
            .map_err(|e| SummaryError::io(entry.path(), e))?;
        trace!("{}: {} bytes", entry.path().display(), metadata.len());

        agg.total_size += metadata.len();
        agg.file_count += 1;
        agg.latest_modified = Some(match agg.latest_modified {
            Some(prev) => prev.max(modified),
            None => modified,
        });
    }

    Ok(agg)
}

/// Measures one direct child of `root`.
///
/// Plain files report their own length and mtime; directories report the
/// sum and the maximum over all files beneath them. Anything that isn't a
/// directory (after following a top-level symlink) is measured like a file.
pub fn measure_entry(root: &Path, child: &Path, policy: EmptyDirPolicy) -> Result<DirectoryEntry> {
    let relative_name = child
        .strip_prefix(root)
        .unwrap_or(child)
        .to_string_lossy()
        .to_string();

    let metadata = fs::metadata(child).map_err(|e| SummaryError::io(child, e))?;

    if !metadata.is_dir() {
        let modified: DateTime<Local> = metadata
            .modified()
            .map_err(|e| SummaryError::io(child, e))?
            .into();
        return Ok(DirectoryEntry {
            relative_name,
            size_bytes: metadata.len(),
            last_modified: Some(modified),
            kind: EntryKind::File,
        });
    }

    let agg = aggregate_subtree(child)?;
    debug!(
        "{}: {} files, {} bytes",
        child.display(),
        agg.file_count,
        agg.total_size
    );

    let last_modified = match (agg.latest_modified, policy) {
        (Some(t), _) => Some(t.into()),
        (None, EmptyDirPolicy::Zero) => None,
        (None, EmptyDirPolicy::Fail) => {
            return Err(SummaryError::EmptyAggregate {
                name: relative_name,
            });
        }
    };

    Ok(DirectoryEntry {
        relative_name,
        size_bytes: agg.total_size,
        last_modified,
        kind: EntryKind::Directory {
            file_count: agg.file_count,
        },
    })
}
