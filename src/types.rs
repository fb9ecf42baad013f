use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory { file_count: usize },
}

/// One direct child of the scanned root, with nested structure collapsed
/// into an aggregate size and modification time.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub relative_name: String,
    pub size_bytes: u64,
    /// `None` only for a directory holding no files when empty directories
    /// are reported instead of rejected.
    pub last_modified: Option<DateTime<Local>>,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }
}
