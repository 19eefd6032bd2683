#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// Read-only descriptor of a directory entry, as returned by `ls`.
///
/// Carries a snapshot of the entry (name, type, size) rather than a handle
/// into the tree, so callers never hold internal mutable structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    name: String,
    kind: EntryType,
    size: u64,
}

impl EntryView {
    pub(crate) fn new(name: String, kind: EntryType, size: u64) -> EntryView {
        EntryView { name, kind, size }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryType {
        self.kind
    }

    /// Content length in bytes for files, 0 for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryType::Directory
    }
}
