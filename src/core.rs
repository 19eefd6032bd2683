use std::collections::BTreeMap;

use thiserror::Error;

use crate::vfs::EntryView;

/// Errors returned by [`FsBackend`] operations.
///
/// The taxonomy is flat: every error is detected locally and handed straight
/// to the caller. A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// A segment named while walking a path does not exist.
    #[error("{0} does not exist")]
    PathNotFound(String),

    /// The target of `cd`/`ls` (or the container of a create) is a file.
    #[error("{0} is not a directory")]
    NotADirectory(String),

    /// The target of `read` is a directory.
    #[error("{0} is a directory")]
    IsADirectory(String),

    /// A create operation targets a name already taken among its siblings.
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A delete/edit/list operation targets a name absent among its siblings.
    #[error("{0} does not exist")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FsError>;

/// The file system backend seam.
///
/// Paths are plain strings with `/` as the separator. A leading `/` forces
/// resolution from the root regardless of the current directory; `..`
/// ascends one level and is clamped at the root; trailing separators are
/// trimmed. `.` is *not* a current-directory shorthand — it is looked up as
/// an ordinary child name.
pub trait FsBackend {
    /// Returns the absolute path of the current working directory.
    fn cwd(&self) -> &str;

    /// Changes the current working directory.
    fn cd(&mut self, path: &str) -> Result<()>;

    /// Checks whether `path` resolves to an existing entry.
    fn exists(&self, path: &str) -> bool;

    /// Checks whether `path` names a directory. Errors if it does not exist.
    fn is_dir(&self, path: &str) -> Result<bool>;

    /// Checks whether `path` names a file. Errors if it does not exist.
    fn is_file(&self, path: &str) -> Result<bool>;

    /// Creates a directory. All ancestors of the leaf must already exist.
    fn mkdir(&mut self, path: &str) -> Result<()>;

    /// Removes the entry at `path` together with everything below it.
    fn rmdir(&mut self, path: &str) -> Result<()>;

    /// Lists the immediate children of the directory at `path`.
    fn ls(&self, path: &str) -> Result<BTreeMap<String, EntryView>>;

    /// Creates a file holding `content`. Ancestors must already exist.
    fn mkfile(&mut self, path: &str, content: &[u8]) -> Result<()>;

    /// Removes the entry at `path`.
    fn rmfile(&mut self, path: &str) -> Result<()>;

    /// Returns a copy of the content of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Replaces the content of the entry at `path`. The entry must exist.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()>;
}
