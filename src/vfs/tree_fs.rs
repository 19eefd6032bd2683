//! This module provides the in-memory tree file system backend.
//!
//! All state lives in one node arena; nothing ever touches the host disk.
//! Path resolution is a recursive walk over pre-split segments, so deep
//! paths cost one descent, not repeated string re-slicing.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::{FsBackend, FsError, Result};
use crate::vfs::entry::{EntryType, EntryView};
use crate::vfs::node::{Arena, Node, NodeId, NodeKind};

const SEPARATOR: char = '/';
const ROOT_PATH: &str = "/";
const PARENT: &str = "..";

/// An in-memory file system backed by a node arena.
///
/// `TreeFS` models a tree of directories and files with a current working
/// directory, resolved with POSIX-like path syntax: `/` separates segments,
/// a leading `/` is absolute, `..` ascends (clamped at the root), trailing
/// separators are ignored. `.` has no special meaning and is looked up as a
/// child name.
///
/// ### Internal state
///
/// * `arena` — owns every node; nodes address each other by arena index.
/// * `root` — the root directory, allocated at construction, never removed.
/// * `cwd` — the current working directory; moves only via `cd()`, except
///   that removing the directory it points at (or an ancestor of it) resets
///   it to the root.
///
/// ### Invariants
///
/// 1. The root always lives; its name and path are `/` and it has no parent.
/// 2. Sibling names are unique; creation over a taken name is an error.
/// 3. A node's cached `path` equals its parent's path joined with its name.
/// 4. Failed operations leave the tree untouched (check, then mutate).
///
/// ### Thread safety
///
/// Not thread-safe. If concurrent access is required, wrap it in a
/// synchronization primitive (e.g. `Mutex<TreeFS>` or `RwLock<TreeFS>`) at
/// the application level.
///
/// ### Example
///
/// ```
/// use treefs_kit::{FsBackend, TreeFS};
///
/// let mut fs = TreeFS::new();
/// fs.mkdir("docs").unwrap();
/// fs.mkfile("docs/note.txt", b"Hello").unwrap();
///
/// fs.cd("docs").unwrap();
/// assert_eq!(fs.cwd(), "/docs");
/// assert_eq!(fs.read("note.txt").unwrap(), b"Hello");
///
/// fs.rmfile("note.txt").unwrap();
/// assert!(!fs.exists("note.txt"));
/// ```
pub struct TreeFS {
    arena: Arena,
    root: NodeId,
    cwd: NodeId,
}

impl TreeFS {
    /// Creates a new file system holding only the root directory.
    /// The current working directory starts at the root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            name: ROOT_PATH.to_string(),
            path: ROOT_PATH.to_string(),
            parent: None,
            kind: NodeKind::empty_dir(),
        });

        Self {
            arena,
            root,
            cwd: root,
        }
    }

    /// Resolves `path` starting from `from`.
    ///
    /// A leading separator restarts resolution from the root; the literal
    /// path `/` names the root itself. Everything else is split into
    /// segments and resolved by [`descend`](Self::descend).
    fn walk(&self, from: NodeId, path: &str) -> Result<NodeId> {
        let from = if path.starts_with(SEPARATOR) {
            self.root
        } else {
            from
        };
        if path == ROOT_PATH {
            return Ok(from);
        }

        let segments: Vec<&str> = path.trim_matches(SEPARATOR).split(SEPARATOR).collect();
        self.descend(from, &segments)
    }

    /// Recursive descent over the remaining path segments.
    ///
    /// `..` moves to the parent and is consumed as a no-op at the root.
    /// Any other segment must name an existing child; files have no
    /// children, so walking "through" a file fails the same lookup. Note
    /// that the empty path splits into one empty segment, which no child
    /// can match.
    fn descend(&self, at: NodeId, segments: &[&str]) -> Result<NodeId> {
        let Some((&segment, rest)) = segments.split_first() else {
            return Ok(at);
        };

        if segment == PARENT {
            return match self.arena[at].parent {
                // already at the root: ascending is clamped, not an error
                None => self.descend(at, rest),
                Some(parent) => self.descend(parent, rest),
            };
        }

        let child = self.arena[at]
            .children()
            .and_then(|children| children.get(segment))
            .copied()
            .ok_or_else(|| FsError::PathNotFound(segment.to_string()))?;
        self.descend(child, rest)
    }

    /// Splits `path` into its container node and leaf name, so mutating
    /// operations can validate the leaf against the container's children
    /// without walking to a possibly non-existent target.
    fn locate<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str)> {
        match path.rfind(SEPARATOR) {
            // a bare name lives in the current directory
            None => Ok((self.cwd, path)),
            // "/name": the container is the root itself
            Some(0) => Ok((self.root, &path[1..])),
            Some(at) => {
                let container = self.walk(self.cwd, &path[..at])?;
                Ok((container, &path[at + 1..]))
            }
        }
    }

    /// Creates a new child under `container` and wires it into the tree.
    fn attach(&mut self, container: NodeId, name: &str, kind: NodeKind) -> Result<()> {
        if name.is_empty() {
            return Err(FsError::PathNotFound(name.to_string()));
        }
        if !self.arena[container].is_dir() {
            return Err(FsError::NotADirectory(self.arena[container].path.clone()));
        }
        if self.arena[container]
            .children()
            .is_some_and(|children| children.contains_key(name))
        {
            return Err(FsError::AlreadyExists(name.to_string()));
        }

        let path = join_path(&self.arena[container].path, name);
        let id = self.arena.insert(Node {
            name: name.to_string(),
            path,
            parent: Some(container),
            kind,
        });
        self.arena[container]
            .children_mut()
            .unwrap() // container checked to be a directory above
            .insert(name.to_string(), id);
        Ok(())
    }

    /// Removes the entry `name` from `container`, freeing its subtree.
    fn detach(&mut self, container: NodeId, name: &str) -> Result<()> {
        let id = self.arena[container]
            .children_mut()
            .and_then(|children| children.remove(name))
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        self.arena.remove_subtree(id);
        self.reset_cwd_if_dead();
        Ok(())
    }

    /// Removing the current directory (or an ancestor of it) falls back to
    /// the root, so `cwd()` can never report a detached location.
    fn reset_cwd_if_dead(&mut self) {
        if !self.arena.contains(self.cwd) {
            self.cwd = self.root;
        }
    }

    fn view(&self, id: NodeId) -> EntryView {
        let node = &self.arena[id];
        let kind = if node.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };
        EntryView::new(node.name.clone(), kind, node.size())
    }
}

impl FsBackend for TreeFS {
    /// Returns the cached absolute path of the current working directory.
    fn cwd(&self) -> &str {
        &self.arena[self.cwd].path
    }

    /// Changes the current working directory.
    /// The target must exist and be a directory.
    fn cd(&mut self, path: &str) -> Result<()> {
        let path = trim_trailing(path);
        let target = self.walk(self.cwd, path)?;
        if !self.arena[target].is_dir() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        self.cwd = target;
        debug!(cwd = %self.arena[target].path, "changed directory");
        Ok(())
    }

    /// Checks whether `path` resolves to an existing entry.
    fn exists(&self, path: &str) -> bool {
        self.walk(self.cwd, trim_trailing(path)).is_ok()
    }

    /// Checks whether `path` names a directory.
    fn is_dir(&self, path: &str) -> Result<bool> {
        let target = self.walk(self.cwd, trim_trailing(path))?;
        Ok(self.arena[target].is_dir())
    }

    /// Checks whether `path` names a file.
    fn is_file(&self, path: &str) -> Result<bool> {
        let target = self.walk(self.cwd, trim_trailing(path))?;
        Ok(self.arena[target].is_file())
    }

    /// Creates a new directory.
    ///
    /// Every ancestor of the leaf must already exist; missing intermediate
    /// directories are an error, not created on the fly.
    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = trim_trailing(path);
        let (container, name) = self.locate(path)?;
        self.attach(container, name, NodeKind::empty_dir())?;
        debug!(path, "created directory");
        Ok(())
    }

    /// Removes the entry at `path` together with everything below it.
    ///
    /// Only presence is checked, not the entry kind.
    fn rmdir(&mut self, path: &str) -> Result<()> {
        let path = trim_trailing(path);
        let (container, name) = self.locate(path)?;
        self.detach(container, name)?;
        debug!(path, "removed directory");
        Ok(())
    }

    /// Lists the immediate children of the directory named by `path`.
    ///
    /// Resolution goes one level up and looks the final segment up by name,
    /// so that segment must be a plain child name; the bare root `/` is
    /// listed directly. Listing a file is an error.
    fn ls(&self, path: &str) -> Result<BTreeMap<String, EntryView>> {
        let path = trim_trailing(path);
        // the root has no containing directory to split from
        let id = if path == ROOT_PATH {
            self.root
        } else {
            let (container, name) = self.locate(path)?;
            self.arena[container]
                .children()
                .and_then(|children| children.get(name))
                .copied()
                .ok_or_else(|| FsError::NotFound(name.to_string()))?
        };

        let node = &self.arena[id];
        let children = node
            .children()
            .ok_or_else(|| FsError::NotADirectory(node.path.clone()))?;
        Ok(children
            .iter()
            .map(|(name, &child)| (name.clone(), self.view(child)))
            .collect())
    }

    /// Creates a new file holding a copy of `content`.
    fn mkfile(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let path = trim_trailing(path);
        let (container, name) = self.locate(path)?;
        self.attach(container, name, NodeKind::file(content))?;
        debug!(path, len = content.len(), "created file");
        Ok(())
    }

    /// Removes the entry at `path`.
    ///
    /// Only presence is checked, not the entry kind.
    fn rmfile(&mut self, path: &str) -> Result<()> {
        let path = trim_trailing(path);
        let (container, name) = self.locate(path)?;
        self.detach(container, name)?;
        debug!(path, "removed file");
        Ok(())
    }

    /// Returns a copy of the content of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = trim_trailing(path);
        let target = self.walk(self.cwd, path)?;
        match &self.arena[target].kind {
            NodeKind::File { content } => Ok(content.clone()),
            NodeKind::Directory { .. } => Err(FsError::IsADirectory(path.to_string())),
        }
    }

    /// Replaces the content of the entry at `path`, which must exist.
    ///
    /// The entry keeps its name and path. A directory entry is replaced
    /// wholesale by a file node and its subtree is freed.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let path = trim_trailing(path);
        let (container, name) = self.locate(path)?;
        let id = self.arena[container]
            .children()
            .and_then(|children| children.get(name))
            .copied()
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;

        if self.arena[id].is_dir() {
            self.arena[container]
                .children_mut()
                .unwrap() // container holds `name`, so it is a directory
                .remove(name);
            self.arena.remove_subtree(id);
            self.reset_cwd_if_dead();
            self.attach(container, name, NodeKind::file(content))?;
        } else {
            self.arena[id].kind = NodeKind::file(content);
        }
        debug!(path, len = content.len(), "wrote file");
        Ok(())
    }
}

/// Trailing separators are trimmed and ignored; the bare root marker `/`
/// (in any number of repetitions) stays the root marker.
fn trim_trailing(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && !path.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

/// The root's path already ends in the separator; everywhere else one is
/// inserted between container path and name.
fn join_path(container_path: &str, name: &str) -> String {
    if container_path == ROOT_PATH {
        format!("{container_path}{name}")
    } else {
        format!("{container_path}{SEPARATOR}{name}")
    }
}
