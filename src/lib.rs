//! A lightweight in-memory tree file system for Rust.
//! Models a hierarchical namespace of directories and files without ever
//! touching the actual disk. Ideal for testing, sandboxed path logic, and
//! simulating filesystem-shaped state.
//!
//! ### Overview
//!
//! `treefs-kit` keeps an entire directory tree in one owned arena and
//! resolves POSIX-like paths against a current working directory. It
//! defines the generic `FsBackend` trait and provides `TreeFS`, the
//! in-memory implementation.
//!
//! **Key ideas**:
//! - **No I/O**: every operation is synchronous and in-process; nothing
//!   escapes to the host file system.
//! - **Familiar paths**: `/` separates segments, a leading `/` is
//!   absolute, `..` ascends and is clamped at the root.
//! - **Typed errors**: every failure is one of a small set of `FsError`
//!   kinds, and a failed operation never leaves a partial mutation behind.
//! - **No raw handles**: callers address entries by path; listings return
//!   read-only `EntryView` descriptors, never internal structure.

mod core;
mod vfs;

pub use core::{FsBackend, FsError, Result};
pub use vfs::{EntryType, EntryView, TreeFS};
