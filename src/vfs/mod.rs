mod entry;
mod node;
mod tree_fs;

pub use entry::{EntryType, EntryView};
pub use tree_fs::TreeFS;
