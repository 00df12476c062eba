//! Hybrid filesystem layer: in-memory volume trees, the host bridge, and
//! the device path resolver.

mod host;
mod resolve;
mod tree;

pub use host::HostFs;
pub use resolve::{DeviceMap, ResolvedLocation};
pub use tree::VolumeTree;

use std::time::SystemTime;

/// Metadata for a single filesystem object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Whether this is a directory.
    pub is_dir: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Whether this is an executable entry.
    pub executable: bool,
}

/// A directory entry as projected for listing and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name (no path).
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Whether the entry is executable.
    pub executable: bool,
    /// Whether the entry is write-protected on its backing store.
    pub write_protected: bool,
}
