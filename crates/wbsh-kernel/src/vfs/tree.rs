//! In-memory volume tree backing the virtual devices.
//!
//! One tree per virtual device. Directory children are kept in insertion
//! order, which is the listing order. All data is ephemeral.

use std::io;
use std::sync::RwLock;
use std::time::SystemTime;

use super::{EntryInfo, Metadata};

/// A node in the volume tree.
#[derive(Debug, Clone)]
enum Node {
    Dir {
        children: Vec<(String, Node)>,
        modified: SystemTime,
    },
    File {
        data: Vec<u8>,
        modified: SystemTime,
        executable: bool,
    },
}

impl Node {
    fn dir() -> Self {
        Node::Dir {
            children: Vec::new(),
            modified: SystemTime::now(),
        }
    }

    fn file(data: Vec<u8>, executable: bool) -> Self {
        Node::File {
            data,
            modified: SystemTime::now(),
            executable,
        }
    }
}

/// An in-memory volume.
///
/// Thread-safe via internal `RwLock`; the lock is held only for the duration
/// of a single structural read or mutation.
#[derive(Debug)]
pub struct VolumeTree {
    name: String,
    root: RwLock<Node>,
}

fn not_found(segments: &[String]) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("not found: {}", segments.join("/")),
    )
}

fn poisoned() -> io::Error {
    io::Error::other("lock poisoned")
}

/// Walk to the node at `segments`, verifying intermediate nodes are directories.
fn walk<'a>(root: &'a Node, segments: &[String]) -> io::Result<&'a Node> {
    let mut node = root;
    for (i, seg) in segments.iter().enumerate() {
        match node {
            Node::Dir { children, .. } => {
                node = children
                    .iter()
                    .find(|(name, _)| name == seg)
                    .map(|(_, n)| n)
                    .ok_or_else(|| not_found(&segments[..=i]))?;
            }
            Node::File { .. } => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", segments[..i].join("/")),
                ));
            }
        }
    }
    Ok(node)
}

fn walk_dir_mut<'a>(
    root: &'a mut Node,
    segments: &[String],
) -> io::Result<&'a mut Vec<(String, Node)>> {
    let mut node = root;
    for (i, seg) in segments.iter().enumerate() {
        match node {
            Node::Dir { children, .. } => {
                node = children
                    .iter_mut()
                    .find(|(name, _)| name == seg)
                    .map(|(_, n)| n)
                    .ok_or_else(|| not_found(&segments[..=i]))?;
            }
            Node::File { .. } => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", segments[..i].join("/")),
                ));
            }
        }
    }
    match node {
        Node::Dir { children, .. } => Ok(children),
        Node::File { .. } => Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("not a directory: {}", segments.join("/")),
        )),
    }
}

fn split_leaf(segments: &[String]) -> io::Result<(&[String], &String)> {
    match segments.split_last() {
        Some((leaf, parent)) => Ok((parent, leaf)),
        None => Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "cannot operate on the device root",
        )),
    }
}

impl VolumeTree {
    /// Create a new empty volume.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: RwLock::new(Node::dir()),
        }
    }

    /// The device name this volume is mounted as.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metadata for the object at `segments`.
    pub fn stat(&self, segments: &[String]) -> io::Result<Metadata> {
        let root = self.root.read().map_err(|_| poisoned())?;
        match walk(&root, segments)? {
            Node::Dir { modified, .. } => Ok(Metadata {
                is_dir: true,
                size: 0,
                modified: *modified,
                executable: false,
            }),
            Node::File {
                data,
                modified,
                executable,
            } => Ok(Metadata {
                is_dir: false,
                size: data.len() as u64,
                modified: *modified,
                executable: *executable,
            }),
        }
    }

    /// True if an object exists at `segments`.
    pub fn exists(&self, segments: &[String]) -> bool {
        self.stat(segments).is_ok()
    }

    /// Read file contents.
    pub fn read(&self, segments: &[String]) -> io::Result<Vec<u8>> {
        let root = self.root.read().map_err(|_| poisoned())?;
        match walk(&root, segments)? {
            Node::File { data, .. } => Ok(data.clone()),
            Node::Dir { .. } => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", segments.join("/")),
            )),
        }
    }

    /// Write a file, creating or overwriting it. The parent directory must
    /// already exist. The executable flag of an overwritten file is kept.
    pub fn write(&self, segments: &[String], data: &[u8]) -> io::Result<()> {
        let (parent, leaf) = split_leaf(segments)?;
        let mut root = self.root.write().map_err(|_| poisoned())?;
        let children = walk_dir_mut(&mut root, parent)?;
        match children.iter_mut().find(|(name, _)| name == leaf) {
            Some((_, Node::File {
                data: existing,
                modified,
                ..
            })) => {
                *existing = data.to_vec();
                *modified = SystemTime::now();
                Ok(())
            }
            Some((_, Node::Dir { .. })) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", segments.join("/")),
            )),
            None => {
                children.push((leaf.clone(), Node::file(data.to_vec(), false)));
                Ok(())
            }
        }
    }

    /// Install an executable command entry at the volume root.
    pub fn install_command(&self, name: &str) -> io::Result<()> {
        let mut root = self.root.write().map_err(|_| poisoned())?;
        let children = walk_dir_mut(&mut root, &[])?;
        if children.iter().any(|(n, _)| n == name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {name}"),
            ));
        }
        children.push((name.to_string(), Node::file(Vec::new(), true)));
        Ok(())
    }

    /// List direct children of the directory at `segments`, in insertion order.
    pub fn list(&self, segments: &[String]) -> io::Result<Vec<EntryInfo>> {
        let root = self.root.read().map_err(|_| poisoned())?;
        match walk(&root, segments)? {
            Node::Dir { children, .. } => Ok(children
                .iter()
                .map(|(name, node)| match node {
                    Node::Dir { modified, .. } => EntryInfo {
                        name: name.clone(),
                        is_dir: true,
                        size: 0,
                        modified: *modified,
                        executable: false,
                        write_protected: false,
                    },
                    Node::File {
                        data,
                        modified,
                        executable,
                    } => EntryInfo {
                        name: name.clone(),
                        is_dir: false,
                        size: data.len() as u64,
                        modified: *modified,
                        executable: *executable,
                        write_protected: false,
                    },
                })
                .collect()),
            Node::File { .. } => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", segments.join("/")),
            )),
        }
    }

    /// Create a directory. The parent must exist; an existing entry of the
    /// same name fails with `AlreadyExists`.
    pub fn mkdir(&self, segments: &[String]) -> io::Result<()> {
        let (parent, leaf) = split_leaf(segments)?;
        let mut root = self.root.write().map_err(|_| poisoned())?;
        let children = walk_dir_mut(&mut root, parent)?;
        if children.iter().any(|(name, _)| name == leaf) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("already exists: {}", segments.join("/")),
            ));
        }
        children.push((leaf.clone(), Node::dir()));
        Ok(())
    }

    /// Remove a file or directory. A non-empty directory fails with
    /// `DirectoryNotEmpty` unless `recursive` is set.
    pub fn remove(&self, segments: &[String], recursive: bool) -> io::Result<()> {
        let (parent, leaf) = split_leaf(segments)?;
        let mut root = self.root.write().map_err(|_| poisoned())?;
        let children = walk_dir_mut(&mut root, parent)?;
        let index = children
            .iter()
            .position(|(name, _)| name == leaf)
            .ok_or_else(|| not_found(segments))?;
        if let Node::Dir {
            children: grandchildren,
            ..
        } = &children[index].1
        {
            if !grandchildren.is_empty() && !recursive {
                return Err(io::Error::new(
                    io::ErrorKind::DirectoryNotEmpty,
                    format!("directory not empty: {}", segments.join("/")),
                ));
            }
        }
        children.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('/').map(String::from).collect()
    }

    #[test]
    fn test_mkdir_write_read() {
        let tree = VolumeTree::new("RAM");
        tree.mkdir(&segs("T")).unwrap();
        tree.write(&segs("T/notes"), b"hello").unwrap();
        assert_eq!(tree.read(&segs("T/notes")).unwrap(), b"hello");
    }

    #[test]
    fn test_write_requires_parent() {
        let tree = VolumeTree::new("RAM");
        let err = tree.write(&segs("missing/file"), b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let tree = VolumeTree::new("RAM");
        tree.write(&segs("f"), b"first").unwrap();
        tree.write(&segs("f"), b"second").unwrap();
        assert_eq!(tree.read(&segs("f")).unwrap(), b"second");
        assert_eq!(tree.list(&[]).unwrap().len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let tree = VolumeTree::new("RAM");
        tree.mkdir(&segs("C")).unwrap();
        tree.mkdir(&segs("A")).unwrap();
        tree.mkdir(&segs("B")).unwrap();
        let names: Vec<_> = tree.list(&[]).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_mkdir_collision() {
        let tree = VolumeTree::new("RAM");
        tree.mkdir(&segs("X")).unwrap();
        let err = tree.mkdir(&segs("X")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_remove_non_empty_requires_recursive() {
        let tree = VolumeTree::new("RAM");
        tree.mkdir(&segs("D")).unwrap();
        tree.write(&segs("D/f"), b"x").unwrap();
        let err = tree.remove(&segs("D"), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::DirectoryNotEmpty);
        tree.remove(&segs("D"), true).unwrap();
        assert!(!tree.exists(&segs("D")));
    }

    #[test]
    fn test_remove_missing() {
        let tree = VolumeTree::new("RAM");
        let err = tree.remove(&segs("nope"), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_traverse_through_file() {
        let tree = VolumeTree::new("RAM");
        tree.write(&segs("f"), b"x").unwrap();
        let err = tree.stat(&segs("f/inner")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
    }

    #[test]
    fn test_command_entries_are_executable_and_empty() {
        let tree = VolumeTree::new("C");
        tree.install_command("Dir").unwrap();
        let meta = tree.stat(&segs("Dir")).unwrap();
        assert!(meta.executable);
        assert_eq!(meta.size, 0);
    }
}
