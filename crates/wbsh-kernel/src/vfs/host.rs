//! Host-backed device.
//!
//! Maps one device name onto a directory of the real filesystem. Callers
//! hand us paths already confined below the root by the resolver; the
//! `confine` check here is a final guard before any filesystem call.

use std::io;
use std::path::{Path, PathBuf};

use super::{EntryInfo, Metadata};

/// Bridge to a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct HostFs {
    root: PathBuf,
}

impl HostFs {
    /// Create a bridge rooted at `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let meta = std::fs::metadata(&root)?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// The host directory this device is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn confine(&self, path: &Path) -> io::Result<()> {
        if path.starts_with(&self.root) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("outside device root: {}", path.display()),
            ))
        }
    }

    /// Build the host path for confinement-checked `segments`.
    pub fn path_for(&self, segments: &[String]) -> PathBuf {
        let mut path = self.root.clone();
        for seg in segments {
            path.push(seg);
        }
        path
    }

    pub async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        self.confine(path)?;
        let meta = tokio::fs::metadata(path).await?;
        Ok(Metadata {
            is_dir: meta.is_dir(),
            size: meta.len(),
            modified: meta.modified().unwrap_or(std::time::UNIX_EPOCH),
            executable: is_executable(&meta),
        })
    }

    pub async fn exists(&self, path: &Path) -> bool {
        self.confine(path).is_ok() && tokio::fs::metadata(path).await.is_ok()
    }

    pub async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.confine(path)?;
        tokio::fs::read(path).await
    }

    pub async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.confine(path)?;
        tokio::fs::write(path, data).await
    }

    /// List a directory in the order the host enumerates it.
    pub async fn list(&self, path: &Path) -> io::Result<Vec<EntryInfo>> {
        self.confine(path)?;
        let mut entries = Vec::new();
        let mut rd = tokio::fs::read_dir(path).await?;
        while let Some(entry) = rd.next_entry().await? {
            let meta = entry.metadata().await?;
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: meta.is_dir(),
                size: if meta.is_dir() { 0 } else { meta.len() },
                modified: meta.modified().unwrap_or(std::time::UNIX_EPOCH),
                executable: is_executable(&meta),
                write_protected: meta.permissions().readonly(),
            });
        }
        Ok(entries)
    }

    pub async fn mkdir(&self, path: &Path) -> io::Result<()> {
        self.confine(path)?;
        tokio::fs::create_dir(path).await
    }

    pub async fn remove(&self, path: &Path, recursive: bool) -> io::Result<()> {
        self.confine(path)?;
        let meta = tokio::fs::metadata(path).await?;
        if meta.is_dir() {
            if recursive {
                tokio::fs::remove_dir_all(path).await
            } else {
                tokio::fs::remove_dir(path).await
            }
        } else {
            tokio::fs::remove_file(path).await
        }
    }
}

#[cfg(unix)]
fn is_executable(meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    !meta.is_dir() && meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &std::fs::Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("wbsh-host-test-{}-{}", std::process::id(), n));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_read_write_roundtrip() {
        let dir = temp_dir();
        let fs = HostFs::new(&dir).unwrap();
        let path = fs.path_for(&["greeting.txt".to_string()]);
        fs.write(&path, b"hello host").await.unwrap();
        assert_eq!(fs.read(&path).await.unwrap(), b"hello host");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_list_and_stat() {
        let dir = temp_dir();
        let fs = HostFs::new(&dir).unwrap();
        fs.mkdir(&fs.path_for(&["sub".to_string()])).await.unwrap();
        fs.write(&fs.path_for(&["f".to_string()]), b"abc").await.unwrap();
        let entries = fs.list(fs.root()).await.unwrap();
        assert_eq!(entries.len(), 2);
        let f = entries.iter().find(|e| e.name == "f").unwrap();
        assert_eq!(f.size, 3);
        assert!(!f.is_dir);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_paths_outside_root_are_refused() {
        let dir = temp_dir();
        let fs = HostFs::new(&dir).unwrap();
        let err = fs.read(Path::new("/etc/hostname")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_new_rejects_file_root() {
        let dir = temp_dir();
        let file = dir.join("plain");
        std::fs::write(&file, b"x").unwrap();
        assert!(HostFs::new(&file).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_remove_dir_requires_recursive() {
        let dir = temp_dir();
        let fs = HostFs::new(&dir).unwrap();
        let sub = fs.path_for(&["sub".to_string()]);
        fs.mkdir(&sub).await.unwrap();
        fs.write(&sub.join("f"), b"x").await.unwrap();
        assert!(fs.remove(&sub, false).await.is_err());
        fs.remove(&sub, true).await.unwrap();
        assert!(!fs.exists(&sub).await);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
