//! Device-relative path resolution.
//!
//! Every path a command touches goes through `DeviceMap::resolve` (or
//! `resolve_target` for destinations that may not exist yet) before any
//! filesystem operation. Resolution is purely lexical up to the final
//! existence walk, so a host path can never climb above its device root.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::PathError;

use super::{EntryInfo, HostFs, Metadata, VolumeTree};

/// A fully resolved path: which device it lives on and the segment chain
/// below that device's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocation {
    Virtual {
        device: String,
        segments: Vec<String>,
    },
    Host {
        device: String,
        segments: Vec<String>,
        path: PathBuf,
    },
}

impl ResolvedLocation {
    pub fn device(&self) -> &str {
        match self {
            ResolvedLocation::Virtual { device, .. } => device,
            ResolvedLocation::Host { device, .. } => device,
        }
    }

    pub fn segments(&self) -> &[String] {
        match self {
            ResolvedLocation::Virtual { segments, .. } => segments,
            ResolvedLocation::Host { segments, .. } => segments,
        }
    }

    /// Location of the final segment's parent directory.
    pub fn parent(&self) -> Option<ResolvedLocation> {
        match self {
            ResolvedLocation::Virtual { device, segments } => {
                let (_, parent) = segments.split_last()?;
                Some(ResolvedLocation::Virtual {
                    device: device.clone(),
                    segments: parent.to_vec(),
                })
            }
            ResolvedLocation::Host {
                device,
                segments,
                path,
            } => {
                let (_, parent) = segments.split_last()?;
                Some(ResolvedLocation::Host {
                    device: device.clone(),
                    segments: parent.to_vec(),
                    path: path.parent()?.to_path_buf(),
                })
            }
        }
    }

    /// The final path segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.segments().last().map(String::as_str)
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device(), self.segments().join("/"))
    }
}

/// An ASSIGN: a short device-style name expanding to a path on a real device.
#[derive(Debug, Clone)]
struct Assign {
    name: String,
    device: String,
    segments: Vec<String>,
}

/// The mount table: virtual volumes, at most one host device, and assigns.
pub struct DeviceMap {
    volumes: Vec<Arc<VolumeTree>>,
    host_name: String,
    host: Arc<HostFs>,
    assigns: Vec<Assign>,
}

impl DeviceMap {
    pub fn new(volumes: Vec<Arc<VolumeTree>>, host_name: impl Into<String>, host: Arc<HostFs>) -> Self {
        Self {
            volumes,
            host_name: host_name.into(),
            host,
            assigns: Vec::new(),
        }
    }

    /// Register an assign. `target` segments are relative to `device`'s root.
    pub fn add_assign(&mut self, name: &str, device: &str, target: &[&str]) {
        self.assigns.push(Assign {
            name: name.to_string(),
            device: device.to_string(),
            segments: target.iter().map(|s| s.to_string()).collect(),
        });
    }

    pub fn host(&self) -> &Arc<HostFs> {
        &self.host
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn volumes(&self) -> &[Arc<VolumeTree>] {
        &self.volumes
    }

    /// Device and assign names, in mount order.
    pub fn device_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.volumes.iter().map(|v| v.name().to_string()).collect();
        names.push(self.host_name.clone());
        names.extend(self.assigns.iter().map(|a| a.name.clone()));
        names
    }

    /// True if `name` matches a device or assign, ignoring ASCII case.
    pub fn is_device(&self, name: &str) -> bool {
        self.volumes.iter().any(|v| v.name().eq_ignore_ascii_case(name))
            || self.host_name.eq_ignore_ascii_case(name)
            || self.assigns.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }

    fn volume(&self, name: &str) -> Option<&Arc<VolumeTree>> {
        self.volumes.iter().find(|v| v.name().eq_ignore_ascii_case(name))
    }

    fn assign(&self, name: &str) -> Option<&Assign> {
        self.assigns.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Lexically resolve `raw` against the current directory, without any
    /// existence check. Errors here are purely syntactic.
    fn resolve_lexical(
        &self,
        raw: &str,
        cur_device: &str,
        cur_segments: &[String],
    ) -> Result<ResolvedLocation, PathError> {
        let colons = raw.matches(':').count();
        if colons > 1 {
            return Err(PathError::MalformedPath(raw.to_string()));
        }

        let (device, mut segments, rest) = if let Some((dev, rest)) = raw.split_once(':') {
            if dev.is_empty() {
                return Err(PathError::MalformedPath(raw.to_string()));
            }
            if let Some(assign) = self.assign(dev) {
                (assign.device.clone(), assign.segments.clone(), rest)
            } else if self.is_device(dev) {
                (self.canonical_device(dev), Vec::new(), rest)
            } else {
                return Err(PathError::NotFound(format!("{dev}:")));
            }
        } else {
            (cur_device.to_string(), cur_segments.to_vec(), raw)
        };

        let is_host = self.host_name.eq_ignore_ascii_case(&device);
        for seg in rest.split(['/', '\\']) {
            if seg.is_empty() || seg == "." {
                continue;
            }
            if seg == ".." {
                if segments.pop().is_none() {
                    // Popping past the root of the host device would leave
                    // the sandbox; on a virtual device it is a no-op.
                    if is_host {
                        return Err(PathError::EscapesRoot(raw.to_string()));
                    }
                }
            } else {
                segments.push(seg.to_string());
            }
        }

        if is_host {
            let path = self.host.path_for(&segments);
            Ok(ResolvedLocation::Host {
                device,
                segments,
                path,
            })
        } else {
            Ok(ResolvedLocation::Virtual { device, segments })
        }
    }

    fn canonical_device(&self, name: &str) -> String {
        if let Some(v) = self.volume(name) {
            v.name().to_string()
        } else if self.host_name.eq_ignore_ascii_case(name) {
            self.host_name.clone()
        } else {
            name.to_string()
        }
    }

    fn map_io(err: io::Error, shown: &str) -> PathError {
        match err.kind() {
            io::ErrorKind::NotFound => PathError::NotFound(shown.to_string()),
            io::ErrorKind::NotADirectory => PathError::NotADirectory(shown.to_string()),
            _ => PathError::NotFound(shown.to_string()),
        }
    }

    /// Resolve `raw` to an existing object.
    pub async fn resolve(
        &self,
        raw: &str,
        cur_device: &str,
        cur_segments: &[String],
    ) -> Result<ResolvedLocation, PathError> {
        let loc = self.resolve_lexical(raw, cur_device, cur_segments)?;
        self.stat(&loc).await.map_err(|e| Self::map_io(e, raw))?;
        Ok(loc)
    }

    /// Resolve `raw` as a write target: the parent must be an existing
    /// directory but the leaf itself may be absent.
    pub async fn resolve_target(
        &self,
        raw: &str,
        cur_device: &str,
        cur_segments: &[String],
    ) -> Result<ResolvedLocation, PathError> {
        let loc = self.resolve_lexical(raw, cur_device, cur_segments)?;
        if let Some(parent) = loc.parent() {
            let meta = self
                .stat(&parent)
                .await
                .map_err(|e| Self::map_io(e, &parent.to_string()))?;
            if !meta.is_dir {
                return Err(PathError::NotADirectory(parent.to_string()));
            }
        }
        Ok(loc)
    }

    pub async fn stat(&self, loc: &ResolvedLocation) -> io::Result<Metadata> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .stat(segments),
            ResolvedLocation::Host { path, .. } => self.host.stat(path).await,
        }
    }

    pub async fn exists(&self, loc: &ResolvedLocation) -> bool {
        self.stat(loc).await.is_ok()
    }

    pub async fn read(&self, loc: &ResolvedLocation) -> io::Result<Vec<u8>> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .read(segments),
            ResolvedLocation::Host { path, .. } => self.host.read(path).await,
        }
    }

    pub async fn write(&self, loc: &ResolvedLocation, data: &[u8]) -> io::Result<()> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .write(segments, data),
            ResolvedLocation::Host { path, .. } => self.host.write(path, data).await,
        }
    }

    pub async fn list(&self, loc: &ResolvedLocation) -> io::Result<Vec<EntryInfo>> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .list(segments),
            ResolvedLocation::Host { path, .. } => self.host.list(path).await,
        }
    }

    pub async fn mkdir(&self, loc: &ResolvedLocation) -> io::Result<()> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .mkdir(segments),
            ResolvedLocation::Host { path, .. } => self.host.mkdir(path).await,
        }
    }

    pub async fn remove(&self, loc: &ResolvedLocation, recursive: bool) -> io::Result<()> {
        match loc {
            ResolvedLocation::Virtual { device, segments } => self
                .volume(device)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no device {device}:")))?
                .remove(segments, recursive),
            ResolvedLocation::Host { path, .. } => self.host.remove(path, recursive).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir =
            std::env::temp_dir().join(format!("wbsh-resolve-test-{}-{}", std::process::id(), n));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_map(host_root: &PathBuf) -> DeviceMap {
        let sys = Arc::new(VolumeTree::new("SYS"));
        sys.mkdir(&["S".to_string()]).unwrap();
        sys.write(&["S".to_string(), "Startup-Sequence".to_string()], b"; boot")
            .unwrap();
        let ram = Arc::new(VolumeTree::new("RAM"));
        let host = Arc::new(HostFs::new(host_root).unwrap());
        let mut map = DeviceMap::new(vec![sys, ram], "DH0", host);
        map.add_assign("S", "SYS", &["S"]);
        map
    }

    #[tokio::test]
    async fn test_absolute_path_resolves() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map.resolve("SYS:S/Startup-Sequence", "RAM", &[]).await.unwrap();
        assert_eq!(loc.to_string(), "SYS:S/Startup-Sequence");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_relative_path_uses_cwd() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map
            .resolve("Startup-Sequence", "SYS", &["S".to_string()])
            .await
            .unwrap();
        assert_eq!(loc.to_string(), "SYS:S/Startup-Sequence");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_assign_expands() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map.resolve("S:Startup-Sequence", "RAM", &[]).await.unwrap();
        assert_eq!(loc.to_string(), "SYS:S/Startup-Sequence");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_two_colons_is_malformed() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let err = map.resolve("SYS:a:b", "SYS", &[]).await.unwrap_err();
        assert!(matches!(err, PathError::MalformedPath(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_dotdot_is_noop_at_virtual_root() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map.resolve("SYS:../..", "RAM", &[]).await.unwrap();
        assert_eq!(loc.to_string(), "SYS:");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_dotdot_escaping_host_root_fails() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let err = map.resolve("DH0:..", "SYS", &[]).await.unwrap_err();
        assert!(matches!(err, PathError::EscapesRoot(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_host_path_stays_under_root() {
        let dir = temp_dir();
        std::fs::create_dir(dir.join("sub")).unwrap();
        let map = make_map(&dir);
        let loc = map.resolve("DH0:sub/../sub", "SYS", &[]).await.unwrap();
        match loc {
            ResolvedLocation::Host { path, .. } => assert!(path.starts_with(&dir)),
            other => panic!("expected host location, got {other:?}"),
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_unknown_device() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let err = map.resolve("DF0:foo", "SYS", &[]).await.unwrap_err();
        assert!(matches!(err, PathError::NotFound(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent_on_display() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map.resolve("sys:S/./Startup-Sequence", "RAM", &[]).await.unwrap();
        let again = map.resolve(&loc.to_string(), "RAM", &[]).await.unwrap();
        assert_eq!(loc, again);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_resolve_target_allows_missing_leaf() {
        let dir = temp_dir();
        let map = make_map(&dir);
        let loc = map.resolve_target("SYS:S/new-file", "RAM", &[]).await.unwrap();
        assert_eq!(loc.to_string(), "SYS:S/new-file");
        let err = map
            .resolve_target("SYS:Missing/new-file", "RAM", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, PathError::NotFound(_)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
