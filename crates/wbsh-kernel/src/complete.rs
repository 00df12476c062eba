//! Path and device completion.

use crate::vfs::DeviceMap;

/// Candidates for the path fragment `partial`, resolved against the given
/// current directory.
///
/// With a colon the directory portion is resolved and its entries filtered
/// by the leaf prefix. Without one, device names (matched case-insensitively)
/// and entries of the current directory both qualify. Directories gain a
/// trailing `/` so completion can keep descending.
pub async fn complete(
    devices: &DeviceMap,
    cur_device: &str,
    cur_segments: &[String],
    partial: &str,
) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(colon) = partial.find(':') {
        let (prefix, leaf) = match partial.rfind(['/', '\\']) {
            Some(i) if i > colon => (&partial[..=i], &partial[i + 1..]),
            _ => (&partial[..=colon], &partial[colon + 1..]),
        };
        if let Ok(loc) = devices.resolve(prefix, cur_device, cur_segments).await {
            if let Ok(entries) = devices.list(&loc).await {
                for entry in entries {
                    if entry.name.starts_with(leaf) {
                        let mut cand = format!("{prefix}{}", entry.name);
                        if entry.is_dir {
                            cand.push('/');
                        }
                        candidates.push(cand);
                    }
                }
            }
        }
    } else {
        for name in devices.device_names() {
            if name.len() >= partial.len() && name[..partial.len()].eq_ignore_ascii_case(partial) {
                candidates.push(format!("{name}:"));
            }
        }
        let cwd = format!("{}:{}", cur_device, cur_segments.join("/"));
        if let Ok(loc) = devices.resolve(&cwd, cur_device, cur_segments).await {
            if let Ok(entries) = devices.list(&loc).await {
                for entry in entries {
                    if entry.name.starts_with(partial) {
                        let mut cand = entry.name.clone();
                        if entry.is_dir {
                            cand.push('/');
                        }
                        candidates.push(cand);
                    }
                }
            }
        }
    }

    candidates.sort();
    candidates
}
