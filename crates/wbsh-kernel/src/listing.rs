//! Directory listing in classic Workbench style.

use chrono::{DateTime, Local};

use crate::vfs::EntryInfo;

fn protection(entry: &EntryInfo) -> &'static str {
    if entry.executable {
        "---xrwed"
    } else if entry.write_protected {
        "----r-ed"
    } else {
        "----rwed"
    }
}

/// Render a full listing: header, one row per entry in the order given,
/// and a totals footer.
pub fn render_listing(path: &str, entries: &[EntryInfo]) -> String {
    let now = Local::now();
    let mut out = String::new();
    out.push_str(&format!(
        "Directory \"{}\" on {} {}\n",
        path,
        now.format("%A"),
        now.format("%d-%b-%y")
    ));

    let mut dirs = 0usize;
    let mut bytes = 0u64;
    for entry in entries {
        let stamp: DateTime<Local> = entry.modified.into();
        let stamp = stamp.format("%d-%b-%y %H:%M:%S");
        if entry.is_dir {
            dirs += 1;
            out.push_str(&format!(" {:<22} (dir)    {}     {}\n", entry.name, protection(entry), stamp));
        } else {
            bytes += entry.size;
            out.push_str(&format!(
                " {:<22} {:>7}  {}     {}\n",
                entry.name,
                entry.size,
                protection(entry),
                stamp
            ));
        }
    }

    out.push_str(&format!(
        "{} files - {} directories - {} bytes used\n",
        entries.len(),
        dirs,
        bytes
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entry(name: &str, is_dir: bool, size: u64) -> EntryInfo {
        EntryInfo {
            name: name.to_string(),
            is_dir,
            size,
            modified: SystemTime::now(),
            executable: false,
            write_protected: false,
        }
    }

    #[test]
    fn test_footer_counts() {
        let entries = vec![entry("Tools", true, 0), entry("readme", false, 42)];
        let out = render_listing("SYS:", &entries);
        assert!(out.starts_with("Directory \"SYS:\" on "));
        assert!(out.ends_with("2 files - 1 directories - 42 bytes used\n"));
    }

    #[test]
    fn test_rows_keep_given_order() {
        let entries = vec![entry("C", true, 0), entry("A", true, 0), entry("B", true, 0)];
        let out = render_listing("RAM:", &entries);
        let rows: Vec<&str> = out.lines().skip(1).take(3).collect();
        assert!(rows[0].starts_with(" C "));
        assert!(rows[1].starts_with(" A "));
        assert!(rows[2].starts_with(" B "));
    }

    #[test]
    fn test_executable_protection_bits() {
        let mut e = entry("Dir", false, 0);
        e.executable = true;
        let out = render_listing("C:", &[e]);
        assert!(out.contains("---xrwed"));
    }

    #[test]
    fn test_empty_directory() {
        let out = render_listing("RAM:T", &[]);
        assert!(out.ends_with("0 files - 0 directories - 0 bytes used\n"));
    }
}
