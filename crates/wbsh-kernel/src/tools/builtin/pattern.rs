use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Match file names in the current directory against an AmigaDOS-flavored
/// pattern: `#?` for single-character names, `~prefix` for a prefix match,
/// `*` for everything, anything else literal.
pub struct Pattern;

fn matches(pattern: &str, name: &str) -> bool {
    if pattern == "#?" {
        name.chars().count() == 1
    } else if let Some(prefix) = pattern.strip_prefix('~') {
        name.starts_with(prefix)
    } else if pattern == "*" {
        true
    } else {
        name == pattern
    }
}

#[async_trait]
impl Tool for Pattern {
    fn name(&self) -> &str {
        "PATTERN"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "PATTERN".to_string(),
            description: "Pattern matching utility".to_string(),
            usage: "PATTERN <pattern>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(pattern) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: PATTERN <pattern>");
        };
        let cwd = ctx.cwd();
        let loc = match ctx.devices.resolve(&cwd, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("PATTERN: {err}")),
        };
        let entries = match ctx.devices.list(&loc).await {
            Ok(entries) => entries,
            Err(err) => return ExecResult::failure(1, format!("PATTERN: {err}")),
        };

        let mut out = format!("Files matching pattern \"{pattern}\" in {cwd}:\n");
        let mut any = false;
        for entry in entries.iter().filter(|e| !e.is_dir) {
            if matches(pattern, &entry.name) {
                out.push_str(&format!("  {} (rwed)\n", entry.name));
                any = true;
            }
        }
        if !any {
            out.push_str("  No files match the pattern.\n");
        }
        ExecResult::success(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_forms() {
        assert!(matches("#?", "a"));
        assert!(!matches("#?", "ab"));
        assert!(matches("~Temp", "Temp-File"));
        assert!(!matches("~Temp", "File-Temp"));
        assert!(matches("*", "anything"));
        assert!(matches("exact", "exact"));
        assert!(!matches("exact", "exactly"));
    }
}
