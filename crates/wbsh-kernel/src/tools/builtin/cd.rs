use async_trait::async_trait;

use crate::error::PathError;
use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};
use crate::vfs::ResolvedLocation;

/// Change the current directory. The session moves only after the target
/// resolves to an existing directory.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "CD"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "CD".to_string(),
            description: "Change directory".to_string(),
            usage: "CD [directory]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::success(format!("Current directory: {}", ctx.cwd()));
        };

        let loc = match ctx.devices.resolve(raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(PathError::NotFound(_)) => {
                return ExecResult::failure(1, format!("Directory {raw} not found."));
            }
            Err(err) => return ExecResult::failure(1, format!("CD: {err}")),
        };
        match ctx.devices.stat(&loc).await {
            Ok(meta) if meta.is_dir => {}
            Ok(_) => return ExecResult::failure(1, format!("CD: '{raw}' is not a directory")),
            Err(err) => return ExecResult::failure(1, format!("CD: {err}")),
        }

        let (device, segments) = match loc {
            ResolvedLocation::Virtual { device, segments } => (device, segments),
            ResolvedLocation::Host { device, segments, .. } => (device, segments),
        };
        ctx.device = device;
        ctx.segments = segments;
        ExecResult::success("")
    }
}
