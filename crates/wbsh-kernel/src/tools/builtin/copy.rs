use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};
use crate::vfs::ResolvedLocation;

/// Copy one file. A directory destination receives the source's name.
pub struct Copy;

#[async_trait]
impl Tool for Copy {
    fn name(&self) -> &str {
        "COPY"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "COPY".to_string(),
            description: "Copy files".to_string(),
            usage: "COPY <source> <destination>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let (Some(src), Some(dst)) = (args.get_positional(0), args.get_positional(1)) else {
            return ExecResult::failure(1, "Usage: COPY <source> <destination>");
        };

        let src_loc = match ctx.devices.resolve(src, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("COPY: {err}")),
        };
        let data = match ctx.devices.read(&src_loc).await {
            Ok(data) => data,
            Err(err) => return ExecResult::failure(1, format!("COPY: {err}")),
        };

        let mut dst_loc = match ctx.devices.resolve_target(dst, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("COPY: {err}")),
        };
        // Copying onto a directory drops the file inside it.
        if let Ok(meta) = ctx.devices.stat(&dst_loc).await {
            if meta.is_dir {
                if let Some(leaf) = src_loc.leaf() {
                    dst_loc = push_segment(dst_loc, leaf);
                }
            }
        }

        match ctx.devices.write(&dst_loc, &data).await {
            Ok(()) => ExecResult::success(format!("COPY: '{src}' copied to '{dst_loc}'")),
            Err(err) => ExecResult::failure(1, format!("COPY: {err}")),
        }
    }
}

fn push_segment(loc: ResolvedLocation, leaf: &str) -> ResolvedLocation {
    match loc {
        ResolvedLocation::Virtual { device, mut segments } => {
            segments.push(leaf.to_string());
            ResolvedLocation::Virtual { device, segments }
        }
        ResolvedLocation::Host {
            device,
            mut segments,
            path,
        } => {
            segments.push(leaf.to_string());
            ResolvedLocation::Host {
                device,
                segments,
                path: path.join(leaf),
            }
        }
    }
}
