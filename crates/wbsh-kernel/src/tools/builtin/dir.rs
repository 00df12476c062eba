use async_trait::async_trait;

use crate::listing::render_listing;
use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// List a directory in Workbench format.
pub struct Dir;

#[async_trait]
impl Tool for Dir {
    fn name(&self) -> &str {
        "DIR"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "DIR".to_string(),
            description: "List directory contents (Amiga format with Name, Size, Protection, Date)"
                .to_string(),
            usage: "DIR [path]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let raw = args.get_positional(0).map(String::from).unwrap_or_else(|| ctx.cwd());
        let loc = match ctx.devices.resolve(&raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("DIR: {err}")),
        };
        match ctx.devices.list(&loc).await {
            Ok(entries) => ExecResult::success(render_listing(&loc.to_string(), &entries)),
            Err(err) => ExecResult::failure(1, format!("DIR: {err}")),
        }
    }
}
