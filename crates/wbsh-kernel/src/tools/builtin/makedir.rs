use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Create a directory.
pub struct Makedir;

#[async_trait]
impl Tool for Makedir {
    fn name(&self) -> &str {
        "MAKEDIR"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "MAKEDIR".to_string(),
            description: "Create directories".to_string(),
            usage: "MAKEDIR <path>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: MAKEDIR <path>");
        };
        let loc = match ctx.devices.resolve_target(raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("MAKEDIR: {err}")),
        };
        match ctx.devices.mkdir(&loc).await {
            Ok(()) => ExecResult::success(format!("MAKEDIR: Directory '{raw}' created")),
            Err(err) => ExecResult::failure(1, format!("MAKEDIR: {err}")),
        }
    }
}
