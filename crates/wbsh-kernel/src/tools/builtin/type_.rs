use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Print a file's contents.
pub struct Type;

#[async_trait]
impl Tool for Type {
    fn name(&self) -> &str {
        "TYPE"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "TYPE".to_string(),
            description: "Display file contents".to_string(),
            usage: "TYPE <file>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: TYPE <file>");
        };
        let loc = match ctx.devices.resolve(raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("TYPE: {err}")),
        };
        match ctx.devices.read(&loc).await {
            Ok(bytes) => ExecResult::success(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => ExecResult::failure(1, format!("TYPE: {err}")),
        }
    }
}
