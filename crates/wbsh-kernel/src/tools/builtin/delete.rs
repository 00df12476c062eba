use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Delete a file or directory. Non-empty directories need the ALL keyword.
pub struct Delete;

#[async_trait]
impl Tool for Delete {
    fn name(&self) -> &str {
        "DELETE"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "DELETE".to_string(),
            description: "Delete files".to_string(),
            usage: "DELETE <path> [ALL]".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: DELETE <path> [ALL]");
        };
        let recursive = args
            .get_positional(1)
            .is_some_and(|kw| kw.eq_ignore_ascii_case("ALL"));

        let loc = match ctx.devices.resolve(raw, &ctx.device, &ctx.segments).await {
            Ok(loc) => loc,
            Err(err) => return ExecResult::failure(1, format!("DELETE: {err}")),
        };
        match ctx.devices.remove(&loc, recursive).await {
            Ok(()) => ExecResult::success(format!("DELETE: '{raw}' deleted")),
            Err(err) => ExecResult::failure(1, format!("DELETE: {err}")),
        }
    }
}
