use async_trait::async_trait;

use crate::error::ScriptError;
use crate::result::ExecResult;
use crate::script::{run_script, MAX_SCRIPT_DEPTH};
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Run a script file. A script that cannot start, because it is missing or
/// because the nesting bound tripped, fails here; the caller decides
/// whether to keep going.
pub struct Execute;

#[async_trait]
impl Tool for Execute {
    fn name(&self) -> &str {
        "EXECUTE"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "EXECUTE".to_string(),
            description: "Execute a script file".to_string(),
            usage: "EXECUTE <script>".to_string(),
        }
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let Some(raw) = args.get_positional(0) else {
            return ExecResult::failure(1, "Usage: EXECUTE <script>");
        };
        match run_script(ctx, raw).await {
            Ok(output) => ExecResult::success(output),
            Err(ScriptError::TooDeep) => ExecResult::failure(
                120,
                format!("EXECUTE: script recursion too deep (limit {MAX_SCRIPT_DEPTH})"),
            ),
            Err(err @ ScriptError::NotFound(_)) => ExecResult::failure(1, format!("EXECUTE: {err}")),
        }
    }
}
