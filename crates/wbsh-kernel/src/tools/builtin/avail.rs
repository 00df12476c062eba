use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// List the registered command names.
pub struct Avail;

#[async_trait]
impl Tool for Avail {
    fn name(&self) -> &str {
        "AVAIL"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "AVAIL".to_string(),
            description: "List available commands".to_string(),
            usage: "AVAIL".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let mut out = String::from("Available commands:\n");
        for name in ctx.registry.names() {
            out.push_str(&format!("  {}\n", name.to_lowercase()));
        }
        ExecResult::success(out)
    }
}
