use async_trait::async_trait;

use crate::result::ExecResult;
use crate::session::Session;
use crate::tools::traits::{Tool, ToolArgs, ToolSchema};

/// Show the mount table.
pub struct Mount;

#[async_trait]
impl Tool for Mount {
    fn name(&self) -> &str {
        "MOUNT"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "MOUNT".to_string(),
            description: "Show mounted volumes".to_string(),
            usage: "MOUNT".to_string(),
        }
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut Session) -> ExecResult {
        let mut out = String::from("Mounted volumes:\n");
        for volume in ctx.devices.volumes() {
            out.push_str(&format!("  {}:\n", volume.name()));
        }
        out.push_str(&format!(
            "  {}: (Host Directory: {})\n",
            ctx.devices.host_name(),
            ctx.devices.host().root().display()
        ));
        ExecResult::success(out)
    }
}
